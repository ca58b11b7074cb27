//! The request queue.
//!
//! Requests are appended at the back, but only the front one is ever
//! picked against, responded to or resolved. A request raised while the
//! front one is being handled can jump the line with `push_front`, which
//! models a sub-decision that must settle first.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::request::Request;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestQueue {
    requests: Vector<Request>,
}

impl RequestQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a request. Returns true if it became the front.
    pub fn push_back(&mut self, request: Request) -> bool {
        self.requests.push_back(request);
        self.requests.len() == 1
    }

    /// Put a request in front of everything queued.
    pub fn push_front(&mut self, request: Request) {
        self.requests.push_front(request);
    }

    /// Remove exactly the front request.
    pub fn pop_front(&mut self) -> Option<Request> {
        self.requests.pop_front()
    }

    #[must_use]
    pub fn front(&self) -> Option<&Request> {
        self.requests.front()
    }

    pub fn front_mut(&mut self) -> Option<&mut Request> {
        self.requests.front_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Request> {
        self.requests.iter()
    }

    pub fn clear(&mut self) {
        self.requests.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use crate::stack::RequestKind;

    fn draw_for(player: u8) -> Request {
        Request::rule(RequestKind::Draw, PlayerId::new(player))
    }

    #[test]
    fn test_push_back_reports_new_front() {
        let mut queue = RequestQueue::new();
        assert!(queue.push_back(draw_for(0)));
        assert!(!queue.push_back(draw_for(1)));
        assert_eq!(queue.front().map(|r| r.target), Some(PlayerId::new(0)));
    }

    #[test]
    fn test_push_front_takes_priority() {
        let mut queue = RequestQueue::new();
        queue.push_back(draw_for(0));
        queue.push_front(draw_for(1));
        assert_eq!(queue.front().map(|r| r.target), Some(PlayerId::new(1)));
    }

    #[test]
    fn test_pop_removes_only_front() {
        let mut queue = RequestQueue::new();
        for p in 0..3 {
            queue.push_back(draw_for(p));
        }
        let popped = queue.pop_front().unwrap();
        assert_eq!(popped.target, PlayerId::new(0));
        let rest: Vec<_> = queue.iter().map(|r| r.target.0).collect();
        assert_eq!(rest, vec![1, 2]);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut queue = RequestQueue::new();
        queue.push_back(draw_for(0));
        let snapshot = queue.clone();
        queue.front_mut().unwrap().timer = Some(2);
        queue.push_front(draw_for(1));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.front().and_then(|r| r.timer), None);
    }
}
