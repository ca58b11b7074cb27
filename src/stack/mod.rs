//! Requests and deferred actions.
//!
//! Two queues drive the game forward between player actions:
//!
//! - The **request queue** holds decisions owed by a player. Only the
//!   front request is live: it alone accepts picks, responses and
//!   resolves, and its status is what clients display. Follow-up requests
//!   raised while answering it go to the front, so the most recent
//!   question is always answered first.
//! - The **pending queue** holds [`DelayedAction`]s that wait for the
//!   request queue to empty.
//!
//! ## Example
//!
//! ```
//! use bang_engine::core::PlayerId;
//! use bang_engine::stack::{Request, RequestKind, RequestQueue};
//!
//! let mut queue = RequestQueue::new();
//! assert!(queue.push_back(Request::rule(RequestKind::Draw, PlayerId::new(0))));
//! queue.push_front(Request::rule(RequestKind::Death, PlayerId::new(1)));
//! assert_eq!(queue.front().map(|r| r.target), Some(PlayerId::new(1)));
//! ```

mod pending;
mod queue;
mod request;
mod resolution;

pub use pending::{DelayedAction, PendingQueue};
pub use queue::RequestQueue;
pub use request::{BangState, DrawSource, Request, RequestKind};

use serde::{Deserialize, Serialize};

/// What the game is waiting for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestState {
    /// No request: the playing player may play cards or pass.
    Idle,
    /// The front request wants a card or pile picked.
    AwaitingPick,
    /// The front request can be answered with a card or resolved.
    AwaitingResponse,
    /// The front request resolves on its own after a number of ticks.
    Timed,
}
