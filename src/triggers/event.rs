//! Events: named hook points and their payloads.
//!
//! An `Event` is built at the point where something happens and handed to
//! [`crate::game::Game::call_event`]. Handlers receive it mutably, so a
//! modifier event such as [`Event::ApplyBangModifier`] returns its result
//! through the payload.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::PlayerId;

/// Hook point identifier, used to index registrations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    OnRequestDraw,
    OnDrawFromDeck,
    OnCardDrawn,
    ApplyBangModifier,
    OnHit,
    OnPlayerDeath,
    OnEffectEnd,
}

/// An in-flight game occurrence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Before the draw request is raised; a handler may queue its own.
    OnRequestDraw { player: PlayerId },
    /// The player picked the deck in the draw phase.
    OnDrawFromDeck { player: PlayerId },
    /// One card of the draw phase reached the hand.
    OnCardDrawn { player: PlayerId, card: CardId },
    /// A bang card of `player` is about to raise its request.
    ApplyBangModifier { player: PlayerId, strength: i32 },
    /// Hit points were lost.
    OnHit {
        origin_card: Option<CardId>,
        origin: Option<PlayerId>,
        target: PlayerId,
        damage: i32,
        is_bang: bool,
    },
    /// `target` was eliminated.
    OnPlayerDeath {
        killer: Option<PlayerId>,
        target: PlayerId,
    },
    /// A played card, response or pick finished applying.
    OnEffectEnd { player: PlayerId, card: CardId },
}

impl Event {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Event::OnRequestDraw { .. } => EventKind::OnRequestDraw,
            Event::OnDrawFromDeck { .. } => EventKind::OnDrawFromDeck,
            Event::OnCardDrawn { .. } => EventKind::OnCardDrawn,
            Event::ApplyBangModifier { .. } => EventKind::ApplyBangModifier,
            Event::OnHit { .. } => EventKind::OnHit,
            Event::OnPlayerDeath { .. } => EventKind::OnPlayerDeath,
            Event::OnEffectEnd { .. } => EventKind::OnEffectEnd,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind() {
        let hit = Event::OnHit {
            origin_card: None,
            origin: Some(PlayerId::new(0)),
            target: PlayerId::new(1),
            damage: 1,
            is_bang: true,
        };
        assert_eq!(hit.kind(), EventKind::OnHit);
        assert_eq!(
            Event::OnRequestDraw { player: PlayerId::new(2) }.kind(),
            EventKind::OnRequestDraw
        );
    }
}
