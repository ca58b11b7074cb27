//! Inbound actions.
//!
//! The transport layer delivers one `GameAction` at a time for a given
//! player. Play and respond actions carry one target group per effect that
//! needs a target, in the card's effect order.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use super::player::PlayerId;
use crate::cards::CardId;
use crate::zones::PileKind;

/// Target group bound to one effect of a played card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayTarget {
    /// The effect targets nobody, or everybody implicitly.
    None,
    /// Player ids chosen for the effect.
    Players(SmallVec<[PlayerId; 1]>),
    /// Card ids chosen for the effect.
    Cards(SmallVec<[CardId; 1]>),
}

impl PlayTarget {
    /// Target a single player.
    #[must_use]
    pub fn player(player: PlayerId) -> Self {
        PlayTarget::Players(smallvec![player])
    }

    /// Target a single card.
    #[must_use]
    pub fn card(card: CardId) -> Self {
        PlayTarget::Cards(smallvec![card])
    }
}

/// An action submitted by a player.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    /// Pick a card (or a deck) the front request asks for.
    PickCard {
        pile: PileKind,
        owner: Option<PlayerId>,
        card: Option<CardId>,
    },

    /// Play a card on your own turn while no request is pending.
    PlayCard {
        card: CardId,
        targets: Vec<PlayTarget>,
    },

    /// Answer the front request with a card.
    RespondCard {
        card: CardId,
        targets: Vec<PlayTarget>,
    },

    /// End your turn.
    PassTurn,

    /// Accept the front request's consequence (take the hit).
    Resolve,

    /// One tick of the front request's timer elapsed.
    Tick,
}

impl GameAction {
    /// Play a card with no targets.
    #[must_use]
    pub fn play(card: CardId) -> Self {
        GameAction::PlayCard {
            card,
            targets: Vec::new(),
        }
    }

    /// Play a card against a single player.
    #[must_use]
    pub fn play_on(card: CardId, target: PlayerId) -> Self {
        GameAction::PlayCard {
            card,
            targets: vec![PlayTarget::player(target)],
        }
    }

    /// Respond with a card that needs no targets.
    #[must_use]
    pub fn respond(card: CardId) -> Self {
        GameAction::RespondCard {
            card,
            targets: Vec::new(),
        }
    }

    /// Pick a specific card.
    #[must_use]
    pub fn pick(pile: PileKind, owner: Option<PlayerId>, card: CardId) -> Self {
        GameAction::PickCard {
            pile,
            owner,
            card: Some(card),
        }
    }

    /// Pick from the main deck.
    #[must_use]
    pub fn pick_deck() -> Self {
        GameAction::PickCard {
            pile: PileKind::MainDeck,
            owner: None,
            card: None,
        }
    }
}

/// An accepted action, kept for replays.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Who acted.
    pub player: PlayerId,
    /// What they did.
    pub action: GameAction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let play = GameAction::play_on(CardId::new(5), PlayerId::new(1));
        match play {
            GameAction::PlayCard { card, targets } => {
                assert_eq!(card, CardId::new(5));
                assert_eq!(targets, vec![PlayTarget::player(PlayerId::new(1))]);
            }
            other => panic!("unexpected action {:?}", other),
        }

        assert_eq!(
            GameAction::pick_deck(),
            GameAction::PickCard { pile: PileKind::MainDeck, owner: None, card: None }
        );
    }

    #[test]
    fn test_action_json_roundtrip() {
        let action = GameAction::RespondCard {
            card: CardId::new(3),
            targets: vec![PlayTarget::None, PlayTarget::card(CardId::new(9))],
        };
        let json = serde_json::to_string(&action).unwrap();
        let back: GameAction = serde_json::from_str(&json).unwrap();
        assert_eq!(action, back);
    }
}
