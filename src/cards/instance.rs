//! Physical cards in a game.
//!
//! A `Card` is one physical copy of a definition. Its id is stable for the
//! whole game, except that a deck shuffle reassigns which definition sits
//! behind each id in the deck.

use serde::{Deserialize, Serialize};

use super::definition::CardDefId;
use crate::core::PlayerId;
use crate::zones::PileKind;

/// Identifier of a physical card, unique within a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Runtime state of a physical card.
///
/// `pile` and `owner` always satisfy [`PileKind::is_owned`]: owned piles
/// carry an owner, shared piles never do. Only the zone manager writes them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub def: CardDefId,
    pub pile: PileKind,
    pub owner: Option<PlayerId>,
    /// Times the card was played this turn.
    pub usages: u32,
    /// Used up until its owner's next turn.
    pub tapped: bool,
}

impl Card {
    #[must_use]
    pub fn new(def: CardDefId, pile: PileKind, owner: Option<PlayerId>) -> Self {
        assert_eq!(
            pile.is_owned(),
            owner.is_some(),
            "Pile {:?} and owner {:?} are inconsistent",
            pile,
            owner
        );
        Self {
            def,
            pile,
            owner,
            usages: 0,
            tapped: false,
        }
    }

    /// Whether the card is at the given location.
    #[must_use]
    pub fn is_at(&self, pile: PileKind, owner: Option<PlayerId>) -> bool {
        self.pile == pile && self.owner == owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id_display() {
        assert_eq!(CardId::new(12).to_string(), "Card(12)");
        assert_eq!(CardId::new(3).index(), 3);
    }

    #[test]
    fn test_card_location() {
        let card = Card::new(CardDefId::new(0), PileKind::PlayerHand, Some(PlayerId::new(1)));
        assert!(card.is_at(PileKind::PlayerHand, Some(PlayerId::new(1))));
        assert!(!card.is_at(PileKind::PlayerHand, Some(PlayerId::new(0))));
        assert_eq!((card.usages, card.tapped), (0, false));
    }

    #[test]
    #[should_panic(expected = "inconsistent")]
    fn test_shared_pile_rejects_owner() {
        let _ = Card::new(CardDefId::new(0), PileKind::MainDeck, Some(PlayerId::new(0)));
    }

    #[test]
    #[should_panic(expected = "inconsistent")]
    fn test_owned_pile_requires_owner() {
        let _ = Card::new(CardDefId::new(0), PileKind::PlayerTable, None);
    }
}
