//! Pile kinds and their ownership rule.

use serde::{Deserialize, Serialize};

/// A named, ordered card container.
///
/// Shared piles never have an owner; per-player piles always have one.
/// The last element of a pile is its top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PileKind {
    MainDeck,
    DiscardPile,
    /// Cards revealed for a choice (general store, multi-card checks).
    Selection,
    /// Cards out of play, such as undealt characters.
    HiddenDeck,
    PlayerHand,
    PlayerTable,
    PlayerCharacter,
}

impl PileKind {
    /// Shared piles, in storage order.
    pub const SHARED: [PileKind; 4] = [
        PileKind::MainDeck,
        PileKind::DiscardPile,
        PileKind::Selection,
        PileKind::HiddenDeck,
    ];

    /// Per-player piles, in storage order.
    pub const OWNED: [PileKind; 3] = [
        PileKind::PlayerHand,
        PileKind::PlayerTable,
        PileKind::PlayerCharacter,
    ];

    /// Whether cards in this pile must have an owner.
    #[must_use]
    pub const fn is_owned(self) -> bool {
        matches!(
            self,
            PileKind::PlayerHand | PileKind::PlayerTable | PileKind::PlayerCharacter
        )
    }

    /// Whether the cards of this pile are equipped while they stay there.
    #[must_use]
    pub const fn is_in_play(self) -> bool {
        matches!(self, PileKind::PlayerTable | PileKind::PlayerCharacter)
    }

    /// Storage slot within the shared or per-player pile array.
    pub(crate) const fn slot(self) -> usize {
        match self {
            PileKind::MainDeck | PileKind::PlayerHand => 0,
            PileKind::DiscardPile | PileKind::PlayerTable => 1,
            PileKind::Selection | PileKind::PlayerCharacter => 2,
            PileKind::HiddenDeck => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ownership_rule() {
        for pile in PileKind::SHARED {
            assert!(!pile.is_owned());
        }
        for pile in PileKind::OWNED {
            assert!(pile.is_owned());
        }
    }

    #[test]
    fn test_slots_match_storage_order() {
        for (i, pile) in PileKind::SHARED.iter().enumerate() {
            assert_eq!(pile.slot(), i);
        }
        for (i, pile) in PileKind::OWNED.iter().enumerate() {
            assert_eq!(pile.slot(), i);
        }
    }

    #[test]
    fn test_in_play() {
        assert!(PileKind::PlayerTable.is_in_play());
        assert!(PileKind::PlayerCharacter.is_in_play());
        assert!(!PileKind::PlayerHand.is_in_play());
        assert!(!PileKind::DiscardPile.is_in_play());
    }
}
