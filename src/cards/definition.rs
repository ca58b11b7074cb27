//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: its name,
//! sign (suit and rank), color and the three effect chains. Runtime data
//! (pile, owner) lives in [`crate::cards::Card`] and never touches the
//! definition.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::effects::{EffectHolder, EffectKind, EquipKind, PlayerFilter};

/// Identifier of a card definition in a [`crate::cards::CardRegistry`].
///
/// Several physical cards (25 "Bang!") share one definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardDefId(pub u16);

impl CardDefId {
    /// Create a new definition ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for CardDefId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Def({})", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardSuit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl CardSuit {
    #[must_use]
    pub const fn is_red(self) -> bool {
        matches!(self, CardSuit::Hearts | CardSuit::Diamonds)
    }
}

/// Suit and rank printed in the card corner, used by draw checks.
///
/// Ranks run from 2 to 14, with 11-14 standing for J, Q, K and A.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardSign {
    pub suit: CardSuit,
    pub rank: u8,
}

impl CardSign {
    #[must_use]
    pub const fn new(suit: CardSuit, rank: u8) -> Self {
        Self { suit, rank }
    }
}

/// Border color: brown cards are played once, blue cards are equipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CardColor {
    /// Characters have no color.
    #[default]
    None,
    Brown,
    Blue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Part of the main deck.
    Deck,
    /// A character, dealt face up in front of a player.
    Character,
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use bang_engine::cards::{CardColor, CardDefId, CardDefinition, CardKind};
/// use bang_engine::effects::{EffectHolder, EffectKind};
///
/// let stagecoach = CardDefinition::new(CardDefId::new(7), "Stagecoach", CardKind::Deck)
///     .with_color(CardColor::Brown)
///     .with_effect(EffectHolder::new(EffectKind::Draw(2)));
///
/// assert_eq!(stagecoach.effects.len(), 1);
/// assert!(!stagecoach.is_bang_card());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardDefId,
    pub name: String,
    pub kind: CardKind,
    pub color: CardColor,
    pub sign: Option<CardSign>,

    /// Applied in order when the card is played from hand, or from the
    /// character slot for characters.
    pub effects: SmallVec<[EffectHolder; 2]>,

    /// Applied in order when the card answers a request.
    pub responses: SmallVec<[EffectHolder; 2]>,

    /// Enabled while the card sits on a table or as a character.
    pub equips: SmallVec<[EquipKind; 2]>,

    /// Filters for equipping onto another player. Empty equips on self.
    pub equip_target: SmallVec<[PlayerFilter; 2]>,

    /// Blue card that is equipped onto someone else (jail).
    pub equip_on_other: bool,
}

impl CardDefinition {
    /// Create a definition with no effects.
    #[must_use]
    pub fn new(id: CardDefId, name: impl Into<String>, kind: CardKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            color: CardColor::None,
            sign: None,
            effects: SmallVec::new(),
            responses: SmallVec::new(),
            equips: SmallVec::new(),
            equip_target: SmallVec::new(),
            equip_on_other: false,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: CardColor) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_sign(mut self, sign: CardSign) -> Self {
        self.sign = Some(sign);
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: EffectHolder) -> Self {
        self.effects.push(effect);
        self
    }

    #[must_use]
    pub fn with_response(mut self, effect: EffectHolder) -> Self {
        self.responses.push(effect);
        self
    }

    #[must_use]
    pub fn with_equip(mut self, equip: EquipKind) -> Self {
        self.equips.push(equip);
        self
    }

    /// Equip onto another player passing `filters` instead of on self.
    #[must_use]
    pub fn with_equip_target(mut self, filters: &[PlayerFilter]) -> Self {
        self.equip_on_other = true;
        self.equip_target.extend_from_slice(filters);
        self
    }

    /// A card whose play chain ends in a bang card effect.
    #[must_use]
    pub fn is_bang_card(&self) -> bool {
        self.effects
            .last()
            .map_or(false, |e| e.kind == EffectKind::BangCard)
    }

    /// A card that occupies the weapon slot.
    #[must_use]
    pub fn is_weapon(&self) -> bool {
        self.equips.iter().any(|e| matches!(e, EquipKind::Weapon(_)))
    }

    /// Base max hit points granted by a character definition.
    #[must_use]
    pub fn max_hp(&self) -> Option<i32> {
        self.equips.iter().find_map(|e| match e {
            EquipKind::MaxHp(hp) => Some(*hp),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::TargetType;

    #[test]
    fn test_bang_card_detection() {
        let bang = CardDefinition::new(CardDefId::new(0), "Bang!", CardKind::Deck)
            .with_effect(EffectHolder::new(EffectKind::BangLimit))
            .with_effect(EffectHolder::new(EffectKind::BangCard).with_target(TargetType::Player));
        assert!(bang.is_bang_card());

        let gatling = CardDefinition::new(CardDefId::new(1), "Gatling", CardKind::Deck)
            .with_effect(EffectHolder::new(EffectKind::Bang).with_target(TargetType::OtherPlayers));
        assert!(!gatling.is_bang_card());
    }

    #[test]
    fn test_weapon_and_hp() {
        let remington = CardDefinition::new(CardDefId::new(2), "Remington", CardKind::Deck)
            .with_color(CardColor::Blue)
            .with_equip(EquipKind::Weapon(3));
        assert!(remington.is_weapon());
        assert_eq!(remington.max_hp(), None);

        let gringo = CardDefinition::new(CardDefId::new(3), "El Gringo", CardKind::Character)
            .with_equip(EquipKind::MaxHp(3))
            .with_equip(EquipKind::ElGringo);
        assert_eq!(gringo.max_hp(), Some(3));
        assert!(!gringo.is_weapon());
    }

    #[test]
    fn test_equip_target() {
        let jail = CardDefinition::new(CardDefId::new(4), "Jail", CardKind::Deck)
            .with_equip(EquipKind::Jail)
            .with_equip_target(&[PlayerFilter::NotSelf, PlayerFilter::NotSheriff]);
        assert!(jail.equip_on_other);
        assert_eq!(jail.equip_target.len(), 2);
    }

    #[test]
    fn test_red_suits() {
        assert!(CardSuit::Hearts.is_red());
        assert!(CardSuit::Diamonds.is_red());
        assert!(!CardSuit::Spades.is_red());
    }
}
