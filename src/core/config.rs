//! Game configuration.
//!
//! A `GameConfig` is fixed when the game starts. Optional rules are plain
//! switches here rather than code paths spread across the engine:
//! - `escapes`: destroy/steal effects raise an escapable request first
//! - `damage_timer`: damage waits in a timed request before it lands
//!
//! The remaining overrides (`roles`, `characters`, `stacked_deck`) pin down
//! otherwise random setup, which tests and tutorials rely on.

use serde::{Deserialize, Serialize};

use super::player::PlayerRole;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of seats (2-8).
    pub player_count: usize,

    /// Seed for the single per-game RNG.
    pub seed: u64,

    /// Cards drawn in the draw phase.
    pub cards_to_draw: u32,

    /// Initial hand size. `None` deals each player their max hp.
    pub initial_cards: Option<u32>,

    /// Destroy/steal against an opponent can be escaped.
    pub escapes: bool,

    /// Ticks a damage request waits before landing. `None` applies damage
    /// immediately.
    pub damage_timer: Option<u32>,

    /// Fixed roles by seat. `None` deals the shuffled role pool.
    pub roles: Option<Vec<PlayerRole>>,

    /// Fixed character names by seat. `None` deals shuffled characters.
    pub characters: Option<Vec<String>>,

    /// Card names placed on top of the shuffled deck, first name drawn first.
    pub stacked_deck: Vec<String>,
}

impl GameConfig {
    /// Create a configuration with default rules.
    pub fn new(player_count: usize) -> Self {
        assert!(player_count >= 2, "Must have at least 2 players");
        assert!(player_count <= 8, "At most 8 players supported");

        Self {
            player_count,
            seed: 0,
            cards_to_draw: 2,
            initial_cards: None,
            escapes: false,
            damage_timer: None,
            roles: None,
            characters: None,
            stacked_deck: Vec::new(),
        }
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of cards drawn each turn.
    #[must_use]
    pub fn with_cards_to_draw(mut self, count: u32) -> Self {
        self.cards_to_draw = count;
        self
    }

    /// Deal a fixed number of initial cards instead of max hp.
    #[must_use]
    pub fn with_initial_cards(mut self, count: u32) -> Self {
        self.initial_cards = Some(count);
        self
    }

    /// Enable escapable destroy/steal requests.
    #[must_use]
    pub fn with_escapes(mut self) -> Self {
        self.escapes = true;
        self
    }

    /// Delay damage by a timed request of `ticks` ticks.
    #[must_use]
    pub fn with_damage_timer(mut self, ticks: u32) -> Self {
        assert!(ticks > 0, "Damage timer needs at least one tick");
        self.damage_timer = Some(ticks);
        self
    }

    /// Assign roles by seat.
    #[must_use]
    pub fn with_roles(mut self, roles: Vec<PlayerRole>) -> Self {
        assert_eq!(roles.len(), self.player_count, "One role per seat");
        self.roles = Some(roles);
        self
    }

    /// Assign characters by seat.
    #[must_use]
    pub fn with_characters<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        assert_eq!(names.len(), self.player_count, "One character per seat");
        self.characters = Some(names);
        self
    }

    /// Force cards onto the top of the deck.
    #[must_use]
    pub fn with_stacked_deck<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.stacked_deck = names.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::new(4);
        assert_eq!(config.player_count, 4);
        assert_eq!(config.cards_to_draw, 2);
        assert!(config.initial_cards.is_none());
        assert!(!config.escapes);
        assert!(config.damage_timer.is_none());
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new(3)
            .with_seed(9)
            .with_initial_cards(0)
            .with_escapes()
            .with_damage_timer(5)
            .with_roles(vec![PlayerRole::Deputy, PlayerRole::Outlaw, PlayerRole::Renegade])
            .with_characters(["Willy the Kid", "Paul Regret", "Rose Doolan"])
            .with_stacked_deck(["Bang!"]);

        assert_eq!(config.seed, 9);
        assert_eq!(config.initial_cards, Some(0));
        assert!(config.escapes);
        assert_eq!(config.damage_timer, Some(5));
        assert_eq!(config.characters.as_ref().map(Vec::len), Some(3));
        assert_eq!(config.stacked_deck, vec!["Bang!".to_string()]);
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = GameConfig::new(5).with_seed(77).with_escapes();
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    #[should_panic(expected = "One role per seat")]
    fn test_roles_must_match_seats() {
        let _ = GameConfig::new(4).with_roles(vec![PlayerRole::Sheriff]);
    }

    #[test]
    #[should_panic(expected = "At most 8 players supported")]
    fn test_too_many_players() {
        GameConfig::new(9);
    }
}
