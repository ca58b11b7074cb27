//! # bang-engine
//!
//! Authoritative rule engine for the Bang! card game.
//!
//! ## Design Principles
//!
//! 1. **One owner of game truth**: a [`Game`] holds every card location,
//!    player stat and outstanding decision. Nothing outside the dispatcher
//!    mutates it.
//!
//! 2. **Validate, then mutate**: every action is checked in full before
//!    any change. A rejected action leaves the game byte-for-byte as it
//!    was.
//!
//! 3. **Ids, not references**: cards, players and event handlers are plain
//!    integer ids into arenas owned by the game, so the whole game clones
//!    and serializes.
//!
//! 4. **Deterministic**: all randomness comes from one seeded RNG consumed
//!    in call order. The same actions against the same seed produce the
//!    same update stream.
//!
//! ## Modules
//!
//! - `core`: Players, roles, RNG, configuration, actions, messages, errors
//! - `cards`: Card definitions, physical cards and the catalog
//! - `zones`: Piles and card movement bookkeeping
//! - `effects`: Play, response and equip effects
//! - `triggers`: Event bus for equip-driven abilities
//! - `stack`: Requests and deferred actions
//! - `rules`: Turn flow, draw checks and win conditions
//! - `game`: The game instance, its dispatcher and its update stream

pub mod core;
pub mod cards;
pub mod zones;
pub mod effects;
pub mod triggers;
pub mod stack;
pub mod rules;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    ActionOutcome, ActionRecord, ActionResult, FormattedText, GameAction, GameConfig, GameError,
    GameRng, PlayTarget, PlayerId, PlayerMap, PlayerRole,
};

pub use crate::cards::{Card, CardDefinition, CardId, CardRegistry};

pub use crate::zones::{PileKind, ZoneManager};

pub use crate::effects::{EffectHolder, EffectKind, EquipKind};

pub use crate::triggers::{Event, EventBus, EventKind};

pub use crate::stack::{Request, RequestKind, RequestState};

pub use crate::rules::GameResult;

pub use crate::game::{Game, GameUpdate, UpdateTarget, Visibility};
