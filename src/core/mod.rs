//! Core engine types: players, roles, RNG, configuration, actions, errors.
//!
//! Everything here is plain data with no knowledge of cards in play; the
//! rule logic lives in `game` and the modules it drives.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod text;
pub mod error;

pub use player::{PlayerId, PlayerMap, PlayerRole};
pub use rng::{GameRng, GameRngState};
pub use config::GameConfig;
pub use action::{ActionRecord, GameAction, PlayTarget};
pub use text::{FormatArg, FormattedText};
pub use error::{ActionOutcome, ActionResult, GameError};
