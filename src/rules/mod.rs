//! Game rules: turn flow, draw checks and win conditions.
//!
//! - `engine`: Pure win evaluation plus the death follow-up
//! - `turn`: Start of turn, predraw checks, draw phase, end of turn
//! - `draw_check`: Flipping cards for barrel, jail and dynamite

pub mod draw_check;
pub mod engine;
pub mod turn;

pub use draw_check::CheckOutcome;
pub use engine::{evaluate_winner, DeathContext, GameResult};
