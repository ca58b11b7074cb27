//! Card effects.
//!
//! - [`EffectHolder`]/[`EffectKind`]: one link of a play or response chain
//! - [`EquipKind`]: what a card does while on a table or as a character
//! - [`bind_targets`]: pairs an action's target groups with a chain
//!
//! Behavior lives on `Game` (see `resolver`), selected by matching on the
//! tag, so the effect values themselves stay plain data.

mod effect;
mod resolver;
mod targeting;

pub use effect::{EffectFlags, EffectHolder, EffectKind, EquipKind, PlayerFilter, TargetType};
pub use targeting::{bind_targets, BoundTarget};
