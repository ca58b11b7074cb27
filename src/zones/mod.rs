//! Pile system for card locations.
//!
//! ## Key Types
//!
//! - `PileKind`: The fixed set of shared and per-player piles
//! - `ZoneManager`: Card arena, pile membership and movement

pub mod manager;
pub mod pile;

pub use manager::ZoneManager;
pub use pile::PileKind;
