//! Card system: definitions, physical cards, and the catalog.
//!
//! ## Key Types
//!
//! - `CardDefId`: Identifier of a static definition
//! - `CardDefinition`: Sign, color and effect chains of one physical card
//! - `CardId`: Identifier of a physical card in a game
//! - `Card`: Runtime location (pile and owner) of a physical card
//! - `CardRegistry`: Catalog lookup, including the base game

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{CardColor, CardDefId, CardDefinition, CardKind, CardSign, CardSuit};
pub use instance::{Card, CardId};
pub use registry::CardRegistry;
