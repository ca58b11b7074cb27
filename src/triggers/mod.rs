//! Event bus for equip-driven abilities.
//!
//! Cards in play react to game happenings through handlers registered on
//! the [`EventBus`]. Registration is keyed by card id and always happens in
//! equip/unequip pairs, so a card leaving play takes its handlers with it.
//!
//! ## Dispatch modes
//!
//! - **Instant**: `Game::call_event` runs the handlers right away with
//!   mutable access to the payload, e.g. Slab the Killer raising a bang's
//!   strength before the request is built.
//! - **Queued**: `Game::queue_event` defers the dispatch until the current
//!   action has settled and no request is outstanding (see
//!   [`crate::stack::DelayedAction`]).
//!
//! ## Ordering
//!
//! Handlers run by priority (descending), then by registration order. The
//! handler list is captured when dispatch starts: a handler registered
//! during dispatch first sees the next event of its kind.

mod event;
mod handlers;
mod registry;

pub use event::{Event, EventKind};
pub use registry::{EventBus, HandlerId, Registration};
