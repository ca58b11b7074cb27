//! Event handler registry.
//!
//! Cards register handlers when one of their equips is enabled and remove
//! them when it is disabled, always by card id. The bus hands out a sorted
//! snapshot for dispatch; the dispatcher re-checks each handler against the
//! live registry before invoking it, so removals take effect at once while
//! additions wait for the next dispatch.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::event::EventKind;
use crate::cards::CardId;
use crate::core::PlayerId;
use crate::effects::EquipKind;

/// Registration sequence number, unique for the whole game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HandlerId(pub u32);

impl HandlerId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for HandlerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Handler({})", self.0)
    }
}

/// A handler attached to an event kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Registration {
    pub id: HandlerId,

    /// The card whose equip registered the handler.
    pub card: CardId,

    /// The player the card is equipped to.
    pub owner: PlayerId,

    pub kind: EventKind,

    /// The behavior to run.
    pub handler: EquipKind,

    /// Higher priority runs first. Equal priorities run in registration order.
    pub priority: i32,
}

/// Registry of event handlers.
///
/// ## Example
///
/// ```
/// use bang_engine::cards::CardId;
/// use bang_engine::core::PlayerId;
/// use bang_engine::effects::EquipKind;
/// use bang_engine::triggers::{EventBus, EventKind};
///
/// let mut bus = EventBus::new();
/// let p0 = PlayerId::new(0);
/// bus.add(CardId::new(1), p0, EventKind::OnHit, EquipKind::Boots, 1);
/// bus.add(CardId::new(2), p0, EventKind::OnHit, EquipKind::ElGringo, 2);
///
/// let order: Vec<_> = bus.snapshot(EventKind::OnHit).iter().map(|r| r.card).collect();
/// assert_eq!(order, vec![CardId::new(2), CardId::new(1)]);
///
/// assert_eq!(bus.remove_card(CardId::new(2)), 1);
/// assert!(!bus.is_registered(CardId::new(2)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventBus {
    /// Registrations in insertion order.
    registrations: Vec<Registration>,

    next_id: u32,
}

impl EventBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler and return its id.
    pub fn add(
        &mut self,
        card: CardId,
        owner: PlayerId,
        kind: EventKind,
        handler: EquipKind,
        priority: i32,
    ) -> HandlerId {
        let id = HandlerId::new(self.next_id);
        self.next_id += 1;
        self.registrations.push(Registration {
            id,
            card,
            owner,
            kind,
            handler,
            priority,
        });
        id
    }

    /// Remove every handler of a card. Returns how many were removed.
    pub fn remove_card(&mut self, card: CardId) -> usize {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.card != card);
        before - self.registrations.len()
    }

    /// Whether the card still has handlers.
    #[must_use]
    pub fn is_registered(&self, card: CardId) -> bool {
        self.registrations.iter().any(|r| r.card == card)
    }

    /// Whether a handler is still live.
    #[must_use]
    pub fn contains(&self, id: HandlerId) -> bool {
        self.registrations.iter().any(|r| r.id == id)
    }

    /// Handlers of `kind` in dispatch order: priority descending, then
    /// registration order.
    #[must_use]
    pub fn snapshot(&self, kind: EventKind) -> SmallVec<[Registration; 4]> {
        let mut handlers: SmallVec<[Registration; 4]> = self
            .registrations
            .iter()
            .filter(|r| r.kind == kind)
            .copied()
            .collect();
        handlers.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.id.cmp(&b.id)));
        handlers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}
