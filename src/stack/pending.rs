//! Deferred actions.
//!
//! Some consequences must only happen once the effect that provoked them
//! has fully settled: the next turn starts after the discard pass, a dead
//! player's win check runs after the death request is gone. They wait in a
//! `PendingQueue` and run at drain points (end of a dispatcher action,
//! after a timer tick, after game start), and only while no request is
//! outstanding.
//!
//! ## Insertion points
//!
//! - `defer` appends: strict FIFO among ordinary follow-ups, also across
//!   nested triggers.
//! - `defer_front` prepends: used for win checks, which must run before
//!   anything queued by the death that caused them.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::PlayerId;
use crate::game::Game;
use crate::triggers::Event;

/// A closure-free follow-up, stored as data so the game stays cloneable
/// and serializable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DelayedAction {
    /// Evaluate win conditions after `target` died.
    CheckGameOver {
        killer: Option<PlayerId>,
        target: PlayerId,
    },
    /// Resolve the next predraw check, or move on to drawing.
    PredrawStep { player: PlayerId },
    /// Raise the draw request.
    RequestDraw { player: PlayerId },
    /// Try to end the turn again after a discard pass.
    PassTurn { player: PlayerId },
    /// Start the turn of whoever sits after `player`.
    StartNextTurn { player: PlayerId },
    /// Draw cards into a hand.
    DrawCards { player: PlayerId, count: u32 },
    /// A dead player lost its ghost: clear what it still holds.
    BuryGhost { player: PlayerId },
    /// Queued-mode event dispatch.
    Dispatch(Event),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingQueue {
    actions: Vector<DelayedAction>,
}

impl PendingQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, action: DelayedAction) {
        self.actions.push_back(action);
    }

    pub fn push_front(&mut self, action: DelayedAction) {
        self.actions.push_front(action);
    }

    pub fn pop_front(&mut self) -> Option<DelayedAction> {
        self.actions.pop_front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DelayedAction> {
        self.actions.iter()
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Game {
    /// Run `action` after everything already deferred.
    pub(crate) fn defer(&mut self, action: DelayedAction) {
        self.pending.push_back(action);
    }

    /// Run `action` before everything already deferred.
    pub(crate) fn defer_front(&mut self, action: DelayedAction) {
        self.pending.push_front(action);
    }

    /// Dispatch an event once the current action has settled.
    pub(crate) fn queue_event(&mut self, event: Event) {
        self.defer(DelayedAction::Dispatch(event));
    }

    /// Run deferred actions until one raises a request, the game ends, or
    /// none are left.
    pub(crate) fn drain_pending(&mut self) {
        while self.requests.is_empty() && !self.is_game_over() {
            let Some(action) = self.pending.pop_front() else {
                break;
            };
            debug!(?action, "running deferred action");
            self.run_delayed(action);
        }
    }

    fn run_delayed(&mut self, action: DelayedAction) {
        match action {
            DelayedAction::CheckGameOver { killer, target } => self.check_game_over(killer, target),
            DelayedAction::PredrawStep { player } => self.predraw_step(player),
            DelayedAction::RequestDraw { player } => self.request_draw(player),
            DelayedAction::PassTurn { player } => self.end_turn(player),
            DelayedAction::StartNextTurn { player } => self.start_next_turn(player),
            DelayedAction::DrawCards { player, count } => {
                if self.players[player].alive() {
                    self.draw_to_hand(player, count);
                }
            }
            DelayedAction::BuryGhost { player } => self.bury_ghost(player),
            DelayedAction::Dispatch(mut event) => self.call_event(&mut event),
        }
    }
}
