//! The game instance.
//!
//! A [`Game`] owns every piece of game truth: the card arena and piles,
//! the players, the request and pending queues, the event bus, the RNG and
//! the outbound update log. Rules are `impl Game` blocks spread over the
//! modules that own each concern, all working on the same `&mut self`.
//!
//! ## Flow of an action
//!
//! 1. [`Game::handle_action`] validates the action without mutating.
//! 2. The action is applied: cards move, requests are queued or popped,
//!    instant events run.
//! 3. Deferred actions drain while no request is outstanding.
//! 4. Clients read the new entries of the update log.
//!
//! ## Example
//!
//! ```
//! use bang_engine::core::{GameConfig, PlayerId};
//! use bang_engine::game::Game;
//! use bang_engine::stack::RequestState;
//!
//! let game = Game::new(GameConfig::new(4).with_seed(7));
//! let first = game.playing().unwrap();
//!
//! // The first player is asked to draw.
//! assert_eq!(game.request_state(), RequestState::AwaitingPick);
//! assert_eq!(game.front_request().map(|r| r.target), Some(first));
//! assert!(game.player(PlayerId::new(0)).alive());
//! ```

mod dispatch;
mod player;
mod setup;
mod table;
mod updates;

pub use player::{Player, PredrawCheck};
pub use table::Visibility;
pub use updates::{GameUpdate, PickTarget, RequestStatus, UpdateLog, UpdateTarget};

use std::sync::Arc;

use serde::Serialize;

use crate::cards::{CardDefinition, CardId, CardRegistry};
use crate::core::{ActionRecord, FormattedText, GameConfig, GameRng, GameRngState, PlayerId, PlayerMap};
use crate::rules::GameResult;
use crate::stack::{PendingQueue, RequestQueue};
use crate::triggers::EventBus;
use crate::zones::ZoneManager;

/// A single game of Bang!.
#[derive(Clone, Debug)]
pub struct Game {
    pub(crate) config: GameConfig,
    pub(crate) catalog: Arc<CardRegistry>,
    pub(crate) zones: ZoneManager,
    pub(crate) players: PlayerMap<Player>,
    pub(crate) requests: RequestQueue,
    pub(crate) pending: PendingQueue,
    pub(crate) bus: EventBus,
    pub(crate) rng: GameRng,
    pub(crate) updates: UpdateLog,
    /// Whose turn it is.
    pub(crate) playing: Option<PlayerId>,
    pub(crate) winner: Option<GameResult>,
    /// Applied actions, for replays.
    pub(crate) history: Vec<ActionRecord>,
}

/// Borrowed view of the serialized game truth.
#[derive(Serialize)]
struct Snapshot<'a> {
    zones: &'a ZoneManager,
    players: &'a PlayerMap<Player>,
    requests: &'a RequestQueue,
    pending: &'a PendingQueue,
    bus: &'a EventBus,
    rng: GameRngState,
    updates: &'a UpdateLog,
    playing: Option<PlayerId>,
    winner: Option<GameResult>,
    history: &'a [ActionRecord],
}

impl Game {
    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &CardRegistry {
        &self.catalog
    }

    #[must_use]
    pub fn zones(&self) -> &ZoneManager {
        &self.zones
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &Player {
        &self.players[player]
    }

    #[must_use]
    pub fn requests(&self) -> &RequestQueue {
        &self.requests
    }

    #[must_use]
    pub fn pending(&self) -> &PendingQueue {
        &self.pending
    }

    #[must_use]
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    #[must_use]
    pub fn playing(&self) -> Option<PlayerId> {
        self.playing
    }

    #[must_use]
    pub fn winner(&self) -> Option<GameResult> {
        self.winner
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    #[must_use]
    pub fn history(&self) -> &[ActionRecord] {
        &self.history
    }

    #[must_use]
    pub fn updates(&self) -> &UpdateLog {
        &self.updates
    }

    /// Take the pending notifications, leaving the log empty.
    pub fn take_updates(&mut self) -> Vec<(UpdateTarget, GameUpdate)> {
        self.updates.drain()
    }

    /// Definition of a card in this game.
    #[must_use]
    pub fn def_of(&self, card: CardId) -> &CardDefinition {
        self.catalog.get(self.zones.card(card).def)
    }

    /// Serialize the whole game truth.
    ///
    /// Two games with equal snapshots are indistinguishable to any future
    /// action.
    pub fn snapshot(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(&Snapshot {
            zones: &self.zones,
            players: &self.players,
            requests: &self.requests,
            pending: &self.pending,
            bus: &self.bus,
            rng: self.rng.state(),
            updates: &self.updates,
            playing: self.playing,
            winner: self.winner,
            history: &self.history,
        })
    }

    // === Notifications ===

    pub(crate) fn push_update(&mut self, target: UpdateTarget, update: GameUpdate) {
        self.updates.push(target, update);
    }

    /// Add a line to everybody's game log.
    pub(crate) fn log(&mut self, text: FormattedText) {
        self.push_update(UpdateTarget::Everyone, GameUpdate::Log(text));
    }
}
