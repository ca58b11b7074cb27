//! Action dispatcher.
//!
//! Every inbound action is checked against the turn and the front request
//! before anything changes. A rejected action returns an error and leaves
//! the game byte-for-byte untouched. A pick, response or resolve the front
//! request does not accept is [`ActionOutcome::Ignored`], since the client
//! may simply be answering a request that was just replaced.

use tracing::{debug, warn};

use super::Game;
use crate::cards::CardId;
use crate::core::{ActionOutcome, ActionRecord, ActionResult, GameAction, GameError, PlayTarget, PlayerId};
use crate::effects::bind_targets;
use crate::zones::PileKind;

impl Game {
    /// Validate and apply one action submitted by `player`.
    pub fn handle_action(&mut self, player: PlayerId, action: GameAction) -> ActionResult {
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }
        if player.index() >= self.players.player_count() {
            return Err(GameError::InvalidAction("unknown player"));
        }
        if !self.players[player].alive() {
            return Err(GameError::rule("ERROR_PLAYER_DEAD"));
        }

        let result = match &action {
            GameAction::PickCard { pile, owner, card } => self.apply_pick(player, *pile, *owner, *card),
            GameAction::PlayCard { card, targets } => self.apply_play(player, *card, targets),
            GameAction::RespondCard { card, targets } => self.apply_respond(player, *card, targets),
            GameAction::PassTurn => self.apply_pass(player),
            GameAction::Resolve => self.apply_resolve(player),
            GameAction::Tick => self.apply_tick(player),
        };

        match &result {
            Ok(ActionOutcome::Applied) => {
                self.history.push(ActionRecord { player, action });
                self.drain_pending();
                #[cfg(debug_assertions)]
                self.zones.assert_consistent();
            }
            Ok(ActionOutcome::Ignored) => debug!(%player, ?action, "action ignored"),
            Err(GameError::RuleViolation(text)) => warn!(%player, %text, "rule violation"),
            Err(err) => warn!(%player, %err, "action rejected"),
        }
        result
    }

    pub fn play_card(&mut self, player: PlayerId, card: CardId, targets: Vec<PlayTarget>) -> ActionResult {
        self.handle_action(player, GameAction::PlayCard { card, targets })
    }

    pub fn pick_card(
        &mut self,
        player: PlayerId,
        pile: PileKind,
        owner: Option<PlayerId>,
        card: Option<CardId>,
    ) -> ActionResult {
        self.handle_action(player, GameAction::PickCard { pile, owner, card })
    }

    pub fn respond_card(&mut self, player: PlayerId, card: CardId, targets: Vec<PlayTarget>) -> ActionResult {
        self.handle_action(player, GameAction::RespondCard { card, targets })
    }

    pub fn pass_turn(&mut self, player: PlayerId) -> ActionResult {
        self.handle_action(player, GameAction::PassTurn)
    }

    pub fn resolve(&mut self, player: PlayerId) -> ActionResult {
        self.handle_action(player, GameAction::Resolve)
    }

    /// Advance the front request's timer by one tick, on behalf of the
    /// player it waits on. Ticks are recorded like any other action.
    pub fn tick(&mut self) -> ActionResult {
        match self.requests.front() {
            Some(request) if request.timer.is_some() => {
                let target = request.target;
                self.handle_action(target, GameAction::Tick)
            }
            _ => Ok(ActionOutcome::Ignored),
        }
    }

    fn apply_play(&mut self, player: PlayerId, card: CardId, targets: &[PlayTarget]) -> ActionResult {
        if self.playing != Some(player) {
            return Err(GameError::rule("ERROR_NOT_YOUR_TURN"));
        }
        if !self.requests.is_empty() {
            return Err(GameError::rule("ERROR_REQUEST_PENDING"));
        }
        let bound = self.verify_play(player, card, targets)?;
        self.do_play_card(player, card, &bound);
        Ok(ActionOutcome::Applied)
    }

    fn apply_pick(
        &mut self,
        player: PlayerId,
        pile: PileKind,
        owner: Option<PlayerId>,
        card: Option<CardId>,
    ) -> ActionResult {
        if let Some(card) = card {
            let c = self.zones.get(card).ok_or(GameError::InvalidAction("unknown card"))?;
            if !c.is_at(pile, owner) {
                return Ok(ActionOutcome::Ignored);
            }
        }
        let accepted = self
            .requests
            .front()
            .map_or(false, |r| r.target == player && self.can_pick(r, pile, owner, card));
        if !accepted {
            return Ok(ActionOutcome::Ignored);
        }
        self.on_pick(card);
        Ok(ActionOutcome::Applied)
    }

    fn apply_respond(&mut self, player: PlayerId, card: CardId, targets: &[PlayTarget]) -> ActionResult {
        if !self.zones.contains(card) {
            return Err(GameError::InvalidAction("unknown card"));
        }
        let responses = &self.def_of(card).responses;
        let bound = bind_targets(responses, targets)?;
        if !self.can_respond(player, card) {
            return Ok(ActionOutcome::Ignored);
        }
        self.verify_targets(player, responses, &bound)?;
        self.do_respond_card(player, card, &bound);
        Ok(ActionOutcome::Applied)
    }

    fn apply_pass(&mut self, player: PlayerId) -> ActionResult {
        if self.playing != Some(player) {
            return Err(GameError::rule("ERROR_NOT_YOUR_TURN"));
        }
        if !self.requests.is_empty() {
            return Err(GameError::rule("ERROR_REQUEST_PENDING"));
        }
        self.end_turn(player);
        Ok(ActionOutcome::Applied)
    }

    fn apply_tick(&mut self, player: PlayerId) -> ActionResult {
        let timed = self
            .requests
            .front()
            .map_or(false, |r| r.target == player && r.timer.is_some());
        if !timed {
            return Ok(ActionOutcome::Ignored);
        }
        self.tick_request();
        Ok(ActionOutcome::Applied)
    }

    fn apply_resolve(&mut self, player: PlayerId) -> ActionResult {
        let resolvable = self
            .requests
            .front()
            .map_or(false, |r| r.target == player && r.kind.is_resolvable());
        if !resolvable {
            return Ok(ActionOutcome::Ignored);
        }
        self.on_resolve();
        Ok(ActionOutcome::Applied)
    }
}
