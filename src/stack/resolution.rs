//! Request lifecycle and per-kind behavior.
//!
//! The front request decides what happens next:
//! - `can_pick`/`on_pick` for kinds that wait for a card or pile choice
//! - `on_resolve` for kinds the target may accept explicitly (or that a
//!   timer accepts for them)
//! - `status_text` for the per-viewer status line
//!
//! Handlers that replace the front request with a follow-up pop it without
//! a status broadcast, queue the follow-up, and broadcast once.

use smallvec::SmallVec;
use tracing::debug;

use super::{DelayedAction, DrawSource, Request, RequestKind, RequestState};
use crate::cards::CardId;
use crate::core::{FormatArg, FormattedText, PlayerId};
use crate::game::{Game, GameUpdate, PickTarget, RequestStatus, UpdateTarget, Visibility};
use crate::triggers::Event;
use crate::zones::PileKind;

impl Game {
    // === Queue operations ===

    /// Append a request; broadcast status if it is now the front.
    pub(crate) fn queue_request(&mut self, request: Request) {
        debug!(kind = request.kind.name(), target = %request.target, "queue request");
        if self.requests.push_back(request) {
            self.update_request();
        }
    }

    /// Put a request in front of everything queued and broadcast status.
    pub(crate) fn queue_request_front(&mut self, request: Request) {
        debug!(kind = request.kind.name(), target = %request.target, "queue request at front");
        self.requests.push_front(request);
        self.update_request();
    }

    /// Remove the front request and broadcast the new status.
    pub(crate) fn pop_request(&mut self) -> Option<Request> {
        let popped = self.pop_request_noupdate();
        self.update_request();
        popped
    }

    /// Remove the front request without a broadcast, for handlers that
    /// queue a follow-up or broadcast themselves.
    pub(crate) fn pop_request_noupdate(&mut self) -> Option<Request> {
        let popped = self.requests.pop_front();
        if let Some(request) = &popped {
            debug!(kind = request.kind.name(), target = %request.target, "pop request");
        }
        popped
    }

    /// Pop the front request if it matches. Returns whether it did.
    pub(crate) fn pop_request_if(&mut self, matches: impl Fn(&Request) -> bool) -> bool {
        if self.requests.front().map_or(false, matches) {
            self.pop_request();
            true
        } else {
            false
        }
    }

    /// The request that gates the next action, if any.
    #[must_use]
    pub fn front_request(&self) -> Option<&Request> {
        self.requests.front()
    }

    #[must_use]
    pub fn request_state(&self) -> RequestState {
        match self.requests.front() {
            None => RequestState::Idle,
            Some(r) if r.timer.is_some() => RequestState::Timed,
            Some(r) if r.kind.awaits_pick() => RequestState::AwaitingPick,
            Some(_) => RequestState::AwaitingResponse,
        }
    }

    /// Broadcast the front request's status, privately to each player, or
    /// an all-clear when the queue is empty.
    pub(crate) fn update_request(&mut self) {
        let Some(request) = self.requests.front().cloned() else {
            self.push_update(UpdateTarget::Everyone, GameUpdate::StatusClear);
            return;
        };
        let viewers: Vec<PlayerId> = self.players.player_ids().collect();
        for viewer in viewers {
            let status = RequestStatus {
                origin_card: request.origin_card,
                origin: request.origin,
                target: request.target,
                flags: request.flags,
                status_text: self.status_text(&request, viewer),
                respond_ids: self.respond_ids(viewer),
                pick_ids: self.pick_ids(&request, viewer),
            };
            self.push_update(UpdateTarget::only(viewer), GameUpdate::RequestStatus(status));
        }
    }

    fn respond_ids(&self, viewer: PlayerId) -> Vec<CardId> {
        if !self.players[viewer].alive() {
            return Vec::new();
        }
        [PileKind::PlayerHand, PileKind::PlayerTable, PileKind::PlayerCharacter]
            .into_iter()
            .flat_map(|pile| self.zones.pile(pile, Some(viewer)).iter().copied())
            .filter(|&card| self.can_respond(viewer, card))
            .collect()
    }

    fn pick_ids(&self, request: &Request, viewer: PlayerId) -> Vec<PickTarget> {
        if request.target != viewer {
            return Vec::new();
        }
        let mut candidates = vec![PickTarget { pile: PileKind::MainDeck, owner: None, card: None }];
        let shared = self.zones.pile(PileKind::Selection, None).iter().map(|&c| PickTarget {
            pile: PileKind::Selection,
            owner: None,
            card: Some(c),
        });
        candidates.extend(shared);
        candidates.extend(self.zones.top(PileKind::DiscardPile, None).map(|c| PickTarget {
            pile: PileKind::DiscardPile,
            owner: None,
            card: Some(c),
        }));
        for owner in self.players.player_ids() {
            let piles: &[PileKind] = if owner == viewer {
                &[PileKind::PlayerHand, PileKind::PlayerTable]
            } else {
                &[PileKind::PlayerHand]
            };
            for &pile in piles {
                candidates.extend(self.zones.pile(pile, Some(owner)).iter().map(|&c| PickTarget {
                    pile,
                    owner: Some(owner),
                    card: Some(c),
                }));
            }
        }
        candidates.retain(|t| self.can_pick(request, t.pile, t.owner, t.card));
        candidates
    }

    // === Picks ===

    /// Whether the front request accepts picking `(pile, owner, card)`.
    pub(crate) fn can_pick(
        &self,
        request: &Request,
        pile: PileKind,
        owner: Option<PlayerId>,
        card: Option<CardId>,
    ) -> bool {
        let target = request.target;
        let own_hand = pile == PileKind::PlayerHand && owner == Some(target);
        match (&request.kind, card) {
            (RequestKind::Predraw, Some(card)) => {
                let player = &self.players[target];
                pile == PileKind::PlayerTable
                    && owner == Some(target)
                    && player.predraw_check(card).map_or(false, |check| {
                        !check.resolved && Some(check.priority) == player.top_check_priority()
                    })
            }
            (RequestKind::Draw | RequestKind::DrawChoice { .. }, None) => pile == PileKind::MainDeck,
            (RequestKind::DrawChoice { source: DrawSource::Hand }, Some(_)) => {
                pile == PileKind::PlayerHand
                    && owner.map_or(false, |o| o != target && self.players[o].alive())
            }
            (RequestKind::DrawChoice { source: DrawSource::DiscardPile }, Some(card)) => {
                pile == PileKind::DiscardPile && self.zones.top(PileKind::DiscardPile, None) == Some(card)
            }
            (RequestKind::Check { .. }, Some(_))
            | (RequestKind::GeneralStore, Some(_))
            | (RequestKind::KitCarlson, Some(_)) => pile == PileKind::Selection,
            (RequestKind::DiscardPass, Some(_)) => own_hand,
            (RequestKind::Indians, Some(card)) | (RequestKind::Duel { .. }, Some(card)) => {
                own_hand && self.is_bang_card_for(target, card)
            }
            _ => false,
        }
    }

    /// Apply a pick the front request accepted.
    pub(crate) fn on_pick(&mut self, card: Option<CardId>) {
        let Some(request) = self.requests.front().cloned() else {
            return;
        };
        let target = request.target;
        let Some(card) = card else {
            if matches!(request.kind, RequestKind::Draw | RequestKind::DrawChoice { .. }) {
                self.draw_from_deck(target);
            }
            return;
        };

        match request.kind {
            RequestKind::Predraw => {
                let Some(check) = self.players[target].predraw_check(card).copied() else {
                    return;
                };
                self.pop_request();
                self.draw_check_then(target, card, check.outcome);
            }
            RequestKind::Check { outcome } => {
                self.pop_request_noupdate();
                let origin_card = request
                    .origin_card
                    .expect("Check requests carry the card being checked");
                self.select_check(target, origin_card, card, outcome);
                self.update_request();
            }
            RequestKind::DrawChoice { source } => self.draw_first_from(target, card, source),
            RequestKind::GeneralStore => self.pick_general_store(&request, card),
            RequestKind::DiscardPass => {
                self.log(FormattedText::new("LOG_DISCARDED_SELF_CARD").with_player(target).with_card(card));
                self.discard_card(card);
                let hand = self.zones.pile(PileKind::PlayerHand, Some(target)).len();
                if hand <= self.players[target].max_cards_end_of_turn() {
                    self.pop_request();
                    self.defer(DelayedAction::PassTurn { player: target });
                } else {
                    self.update_request();
                }
            }
            RequestKind::Indians => {
                self.log(FormattedText::new("LOG_RESPONDED_WITH_CARD").with_card(card).with_player(target));
                self.discard_card(card);
                self.pop_request();
                self.queue_event(Event::OnEffectEnd { player: target, card });
            }
            RequestKind::Duel { respond_to } => {
                self.log(FormattedText::new("LOG_RESPONDED_WITH_CARD").with_card(card).with_player(target));
                self.discard_card(card);
                self.pop_request_noupdate();
                self.queue_request_front(
                    Request::new(
                        RequestKind::Duel { respond_to: target },
                        request.origin_card,
                        request.origin,
                        respond_to,
                    )
                    .with_flags(request.flags),
                );
                self.queue_event(Event::OnEffectEnd { player: target, card });
            }
            RequestKind::KitCarlson => {
                self.add_to_hand(target, card);
                self.record_drawn(target, card);
                let player = &self.players[target];
                if player.num_drawn >= player.cards_to_draw {
                    let rest: Vec<CardId> =
                        self.zones.pile(PileKind::Selection, None).iter().copied().collect();
                    for card in rest {
                        self.move_card(card, PileKind::MainDeck, None, Visibility::Hidden);
                    }
                    self.pop_request();
                } else {
                    self.update_request();
                }
            }
            _ => {}
        }
    }

    fn pick_general_store(&mut self, request: &Request, card: CardId) {
        let target = request.target;
        let next = self.next_player(target);
        self.log(
            FormattedText::new("LOG_DRAWN_FROM_GENERALSTORE")
                .with_player(target)
                .with_card(card)
                .with_opt_card(request.origin_card),
        );
        if self.zones.pile(PileKind::Selection, None).len() == 2 {
            self.add_to_hand(target, card);
            if let Some(last) = self.zones.top(PileKind::Selection, None) {
                self.log(
                    FormattedText::new("LOG_DRAWN_FROM_GENERALSTORE")
                        .with_player(next)
                        .with_card(last)
                        .with_opt_card(request.origin_card),
                );
                self.add_to_hand(next, last);
            }
            self.pop_request();
        } else {
            self.pop_request_noupdate();
            self.add_to_hand(target, card);
            if self.zones.pile(PileKind::Selection, None).is_empty() {
                self.update_request();
            } else {
                self.queue_request_front(Request::new(
                    RequestKind::GeneralStore,
                    request.origin_card,
                    request.origin,
                    next,
                ));
            }
        }
    }

    // === Resolution ===

    /// Accept the front request's consequence.
    pub(crate) fn on_resolve(&mut self) {
        let Some(request) = self.requests.front().cloned() else {
            return;
        };
        let Request { origin_card, origin, target, .. } = request;

        match request.kind {
            RequestKind::Bang(bang) => {
                self.pop_request_noupdate();
                self.damage(origin_card, origin, target, bang.damage, true, false);
                self.update_request();
            }
            RequestKind::Indians => {
                self.pop_request_noupdate();
                self.damage(origin_card, origin, target, 1, false, false);
                self.update_request();
            }
            RequestKind::Duel { respond_to } => {
                self.pop_request_noupdate();
                self.damage(origin_card, Some(respond_to), target, 1, false, false);
                self.update_request();
            }
            RequestKind::Death => {
                self.pop_request_noupdate();
                self.player_death(origin, target);
                self.defer_game_over_check(origin, target);
                self.update_request();
            }
            RequestKind::Destroy { card } => {
                self.pop_request_noupdate();
                if self.origin_alive(origin) && self.is_held_by(card, target) {
                    self.discard_card(card);
                    self.queue_event(Event::OnEffectEnd { player: target, card });
                }
                self.update_request();
            }
            RequestKind::Steal { card } => {
                self.pop_request_noupdate();
                let thief = origin.filter(|&o| self.players[o].alive() && self.is_held_by(card, target));
                if let Some(thief) = thief {
                    self.steal_card(thief, card);
                }
                self.update_request();
            }
            RequestKind::Damaging { damage, is_bang } => {
                self.pop_request_noupdate();
                self.damage(origin_card, origin, target, damage, is_bang, true);
                self.update_request();
            }
            _ => {}
        }
    }

    /// A miss (card or barrel) landed on the bang aimed at `target`.
    pub(crate) fn bang_missed(&mut self, target: PlayerId) {
        let Some(request) = self.requests.front_mut() else {
            return;
        };
        if request.target != target {
            return;
        }
        let RequestKind::Bang(bang) = &mut request.kind else {
            return;
        };
        bang.strength -= 1;
        if bang.strength > 0 {
            self.update_request();
        } else {
            self.pop_request();
        }
    }

    /// Count down the front request's timer and resolve it at zero.
    pub(crate) fn tick_request(&mut self) {
        let Some(request) = self.requests.front_mut() else {
            return;
        };
        let Some(ticks) = request.timer.as_mut() else {
            return;
        };
        *ticks = ticks.saturating_sub(1);
        if *ticks == 0 {
            debug!(kind = request.kind.name(), "timer expired");
            self.on_resolve();
        }
    }

    // === Status ===

    fn status_text(&self, request: &Request, viewer: PlayerId) -> FormattedText {
        let target = request.target;
        let mut args: SmallVec<[FormatArg; 3]> = SmallVec::new();
        let card_arg = |c: Option<CardId>| c.map(FormatArg::Card);

        let key = match &request.kind {
            RequestKind::Predraw => {
                let player = &self.players[target];
                let top = player.top_check_priority();
                let mut candidates = player
                    .predraw_checks
                    .iter()
                    .filter(|c| !c.resolved && Some(c.priority) == top);
                match (candidates.next(), candidates.next()) {
                    (Some(only), None) => {
                        args.push(FormatArg::Card(only.card));
                        "STATUS_PREDRAW_FOR"
                    }
                    _ => "STATUS_PREDRAW",
                }
            }
            RequestKind::Draw | RequestKind::DrawChoice { .. } => "STATUS_YOUR_TURN",
            RequestKind::DiscardPass => {
                let hand = self.zones.pile(PileKind::PlayerHand, Some(target)).len();
                let diff = hand.saturating_sub(self.players[target].max_cards_end_of_turn());
                if diff > 1 {
                    args.push(FormatArg::Int(diff as i64));
                    "STATUS_DISCARD_PASS_PLURAL"
                } else {
                    "STATUS_DISCARD_PASS"
                }
            }
            RequestKind::Death => "STATUS_DEATH",
            RequestKind::KitCarlson => "STATUS_KIT_CARLSON",
            RequestKind::Damaging { damage, .. } => {
                args.push(FormatArg::Int(i64::from(*damage)));
                "STATUS_DAMAGING"
            }
            RequestKind::Destroy { card } | RequestKind::Steal { card } => {
                args.extend(card_arg(request.origin_card));
                args.push(FormatArg::Card(*card));
                if matches!(request.kind, RequestKind::Destroy { .. }) {
                    "STATUS_DESTROY"
                } else {
                    "STATUS_STEAL"
                }
            }
            kind => {
                args.extend(card_arg(request.origin_card));
                match kind {
                    RequestKind::Check { .. } => "STATUS_CHECK",
                    RequestKind::GeneralStore => "STATUS_GENERALSTORE",
                    RequestKind::Bang(_) => "STATUS_BANG",
                    RequestKind::Indians => "STATUS_INDIANS",
                    _ => "STATUS_DUEL",
                }
            }
        };

        if viewer == target {
            FormattedText { key: key.to_string(), args }
        } else {
            let mut text = FormattedText::new(format!("{}_OTHER", key)).with_player(target);
            text.args.extend(args);
            text
        }
    }

    /// Rule requests have no origin to outlive.
    fn origin_alive(&self, origin: Option<PlayerId>) -> bool {
        origin.map_or(true, |o| self.players[o].alive())
    }

    /// Whether `card` is still in `player`'s hand or on their table.
    pub(crate) fn is_held_by(&self, card: CardId, player: PlayerId) -> bool {
        let c = self.zones.card(card);
        c.owner == Some(player) && matches!(c.pile, PileKind::PlayerHand | PileKind::PlayerTable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, PlayerRole};

    fn dealt_game() -> Game {
        let mut game = Game::new(
            GameConfig::new(3)
                .with_seed(4)
                .with_roles(vec![PlayerRole::Sheriff, PlayerRole::Outlaw, PlayerRole::Renegade])
                .with_characters(["Rose Doolan", "Willy the Kid", "Paul Regret"])
                .with_initial_cards(2),
        );
        game.requests.clear();
        game
    }

    fn first_hand_card(game: &Game, player: PlayerId) -> CardId {
        *game.zones.pile(PileKind::PlayerHand, Some(player)).front().unwrap()
    }

    #[test]
    fn test_steal_needs_living_thief() {
        let mut game = dealt_game();
        let (thief, victim) = (PlayerId::new(1), PlayerId::new(2));
        let card = first_hand_card(&game, victim);

        game.players[thief].dead = true;
        game.requests.push_back(Request::new(RequestKind::Steal { card }, None, Some(thief), victim));
        game.on_resolve();

        assert!(game.requests.is_empty());
        assert!(game.is_held_by(card, victim));
    }

    #[test]
    fn test_destroy_needs_living_origin() {
        let mut game = dealt_game();
        let (origin, victim) = (PlayerId::new(1), PlayerId::new(2));
        let card = first_hand_card(&game, victim);

        game.players[origin].dead = true;
        game.requests.push_back(Request::new(RequestKind::Destroy { card }, None, Some(origin), victim));
        game.on_resolve();
        assert!(game.is_held_by(card, victim));

        game.players[origin].dead = false;
        game.requests.push_back(Request::new(RequestKind::Destroy { card }, None, Some(origin), victim));
        game.on_resolve();
        assert_eq!(game.zones.top(PileKind::DiscardPile, None), Some(card));
    }

    #[test]
    fn test_ticks_count_down_to_resolution() {
        let mut game = dealt_game();
        let target = PlayerId::new(1);
        let hp = game.players[target].hp;
        game.requests.push_back(
            Request::new(RequestKind::Damaging { damage: 1, is_bang: true }, None, Some(PlayerId::new(0)), target)
                .with_timer(2),
        );

        game.tick_request();
        assert_eq!(game.requests.front().and_then(|r| r.timer), Some(1));
        assert_eq!(game.players[target].hp, hp);

        game.tick_request();
        assert!(game.requests.is_empty());
        assert_eq!(game.players[target].hp, hp - 1);
    }
}
