//! Turn controller.
//!
//! A turn moves through predraw checks, the draw phase, free play and an
//! optional discard pass. Each phase hands over to the next through a
//! request (when a player must decide) or a deferred action (when the
//! current effect must settle first).

use tracing::info;

use crate::cards::CardId;
use crate::core::{FormattedText, PlayerId};
use crate::game::{Game, GameUpdate, UpdateTarget, Visibility};
use crate::stack::{DelayedAction, DrawSource, Request, RequestKind};
use crate::triggers::Event;
use crate::zones::PileKind;

impl Game {
    /// Hand the turn to `player` and reset its per-turn counters.
    pub(crate) fn start_of_turn(&mut self, player: PlayerId) {
        if self.is_game_over() {
            return;
        }
        info!(player = %player, "turn starts");
        self.playing = Some(player);

        let cards_to_draw = self.config.cards_to_draw;
        let p = &mut self.players[player];
        p.bangs_played = 0;
        p.num_drawn = 0;
        p.cards_to_draw = cards_to_draw;
        for check in &mut p.predraw_checks {
            check.resolved = false;
        }

        self.refresh_cards(player);

        self.push_update(UpdateTarget::Everyone, GameUpdate::SwitchTurn { player });
        self.log(FormattedText::new("LOG_TURN_START").with_player(player));
        self.next_predraw_check(player, None);
    }

    /// Clear usage counts and untap the player's table and character.
    fn refresh_cards(&mut self, player: PlayerId) {
        let cards: Vec<CardId> = [PileKind::PlayerTable, PileKind::PlayerCharacter]
            .into_iter()
            .flat_map(|pile| self.zones.pile(pile, Some(player)).iter().copied())
            .collect();
        for card in cards {
            self.zones.reset_usages(card);
            self.tap_card(card, false);
        }
    }

    /// Mark `resolved` as done, then continue with the next check or the
    /// draw phase once the current effect settles.
    pub(crate) fn next_predraw_check(&mut self, player: PlayerId, resolved: Option<CardId>) {
        if let Some(card) = resolved {
            if let Some(check) = self.players[player]
                .predraw_checks
                .iter_mut()
                .find(|c| c.card == card)
            {
                check.resolved = true;
            }
        }
        self.defer(DelayedAction::PredrawStep { player });
    }

    pub(crate) fn predraw_step(&mut self, player: PlayerId) {
        if !self.players[player].alive() || self.playing != Some(player) {
            return;
        }
        if self.players[player].all_checks_resolved() {
            self.defer(DelayedAction::RequestDraw { player });
        } else {
            self.queue_request(Request::rule(RequestKind::Predraw, player));
        }
    }

    pub(crate) fn request_draw(&mut self, player: PlayerId) {
        if !self.players[player].alive() || self.playing != Some(player) {
            return;
        }
        self.call_event(&mut Event::OnRequestDraw { player });
        if self.requests.is_empty() {
            self.queue_request(Request::rule(RequestKind::Draw, player));
        }
    }

    /// The player picked the deck during the draw phase.
    pub(crate) fn draw_from_deck(&mut self, player: PlayerId) {
        self.call_event(&mut Event::OnDrawFromDeck { player });
        let is_draw = |k: &RequestKind| matches!(k, RequestKind::Draw | RequestKind::DrawChoice { .. });
        if self.pop_request_if(|r| r.is_for(player, is_draw)) {
            self.log(FormattedText::new("LOG_DRAWN_FROM_DECK").with_player(player));
            self.draw_rest_from_deck(player);
        }
    }

    /// The player took the first card of the draw phase from `source`.
    /// The rest comes from the deck.
    pub(crate) fn draw_first_from(&mut self, player: PlayerId, card: CardId, source: DrawSource) {
        self.pop_request();
        match source {
            DrawSource::Hand => {
                let from = self.zones.card(card).owner;
                let taken = from.and_then(|p| self.random_hand_card(p)).unwrap_or(card);
                self.log(
                    FormattedText::new("LOG_DRAWN_FROM_PLAYER")
                        .with_player(player)
                        .with_opt_player(from),
                );
                self.add_to_hand(player, taken);
                self.record_drawn(player, taken);
            }
            DrawSource::DiscardPile => {
                self.log(FormattedText::new("LOG_DRAWN_FROM_DISCARD").with_player(player).with_card(card));
                self.add_to_hand(player, card);
                self.record_drawn(player, card);
            }
        }
        self.draw_rest_from_deck(player);
    }

    fn draw_rest_from_deck(&mut self, player: PlayerId) {
        while self.players[player].num_drawn < self.players[player].cards_to_draw {
            let card = self.draw_card_to(PileKind::PlayerHand, Some(player), Visibility::Known);
            self.record_drawn(player, card);
        }
    }

    /// Count a draw-phase card and let characters react to it.
    pub(crate) fn record_drawn(&mut self, player: PlayerId, card: CardId) {
        self.players[player].num_drawn += 1;
        self.call_event(&mut Event::OnCardDrawn { player, card });
    }

    /// End the turn, or ask for a discard pass first if the hand is too big.
    pub(crate) fn end_turn(&mut self, player: PlayerId) {
        if self.playing != Some(player) || self.is_game_over() {
            return;
        }
        let hand = self.zones.pile(PileKind::PlayerHand, Some(player)).len();
        if hand > self.players[player].max_cards_end_of_turn() {
            self.queue_request(Request::rule(RequestKind::DiscardPass, player));
        } else {
            self.defer(DelayedAction::StartNextTurn { player });
        }
    }

    /// Lose the rest of the turn to a failed jail check.
    pub(crate) fn skip_turn(&mut self, player: PlayerId) {
        let next = self.next_player(player);
        self.start_of_turn(next);
    }

    pub(crate) fn start_next_turn(&mut self, player: PlayerId) {
        if self.playing != Some(player) {
            return;
        }
        let next = self.next_player(player);
        self.start_of_turn(next);
    }
}
