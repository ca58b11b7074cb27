//! Event dispatch and the behavior of event-driven equips.

use tracing::trace;

use super::{Event, Registration};
use crate::cards::CardId;
use crate::core::{FormattedText, PlayerId};
use crate::effects::EquipKind;
use crate::game::{Game, GameUpdate, UpdateTarget, Visibility};
use crate::stack::{DelayedAction, DrawSource, Request, RequestKind};
use crate::zones::PileKind;

impl Game {
    /// Run every handler registered for the event, in dispatch order.
    ///
    /// The handler list is fixed when dispatch starts. A handler removed
    /// by an earlier one in the same dispatch is skipped.
    pub(crate) fn call_event(&mut self, event: &mut Event) {
        let handlers = self.bus.snapshot(event.kind());
        for registration in handlers {
            if !self.bus.contains(registration.id) {
                continue;
            }
            trace!(handler = %registration.id, card = %registration.card, ?event, "event handler");
            self.run_handler(registration, event);
        }
    }

    fn run_handler(&mut self, registration: Registration, event: &mut Event) {
        let owner = registration.owner;
        if !self.players[owner].alive() {
            return;
        }
        match (registration.handler, event) {
            (EquipKind::Boots, Event::OnHit { target, damage, .. }) if *target == owner => {
                self.defer(DelayedAction::DrawCards { player: owner, count: (*damage).max(0) as u32 });
            }
            (EquipKind::ElGringo, Event::OnHit { origin: Some(origin), target, damage, .. })
                if *target == owner && *origin != owner && self.playing != Some(owner) =>
            {
                let (origin, damage) = (*origin, *damage);
                self.gringo_steal(owner, origin, damage);
            }
            (EquipKind::BlackJack, Event::OnCardDrawn { player, card }) if *player == owner => {
                if self.players[owner].num_drawn == 2 {
                    self.black_jack_reveal(owner, *card);
                }
            }
            (EquipKind::KitCarlson, Event::OnDrawFromDeck { player }) if *player == owner => {
                self.kit_carlson_draw(owner);
            }
            (EquipKind::JesseJones, Event::OnRequestDraw { player }) if *player == owner => {
                let others_hold_cards = self.alive_players_from(owner).into_iter().skip(1).any(|other| {
                    !self.zones.pile(PileKind::PlayerHand, Some(other)).is_empty()
                });
                if others_hold_cards {
                    self.queue_request(Request::rule(RequestKind::DrawChoice { source: DrawSource::Hand }, owner));
                }
            }
            (EquipKind::PedroRamirez, Event::OnRequestDraw { player }) if *player == owner => {
                if !self.zones.pile(PileKind::DiscardPile, None).is_empty() {
                    self.queue_request(Request::rule(
                        RequestKind::DrawChoice { source: DrawSource::DiscardPile },
                        owner,
                    ));
                }
            }
            (EquipKind::SuzyLafayette, Event::OnEffectEnd { .. }) => {
                if self.zones.pile(PileKind::PlayerHand, Some(owner)).is_empty() {
                    self.draw_to_hand(owner, 1);
                }
            }
            (EquipKind::VultureSam, Event::OnPlayerDeath { target, .. }) if *target != owner => {
                let dead = *target;
                self.vulture_take(owner, dead);
            }
            (EquipKind::SlabTheKiller, Event::ApplyBangModifier { player, strength }) if *player == owner => {
                *strength += 1;
            }
            _ => {}
        }
    }

    /// Take one random hand card from `origin` per damage point.
    fn gringo_steal(&mut self, owner: PlayerId, origin: PlayerId, damage: i32) {
        for _ in 0..damage {
            let Some(card) = self.random_hand_card(origin) else {
                break;
            };
            self.log(
                FormattedText::new("LOG_STOLEN_CARD_FROM_HAND")
                    .with_player(owner)
                    .with_player(origin),
            );
            self.steal_card(owner, card);
        }
    }

    /// Show the second card drawn; a red one earns an extra draw-phase card.
    fn black_jack_reveal(&mut self, owner: PlayerId, card: CardId) {
        let def = self.zones.card(card).def;
        self.push_update(UpdateTarget::Everyone, GameUpdate::ShowCard { card, def });
        self.log(FormattedText::new("LOG_REVEALED_CARD").with_player(owner).with_card(card));
        if self.def_of(card).sign.map_or(false, |s| s.suit.is_red()) {
            let extra = self.draw_card_to(PileKind::PlayerHand, Some(owner), Visibility::Known);
            self.record_drawn(owner, extra);
        }
    }

    /// Replace the plain draw with a private look at three cards.
    fn kit_carlson_draw(&mut self, owner: PlayerId) {
        let is_draw = self
            .requests
            .front()
            .map_or(false, |r| r.is_for(owner, |k| matches!(k, RequestKind::Draw)));
        if !is_draw || self.players[owner].cards_to_draw >= 3 {
            return;
        }
        self.pop_request_noupdate();
        for _ in 0..3 {
            self.draw_card_to(PileKind::Selection, None, Visibility::ShownTo(owner));
        }
        self.queue_request_front(Request::rule(RequestKind::KitCarlson, owner));
    }

    /// Move the dead player's hand and table into `owner`'s hand.
    fn vulture_take(&mut self, owner: PlayerId, dead: PlayerId) {
        for pile in [PileKind::PlayerHand, PileKind::PlayerTable] {
            let cards: Vec<CardId> = self.zones.pile(pile, Some(dead)).iter().copied().collect();
            for card in cards {
                self.log(
                    FormattedText::new("LOG_STOLEN_CARD")
                        .with_player(owner)
                        .with_card(card)
                        .with_player(dead),
                );
                self.add_to_hand(owner, card);
            }
        }
    }
}
