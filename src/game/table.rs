//! Card movement and table geometry.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::updates::{GameUpdate, UpdateTarget};
use super::Game;
use crate::cards::CardId;
use crate::core::PlayerId;
use crate::triggers::Event;
use crate::zones::PileKind;

/// Who gets to see a card after it moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    /// Everybody.
    Shown,
    /// The destination's owner, or everybody for a shared pile.
    Known,
    /// One player only, even in a shared pile.
    ShownTo(PlayerId),
    /// Nobody.
    Hidden,
}

impl Game {
    /// Move a card, emitting visibility changes and then the move itself.
    ///
    /// A card leaving a table or character slot has its equips disabled
    /// first, and a tapped card is untapped. Moving a card to where it
    /// already is does nothing.
    pub(crate) fn move_card(
        &mut self,
        card: CardId,
        pile: PileKind,
        owner: Option<PlayerId>,
        visibility: Visibility,
    ) {
        let current = self.zones.card(card);
        let (old_pile, old_owner) = (current.pile, current.owner);
        if old_pile == pile && old_owner == owner {
            return;
        }
        if old_pile.is_in_play() {
            if let Some(previous) = old_owner {
                self.disable_equip(previous, card);
            }
        }
        if pile == PileKind::MainDeck {
            assert!(
                !self.bus.is_registered(card),
                "{} enters the deck with live event handlers",
                card
            );
        }

        let def = self.zones.card(card).def;
        match (visibility, owner) {
            (Visibility::Shown, _) | (Visibility::Known, None) => {
                self.push_update(UpdateTarget::Everyone, GameUpdate::ShowCard { card, def });
            }
            (Visibility::Known, Some(p)) | (Visibility::ShownTo(p), _) => {
                self.push_update(UpdateTarget::only(p), GameUpdate::ShowCard { card, def });
                self.push_update(UpdateTarget::except(p), GameUpdate::HideCard { card });
            }
            (Visibility::Hidden, _) => {
                self.push_update(UpdateTarget::Everyone, GameUpdate::HideCard { card });
            }
        }

        self.tap_card(card, false);
        self.zones.reset_usages(card);
        self.zones.relocate(card, pile, owner);
        debug!(%card, ?pile, ?owner, "moved card");
        self.push_update(UpdateTarget::Everyone, GameUpdate::MoveCard { card, pile, owner });
    }

    /// Tap or untap a card, notifying everyone when the flag changes.
    pub(crate) fn tap_card(&mut self, card: CardId, tapped: bool) {
        if self.zones.set_tapped(card, tapped) {
            self.push_update(UpdateTarget::Everyone, GameUpdate::TapCard { card, tapped });
        }
    }

    /// Draw the top card of the main deck into a pile.
    ///
    /// An empty deck is refilled from the discard pile, before and after
    /// the draw. Panics if there is nothing left to draw at all.
    pub(crate) fn draw_card_to(
        &mut self,
        pile: PileKind,
        owner: Option<PlayerId>,
        visibility: Visibility,
    ) -> CardId {
        if self.zones.pile(PileKind::MainDeck, None).is_empty() {
            self.reshuffle_deck();
        }
        let card = self
            .zones
            .top(PileKind::MainDeck, None)
            .unwrap_or_else(|| panic!("Drew from an empty deck with nothing to reshuffle"));
        self.move_card(card, pile, owner, visibility);
        if self.zones.pile(PileKind::MainDeck, None).is_empty() {
            self.reshuffle_deck();
        }
        card
    }

    /// Draw `count` cards into a hand.
    pub(crate) fn draw_to_hand(&mut self, player: PlayerId, count: u32) {
        for _ in 0..count {
            self.draw_card_to(PileKind::PlayerHand, Some(player), Visibility::Known);
        }
    }

    /// Flip the top card of the deck onto the discard pile for a check.
    pub(crate) fn draw_check_card(&mut self) -> CardId {
        self.draw_card_to(PileKind::DiscardPile, None, Visibility::Shown)
    }

    /// Return every discard but the top one to the deck and shuffle it.
    fn reshuffle_deck(&mut self) {
        let discards = self.zones.pile(PileKind::DiscardPile, None);
        if discards.len() < 2 {
            return;
        }
        let cards: Vec<CardId> = discards.iter().take(discards.len() - 1).copied().collect();
        for card in cards {
            self.move_card(card, PileKind::MainDeck, None, Visibility::Hidden);
        }
        self.zones.shuffle(PileKind::MainDeck, None, &mut self.rng);
        debug!(size = self.zones.pile(PileKind::MainDeck, None).len(), "reshuffled deck");
        self.push_update(UpdateTarget::Everyone, GameUpdate::DeckShuffled { pile: PileKind::MainDeck });
    }

    /// Take a uniformly random card from a player's hand.
    pub(crate) fn random_hand_card(&mut self, player: PlayerId) -> Option<CardId> {
        let hand = self.zones.pile(PileKind::PlayerHand, Some(player));
        let index = self.rng.choose_index(hand.len())?;
        hand.get(index).copied()
    }

    /// Steal a card into `player`'s hand and let empty-handed characters react.
    pub(crate) fn steal_card(&mut self, player: PlayerId, card: CardId) {
        self.add_to_hand(player, card);
        self.queue_event(Event::OnEffectEnd { player, card });
    }

    // === Geometry ===

    /// The next alive player after `player` in seat order.
    #[must_use]
    pub fn next_player(&self, player: PlayerId) -> PlayerId {
        let count = self.players.player_count();
        (1..=count)
            .map(|step| PlayerId::new(((player.index() + step) % count) as u8))
            .find(|&p| self.players[p].alive())
            .unwrap_or(player)
    }

    #[must_use]
    pub fn num_alive(&self) -> usize {
        self.players.iter().filter(|(_, p)| p.alive()).count()
    }

    /// Alive players in seat order, starting with `first`.
    #[must_use]
    pub fn alive_players_from(&self, first: PlayerId) -> Vec<PlayerId> {
        let count = self.players.player_count();
        (0..count)
            .map(|step| PlayerId::new(((first.index() + step) % count) as u8))
            .filter(|&p| self.players[p].alive())
            .collect()
    }

    /// Seats between two players, counted the short way around the alive
    /// players, plus the target's distance modifier.
    #[must_use]
    pub fn distance(&self, from: PlayerId, to: PlayerId) -> i32 {
        if from == to {
            return 0;
        }
        let seats: Vec<PlayerId> = self
            .players
            .player_ids()
            .filter(|&p| p == from || p == to || self.players[p].alive())
            .collect();
        let position = |id: PlayerId| seats.iter().position(|&p| p == id).unwrap_or(0) as i32;
        let n = seats.len() as i32;
        let d = (position(from) - position(to)).abs();
        d.min(n - d) + self.players[to].distance_mod
    }

    /// Whether `from` can hit `to` with its weapon.
    #[must_use]
    pub fn is_reachable(&self, from: PlayerId, to: PlayerId) -> bool {
        let p = &self.players[from];
        self.distance(from, to) <= p.weapon_range + p.range_mod
    }
}
