//! Zone manager for card locations and movement.
//!
//! The `ZoneManager` owns the card arena and every pile. It supports:
//! - Relocating a card to the top of any pile, keeping pile and owner
//!   consistent
//! - Reordering within a pile (stacking a deck)
//! - Identity shuffles that keep the id order of a pile and permute the
//!   cards behind those ids
//!
//! It knows nothing about visibility, equips or notifications; the game
//! wraps every move with those.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::pile::PileKind;
use crate::cards::{Card, CardDefId, CardId};
use crate::core::{GameRng, PlayerId, PlayerMap};

/// Manages card locations across piles.
///
/// ## Usage
///
/// ```
/// use bang_engine::cards::CardDefId;
/// use bang_engine::core::PlayerId;
/// use bang_engine::zones::{PileKind, ZoneManager};
///
/// let mut zones = ZoneManager::new(2);
/// let a = zones.add_card(CardDefId::new(0), PileKind::MainDeck, None);
/// let b = zones.add_card(CardDefId::new(1), PileKind::MainDeck, None);
///
/// assert_eq!(zones.top(PileKind::MainDeck, None), Some(b));
///
/// zones.relocate(b, PileKind::PlayerHand, Some(PlayerId::new(1)));
/// assert_eq!(zones.top(PileKind::MainDeck, None), Some(a));
/// assert_eq!(zones.pile(PileKind::PlayerHand, Some(PlayerId::new(1))).len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneManager {
    /// Card data indexed by `CardId`.
    cards: Vec<Card>,

    /// Shared piles, indexed by `PileKind::slot`.
    shared: [Vector<CardId>; 4],

    /// Hand, table and character pile of every player.
    owned: PlayerMap<[Vector<CardId>; 3]>,
}

impl ZoneManager {
    /// Create an empty manager for `player_count` seats.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            cards: Vec::new(),
            shared: Default::default(),
            owned: PlayerMap::new(player_count, |_| Default::default()),
        }
    }

    /// Create a card on top of a pile. Ids are assigned densely.
    pub fn add_card(&mut self, def: CardDefId, pile: PileKind, owner: Option<PlayerId>) -> CardId {
        let id = CardId::new(self.cards.len() as u32);
        self.cards.push(Card::new(def, pile, owner));
        self.pile_mut(pile, owner).push_back(id);
        id
    }

    /// Get a card, or `None` for an id that was never created.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    /// Get a card. Panics on an unknown id.
    #[must_use]
    pub fn card(&self, id: CardId) -> &Card {
        self.get(id)
            .unwrap_or_else(|| panic!("{} does not exist", id))
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        id.index() < self.cards.len()
    }

    /// Iterate over every card with its id.
    pub fn cards(&self) -> impl Iterator<Item = (CardId, &Card)> {
        self.cards
            .iter()
            .enumerate()
            .map(|(i, c)| (CardId::new(i as u32), c))
    }

    /// Total number of cards tracked.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.cards.len()
    }

    /// The cards of a pile, bottom first.
    ///
    /// Panics when `owner` does not fit the pile's ownership rule.
    #[must_use]
    pub fn pile(&self, pile: PileKind, owner: Option<PlayerId>) -> &Vector<CardId> {
        match (pile.is_owned(), owner) {
            (false, None) => &self.shared[pile.slot()],
            (true, Some(p)) => &self.owned[p][pile.slot()],
            _ => panic!("Pile {:?} and owner {:?} are inconsistent", pile, owner),
        }
    }

    fn pile_mut(&mut self, pile: PileKind, owner: Option<PlayerId>) -> &mut Vector<CardId> {
        match (pile.is_owned(), owner) {
            (false, None) => &mut self.shared[pile.slot()],
            (true, Some(p)) => &mut self.owned[p][pile.slot()],
            _ => panic!("Pile {:?} and owner {:?} are inconsistent", pile, owner),
        }
    }

    /// Top (last) card of a pile.
    #[must_use]
    pub fn top(&self, pile: PileKind, owner: Option<PlayerId>) -> Option<CardId> {
        self.pile(pile, owner).last().copied()
    }

    /// Move a card to the top of another pile.
    ///
    /// Returns the previous location, or `None` if the card was already
    /// there (nothing changes in that case).
    pub fn relocate(
        &mut self,
        id: CardId,
        pile: PileKind,
        owner: Option<PlayerId>,
    ) -> Option<(PileKind, Option<PlayerId>)> {
        let card = self.card(id);
        let (old_pile, old_owner) = (card.pile, card.owner);
        if old_pile == pile && old_owner == owner {
            return None;
        }
        assert_eq!(
            pile.is_owned(),
            owner.is_some(),
            "Pile {:?} and owner {:?} are inconsistent",
            pile,
            owner
        );

        self.detach(id, old_pile, old_owner);
        self.pile_mut(pile, owner).push_back(id);

        let card = &mut self.cards[id.index()];
        card.pile = pile;
        card.owner = owner;
        Some((old_pile, old_owner))
    }

    /// Count one more use of a card this turn. Returns the new count.
    pub fn add_usage(&mut self, id: CardId) -> u32 {
        let card = &mut self.cards[id.index()];
        card.usages += 1;
        card.usages
    }

    pub fn reset_usages(&mut self, id: CardId) {
        self.cards[id.index()].usages = 0;
    }

    /// Set the tapped flag. Returns whether it changed.
    pub fn set_tapped(&mut self, id: CardId, tapped: bool) -> bool {
        let card = &mut self.cards[id.index()];
        let changed = card.tapped != tapped;
        card.tapped = tapped;
        changed
    }

    /// Move a card to the top of the pile it is already in.
    pub fn raise_to_top(&mut self, id: CardId) {
        let card = self.card(id);
        let (pile, owner) = (card.pile, card.owner);
        self.detach(id, pile, owner);
        self.pile_mut(pile, owner).push_back(id);
    }

    fn detach(&mut self, id: CardId, pile: PileKind, owner: Option<PlayerId>) {
        let cards = self.pile_mut(pile, owner);
        let index = cards
            .index_of(&id)
            .unwrap_or_else(|| panic!("{} is missing from {:?}", id, pile));
        cards.remove(index);
    }

    /// Shuffle a pile over card identity.
    ///
    /// Fisher-Yates from the back: for each position `i`, a uniform `j` in
    /// `0..=i` is drawn and the cards behind the ids at `i` and `j` trade
    /// places. The pile's id sequence is unchanged, so an observer who
    /// tracked ids learns nothing about the new order.
    pub fn shuffle(&mut self, pile: PileKind, owner: Option<PlayerId>, rng: &mut GameRng) {
        let ids: Vec<CardId> = self.pile(pile, owner).iter().copied().collect();
        for i in (1..ids.len()).rev() {
            let j = rng.gen_range_usize(0..i + 1);
            if i != j {
                // Both cards share pile and owner, so swapping whole
                // entries only changes which definition sits behind an id.
                self.cards.swap(ids[i].index(), ids[j].index());
            }
        }
    }

    /// Panics if any card's pile and owner disagree with pile membership.
    pub fn assert_consistent(&self) {
        let mut seen = vec![0u8; self.cards.len()];
        let shared = PileKind::SHARED.iter().map(|&p| (p, None));
        let owned = self.owned.player_ids().flat_map(|player| {
            PileKind::OWNED.iter().map(move |&p| (p, Some(player)))
        });
        for (pile, owner) in shared.chain(owned) {
            for &id in self.pile(pile, owner) {
                let card = self.card(id);
                assert!(
                    card.is_at(pile, owner),
                    "{} is listed in {:?}/{:?} but records {:?}/{:?}",
                    id,
                    pile,
                    owner,
                    card.pile,
                    card.owner
                );
                seen[id.index()] += 1;
            }
        }
        for (i, count) in seen.into_iter().enumerate() {
            assert_eq!(count, 1, "Card({}) is listed {} times", i, count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck_of(n: u16) -> ZoneManager {
        let mut zones = ZoneManager::new(3);
        for i in 0..n {
            zones.add_card(CardDefId::new(i), PileKind::MainDeck, None);
        }
        zones
    }

    #[test]
    fn test_add_and_get() {
        let zones = deck_of(3);
        assert_eq!(zones.total_cards(), 3);
        assert_eq!(zones.card(CardId::new(1)).def, CardDefId::new(1));
        assert!(zones.get(CardId::new(7)).is_none());
        assert!(!zones.contains(CardId::new(3)));
    }

    #[test]
    fn test_relocate_moves_to_top() {
        let mut zones = deck_of(3);
        let p1 = Some(PlayerId::new(1));

        let old = zones.relocate(CardId::new(0), PileKind::PlayerTable, p1);
        assert_eq!(old, Some((PileKind::MainDeck, None)));
        zones.relocate(CardId::new(2), PileKind::PlayerTable, p1);

        let table: Vec<_> = zones.pile(PileKind::PlayerTable, p1).iter().copied().collect();
        assert_eq!(table, vec![CardId::new(0), CardId::new(2)]);
        assert_eq!(zones.top(PileKind::MainDeck, None), Some(CardId::new(1)));
        zones.assert_consistent();
    }

    #[test]
    fn test_relocate_to_same_place_is_noop() {
        let mut zones = deck_of(2);
        assert_eq!(zones.relocate(CardId::new(0), PileKind::MainDeck, None), None);
        assert_eq!(zones.top(PileKind::MainDeck, None), Some(CardId::new(1)));
    }

    #[test]
    fn test_play_state() {
        let mut zones = deck_of(2);
        let id = CardId::new(1);
        assert_eq!(zones.add_usage(id), 1);
        assert_eq!(zones.add_usage(id), 2);
        assert!(zones.set_tapped(id, true));
        assert!(!zones.set_tapped(id, true));
        zones.reset_usages(id);
        assert_eq!(zones.card(id).usages, 0);
        assert!(zones.card(id).tapped);
        assert!(!zones.card(CardId::new(0)).tapped);
    }

    #[test]
    fn test_raise_to_top() {
        let mut zones = deck_of(3);
        zones.raise_to_top(CardId::new(0));
        let deck: Vec<_> = zones.pile(PileKind::MainDeck, None).iter().copied().collect();
        assert_eq!(deck, vec![CardId::new(1), CardId::new(2), CardId::new(0)]);
    }

    #[test]
    #[should_panic(expected = "inconsistent")]
    fn test_relocate_rejects_owner_on_shared_pile() {
        let mut zones = deck_of(1);
        zones.relocate(CardId::new(0), PileKind::DiscardPile, Some(PlayerId::new(0)));
    }

    #[test]
    fn test_identity_shuffle_keeps_id_order() {
        let mut zones = deck_of(20);
        let ids_before: Vec<_> = zones.pile(PileKind::MainDeck, None).iter().copied().collect();
        let defs_before: Vec<_> = ids_before.iter().map(|&id| zones.card(id).def).collect();

        let mut rng = GameRng::new(42);
        zones.shuffle(PileKind::MainDeck, None, &mut rng);

        let ids_after: Vec<_> = zones.pile(PileKind::MainDeck, None).iter().copied().collect();
        let mut defs_after: Vec<_> = ids_after.iter().map(|&id| zones.card(id).def).collect();

        assert_eq!(ids_before, ids_after);
        assert_ne!(defs_before, defs_after);
        defs_after.sort_by_key(|d| d.raw());
        assert_eq!(defs_before, defs_after);
        zones.assert_consistent();
    }

    #[test]
    fn test_shuffle_is_deterministic() {
        let mut a = deck_of(10);
        let mut b = deck_of(10);
        a.shuffle(PileKind::MainDeck, None, &mut GameRng::new(5));
        b.shuffle(PileKind::MainDeck, None, &mut GameRng::new(5));
        assert_eq!(a, b);
    }
}
