//! Player state and the game operations that change it.
//!
//! ## Modifiers
//!
//! Range, distance, check count and the bang allowance are additive
//! accumulators. Equips add to them when enabled and subtract the same
//! amount when disabled, so any equip order leaves consistent totals.
//! Hand limits are kept as a list and the smallest one wins.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::info;

use super::table::Visibility;
use super::updates::{GameUpdate, UpdateTarget};
use super::Game;
use crate::cards::CardId;
use crate::core::{FormattedText, PlayerId, PlayerRole};
use crate::rules::CheckOutcome;
use crate::stack::{DelayedAction, Request, RequestKind};
use crate::triggers::Event;
use crate::zones::PileKind;

/// A persistent check an equipped card performs before its owner draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PredrawCheck {
    pub card: CardId,
    /// Higher priority checks must be resolved first.
    pub priority: i32,
    pub resolved: bool,
    pub outcome: CheckOutcome,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub role: PlayerRole,
    pub role_shown: bool,
    pub character: Option<CardId>,

    pub hp: i32,
    pub max_hp: i32,
    pub dead: bool,
    /// Keeps playing while dead.
    pub ghost: bool,

    // === Turn counters ===
    pub num_drawn: u32,
    pub cards_to_draw: u32,
    pub bangs_played: u32,

    // === Modifiers ===
    pub weapon_range: i32,
    pub range_mod: i32,
    pub distance_mod: i32,
    pub num_checks: u32,
    pub volcanic: u32,
    /// Missed cards play as bang cards and bang cards answer bangs.
    pub missed_as_bang: u32,
    /// End-of-turn hand limits that replace the hit points.
    pub max_cards_mods: SmallVec<[i32; 2]>,

    pub predraw_checks: SmallVec<[PredrawCheck; 2]>,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, role: PlayerRole) -> Self {
        Self {
            id,
            role,
            role_shown: false,
            character: None,
            hp: 0,
            max_hp: 0,
            dead: false,
            ghost: false,
            num_drawn: 0,
            cards_to_draw: 2,
            bangs_played: 0,
            weapon_range: 1,
            range_mod: 0,
            distance_mod: 0,
            num_checks: 1,
            volcanic: 0,
            missed_as_bang: 0,
            max_cards_mods: SmallVec::new(),
            predraw_checks: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn alive(&self) -> bool {
        !self.dead || self.ghost
    }

    /// Hand size allowed when passing the turn: the smallest hand limit
    /// in play, or the hit points without one.
    #[must_use]
    pub fn max_cards_end_of_turn(&self) -> usize {
        let limit = self.max_cards_mods.iter().copied().min().unwrap_or(self.hp);
        limit.max(0) as usize
    }

    /// Whether one more bang card may be played this turn.
    #[must_use]
    pub fn can_play_bang(&self) -> bool {
        self.volcanic > 0 || self.bangs_played == 0
    }

    /// Priority of the checks that must be resolved next.
    #[must_use]
    pub fn top_check_priority(&self) -> Option<i32> {
        self.predraw_checks
            .iter()
            .filter(|c| !c.resolved)
            .map(|c| c.priority)
            .max()
    }

    #[must_use]
    pub fn all_checks_resolved(&self) -> bool {
        self.predraw_checks.iter().all(|c| c.resolved)
    }

    #[must_use]
    pub fn predraw_check(&self, card: CardId) -> Option<&PredrawCheck> {
        self.predraw_checks.iter().find(|c| c.card == card)
    }
}

impl Game {
    /// Deal `value` damage to `target`.
    ///
    /// With a damage timer configured, non-instant damage first waits in a
    /// timed request at the front of the queue.
    pub(crate) fn damage(
        &mut self,
        origin_card: Option<CardId>,
        origin: Option<PlayerId>,
        target: PlayerId,
        value: i32,
        is_bang: bool,
        instant: bool,
    ) {
        let player = &self.players[target];
        if player.dead || player.ghost {
            return;
        }
        if let (Some(ticks), false) = (self.config.damage_timer, instant) {
            self.queue_request_front(
                Request::new(
                    RequestKind::Damaging { damage: value, is_bang },
                    origin_card,
                    origin,
                    target,
                )
                .with_timer(ticks),
            );
            return;
        }

        let player = &mut self.players[target];
        player.hp -= value;
        let hp = player.hp;
        self.log(
            FormattedText::new("LOG_TAKEN_DAMAGE")
                .with_opt_card(origin_card)
                .with_player(target)
                .with_int(value as i64),
        );
        self.push_update(UpdateTarget::Everyone, GameUpdate::PlayerHp { player: target, hp, dead: false });

        if hp <= 0 {
            self.queue_request_front(Request::new(RequestKind::Death, origin_card, origin, target));
        }
        self.call_event(&mut Event::OnHit {
            origin_card,
            origin,
            target,
            damage: value,
            is_bang,
        });
    }

    /// Heal up to max hp. A no-op at full health.
    pub(crate) fn heal(&mut self, target: PlayerId, amount: i32) {
        let player = &mut self.players[target];
        if player.dead || player.hp >= player.max_hp {
            return;
        }
        player.hp = (player.hp + amount).min(player.max_hp);
        let hp = player.hp;
        self.log(FormattedText::new("LOG_HEALED").with_player(target).with_int(amount as i64));
        self.push_update(UpdateTarget::Everyone, GameUpdate::PlayerHp { player: target, hp, dead: false });
    }

    /// Put a card on a player's table and enable its equips.
    pub(crate) fn equip_card(&mut self, player: PlayerId, card: CardId) {
        self.move_card(card, PileKind::PlayerTable, Some(player), Visibility::Shown);
        self.enable_equip(player, card);
    }

    pub(crate) fn enable_equip(&mut self, player: PlayerId, card: CardId) {
        let equips = self.def_of(card).equips.clone();
        for equip in equips {
            self.on_equip(equip, player, card);
        }
    }

    pub(crate) fn disable_equip(&mut self, player: PlayerId, card: CardId) {
        let equips = self.def_of(card).equips.clone();
        for equip in equips {
            self.on_unequip(equip, player, card);
        }
        self.bus.remove_card(card);
    }

    pub(crate) fn discard_card(&mut self, card: CardId) {
        self.move_card(card, PileKind::DiscardPile, None, Visibility::Shown);
    }

    pub(crate) fn add_to_hand(&mut self, player: PlayerId, card: CardId) {
        self.move_card(card, PileKind::PlayerHand, Some(player), Visibility::Known);
    }

    /// Discard every table card, then every hand card.
    pub(crate) fn discard_all(&mut self, player: PlayerId) {
        for pile in [PileKind::PlayerTable, PileKind::PlayerHand] {
            let cards: Vec<CardId> = self.zones.pile(pile, Some(player)).iter().copied().collect();
            for card in cards {
                self.discard_card(card);
            }
        }
    }

    pub(crate) fn add_predraw_check(&mut self, player: PlayerId, card: CardId, priority: i32, outcome: CheckOutcome) {
        self.players[player].predraw_checks.push(PredrawCheck {
            card,
            priority,
            resolved: false,
            outcome,
        });
    }

    pub(crate) fn remove_predraw_check(&mut self, player: PlayerId, card: CardId) {
        self.players[player].predraw_checks.retain(|c| c.card != card);
    }

    /// Reveal a player's role to everyone.
    pub(crate) fn show_role(&mut self, player: PlayerId) {
        let p = &mut self.players[player];
        if p.role_shown {
            return;
        }
        p.role_shown = true;
        let role = p.role;
        self.push_update(UpdateTarget::Everyone, GameUpdate::PlayerShowRole { player, role });
    }

    /// Eliminate `target`: its character stops working, its cards go to
    /// the discard pile (unless a handler claims them) and its role is
    /// revealed.
    pub(crate) fn player_death(&mut self, killer: Option<PlayerId>, target: PlayerId) {
        info!(player = %target, killer = ?killer, "player died");
        if let Some(character) = self.players[target].character {
            self.disable_equip(target, character);
        }
        let player = &mut self.players[target];
        player.dead = true;
        player.hp = 0;

        self.log(FormattedText::new("LOG_PLAYER_DIED").with_player(target).with_opt_player(killer));
        self.call_event(&mut Event::OnPlayerDeath { killer, target });
        self.discard_all(target);

        self.push_update(UpdateTarget::Everyone, GameUpdate::PlayerHp { player: target, hp: 0, dead: true });
        self.show_role(target);
    }

    /// Turn a ghost on or off. A dead player losing its ghost is buried
    /// once the current move settles.
    pub(crate) fn set_ghost(&mut self, player: PlayerId, ghost: bool) {
        let p = &mut self.players[player];
        p.ghost = ghost;
        if !p.dead {
            return;
        }
        if ghost {
            let hp = p.hp;
            self.push_update(UpdateTarget::Everyone, GameUpdate::PlayerHp { player, hp, dead: false });
        } else {
            self.defer(DelayedAction::BuryGhost { player });
        }
    }

    pub(crate) fn bury_ghost(&mut self, player: PlayerId) {
        if self.players[player].alive() {
            return;
        }
        info!(player = %player, "ghost buried");
        self.discard_all(player);
        self.push_update(UpdateTarget::Everyone, GameUpdate::PlayerHp { player, hp: 0, dead: true });
        if self.playing == Some(player) {
            self.defer(DelayedAction::StartNextTurn { player });
        }
    }

    /// Whether a card with this name is on the player's table.
    #[must_use]
    pub fn has_equipped(&self, player: PlayerId, name: &str) -> bool {
        self.zones
            .pile(PileKind::PlayerTable, Some(player))
            .iter()
            .any(|&c| self.def_of(c).name == name)
    }

    pub(crate) fn defer_game_over_check(&mut self, killer: Option<PlayerId>, target: PlayerId) {
        self.defer_front(DelayedAction::CheckGameOver { killer, target });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        let mut p = Player::new(PlayerId::new(0), PlayerRole::Outlaw);
        p.hp = 3;
        p.max_hp = 4;
        p
    }

    #[test]
    fn test_hand_limit_follows_hp() {
        let mut p = player();
        assert_eq!(p.max_cards_end_of_turn(), 3);
        p.hp = -2;
        assert_eq!(p.max_cards_end_of_turn(), 0);
    }

    #[test]
    fn test_smallest_hand_limit_wins() {
        let mut p = player();
        p.max_cards_mods.push(8);
        assert_eq!(p.max_cards_end_of_turn(), 8);
        p.max_cards_mods.push(5);
        assert_eq!(p.max_cards_end_of_turn(), 5);
        p.max_cards_mods.clear();
        assert_eq!(p.max_cards_end_of_turn(), 3);
    }

    #[test]
    fn test_ghost_counts_as_alive() {
        let mut p = player();
        p.dead = true;
        assert!(!p.alive());
        p.ghost = true;
        assert!(p.alive());
    }

    #[test]
    fn test_bang_allowance() {
        let mut p = player();
        assert!(p.can_play_bang());
        p.bangs_played = 1;
        assert!(!p.can_play_bang());
        p.volcanic = 1;
        assert!(p.can_play_bang());
    }

    #[test]
    fn test_check_priorities() {
        let mut p = player();
        assert_eq!(p.top_check_priority(), None);
        assert!(p.all_checks_resolved());

        p.predraw_checks.push(PredrawCheck {
            card: CardId::new(1),
            priority: 1,
            resolved: false,
            outcome: CheckOutcome::Jail,
        });
        p.predraw_checks.push(PredrawCheck {
            card: CardId::new(2),
            priority: 2,
            resolved: false,
            outcome: CheckOutcome::Dynamite,
        });
        assert_eq!(p.top_check_priority(), Some(2));

        p.predraw_checks[1].resolved = true;
        assert_eq!(p.top_check_priority(), Some(1));
        assert!(!p.all_checks_resolved());
        assert_eq!(p.predraw_check(CardId::new(1)).map(|c| c.priority), Some(1));
    }
}
