//! Effect behavior: equipping, playing and responding.
//!
//! Every capability is a match arm on the effect tag. Verification
//! methods take `&self` and return the first rule violation found; the
//! `do_*` and `on_*` methods mutate and assume verification passed.
//!
//! ## Flags
//!
//! A played card stamps [`EffectFlags`] on the requests it raises:
//! `escapable` for brown cards with a sign that are not bang cards (only
//! with the escape rule enabled), `single_target` when a lone player
//! target is the card's only target.
//!
//! ## Characters
//!
//! A character with play effects is played from its character slot. It
//! stays there, and `MaxUsages` taps it once it has been used enough.

use std::sync::Arc;

use smallvec::{smallvec, SmallVec};

use super::{bind_targets, BoundTarget, EffectFlags, EffectKind, EquipKind, TargetType};
use crate::cards::{CardColor, CardDefinition, CardId};
use crate::core::{FormattedText, GameError, PlayTarget, PlayerId, PlayerRole};
use crate::game::{Game, Visibility};
use crate::rules::CheckOutcome;
use crate::stack::{BangState, Request, RequestKind};
use crate::triggers::{Event, EventKind};
use crate::zones::PileKind;

/// Event hook and priority of equips that react to events.
fn event_binding(equip: EquipKind) -> Option<(EventKind, i32)> {
    match equip {
        EquipKind::Boots => Some((EventKind::OnHit, 1)),
        EquipKind::ElGringo => Some((EventKind::OnHit, 2)),
        EquipKind::BlackJack => Some((EventKind::OnCardDrawn, 0)),
        EquipKind::KitCarlson => Some((EventKind::OnDrawFromDeck, 0)),
        EquipKind::SuzyLafayette => Some((EventKind::OnEffectEnd, 0)),
        EquipKind::VultureSam => Some((EventKind::OnPlayerDeath, 0)),
        EquipKind::SlabTheKiller => Some((EventKind::ApplyBangModifier, 0)),
        EquipKind::JesseJones | EquipKind::PedroRamirez => Some((EventKind::OnRequestDraw, 0)),
        _ => None,
    }
}

impl Game {
    // === Equips ===

    pub(crate) fn on_equip(&mut self, equip: EquipKind, player: PlayerId, card: CardId) {
        if let Some((kind, priority)) = event_binding(equip) {
            self.bus.add(card, player, kind, equip, priority);
            return;
        }
        let p = &mut self.players[player];
        match equip {
            EquipKind::MaxHp(hp) => p.max_hp = hp + i32::from(p.role == PlayerRole::Sheriff),
            EquipKind::Mustang => p.distance_mod += 1,
            EquipKind::Scope => p.range_mod += 1,
            EquipKind::Weapon(range) => p.weapon_range = range,
            EquipKind::Volcanic => p.volcanic += 1,
            EquipKind::HorseCharm => p.num_checks += 1,
            EquipKind::CalamityJanet => p.missed_as_bang += 1,
            EquipKind::HandLimit(limit) => p.max_cards_mods.push(limit),
            EquipKind::Ghost => self.set_ghost(player, true),
            EquipKind::Jail => self.add_predraw_check(player, card, 1, CheckOutcome::Jail),
            EquipKind::Dynamite => self.add_predraw_check(player, card, 2, CheckOutcome::Dynamite),
            _ => {}
        }
    }

    /// Undo `on_equip`. Event registrations are dropped by the caller.
    pub(crate) fn on_unequip(&mut self, equip: EquipKind, player: PlayerId, card: CardId) {
        let p = &mut self.players[player];
        match equip {
            EquipKind::Mustang => p.distance_mod -= 1,
            EquipKind::Scope => p.range_mod -= 1,
            EquipKind::Weapon(_) => p.weapon_range = 1,
            EquipKind::Volcanic => p.volcanic -= 1,
            EquipKind::HorseCharm => p.num_checks -= 1,
            EquipKind::CalamityJanet => p.missed_as_bang -= 1,
            EquipKind::HandLimit(limit) => {
                if let Some(index) = p.max_cards_mods.iter().position(|&m| m == limit) {
                    p.max_cards_mods.remove(index);
                }
            }
            EquipKind::Ghost => self.set_ghost(player, false),
            EquipKind::Jail | EquipKind::Dynamite => self.remove_predraw_check(player, card),
            _ => {}
        }
    }

    // === Play ===

    /// Whether `player` could play `card` with `targets` right now.
    ///
    /// Clients use this to enable cards while the player is idle on their
    /// own turn.
    #[must_use]
    pub fn can_play(&self, player: PlayerId, card: CardId, targets: &[PlayTarget]) -> bool {
        !self.is_game_over()
            && self.playing == Some(player)
            && self.requests.is_empty()
            && self.players[player].alive()
            && self.verify_play(player, card, targets).is_ok()
    }

    /// Check that `player` may play `card` from hand (or its own character
    /// slot) with `targets`.
    ///
    /// Returns the bound targets for [`Game::do_play_card`].
    pub(crate) fn verify_play(
        &self,
        player: PlayerId,
        card: CardId,
        targets: &[PlayTarget],
    ) -> Result<SmallVec<[BoundTarget; 2]>, GameError> {
        let c = self.zones.get(card).ok_or(GameError::InvalidAction("unknown card"))?;
        let from_character = c.is_at(PileKind::PlayerCharacter, Some(player));
        if !from_character && !c.is_at(PileKind::PlayerHand, Some(player)) {
            return Err(FormattedText::new("ERROR_CARD_NOT_IN_HAND").with_card(card).into());
        }
        let def = self.def_of(card);
        if def.color == CardColor::Blue {
            return self.verify_equip(player, card, def, targets);
        }
        if def.effects.is_empty() {
            return Err(FormattedText::new("ERROR_CANT_PLAY_CARD").with_card(card).into());
        }
        let p = &self.players[player];
        for effect in &def.effects {
            match effect.kind {
                EffectKind::MissedAsBang if p.missed_as_bang == 0 => {
                    return Err(FormattedText::new("ERROR_CANT_PLAY_CARD").with_card(card).into());
                }
                EffectKind::BangLimit | EffectKind::MissedAsBang if !p.can_play_bang() => {
                    return Err(GameError::rule("ERROR_ONE_BANG_PER_TURN"));
                }
                EffectKind::MaxUsages(max) if c.usages >= max => {
                    return Err(FormattedText::new("ERROR_MAX_USAGES").with_card(card).into());
                }
                _ => {}
            }
        }
        let bound = bind_targets(&def.effects, targets)?;
        self.verify_targets(player, &def.effects, &bound)?;
        Ok(bound)
    }

    /// Effect-specific checks on top of the target filters.
    pub(crate) fn verify_effect(&self, kind: EffectKind, origin: PlayerId, target: BoundTarget) -> Result<(), GameError> {
        match (kind, target) {
            (EffectKind::DiscardFromHand, BoundTarget::Card(card)) => {
                if !self.zones.card(card).is_at(PileKind::PlayerHand, Some(origin)) {
                    return Err(FormattedText::new("ERROR_CARD_NOT_IN_HAND").with_card(card).into());
                }
            }
            (EffectKind::HealNotFull(_), target) => {
                let healed = match target {
                    BoundTarget::Player(player) => player,
                    _ => origin,
                };
                let p = &self.players[healed];
                if p.hp >= p.max_hp {
                    return Err(GameError::rule("ERROR_CANT_HEAL_PAST_FULL_HP"));
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn verify_equip(
        &self,
        player: PlayerId,
        card: CardId,
        def: &CardDefinition,
        targets: &[PlayTarget],
    ) -> Result<SmallVec<[BoundTarget; 2]>, GameError> {
        let target = match (def.equip_on_other, targets) {
            (true, [PlayTarget::Players(players)]) if players.len() == 1 => players[0],
            (false, []) => player,
            (true, _) => return Err(GameError::InvalidAction("target group does not match effect")),
            (false, _) => return Err(GameError::InvalidAction("wrong number of target groups")),
        };
        self.verify_player_target(player, target, &def.equip_target)?;
        if self.has_equipped(target, &def.name) {
            return Err(FormattedText::new("ERROR_DUPLICATED_CARD").with_card(card).into());
        }
        Ok(smallvec![BoundTarget::Player(target)])
    }

    /// Play a verified card.
    ///
    /// Blue cards go to a table. Brown cards are discarded first, then
    /// their effects apply in order. Characters stay in their slot.
    pub(crate) fn do_play_card(&mut self, player: PlayerId, card: CardId, bound: &[BoundTarget]) {
        let catalog = Arc::clone(&self.catalog);
        let def = catalog.get(self.zones.card(card).def);
        let from_character = self.zones.card(card).pile == PileKind::PlayerCharacter;

        if def.color == CardColor::Blue {
            let target = match bound.first() {
                Some(&BoundTarget::Player(target)) => target,
                _ => player,
            };
            self.log(
                FormattedText::new("LOG_EQUIPPED_CARD")
                    .with_card(card)
                    .with_player(player)
                    .with_player(target),
            );
            if def.is_weapon() {
                self.discard_weapons(target);
            }
            self.equip_card(target, card);
            self.queue_event(Event::OnEffectEnd { player, card });
            return;
        }

        let text = match bound.iter().find(|t| **t != BoundTarget::Implicit) {
            _ if from_character => FormattedText::new("LOG_PLAYED_CHARACTER").with_card(card).with_player(player),
            Some(&BoundTarget::Player(target)) => {
                FormattedText::new("LOG_PLAYED_CARD_ON").with_card(card).with_player(player).with_player(target)
            }
            Some(&BoundTarget::Card(target)) => {
                FormattedText::new("LOG_PLAYED_CARD_ON_CARD").with_card(card).with_player(player).with_card(target)
            }
            _ => FormattedText::new("LOG_PLAYED_CARD").with_card(card).with_player(player),
        };
        self.log(text);
        if from_character {
            self.use_card(card, def);
        } else {
            self.discard_card(card);
        }

        let flags = self.effect_flags(def);
        for (effect, target) in def.effects.iter().zip(bound) {
            match (effect.target, *target) {
                (TargetType::OtherPlayers, _) => {
                    for other in self.alive_players_from(player).into_iter().skip(1) {
                        self.apply_effect(effect.kind, player, card, other, flags);
                    }
                }
                (TargetType::Everyone, _) => {
                    for each in self.alive_players_from(player) {
                        self.apply_effect(effect.kind, player, card, each, flags);
                    }
                }
                (_, BoundTarget::Player(target)) => self.apply_effect(effect.kind, player, card, target, flags),
                (_, BoundTarget::Card(target)) => self.apply_card_effect(effect.kind, player, card, target, flags),
                (_, BoundTarget::Implicit) => self.apply_effect(effect.kind, player, card, player, flags),
            }
        }
        self.queue_event(Event::OnEffectEnd { player, card });
    }

    /// Count a use of a card that stays in play, tapping it at its limit.
    fn use_card(&mut self, card: CardId, def: &CardDefinition) {
        let max = def.effects.iter().find_map(|e| match e.kind {
            EffectKind::MaxUsages(max) => Some(max),
            _ => None,
        });
        let usages = self.zones.add_usage(card);
        if max.map_or(false, |max| usages >= max) {
            self.tap_card(card, true);
        }
    }

    fn effect_flags(&self, def: &CardDefinition) -> EffectFlags {
        let targeted = def.effects.iter().filter(|e| e.target != TargetType::None).count();
        let player_targets = def.effects.iter().filter(|e| e.target == TargetType::Player).count();
        EffectFlags {
            escapable: self.config.escapes
                && def.color == CardColor::Brown
                && def.sign.is_some()
                && !def.is_bang_card()
                && !def.effects.iter().any(|e| e.kind == EffectKind::MissedAsBang),
            single_target: targeted == 1 && player_targets == 1,
        }
    }

    fn discard_weapons(&mut self, player: PlayerId) {
        let weapons: Vec<CardId> = self
            .zones
            .pile(PileKind::PlayerTable, Some(player))
            .iter()
            .copied()
            .filter(|&c| self.def_of(c).is_weapon())
            .collect();
        for weapon in weapons {
            self.discard_card(weapon);
        }
    }

    fn apply_effect(
        &mut self,
        kind: EffectKind,
        origin: PlayerId,
        origin_card: CardId,
        target: PlayerId,
        flags: EffectFlags,
    ) {
        let request = |payload| Request::new(payload, Some(origin_card), Some(origin), target).with_flags(flags);
        match kind {
            EffectKind::Bang | EffectKind::BangCard | EffectKind::MissedAsBang => {
                if kind == EffectKind::MissedAsBang {
                    self.players[origin].bangs_played += 1;
                }
                let mut bang = BangState::new(kind != EffectKind::Bang);
                if bang.is_bang_card {
                    let mut event = Event::ApplyBangModifier { player: origin, strength: bang.strength };
                    self.call_event(&mut event);
                    if let Event::ApplyBangModifier { strength, .. } = event {
                        bang.strength = strength;
                    }
                }
                self.queue_request(request(RequestKind::Bang(bang)));
            }
            EffectKind::BangLimit => self.players[origin].bangs_played += 1,
            EffectKind::Beer => {
                if self.beer_heals() {
                    self.heal(target, 1);
                }
            }
            EffectKind::Heal(amount) | EffectKind::HealNotFull(amount) => self.heal(target, amount),
            EffectKind::Duel => self.queue_request(request(RequestKind::Duel { respond_to: origin })),
            EffectKind::Indians => self.queue_request(request(RequestKind::Indians)),
            EffectKind::Draw(count) => self.draw_to_hand(target, count),
            EffectKind::GeneralStore => {
                for _ in 0..self.num_alive() {
                    self.draw_card_to(PileKind::Selection, None, Visibility::Shown);
                }
                self.queue_request(request(RequestKind::GeneralStore));
            }
            EffectKind::Steal
            | EffectKind::Destroy
            | EffectKind::Missed
            | EffectKind::Barrel
            | EffectKind::DeathSave
            | EffectKind::Escape
            | EffectKind::BangAsMissed
            | EffectKind::DiscardFromHand
            | EffectKind::MaxUsages(_) => {}
        }
    }

    /// Steal, destroy or discard a targeted card.
    ///
    /// A card chosen in an opponent's hand is swapped for a random card of
    /// that hand. Against an opponent with the escape rule on, the loss
    /// waits in an escapable request.
    fn apply_card_effect(
        &mut self,
        kind: EffectKind,
        origin: PlayerId,
        origin_card: CardId,
        target: CardId,
        flags: EffectFlags,
    ) {
        if kind == EffectKind::DiscardFromHand {
            self.log(FormattedText::new("LOG_DISCARDED_SELF_CARD").with_player(origin).with_card(target));
            self.discard_card(target);
            return;
        }
        let (pile, owner) = {
            let c = self.zones.card(target);
            (c.pile, c.owner)
        };
        let Some(owner) = owner else {
            return;
        };
        let chosen = if pile == PileKind::PlayerHand && owner != origin {
            self.random_hand_card(owner).unwrap_or(target)
        } else {
            target
        };

        if flags.escapable && owner != origin {
            let kind = match kind {
                EffectKind::Steal => RequestKind::Steal { card: chosen },
                _ => RequestKind::Destroy { card: chosen },
            };
            self.queue_request(Request::new(kind, Some(origin_card), Some(origin), owner).with_flags(flags));
            return;
        }

        match kind {
            EffectKind::Steal => {
                self.log(
                    FormattedText::new("LOG_STOLEN_CARD")
                        .with_player(origin)
                        .with_card(chosen)
                        .with_player(owner),
                );
                self.steal_card(origin, chosen);
            }
            EffectKind::Destroy => {
                self.log(
                    FormattedText::new("LOG_DISCARDED_CARD")
                        .with_player(origin)
                        .with_card(chosen)
                        .with_player(owner),
                );
                self.discard_card(chosen);
                self.queue_event(Event::OnEffectEnd { player: owner, card: chosen });
            }
            _ => {}
        }
    }

    /// Beer stops working once only two of a larger table remain.
    fn beer_heals(&self) -> bool {
        self.config.player_count <= 2 || self.num_alive() > 2
    }

    // === Respond ===

    /// Whether `player` can answer the front request with `card`.
    #[must_use]
    pub fn can_respond(&self, player: PlayerId, card: CardId) -> bool {
        let (Some(request), Some(c)) = (self.requests.front(), self.zones.get(card)) else {
            return false;
        };
        if c.owner != Some(player) || request.target != player || !self.players[player].alive() {
            return false;
        }
        let def = self.def_of(card);
        let usable_from_pile = match c.pile {
            PileKind::PlayerHand => def.color != CardColor::Blue,
            PileKind::PlayerTable => def.color == CardColor::Blue,
            PileKind::PlayerCharacter => true,
            _ => false,
        };
        usable_from_pile
            && !def.responses.is_empty()
            && def.responses.iter().all(|effect| match (&request.kind, effect.kind) {
                (RequestKind::Bang(_), EffectKind::Missed) => true,
                (RequestKind::Bang(_), EffectKind::BangAsMissed) => self.players[player].missed_as_bang > 0,
                (RequestKind::Bang(bang), EffectKind::Barrel) => !bang.cards_used.contains(&card),
                (RequestKind::Death, EffectKind::Beer) => self.beer_heals(),
                (RequestKind::Death, EffectKind::DeathSave | EffectKind::HealNotFull(_)) => true,
                (RequestKind::Death, EffectKind::DiscardFromHand) => {
                    self.zones.pile(PileKind::PlayerHand, Some(player)).len() >= 2
                }
                (RequestKind::Destroy { .. } | RequestKind::Steal { .. }, EffectKind::Escape) => {
                    request.flags.escapable
                }
                _ => false,
            })
    }

    /// Whether `card` counts as a bang card for `player`, for duels and
    /// indians as well as for playing.
    #[must_use]
    pub fn is_bang_card_for(&self, player: PlayerId, card: CardId) -> bool {
        let def = self.def_of(card);
        def.is_bang_card()
            || (self.players[player].missed_as_bang > 0
                && def.responses.iter().any(|e| e.kind == EffectKind::Missed))
    }

    /// Answer the front request with `card`. Hand cards are discarded.
    pub(crate) fn do_respond_card(&mut self, player: PlayerId, card: CardId, bound: &[BoundTarget]) {
        let catalog = Arc::clone(&self.catalog);
        let def = catalog.get(self.zones.card(card).def);

        self.log(FormattedText::new("LOG_RESPONDED_WITH_CARD").with_card(card).with_player(player));
        if self.zones.card(card).pile == PileKind::PlayerHand {
            self.discard_card(card);
        }
        for (effect, target) in def.responses.iter().zip(bound) {
            match *target {
                BoundTarget::Card(target) => {
                    self.apply_card_effect(effect.kind, player, card, target, EffectFlags::default());
                }
                _ => self.on_respond(effect.kind, player, card),
            }
        }
        self.queue_event(Event::OnEffectEnd { player, card });
    }

    fn on_respond(&mut self, kind: EffectKind, player: PlayerId, card: CardId) {
        match kind {
            EffectKind::Missed | EffectKind::BangAsMissed => self.bang_missed(player),
            EffectKind::Barrel => {
                if let Some(RequestKind::Bang(bang)) = self.requests.front_mut().map(|r| &mut r.kind) {
                    bang.cards_used.push(card);
                }
                self.draw_check_then(player, card, CheckOutcome::Barrel);
                let still_aimed = self
                    .requests
                    .front()
                    .map_or(false, |r| r.is_for(player, |k| matches!(k, RequestKind::Bang(_))));
                if still_aimed {
                    self.update_request();
                }
            }
            EffectKind::Beer => {
                if self.beer_heals() {
                    self.heal(player, 1);
                }
            }
            EffectKind::HealNotFull(amount) => self.heal(player, amount),
            EffectKind::DeathSave => {
                if self.players[player].hp > 0 {
                    self.pop_request();
                }
            }
            EffectKind::Escape => {
                self.log(FormattedText::new("LOG_ESCAPED").with_player(player));
                self.pop_request();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_bindings() {
        assert_eq!(event_binding(EquipKind::Boots), Some((EventKind::OnHit, 1)));
        // El Gringo steals before Bart Cassidy draws.
        assert!(event_binding(EquipKind::ElGringo).unwrap().1 > event_binding(EquipKind::Boots).unwrap().1);
        assert_eq!(event_binding(EquipKind::Mustang), None);
        assert_eq!(event_binding(EquipKind::MaxHp(4)), None);
        assert_eq!(event_binding(EquipKind::PedroRamirez), Some((EventKind::OnRequestDraw, 0)));
        assert_eq!(event_binding(EquipKind::CalamityJanet), None);
    }
}
