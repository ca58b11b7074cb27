//! Target binding and verification.
//!
//! A play or response action carries one target group per effect that
//! needs one, in effect order. Binding pairs them up and checks the group
//! shapes; verification then checks each bound target against the game
//! without touching it.

use smallvec::SmallVec;

use super::{EffectHolder, PlayerFilter, TargetType};
use crate::cards::CardId;
use crate::core::{FormattedText, GameError, PlayTarget, PlayerId, PlayerRole};
use crate::game::Game;
use crate::zones::PileKind;

/// The target of one effect after binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundTarget {
    /// The effect picks its own targets (or acts on its origin).
    Implicit,
    Player(PlayerId),
    Card(CardId),
}

/// Pair each effect with its target group.
///
/// Fails when the number of groups differs from the number of effects
/// needing one, or when a group has the wrong shape.
///
/// ```
/// use bang_engine::core::{PlayTarget, PlayerId};
/// use bang_engine::effects::{bind_targets, BoundTarget, EffectHolder, EffectKind, TargetType};
///
/// let effects = [
///     EffectHolder::new(EffectKind::BangLimit),
///     EffectHolder::new(EffectKind::BangCard).with_target(TargetType::Player),
/// ];
/// let bound = bind_targets(&effects, &[PlayTarget::player(PlayerId::new(2))]).unwrap();
/// assert_eq!(bound.as_slice(), &[BoundTarget::Implicit, BoundTarget::Player(PlayerId::new(2))]);
///
/// assert!(bind_targets(&effects, &[]).is_err());
/// ```
pub fn bind_targets(
    effects: &[EffectHolder],
    targets: &[PlayTarget],
) -> Result<SmallVec<[BoundTarget; 2]>, GameError> {
    let needed = effects.iter().filter(|e| e.needs_target()).count();
    if needed != targets.len() {
        return Err(GameError::InvalidAction("wrong number of target groups"));
    }

    let mut groups = targets.iter();
    effects
        .iter()
        .map(|effect| {
            if !effect.needs_target() {
                return Ok(BoundTarget::Implicit);
            }
            match (effect.target, groups.next()) {
                (TargetType::Player, Some(PlayTarget::Players(players))) if players.len() == 1 => {
                    Ok(BoundTarget::Player(players[0]))
                }
                (TargetType::Card, Some(PlayTarget::Cards(cards))) if cards.len() == 1 => {
                    Ok(BoundTarget::Card(cards[0]))
                }
                _ => Err(GameError::InvalidAction("target group does not match effect")),
            }
        })
        .collect()
}

impl Game {
    /// Check every bound target of an effect chain played by `origin`.
    ///
    /// A card may be targeted by only one effect of the chain.
    pub(crate) fn verify_targets(
        &self,
        origin: PlayerId,
        effects: &[EffectHolder],
        bound: &[BoundTarget],
    ) -> Result<(), GameError> {
        let mut cards: SmallVec<[CardId; 2]> = SmallVec::new();
        for (effect, target) in effects.iter().zip(bound) {
            match *target {
                BoundTarget::Implicit => {}
                BoundTarget::Player(player) => {
                    self.verify_player_target(origin, player, &effect.player_filter)?;
                }
                BoundTarget::Card(card) => {
                    let owner = self.verify_card_target(card)?;
                    self.verify_player_target(origin, owner, &effect.player_filter)?;
                    if cards.contains(&card) {
                        return Err(FormattedText::new("ERROR_DUPLICATED_CARD").with_card(card).into());
                    }
                    cards.push(card);
                }
            }
            self.verify_effect(effect.kind, origin, *target)?;
        }
        Ok(())
    }

    /// Check a targeted player: it must exist, be alive (or dead, for the
    /// `Dead` filter) and pass every filter.
    pub(crate) fn verify_player_target(
        &self,
        origin: PlayerId,
        target: PlayerId,
        filters: &[PlayerFilter],
    ) -> Result<(), GameError> {
        if target.index() >= self.players.player_count() {
            return Err(GameError::InvalidAction("unknown player"));
        }
        if !filters.contains(&PlayerFilter::Dead) && !self.players[target].alive() {
            return Err(FormattedText::new("ERROR_TARGET_DEAD").with_player(target).into());
        }
        match filters.iter().find(|&&f| !self.player_filter_accepts(f, origin, target)) {
            Some(filter) => Err(FormattedText::new(filter.error_key()).with_player(target).into()),
            None => Ok(()),
        }
    }

    fn player_filter_accepts(&self, filter: PlayerFilter, origin: PlayerId, target: PlayerId) -> bool {
        match filter {
            PlayerFilter::NotSelf => origin != target,
            PlayerFilter::NotSheriff => self.players[target].role != PlayerRole::Sheriff,
            PlayerFilter::Reachable => self.is_reachable(origin, target),
            PlayerFilter::Range1 => self.distance(origin, target) <= 1 + self.players[origin].range_mod,
            PlayerFilter::Dead => self.players[target].dead && !self.players[target].ghost,
        }
    }

    /// A targeted card must be in a hand or on a table. Returns its owner.
    fn verify_card_target(&self, card: CardId) -> Result<PlayerId, GameError> {
        let c = self
            .zones
            .get(card)
            .ok_or(GameError::InvalidAction("unknown card"))?;
        match (c.pile, c.owner) {
            (PileKind::PlayerHand | PileKind::PlayerTable, Some(owner)) => Ok(owner),
            _ => Err(FormattedText::new("ERROR_TARGET_NOT_IN_PLAY").with_card(card).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::EffectKind;
    use smallvec::smallvec;

    fn panic_card() -> Vec<EffectHolder> {
        vec![EffectHolder::new(EffectKind::Steal).with_target(TargetType::Card)]
    }

    #[test]
    fn test_untargeted_chain_takes_no_groups() {
        let effects = [EffectHolder::new(EffectKind::Draw(2))];
        let bound = bind_targets(&effects, &[]).unwrap();
        assert_eq!(bound.as_slice(), &[BoundTarget::Implicit]);

        assert_eq!(
            bind_targets(&effects, &[PlayTarget::None]),
            Err(GameError::InvalidAction("wrong number of target groups"))
        );
    }

    #[test]
    fn test_card_group_binds_to_card_effect() {
        let bound = bind_targets(&panic_card(), &[PlayTarget::card(CardId::new(7))]).unwrap();
        assert_eq!(bound.as_slice(), &[BoundTarget::Card(CardId::new(7))]);
    }

    #[test]
    fn test_group_shape_mismatch() {
        let wrong_kind = bind_targets(&panic_card(), &[PlayTarget::player(PlayerId::new(1))]);
        assert_eq!(wrong_kind, Err(GameError::InvalidAction("target group does not match effect")));

        let two_cards = PlayTarget::Cards(smallvec![CardId::new(1), CardId::new(2)]);
        assert!(bind_targets(&panic_card(), &[two_cards]).is_err());
    }

    #[test]
    fn test_group_targets_need_no_group() {
        let effects = [EffectHolder::new(EffectKind::Indians).with_target(TargetType::OtherPlayers)];
        assert_eq!(bind_targets(&effects, &[]).unwrap().as_slice(), &[BoundTarget::Implicit]);
    }
}
