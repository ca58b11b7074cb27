//! Requests: outstanding decisions that gate which actions are legal.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardId;
use crate::core::PlayerId;
use crate::effects::EffectFlags;
use crate::rules::CheckOutcome;

/// Kind-specific payload of a bang request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BangState {
    /// Misses still needed to cancel the bang.
    pub strength: i32,
    pub damage: i32,
    pub is_bang_card: bool,
    /// Table cards already used against this bang.
    pub cards_used: SmallVec<[CardId; 2]>,
}

impl BangState {
    #[must_use]
    pub fn new(is_bang_card: bool) -> Self {
        Self {
            strength: 1,
            damage: 1,
            is_bang_card,
            cards_used: SmallVec::new(),
        }
    }
}

/// Where a draw phase may take its first card from, besides the deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawSource {
    /// A random card of another player's hand.
    Hand,
    /// The top of the discard pile.
    DiscardPile,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestKind {
    /// Pick which predraw check to resolve next.
    Predraw,
    /// Pick the deck to draw the turn's cards.
    Draw,
    /// Pick the deck, or a first card from `source`.
    DrawChoice { source: DrawSource },
    /// Pick one of several flipped check cards.
    Check { outcome: CheckOutcome },
    /// Pick one revealed card, then pass the choice on.
    GeneralStore,
    /// Discard down to the hand limit before the turn ends.
    DiscardPass,
    Bang(BangState),
    /// Discard a bang card or take a hit.
    Indians,
    /// Discard a bang card to turn the duel back on `respond_to`.
    Duel { respond_to: PlayerId },
    /// Hit points dropped to zero; answerable by a death save.
    Death,
    /// Accept losing `card` to a discard, unless escaped.
    Destroy { card: CardId },
    /// Accept losing `card` to the origin's hand, unless escaped.
    Steal { card: CardId },
    /// Keep cards out of the revealed selection in the draw phase.
    KitCarlson,
    /// Damage waiting for its timer to run out.
    Damaging { damage: i32, is_bang: bool },
}

impl RequestKind {
    /// Whether the target answers this kind by picking a card or pile.
    #[must_use]
    pub fn awaits_pick(&self) -> bool {
        matches!(
            self,
            RequestKind::Predraw
                | RequestKind::Draw
                | RequestKind::DrawChoice { .. }
                | RequestKind::Check { .. }
                | RequestKind::GeneralStore
                | RequestKind::DiscardPass
                | RequestKind::Indians
                | RequestKind::Duel { .. }
                | RequestKind::KitCarlson
        )
    }

    /// Whether the target may end this kind with a resolve action.
    #[must_use]
    pub fn is_resolvable(&self) -> bool {
        matches!(
            self,
            RequestKind::Bang(_)
                | RequestKind::Indians
                | RequestKind::Duel { .. }
                | RequestKind::Death
                | RequestKind::Destroy { .. }
                | RequestKind::Steal { .. }
                | RequestKind::Damaging { .. }
        )
    }

    /// Short lowercase name for traces.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            RequestKind::Predraw => "predraw",
            RequestKind::Draw => "draw",
            RequestKind::DrawChoice { .. } => "draw_choice",
            RequestKind::Check { .. } => "check",
            RequestKind::GeneralStore => "general_store",
            RequestKind::DiscardPass => "discard_pass",
            RequestKind::Bang(_) => "bang",
            RequestKind::Indians => "indians",
            RequestKind::Duel { .. } => "duel",
            RequestKind::Death => "death",
            RequestKind::Destroy { .. } => "destroy",
            RequestKind::Steal { .. } => "steal",
            RequestKind::KitCarlson => "kit_carlson",
            RequestKind::Damaging { .. } => "damaging",
        }
    }
}

/// An outstanding decision.
///
/// `origin` is `None` for rule-generated requests (draw, predraw, checks
/// caused by equipment).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Request {
    pub origin_card: Option<CardId>,
    pub origin: Option<PlayerId>,
    pub target: PlayerId,
    pub flags: EffectFlags,
    /// Ticks left before the request resolves on its own.
    pub timer: Option<u32>,
    pub kind: RequestKind,
}

impl Request {
    #[must_use]
    pub fn new(
        kind: RequestKind,
        origin_card: Option<CardId>,
        origin: Option<PlayerId>,
        target: PlayerId,
    ) -> Self {
        Self {
            origin_card,
            origin,
            target,
            flags: EffectFlags::default(),
            timer: None,
            kind,
        }
    }

    /// A rule-generated request with no origin.
    #[must_use]
    pub fn rule(kind: RequestKind, target: PlayerId) -> Self {
        Self::new(kind, None, None, target)
    }

    #[must_use]
    pub fn with_flags(mut self, flags: EffectFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_timer(mut self, ticks: u32) -> Self {
        self.timer = Some(ticks);
        self
    }

    /// Whether this is a `kind`-shaped request aimed at `player`.
    #[must_use]
    pub fn is_for(&self, player: PlayerId, kind: impl Fn(&RequestKind) -> bool) -> bool {
        self.target == player && kind(&self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_and_resolve_classes() {
        assert!(RequestKind::Draw.awaits_pick());
        assert!(!RequestKind::Draw.is_resolvable());
        assert!(RequestKind::Bang(BangState::new(true)).is_resolvable());
        assert!(!RequestKind::Bang(BangState::new(true)).awaits_pick());
        assert!(RequestKind::Indians.awaits_pick() && RequestKind::Indians.is_resolvable());
        let choice = RequestKind::DrawChoice { source: DrawSource::DiscardPile };
        assert!(choice.awaits_pick() && !choice.is_resolvable());
    }

    #[test]
    fn test_request_builder() {
        let request = Request::new(
            RequestKind::Death,
            Some(CardId::new(4)),
            Some(PlayerId::new(0)),
            PlayerId::new(1),
        )
        .with_timer(3);
        assert_eq!(request.timer, Some(3));
        assert!(request.is_for(PlayerId::new(1), |k| matches!(k, RequestKind::Death)));
        assert!(!request.is_for(PlayerId::new(0), |k| matches!(k, RequestKind::Death)));
    }

    #[test]
    fn test_bang_defaults() {
        let bang = BangState::new(false);
        assert_eq!(bang.strength, 1);
        assert_eq!(bang.damage, 1);
        assert!(bang.cards_used.is_empty());
    }
}
