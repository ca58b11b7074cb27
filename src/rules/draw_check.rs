//! Draw checks.
//!
//! A draw check flips the top of the deck and applies an outcome based on
//! the flipped card's sign. Players with extra checks flip several cards
//! and choose which one counts through a check request.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, CardSign, CardSuit};
use crate::core::{FormattedText, PlayerId};
use crate::game::{Game, Visibility};
use crate::stack::{Request, RequestKind};
use crate::zones::PileKind;

/// What a finished check does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckOutcome {
    /// Hearts cancel one point of the bang aimed at the checker.
    Barrel,
    /// Hearts free the checker; anything else skips the turn.
    Jail,
    /// Spades 2-9 explode; anything else passes the dynamite on.
    Dynamite,
}

impl CheckOutcome {
    /// Whether the flipped sign counts as a success for the checker.
    #[must_use]
    pub fn is_success(self, sign: Option<CardSign>) -> bool {
        match self {
            CheckOutcome::Barrel | CheckOutcome::Jail => {
                sign.map_or(false, |s| s.suit == CardSuit::Hearts)
            }
            CheckOutcome::Dynamite => !sign.map_or(false, |s| {
                s.suit == CardSuit::Spades && (2..=9).contains(&s.rank)
            }),
        }
    }
}

impl Game {
    /// Start a draw check for `player` on behalf of `origin_card`.
    pub(crate) fn draw_check_then(&mut self, player: PlayerId, origin_card: CardId, outcome: CheckOutcome) {
        let flips = self.players[player].num_checks.max(1);
        if flips > 1 {
            for _ in 0..flips {
                self.draw_card_to(PileKind::Selection, None, Visibility::Shown);
            }
            self.queue_request_front(Request::new(
                RequestKind::Check { outcome },
                Some(origin_card),
                None,
                player,
            ));
        } else {
            let checked = self.draw_check_card();
            self.resolve_check(player, origin_card, checked, outcome);
        }
    }

    /// The checker chose `checked` among the flipped cards.
    pub(crate) fn select_check(&mut self, player: PlayerId, origin_card: CardId, checked: CardId, outcome: CheckOutcome) {
        let others: Vec<CardId> = self
            .zones
            .pile(PileKind::Selection, None)
            .iter()
            .copied()
            .filter(|&c| c != checked)
            .collect();
        for card in others {
            self.discard_card(card);
        }
        self.discard_card(checked);
        self.resolve_check(player, origin_card, checked, outcome);
    }

    fn resolve_check(&mut self, player: PlayerId, origin_card: CardId, checked: CardId, outcome: CheckOutcome) {
        self.log(
            FormattedText::new("LOG_CHECK_DREW_CARD")
                .with_card(origin_card)
                .with_player(player)
                .with_card(checked),
        );

        let success = outcome.is_success(self.def_of(checked).sign);
        match outcome {
            CheckOutcome::Barrel => {
                if success {
                    self.bang_missed(player);
                }
            }
            CheckOutcome::Jail => {
                self.discard_card(origin_card);
                if success {
                    self.next_predraw_check(player, Some(origin_card));
                } else {
                    self.log(FormattedText::new("LOG_SKIP_TURN").with_player(player));
                    self.skip_turn(player);
                }
            }
            CheckOutcome::Dynamite => {
                if success {
                    self.pass_dynamite(player, origin_card);
                } else {
                    self.log(FormattedText::new("LOG_CARD_EXPLODES").with_card(origin_card));
                    self.discard_card(origin_card);
                    self.damage(Some(origin_card), None, player, 3, false, false);
                }
                self.next_predraw_check(player, Some(origin_card));
            }
        }
    }

    /// Move the dynamite to the next player who does not have one.
    fn pass_dynamite(&mut self, player: PlayerId, dynamite: CardId) {
        let name = self.def_of(dynamite).name.clone();
        let mut next = self.next_player(player);
        while next != player && self.has_equipped(next, &name) {
            next = self.next_player(next);
        }
        if next != player {
            self.equip_card(next, dynamite);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(suit: CardSuit, rank: u8) -> Option<CardSign> {
        Some(CardSign::new(suit, rank))
    }

    #[test]
    fn test_hearts_checks() {
        assert!(CheckOutcome::Barrel.is_success(sign(CardSuit::Hearts, 5)));
        assert!(!CheckOutcome::Barrel.is_success(sign(CardSuit::Diamonds, 5)));
        assert!(CheckOutcome::Jail.is_success(sign(CardSuit::Hearts, 14)));
        assert!(!CheckOutcome::Jail.is_success(None));
    }

    #[test]
    fn test_dynamite_range() {
        assert!(!CheckOutcome::Dynamite.is_success(sign(CardSuit::Spades, 2)));
        assert!(!CheckOutcome::Dynamite.is_success(sign(CardSuit::Spades, 9)));
        assert!(CheckOutcome::Dynamite.is_success(sign(CardSuit::Spades, 10)));
        assert!(CheckOutcome::Dynamite.is_success(sign(CardSuit::Hearts, 5)));
    }
}
