//! Formatted, localizable messages.
//!
//! The engine never renders text. Logs, status lines and rule violations
//! carry a message key plus typed arguments and the presentation layer
//! formats them.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::PlayerId;
use crate::cards::CardId;

/// A single argument of a formatted message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatArg {
    Card(CardId),
    Player(PlayerId),
    Int(i64),
}

/// A message key with its arguments, e.g. `ERROR_TARGET_NOT_REACHABLE`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormattedText {
    pub key: String,
    pub args: SmallVec<[FormatArg; 3]>,
}

impl FormattedText {
    /// Create a message with no arguments.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            args: SmallVec::new(),
        }
    }

    /// Append a card argument (builder pattern).
    #[must_use]
    pub fn with_card(mut self, card: CardId) -> Self {
        self.args.push(FormatArg::Card(card));
        self
    }

    /// Append a player argument (builder pattern).
    #[must_use]
    pub fn with_player(mut self, player: PlayerId) -> Self {
        self.args.push(FormatArg::Player(player));
        self
    }

    /// Append an optional player argument; `None` is skipped.
    #[must_use]
    pub fn with_opt_player(self, player: Option<PlayerId>) -> Self {
        match player {
            Some(p) => self.with_player(p),
            None => self,
        }
    }

    /// Append an optional card argument; `None` is skipped.
    #[must_use]
    pub fn with_opt_card(self, card: Option<CardId>) -> Self {
        match card {
            Some(c) => self.with_card(c),
            None => self,
        }
    }

    /// Append an integer argument (builder pattern).
    #[must_use]
    pub fn with_int(mut self, value: i64) -> Self {
        self.args.push(FormatArg::Int(value));
        self
    }
}

impl std::fmt::Display for FormattedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key)?;
        if self.args.is_empty() {
            return Ok(());
        }
        write!(f, "(")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match arg {
                FormatArg::Card(c) => write!(f, "{}", c)?,
                FormatArg::Player(p) => write!(f, "{}", p)?,
                FormatArg::Int(v) => write!(f, "{}", v)?,
            }
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_without_args() {
        assert_eq!(FormattedText::new("LOG_GAME_START").to_string(), "LOG_GAME_START");
    }

    #[test]
    fn test_display_with_args() {
        let text = FormattedText::new("LOG_PLAYED_CARD_ON")
            .with_card(CardId::new(12))
            .with_player(PlayerId::new(0))
            .with_int(2);
        assert_eq!(text.to_string(), "LOG_PLAYED_CARD_ON(Card(12), Player 0, 2)");
    }

    #[test]
    fn test_optional_args_are_skipped() {
        let text = FormattedText::new("LOG_PLAYER_DIED")
            .with_opt_player(None)
            .with_opt_card(Some(CardId::new(1)));
        assert_eq!(text.args.as_slice(), &[FormatArg::Card(CardId::new(1))]);
    }
}
