//! Dispatcher errors and outcomes.
//!
//! Only recoverable, user-facing failures are values. Broken invariants
//! (a card in two piles, an owner on a shared pile) panic instead: the
//! game truth would already have diverged.

use super::text::FormattedText;

/// Why an action was rejected. State is untouched whenever one is returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameError {
    /// The action breaks a game rule (wrong target, out of range, not your turn).
    RuleViolation(FormattedText),

    /// The action does not even name valid objects (unknown card, wrong
    /// number of target groups).
    InvalidAction(&'static str),

    /// The game has already ended.
    GameOver,
}

impl GameError {
    /// Shorthand for a rule violation without arguments.
    pub fn rule(key: &str) -> Self {
        GameError::RuleViolation(FormattedText::new(key))
    }

    /// The message key, for rule violations.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            GameError::RuleViolation(text) => Some(&text.key),
            _ => None,
        }
    }
}

impl From<FormattedText> for GameError {
    fn from(text: FormattedText) -> Self {
        GameError::RuleViolation(text)
    }
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::RuleViolation(text) => write!(f, "rule violation: {}", text),
            GameError::InvalidAction(reason) => write!(f, "invalid action: {}", reason),
            GameError::GameOver => write!(f, "the game is over"),
        }
    }
}

impl std::error::Error for GameError {}

/// What happened to an accepted action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action was applied.
    Applied,
    /// A pick or response the current request does not accept. Clients may
    /// race a request that was just superseded, so this is not an error.
    Ignored,
}

/// Result of a dispatcher call.
pub type ActionResult = Result<ActionOutcome, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_key() {
        let err = GameError::rule("ERROR_NOT_YOUR_TURN");
        assert_eq!(err.key(), Some("ERROR_NOT_YOUR_TURN"));
        assert_eq!(GameError::GameOver.key(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            GameError::InvalidAction("unknown card").to_string(),
            "invalid action: unknown card"
        );
        assert_eq!(
            GameError::rule("ERROR_ONE_BANG_PER_TURN").to_string(),
            "rule violation: ERROR_ONE_BANG_PER_TURN"
        );
    }
}
