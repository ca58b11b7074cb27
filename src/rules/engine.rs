//! Win conditions.
//!
//! Win evaluation is a pure function of the alive roles and the death
//! that just happened, so it is checked once per death and never
//! speculatively. The game-side wrapper applies the result: ending the
//! game, handing the turn on, or paying kill rewards.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{FormattedText, PlayerId, PlayerRole};
use crate::game::{GameUpdate, UpdateTarget};
use crate::game::Game;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: PlayerRole,
}

impl GameResult {
    /// Whether a player holding `role` won.
    ///
    /// Deputies share a sheriff win.
    #[must_use]
    pub fn is_winner(&self, role: PlayerRole) -> bool {
        match self.winner {
            PlayerRole::Sheriff => role.is_law(),
            winner => winner == role,
        }
    }
}

/// The death being evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeathContext {
    /// Seats at game start.
    pub player_count: usize,
    pub dead_role: PlayerRole,
    /// Role of the killer, if the kill counts.
    pub killer_role: Option<PlayerRole>,
}

/// Decide whether the game ended after a death.
///
/// `alive` lists the roles still alive in seat order.
///
/// ```
/// use bang_engine::core::PlayerRole;
/// use bang_engine::rules::{evaluate_winner, DeathContext};
///
/// let death = DeathContext {
///     player_count: 4,
///     dead_role: PlayerRole::Sheriff,
///     killer_role: None,
/// };
/// let alive = [PlayerRole::Outlaw, PlayerRole::Renegade];
/// assert_eq!(evaluate_winner(&alive, &death), Some(PlayerRole::Outlaw));
/// ```
#[must_use]
pub fn evaluate_winner(alive: &[PlayerRole], death: &DeathContext) -> Option<PlayerRole> {
    let Some(&first) = alive.first() else {
        return Some(PlayerRole::Outlaw);
    };
    if alive.len() == 1 || alive.iter().all(|r| r.is_law()) {
        return Some(first);
    }
    if death.player_count > 3 && death.dead_role == PlayerRole::Sheriff {
        return Some(PlayerRole::Outlaw);
    }
    if death.player_count == 3 {
        return match (death.killer_role, death.dead_role) {
            (Some(PlayerRole::Renegade), PlayerRole::Outlaw) => Some(PlayerRole::Renegade),
            (Some(PlayerRole::Deputy), PlayerRole::Renegade) => Some(PlayerRole::Deputy),
            (Some(PlayerRole::Outlaw), PlayerRole::Deputy) => Some(PlayerRole::Outlaw),
            _ => None,
        };
    }
    None
}

impl Game {
    /// Evaluate win conditions once `target` has died.
    pub(crate) fn check_game_over(&mut self, killer: Option<PlayerId>, target: PlayerId) {
        if self.is_game_over() {
            return;
        }
        // Only the player whose turn it is gets credit for a kill.
        let killer = killer.filter(|&k| k != target && self.playing == Some(k));

        let alive: Vec<PlayerRole> = self
            .players
            .iter()
            .filter(|(_, p)| p.alive())
            .map(|(_, p)| p.role)
            .collect();
        let death = DeathContext {
            player_count: self.config.player_count,
            dead_role: self.players[target].role,
            killer_role: killer.map(|k| self.players[k].role),
        };

        if let Some(winner) = evaluate_winner(&alive, &death) {
            self.push_update(UpdateTarget::Everyone, GameUpdate::StatusClear);
            let hidden: Vec<PlayerId> = self
                .players
                .iter()
                .filter(|(_, p)| !p.role_shown)
                .map(|(id, _)| id)
                .collect();
            for player in hidden {
                self.show_role(player);
            }
            self.game_over(winner);
            return;
        }

        if self.playing == Some(target) {
            let next = self.next_player(target);
            self.start_of_turn(next);
        } else if let Some(killer) = killer {
            let dead_role = death.dead_role;
            if self.config.player_count == 3 || dead_role == PlayerRole::Outlaw {
                self.log(FormattedText::new("LOG_KILL_REWARD").with_player(killer));
                self.draw_to_hand(killer, 3);
            } else if dead_role == PlayerRole::Deputy && self.players[killer].role == PlayerRole::Sheriff {
                self.log(FormattedText::new("LOG_SHERIFF_KILLED_DEPUTY").with_player(killer));
                self.discard_all(killer);
            }
        }
    }

    fn game_over(&mut self, winner: PlayerRole) {
        info!(?winner, "game over");
        self.winner = Some(GameResult { winner });
        self.requests.clear();
        self.pending.clear();
        self.log(FormattedText::new("LOG_GAME_OVER"));
        self.push_update(UpdateTarget::Everyone, GameUpdate::GameOver { winner });
    }
}
