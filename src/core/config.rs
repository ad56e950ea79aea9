//! Game configuration.
//!
//! Drivers provide a [`GameConfig`] at construction. The defaults match
//! the standard ruleset: 6-20 players, a quarter of them traitors (never
//! fewer than two), and self-votes allowed during the day vote.

use serde::{Deserialize, Serialize};

/// Tunable rules for one game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Minimum number of registered players required to start.
    pub min_players: usize,

    /// Maximum number of registered players allowed to start.
    pub max_players: usize,

    /// Fraction of players assigned the traitor role, floored, with a
    /// lower bound of two.
    pub traitor_ratio: f64,

    /// Whether a player may vote for themselves during `DayVote`.
    ///
    /// On by default: day votes place no restriction on the target beyond
    /// being alive. Disable to reject self-votes instead.
    pub allow_self_vote: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_players: 6,
            max_players: 20,
            traitor_ratio: 0.25,
            allow_self_vote: true,
        }
    }
}

impl GameConfig {
    /// Create a configuration with the default ruleset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum player count.
    #[must_use]
    pub fn with_min_players(mut self, min: usize) -> Self {
        self.min_players = min;
        self
    }

    /// Set the maximum player count.
    #[must_use]
    pub fn with_max_players(mut self, max: usize) -> Self {
        self.max_players = max;
        self
    }

    /// Set the traitor ratio.
    #[must_use]
    pub fn with_traitor_ratio(mut self, ratio: f64) -> Self {
        self.traitor_ratio = ratio;
        self
    }

    /// Allow or forbid self-votes during `DayVote`.
    #[must_use]
    pub fn with_self_vote(mut self, allow: bool) -> Self {
        self.allow_self_vote = allow;
        self
    }

    /// Number of traitors for a game of `player_count` players:
    /// `max(2, floor(player_count * traitor_ratio))`.
    #[must_use]
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn traitor_count(&self, player_count: usize) -> usize {
        let by_ratio = (player_count as f64 * self.traitor_ratio) as usize;
        by_ratio.max(2)
    }
}
