//! Error taxonomy.
//!
//! Every error here is non-fatal to the game: it is reported to the
//! caller and the game continues. Nothing in the core retries; the only
//! retry-like behavior is the revote phase, which is a game rule, not
//! fault recovery.

use thiserror::Error;

use crate::core::{Phase, PlayerId};

/// Errors reported by the game core.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// Referenced player does not exist.
    #[error("{0} does not exist")]
    NotFound(PlayerId),

    /// Operation requires a started game.
    #[error("the game has not been started")]
    NotStarted,

    /// Start requested on a game already in progress.
    #[error("the game is already running")]
    AlreadyStarted,

    /// Advance requested on a finished game.
    #[error("the game is over; no further phase transitions are possible")]
    InvalidTransition,

    /// Too few registered players to start.
    #[error("not enough players: {have} registered, at least {need} required")]
    NotEnoughPlayers { have: usize, need: usize },

    /// Too many registered players to start.
    #[error("too many players: {have} registered, at most {max} allowed")]
    TooManyPlayers { have: usize, max: usize },

    /// Registration with an email that is already taken.
    #[error("email {0} is already registered")]
    DuplicateEmail(String),

    /// Elimination of a player who is already dead. Caller error.
    #[error("{0} has already been eliminated")]
    AlreadyEliminated(PlayerId),

    /// The voter violates the current phase's eligibility rules.
    #[error("{voter} may not vote: {reason}")]
    IneligibleVoter { voter: PlayerId, reason: String },

    /// The target violates the current phase's eligibility rules.
    #[error("{target} is not a valid target: {reason}")]
    IneligibleTarget { target: PlayerId, reason: String },

    /// Vote submitted outside a voting phase.
    #[error("votes are not accepted during {0}")]
    NotVotingPhase(Phase),

    /// Inbound ballot could not be parsed or resolved to a player.
    #[error("unusable inbound ballot: {0}")]
    ParseFailure(String),
}

impl GameError {
    /// Build an [`GameError::IneligibleVoter`] with a formatted reason.
    #[must_use]
    pub fn ineligible_voter(voter: PlayerId, reason: impl Into<String>) -> Self {
        Self::IneligibleVoter {
            voter,
            reason: reason.into(),
        }
    }

    /// Build an [`GameError::IneligibleTarget`] with a formatted reason.
    #[must_use]
    pub fn ineligible_target(target: PlayerId, reason: impl Into<String>) -> Self {
        Self::IneligibleTarget {
            target,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GameError::NotFound(PlayerId::new(3));
        assert_eq!(err.to_string(), "player 3 does not exist");

        let err = GameError::NotVotingPhase(Phase::DayDiscussion);
        assert_eq!(
            err.to_string(),
            "votes are not accepted during day discussion"
        );

        let err = GameError::ineligible_voter(PlayerId::new(1), "only traitors vote at night");
        assert_eq!(
            err.to_string(),
            "player 1 may not vote: only traitors vote at night"
        );
    }
}
