//! The vote validation gate.
//!
//! One function implements the whole per-phase eligibility table; both the
//! manual `cast_vote` path and inbound-ballot ingestion go through it, so
//! the rules cannot drift between the two.
//!
//! ## Eligibility table
//!
//! | Phase        | Voter                      | Target                               |
//! |--------------|----------------------------|--------------------------------------|
//! | NightVote    | living traitor             | living non-traitor                   |
//! | NightRevote  | living traitor             | tied leader of NightVote, non-traitor|
//! | DayVote      | any living player          | any living player (self allowed*)    |
//! | DayRevote    | living player not tied     | tied leader of DayVote               |
//! | other        | rejected: `NotVotingPhase`                                        |
//!
//! *Self-votes during `DayVote` follow `GameConfig::allow_self_vote`.
//!
//! Tied leader sets are recomputed from the preceding vote phase's tally
//! on every check; the gate holds no state of its own.

use crate::core::{GameConfig, GameState, Phase, PlayerId, PlayerRegistry, Role};
use crate::error::GameError;
use crate::votes::ledger::VoteLedger;
use crate::votes::tally::leaders;

/// Check whether `voter` may currently vote against `target`.
///
/// Returns `Ok(())` when the vote is admissible in the current round and
/// phase; otherwise the specific rule violation.
pub fn check_vote(
    registry: &PlayerRegistry,
    ledger: &VoteLedger,
    state: &GameState,
    config: &GameConfig,
    voter: PlayerId,
    target: PlayerId,
) -> Result<(), GameError> {
    if !state.started {
        return Err(GameError::NotStarted);
    }
    if state.finished {
        return Err(GameError::NotVotingPhase(Phase::GameOver));
    }

    let voter_rec = registry.get(voter).ok_or(GameError::NotFound(voter))?;
    let target_rec = registry.get(target).ok_or(GameError::NotFound(target))?;

    if !voter_rec.alive {
        return Err(GameError::ineligible_voter(voter, "already eliminated"));
    }
    if !target_rec.alive {
        return Err(GameError::ineligible_target(target, "already eliminated"));
    }

    match state.phase {
        Phase::NightVote => {
            if voter_rec.role != Role::Traitor {
                return Err(GameError::ineligible_voter(
                    voter,
                    "only traitors vote at night",
                ));
            }
            if target_rec.role == Role::Traitor {
                return Err(GameError::ineligible_target(
                    target,
                    "cannot vote for a fellow traitor",
                ));
            }
        }

        Phase::NightRevote => {
            if voter_rec.role != Role::Traitor {
                return Err(GameError::ineligible_voter(
                    voter,
                    "only traitors vote at night",
                ));
            }

            if let Some(base) = state.phase.revote_of() {
                let tied = leaders(&ledger.tally(state.round, base));
                if !tied.is_empty() && !tied.contains(&target) {
                    return Err(GameError::ineligible_target(
                        target,
                        "not among the tied candidates of the night vote",
                    ));
                }
            }

            if target_rec.role == Role::Traitor {
                return Err(GameError::ineligible_target(
                    target,
                    "cannot vote for a fellow traitor",
                ));
            }
        }

        Phase::DayVote => {
            if !config.allow_self_vote && voter == target {
                return Err(GameError::ineligible_target(
                    target,
                    "self-votes are disabled",
                ));
            }
        }

        Phase::DayRevote => {
            if let Some(base) = state.phase.revote_of() {
                let tied = leaders(&ledger.tally(state.round, base));
                if !tied.is_empty() {
                    if tied.contains(&voter) {
                        return Err(GameError::ineligible_voter(
                            voter,
                            "tied candidates may not vote in the revote",
                        ));
                    }
                    if !tied.contains(&target) {
                        return Err(GameError::ineligible_target(
                            target,
                            "only tied candidates may receive revote ballots",
                        ));
                    }
                }
            }
        }

        phase => return Err(GameError::NotVotingPhase(phase)),
    }

    Ok(())
}
