//! Tally analysis and tie detection.
//!
//! Given a counted tally (from [`VoteLedger::tally`]), the outcome is one
//! of three shapes: nobody voted, a single target leads, or two or more
//! targets share the maximum. The state machine maps `Tied` to a revote
//! phase unless it is already in one, in which case a persisting tie
//! resolves to "no elimination".
//!
//! [`VoteLedger::tally`]: crate::votes::VoteLedger::tally

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::PlayerId;

/// Candidate sets are almost always 2-3 players.
pub type Candidates = SmallVec<[PlayerId; 4]>;

/// One row of a counted tally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyEntry {
    /// Vote target.
    pub target: PlayerId,

    /// Number of votes currently against the target.
    pub count: u32,
}

/// The resolved shape of a tally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TallyOutcome {
    /// Nobody voted. Treated as "no elimination".
    NoVotes,

    /// Exactly one target holds the maximum count.
    Decided { target: PlayerId, count: u32 },

    /// Two or more targets share the maximum count.
    Tied { candidates: Candidates, count: u32 },
}

impl TallyOutcome {
    /// Analyze a tally sorted by count descending (as produced by the
    /// ledger).
    #[must_use]
    pub fn resolve(entries: &[TallyEntry]) -> Self {
        let Some(first) = entries.first() else {
            return TallyOutcome::NoVotes;
        };

        let tied = leaders(entries);
        if tied.len() == 1 {
            TallyOutcome::Decided {
                target: first.target,
                count: first.count,
            }
        } else {
            TallyOutcome::Tied {
                candidates: tied,
                count: first.count,
            }
        }
    }
}

/// All targets sharing the maximum count of a sorted tally.
///
/// Empty for an empty tally. Used both for outcome resolution and for the
/// revote eligibility rules, which constrain voters/targets to the tied
/// leaders of the preceding vote.
#[must_use]
pub fn leaders(entries: &[TallyEntry]) -> Candidates {
    let Some(first) = entries.first() else {
        return Candidates::new();
    };
    entries
        .iter()
        .take_while(|e| e.count == first.count)
        .map(|e| e.target)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(target: u32, count: u32) -> TallyEntry {
        TallyEntry {
            target: PlayerId::new(target),
            count,
        }
    }

    #[test]
    fn test_empty_tally_is_no_votes() {
        assert_eq!(TallyOutcome::resolve(&[]), TallyOutcome::NoVotes);
        assert!(leaders(&[]).is_empty());
    }

    #[test]
    fn test_single_leader_is_decided() {
        let entries = [entry(3, 4), entry(1, 2), entry(5, 1)];

        assert_eq!(
            TallyOutcome::resolve(&entries),
            TallyOutcome::Decided {
                target: PlayerId::new(3),
                count: 4
            }
        );
    }

    #[test]
    fn test_shared_maximum_is_tied() {
        let entries = [entry(2, 3), entry(4, 3), entry(6, 1)];

        let outcome = TallyOutcome::resolve(&entries);
        match outcome {
            TallyOutcome::Tied { candidates, count } => {
                assert_eq!(count, 3);
                assert_eq!(candidates.as_slice(), &[PlayerId::new(2), PlayerId::new(4)]);
            }
            other => panic!("expected tie, got {other:?}"),
        }
    }

    #[test]
    fn test_three_way_tie() {
        let entries = [entry(1, 2), entry(2, 2), entry(3, 2)];

        let tied = leaders(&entries);
        assert_eq!(tied.len(), 3);
    }

    #[test]
    fn test_leaders_stop_at_first_lower_count() {
        let entries = [entry(1, 5), entry(2, 5), entry(3, 4), entry(4, 4)];

        let tied = leaders(&entries);
        assert_eq!(tied.as_slice(), &[PlayerId::new(1), PlayerId::new(2)]);
    }
}
