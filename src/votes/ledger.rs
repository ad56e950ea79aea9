//! The vote ledger: one active vote per voter per round and phase.
//!
//! ## Last write wins
//!
//! Casting replaces any earlier vote with the same
//! `(voter, round, phase)` key; no history of overwritten votes is kept.
//! Votes from finished phases stay in the ledger for audit, superseded
//! only in the sense that every query is scoped to a round + phase key.
//!
//! ## Ordering
//!
//! Votes carry a monotone submission sequence number (`seq`) in place of
//! a wall-clock timestamp; listings are ordered by it.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{Phase, PlayerId};
use crate::votes::tally::TallyEntry;

/// A recorded vote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// Who cast the vote.
    pub voter: PlayerId,

    /// Who the vote is against.
    pub target: PlayerId,

    /// Round the vote belongs to.
    pub round: u32,

    /// Phase the vote belongs to.
    pub phase: Phase,

    /// Ledger-wide submission sequence number.
    pub seq: u64,
}

/// Append-mostly store of all votes for one game.
///
/// Backed by a persistent vector so status snapshots clone in O(1).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VoteLedger {
    votes: Vector<Vote>,
    next_seq: u64,
}

impl VoteLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            votes: Vector::new(),
            next_seq: 0,
        }
    }

    /// Record a vote, replacing any earlier vote by the same voter in the
    /// same round and phase.
    ///
    /// Eligibility is the validation gate's concern
    /// ([`check_vote`](crate::votes::check_vote)); the ledger records
    /// whatever it is given.
    pub fn cast(&mut self, voter: PlayerId, target: PlayerId, round: u32, phase: Phase) {
        self.votes = self
            .votes
            .iter()
            .filter(|v| !(v.voter == voter && v.round == round && v.phase == phase))
            .copied()
            .collect();

        let seq = self.next_seq;
        self.next_seq += 1;
        self.votes.push_back(Vote {
            voter,
            target,
            round,
            phase,
            seq,
        });
    }

    /// All votes for a round + phase, in submission order.
    #[must_use]
    pub fn votes_for(&self, round: u32, phase: Phase) -> Vec<Vote> {
        self.votes
            .iter()
            .filter(|v| v.round == round && v.phase == phase)
            .copied()
            .collect()
    }

    /// Count votes per target for a round + phase.
    ///
    /// Sorted by count descending; targets with equal counts are ordered
    /// by ascending player ID so the result is deterministic.
    #[must_use]
    pub fn tally(&self, round: u32, phase: Phase) -> Vec<TallyEntry> {
        let mut counts: FxHashMap<PlayerId, u32> = FxHashMap::default();
        for vote in self.votes.iter() {
            if vote.round == round && vote.phase == phase {
                *counts.entry(vote.target).or_insert(0) += 1;
            }
        }

        let mut entries: Vec<TallyEntry> = counts
            .into_iter()
            .map(|(target, count)| TallyEntry { target, count })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count).then(a.target.cmp(&b.target)));
        entries
    }

    /// Total number of stored votes across all rounds and phases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.votes.len()
    }

    /// Check if the ledger is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    /// Remove every vote. Full game reset only.
    pub fn clear(&mut self) {
        self.votes.clear();
        self.next_seq = 0;
    }
}
