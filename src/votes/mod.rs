//! Voting: the ledger, tally analysis, and the eligibility gate.
//!
//! ## Key Types
//!
//! - `VoteLedger`: one active vote per `(voter, round, phase)`, last
//!   write wins
//! - `TallyOutcome`: no votes / decided / tied, from a counted tally
//! - `check_vote`: the per-phase eligibility table, shared by manual and
//!   inbound submission

pub mod ledger;
pub mod tally;
pub mod validate;

pub use ledger::{Vote, VoteLedger};
pub use tally::{leaders, Candidates, TallyEntry, TallyOutcome};
pub use validate::check_vote;
