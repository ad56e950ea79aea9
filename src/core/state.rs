//! Game phases and the game-state record.
//!
//! ## Phase
//!
//! The ordered per-round state machine:
//!
//! ```text
//! Init -> NightTraitorChat -> NightVote -> [NightRevote] -> MorningResult
//!      -> DayDiscussion -> DayVote -> [DayRevote] -> DayResult
//!      -> (next round at NightTraitorChat, or GameOver)
//! ```
//!
//! The revote phases are detours taken only after a tied tally, and each
//! is taken at most once per round: a tie that survives the revote
//! resolves to "no elimination".
//!
//! ## GameState
//!
//! One explicit record per running game, owned and mutated solely by
//! [`Game`](crate::engine::Game) and passed by reference everywhere else.
//! Terminal once finished: `finished` implies `winner` is set and the
//! phase is `GameOver`, which `finish` enforces by being the only way in.

use serde::{Deserialize, Serialize};

/// A named step in the per-round state machine.
///
/// Governs which votes are accepted and what the next `advance` does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Roles assigned, nothing has happened yet.
    #[default]
    Init,
    /// Traitors confer privately.
    NightTraitorChat,
    /// Traitors vote on a victim.
    NightVote,
    /// Traitors re-vote among the tied candidates of `NightVote`.
    NightRevote,
    /// The night's outcome is announced to everyone.
    MorningResult,
    /// Open discussion among all living players.
    DayDiscussion,
    /// All living players vote on whom to exile.
    DayVote,
    /// Non-tied players re-vote among the tied candidates of `DayVote`.
    DayRevote,
    /// The day's outcome is announced; win condition is checked next.
    DayResult,
    /// Terminal. Advancing from here is an error.
    GameOver,
}

impl Phase {
    /// Check whether votes are accepted during this phase.
    #[must_use]
    pub fn is_voting(self) -> bool {
        matches!(
            self,
            Phase::NightVote | Phase::NightRevote | Phase::DayVote | Phase::DayRevote
        )
    }

    /// Check whether this is the terminal phase.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == Phase::GameOver
    }

    /// For a revote phase, the vote phase whose tied leaders constrain it.
    #[must_use]
    pub fn revote_of(self) -> Option<Phase> {
        match self {
            Phase::NightRevote => Some(Phase::NightVote),
            Phase::DayRevote => Some(Phase::DayVote),
            _ => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Init => "init",
            Phase::NightTraitorChat => "night traitor chat",
            Phase::NightVote => "night vote",
            Phase::NightRevote => "night revote",
            Phase::MorningResult => "morning result",
            Phase::DayDiscussion => "day discussion",
            Phase::DayVote => "day vote",
            Phase::DayRevote => "day revote",
            Phase::DayResult => "day result",
            Phase::GameOver => "game over",
        };
        write!(f, "{name}")
    }
}

/// Which side won a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    /// Living traitors reached parity with (or outnumber) living faithful.
    Traitors,
    /// No living traitors remain.
    Faithful,
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Winner::Traitors => write!(f, "traitors"),
            Winner::Faithful => write!(f, "faithful"),
        }
    }
}

/// The current round/phase pointer and lifecycle flags for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Round number, starting at 1. Incremented when a round closes
    /// without a winner.
    pub round: u32,

    /// Current phase.
    pub phase: Phase,

    /// Set once the game has been started (roles assigned).
    pub started: bool,

    /// Set once a winner has been declared. Terminal.
    pub finished: bool,

    /// The winning side. `Some` exactly when `finished` is true.
    pub winner: Option<Winner>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Create a fresh, unstarted game state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            round: 1,
            phase: Phase::Init,
            started: false,
            finished: false,
            winner: None,
        }
    }

    /// Mark the game as started, at round 1 / `Init`.
    pub fn begin(&mut self) {
        self.round = 1;
        self.phase = Phase::Init;
        self.started = true;
        self.finished = false;
        self.winner = None;
    }

    /// Move to a new phase within the current round.
    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Advance to the next round.
    pub fn next_round(&mut self) {
        self.round += 1;
    }

    /// Declare a winner and freeze the state. The only path to `GameOver`.
    pub fn finish(&mut self, winner: Winner) {
        self.finished = true;
        self.winner = Some(winner);
        self.phase = Phase::GameOver;
    }
}
