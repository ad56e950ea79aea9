//! Append-only event log.
//!
//! Every phase transition and tally outcome is appended here; the log is
//! the audit trail and the context feed for narration. Events are
//! immutable once written and ordered by a monotone sequence number.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::Phase;

/// What kind of thing happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// The game was started.
    GameStarted,
    /// Roles were dealt and delivered. Role-revealing: filtered out of
    /// narration context.
    RolesAssigned,
    /// Night fell; traitors are conferring.
    NightChat,
    /// The night vote was opened to the traitors.
    NightVoteOpened,
    /// The night vote tied; a revote was opened.
    NightRevoteOpened,
    /// A player was eliminated during the night.
    NightElimination,
    /// The night ended with no elimination.
    QuietNight,
    /// Open day discussion began.
    DayDiscussion,
    /// The day vote was opened to all living players.
    DayVoteOpened,
    /// The day vote tied; a revote was opened.
    DayRevoteOpened,
    /// A player was exiled by the day vote.
    DayElimination,
    /// The day ended with no exile.
    NoExile,
    /// A winner was declared.
    GameOver,
}

impl EventKind {
    /// Whether narration context must exclude this event.
    #[must_use]
    pub fn reveals_roles(self) -> bool {
        self == EventKind::RolesAssigned
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventKind::GameStarted => "game_started",
            EventKind::RolesAssigned => "roles_assigned",
            EventKind::NightChat => "night_chat",
            EventKind::NightVoteOpened => "night_vote",
            EventKind::NightRevoteOpened => "night_revote",
            EventKind::NightElimination => "night_elimination",
            EventKind::QuietNight => "quiet_night",
            EventKind::DayDiscussion => "day_discussion",
            EventKind::DayVoteOpened => "day_vote",
            EventKind::DayRevoteOpened => "day_revote",
            EventKind::DayElimination => "day_elimination",
            EventKind::NoExile => "no_exile",
            EventKind::GameOver => "game_over",
        };
        write!(f, "{name}")
    }
}

/// One audit-log entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Round the event belongs to.
    pub round: u32,

    /// Phase the game was in (or entering) when the event fired.
    pub phase: Phase,

    /// Event classification.
    pub kind: EventKind,

    /// Human-readable description. Never contains role information except
    /// for `GameOver`, where the winner is public.
    pub description: String,

    /// Log-wide monotone sequence number.
    pub seq: u64,
}

/// The append-only log itself.
///
/// Backed by a persistent vector so snapshots clone in O(1).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vector<Event>,
    next_seq: u64,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Vector::new(),
            next_seq: 0,
        }
    }

    /// Append an event.
    pub fn append(
        &mut self,
        round: u32,
        phase: Phase,
        kind: EventKind,
        description: impl Into<String>,
    ) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push_back(Event {
            round,
            phase,
            kind,
            description: description.into(),
            seq,
        });
    }

    /// List events in append order, optionally restricted to one round.
    #[must_use]
    pub fn list(&self, round: Option<u32>) -> Vec<Event> {
        self.events
            .iter()
            .filter(|e| round.map_or(true, |r| e.round == r))
            .cloned()
            .collect()
    }

    /// The most recent `n` events, in append order.
    #[must_use]
    pub fn latest(&self, n: usize) -> Vec<Event> {
        let skip = self.events.len().saturating_sub(n);
        self.events.iter().skip(skip).cloned().collect()
    }

    /// Number of logged events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove every event. Full game reset only.
    pub fn clear(&mut self) {
        self.events.clear();
        self.next_seq = 0;
    }
}
