//! Role-free snapshots for an optional narration side channel.
//!
//! A narrator (a language model, a template engine, a human host) gets a
//! [`NarrationSnapshot`]: public information only, with role-revealing
//! events filtered out. Narration failure is cosmetic; callers treat a
//! `None` from the [`Narrator`] as "no flavor text this time" and move on.

use serde::{Deserialize, Serialize};

use crate::core::Phase;
use crate::engine::Game;

/// Number of recent events included in a snapshot.
const RECENT_EVENTS: usize = 5;

/// Public vote standing for one target, by display name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteStanding {
    /// Target's display name.
    pub name: String,

    /// Votes currently against them.
    pub count: u32,
}

/// Everything a narrator may know about the game.
///
/// Built from public information only: names, life status, the event log
/// minus role-revealing entries, and current vote counts during voting
/// phases. Roles never appear here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrationSnapshot {
    /// Current round.
    pub round: u32,

    /// Current phase.
    pub phase: Phase,

    /// Names of living players, in registration order.
    pub alive: Vec<String>,

    /// Names of eliminated players, in registration order.
    pub eliminated: Vec<String>,

    /// Descriptions of the most recent events, oldest first, with
    /// role-revealing kinds removed.
    pub recent_events: Vec<String>,

    /// Current vote standings, highest count first. Empty outside voting
    /// phases.
    pub vote_counts: Vec<VoteStanding>,
}

impl NarrationSnapshot {
    /// Capture the current public view of a game.
    #[must_use]
    pub fn capture(game: &Game) -> Self {
        let state = game.state();
        let registry = game.registry();

        let alive = registry.alive().map(|p| p.name.clone()).collect();
        let eliminated = registry
            .iter()
            .filter(|p| !p.alive)
            .map(|p| p.name.clone())
            .collect();

        let mut recent_events: Vec<String> = game
            .events()
            .list(None)
            .into_iter()
            .filter(|e| !e.kind.reveals_roles())
            .map(|e| e.description)
            .collect();
        if recent_events.len() > RECENT_EVENTS {
            recent_events.drain(..recent_events.len() - RECENT_EVENTS);
        }

        let vote_counts = if state.phase.is_voting() {
            game.ledger()
                .tally(state.round, state.phase)
                .into_iter()
                .map(|entry| VoteStanding {
                    name: registry
                        .get(entry.target)
                        .map_or_else(|| entry.target.to_string(), |p| p.name.clone()),
                    count: entry.count,
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            round: state.round,
            phase: state.phase,
            alive,
            eliminated,
            recent_events,
            vote_counts,
        }
    }
}

/// Producer of flavor text from a public snapshot.
///
/// `None` means "nothing this time" and is never an error; the game state
/// does not depend on narration in any way.
pub trait Narrator {
    /// Produce narration for the given snapshot, if possible.
    fn narrate(&mut self, snapshot: &NarrationSnapshot) -> Option<String>;
}
