//! Player identification, roles, and the player record.
//!
//! ## PlayerId
//!
//! Type-safe player identifier. IDs are allocated by the registry starting
//! at 1 and are never reused within a game.
//!
//! ## Player
//!
//! The full player record: identity, secret role, and life status. The
//! `alive` / `eliminated_round` pair is only ever mutated through
//! `PlayerRegistry::eliminate`, which keeps the two fields consistent:
//! `eliminated_round` is `Some` exactly when `alive` is false.

use serde::{Deserialize, Serialize};

/// Player identifier.
///
/// Allocated sequentially by the registry; the first registered player
/// is `PlayerId(1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player {}", self.0)
    }
}

/// Secret allegiance of a player.
///
/// `Unassigned` exists only between registration and game start; role
/// assignment replaces it exactly once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// No role yet (pre-game only).
    #[default]
    Unassigned,
    /// Votes at night to eliminate non-traitors; wins by parity.
    Traitor,
    /// No night ability; wins when no traitors remain alive.
    Faithful,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Unassigned => write!(f, "unassigned"),
            Role::Traitor => write!(f, "traitor"),
            Role::Faithful => write!(f, "faithful"),
        }
    }
}

/// A registered player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique identifier, allocated at registration.
    pub id: PlayerId,

    /// Display name, used in prompts and announcements.
    pub name: String,

    /// Email address, unique across the game. Inbound ballots are matched
    /// to players by this address.
    pub email: String,

    /// Secret role. `Unassigned` until the game starts.
    pub role: Role,

    /// Whether the player is still in the game.
    pub alive: bool,

    /// The round in which the player was eliminated.
    /// `Some` exactly when `alive` is false.
    pub eliminated_round: Option<u32>,
}

impl Player {
    /// Create a new, living, unassigned player.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role: Role::Unassigned,
            alive: true,
            eliminated_round: None,
        }
    }

    /// Check if this player is a living traitor.
    #[must_use]
    pub fn is_living_traitor(&self) -> bool {
        self.alive && self.role == Role::Traitor
    }
}
