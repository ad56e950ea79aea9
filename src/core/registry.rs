//! Player registry: the single owner of all player records.
//!
//! The registry is the only code allowed to mutate `role`, `alive`, and
//! `eliminated_round`, which is what upholds the record invariants:
//!
//! - emails are unique across the registry
//! - `eliminated_round` is `Some` exactly when `alive` is false
//! - eliminating an already-dead player is an error, never a silent no-op
//!
//! Registration order determines IDs (first player is 1). Players are
//! never removed except by `clear`, so IDs stay dense for the lifetime
//! of a game.

use serde::{Deserialize, Serialize};

use super::player::{Player, PlayerId, Role};
use crate::error::GameError;

/// Collection of all registered players, keyed by [`PlayerId`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PlayerRegistry {
    players: Vec<Player>,
    next_id: u32,
}

impl PlayerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            next_id: 1,
        }
    }

    /// Register a new player.
    ///
    /// Fails with [`GameError::DuplicateEmail`] if the email is already
    /// registered. The comparison is exact after trimming whitespace.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<PlayerId, GameError> {
        let email = email.into().trim().to_string();

        if self.players.iter().any(|p| p.email == email) {
            return Err(GameError::DuplicateEmail(email));
        }

        let id = PlayerId::new(self.next_id);
        self.next_id += 1;
        self.players.push(Player::new(id, name, email));
        Ok(id)
    }

    /// Get a player by ID.
    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Get a player by email address.
    #[must_use]
    pub fn get_by_email(&self, email: &str) -> Option<&Player> {
        let email = email.trim();
        self.players.iter().find(|p| p.email == email)
    }

    /// Iterate over all players in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Iterate over living players in registration order.
    pub fn alive(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.alive)
    }

    /// Players holding a given role, in registration order.
    pub fn by_role(&self, role: Role, alive_only: bool) -> impl Iterator<Item = &Player> + '_ {
        self.players
            .iter()
            .filter(move |p| p.role == role && (!alive_only || p.alive))
    }

    /// Number of living players with the given role.
    #[must_use]
    pub fn living_count(&self, role: Role) -> usize {
        self.by_role(role, true).count()
    }

    /// Set a player's role. Called once per player at game start.
    pub fn set_role(&mut self, id: PlayerId, role: Role) -> Result<(), GameError> {
        let player = self
            .players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(GameError::NotFound(id))?;
        player.role = role;
        Ok(())
    }

    /// Mark a player dead, recording the round of elimination.
    ///
    /// Eliminating an unknown or already-dead player is a caller error and
    /// is reported, never swallowed.
    pub fn eliminate(&mut self, id: PlayerId, round: u32) -> Result<(), GameError> {
        let player = self
            .players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(GameError::NotFound(id))?;

        if !player.alive {
            return Err(GameError::AlreadyEliminated(id));
        }

        player.alive = false;
        player.eliminated_round = Some(round);
        Ok(())
    }

    /// Total number of registered players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Remove every player and reset ID allocation. Full game reset only.
    pub fn clear(&mut self) {
        self.players.clear();
        self.next_id = 1;
    }
}
