//! The driver-facing game object.
//!
//! [`Game`] owns the registry, the vote ledger, the event log, and the
//! state record; every mutation goes through it. Notification and ballot
//! transport stay outside, behind the [`Notifier`] and
//! [`VoteSource`](crate::inbound::VoteSource) traits, so the same engine
//! runs under an email driver, a CLI, or a test harness.

use tracing::{debug, info, warn};

use crate::core::{GameConfig, GameRng, GameState, Phase, PlayerId, PlayerRegistry};
use crate::error::GameError;
use crate::events::{EventKind, EventLog};
use crate::inbound::{self, InboundMessage, IngestReport, VoteSource};
use crate::notify::{messages, Notifier};
use crate::votes::{check_vote, VoteLedger};

use super::roles;

/// One running (or not yet started) game.
#[derive(Clone, Debug)]
pub struct Game {
    pub(crate) config: GameConfig,
    pub(crate) registry: PlayerRegistry,
    pub(crate) ledger: VoteLedger,
    pub(crate) events: EventLog,
    pub(crate) state: GameState,
    pub(crate) rng: GameRng,
}

impl Game {
    /// Create a game with the given rules and RNG seed.
    ///
    /// The seed fixes the role deal: the same seed and registration order
    /// always produce the same roles.
    #[must_use]
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            registry: PlayerRegistry::new(),
            ledger: VoteLedger::new(),
            events: EventLog::new(),
            state: GameState::new(),
            rng: GameRng::new(seed),
        }
    }

    /// Register a player. Only possible before the game starts.
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<PlayerId, GameError> {
        if self.state.started {
            return Err(GameError::AlreadyStarted);
        }
        self.registry.add(name, email)
    }

    /// Start the game: check the player count, deal roles, announce.
    ///
    /// Fails when already running or when the registered player count is
    /// outside the configured bounds.
    pub fn start(&mut self, notifier: &mut dyn Notifier) -> Result<(), GameError> {
        if self.state.started && !self.state.finished {
            return Err(GameError::AlreadyStarted);
        }

        let have = self.registry.len();
        if have < self.config.min_players {
            return Err(GameError::NotEnoughPlayers {
                have,
                need: self.config.min_players,
            });
        }
        if have > self.config.max_players {
            return Err(GameError::TooManyPlayers {
                have,
                max: self.config.max_players,
            });
        }

        self.state.begin();
        info!(players = have, "game started");

        for player in self.registry.iter() {
            notifier.send(&player.email, messages::game_start());
        }
        self.events.append(
            1,
            Phase::Init,
            EventKind::GameStarted,
            format!("game started with {have} players"),
        );

        roles::assign(
            &mut self.registry,
            &self.config,
            &mut self.rng,
            &mut self.events,
            notifier,
        )
    }

    /// Record a vote after running it through the eligibility gate.
    pub fn cast_vote(&mut self, voter: PlayerId, target: PlayerId) -> Result<(), GameError> {
        check_vote(
            &self.registry,
            &self.ledger,
            &self.state,
            &self.config,
            voter,
            target,
        )?;

        self.ledger
            .cast(voter, target, self.state.round, self.state.phase);
        debug!(%voter, %target, phase = %self.state.phase, "vote recorded");
        Ok(())
    }

    /// Drain a batch of inbound ballots into the ledger.
    ///
    /// Each entry is parsed, resolved to a registered player, and checked
    /// against the same eligibility gate as [`cast_vote`](Self::cast_vote).
    /// Bad entries are dropped with a warning; the batch always runs to
    /// completion.
    pub fn ingest_votes(&mut self, source: &mut dyn VoteSource) -> IngestReport {
        let mut report = IngestReport::default();
        for message in source.poll() {
            match self.ingest_one(&message) {
                Ok(()) => report.accepted += 1,
                Err(err) => {
                    warn!(sender = %message.sender, %err, "dropping inbound ballot");
                    report.rejected += 1;
                }
            }
        }
        report
    }

    fn ingest_one(&mut self, message: &InboundMessage) -> Result<(), GameError> {
        let address = inbound::sender_address(&message.sender);
        let voter = self
            .registry
            .get_by_email(address)
            .map(|p| p.id)
            .ok_or_else(|| GameError::ParseFailure(format!("unknown sender {address}")))?;
        let target = inbound::parse_target(&message.body)?;
        self.cast_vote(voter, target)
    }

    /// Wipe everything back to an empty, unstarted game. The configuration
    /// is kept.
    pub fn reset(&mut self) {
        self.registry.clear();
        self.ledger.clear();
        self.events.clear();
        self.state = GameState::new();
        info!("game reset");
    }

    /// Current round, phase, and lifecycle flags.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The rules this game runs under.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The player registry.
    #[must_use]
    pub fn registry(&self) -> &PlayerRegistry {
        &self.registry
    }

    /// The vote ledger.
    #[must_use]
    pub fn ledger(&self) -> &VoteLedger {
        &self.ledger
    }

    /// The event log.
    #[must_use]
    pub fn events(&self) -> &EventLog {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Role;
    use crate::inbound::StaticVoteSource;
    use crate::notify::{NullNotifier, Outbox};

    fn game_of(n: u32) -> Game {
        let mut game = Game::new(GameConfig::default(), 7);
        for i in 1..=n {
            game.add_player(format!("P{i}"), format!("p{i}@x.com")).unwrap();
        }
        game
    }

    #[test]
    fn test_start_requires_enough_players() {
        let mut game = game_of(5);
        let err = game.start(&mut NullNotifier).unwrap_err();
        assert_eq!(err, GameError::NotEnoughPlayers { have: 5, need: 6 });
        assert!(!game.state().started);
    }

    #[test]
    fn test_start_rejects_too_many_players() {
        let mut game = game_of(21);
        let err = game.start(&mut NullNotifier).unwrap_err();
        assert_eq!(err, GameError::TooManyPlayers { have: 21, max: 20 });
    }

    #[test]
    fn test_start_assigns_roles_and_announces() {
        let mut game = game_of(6);
        let mut outbox = Outbox::new();

        game.start(&mut outbox).unwrap();

        assert!(game.state().started);
        assert_eq!(game.registry().living_count(Role::Traitor), 2);
        // One announcement plus one role message per player
        assert_eq!(outbox.len(), 12);
    }

    #[test]
    fn test_no_registration_after_start() {
        let mut game = game_of(6);
        game.start(&mut NullNotifier).unwrap();

        let err = game.add_player("Late", "late@x.com").unwrap_err();
        assert_eq!(err, GameError::AlreadyStarted);
    }

    #[test]
    fn test_double_start_rejected() {
        let mut game = game_of(6);
        game.start(&mut NullNotifier).unwrap();

        assert_eq!(
            game.start(&mut NullNotifier).unwrap_err(),
            GameError::AlreadyStarted
        );
    }

    #[test]
    fn test_cast_vote_outside_voting_phase() {
        let mut game = game_of(6);
        game.start(&mut NullNotifier).unwrap();

        let err = game
            .cast_vote(PlayerId::new(1), PlayerId::new(2))
            .unwrap_err();
        assert_eq!(err, GameError::NotVotingPhase(Phase::Init));
    }

    #[test]
    fn test_ingest_counts_accepted_and_rejected() {
        let mut game = game_of(6);
        game.start(&mut NullNotifier).unwrap();
        // Advance to DayVote so everyone may vote
        game.advance(&mut NullNotifier).unwrap(); // night chat
        game.advance(&mut NullNotifier).unwrap(); // night vote
        game.advance(&mut NullNotifier).unwrap(); // quiet night
        game.advance(&mut NullNotifier).unwrap(); // discussion
        game.advance(&mut NullNotifier).unwrap(); // day vote

        let mut source = StaticVoteSource::new();
        source.push("p1@x.com", "I vote for 3");
        source.push("P2 <p2@x.com>", "3");
        source.push("stranger@x.com", "3");
        source.push("p4@x.com", "no number");

        let report = game.ingest_votes(&mut source);
        assert_eq!(report.accepted, 2);
        assert_eq!(report.rejected, 2);
        assert_eq!(game.ledger().votes_for(1, Phase::DayVote).len(), 2);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut game = game_of(6);
        game.start(&mut NullNotifier).unwrap();

        game.reset();

        assert!(!game.state().started);
        assert!(game.registry().is_empty());
        assert!(game.ledger().is_empty());
        assert!(game.events().is_empty());
        assert!(game.add_player("Again", "again@x.com").is_ok());
    }
}
