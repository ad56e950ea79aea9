//! # traitors
//!
//! An engine for email-moderated games of The Traitors: a hidden-role
//! social deduction game where a small group of traitors eliminates
//! players by night and everyone votes to exile a suspect by day.
//!
//! The crate is the game core only. Transports are collaborator traits:
//! outbound messages go through [`Notifier`], inbound ballots arrive
//! through [`VoteSource`], and optional flavor text is produced by a
//! [`Narrator`] from a role-free [`NarrationSnapshot`]. A driver (CLI,
//! mail loop, test harness) owns the schedule and calls
//! [`Game::advance`] to move the state machine one phase at a time.
//!
//! ## Example
//!
//! ```
//! use traitors::{Game, GameConfig, NullNotifier, Phase};
//!
//! let mut game = Game::new(GameConfig::default(), 42);
//! for i in 1..=6 {
//!     game.add_player(format!("Player {i}"), format!("p{i}@example.com"))?;
//! }
//!
//! let mut notifier = NullNotifier;
//! game.start(&mut notifier)?;
//! game.advance(&mut notifier)?;
//! assert_eq!(game.state().phase, Phase::NightTraitorChat);
//! # Ok::<(), traitors::GameError>(())
//! ```

pub mod core;
pub mod engine;
pub mod error;
pub mod events;
pub mod inbound;
pub mod narration;
pub mod notify;
pub mod votes;

pub use self::core::{
    GameConfig, GameRng, GameState, Phase, Player, PlayerId, PlayerRegistry, Role, Winner,
};
pub use self::engine::{Game, StepReport};
pub use self::error::GameError;
pub use self::events::{Event, EventKind, EventLog};
pub use self::inbound::{InboundMessage, IngestReport, StaticVoteSource, VoteSource};
pub use self::narration::{NarrationSnapshot, Narrator, VoteStanding};
pub use self::notify::{Notifier, NullNotifier, Outbox, OutboundMessage};
pub use self::votes::{check_vote, Candidates, TallyEntry, TallyOutcome, Vote, VoteLedger};
