//! Core types: players, the registry, game state, configuration, RNG.
//!
//! Everything here is a plain data structure with validated mutation
//! paths; game sequencing lives in `engine`.

pub mod config;
pub mod player;
pub mod registry;
pub mod rng;
pub mod state;

pub use config::GameConfig;
pub use player::{Player, PlayerId, Role};
pub use registry::PlayerRegistry;
pub use rng::GameRng;
pub use state::{GameState, Phase, Winner};
