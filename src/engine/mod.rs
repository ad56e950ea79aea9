//! The game engine: lifecycle, phase advancement, roles, win evaluation.
//!
//! ## Key Types
//!
//! - `Game`: the driver-facing object owning all game data
//! - `StepReport`: what one `advance` call did
//! - `win::evaluate`: the pure win condition, also callable directly

pub mod advance;
pub mod game;
mod roles;
pub mod win;

pub use advance::StepReport;
pub use game::Game;
