//! Core engine types: players, RNG, configuration, errors, shared state.
//!
//! Everything else in the crate builds on these.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use config::RulesConfig;
pub use error::{ConfigError, PlayError, TargetError};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use state::GameState;
