//! Power Snake - a wrap-around snake game with one-shot power-ups
//!
//! This library provides:
//! - The deterministic simulation engine (game module)
//! - Input mapping for keys, swipes and scripted replays (input module)
//! - A leaderboard interface with an in-memory implementation (leaderboard module)
//! - Session metrics and the clock-driven runner (metrics and modes modules)

pub mod error;
pub mod game;
pub mod input;
pub mod leaderboard;
pub mod metrics;
pub mod modes;

pub use error::{ConfigError, GameError};
