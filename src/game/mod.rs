//! Core simulation for the snake game
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The engine is driven by an external clock calling [`GameEngine::tick`] and by
//! input requests queued between ticks.

pub mod action;
pub mod collision;
pub mod config;
pub mod engine;
pub mod food;
pub mod grid;
pub mod power_up;
pub mod snapshot;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction, Skill};
pub use collision::{CollisionResolver, FoodHit, Resolution, SelfContact};
pub use config::GameConfig;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use food::FoodPlacer;
pub use grid::{Cell, Grid};
pub use power_up::{PowerUpManager, PowerUpState, SkillPhase};
pub use snapshot::{GameSnapshot, SkillSnapshot};
pub use state::{Food, GameState, Snake};
