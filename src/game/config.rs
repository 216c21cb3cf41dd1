use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use super::action::Direction;
use crate::error::ConfigError;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square, wrap-around board
    pub board_size: usize,
    /// Starting body, head first
    pub initial_snake: Vec<(i32, i32)>,
    /// Direction committed at the start of a session
    pub initial_direction: Direction,

    // Tick pacing
    /// Interval at score 0, in milliseconds
    pub base_interval_ms: u64,
    /// Interval never drops below this
    pub min_interval_ms: u64,
    /// How much faster each level gets
    pub interval_step_ms: u64,
    /// Points needed per speed level
    pub points_per_level: u32,

    // Power-ups
    /// Ticks a timed skill stays active
    pub skill_duration_ticks: u32,
    /// Foods on the board while multi-food is active
    pub multi_food_count: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 20,
            initial_snake: vec![(8, 10), (7, 10), (6, 10)],
            initial_direction: Direction::Right,
            base_interval_ms: 120,
            min_interval_ms: 40,
            interval_step_ms: 20,
            points_per_level: 10,
            skill_duration_ticks: 99,
            multi_food_count: 5,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom board size, centring the default snake
    pub fn new(board_size: usize) -> Self {
        let mid = (board_size / 2) as i32;
        Self {
            board_size,
            initial_snake: vec![(mid - 2, mid), (mid - 3, mid), (mid - 4, mid)],
            ..Default::default()
        }
    }

    /// Read a JSON configuration file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 {
            return Err(ConfigError::ZeroBoard);
        }
        if self.initial_snake.is_empty() {
            return Err(ConfigError::EmptySnake);
        }

        let size = self.board_size as i32;
        let mut seen = HashSet::new();
        for &(x, y) in &self.initial_snake {
            if !(0..size).contains(&x) || !(0..size).contains(&y) {
                return Err(ConfigError::CellOutOfBounds { x, y, size });
            }
            if !seen.insert((x, y)) {
                return Err(ConfigError::DuplicateCell { x, y });
            }
        }
        if self.initial_snake.len() >= self.board_size * self.board_size {
            return Err(ConfigError::NoRoomForFood);
        }

        if self.min_interval_ms > self.base_interval_ms {
            return Err(ConfigError::IntervalRange {
                min: self.min_interval_ms,
                base: self.base_interval_ms,
            });
        }
        if self.skill_duration_ticks == 0 {
            return Err(ConfigError::ZeroSkillDuration);
        }
        if self.multi_food_count == 0 {
            return Err(ConfigError::ZeroMultiFood);
        }
        if self.points_per_level == 0 {
            return Err(ConfigError::ZeroLevelSize);
        }
        Ok(())
    }
}
