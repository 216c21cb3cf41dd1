use thiserror::Error;

/// Fatal failures raised by the simulation engine.
///
/// Everything a player can do wrong (reversing, re-using a skill, cutting a
/// one-cell snake) degrades to a no-op instead of surfacing here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("board saturated: {occupied} of {capacity} cells occupied, no room for food")]
    BoardSaturated { occupied: usize, capacity: usize },
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
}

/// Problems found while validating a [`crate::game::GameConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board_size must be non-zero")]
    ZeroBoard,
    #[error("initial snake must contain at least one cell")]
    EmptySnake,
    #[error("initial snake cell ({x}, {y}) lies outside a {size}x{size} board")]
    CellOutOfBounds { x: i32, y: i32, size: i32 },
    #[error("initial snake visits ({x}, {y}) more than once")]
    DuplicateCell { x: i32, y: i32 },
    #[error("initial snake fills the whole board, leaving no room for food")]
    NoRoomForFood,
    #[error("min_interval_ms {min} exceeds base_interval_ms {base}")]
    IntervalRange { min: u64, base: u64 },
    #[error("skill_duration_ticks must be non-zero")]
    ZeroSkillDuration,
    #[error("multi_food_count must be non-zero")]
    ZeroMultiFood,
    #[error("points_per_level must be non-zero")]
    ZeroLevelSize,
}
