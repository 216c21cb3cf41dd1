use serde::{Deserialize, Serialize};

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// One-shot power-ups a player can trigger once per session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    /// Doubles the tick interval
    Slow,
    /// Each food is worth two points
    Double,
    /// The head passes through the body
    Ghost,
    /// Several foods are on the board at once
    MultiFood,
    /// Halves the snake, instantly
    Cut,
}

impl Skill {
    pub const ALL: [Skill; 5] = [
        Skill::Slow,
        Skill::Double,
        Skill::Ghost,
        Skill::MultiFood,
        Skill::Cut,
    ];

    /// Whether the skill has a countdown or applies once and is done
    pub fn is_timed(&self) -> bool {
        !matches!(self, Skill::Cut)
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Skill::Slow => 0,
            Skill::Double => 1,
            Skill::Ghost => 2,
            Skill::MultiFood => 3,
            Skill::Cut => 4,
        }
    }
}

/// Request an input source can send to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Queue a turn for the next tick
    Move(Direction),
    /// Trigger a power-up
    Activate(Skill),
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        Action::Move(direction)
    }
}

impl From<Skill> for Action {
    fn from(skill: Skill) -> Self {
        Action::Activate(skill)
    }
}
