use std::collections::{BTreeSet, HashSet};

use super::action::Direction;
use super::grid::{Cell, Grid};
use super::power_up::PowerUpManager;

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Cell>,
    /// Committed direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a snake from explicit cells, head first
    pub fn from_cells(body: Vec<Cell>, direction: Direction) -> Self {
        debug_assert!(!body.is_empty(), "snake needs at least one cell");
        Self { body, direction }
    }

    /// Create a straight snake trailing behind `head`, wrapping on the grid
    pub fn new(grid: &Grid, head: Cell, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        let (dx, dy) = direction.delta();
        for i in 1..length.max(1) {
            let prev = body[i - 1];
            body.push(grid.wrap(prev, (-dx, -dy)));
        }

        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// True if `candidate` lands on any current segment, tail included
    pub fn contains_self_collision(&self, candidate: Cell) -> bool {
        self.body.contains(&candidate)
    }

    /// Push a new head, keeping the tail only when growing
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    /// Keep the head-end `ceil(len / 2)` segments; a one-cell snake is untouched
    pub fn cut_in_half(&mut self) {
        if self.body.len() <= 1 {
            return;
        }
        let keep = self.body.len().div_ceil(2);
        self.body.truncate(keep);
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupied(&self) -> HashSet<Cell> {
        self.body.iter().copied().collect()
    }
}

/// Food currently on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Food {
    /// Normal mode
    Single(Cell),
    /// Multi-food mode, while the skill is active
    Multi(BTreeSet<Cell>),
}

impl Food {
    pub fn contains(&self, cell: Cell) -> bool {
        match self {
            Food::Single(food) => *food == cell,
            Food::Multi(foods) => foods.contains(&cell),
        }
    }

    pub fn cells(&self) -> Vec<Cell> {
        match self {
            Food::Single(food) => vec![*food],
            Food::Multi(foods) => foods.iter().copied().collect(),
        }
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, Food::Multi(_))
    }
}

/// Everything that belongs to one game, from start until restart
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub score: u32,
    pub ticks: u64,
    pub game_over: bool,
    pub power_ups: PowerUpManager,
    /// Turn accepted since the last tick, committed at the start of the next one
    pub pending_direction: Option<Direction>,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Food, skill_duration_ticks: u32) -> Self {
        Self {
            snake,
            food,
            score: 0,
            ticks: 0,
            game_over: false,
            power_ups: PowerUpManager::new(skill_duration_ticks),
            pending_direction: None,
        }
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, cell: Cell) -> bool {
        self.snake.body.contains(&cell)
    }
}
