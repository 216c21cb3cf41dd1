use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Square toroidal board: leaving one edge re-enters on the opposite one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    size: i32,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self { size: size as i32 }
    }

    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Total number of cells
    pub fn capacity(&self) -> usize {
        self.size() * self.size()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.size).contains(&cell.x) && (0..self.size).contains(&cell.y)
    }

    /// Offset a cell by (dx, dy), wrapping with a floored modulo so negative
    /// sums land on the far edge
    pub fn wrap(&self, cell: Cell, (dx, dy): (i32, i32)) -> Cell {
        Cell::new(
            (cell.x + dx).rem_euclid(self.size),
            (cell.y + dy).rem_euclid(self.size),
        )
    }

    /// The neighbouring cell in a direction
    pub fn step(&self, cell: Cell, direction: Direction) -> Cell {
        self.wrap(cell, direction.delta())
    }

    /// Cell at a row-major index, used for uniform sampling
    pub(crate) fn cell_at(&self, index: usize) -> Cell {
        let index = index as i32;
        Cell::new(index % self.size, index / self.size)
    }
}
