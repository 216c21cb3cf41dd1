use rand::Rng;
use std::collections::{BTreeSet, HashSet};

use super::grid::{Cell, Grid};
use crate::error::GameError;

/// Rejection-sampling attempts before falling back to enumerating free cells.
const MAX_SAMPLES: usize = 4096;

/// Places food on cells the snake does not occupy
#[derive(Debug, Clone, Copy)]
pub struct FoodPlacer {
    grid: Grid,
}

impl FoodPlacer {
    pub fn new(grid: Grid) -> Self {
        Self { grid }
    }

    /// Pick a uniformly random free cell
    pub fn place_one<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        occupied: &HashSet<Cell>,
    ) -> Result<Cell, GameError> {
        let capacity = self.grid.capacity();
        let taken = occupied.iter().filter(|c| self.grid.contains(**c)).count();
        if taken >= capacity {
            return Err(GameError::BoardSaturated {
                occupied: taken,
                capacity,
            });
        }

        for _ in 0..MAX_SAMPLES {
            let cell = self.grid.cell_at(rng.gen_range(0..capacity));
            if !occupied.contains(&cell) {
                return Ok(cell);
            }
        }

        // Nearly full board: pick among the free cells directly
        let free: Vec<Cell> = (0..capacity)
            .map(|i| self.grid.cell_at(i))
            .filter(|c| !occupied.contains(c))
            .collect();
        Ok(free[rng.gen_range(0..free.len())])
    }

    /// Place `count` foods, none on `occupied` and none on each other
    pub fn place_many<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        occupied: &HashSet<Cell>,
        count: usize,
    ) -> Result<BTreeSet<Cell>, GameError> {
        let mut taken = occupied.clone();
        let mut foods = BTreeSet::new();
        for _ in 0..count {
            let cell = self.place_one(rng, &taken)?;
            taken.insert(cell);
            foods.insert(cell);
        }
        Ok(foods)
    }
}
