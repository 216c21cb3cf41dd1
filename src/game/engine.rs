use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeSet;
use std::time::Duration;

use super::{
    action::{Action, Direction, Skill},
    collision::{CollisionResolver, SelfContact},
    config::GameConfig,
    food::FoodPlacer,
    grid::{Cell, Grid},
    snapshot::{GameSnapshot, SkillSnapshot},
    state::{Food, GameState, Snake},
};
use crate::error::GameError;

/// Information about a tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Points awarded this tick
    pub points: u32,
    /// The first self-collision switched ghost on instead of ending the game
    pub ghost_saved: bool,
    /// The score crossed into a new speed level
    pub leveled_up: bool,
    /// Skills whose active window ended on this tick
    pub expired: Vec<Skill>,
}

/// Result of a tick
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has ended
    pub terminated: bool,
    /// Additional information about the tick
    pub info: StepInfo,
}

/// The game engine: owns the session and is the only thing that mutates it
pub struct GameEngine<R: Rng = ChaCha8Rng> {
    config: GameConfig,
    grid: Grid,
    placer: FoodPlacer,
    state: GameState,
    rng: R,
}

impl GameEngine<ChaCha8Rng> {
    /// Create an engine whose sessions are reproducible from `seed`
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::new(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create a new engine and start the first session
    pub fn new(config: GameConfig, mut rng: R) -> Result<Self, GameError> {
        config.validate()?;
        let grid = Grid::new(config.board_size);
        let placer = FoodPlacer::new(grid);
        let state = Self::fresh_state(&config, &placer, &mut rng)?;

        Ok(Self {
            config,
            grid,
            placer,
            state,
            rng,
        })
    }

    /// Resume from an existing session, e.g. a hand-built position
    pub fn from_state(config: GameConfig, state: GameState, rng: R) -> Self {
        let grid = Grid::new(config.board_size);
        Self {
            placer: FoodPlacer::new(grid),
            config,
            grid,
            state,
            rng,
        }
    }

    fn fresh_state(
        config: &GameConfig,
        placer: &FoodPlacer,
        rng: &mut R,
    ) -> Result<GameState, GameError> {
        let body = config
            .initial_snake
            .iter()
            .map(|&cell| Cell::from(cell))
            .collect();
        let snake = Snake::from_cells(body, config.initial_direction);
        let food = placer.place_one(rng, &snake.occupied())?;

        Ok(GameState::new(
            snake,
            Food::Single(food),
            config.skill_duration_ticks,
        ))
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_game_over(&self) -> bool {
        self.state.game_over
    }

    /// Throw the current session away and start a new one
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.state = Self::fresh_state(&self.config, &self.placer, &mut self.rng)?;
        info!("Session restarted");
        Ok(())
    }

    /// Queue a turn for the next tick. Reversals, repeats of the current
    /// heading and a second turn within the same tick are ignored.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.state.game_over || self.state.pending_direction.is_some() {
            return false;
        }
        let current = self.state.snake.direction;
        if direction == current || current.is_opposite(direction) {
            return false;
        }
        self.state.pending_direction = Some(direction);
        true
    }

    /// Use a skill; false when it was already spent or cannot apply
    pub fn activate_skill(&mut self, skill: Skill) -> Result<bool, GameError> {
        if self.state.game_over {
            return Ok(false);
        }
        // A saturated board must leave the skill unused
        let multi_food = if skill == Skill::MultiFood && !self.state.power_ups.used_ever(skill) {
            Some(self.multi_food_set()?)
        } else {
            None
        };
        if !self.state.power_ups.activate(skill, &mut self.state.snake) {
            debug!("Skill {:?} not accepted", skill);
            return Ok(false);
        }

        if let Some(foods) = multi_food {
            self.state.food = Food::Multi(foods);
        }
        info!(
            "Skill {:?} activated at tick {} (length {})",
            skill,
            self.state.ticks,
            self.state.snake.len()
        );
        Ok(true)
    }

    /// Forward an input request to the matching operation
    pub fn apply(&mut self, action: Action) -> Result<bool, GameError> {
        match action {
            Action::Move(direction) => Ok(self.set_direction(direction)),
            Action::Activate(skill) => self.activate_skill(skill),
        }
    }

    /// Advance the simulation by one tick
    pub fn tick(&mut self) -> Result<StepResult, GameError> {
        if self.state.game_over {
            return Ok(StepResult {
                terminated: true,
                info: StepInfo::default(),
            });
        }

        let direction = self
            .state
            .pending_direction
            .take()
            .unwrap_or(self.state.snake.direction);
        let next_head = self.grid.step(self.state.snake.head(), direction);
        let resolution = CollisionResolver::resolve(
            &self.state.snake,
            next_head,
            &self.state.food,
            &self.state.power_ups,
        );

        let mut info = StepInfo::default();
        match resolution.contact {
            SelfContact::Fatal => {
                self.state.game_over = true;
                self.state.ticks += 1;
                info!(
                    "Game over at tick {} with score {} (length {})",
                    self.state.ticks,
                    self.state.score,
                    self.state.snake.len()
                );
                return Ok(StepResult {
                    terminated: true,
                    info,
                });
            }
            SelfContact::GhostSave => {
                let saved = self
                    .state
                    .power_ups
                    .activate(Skill::Ghost, &mut self.state.snake);
                debug_assert!(saved, "ghost save requires an unused ghost");
                info.ghost_saved = true;
                info!("Self-collision at tick {}, ghost activated", self.state.ticks);
            }
            SelfContact::PassThrough | SelfContact::Clear => {}
        }

        self.state.snake.direction = direction;
        self.state.snake.advance(next_head, resolution.grows());

        if let Some(hit) = resolution.food {
            let level_before = self.level();
            self.state.score += hit.points;
            info.ate_food = true;
            info.points = hit.points;
            info.leveled_up = self.level() > level_before;
            self.replace_food(hit.cell)?;

            if info.leveled_up {
                info!("Reached level {} with score {}", self.level(), self.state.score);
            }
        }

        info.expired = self.state.power_ups.on_tick();
        if info.expired.contains(&Skill::MultiFood) {
            self.leave_multi_food()?;
        }
        for skill in &info.expired {
            debug!("Skill {:?} expired", skill);
        }

        self.state.ticks += 1;
        debug!(
            "Tick {}: head ({}, {}), score {}",
            self.state.ticks, next_head.x, next_head.y, self.state.score
        );

        Ok(StepResult {
            terminated: false,
            info,
        })
    }

    /// Speed level derived from the score
    pub fn level(&self) -> u32 {
        self.state
            .score
            .checked_div(self.config.points_per_level)
            .unwrap_or(0)
    }

    /// How long the clock should wait before the next tick
    pub fn tick_interval(&self) -> Duration {
        let speedup = self.config.interval_step_ms * u64::from(self.level());
        let base = self
            .config
            .base_interval_ms
            .saturating_sub(speedup)
            .max(self.config.min_interval_ms);
        Duration::from_millis(base * u64::from(self.state.power_ups.interval_factor()))
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            tick: self.state.ticks,
            snake: self.state.snake.body.clone(),
            direction: self.state.snake.direction,
            foods: self.state.food.cells(),
            score: self.state.score,
            level: self.level(),
            game_over: self.state.game_over,
            interval_ms: self.tick_interval().as_millis() as u64,
            power_ups: self
                .state
                .power_ups
                .iter()
                .map(|(skill, state)| SkillSnapshot {
                    skill,
                    phase: state.phase(),
                    state,
                })
                .collect(),
        }
    }

    /// Swap an eaten food for a fresh one
    fn replace_food(&mut self, eaten: Cell) -> Result<(), GameError> {
        let mut occupied = self.state.snake.occupied();
        match &mut self.state.food {
            Food::Single(food) => {
                *food = self.placer.place_one(&mut self.rng, &occupied)?;
            }
            Food::Multi(foods) => {
                foods.remove(&eaten);
                occupied.extend(foods.iter().copied());
                let fresh = self.placer.place_one(&mut self.rng, &occupied)?;
                foods.insert(fresh);
            }
        }
        Ok(())
    }

    /// The current food topped up to the multi-food count
    fn multi_food_set(&mut self) -> Result<BTreeSet<Cell>, GameError> {
        let mut foods: BTreeSet<Cell> = self.state.food.cells().into_iter().collect();
        let mut occupied = self.state.snake.occupied();
        occupied.extend(foods.iter().copied());

        let missing = self.config.multi_food_count.saturating_sub(foods.len());
        foods.extend(self.placer.place_many(&mut self.rng, &occupied, missing)?);
        Ok(foods)
    }

    fn leave_multi_food(&mut self) -> Result<(), GameError> {
        let fresh = self.placer.place_one(&mut self.rng, &self.state.snake.occupied())?;
        self.state.food = Food::Single(fresh);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    fn engine() -> GameEngine {
        GameEngine::with_seed(GameConfig::default(), 7).unwrap()
    }

    /// Put the food directly in front of the head
    fn feed(engine: &mut GameEngine) {
        let grid = engine.grid;
        let head = engine.state.snake.head();
        engine.state.food = Food::Single(grid.step(head, engine.state.snake.direction));
    }

    /// Move the food somewhere the snake will not reach soon
    fn park_food(engine: &mut GameEngine) {
        engine.state.food = Food::Single(Cell::new(0, 0));
    }

    /// A snake whose next step to the left bites its own body
    fn coiled_state() -> GameState {
        // Head (5,5) moving Down, body wraps around so that Left hits (4,5)
        let body = vec![
            Cell::new(5, 5),
            Cell::new(5, 4),
            Cell::new(4, 4),
            Cell::new(3, 4),
            Cell::new(3, 5),
            Cell::new(4, 5),
            Cell::new(4, 6),
        ];
        let snake = Snake::from_cells(body, Direction::Down);
        GameState::new(snake, Food::Single(Cell::new(15, 15)), 99)
    }

    #[test]
    fn test_initial_session() {
        let engine = engine();
        let state = engine.state();

        assert!(!state.game_over);
        assert_eq!(state.score, 0);
        assert_eq!(state.ticks, 0);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.snake.head(), Cell::new(8, 10));
        assert_eq!(state.snake.direction, Direction::Right);
        assert!(!state.is_occupied_by_snake(state.food.cells()[0]));
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = engine();
        park_food(&mut engine);

        let result = engine.tick().unwrap();

        assert!(!result.terminated);
        assert!(!result.info.ate_food);
        assert_eq!(engine.state.ticks, 1);
        assert_eq!(engine.state.snake.head(), Cell::new(9, 10));
        assert_eq!(engine.state.snake.len(), 3);
    }

    #[test]
    fn test_wraps_across_edge() {
        let mut engine = engine();
        park_food(&mut engine);
        engine.state.snake = Snake::from_cells(vec![Cell::new(19, 3)], Direction::Right);

        engine.tick().unwrap();
        assert_eq!(engine.state.snake.head(), Cell::new(0, 3));
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = engine();
        feed(&mut engine);

        let result = engine.tick().unwrap();

        assert!(result.info.ate_food);
        assert_eq!(result.info.points, 1);
        assert_eq!(engine.state.score, 1);
        assert_eq!(engine.state.snake.len(), 4);
        let food = engine.state.food.cells()[0];
        assert!(!engine.state.is_occupied_by_snake(food));
    }

    #[test]
    fn test_double_points() {
        let mut engine = engine();
        assert!(engine.activate_skill(Skill::Double).unwrap());
        feed(&mut engine);

        engine.tick().unwrap();
        assert_eq!(engine.state.score, 2);
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = engine();

        assert!(!engine.set_direction(Direction::Left));
        engine.tick().unwrap();

        assert_eq!(engine.state.snake.direction, Direction::Right);
    }

    #[test]
    fn test_one_turn_per_tick() {
        let mut engine = engine();
        park_food(&mut engine);

        assert!(engine.set_direction(Direction::Up));
        // Would be legal after Up commits, but only one turn per tick
        assert!(!engine.set_direction(Direction::Left));
        engine.tick().unwrap();
        assert_eq!(engine.state.snake.direction, Direction::Up);

        assert!(engine.set_direction(Direction::Left));
        engine.tick().unwrap();
        assert_eq!(engine.state.snake.direction, Direction::Left);
    }

    #[test]
    fn test_same_direction_keeps_turn_slot() {
        let mut engine = engine();
        park_food(&mut engine);

        // Already heading right: the repeat is dropped and Up still gets through
        assert!(!engine.set_direction(Direction::Right));
        assert!(engine.set_direction(Direction::Up));
        engine.tick().unwrap();
        assert_eq!(engine.state.snake.direction, Direction::Up);
    }

    #[test]
    fn test_reversal_checked_against_committed_direction() {
        let mut engine = engine();
        park_food(&mut engine);

        assert!(engine.set_direction(Direction::Up));
        engine.tick().unwrap();
        assert!(!engine.set_direction(Direction::Down));
    }

    #[test]
    fn test_first_self_collision_is_saved_by_ghost() {
        let mut engine = GameEngine::from_state(
            GameConfig::default(),
            coiled_state(),
            ChaCha8Rng::seed_from_u64(1),
        );

        assert!(engine.set_direction(Direction::Left));
        let result = engine.tick().unwrap();

        assert!(!result.terminated);
        assert!(result.info.ghost_saved);
        assert!(!engine.state.game_over);
        assert!(engine.state.power_ups.is_active(Skill::Ghost));
        assert_eq!(engine.state.snake.head(), Cell::new(4, 5));
        assert!(!engine.activate_skill(Skill::Ghost).unwrap());
    }

    #[test]
    fn test_self_collision_after_ghost_spent_ends_game() {
        let mut state = coiled_state();
        state.power_ups.activate(Skill::Ghost, &mut state.snake);
        for _ in 0..99 {
            state.power_ups.on_tick();
        }
        let rng = ChaCha8Rng::seed_from_u64(1);
        let mut engine = GameEngine::from_state(GameConfig::default(), state, rng);
        let before = engine.state.snake.clone();

        engine.set_direction(Direction::Left);
        let result = engine.tick().unwrap();

        assert!(result.terminated);
        assert!(engine.is_game_over());
        // The fatal turn is not committed
        assert_eq!(engine.state.snake, before);
        assert_eq!(engine.state.snake.direction, Direction::Down);
        assert_eq!(engine.state.pending_direction, None);

        // Terminated games ignore further input
        let ticks = engine.state.ticks;
        assert!(engine.tick().unwrap().terminated);
        assert_eq!(engine.state.ticks, ticks);
        assert!(!engine.set_direction(Direction::Up));
        assert!(!engine.activate_skill(Skill::Slow).unwrap());
    }

    #[test]
    fn test_manual_ghost_passes_through() {
        let mut engine = GameEngine::from_state(
            GameConfig::default(),
            coiled_state(),
            ChaCha8Rng::seed_from_u64(1),
        );
        assert!(engine.activate_skill(Skill::Ghost).unwrap());

        engine.set_direction(Direction::Left);
        let result = engine.tick().unwrap();

        assert!(!result.terminated);
        assert!(!result.info.ghost_saved);
        assert_eq!(engine.state.snake.head(), Cell::new(4, 5));
    }

    #[test]
    fn test_tick_interval_follows_score() {
        let mut engine = engine();
        assert_eq!(engine.tick_interval(), Duration::from_millis(120));

        engine.state.score = 25;
        assert_eq!(engine.tick_interval(), Duration::from_millis(80));

        engine.state.score = 1000;
        assert_eq!(engine.tick_interval(), Duration::from_millis(40));
    }

    #[test]
    fn test_slow_doubles_interval() {
        let mut engine = engine();
        engine.state.score = 25;
        engine.activate_skill(Skill::Slow).unwrap();

        assert_eq!(engine.tick_interval(), Duration::from_millis(160));
        assert_eq!(engine.snapshot().interval_ms, 160);
    }

    #[test]
    fn test_level_up_reported() {
        let mut engine = engine();
        engine.state.score = 9;
        feed(&mut engine);

        let result = engine.tick().unwrap();
        assert!(result.info.leveled_up);
        assert_eq!(engine.level(), 1);
    }

    #[test]
    fn test_multi_food_lifecycle() {
        let mut engine = engine();
        // One-cell snake running along row 0 can never bite itself
        engine.state.snake = Snake::from_cells(vec![Cell::new(0, 0)], Direction::Right);
        engine.state.food = Food::Single(Cell::new(0, 19));

        assert!(engine.activate_skill(Skill::MultiFood).unwrap());
        let foods = engine.state.food.cells();
        assert_eq!(foods.len(), 5);
        assert!(foods.contains(&Cell::new(0, 19)));
        assert!(foods.iter().all(|c| !engine.state.is_occupied_by_snake(*c)));

        let mut expired_at = None;
        for _ in 0..99 {
            let result = engine.tick().unwrap();
            assert!(!result.terminated);
            if result.info.expired.contains(&Skill::MultiFood) {
                expired_at = Some(engine.state.ticks);
            }
        }

        assert_eq!(expired_at, Some(99));
        assert!(!engine.state.food.is_multi());
        assert_eq!(engine.state.food.cells().len(), 1);
    }

    #[test]
    fn test_cut_skill() {
        let mut engine = engine();
        engine.state.snake = Snake::new(&engine.grid, Cell::new(10, 10), Direction::Right, 7);

        assert!(engine.activate_skill(Skill::Cut).unwrap());
        assert_eq!(engine.state.snake.len(), 4);
        assert!(!engine.activate_skill(Skill::Cut).unwrap());
    }

    #[test]
    fn test_restart_discards_session() {
        let mut engine = engine();
        engine.activate_skill(Skill::Slow).unwrap();
        engine.set_direction(Direction::Up);
        engine.state.score = 12;
        engine.state.game_over = true;

        engine.restart().unwrap();

        assert!(!engine.is_game_over());
        assert_eq!(engine.state.score, 0);
        assert_eq!(engine.state.pending_direction, None);
        assert!(!engine.state.power_ups.used_ever(Skill::Slow));
        assert_eq!(engine.state.snake.len(), 3);
    }

    /// 2x2 board with one free cell at (0, 1) holding the food
    fn crowded_engine() -> GameEngine {
        let config = GameConfig {
            board_size: 2,
            initial_snake: vec![(0, 0), (1, 0), (1, 1)],
            initial_direction: Direction::Down,
            ..Default::default()
        };
        let snake = Snake::from_cells(
            vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1)],
            Direction::Down,
        );
        let state = GameState::new(snake, Food::Single(Cell::new(0, 1)), 99);
        GameEngine::from_state(config, state, ChaCha8Rng::seed_from_u64(3))
    }

    #[test]
    fn test_eating_last_free_cell_saturates_board() {
        let mut engine = crowded_engine();

        assert_eq!(
            engine.tick(),
            Err(GameError::BoardSaturated {
                occupied: 4,
                capacity: 4
            })
        );
    }

    #[test]
    fn test_failed_multi_food_leaves_skill_unused() {
        let mut engine = crowded_engine();

        assert!(matches!(
            engine.activate_skill(Skill::MultiFood),
            Err(GameError::BoardSaturated { .. })
        ));
        assert!(!engine.state.power_ups.used_ever(Skill::MultiFood));
        assert_eq!(engine.state.food, Food::Single(Cell::new(0, 1)));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GameConfig {
            points_per_level: 0,
            ..Default::default()
        };

        assert_eq!(
            GameEngine::with_seed(config, 7).err(),
            Some(GameError::Config(ConfigError::ZeroLevelSize))
        );
    }

    #[test]
    fn test_zero_level_size_from_state_does_not_panic() {
        let config = GameConfig {
            points_per_level: 0,
            ..Default::default()
        };
        let mut state = coiled_state();
        state.score = 30;
        let engine = GameEngine::from_state(config, state, ChaCha8Rng::seed_from_u64(1));

        assert_eq!(engine.level(), 0);
        assert_eq!(engine.tick_interval(), Duration::from_millis(120));
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut engine = engine();
        engine.activate_skill(Skill::Ghost).unwrap();
        let snapshot = engine.snapshot();

        assert_eq!(snapshot.snake.len(), 3);
        assert_eq!(snapshot.foods.len(), 1);
        assert_eq!(snapshot.power_ups.len(), 5);
        assert!(snapshot.skill(Skill::Ghost).unwrap().state.active);
        assert!(!snapshot.skill(Skill::Slow).unwrap().state.used_ever);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["score"], 0);
        assert_eq!(json["direction"], "right");
    }
}
