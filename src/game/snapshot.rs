use serde::Serialize;

use super::action::{Direction, Skill};
use super::grid::Cell;
use super::power_up::{PowerUpState, SkillPhase};

/// Read-only view of a session handed to the render sink after every tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub tick: u64,
    pub snake: Vec<Cell>,
    pub direction: Direction,
    pub foods: Vec<Cell>,
    pub score: u32,
    pub level: u32,
    pub game_over: bool,
    pub interval_ms: u64,
    pub power_ups: Vec<SkillSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkillSnapshot {
    pub skill: Skill,
    pub phase: SkillPhase,
    #[serde(flatten)]
    pub state: PowerUpState,
}

impl GameSnapshot {
    pub fn skill(&self, skill: Skill) -> Option<&SkillSnapshot> {
        self.power_ups.iter().find(|s| s.skill == skill)
    }
}
