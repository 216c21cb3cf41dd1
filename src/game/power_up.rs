//! One-shot power-ups
//!
//! Each [`Skill`] can be used once per session. Timed skills stay active for a
//! fixed number of ticks and then expire for good; `Cut` applies immediately
//! and has no active phase.

use serde::Serialize;

use super::action::Skill;
use super::state::Snake;

/// Lifecycle record for one skill
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PowerUpState {
    pub used_ever: bool,
    pub active: bool,
    pub ticks_elapsed: u32,
}

/// Where a skill is in its `Unused -> Active -> Expired` lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillPhase {
    Unused,
    Active,
    /// Used up; for `Cut` this is reached right away
    Expired,
}

impl PowerUpState {
    pub fn phase(&self) -> SkillPhase {
        match (self.used_ever, self.active) {
            (false, _) => SkillPhase::Unused,
            (true, true) => SkillPhase::Active,
            (true, false) => SkillPhase::Expired,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PowerUpManager {
    states: [PowerUpState; 5],
    duration: u32,
}

impl PowerUpManager {
    pub fn new(duration: u32) -> Self {
        Self {
            states: [PowerUpState::default(); 5],
            duration,
        }
    }

    pub fn state(&self, skill: Skill) -> PowerUpState {
        self.states[skill.index()]
    }

    pub fn is_active(&self, skill: Skill) -> bool {
        self.states[skill.index()].active
    }

    pub fn used_ever(&self, skill: Skill) -> bool {
        self.states[skill.index()].used_ever
    }

    /// Try to use a skill. Returns false, changing nothing, when the skill was
    /// already spent or when cutting a one-cell snake.
    pub fn activate(&mut self, skill: Skill, snake: &mut Snake) -> bool {
        let state = &mut self.states[skill.index()];
        if state.used_ever {
            return false;
        }
        if skill == Skill::Cut && snake.len() <= 1 {
            return false;
        }

        state.used_ever = true;
        state.active = skill.is_timed();
        state.ticks_elapsed = 0;

        if skill == Skill::Cut {
            snake.cut_in_half();
        }
        true
    }

    /// Advance every active countdown by one tick and return the skills that
    /// expired on this tick
    pub fn on_tick(&mut self) -> Vec<Skill> {
        let mut expired = Vec::new();
        for skill in Skill::ALL {
            let state = &mut self.states[skill.index()];
            if !state.active {
                continue;
            }
            state.ticks_elapsed += 1;
            if state.ticks_elapsed >= self.duration {
                state.active = false;
                expired.push(skill);
            }
        }
        expired
    }

    /// Interval multiplier contributed by active skills
    pub fn interval_factor(&self) -> u32 {
        if self.is_active(Skill::Slow) {
            2
        } else {
            1
        }
    }

    /// Points a single food is worth right now
    pub fn points_per_food(&self) -> u32 {
        if self.is_active(Skill::Double) {
            2
        } else {
            1
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Skill, PowerUpState)> + '_ {
        Skill::ALL.into_iter().map(|skill| (skill, self.state(skill)))
    }
}
