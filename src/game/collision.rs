use super::action::Skill;
use super::grid::Cell;
use super::power_up::PowerUpManager;
use super::state::{Food, Snake};

/// What happens when the next head lands on the snake itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfContact {
    /// Head lands on a free cell
    Clear,
    /// Ghost is active, the head passes through
    PassThrough,
    /// First ever self-hit: ghost must be switched on instead of ending the game
    GhostSave,
    /// Ghost already spent, the game ends
    Fatal,
}

/// Food eaten by the next head
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodHit {
    pub cell: Cell,
    pub points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub contact: SelfContact,
    /// Always `None` when `contact` is `Fatal`
    pub food: Option<FoodHit>,
}

impl Resolution {
    pub fn grows(&self) -> bool {
        self.food.is_some()
    }
}

/// Decides the outcome of moving the head to `next_head` without touching any state
pub struct CollisionResolver;

impl CollisionResolver {
    pub fn resolve(
        snake: &Snake,
        next_head: Cell,
        food: &Food,
        power_ups: &PowerUpManager,
    ) -> Resolution {
        let contact = if !snake.contains_self_collision(next_head) {
            SelfContact::Clear
        } else if power_ups.is_active(Skill::Ghost) {
            SelfContact::PassThrough
        } else if !power_ups.used_ever(Skill::Ghost) {
            SelfContact::GhostSave
        } else {
            SelfContact::Fatal
        };

        let food = match contact {
            SelfContact::Fatal => None,
            _ if food.contains(next_head) => Some(FoodHit {
                cell: next_head,
                points: power_ups.points_per_food(),
            }),
            _ => None,
        };

        Resolution { contact, food }
    }
}
