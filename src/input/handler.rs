use crate::game::{Action, Direction, Skill};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameAction(Action),
    Restart,
    Quit,
    None,
}

/// Maps key names (as reported by a terminal or browser) to game requests
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key(&self, key: &str) -> KeyAction {
        // Named keys are case-insensitive, single characters too
        let key = key.trim().to_ascii_lowercase();

        match key.as_str() {
            // Movement - Arrow keys
            "up" | "arrowup" => KeyAction::GameAction(Action::Move(Direction::Up)),
            "down" | "arrowdown" => KeyAction::GameAction(Action::Move(Direction::Down)),
            "left" | "arrowleft" => KeyAction::GameAction(Action::Move(Direction::Left)),
            "right" | "arrowright" => KeyAction::GameAction(Action::Move(Direction::Right)),

            // Movement - WASD
            "w" => KeyAction::GameAction(Action::Move(Direction::Up)),
            "s" => KeyAction::GameAction(Action::Move(Direction::Down)),
            "a" => KeyAction::GameAction(Action::Move(Direction::Left)),
            "d" => KeyAction::GameAction(Action::Move(Direction::Right)),

            // Skills
            "1" => KeyAction::GameAction(Action::Activate(Skill::Slow)),
            "2" => KeyAction::GameAction(Action::Activate(Skill::Double)),
            "3" => KeyAction::GameAction(Action::Activate(Skill::Ghost)),
            "4" => KeyAction::GameAction(Action::Activate(Skill::MultiFood)),
            "5" => KeyAction::GameAction(Action::Activate(Skill::Cut)),

            // Controls
            "q" | "esc" | "escape" => KeyAction::Quit,
            "r" => KeyAction::Restart,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Minimum travel along the dominant axis for a touch to count as a swipe
pub const SWIPE_THRESHOLD: f32 = 30.0;

/// Turns touch start/end pairs into directions. Each touch surface owns its own
/// tracker.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    start: Option<(f32, f32)>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn touch_start(&mut self, x: f32, y: f32) {
        self.start = Some((x, y));
    }

    /// Finish a touch. Returns the swipe direction, if the touch moved far
    /// enough along its dominant axis.
    pub fn touch_end(&mut self, x: f32, y: f32) -> Option<Direction> {
        let (start_x, start_y) = self.start.take()?;
        let dx = x - start_x;
        let dy = y - start_y;

        if dx.abs() > dy.abs() {
            if dx > SWIPE_THRESHOLD {
                Some(Direction::Right)
            } else if dx < -SWIPE_THRESHOLD {
                Some(Direction::Left)
            } else {
                None
            }
        } else if dy > SWIPE_THRESHOLD {
            Some(Direction::Down)
        } else if dy < -SWIPE_THRESHOLD {
            Some(Direction::Up)
        } else {
            None
        }
    }
}
