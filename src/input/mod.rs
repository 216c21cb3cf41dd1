pub mod handler;
pub mod script;

pub use handler::{InputHandler, KeyAction, SwipeTracker, SWIPE_THRESHOLD};
pub use script::{InputScript, ScriptedInput};
