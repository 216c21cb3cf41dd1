pub mod simulate;

pub use simulate::{RunSummary, SimulationConfig, SimulationMode};
