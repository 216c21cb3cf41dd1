//! Scripted input for headless replays
//!
//! A script is a JSON array of `{ "tick": n, "key": "..." }` entries. Each key is
//! delivered just before tick `n` runs, in file order for equal ticks.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedInput {
    pub tick: u64,
    pub key: String,
}

/// Inputs waiting to be delivered, ordered by tick
#[derive(Debug, Default)]
pub struct InputScript {
    pending: VecDeque<ScriptedInput>,
}

impl InputScript {
    pub fn new(mut inputs: Vec<ScriptedInput>) -> Self {
        // Stable sort keeps file order within a tick
        inputs.sort_by_key(|input| input.tick);
        Self {
            pending: inputs.into(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        let inputs: Vec<ScriptedInput> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse script {}", path.display()))?;
        Ok(Self::new(inputs))
    }

    /// Remove and return every key due at or before `tick`
    pub fn due(&mut self, tick: u64) -> Vec<String> {
        let mut keys = Vec::new();
        while self.pending.front().is_some_and(|input| input.tick <= tick) {
            if let Some(input) = self.pending.pop_front() {
                keys.push(input.key);
            }
        }
        keys
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn input(tick: u64, key: &str) -> ScriptedInput {
        ScriptedInput {
            tick,
            key: key.to_string(),
        }
    }

    #[test]
    fn test_due_in_tick_order() {
        let mut script = InputScript::new(vec![input(3, "up"), input(0, "1"), input(3, "left")]);

        assert_eq!(script.due(0), vec!["1"]);
        assert!(script.due(2).is_empty());
        assert_eq!(script.due(3), vec!["up", "left"]);
        assert!(script.is_empty());
    }

    #[test]
    fn test_late_inputs_are_delivered() {
        let mut script = InputScript::new(vec![input(1, "a"), input(2, "w")]);
        assert_eq!(script.due(10), vec!["a", "w"]);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"tick": 2, "key": "down"}}, {{"tick": 0, "key": "3"}}]"#).unwrap();

        let mut script = InputScript::load(file.path()).unwrap();
        assert_eq!(script.due(0), vec!["3"]);
        assert_eq!(script.due(2), vec!["down"]);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(InputScript::load(file.path()).is_err());
    }
}
