//! Leaderboard interface
//!
//! The game only needs the current top entry and a way to claim it. Remote
//! backends implement [`Leaderboard`]; failures are reported as errors and the
//! caller carries on as if no top score existed.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub name: String,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    /// Someone else got there first with a higher score
    Rejected { current: HighScore },
}

pub trait Leaderboard: Send + Sync {
    fn fetch_top_score(&self) -> Result<Option<HighScore>>;

    fn submit_score(&self, name: &str, score: u32) -> Result<SubmitOutcome>;
}

/// Process-local leaderboard holding only the top entry
#[derive(Debug, Default)]
pub struct InMemoryLeaderboard {
    top: Mutex<Option<HighScore>>,
}

impl InMemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_top(name: &str, score: u32) -> Self {
        Self {
            top: Mutex::new(Some(HighScore {
                name: name.to_string(),
                score,
            })),
        }
    }
}

impl Leaderboard for InMemoryLeaderboard {
    fn fetch_top_score(&self) -> Result<Option<HighScore>> {
        let top = self
            .top
            .lock()
            .map_err(|_| anyhow::anyhow!("leaderboard lock poisoned"))?;
        Ok(top.clone())
    }

    fn submit_score(&self, name: &str, score: u32) -> Result<SubmitOutcome> {
        let mut top = self
            .top
            .lock()
            .map_err(|_| anyhow::anyhow!("leaderboard lock poisoned"))?;

        if let Some(current) = top.as_ref() {
            if current.score > score {
                return Ok(SubmitOutcome::Rejected {
                    current: current.clone(),
                });
            }
        }

        *top = Some(HighScore {
            name: name.to_string(),
            score,
        });
        Ok(SubmitOutcome::Accepted)
    }
}
