//! Clock-driven runner
//!
//! Owns the engine, feeds it input between ticks, streams a JSON snapshot per
//! tick to the render sink and reports finished games to the leaderboard.
//!
//! # Example
//!
//! ```rust,ignore
//! use power_snake::game::GameConfig;
//! use power_snake::input::InputScript;
//! use power_snake::leaderboard::InMemoryLeaderboard;
//! use power_snake::modes::{SimulationConfig, SimulationMode};
//! use std::sync::Arc;
//!
//! let mut mode = SimulationMode::new(
//!     GameConfig::default(),
//!     SimulationConfig::default(),
//!     InputScript::default(),
//!     Arc::new(InMemoryLeaderboard::new()),
//!     std::io::stdout(),
//! )?;
//! let summary = mode.run().await?;
//! ```

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::game::{Action, GameConfig, GameEngine, GameSnapshot};
use crate::input::{InputHandler, InputScript, KeyAction};
use crate::leaderboard::{Leaderboard, SubmitOutcome};
use crate::metrics::GameMetrics;

/// Settings for one run of the simulation
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Seed for food placement
    pub seed: u64,
    /// Stop after this many clock ticks
    pub max_ticks: Option<u64>,
    /// Sleep for the engine's tick interval between ticks
    pub realtime: bool,
    /// Name submitted to the leaderboard
    pub player: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_ticks: Some(10_000),
            realtime: false,
            player: "player".to_string(),
        }
    }
}

/// What happened over a run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub clock_ticks: u64,
    pub games_played: u32,
    pub high_score: u32,
    pub foods_eaten: u32,
    pub ghost_saves: u32,
    /// Wall-clock time of the whole run, across restarts
    pub elapsed: Duration,
    pub last_snapshot: GameSnapshot,
    pub submissions: Vec<SubmitOutcome>,
}

pub struct SimulationMode<W: Write> {
    engine: GameEngine,
    script: InputScript,
    input_handler: InputHandler,
    leaderboard: Arc<dyn Leaderboard>,
    metrics: GameMetrics,
    sink: W,
    config: SimulationConfig,
    clock_ticks: u64,
    should_quit: bool,
    reported: bool,
    submissions: Vec<SubmitOutcome>,
}

impl<W: Write> SimulationMode<W> {
    pub fn new(
        game_config: GameConfig,
        config: SimulationConfig,
        script: InputScript,
        leaderboard: Arc<dyn Leaderboard>,
        sink: W,
    ) -> Result<Self> {
        let engine = GameEngine::with_seed(game_config, config.seed)
            .context("Failed to start the first session")?;

        Ok(Self {
            engine,
            script,
            input_handler: InputHandler::new(),
            leaderboard,
            metrics: GameMetrics::new(),
            sink,
            config,
            clock_ticks: 0,
            should_quit: false,
            reported: false,
            submissions: Vec::new(),
        })
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub async fn run(&mut self) -> Result<RunSummary> {
        info!(
            "Starting run: seed {}, realtime {}, max ticks {:?}",
            self.config.seed, self.config.realtime, self.config.max_ticks
        );
        let started = Instant::now();
        self.emit_snapshot()?;

        loop {
            if self.config.realtime {
                // The clock is re-armed with the latest interval after every tick
                let interval = self.engine.tick_interval();
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    _ = tokio::signal::ctrl_c() => {
                        self.should_quit = true;
                    }
                }
            }
            if self.should_quit {
                break;
            }

            self.deliver_input()?;
            if self.should_quit {
                break;
            }

            self.update_game()?;
            self.clock_ticks += 1;

            if self.engine.is_game_over() && self.script.is_empty() {
                break;
            }
            if self
                .config
                .max_ticks
                .is_some_and(|max| self.clock_ticks >= max)
            {
                break;
            }
        }

        self.metrics.update();
        let elapsed = started.elapsed();
        info!(
            "Run finished after {} ticks in {:.1}s (last session {}), {} games, high score {}",
            self.clock_ticks,
            elapsed.as_secs_f64(),
            self.metrics.format_time(),
            self.metrics.games_played,
            self.metrics.high_score
        );
        info!(
            "Foods eaten {}, ghost saves {}",
            self.metrics.foods_eaten, self.metrics.ghost_saves
        );
        self.sink.flush().context("Failed to flush snapshot sink")?;

        Ok(RunSummary {
            clock_ticks: self.clock_ticks,
            games_played: self.metrics.games_played,
            high_score: self.metrics.high_score,
            foods_eaten: self.metrics.foods_eaten,
            ghost_saves: self.metrics.ghost_saves,
            elapsed,
            last_snapshot: self.engine.snapshot(),
            submissions: self.submissions.clone(),
        })
    }

    fn deliver_input(&mut self) -> Result<()> {
        for key in self.script.due(self.clock_ticks) {
            match self.input_handler.handle_key(&key) {
                KeyAction::GameAction(action) => {
                    let accepted = self
                        .engine
                        .apply(action)
                        .context("Failed to apply input")?;
                    if !accepted {
                        debug!("Input {:?} ignored", action);
                    } else if matches!(action, Action::Activate(_)) {
                        // Skills change the board before the next tick
                        self.emit_snapshot()?;
                    }
                }
                KeyAction::Restart => self.reset_game()?,
                KeyAction::Quit => {
                    self.should_quit = true;
                    return Ok(());
                }
                KeyAction::None => warn!("Unknown key {:?} in script", key),
            }
        }
        Ok(())
    }

    fn update_game(&mut self) -> Result<()> {
        if self.engine.is_game_over() {
            return Ok(());
        }

        let result = self.engine.tick().context("Simulation failed")?;
        self.metrics.on_step(&result.info);
        self.emit_snapshot()?;

        if result.terminated && !self.reported {
            let score = self.engine.state().score;
            self.metrics.on_game_over(score);
            self.report_score(score);
            self.reported = true;
        }
        Ok(())
    }

    /// Claim the top spot when the score beats it. Leaderboard failures never
    /// stop local play.
    fn report_score(&mut self, score: u32) {
        let top = match self.leaderboard.fetch_top_score() {
            Ok(top) => top,
            Err(err) => {
                warn!("Could not fetch top score: {err:#}");
                None
            }
        };

        if top.as_ref().is_some_and(|top| top.score >= score) {
            return;
        }

        match self.leaderboard.submit_score(&self.config.player, score) {
            Ok(outcome) => {
                match &outcome {
                    SubmitOutcome::Accepted => {
                        info!("New high score {} by {}", score, self.config.player)
                    }
                    SubmitOutcome::Rejected { current } => info!(
                        "High score {} rejected, {} now holds {}",
                        score, current.name, current.score
                    ),
                }
                self.submissions.push(outcome);
            }
            Err(err) => warn!("Could not submit score: {err:#}"),
        }
    }

    fn reset_game(&mut self) -> Result<()> {
        self.engine.restart().context("Failed to restart")?;
        self.metrics.on_game_start();
        self.reported = false;
        self.emit_snapshot()
    }

    fn emit_snapshot(&mut self) -> Result<()> {
        serde_json::to_writer(&mut self.sink, &self.engine.snapshot())
            .context("Failed to write snapshot")?;
        self.sink
            .write_all(b"\n")
            .context("Failed to write snapshot")?;
        Ok(())
    }
}
