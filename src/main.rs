use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use power_snake::game::GameConfig;
use power_snake::input::InputScript;
use power_snake::leaderboard::InMemoryLeaderboard;
use power_snake::modes::{SimulationConfig, SimulationMode};
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "power_snake")]
#[command(version, about = "Wrap-around snake with one-shot power-ups")]
struct Cli {
    /// JSON game configuration (defaults apply to missing fields)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for food placement
    #[arg(long, default_value = "0")]
    seed: u64,

    /// JSON input script: [{"tick": 0, "key": "up"}, ...]
    #[arg(long)]
    script: Option<PathBuf>,

    /// Stop after this many ticks
    #[arg(long, default_value = "10000")]
    max_ticks: u64,

    /// Wait the engine's tick interval between ticks
    #[arg(long)]
    realtime: bool,

    /// Name submitted to the leaderboard
    #[arg(long, default_value = "player")]
    player: String,

    /// Log file (stdout carries the snapshot stream)
    #[arg(long, default_value = "power_snake.log")]
    log_file: PathBuf,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging before anything else
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {}", cli.log_file.display()))?;
    WriteLogger::init(cli.log_level, Config::default(), log_file)
        .context("Failed to initialise logger")?;

    let game_config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let script = match &cli.script {
        Some(path) => InputScript::load(path)?,
        None => InputScript::default(),
    };
    let sim_config = SimulationConfig {
        seed: cli.seed,
        max_ticks: Some(cli.max_ticks),
        realtime: cli.realtime,
        player: cli.player,
    };

    let mut mode = SimulationMode::new(
        game_config,
        sim_config,
        script,
        Arc::new(InMemoryLeaderboard::new()),
        std::io::stdout().lock(),
    )?;
    let summary = mode.run().await?;

    info!(
        "Played {} game(s) in {} ticks, high score {}",
        summary.games_played, summary.clock_ticks, summary.high_score
    );
    Ok(())
}
