use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glide_snake::audio::LogAudio;
use glide_snake::game::{Difficulty, GameConfig};
use glide_snake::modes::HumanMode;
use glide_snake::storage::FileScoreStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "glide-snake")]
#[command(version, about = "Snake with smooth, continuous movement")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Arena width in world units
    #[arg(long)]
    width: Option<f64>,

    /// Arena height in world units
    #[arg(long)]
    height: Option<f64>,

    /// Difficulty preselected in the menu
    #[arg(long)]
    difficulty: Option<DifficultyArg>,

    /// File holding the best score
    #[arg(long)]
    score_file: Option<PathBuf>,

    /// Seed for item placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
            DifficultyArg::Expert => Difficulty::Expert,
        }
    }
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.arena_width = width;
        }
        if let Some(height) = self.height {
            config.arena_height = height;
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty.into();
        }
        if let Some(path) = &self.score_file {
            config.best_score_path = path.clone();
        }
        if self.seed.is_some() {
            config.rng_seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.game_config().context("Invalid game configuration")?;
    info!(
        width = config.arena_width,
        height = config.arena_height,
        difficulty = config.difficulty.label(),
        "starting"
    );

    let store = FileScoreStore::new(config.best_score_path.clone());
    let mut human_mode = HumanMode::new(config, Box::new(store), Box::new(LogAudio::new()));
    human_mode.run().await?;

    Ok(())
}
