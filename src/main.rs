//! Freighter entry point
//!
//! Runs a headless session driven by the autopilot: a manual clock paced at
//! the frame rate, a recording surface and a logging audio sink.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use freighter::audio::LogAudio;
use freighter::autopilot::Autopilot;
use freighter::platform::{HeadlessSurface, ManualClock, SpriteSizes, Surface};
use freighter::sim::Screen;
use freighter::{Game, Settings, Tuning};

#[derive(Parser, Debug)]
#[command(name = "freighter")]
#[command(about = "Falling-rocks arcade shooter, run headless under the autopilot")]
struct Cli {
    /// RNG seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,
    /// Frames to simulate
    #[arg(long, default_value_t = 3_600)]
    frames: u64,
    /// Screen width, overrides the settings file
    #[arg(long)]
    width: Option<i32>,
    /// Screen height, overrides the settings file
    #[arg(long)]
    height: Option<i32>,
    /// Milliseconds per frame, defaults to the settings' target fps
    #[arg(long)]
    frame_ms: Option<u64>,
    /// Balance table (JSON)
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Player settings (JSON); missing file means defaults
    #[arg(long, default_value = "settings.json")]
    settings: PathBuf,
    /// Sprite size table (JSON)
    #[arg(long)]
    sprites: Option<PathBuf>,
    /// Write the final session state as JSON
    #[arg(long)]
    dump_state: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = Settings::load(&cli.settings)
        .with_context(|| format!("loading settings from {}", cli.settings.display()))?;
    if let Some(width) = cli.width {
        settings.width = width;
    }
    if let Some(height) = cli.height {
        settings.height = height;
    }
    anyhow::ensure!(
        settings.width > 0 && settings.height > 0,
        "screen size {}x{} is not usable",
        settings.width,
        settings.height
    );

    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    let sprites = match &cli.sprites {
        Some(path) => SpriteSizes::load(path)
            .with_context(|| format!("loading sprite sizes from {}", path.display()))?,
        None => SpriteSizes::default(),
    };

    let seed = match cli.seed {
        Some(seed) => seed,
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("system clock before 1970")?
            .as_millis() as u64,
    };
    let frame_ms = cli.frame_ms.unwrap_or_else(|| settings.frame_ms());

    log::info!("Freighter (headless) starting, seed {seed}");

    let mut surface = HeadlessSurface::new(settings.width, settings.height);
    let screen = Screen::new(surface.width(), surface.height());
    let mut game = Game::new(seed, screen, &settings, tuning, sprites);
    let mut clock = ManualClock::new(0, frame_ms);
    let mut pilot = Autopilot::new();
    let mut audio = LogAudio::default();

    let frames = game.run(
        &mut clock,
        &mut pilot,
        &mut audio,
        &mut surface,
        Some(cli.frames),
    );

    println!("seed={seed}");
    println!("frames={frames}");
    println!("time_ms={}", game.state.time);
    println!("level={}", game.state.level);
    println!("phase={:?}", game.state.phase());
    println!("levels_won={}", game.levels_won());
    println!("losses={}", game.losses());
    println!("restarts={}", pilot.restarts);
    println!("cues={}", audio.played);

    if let Some(path) = &cli.dump_state {
        let encoded = serde_json::to_vec_pretty(&game.state)?;
        fs::write(path, encoded).with_context(|| format!("writing {}", path.display()))?;
        println!("state={}", path.display());
    }
    Ok(())
}
