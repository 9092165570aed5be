//! Replays recorded pose-landmark streams through the movement classifiers.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use movement_classifier::{
    app::{ReplayApp, ReplayMode},
    config::{Config, EXAMPLE_CONFIG},
    recording::read_recording,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Landmark recording to replay (JSON Lines, one frame per line)
    #[arg(short, long, required_unless_present = "print_config")]
    input: Option<String>,

    /// Classifier mode (original, dance_map, wheel, nose, directional)
    #[arg(short, long)]
    mode: Option<String>,

    /// Camera frame rate the recording was captured at
    #[arg(long)]
    fps: Option<f64>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Print an example configuration file and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Movement Classifier replay");

    let config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    let mode = match args.mode.as_deref() {
        Some(mode) => mode.parse::<ReplayMode>()?,
        None => ReplayMode::Movement(config.movement.app),
    };
    let input = args.input.context("--input is required")?;
    let snapshots = read_recording(&input).with_context(|| format!("Failed to read recording {input}"))?;

    let app = ReplayApp::new(config, mode, args.fps)?;
    let summary = app.run(snapshots)?;

    for event in &summary.events {
        println!("{event}");
    }

    Ok(())
}
