use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use app::app_loop::{Console, ScenarioSource, SessionEnd};
use app::save_file::SaveStore;
use app::seed::SeedChoice;
use app::ui_text::BREAK;
use app::{format_seed, reason_code};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Turn-based text adventure played on the console.
#[derive(Debug, Parser)]
#[command(name = "adventure", version)]
struct Args {
    /// Directory with one sub-directory per game; the bundled dungeon when omitted.
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Where saved games are kept; the platform data directory when omitted.
    #[arg(long)]
    saves_dir: Option<PathBuf>,

    /// Dice seed, for reproducible sessions.
    #[arg(long)]
    seed: Option<u64>,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let seed = SeedChoice::resolve(args.seed);
    info!(seed = %format_seed(seed.value()), source = ?seed, "dice seeded");

    let saves_root = match args.saves_dir {
        Some(dir) => dir,
        None => SaveStore::default_root().context("no data directory available, pass --saves-dir")?,
    };
    let source = match args.config_dir {
        Some(dir) => ScenarioSource::Directory(dir),
        None => ScenarioSource::Builtin,
    };

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout(), SaveStore::new(saves_root), seed.value());
    match console.run(&source)? {
        SessionEnd::Finished(outcome) => {
            info!(reason = reason_code(&outcome), "game finished");
            println!("{BREAK}");
        }
        SessionEnd::Exited => info!("player left the game"),
    }
    Ok(())
}
