use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use game_core::scenario::FIRST_LAYOUT;
use game_core::{Command, Game, Item, Progress, Scenario, load_from_dir};
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Tool,
}

#[derive(Subcommand)]
enum Tool {
    /// Load a game directory, build every location and print its map
    Check {
        /// Game directory holding fields.json, player.json and the layouts
        dir: PathBuf,
    },
    /// Replay a JSON list of commands and print what happened
    Play {
        /// Path to the command script
        #[arg(short = 'f', long)]
        script: PathBuf,
        /// Game directory; the bundled dungeon when omitted
        #[arg(long)]
        scenario: Option<PathBuf>,
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
    },
}

fn load(dir: &Path) -> Result<Scenario> {
    let game = dir
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("not a game directory: {}", dir.display()))?;
    let root = dir.parent().unwrap_or(Path::new("."));
    load_from_dir(root, game).with_context(|| format!("Check your game's configuration ({})", dir.display()))
}

/// Level each layout is entered at: the first layout at 1, every other one
/// at the level of the keys leading to it.
fn layout_levels(scenario: &Scenario) -> Result<BTreeMap<String, u32>> {
    let mut levels = BTreeMap::from([(FIRST_LAYOUT.to_string(), 1)]);
    for field in scenario.catalog() {
        let Some(Item::Key(key)) = field.item() else {
            continue;
        };
        if let Some(&level) = levels.get(key.location())
            && level != key.level()
        {
            bail!("keys disagree on the level of {}: {level} and {}", key.location(), key.level());
        }
        levels.insert(key.location().to_string(), key.level());
    }
    Ok(levels)
}

fn check(dir: &Path) -> Result<()> {
    let scenario = load(dir)?;
    let levels = layout_levels(&scenario)?;
    println!("Game: {}", scenario.name());
    println!("Catalog: {} fields", scenario.catalog().len());

    for (id, level) in &levels {
        if scenario.layout(id).is_none() {
            bail!("a key leads to {id}, but there is no such layout");
        }
        let location = scenario.build_location(id, *level).with_context(|| format!("cannot build {id}"))?;
        println!("\n{id} (level {level}, {}x{})", location.width(), location.height());
        println!("{}", location.format_map());
    }
    for id in scenario.layouts().keys().filter(|id| !levels.contains_key(*id)) {
        warn!(layout = %id, "no key leads to this layout");
    }

    Game::start(&scenario, "Checker", 0).context("cannot start a session")?;
    println!("OK: {} layouts, {} reachable", scenario.layouts().len(), levels.len());
    Ok(())
}

fn play(script: &Path, scenario_dir: Option<&Path>, seed: u64) -> Result<()> {
    let data = fs::read_to_string(script).with_context(|| format!("Failed to read script file: {}", script.display()))?;
    let commands: Vec<Command> = serde_json::from_str(&data).context("Failed to deserialize script JSON")?;
    let scenario = match scenario_dir {
        Some(dir) => load(dir)?,
        None => Scenario::build_default().context("bundled scenario is broken")?,
    };

    let mut game = Game::start(&scenario, "Scripted", seed)?;
    for (step, command) in commands.into_iter().enumerate() {
        debug!(step, ?command, "applying");
        let progress = game.apply(&scenario, command.clone());
        for event in game.drain_log() {
            println!("{step:>4}: {event:?}");
        }
        match progress {
            Ok(Progress::Finished(_) | Progress::Exited) => break,
            Ok(_) => {}
            Err(err) => println!("{step:>4}: rejected {command:?}: {err}"),
        }
    }

    println!("Replay complete.");
    println!("Level: {}", game.level());
    println!("Health: {}/{}", game.player().health(), game.player().base_health());
    println!("Outcome: {:?}", game.outcome());
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    match Args::parse().command {
        Tool::Check { dir } => check(&dir),
        Tool::Play { script, scenario, seed } => play(&script, scenario.as_deref(), seed),
    }
}
