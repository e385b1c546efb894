//! Scenario directories on disk.
//!
//! One sub-directory per game under a configuration root:
//! - `fields.json`: the field catalog, indexed by array position.
//! - `player.json`: the starting player.
//! - `introduction.txt`: optional text shown before the first round.
//! - every other `*.txt`: a layout named after its file stem.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::scenario::{Scenario, ScenarioError};

const FIELDS_FILE: &str = "fields.json";
const PLAYER_FILE: &str = "player.json";
const INTRODUCTION_STEM: &str = "introduction";

#[derive(Debug, Error)]
pub enum ScenarioLoadError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Scenario(#[from] ScenarioError),
}

fn read(path: PathBuf) -> Result<String, ScenarioLoadError> {
    fs::read_to_string(&path).map_err(|source| ScenarioLoadError::Io { path, source })
}

/// Loads `<root>/<game>/` as a scenario named `game`.
pub fn load_from_dir(root: &Path, game: &str) -> Result<Scenario, ScenarioLoadError> {
    let dir = root.join(game);
    let fields = read(dir.join(FIELDS_FILE))?;
    let player = read(dir.join(PLAYER_FILE))?;

    let mut introduction = String::new();
    let mut layouts = Vec::new();
    let entries = fs::read_dir(&dir).map_err(|source| ScenarioLoadError::Io { path: dir.clone(), source })?;
    for entry in entries {
        let path = entry.map_err(|source| ScenarioLoadError::Io { path: dir.clone(), source })?.path();
        if path.extension().is_none_or(|extension| extension != "txt") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()).map(str::to_string) else {
            continue;
        };
        let text = read(path)?;
        if stem == INTRODUCTION_STEM {
            introduction = text;
        } else {
            layouts.push((stem, text));
        }
    }
    debug!(game, layouts = layouts.len(), "scenario files read");

    let scenario = Scenario::parse(
        game,
        &fields,
        &player,
        layouts.iter().map(|(stem, text)| (stem.as_str(), text.as_str())),
        introduction,
    )?;
    Ok(scenario)
}

/// Names of the games under `root`, sorted. A missing root lists as empty.
pub fn list_scenarios(root: &Path) -> io::Result<Vec<String>> {
    if !root.exists() {
        return Ok(Vec::new());
    }
    let mut games = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir()
            && let Some(name) = entry.file_name().to_str()
        {
            games.push(name.to_string());
        }
    }
    games.sort();
    Ok(games)
}
