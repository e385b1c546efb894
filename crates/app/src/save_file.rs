//! Saved games on disk: `<root>/<game>/<save>.json`, one pretty-printed
//! game record per file.

use std::fs;
use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;
use game_core::GameRecord;

const SAVE_EXTENSION: &str = "json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveStore {
    root: PathBuf,
}

impl SaveStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `saves/` under the platform data directory.
    pub fn default_root() -> Option<PathBuf> {
        ProjectDirs::from("", "", "TextAdventure").map(|dirs| dirs.data_dir().join("saves"))
    }

    pub fn path(&self, game: &str, save: &str) -> PathBuf {
        self.root.join(game).join(format!("{save}.{SAVE_EXTENSION}"))
    }

    /// Writes through a temporary file renamed into place.
    pub fn write_atomic(&self, game: &str, save: &str, record: &GameRecord) -> io::Result<PathBuf> {
        parse_save_name(save).map_err(|message| io::Error::new(io::ErrorKind::InvalidInput, message))?;
        let path = self.path(game, save);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(record).map_err(io::Error::other)?;

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &path)?;

        Ok(path)
    }

    pub fn load(&self, game: &str, save: &str) -> io::Result<GameRecord> {
        let content = fs::read_to_string(self.path(game, save))?;
        serde_json::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Save names of `game`, sorted. A game never saved lists as empty.
    pub fn list(&self, game: &str) -> io::Result<Vec<String>> {
        let dir = self.root.join(game);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut saves = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|extension| extension == SAVE_EXTENSION)
                && let Some(stem) = path.file_stem().and_then(|stem| stem.to_str())
            {
                saves.push(stem.to_string());
            }
        }
        saves.sort();
        Ok(saves)
    }
}

/// A save name must stay a single file name inside the game's directory.
pub fn parse_save_name(input: &str) -> Result<String, String> {
    let name = input.trim();
    if name.is_empty() {
        return Err("You can't fool me! You have entered an empty String.".to_string());
    }
    if name.contains(['/', '\\']) || name.contains("..") {
        return Err("A save name cannot contain '/', '\\' or '..'".to_string());
    }
    Ok(name.to_string())
}
