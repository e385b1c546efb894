//! Saved-game form of a session.
//! This module exists to map a [`Game`] to and from its persisted record.
//! It does not touch the filesystem.

use serde::{Deserialize, Serialize};

use super::*;

/// Everything a save file holds. Fight prompts, the log and the dice state
/// are not persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game: String,
    pub player: Player,
    pub locations: Vec<Location>,
    pub level: u32,
}

impl Game {
    pub fn to_record(&self) -> GameRecord {
        GameRecord {
            game: self.name.clone(),
            player: self.player.clone(),
            locations: self.locations.clone(),
            level: self.level,
        }
    }

    /// Resumes a saved session with fresh dice.
    pub fn from_record(record: GameRecord, seed: u64) -> Result<Self, ValidationError> {
        Self::from_parts(record.game, record.player, record.locations, record.level, seed)
    }
}
