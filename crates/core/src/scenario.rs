//! Per-game configuration: field catalog, level layouts, starting player and
//! introduction. Parsing only; reading the files lives in `scenario_file`.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::entities::Player;
use crate::error::ValidationError;
use crate::field::Field;
use crate::location::{Borders, Location};

/// Layout every new session starts in.
pub const FIRST_LAYOUT: &str = "lvl1";

pub const DEFAULT_SCENARIO_NAME: &str = "Dungeon";

const DEFAULT_FIELDS: &str = include_str!("../assets/dungeon/fields.json");
const DEFAULT_PLAYER: &str = include_str!("../assets/dungeon/player.json");
const DEFAULT_INTRODUCTION: &str = include_str!("../assets/dungeon/introduction.txt");
const DEFAULT_LAYOUTS: [(&str, &str); 2] = [
    ("lvl1", include_str!("../assets/dungeon/lvl1.txt")),
    ("lvl2", include_str!("../assets/dungeon/lvl2.txt")),
];

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("could not parse {file}: {source}")]
    Json {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("layout {layout:?} line {line}: {token:?} is not a field id")]
    LayoutToken { layout: String, line: usize, token: String },

    #[error("layout {0:?} does not exist")]
    UnknownLayout(String),

    #[error("layout {layout:?} refers to field {id}, but the catalog has {catalog_len} fields")]
    UnknownField { layout: String, id: usize, catalog_len: usize },

    #[error("layout {layout:?} cannot be built: {source}")]
    Location {
        layout: String,
        #[source]
        source: ValidationError,
    },
}

/// Matrix of catalog ids, one inner vector per row.
pub type Layout = Vec<Vec<usize>>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scenario {
    name: String,
    catalog: Vec<Field>,
    layouts: BTreeMap<String, Layout>,
    player: Player,
    introduction: String,
}

impl Scenario {
    /// Checks every layout against the catalog before accepting it.
    pub fn new(
        name: impl Into<String>,
        catalog: Vec<Field>,
        layouts: BTreeMap<String, Layout>,
        player: Player,
        introduction: impl Into<String>,
    ) -> Result<Self, ScenarioError> {
        for (layout, rows) in &layouts {
            if let Some(&id) = rows.iter().flatten().find(|&&id| id >= catalog.len()) {
                return Err(ScenarioError::UnknownField { layout: layout.clone(), id, catalog_len: catalog.len() });
            }
        }
        Ok(Self { name: name.into(), catalog, layouts, player, introduction: introduction.into() })
    }

    /// Builds a scenario from the text of its configuration files.
    pub fn parse<'a>(
        name: impl Into<String>,
        fields_json: &str,
        player_json: &str,
        layouts: impl IntoIterator<Item = (&'a str, &'a str)>,
        introduction: impl Into<String>,
    ) -> Result<Self, ScenarioError> {
        let catalog: Vec<Field> = serde_json::from_str(fields_json)
            .map_err(|source| ScenarioError::Json { file: "fields.json".to_string(), source })?;
        let player: Player = serde_json::from_str(player_json)
            .map_err(|source| ScenarioError::Json { file: "player.json".to_string(), source })?;
        let layouts = layouts
            .into_iter()
            .map(|(id, text)| Ok((id.to_string(), parse_layout(id, text)?)))
            .collect::<Result<BTreeMap<_, _>, ScenarioError>>()?;
        Self::new(name, catalog, layouts, player, introduction)
    }

    /// Small two-level adventure bundled with the library.
    pub fn build_default() -> Result<Self, ScenarioError> {
        Self::parse(DEFAULT_SCENARIO_NAME, DEFAULT_FIELDS, DEFAULT_PLAYER, DEFAULT_LAYOUTS, DEFAULT_INTRODUCTION)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn catalog(&self) -> &[Field] {
        &self.catalog
    }

    pub fn layouts(&self) -> &BTreeMap<String, Layout> {
        &self.layouts
    }

    pub fn layout(&self, id: &str) -> Option<&Layout> {
        self.layouts.get(id)
    }

    /// Starting player template.
    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn introduction(&self) -> &str {
        &self.introduction
    }

    /// Instantiates layout `id` as a fresh bordered location at `level`.
    pub fn build_location(&self, id: &str, level: u32) -> Result<Location, ScenarioError> {
        let layout = self.layout(id).ok_or_else(|| ScenarioError::UnknownLayout(id.to_string()))?;
        let fields = layout
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&field_id| {
                        self.catalog.get(field_id).cloned().ok_or(ScenarioError::UnknownField {
                            layout: id.to_string(),
                            id: field_id,
                            catalog_len: self.catalog.len(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Location::new(fields, Borders::Add, None, level)
            .map_err(|source| ScenarioError::Location { layout: id.to_string(), source })
    }
}

/// Reads rows of catalog ids separated by tabs or spaces. Blank lines are
/// skipped.
pub fn parse_layout(layout: &str, text: &str) -> Result<Layout, ScenarioError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            line.split_whitespace()
                .map(|token| {
                    token.parse::<usize>().map_err(|_| ScenarioError::LayoutToken {
                        layout: layout.to_string(),
                        line: index + 1,
                        token: token.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .collect()
}
