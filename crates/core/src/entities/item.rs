use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ensure_name, ensure_non_negative};
use crate::error::ValidationError;

const NO_DESCRIPTION: &str = "No description found :(";

/// Anything that can lie on a field or sit in the player's equipment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ItemRecord", into = "ItemRecord")]
pub enum Item {
    Plain(Plain),
    Weapon(Weapon),
    Armor(Armor),
    Key(Key),
    Potion(Potion),
}

impl Item {
    pub fn name(&self) -> &str {
        match self {
            Self::Plain(item) => &item.name,
            Self::Weapon(weapon) => &weapon.name,
            Self::Armor(armor) => &armor.name,
            Self::Key(key) => &key.name,
            Self::Potion(potion) => &potion.name,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Plain(item) => &item.description,
            Self::Weapon(weapon) => &weapon.description,
            Self::Armor(armor) => &armor.description,
            Self::Key(key) => &key.description,
            Self::Potion(potion) => &potion.description,
        }
    }

    /// Serialized discriminator.
    pub fn class(&self) -> &'static str {
        match self {
            Self::Plain(_) => "Item",
            Self::Weapon(_) => "Weapon",
            Self::Armor(_) => "Armor",
            Self::Key(_) => "Key",
            Self::Potion(_) => "Potion",
        }
    }

    pub fn info(&self) -> String {
        describe(self.name(), self.description())
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn describe(name: &str, description: &str) -> String {
    let description = if description.is_empty() { NO_DESCRIPTION } else { description };
    format!("Name: {name}\nDescription: {description}\n")
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ItemRecord", into = "ItemRecord")]
pub struct Plain {
    name: String,
    description: String,
}

impl Plain {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self { name: ensure_name("item", name.into())?, description: description.into() })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ItemRecord", into = "ItemRecord")]
pub struct Weapon {
    name: String,
    description: String,
    base_strength: i32,
    random_strength: i32,
}

impl Weapon {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        base_strength: i32,
        random_strength: i32,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: ensure_name("weapon", name.into())?,
            description: description.into(),
            base_strength: ensure_non_negative("base strength", base_strength)?,
            random_strength: ensure_non_negative("random strength", random_strength)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_strength(&self) -> i32 {
        self.base_strength
    }

    pub fn random_strength(&self) -> i32 {
        self.random_strength
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ItemRecord", into = "ItemRecord")]
pub struct Armor {
    name: String,
    description: String,
    defence: i32,
}

impl Armor {
    pub fn new(name: impl Into<String>, description: impl Into<String>, defence: i32) -> Result<Self, ValidationError> {
        if !(0..=100).contains(&defence) {
            return Err(ValidationError::DefenceOutOfRange(defence));
        }
        Ok(Self { name: ensure_name("armor", name.into())?, description: description.into(), defence })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Percentage of incoming damage absorbed.
    pub fn defence(&self) -> i32 {
        self.defence
    }
}

/// Unlocks the gate whose target level equals [`Key::level`] by building the
/// layout named by [`Key::location`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ItemRecord", into = "ItemRecord")]
pub struct Key {
    name: String,
    description: String,
    location: String,
    level: u32,
}

impl Key {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
        level: u32,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: ensure_name("key", name.into())?,
            description: description.into(),
            location: location.into(),
            level,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn level(&self) -> u32 {
        self.level
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ItemRecord", into = "ItemRecord")]
pub struct Potion {
    name: String,
    description: String,
    health: i32,
}

impl Potion {
    pub fn new(name: impl Into<String>, description: impl Into<String>, health: i32) -> Result<Self, ValidationError> {
        Ok(Self {
            name: ensure_name("potion", name.into())?,
            description: description.into(),
            health: ensure_non_negative("potion health", health)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> i32 {
        self.health
    }
}

/// Flat persisted form shared by every item variant.
///
/// Missing attributes fall back to the per-class defaults; an unknown `class`
/// loads as a plain item.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(default)]
    pub class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_strength: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub random_strength: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defence: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<i32>,
}

impl ItemRecord {
    fn named(class: &str, name: &str, description: &str) -> Self {
        Self {
            class: class.to_string(),
            name: Some(name.to_string()),
            description: description.to_string(),
            ..Self::default()
        }
    }
}

impl TryFrom<ItemRecord> for Item {
    type Error = ValidationError;

    fn try_from(record: ItemRecord) -> Result<Self, Self::Error> {
        Ok(match record.class.as_str() {
            "Weapon" => Self::Weapon(Weapon::try_from(record)?),
            "Armor" => Self::Armor(Armor::try_from(record)?),
            "Key" => Self::Key(Key::try_from(record)?),
            "Potion" => Self::Potion(Potion::try_from(record)?),
            _ => Self::Plain(Plain::try_from(record)?),
        })
    }
}

impl From<Item> for ItemRecord {
    fn from(item: Item) -> Self {
        match item {
            Item::Plain(item) => item.into(),
            Item::Weapon(weapon) => weapon.into(),
            Item::Armor(armor) => armor.into(),
            Item::Key(key) => key.into(),
            Item::Potion(potion) => potion.into(),
        }
    }
}

impl TryFrom<ItemRecord> for Plain {
    type Error = ValidationError;

    fn try_from(record: ItemRecord) -> Result<Self, Self::Error> {
        Self::new(record.name.unwrap_or_default(), record.description)
    }
}

impl From<Plain> for ItemRecord {
    fn from(item: Plain) -> Self {
        Self::named("Item", &item.name, &item.description)
    }
}

impl TryFrom<ItemRecord> for Weapon {
    type Error = ValidationError;

    fn try_from(record: ItemRecord) -> Result<Self, Self::Error> {
        Self::new(
            record.name.unwrap_or_else(|| "Weapon".to_string()),
            record.description,
            record.base_strength.unwrap_or(10),
            record.random_strength.unwrap_or(10),
        )
    }
}

impl From<Weapon> for ItemRecord {
    fn from(weapon: Weapon) -> Self {
        Self {
            base_strength: Some(weapon.base_strength),
            random_strength: Some(weapon.random_strength),
            ..Self::named("Weapon", &weapon.name, &weapon.description)
        }
    }
}

impl TryFrom<ItemRecord> for Armor {
    type Error = ValidationError;

    fn try_from(record: ItemRecord) -> Result<Self, Self::Error> {
        Self::new(record.name.unwrap_or_else(|| "Armor".to_string()), record.description, record.defence.unwrap_or(0))
    }
}

impl From<Armor> for ItemRecord {
    fn from(armor: Armor) -> Self {
        Self { defence: Some(armor.defence), ..Self::named("Armor", &armor.name, &armor.description) }
    }
}

impl TryFrom<ItemRecord> for Key {
    type Error = ValidationError;

    fn try_from(record: ItemRecord) -> Result<Self, Self::Error> {
        Self::new(
            record.name.unwrap_or_else(|| "Key".to_string()),
            record.description,
            record.location_filename.unwrap_or_default(),
            record.level.unwrap_or(1),
        )
    }
}

impl From<Key> for ItemRecord {
    fn from(key: Key) -> Self {
        Self {
            location_filename: Some(key.location.clone()),
            level: Some(key.level),
            ..Self::named("Key", &key.name, &key.description)
        }
    }
}

impl TryFrom<ItemRecord> for Potion {
    type Error = ValidationError;

    fn try_from(record: ItemRecord) -> Result<Self, Self::Error> {
        Self::new(
            record.name.unwrap_or_else(|| "Health Potion".to_string()),
            record.description,
            record.health.unwrap_or(100),
        )
    }
}

impl From<Potion> for ItemRecord {
    fn from(potion: Potion) -> Self {
        Self { health: Some(potion.health), ..Self::named("Potion", &potion.name, &potion.description) }
    }
}
