//! A single grid cell: terrain, occupant, loot and gate target, plus the
//! entry and fight rules that run when the player steps onto it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dice::Dice;
use crate::entities::{Combatant, Enemy, Item, Key, Player, Strike};
use crate::error::GameOver;
use crate::types::DeathCause;

/// Where a gate leads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GoToRecord", into = "GoToRecord")]
pub enum GoTo {
    /// Ordinary field, persisted as `0`.
    #[default]
    Nowhere,
    Level(u32),
    /// Final field, persisted as `"WIN"`.
    Win,
}

const WIN_SENTINEL: &str = "WIN";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum GoToRecord {
    Level(u32),
    Sentinel(String),
}

impl TryFrom<GoToRecord> for GoTo {
    type Error = String;

    fn try_from(record: GoToRecord) -> Result<Self, Self::Error> {
        match record {
            GoToRecord::Level(0) => Ok(Self::Nowhere),
            GoToRecord::Level(level) => Ok(Self::Level(level)),
            GoToRecord::Sentinel(word) if word == WIN_SENTINEL => Ok(Self::Win),
            GoToRecord::Sentinel(word) => Err(format!("go_to must be a level number or \"WIN\", got {word:?}")),
        }
    }
}

impl From<GoTo> for GoToRecord {
    fn from(go_to: GoTo) -> Self {
        match go_to {
            GoTo::Nowhere => Self::Level(0),
            GoTo::Level(level) => Self::Level(level),
            GoTo::Win => Self::Sentinel(WIN_SENTINEL.to_string()),
        }
    }
}

/// What happened as the player stepped onto a field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Arrival {
    pub hazard_damage: i32,
    pub regenerated: i32,
    pub encounter: Option<Encounter>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Encounter {
    pub enemy: String,
    pub shout: String,
}

/// One attack/counter-attack round of a fight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exchange {
    pub enemy: String,
    pub blow: Strike,
    /// `None` when the blow killed the enemy.
    pub counter: Option<Strike>,
}

/// How a gate reacts to an attempt to open it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateResolution {
    NotAGate,
    Victory,
    NoEarlierLocation,
    Back { level: u32 },
    AlreadyOpen { level: u32 },
    Unlock { key: Key },
    NoMatchingKey,
    KeyMismatch,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    danger: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    enemy: Option<Enemy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    item: Option<Item>,
    #[serde(default = "enterable_by_default")]
    enterable: bool,
    #[serde(default)]
    seen: bool,
    #[serde(default)]
    go_to: GoTo,
}

fn enterable_by_default() -> bool {
    true
}

impl Default for Field {
    fn default() -> Self {
        Self::new("", "")
    }
}

impl Field {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            danger: 0,
            enemy: None,
            item: None,
            enterable: true,
            seen: false,
            go_to: GoTo::Nowhere,
        }
    }

    /// Impassable cell of the ring surrounding every location.
    pub fn border() -> Self {
        Self::new("Boarder", "No one is able to go through me!").with_enterable(false).with_seen(true)
    }

    pub fn with_danger(mut self, danger: i32) -> Self {
        self.danger = danger;
        self
    }

    pub fn with_enemy(mut self, enemy: Enemy) -> Self {
        self.enemy = Some(enemy);
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.item = Some(item);
        self
    }

    pub fn with_enterable(mut self, enterable: bool) -> Self {
        self.enterable = enterable;
        self
    }

    pub fn with_seen(mut self, seen: bool) -> Self {
        self.seen = seen;
        self
    }

    pub fn with_go_to(mut self, go_to: GoTo) -> Self {
        self.go_to = go_to;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn danger(&self) -> i32 {
        self.danger
    }

    pub fn enemy(&self) -> Option<&Enemy> {
        self.enemy.as_ref()
    }

    pub fn item(&self) -> Option<&Item> {
        self.item.as_ref()
    }

    pub fn enterable(&self) -> bool {
        self.enterable
    }

    pub fn seen(&self) -> bool {
        self.seen
    }

    pub fn go_to(&self) -> GoTo {
        self.go_to
    }

    pub fn is_gate(&self) -> bool {
        self.go_to != GoTo::Nowhere
    }

    pub fn set_seen(&mut self, seen: bool) {
        self.seen = seen;
    }

    pub fn set_enemy(&mut self, enemy: Option<Enemy>) {
        self.enemy = enemy;
    }

    pub fn set_item(&mut self, item: Option<Item>) {
        self.item = item;
    }

    /// Three-character map glyph.
    pub fn glyph(&self) -> &'static str {
        if !self.seen {
            "   "
        } else if !self.enterable {
            " X "
        } else if self.is_gate() {
            " G "
        } else if self.enemy.is_some() {
            " M "
        } else if self.item.is_some() {
            " i "
        } else if self.danger > 0 {
            " + "
        } else if self.danger == 0 {
            " o "
        } else {
            " - "
        }
    }

    /// Applies the field's effects to an arriving player.
    ///
    /// Reaching the final field wins before any damage is dealt. Hazards may
    /// kill. An enemy on the field starts an encounter that the caller has
    /// to resolve with [`Field::exchange`].
    pub fn entrance(&mut self, player: &mut Player, dice: &mut Dice) -> Result<Arrival, GameOver> {
        if self.go_to == GoTo::Win {
            return Err(GameOver::Victory);
        }
        let mut arrival = Arrival::default();
        if self.danger < 0 {
            let hit = player.receive_hit(self.danger.saturating_neg());
            arrival.hazard_damage = hit.dealt;
            if !hit.target_alive {
                return Err(GameOver::Defeat(DeathCause::Hazard { field: self.name.clone() }));
            }
        } else if self.danger > 0 {
            arrival.regenerated = player.restore(self.danger);
        }
        if let Some(enemy) = &self.enemy {
            let shout = enemy.shout(dice).to_string();
            arrival.encounter = Some(Encounter { enemy: enemy.name().to_string(), shout });
        }
        Ok(arrival)
    }

    /// The player's blow against the resident enemy. `None` when the field is
    /// empty; the enemy is cleared once it dies.
    pub fn strike_enemy(&mut self, player: &Player, dice: &mut Dice) -> Option<Strike> {
        let enemy = self.enemy.as_mut()?;
        let strike = player.inflict_damage(enemy, dice);
        if !strike.target_alive {
            self.enemy = None;
        }
        Some(strike)
    }

    /// `true` while the enemy survives the player's blow.
    pub fn attack(&mut self, player: &Player, dice: &mut Dice) -> bool {
        self.strike_enemy(player, dice).is_some_and(|strike| strike.target_alive)
    }

    /// Player attacks; a surviving enemy strikes back at once.
    pub fn exchange(&mut self, player: &mut Player, dice: &mut Dice) -> Result<Option<Exchange>, GameOver> {
        let Some(enemy_name) = self.enemy.as_ref().map(|enemy| enemy.name().to_string()) else {
            return Ok(None);
        };
        let Some(blow) = self.strike_enemy(player, dice) else {
            return Ok(None);
        };
        let counter = match &self.enemy {
            Some(enemy) => {
                let counter = enemy.inflict_damage(player, dice);
                if !counter.target_alive {
                    return Err(GameOver::Defeat(DeathCause::Slain { enemy: enemy_name }));
                }
                Some(counter)
            }
            None => None,
        };
        Ok(Some(Exchange { enemy: enemy_name, blow, counter }))
    }

    /// Moves the field's item into the equipment. Returns its name, or `None`
    /// when there is nothing to take or no room for it.
    pub fn pickup(&mut self, player: &mut Player) -> Option<String> {
        let item = self.item.take()?;
        let name = item.name().to_string();
        match player.pickup_item(item) {
            Ok(()) => Some(name),
            Err(item) => {
                self.item = Some(item);
                None
            }
        }
    }

    /// Puts the item at `slot` onto an empty field.
    pub fn drop_item(&mut self, player: &mut Player, slot: usize) -> Option<String> {
        if self.item.is_some() {
            return None;
        }
        let item = player.drop_item(slot)?;
        let name = item.name().to_string();
        self.item = Some(item);
        Some(name)
    }

    /// Opening with whatever matching key the player carries.
    pub fn open(&self, level: u32, discovered: usize, player: &Player) -> GateResolution {
        self.resolve_gate(level, discovered, |target| {
            player.search_for_key(target).ok_or(GateResolution::NoMatchingKey)
        })
    }

    /// Opening with a key the player picked by hand.
    pub fn open_with_key(&self, level: u32, discovered: usize, key: &Key) -> GateResolution {
        self.resolve_gate(level, discovered, |target| {
            if key.level() == target { Ok(key) } else { Err(GateResolution::KeyMismatch) }
        })
    }

    fn resolve_gate<'k>(
        &self,
        level: u32,
        discovered: usize,
        find_key: impl FnOnce(u32) -> Result<&'k Key, GateResolution>,
    ) -> GateResolution {
        let target = match self.go_to {
            GoTo::Nowhere => return GateResolution::NotAGate,
            GoTo::Win => return GateResolution::Victory,
            GoTo::Level(target) => target,
        };
        if target == level {
            return if level == 1 {
                GateResolution::NoEarlierLocation
            } else {
                GateResolution::Back { level: level - 1 }
            };
        }
        if target as usize <= discovered {
            return GateResolution::AlreadyOpen { level: target };
        }
        match find_key(target) {
            Ok(key) => GateResolution::Unlock { key: key.clone() },
            Err(resolution) => resolution,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}
