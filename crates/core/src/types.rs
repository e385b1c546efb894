use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ValidationError;
use crate::scenario::ScenarioError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Movement delta as `(south, east)`.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Self::North => (-1, 0),
            Self::South => (1, 0),
            Self::East => (0, 1),
            Self::West => (0, -1),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Hazard { field: String },
    Slain { enemy: String },
}

impl fmt::Display for DeathCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hazard { field } => {
                write!(f, "You died from hunger on {field}. The field you were standing on had no water.")
            }
            Self::Slain { enemy } => write!(f, "{enemy} has defeated you..."),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    Victory,
    Defeat(DeathCause),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FightMove {
    Attack,
    Hide,
}

/// State-changing request handed to [`crate::Game::apply`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    UseItem { slot: usize },
    DropItem { slot: usize },
    PickupItem,
    Open,
    Go(Direction),
    Wait,
    Fight(FightMove),
    Exit,
}

impl Command {
    /// Menu entry this command is issued from.
    pub fn action(&self) -> Action {
        match self {
            Self::UseItem { .. } => Action::UseItem,
            Self::DropItem { .. } => Action::DropItem,
            Self::PickupItem => Action::PickupItem,
            Self::Open => Action::Open,
            Self::Go(direction) => Action::Go(*direction),
            Self::Wait => Action::Wait,
            Self::Fight(FightMove::Attack) => Action::Attack,
            Self::Fight(FightMove::Hide) => Action::Hide,
            Self::Exit => Action::Exit,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionGroup {
    Player,
    Field,
    Location,
    Game,
    Fight,
}

impl ActionGroup {
    pub fn title(self) -> &'static str {
        match self {
            Self::Player => "Player Methods",
            Self::Field => "Field Methods",
            Self::Location => "Location Methods",
            Self::Game => "Game Methods",
            Self::Fight => "Fight Moves",
        }
    }
}

/// One entry of the per-round action menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    UseItem,
    PlayerInfo,
    EquipmentInfo,
    EnemyInfo,
    ItemInfo,
    DropItem,
    PickupItem,
    Open,
    Map,
    LocationInfo,
    Go(Direction),
    Wait,
    Save,
    Exit,
    Attack,
    Hide,
}

impl Action {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::UseItem => "use item",
            Self::PlayerInfo => "player info",
            Self::EquipmentInfo => "equipment info",
            Self::EnemyInfo => "enemy info",
            Self::ItemInfo => "item info",
            Self::DropItem => "drop item",
            Self::PickupItem => "pickup item",
            Self::Open => "open",
            Self::Map => "map",
            Self::LocationInfo => "location info",
            Self::Go(Direction::North) => "go north",
            Self::Go(Direction::South) => "go south",
            Self::Go(Direction::East) => "go east",
            Self::Go(Direction::West) => "go west",
            Self::Wait => "wait",
            Self::Save => "save",
            Self::Exit => "exit",
            Self::Attack => "attack",
            Self::Hide => "hide",
        }
    }

    pub fn group(self) -> ActionGroup {
        match self {
            Self::UseItem | Self::PlayerInfo | Self::EquipmentInfo => ActionGroup::Player,
            Self::EnemyInfo | Self::ItemInfo | Self::DropItem | Self::PickupItem | Self::Open => {
                ActionGroup::Field
            }
            Self::Map | Self::LocationInfo | Self::Go(_) | Self::Wait => ActionGroup::Location,
            Self::Save | Self::Exit => ActionGroup::Game,
            Self::Attack | Self::Hide => ActionGroup::Fight,
        }
    }

    /// Command issued from this entry, with `slot` picking the item for the
    /// equipment entries. Informational entries issue none.
    pub fn command(self, slot: usize) -> Option<Command> {
        Some(match self {
            Self::UseItem => Command::UseItem { slot },
            Self::DropItem => Command::DropItem { slot },
            Self::PickupItem => Command::PickupItem,
            Self::Open => Command::Open,
            Self::Go(direction) => Command::Go(direction),
            Self::Wait => Command::Wait,
            Self::Exit => Command::Exit,
            Self::Attack => Command::Fight(FightMove::Attack),
            Self::Hide => Command::Fight(FightMove::Hide),
            Self::PlayerInfo
            | Self::EquipmentInfo
            | Self::EnemyInfo
            | Self::ItemInfo
            | Self::Map
            | Self::LocationInfo
            | Self::Save => return None,
        })
    }

    /// Whether the entry asks which equipment slot to act on.
    pub fn needs_slot(self) -> bool {
        matches!(self, Self::UseItem | Self::DropItem)
    }

    /// Case-insensitive lookup among `candidates` by keyword.
    pub fn from_keyword(input: &str, candidates: &[Action]) -> Option<Action> {
        let wanted = input.trim().to_lowercase();
        candidates.iter().copied().find(|action| action.keyword() == wanted)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// What a successfully applied command left the session in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Progress {
    Continue,
    Combat,
    Exited,
    Finished(RunOutcome),
}

/// Retryable rejection of a command.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("'{0}' is not available right now")]
    Unavailable(Action),

    #[error("there is no item number {} (equipment holds {len})", .slot + 1)]
    NoSuchSlot { slot: usize, len: usize },

    #[error("the game has already finished")]
    Finished,

    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Player-facing account of what happened during a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    Entered { field: String },
    HazardDamage { amount: i32 },
    Regenerated { amount: i32 },
    EnemyAppeared { enemy: String, shout: String },
    PlayerStruck { enemy: String, damage: i32 },
    EnemyStruck { enemy: String, damage: i32 },
    EnemyDefeated { enemy: String },
    Hid { enemy: String },
    ItemPickedUp { item: String },
    InventoryFull,
    ItemDropped { item: String },
    WeaponEquipped { weapon: String, previous: Option<String> },
    ArmorEquipped { armor: String, previous: Option<String> },
    PotionDrunk { healed: i32 },
    AlreadyFullHealth,
    ItemInert { item: String },
    LeftLocation { level: u32 },
    NoEarlierLocation,
    AlreadyOpen { level: u32 },
    LocationUnlocked { level: u32 },
    KeyMismatch,
    NoMatchingKey,
    NotAGate,
    Finished(RunOutcome),
}
