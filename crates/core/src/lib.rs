pub mod dice;
pub mod entities;
pub mod error;
pub mod field;
pub mod game;
pub mod location;
pub mod scenario;
pub mod scenario_file;
pub mod types;

pub use dice::Dice;
pub use entities::{Armor, Enemy, Item, Key, Player, Plain, Potion, Weapon};
pub use error::{GameOver, ValidationError};
pub use field::{Field, GateResolution, GoTo};
pub use game::{Game, GameRecord};
pub use location::{Borders, Location, Surroundings};
pub use scenario::{Scenario, ScenarioError};
pub use scenario_file::{ScenarioLoadError, list_scenarios, load_from_dir};
pub use types::*;
