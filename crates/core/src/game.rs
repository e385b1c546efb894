use std::mem;

use tracing::{debug, info};

use crate::dice::Dice;
use crate::entities::{Enemy, Player};
use crate::error::{GameOver, ValidationError};
use crate::location::Location;
use crate::scenario::{FIRST_LAYOUT, Scenario, ScenarioError};
use crate::types::*;

mod actions;
mod encounter;
mod gates;
mod inventory;
mod record;
#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests;

pub use record::GameRecord;

use encounter::PendingEncounter;

/// Why a command stopped before completing normally.
enum Halt {
    Over(GameOver),
    Rejected(GameError),
}

impl From<GameOver> for Halt {
    fn from(over: GameOver) -> Self {
        Self::Over(over)
    }
}

impl From<GameError> for Halt {
    fn from(err: GameError) -> Self {
        Self::Rejected(err)
    }
}

impl From<ValidationError> for Halt {
    fn from(err: ValidationError) -> Self {
        Self::Rejected(err.into())
    }
}

impl From<ScenarioError> for Halt {
    fn from(err: ScenarioError) -> Self {
        Self::Rejected(err.into())
    }
}

pub struct Game {
    name: String,
    player: Player,
    locations: Vec<Location>,
    level: u32,
    dice: Dice,
    log: Vec<LogEvent>,
    pending_encounter: Option<PendingEncounter>,
    outcome: Option<RunOutcome>,
    exited: bool,
}

impl Game {
    /// New session from a scenario: the template player renamed to
    /// `player_name`, standing at the start of the first layout.
    pub fn start(scenario: &Scenario, player_name: &str, seed: u64) -> Result<Self, GameError> {
        let mut player = scenario.player().clone();
        player.set_name(player_name)?;
        let first = scenario.build_location(FIRST_LAYOUT, 1)?;
        info!(game = scenario.name(), seed, "new game started");
        Ok(Self::from_parts(scenario.name(), player, vec![first], 1, seed)?)
    }

    pub fn from_parts(
        name: impl Into<String>,
        player: Player,
        locations: Vec<Location>,
        level: u32,
        seed: u64,
    ) -> Result<Self, ValidationError> {
        if locations.is_empty() {
            return Err(ValidationError::NoLocations);
        }
        let mut game = Self {
            name: name.into(),
            player,
            locations,
            level: 1,
            dice: Dice::seeded(seed),
            log: Vec::new(),
            pending_encounter: None,
            outcome: None,
            exited: false,
        };
        game.set_level(level)?;
        Ok(game)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// 1-based index of the location the player is in.
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn set_level(&mut self, level: u32) -> Result<(), ValidationError> {
        if level == 0 || level as usize > self.locations.len() {
            return Err(ValidationError::InvalidLevel { level, discovered: self.locations.len() });
        }
        self.level = level;
        Ok(())
    }

    pub fn location(&self) -> &Location {
        &self.locations[self.level_index()]
    }

    fn level_index(&self) -> usize {
        self.level as usize - 1
    }

    /// Enemy the player is currently fighting.
    pub fn opponent(&self) -> Option<&Enemy> {
        self.pending_encounter.as_ref()?;
        self.location().current_field().enemy()
    }

    pub fn in_combat(&self) -> bool {
        self.pending_encounter.is_some()
    }

    pub fn outcome(&self) -> Option<&RunOutcome> {
        self.outcome.as_ref()
    }

    /// Whether the round loop should stop.
    pub fn end(&self) -> bool {
        self.exited || self.outcome.is_some()
    }

    pub fn exit(&mut self) {
        self.exited = true;
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    /// Hands the accumulated events to the caller and clears the log.
    pub fn drain_log(&mut self) -> Vec<LogEvent> {
        mem::take(&mut self.log)
    }

    /// Runs one state-changing command.
    ///
    /// Commands missing from [`Game::available_actions`] are rejected without
    /// touching state. A win or a death is not an error: it is recorded and
    /// reported as [`Progress::Finished`].
    pub fn apply(&mut self, scenario: &Scenario, command: Command) -> Result<Progress, GameError> {
        if self.end() {
            return Err(GameError::Finished);
        }
        let action = command.action();
        if !self.available_actions().contains(&action) {
            return Err(GameError::Unavailable(action));
        }
        debug!(?command, level = self.level, "applying command");

        match self.dispatch(scenario, command) {
            Ok(()) => Ok(self.progress()),
            Err(Halt::Over(over)) => Ok(self.finish(over)),
            Err(Halt::Rejected(err)) => Err(err),
        }
    }

    fn dispatch(&mut self, scenario: &Scenario, command: Command) -> Result<(), Halt> {
        match command {
            Command::UseItem { slot } => self.use_item(scenario, slot),
            Command::DropItem { slot } => self.drop_item(slot),
            Command::PickupItem => {
                self.pickup_item();
                Ok(())
            }
            Command::Open => self.open_gate(scenario),
            Command::Go(direction) => {
                let index = self.level_index();
                let arrival = self.locations[index].go_direction(&mut self.player, &mut self.dice, direction)?;
                if let Some(arrival) = arrival {
                    self.record_arrival(arrival);
                }
                Ok(())
            }
            Command::Wait => {
                let index = self.level_index();
                let arrival = self.locations[index].wait(&mut self.player, &mut self.dice)?;
                self.record_arrival(arrival);
                Ok(())
            }
            Command::Fight(FightMove::Attack) => self.attack(),
            Command::Fight(FightMove::Hide) => {
                self.hide();
                Ok(())
            }
            Command::Exit => {
                self.exit();
                Ok(())
            }
        }
    }

    fn progress(&self) -> Progress {
        if self.exited {
            Progress::Exited
        } else if self.in_combat() {
            Progress::Combat
        } else {
            Progress::Continue
        }
    }

    fn finish(&mut self, over: GameOver) -> Progress {
        let outcome = over.outcome();
        info!(game = %self.name, ?outcome, "game finished");
        self.pending_encounter = None;
        self.outcome = Some(outcome.clone());
        self.log.push(LogEvent::Finished(outcome.clone()));
        Progress::Finished(outcome)
    }
}
