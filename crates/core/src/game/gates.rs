//! Gate opening and location discovery.
//! This module exists to turn a [`GateResolution`] into level changes and
//! newly built locations. It does not decide which resolution applies; the
//! field does.

use super::*;
use crate::entities::Key;
use crate::field::GateResolution;

impl Game {
    /// `open` on the current field, using any matching key the player carries.
    pub(super) fn open_gate(&mut self, scenario: &Scenario) -> Result<(), Halt> {
        let resolution = self.location().current_field().open(self.level, self.locations.len(), &self.player);
        self.apply_gate(scenario, resolution)
    }

    /// Using a key from the equipment on the current field.
    pub(super) fn open_gate_with(&mut self, scenario: &Scenario, key: &Key) -> Result<(), Halt> {
        let resolution = self.location().current_field().open_with_key(self.level, self.locations.len(), key);
        self.apply_gate(scenario, resolution)
    }

    fn apply_gate(&mut self, scenario: &Scenario, resolution: GateResolution) -> Result<(), Halt> {
        debug!(?resolution, level = self.level, "gate resolved");
        let event = match resolution {
            GateResolution::Victory => return Err(Halt::Over(GameOver::Victory)),
            GateResolution::NotAGate => LogEvent::NotAGate,
            GateResolution::NoEarlierLocation => LogEvent::NoEarlierLocation,
            GateResolution::NoMatchingKey => LogEvent::NoMatchingKey,
            GateResolution::KeyMismatch => LogEvent::KeyMismatch,
            GateResolution::Back { level } => {
                self.set_level(level)?;
                LogEvent::LeftLocation { level }
            }
            GateResolution::AlreadyOpen { level } => {
                self.set_level(level)?;
                LogEvent::AlreadyOpen { level }
            }
            GateResolution::Unlock { key } => {
                let level = self.add_location(scenario, key.location())?;
                self.set_level(level)?;
                info!(layout = key.location(), level, "location unlocked");
                LogEvent::LocationUnlocked { level }
            }
        };
        self.log.push(event);
        Ok(())
    }

    /// Builds `layout` as the next discovered location and returns its level.
    /// The player stays where they are.
    pub fn add_location(&mut self, scenario: &Scenario, layout: &str) -> Result<u32, GameError> {
        let level = self.locations.len() as u32 + 1;
        let location = scenario.build_location(layout, level)?;
        self.locations.push(location);
        Ok(level)
    }
}
