//! Fight prompt state and its resolution.
//! This module exists to keep the attack/hide loop in one place.
//! It does not own damage arithmetic, which lives on the entities.

use super::*;
use crate::field::Arrival;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct PendingEncounter {
    pub(super) enemy: String,
}

impl Game {
    pub(super) fn record_arrival(&mut self, arrival: Arrival) {
        let field = self.location().current_field().name().to_string();
        self.log.push(LogEvent::Entered { field });
        if arrival.hazard_damage > 0 {
            self.log.push(LogEvent::HazardDamage { amount: arrival.hazard_damage });
        }
        if arrival.regenerated > 0 {
            self.log.push(LogEvent::Regenerated { amount: arrival.regenerated });
        }
        if let Some(encounter) = arrival.encounter {
            debug!(enemy = %encounter.enemy, "fight started");
            self.log.push(LogEvent::EnemyAppeared { enemy: encounter.enemy.clone(), shout: encounter.shout });
            self.pending_encounter = Some(PendingEncounter { enemy: encounter.enemy });
        }
    }

    pub(super) fn attack(&mut self) -> Result<(), Halt> {
        let index = self.level_index();
        let field = self.locations[index].current_field_mut();
        let Some(exchange) = field.exchange(&mut self.player, &mut self.dice)? else {
            self.pending_encounter = None;
            return Ok(());
        };
        self.log.push(LogEvent::EnemyStruck { enemy: exchange.enemy.clone(), damage: exchange.blow.dealt });
        match exchange.counter {
            Some(counter) => {
                self.log.push(LogEvent::PlayerStruck { enemy: exchange.enemy, damage: counter.dealt });
            }
            None => {
                debug!(enemy = %exchange.enemy, "fight won");
                self.log.push(LogEvent::EnemyDefeated { enemy: exchange.enemy });
                self.pending_encounter = None;
            }
        }
        Ok(())
    }

    pub(super) fn hide(&mut self) {
        if let Some(encounter) = self.pending_encounter.take() {
            self.log.push(LogEvent::Hid { enemy: encounter.enemy });
        }
    }
}
