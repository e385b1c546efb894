//! Equipment commands.
//! This module exists to bounds-check slots and report what the player did
//! with an item. It does not own the swap rules, which live on the player.

use super::*;
use crate::entities::ItemUse;

impl Game {
    fn ensure_slot(&self, slot: usize) -> Result<(), GameError> {
        let len = self.player.equipment().len();
        if slot >= len {
            return Err(GameError::NoSuchSlot { slot, len });
        }
        Ok(())
    }

    pub(super) fn use_item(&mut self, scenario: &Scenario, slot: usize) -> Result<(), Halt> {
        self.ensure_slot(slot)?;
        let Some(used) = self.player.use_item(slot) else {
            return Ok(());
        };
        let event = match used {
            ItemUse::EquippedWeapon { weapon, previous } => LogEvent::WeaponEquipped { weapon, previous },
            ItemUse::EquippedArmor { armor, previous } => LogEvent::ArmorEquipped { armor, previous },
            ItemUse::Drank { healed } => LogEvent::PotionDrunk { healed },
            ItemUse::AlreadyFullHealth => LogEvent::AlreadyFullHealth,
            ItemUse::Inert { item } => LogEvent::ItemInert { item },
            ItemUse::Key(key) => return self.open_gate_with(scenario, &key),
        };
        self.log.push(event);
        Ok(())
    }

    pub(super) fn drop_item(&mut self, slot: usize) -> Result<(), Halt> {
        self.ensure_slot(slot)?;
        let index = self.level_index();
        if let Some(item) = self.locations[index].current_field_mut().drop_item(&mut self.player, slot) {
            self.log.push(LogEvent::ItemDropped { item });
        }
        Ok(())
    }

    pub(super) fn pickup_item(&mut self) {
        let index = self.level_index();
        let event = match self.locations[index].current_field_mut().pickup(&mut self.player) {
            Some(item) => LogEvent::ItemPickedUp { item },
            None => LogEvent::InventoryFull,
        };
        self.log.push(event);
    }
}
