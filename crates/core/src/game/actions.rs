//! Per-round action menu.
//! This module exists to decide which actions are on offer for the current
//! state. It does not run any of them.

use super::*;

impl Game {
    /// Actions on offer this round, grouped Player, Field, Location, Game.
    /// During a fight only the fight moves are offered; a finished game
    /// offers nothing.
    pub fn available_actions(&self) -> Vec<Action> {
        if self.end() {
            return Vec::new();
        }
        if self.in_combat() {
            return vec![Action::Attack, Action::Hide];
        }
        let mut actions = self.player_actions();
        actions.extend(self.field_actions());
        actions.extend(self.location_actions());
        actions.extend([Action::Save, Action::Exit]);
        actions
    }

    fn player_actions(&self) -> Vec<Action> {
        let carrying = !self.player.equipment().is_empty();
        let mut actions = Vec::with_capacity(3);
        if carrying {
            actions.push(Action::UseItem);
        }
        actions.push(Action::PlayerInfo);
        if carrying {
            actions.push(Action::EquipmentInfo);
        }
        actions
    }

    fn field_actions(&self) -> Vec<Action> {
        let field = self.location().current_field();
        let carrying = !self.player.equipment().is_empty();
        let mut actions = Vec::new();
        if field.enemy().is_some() {
            actions.push(Action::EnemyInfo);
        }
        if field.item().is_some() {
            actions.push(Action::ItemInfo);
        }
        if carrying && field.item().is_none() {
            actions.push(Action::DropItem);
        }
        if !self.player.equipment_is_full() && field.item().is_some() && field.enemy().is_none() {
            actions.push(Action::PickupItem);
        }
        if field.is_gate() {
            actions.push(Action::Open);
        }
        actions
    }

    fn location_actions(&self) -> Vec<Action> {
        let location = self.location();
        let mut actions = vec![Action::Map, Action::LocationInfo];
        actions.extend(
            Direction::ALL.into_iter().filter(|&direction| location.is_enterable(direction)).map(Action::Go),
        );
        actions.push(Action::Wait);
        actions
    }
}
