use serde::{Deserialize, Serialize};

use super::item::{Armor, Item, Key, Weapon};
use super::stats::stat_line;
use super::{Combatant, Strike, ensure_health, ensure_name, ensure_non_negative, ensure_positive};
use crate::dice::Dice;
use crate::error::ValidationError;

/// Outcome of using an item from the equipment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemUse {
    EquippedWeapon { weapon: String, previous: Option<String> },
    EquippedArmor { armor: String, previous: Option<String> },
    Drank { healed: i32 },
    AlreadyFullHealth,
    /// Keys stay in the equipment; the gate logic decides what they open.
    Key(Key),
    Inert { item: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PlayerRecord", into = "PlayerRecord")]
pub struct Player {
    name: String,
    base_health: i32,
    health: i32,
    strength: i32,
    weapon: Option<Weapon>,
    armor: Option<Armor>,
    equipment_size: usize,
    equipment: Vec<Item>,
}

impl Player {
    /// Stock player carrying `name`.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        Self::try_from(PlayerRecord { name: name.into(), ..PlayerRecord::default() })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_health(&self) -> i32 {
        self.base_health
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn strength(&self) -> i32 {
        self.strength
    }

    pub fn weapon(&self) -> Option<&Weapon> {
        self.weapon.as_ref()
    }

    pub fn armor(&self) -> Option<&Armor> {
        self.armor.as_ref()
    }

    pub fn equipment_size(&self) -> usize {
        self.equipment_size
    }

    pub fn equipment(&self) -> &[Item] {
        &self.equipment
    }

    pub fn equipment_is_full(&self) -> bool {
        self.equipment.len() >= self.equipment_size
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        self.name = ensure_name("player", name.into())?;
        Ok(())
    }

    pub fn set_health(&mut self, health: i32) -> Result<(), ValidationError> {
        self.health = ensure_health(health, self.base_health)?;
        Ok(())
    }

    pub fn set_base_health(&mut self, base_health: i32) -> Result<(), ValidationError> {
        ensure_positive("base health", base_health)?;
        if self.health > base_health {
            return Err(ValidationError::HealthAboveBase { health: self.health, base_health });
        }
        self.base_health = base_health;
        Ok(())
    }

    pub fn set_strength(&mut self, strength: i32) -> Result<(), ValidationError> {
        self.strength = ensure_non_negative("strength", strength)?;
        Ok(())
    }

    pub fn set_weapon(&mut self, weapon: Option<Weapon>) {
        self.weapon = weapon;
    }

    pub fn set_armor(&mut self, armor: Option<Armor>) {
        self.armor = armor;
    }

    pub fn set_equipment_size(&mut self, equipment_size: usize) -> Result<(), ValidationError> {
        ensure_capacity(self.equipment.len(), equipment_size)?;
        self.equipment_size = equipment_size;
        Ok(())
    }

    pub fn set_equipment(&mut self, equipment: Vec<Item>) -> Result<(), ValidationError> {
        ensure_capacity(equipment.len(), self.equipment_size)?;
        self.equipment = equipment;
        Ok(())
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Damage left after the worn armor absorbs its share, truncated toward
    /// zero.
    pub fn damage_after_armor(&self, amount: i32) -> i32 {
        match &self.armor {
            Some(armor) => (i64::from(amount) * i64::from(100 - armor.defence()) / 100) as i32,
            None => amount,
        }
    }

    /// Loses the armor-scaled `amount`, clamped at zero health. Returns
    /// whether the player survived.
    pub fn take_damage(&mut self, amount: i32) -> Result<bool, ValidationError> {
        ensure_non_negative("damage", amount)?;
        Ok(self.receive_hit(amount).target_alive)
    }

    /// Heals by `amount`, capped at base health. Returns the amount actually
    /// restored.
    pub fn regenerate(&mut self, amount: i32) -> Result<i32, ValidationError> {
        ensure_non_negative("regeneration", amount)?;
        Ok(self.restore(amount))
    }

    pub(crate) fn restore(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = self.health.saturating_add(amount.max(0)).min(self.base_health);
        self.health - before
    }

    /// Rolls strength plus the weapon's `base + 0..=random` and lands it on
    /// `target`.
    pub fn inflict_damage(&self, target: &mut impl Combatant, dice: &mut Dice) -> Strike {
        let mut rolled = self.strength;
        if let Some(weapon) = &self.weapon {
            rolled = rolled.saturating_add(weapon.base_strength()).saturating_add(dice.roll(weapon.random_strength()));
        }
        target.receive_hit(rolled)
    }

    /// Adds `item` to the equipment, handing it back when there is no room.
    pub fn pickup_item(&mut self, item: Item) -> Result<(), Item> {
        if self.equipment_is_full() {
            return Err(item);
        }
        self.equipment.push(item);
        Ok(())
    }

    pub fn drop_item(&mut self, slot: usize) -> Option<Item> {
        (slot < self.equipment.len()).then(|| self.equipment.remove(slot))
    }

    /// First key in the equipment opening a gate to `level`.
    pub fn search_for_key(&self, level: u32) -> Option<&Key> {
        self.equipment.iter().find_map(|item| match item {
            Item::Key(key) if key.level() == level => Some(key),
            _ => None,
        })
    }

    /// Uses the item at `slot`. `None` when the slot is empty.
    pub fn use_item(&mut self, slot: usize) -> Option<ItemUse> {
        let used = match self.equipment.get(slot)? {
            Item::Weapon(weapon) => {
                let weapon = weapon.clone();
                let name = weapon.name().to_string();
                let previous = self.weapon.replace(weapon);
                let previous_name = previous.as_ref().map(|w| w.name().to_string());
                self.stow(slot, previous.map(Item::Weapon));
                ItemUse::EquippedWeapon { weapon: name, previous: previous_name }
            }
            Item::Armor(armor) => {
                let armor = armor.clone();
                let name = armor.name().to_string();
                let previous = self.armor.replace(armor);
                let previous_name = previous.as_ref().map(|a| a.name().to_string());
                self.stow(slot, previous.map(Item::Armor));
                ItemUse::EquippedArmor { armor: name, previous: previous_name }
            }
            Item::Potion(potion) => {
                if self.health == self.base_health {
                    return Some(ItemUse::AlreadyFullHealth);
                }
                let amount = potion.health();
                self.equipment.remove(slot);
                ItemUse::Drank { healed: self.restore(amount) }
            }
            Item::Key(key) => ItemUse::Key(key.clone()),
            Item::Plain(item) => ItemUse::Inert { item: item.name().to_string() },
        };
        Some(used)
    }

    /// Puts the item taken off by an equip back into `slot`, or closes the
    /// gap when nothing was worn.
    fn stow(&mut self, slot: usize, replacement: Option<Item>) {
        match replacement {
            Some(item) => self.equipment[slot] = item,
            None => {
                self.equipment.remove(slot);
            }
        }
    }

    pub fn info(&self) -> String {
        let mut info = format!("PLAYER\nName: {}\n", self.name);
        info.push_str(&stat_line("Health", self.health, self.base_health));
        let (strength, ceiling) = match &self.weapon {
            Some(weapon) => {
                let strength = self.strength.saturating_add(weapon.base_strength());
                (strength, strength.saturating_add(weapon.random_strength()))
            }
            None => (self.strength, self.strength),
        };
        info.push_str(&stat_line("Strength", strength, ceiling));
        if let Some(armor) = &self.armor {
            info.push_str(&stat_line("Armor", armor.defence(), 100));
        }
        info
    }
}

impl Combatant for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn receive_hit(&mut self, rolled: i32) -> Strike {
        let dealt = self.damage_after_armor(rolled.max(0)).min(self.health);
        self.health -= dealt;
        Strike { rolled, dealt, target_alive: self.is_alive() }
    }
}

fn ensure_capacity(len: usize, size: usize) -> Result<(), ValidationError> {
    if len > size {
        return Err(ValidationError::EquipmentOverCapacity { len, size });
    }
    Ok(())
}

/// Persisted form of a [`Player`]; missing keys take the nameless stock
/// player's values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerRecord {
    pub name: String,
    pub base_health: i32,
    pub health: i32,
    pub strength: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weapon: Option<Weapon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub armor: Option<Armor>,
    pub equipment_size: usize,
    pub equipment: Vec<Item>,
}

impl Default for PlayerRecord {
    fn default() -> Self {
        Self {
            name: "Nameless".to_string(),
            base_health: 100,
            health: 100,
            strength: 10,
            weapon: None,
            armor: None,
            equipment_size: 0,
            equipment: Vec::new(),
        }
    }
}

impl TryFrom<PlayerRecord> for Player {
    type Error = ValidationError;

    fn try_from(record: PlayerRecord) -> Result<Self, Self::Error> {
        let base_health = ensure_positive("base health", record.base_health)?;
        ensure_capacity(record.equipment.len(), record.equipment_size)?;
        Ok(Self {
            name: ensure_name("player", record.name)?,
            base_health,
            health: ensure_health(record.health, base_health)?,
            strength: ensure_non_negative("strength", record.strength)?,
            weapon: record.weapon,
            armor: record.armor,
            equipment_size: record.equipment_size,
            equipment: record.equipment,
        })
    }
}

impl From<Player> for PlayerRecord {
    fn from(player: Player) -> Self {
        Self {
            name: player.name,
            base_health: player.base_health,
            health: player.health,
            strength: player.strength,
            weapon: player.weapon,
            armor: player.armor,
            equipment_size: player.equipment_size,
            equipment: player.equipment,
        }
    }
}
