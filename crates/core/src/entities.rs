//! Items, enemies and the player.
//! Each entity owns its numeric invariants and rejects any construction or
//! mutation that would break them. Combat arithmetic lives here too.

pub mod enemy;
pub mod item;
pub mod player;
pub mod stats;

pub use enemy::{Enemy, EnemyRecord, EnemyTurn};
pub use item::{Armor, Item, ItemRecord, Key, Plain, Potion, Weapon};
pub use player::{ItemUse, Player, PlayerRecord};
pub use stats::format_stats;

use crate::error::ValidationError;

/// Result of one blow landing on a [`Combatant`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Strike {
    /// Damage rolled by the attacker.
    pub rolled: i32,
    /// Damage the target actually lost after its own reductions.
    pub dealt: i32,
    pub target_alive: bool,
}

/// Anything that can be on the receiving end of an attack.
pub trait Combatant {
    fn name(&self) -> &str;

    /// Applies a non-negative rolled hit.
    fn receive_hit(&mut self, rolled: i32) -> Strike;
}

pub(crate) fn ensure_name(entity: &'static str, name: String) -> Result<String, ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName { entity });
    }
    Ok(name)
}

pub(crate) fn ensure_non_negative(stat: &'static str, value: i32) -> Result<i32, ValidationError> {
    if value < 0 {
        return Err(ValidationError::Negative { stat, value });
    }
    Ok(value)
}

pub(crate) fn ensure_positive(stat: &'static str, value: i32) -> Result<i32, ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NotPositive { stat, value });
    }
    Ok(value)
}

pub(crate) fn ensure_health(health: i32, base_health: i32) -> Result<i32, ValidationError> {
    ensure_positive("health", health)?;
    if health > base_health {
        return Err(ValidationError::HealthAboveBase { health, base_health });
    }
    Ok(health)
}
