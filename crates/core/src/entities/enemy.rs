use serde::{Deserialize, Serialize};

use super::stats::stat_line;
use super::{Combatant, Strike, ensure_health, ensure_name, ensure_non_negative, ensure_positive};
use crate::dice::Dice;
use crate::error::ValidationError;

const SENTINEL_SHOUT: &str = "Die Trash!";

/// What an enemy did with its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyTurn {
    Attacked(Strike),
    Regenerated { amount: i32 },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EnemyRecord", into = "EnemyRecord")]
pub struct Enemy {
    name: String,
    base_health: i32,
    health: i32,
    regeneration: i32,
    strength: i32,
    random_strength: i32,
    shouts: Vec<String>,
    description: String,
}

impl Enemy {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_health(&self) -> i32 {
        self.base_health
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn regeneration(&self) -> i32 {
        self.regeneration
    }

    pub fn strength(&self) -> i32 {
        self.strength
    }

    pub fn random_strength(&self) -> i32 {
        self.random_strength
    }

    pub fn shouts(&self) -> &[String] {
        &self.shouts
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        self.name = ensure_name("enemy", name.into())?;
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

    pub fn set_regeneration(&mut self, regeneration: i32) -> Result<(), ValidationError> {
        self.regeneration = ensure_non_negative("regeneration", regeneration)?;
        Ok(())
    }

    pub fn set_strength(&mut self, strength: i32) -> Result<(), ValidationError> {
        self.strength = ensure_non_negative("strength", strength)?;
        Ok(())
    }

    pub fn set_random_strength(&mut self, random_strength: i32) -> Result<(), ValidationError> {
        self.random_strength = ensure_non_negative("random strength", random_strength)?;
        Ok(())
    }

    /// An empty list is replaced by the sentinel shout.
    pub fn set_shouts(&mut self, shouts: Vec<String>) {
        self.shouts = normalize_shouts(shouts);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Loses `min(damage, health)` and reports whether still alive.
    pub fn take_damage(&mut self, damage: i32) -> Result<bool, ValidationError> {
        ensure_non_negative("damage", damage)?;
        self.health -= damage.min(self.health);
        Ok(self.is_alive())
    }

    /// Heals by the regeneration stat, capped at base health. Returns the
    /// amount actually restored.
    pub fn regenerate(&mut self) -> i32 {
        let before = self.health;
        self.health = self.health.saturating_add(self.regeneration).min(self.base_health);
        self.health - before
    }

    /// Rolls `strength + 0..=random_strength` and lands it on `target`.
    pub fn inflict_damage(&self, target: &mut impl Combatant, dice: &mut Dice) -> Strike {
        let rolled = self.strength.saturating_add(dice.roll(self.random_strength));
        target.receive_hit(rolled)
    }

    /// Whether the enemy attacks rather than regenerates this turn.
    ///
    /// A healthy enemy, or one unable to heal, always attacks. Otherwise it
    /// attacks when `coin` comes up or when regenerating would overshoot its
    /// base health.
    pub fn chooses_attack(&self, coin: bool) -> bool {
        if self.regeneration == 0 || self.health == self.base_health {
            return true;
        }
        coin || self.health.saturating_add(self.regeneration) > self.base_health
    }

    pub fn take_turn(&mut self, target: &mut impl Combatant, dice: &mut Dice) -> EnemyTurn {
        let coin = dice.coin_flip();
        if self.chooses_attack(coin) {
            EnemyTurn::Attacked(self.inflict_damage(target, dice))
        } else {
            EnemyTurn::Regenerated { amount: self.regenerate() }
        }
    }

    pub fn shout(&self, dice: &mut Dice) -> &str {
        dice.pick(&self.shouts).map_or(SENTINEL_SHOUT, String::as_str)
    }

    pub fn info(&self) -> String {
        let mut info = format!("Name: {}\n", self.name);
        info.push_str(&stat_line("Health", self.health, self.base_health));
        info.push_str(&stat_line("Strength", self.strength, self.strength.saturating_add(self.random_strength)));
        info
    }
}

impl Combatant for Enemy {
    fn name(&self) -> &str {
        &self.name
    }

    fn receive_hit(&mut self, rolled: i32) -> Strike {
        let dealt = rolled.max(0).min(self.health);
        self.health -= dealt;
        Strike { rolled, dealt, target_alive: self.is_alive() }
    }
}

fn normalize_shouts(shouts: Vec<String>) -> Vec<String> {
    if shouts.is_empty() { vec![SENTINEL_SHOUT.to_string()] } else { shouts }
}

/// Persisted form of an [`Enemy`]; missing keys take the stock monster's
/// values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyRecord {
    pub name: String,
    pub base_health: i32,
    pub health: i32,
    pub regeneration: i32,
    pub strength: i32,
    pub random_strength: i32,
    pub shouts: Vec<String>,
    pub description: String,
}

impl Default for EnemyRecord {
    fn default() -> Self {
        Self {
            name: "Monster".to_string(),
            base_health: 100,
            health: 100,
            regeneration: 10,
            strength: 10,
            random_strength: 10,
            shouts: vec![SENTINEL_SHOUT.to_string()],
            description: String::new(),
        }
    }
}

impl TryFrom<EnemyRecord> for Enemy {
    type Error = ValidationError;

    fn try_from(record: EnemyRecord) -> Result<Self, Self::Error> {
        let base_health = ensure_positive("base health", record.base_health)?;
        Ok(Self {
            name: ensure_name("enemy", record.name)?,
            base_health,
            health: ensure_health(record.health, base_health)?,
            regeneration: ensure_non_negative("regeneration", record.regeneration)?,
            strength: ensure_non_negative("strength", record.strength)?,
            random_strength: ensure_non_negative("random strength", record.random_strength)?,
            shouts: normalize_shouts(record.shouts),
            description: record.description,
        })
    }
}

impl From<Enemy> for EnemyRecord {
    fn from(enemy: Enemy) -> Self {
        Self {
            name: enemy.name,
            base_health: enemy.base_health,
            health: enemy.health,
            regeneration: enemy.regeneration,
            strength: enemy.strength,
            random_strength: enemy.random_strength,
            shouts: enemy.shouts,
            description: enemy.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::entities::{Player, PlayerRecord};

    fn enemy(health: i32, base_health: i32, regeneration: i32) -> Enemy {
        Enemy::try_from(EnemyRecord { health, base_health, regeneration, ..EnemyRecord::default() }).expect("valid")
    }

    #[test]
    fn defaults_describe_the_stock_monster() {
        let monster = Enemy::try_from(EnemyRecord::default()).expect("valid");
        assert_eq!(monster.name(), "Monster");
        assert_eq!((monster.health(), monster.base_health()), (100, 100));
        assert_eq!(monster.shouts(), ["Die Trash!".to_string()]);
    }

    #[test]
    fn empty_shouts_become_sentinel() {
        let monster: Enemy = serde_json::from_value(json!({ "name": "Rat", "shouts": [] })).expect("valid");
        assert_eq!(monster.shouts(), ["Die Trash!".to_string()]);
    }

    #[test]
    fn construction_rejects_health_above_base() {
        let err = Enemy::try_from(EnemyRecord { health: 101, ..EnemyRecord::default() }).unwrap_err();
        assert_eq!(err, ValidationError::HealthAboveBase { health: 101, base_health: 100 });
    }

    #[test]
    fn construction_rejects_dead_enemy() {
        let err = Enemy::try_from(EnemyRecord { health: 0, ..EnemyRecord::default() }).unwrap_err();
        assert_eq!(err, ValidationError::NotPositive { stat: "health", value: 0 });
    }

    #[test]
    fn failed_setter_leaves_state_untouched() {
        let mut monster = enemy(50, 100, 10);
        assert!(monster.set_health(150).is_err());
        assert!(monster.set_base_health(40).is_err());
        assert!(monster.set_strength(-3).is_err());
        assert_eq!(monster, enemy(50, 100, 10));
    }

    #[test]
    fn take_damage_clamps_at_zero() {
        let mut monster = enemy(10, 100, 0);
        assert_eq!(monster.take_damage(4), Ok(true));
        assert_eq!(monster.take_damage(400), Ok(false));
        assert_eq!(monster.health(), 0);
        assert!(monster.take_damage(-1).is_err());
    }

    #[test]
    fn wounded_enemy_regenerates_on_losing_coin() {
        let mut monster = enemy(990, 1000, 10);
        assert!(!monster.chooses_attack(false));
        assert_eq!(monster.regenerate(), 10);
        assert_eq!(monster.health(), 1000);
    }

    #[test]
    fn overshooting_regeneration_means_attack() {
        let monster = enemy(999, 1000, 10);
        assert!(monster.chooses_attack(false));
        assert!(monster.chooses_attack(true));
    }

    #[test]
    fn healthy_or_non_regenerating_enemy_always_attacks() {
        assert!(enemy(1000, 1000, 10).chooses_attack(false));
        assert!(enemy(10, 1000, 0).chooses_attack(false));
    }

    #[test]
    fn take_turn_at_full_health_attacks_player() {
        let mut monster = Enemy::try_from(EnemyRecord { random_strength: 0, ..EnemyRecord::default() }).expect("valid");
        let mut player = Player::try_from(PlayerRecord::default()).expect("valid");
        let mut dice = Dice::seeded(5);

        let turn = monster.take_turn(&mut player, &mut dice);

        assert_eq!(turn, EnemyTurn::Attacked(Strike { rolled: 10, dealt: 10, target_alive: true }));
        assert_eq!(player.health(), 90);
    }

    #[test]
    fn info_lists_health_and_strength_bars() {
        let monster = Enemy::try_from(EnemyRecord::default()).expect("valid");
        assert_eq!(
            monster.info(),
            "Name: Monster\n\
             Health: [===================100/100=====================]\n\
             Strength: [===================10/20=--------------------]\n"
        );
    }

    #[test]
    fn huge_stats_saturate_instead_of_overflowing() {
        let mut healer = enemy(10, 100, i32::MAX);
        assert!(healer.chooses_attack(false));
        assert_eq!(healer.regenerate(), 90);

        let brute = Enemy::try_from(EnemyRecord { strength: i32::MAX, random_strength: 1, ..EnemyRecord::default() })
            .expect("valid");
        assert!(brute.info().contains(&format!("Strength: [{}", "=".repeat(19))));
        let mut player = Player::try_from(PlayerRecord::default()).expect("valid");
        let strike = brute.inflict_damage(&mut player, &mut Dice::seeded(3));
        assert_eq!(strike.rolled, i32::MAX);
        assert_eq!(player.health(), 0);
    }

    #[test]
    fn shout_picks_from_list() {
        let monster: Enemy =
            serde_json::from_value(json!({ "shouts": ["Grr!", "Hss!"] })).expect("valid");
        let mut dice = Dice::seeded(11);
        for _ in 0..10 {
            assert!(["Grr!", "Hss!"].contains(&monster.shout(&mut dice)));
        }
    }
}
