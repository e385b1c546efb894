use game_core::entities::{EnemyRecord, PlayerRecord};
use game_core::{
    Armor, Borders, Enemy, Field, GoTo, Item, Key, Location, Player, Potion, Scenario, ValidationError, Weapon,
};
use proptest::prelude::*;

fn arb_weapon() -> impl Strategy<Value = Weapon> {
    ("[A-Z][a-z]{0,8}", 0..50_i32, 0..50_i32)
        .prop_map(|(name, base, random)| Weapon::new(name, "", base, random).unwrap())
}

fn arb_armor() -> impl Strategy<Value = Armor> {
    ("[A-Z][a-z]{0,8}", 0..=100_i32).prop_map(|(name, defence)| Armor::new(name, "", defence).unwrap())
}

fn arb_item() -> impl Strategy<Value = Item> {
    prop_oneof![
        arb_weapon().prop_map(Item::Weapon),
        arb_armor().prop_map(Item::Armor),
        (1..10_u32).prop_map(|level| Item::Key(Key::new("Key", "", format!("lvl{level}"), level).unwrap())),
        (0..200_i32).prop_map(|health| Item::Potion(Potion::new("Potion", "", health).unwrap())),
    ]
}

prop_compose! {
    fn arb_player()(
        base_health in 1..500_i32,
        health_ratio in 1..=100_i32,
        strength in 0..50_i32,
        weapon in prop::option::of(arb_weapon()),
        armor in prop::option::of(arb_armor()),
        equipment_size in 0..6_usize,
        equipment in prop::collection::vec(arb_item(), 0..6),
    ) -> Player {
        let health = (base_health * health_ratio / 100).max(1);
        let equipment = equipment.into_iter().take(equipment_size).collect();
        Player::try_from(PlayerRecord {
            name: "Hero".into(),
            base_health,
            health,
            strength,
            weapon,
            armor,
            equipment_size,
            equipment,
        })
        .unwrap()
    }
}

prop_compose! {
    fn arb_enemy()(
        base_health in 1..500_i32,
        health_ratio in 1..=100_i32,
        regeneration in 0..30_i32,
        strength in 0..30_i32,
        random_strength in 0..30_i32,
    ) -> Enemy {
        Enemy::try_from(EnemyRecord {
            base_health,
            health: (base_health * health_ratio / 100).max(1),
            regeneration,
            strength,
            random_strength,
            ..EnemyRecord::default()
        })
        .unwrap()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn players_survive_a_save_and_load(player in arb_player()) {
        let json = serde_json::to_string(&player).unwrap();
        let reloaded: Player = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(reloaded, player);
    }

    #[test]
    fn damage_never_increases_health_and_stops_at_zero(
        mut player in arb_player(),
        hits in prop::collection::vec(0..80_i32, 1..20),
    ) {
        for hit in hits {
            let before = player.health();
            let alive = player.take_damage(hit).unwrap();
            prop_assert!(player.health() <= before);
            prop_assert!(player.health() >= 0);
            prop_assert_eq!(alive, player.health() > 0);
        }
    }

    #[test]
    fn negative_damage_is_rejected_without_change(mut player in arb_player(), hit in -100..0_i32) {
        let before = player.clone();
        prop_assert!(player.take_damage(hit).is_err());
        prop_assert_eq!(player, before);
    }

    #[test]
    fn health_above_base_is_rejected(mut enemy in arb_enemy(), excess in 1..100_i32) {
        let before = enemy.clone();
        let err = enemy.set_health(enemy.base_health() + excess).unwrap_err();
        prop_assert!(matches!(err, ValidationError::HealthAboveBase { .. }), "{}", err);
        prop_assert_eq!(enemy, before);
    }

    #[test]
    fn regeneration_is_capped_at_base_health(mut enemy in arb_enemy()) {
        enemy.regenerate();
        prop_assert!(enemy.health() <= enemy.base_health());
        prop_assert!(enemy.is_alive());
    }

    #[test]
    fn fields_with_occupants_survive_a_save_and_load(
        enemy in prop::option::of(arb_enemy()),
        item in prop::option::of(arb_item()),
        danger in -50..50_i32,
        seen in any::<bool>(),
        go_to in prop_oneof![Just(GoTo::Nowhere), (1..5_u32).prop_map(GoTo::Level), Just(GoTo::Win)],
    ) {
        let mut field = Field::new("Cell", "Somewhere").with_danger(danger).with_seen(seen).with_go_to(go_to);
        field.set_enemy(enemy);
        field.set_item(item);
        let json = serde_json::to_string(&field).unwrap();
        let reloaded: Field = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(reloaded, field);
    }
}

#[test]
fn bundled_locations_survive_a_save_and_load() {
    let scenario = Scenario::build_default().unwrap();
    for (level, id) in [(1, "lvl1"), (2, "lvl2")] {
        let location = scenario.build_location(id, level).unwrap();
        let json = serde_json::to_string_pretty(&location).unwrap();
        let reloaded: Location = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, location);

        let rebuilt = Location::new(location.fields().to_vec(), Borders::Present, None, level).unwrap();
        assert_eq!((rebuilt.width(), rebuilt.height()), (location.width(), location.height()));
    }
}

#[test]
fn invalid_records_fail_to_load() {
    assert!(serde_json::from_str::<Player>(r#"{"health": 150, "base_health": 100}"#).is_err());
    assert!(serde_json::from_str::<Enemy>(r#"{"name": ""}"#).is_err());
    assert!(serde_json::from_str::<Item>(r#"{"class": "Armor", "defence": 120}"#).is_err());
    assert!(serde_json::from_str::<Field>(r#"{"go_to": "LOSE"}"#).is_err());
}
