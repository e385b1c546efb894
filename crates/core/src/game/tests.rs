use super::test_support::*;
use super::*;
use crate::entities::Item;
use crate::types::Direction::{East, North, South, West};

const ATTACK: Command = Command::Fight(FightMove::Attack);

// -- start and menus --

#[test]
fn start_places_renamed_player_on_first_gate() {
    let scenario = tiny_scenario();
    let game = new_game(&scenario);

    assert_eq!(game.name(), "Tiny");
    assert_eq!(game.player().name(), "Tester");
    assert_eq!(game.level(), 1);
    assert_eq!(game.locations().len(), 1);
    assert_eq!(game.location().coordinates(), (1, 1));
    assert!(game.log().is_empty());
    assert!(!game.end());
}

#[test]
fn empty_handed_menu_offers_movement_and_gate() {
    let scenario = tiny_scenario();
    let game = new_game(&scenario);

    assert_eq!(
        game.available_actions(),
        vec![
            Action::PlayerInfo,
            Action::Open,
            Action::Map,
            Action::LocationInfo,
            Action::Go(South),
            Action::Go(East),
            Action::Wait,
            Action::Save,
            Action::Exit,
        ]
    );
}

#[test]
fn unavailable_command_is_rejected_without_side_effects() {
    let scenario = tiny_scenario();
    let mut game = new_game(&scenario);

    let err = game.apply(&scenario, Command::Go(North)).unwrap_err();
    assert!(matches!(err, GameError::Unavailable(Action::Go(North))), "{err}");
    assert!(matches!(game.apply(&scenario, Command::PickupItem), Err(GameError::Unavailable(Action::PickupItem))));
    assert_eq!(game.location().coordinates(), (1, 1));
    assert!(game.log().is_empty());
}

// -- fights --

#[test]
fn entering_occupied_field_starts_a_fight() {
    let scenario = tiny_scenario();
    let mut game = new_game(&scenario);

    let progress = game.apply(&scenario, Command::Go(East)).unwrap();

    assert_eq!(progress, Progress::Combat);
    assert!(game.in_combat());
    assert_eq!(game.opponent().map(Enemy::name), Some("Goblin"));
    assert_eq!(game.available_actions(), vec![Action::Attack, Action::Hide]);
    assert_eq!(
        game.log(),
        [
            LogEvent::Entered { field: "Den".into() },
            LogEvent::EnemyAppeared { enemy: "Goblin".into(), shout: "Grr!".into() },
        ]
    );
}

#[test]
fn attacking_until_the_enemy_dies_clears_the_field() {
    let scenario = tiny_scenario();
    let mut game = new_game(&scenario);
    play(&mut game, &scenario, &[Command::Go(East)]);
    game.drain_log();

    assert_eq!(game.apply(&scenario, ATTACK).unwrap(), Progress::Combat);
    assert_eq!(game.apply(&scenario, ATTACK).unwrap(), Progress::Continue);

    assert_eq!(
        game.drain_log(),
        vec![
            LogEvent::EnemyStruck { enemy: "Goblin".into(), damage: 10 },
            LogEvent::PlayerStruck { enemy: "Goblin".into(), damage: 5 },
            LogEvent::EnemyStruck { enemy: "Goblin".into(), damage: 5 },
            LogEvent::EnemyDefeated { enemy: "Goblin".into() },
        ]
    );
    assert_eq!(game.player().health(), 95);
    assert!(game.location().current_field().enemy().is_none());
    assert!(!game.in_combat());
    assert!(game.log().is_empty());
}

#[test]
fn hiding_ends_the_fight_but_leaves_the_enemy() {
    let scenario = tiny_scenario();
    let mut game = new_game(&scenario);
    play(&mut game, &scenario, &[Command::Go(East)]);

    let progress = game.apply(&scenario, Command::Fight(FightMove::Hide)).unwrap();

    assert_eq!(progress, Progress::Continue);
    assert_eq!(game.log().last(), Some(&LogEvent::Hid { enemy: "Goblin".into() }));
    assert!(game.available_actions().contains(&Action::EnemyInfo));
    assert_eq!(game.opponent(), None);

    assert_eq!(game.apply(&scenario, Command::Wait).unwrap(), Progress::Combat);
}

// -- hazards --

#[test]
fn hazard_damage_and_regeneration_are_logged() {
    let scenario = tiny_scenario();
    let mut game = new_game(&scenario);

    play(&mut game, &scenario, &[Command::Go(South), Command::Go(East), Command::Go(West)]);

    assert_eq!(
        game.log(),
        [
            LogEvent::Entered { field: "Spring".into() },
            LogEvent::Entered { field: "Pit".into() },
            LogEvent::HazardDamage { amount: 30 },
            LogEvent::Entered { field: "Spring".into() },
            LogEvent::Regenerated { amount: 10 },
        ]
    );
    assert_eq!(game.player().health(), 80);
}

#[test]
fn dying_on_a_hazard_finishes_the_game() {
    let scenario = tiny_scenario();
    let mut game = new_game(&scenario);
    play(&mut game, &scenario, &[Command::Go(South), Command::Go(East), Command::Wait, Command::Wait]);
    assert_eq!(game.player().health(), 10);

    let progress = game.apply(&scenario, Command::Wait).unwrap();

    let defeat = RunOutcome::Defeat(DeathCause::Hazard { field: "Pit".into() });
    assert_eq!(progress, Progress::Finished(defeat.clone()));
    assert_eq!(game.outcome(), Some(&defeat));
    assert_eq!(game.log().last(), Some(&LogEvent::Finished(defeat)));
    assert!(game.end());
    assert!(game.available_actions().is_empty());
    assert!(matches!(game.apply(&scenario, Command::Wait), Err(GameError::Finished)));
}

// -- equipment --

#[test]
fn picked_up_weapon_can_be_equipped() {
    let scenario = tiny_scenario();
    let mut game = new_game(&scenario);
    play(&mut game, &scenario, &[Command::Go(South), Command::Go(East), Command::Go(East)]);
    game.drain_log();

    play(&mut game, &scenario, &[Command::PickupItem, Command::UseItem { slot: 0 }]);

    assert_eq!(
        game.log(),
        [
            LogEvent::ItemPickedUp { item: "Sword".into() },
            LogEvent::WeaponEquipped { weapon: "Sword".into(), previous: None },
        ]
    );
    assert_eq!(game.player().weapon().map(|weapon| weapon.name()), Some("Sword"));
    assert!(game.player().equipment().is_empty());
    assert!(game.location().current_field().item().is_none());
}

#[test]
fn dropping_puts_the_item_back_on_the_field() {
    let scenario = tiny_scenario();
    let mut game = new_game(&scenario);
    reach_shrine(&mut game, &scenario);
    play(&mut game, &scenario, &[Command::PickupItem]);
    assert!(game.available_actions().contains(&Action::DropItem));

    let err = game.apply(&scenario, Command::DropItem { slot: 3 }).unwrap_err();
    assert!(matches!(err, GameError::NoSuchSlot { slot: 3, len: 1 }), "{err}");

    play(&mut game, &scenario, &[Command::DropItem { slot: 0 }]);
    assert_eq!(game.log().last(), Some(&LogEvent::ItemDropped { item: "Tooth Key".into() }));
    assert!(game.player().equipment().is_empty());
    assert_eq!(game.location().current_field().item().map(Item::name), Some("Tooth Key"));
}

#[test]
fn key_used_away_from_a_gate_does_nothing() {
    let scenario = tiny_scenario();
    let mut game = new_game(&scenario);
    reach_shrine(&mut game, &scenario);

    play(&mut game, &scenario, &[Command::PickupItem, Command::UseItem { slot: 0 }]);

    assert_eq!(game.log().last(), Some(&LogEvent::NotAGate));
    assert_eq!(game.player().equipment().len(), 1);
    assert_eq!(game.level(), 1);
}

// -- gates --

#[test]
fn first_gate_has_no_earlier_location() {
    let scenario = tiny_scenario();
    let mut game = new_game(&scenario);

    play(&mut game, &scenario, &[Command::Open]);

    assert_eq!(game.log(), [LogEvent::NoEarlierLocation]);
    assert_eq!(game.level(), 1);
}

#[test]
fn gate_stays_shut_without_a_key() {
    let scenario = tiny_scenario();
    let mut game = new_game(&scenario);
    reach_shrine(&mut game, &scenario);

    play(&mut game, &scenario, &[Command::Go(East), Command::Open]);

    assert_eq!(game.log().last(), Some(&LogEvent::NoMatchingKey));
    assert_eq!(game.locations().len(), 1);
}

#[test]
fn key_unlocks_travels_back_and_reopens() {
    let scenario = tiny_scenario();
    let mut game = new_game(&scenario);
    reach_shrine(&mut game, &scenario);
    play(&mut game, &scenario, &[Command::PickupItem, Command::Go(East)]);

    play(&mut game, &scenario, &[Command::Open]);
    assert_eq!(game.log().last(), Some(&LogEvent::LocationUnlocked { level: 2 }));
    assert_eq!((game.level(), game.locations().len()), (2, 2));
    assert_eq!(game.location().coordinates(), (1, 1));
    assert_eq!(game.location().level(), 2);

    play(&mut game, &scenario, &[Command::Open]);
    assert_eq!(game.log().last(), Some(&LogEvent::LeftLocation { level: 1 }));
    assert_eq!(game.level(), 1);
    assert_eq!(game.location().coordinates(), (5, 1));

    play(&mut game, &scenario, &[Command::Open]);
    assert_eq!(game.log().last(), Some(&LogEvent::AlreadyOpen { level: 2 }));
    assert_eq!((game.level(), game.locations().len()), (2, 2));
}

#[test]
fn key_from_equipment_opens_the_gate() {
    let scenario = tiny_scenario();
    let mut game = new_game(&scenario);
    reach_shrine(&mut game, &scenario);
    play(&mut game, &scenario, &[Command::PickupItem, Command::Go(East)]);

    play(&mut game, &scenario, &[Command::UseItem { slot: 0 }]);

    assert_eq!(game.log().last(), Some(&LogEvent::LocationUnlocked { level: 2 }));
    assert_eq!(game.level(), 2);
}

#[test]
fn reaching_the_exit_wins() {
    let scenario = tiny_scenario();
    let mut game = new_game(&scenario);
    reach_shrine(&mut game, &scenario);
    play(&mut game, &scenario, &[Command::PickupItem, Command::Go(East), Command::Open, Command::Go(East)]);

    let progress = game.apply(&scenario, Command::Go(East)).unwrap();

    assert_eq!(progress, Progress::Finished(RunOutcome::Victory));
    assert_eq!(game.outcome(), Some(&RunOutcome::Victory));
    assert!(game.end());
}

// -- session --

#[test]
fn exit_stops_the_round_loop() {
    let scenario = tiny_scenario();
    let mut game = new_game(&scenario);

    assert_eq!(game.apply(&scenario, Command::Exit).unwrap(), Progress::Exited);
    assert!(game.end());
    assert_eq!(game.outcome(), None);
}

#[test]
fn record_restores_progress() {
    let scenario = tiny_scenario();
    let mut game = new_game(&scenario);
    reach_shrine(&mut game, &scenario);
    play(&mut game, &scenario, &[Command::PickupItem, Command::Go(East), Command::Open]);

    let json = serde_json::to_string(&game.to_record()).unwrap();
    let record: GameRecord = serde_json::from_str(&json).unwrap();
    let restored = Game::from_record(record, 99).unwrap();

    assert_eq!(restored.to_record(), game.to_record());
    assert_eq!(restored.level(), 2);
    assert!(restored.log().is_empty());
}

#[test]
fn level_must_point_at_a_discovered_location() {
    let scenario = tiny_scenario();
    let mut game = new_game(&scenario);

    assert_eq!(game.set_level(2), Err(ValidationError::InvalidLevel { level: 2, discovered: 1 }));
    assert!(game.set_level(0).is_err());

    let player = game.player().clone();
    assert_eq!(
        Game::from_parts("Tiny", player.clone(), Vec::new(), 1, 1).err(),
        Some(ValidationError::NoLocations)
    );
    let location = game.location().clone();
    assert!(Game::from_parts("Tiny", player, vec![location], 3, 1).is_err());
}

#[test]
fn add_location_appends_without_moving() {
    let scenario = tiny_scenario();
    let mut game = new_game(&scenario);

    assert_eq!(game.add_location(&scenario, "lvl2").unwrap(), 2);
    assert_eq!(game.level(), 1);
    assert!(matches!(game.add_location(&scenario, "lvl9"), Err(GameError::Scenario(ScenarioError::UnknownLayout(_)))));
}
