//! Shared test fixtures for the `game` submodule test suites.
//! This module exists to avoid repeating scenario setup across many tests.
//! It does not own production gameplay logic.

use super::*;

const FIELDS: &str = r#"[
    {"name": "Road", "description": "Simple Road"},
    {"name": "Start", "description": "Where it begins.", "go_to": 1},
    {"name": "Iron Gate", "description": "Locked.", "go_to": 2},
    {"name": "Den", "description": "Smells bad.", "enemy": {
        "name": "Goblin", "base_health": 15, "health": 15, "regeneration": 0,
        "strength": 5, "random_strength": 0, "shouts": ["Grr!"], "description": "Green."
    }},
    {"name": "Shrine", "description": "Quiet.", "item": {
        "class": "Key", "name": "Tooth Key", "location_filename": "lvl2", "level": 2
    }},
    {"name": "Spring", "description": "Fresh water.", "danger": 10},
    {"name": "Pit", "description": "Spikes.", "danger": -30},
    {"name": "Armory", "description": "Racks.", "item": {
        "class": "Weapon", "name": "Sword", "base_strength": 10, "random_strength": 0
    }},
    {"name": "Exit", "description": "Daylight.", "go_to": "WIN"}
]"#;

const PLAYER: &str = r#"{"name": "Hero", "strength": 10, "equipment_size": 2}"#;

/// ```text
/// lvl1:  Start  Den   Road   Shrine  Gate(2)
///        Spring Pit   Armory Road    Road
/// lvl2:  Gate(2) Road Exit
/// ```
const LVL1: &str = "1\t3\t0\t4\t2\n5\t6\t7\t0\t0\n";
const LVL2: &str = "2\t0\t8\n";

pub(super) fn tiny_scenario() -> Scenario {
    Scenario::parse("Tiny", FIELDS, PLAYER, [("lvl1", LVL1), ("lvl2", LVL2)], "Welcome.").unwrap()
}

pub(super) fn new_game(scenario: &Scenario) -> Game {
    Game::start(scenario, "Tester", 7).unwrap()
}

/// Applies each command in order, failing the test on any rejection.
pub(super) fn play(game: &mut Game, scenario: &Scenario, commands: &[Command]) -> Progress {
    let mut progress = Progress::Continue;
    for command in commands {
        progress = game.apply(scenario, command.clone()).unwrap();
    }
    progress
}

/// Walks from the start through the den, winning the fight, to the shrine.
pub(super) fn reach_shrine(game: &mut Game, scenario: &Scenario) {
    play(
        game,
        scenario,
        &[
            Command::Go(Direction::East),
            Command::Fight(FightMove::Attack),
            Command::Fight(FightMove::Attack),
            Command::Go(Direction::East),
            Command::Go(Direction::East),
        ],
    );
}
