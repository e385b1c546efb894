//! Text formatting for menus, location overviews, outcomes and log events.

use game_core::{Action, ActionGroup, Item, LogEvent, Player, RunOutcome, Surroundings};

pub const GREETING: &str = "\t\tWelcome Gamer!\n\
I see you have stumbled upon my Text Adventure Games ;D\n\
Choose a game from the list below:";

pub const BREAK: &str = "====================================================================================================";

const MENU_GROUPS: [ActionGroup; 5] =
    [ActionGroup::Player, ActionGroup::Field, ActionGroup::Location, ActionGroup::Game, ActionGroup::Fight];

/// `Title:` line followed by the capitalised keywords of each non-empty
/// group, in menu order.
pub fn menu_text(actions: &[Action]) -> String {
    let mut text = String::new();
    for group in MENU_GROUPS {
        let keywords: Vec<String> =
            actions.iter().filter(|action| action.group() == group).map(|action| capitalize(action.keyword())).collect();
        if keywords.is_empty() {
            continue;
        }
        text.push_str(&format!("{}:\n[{}]\n", group.title(), keywords.join(", ")));
    }
    text
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn surroundings_text(view: &Surroundings) -> String {
    let mut text = format!(
        "NORTH: {}\nSOUTH: {}\nEAST: {}\nWEST: {}\n\nCURRENT: {}\n{}\n",
        view.north, view.south, view.east, view.west, view.current, view.description
    );
    if let Some((name, description)) = &view.enemy {
        text.push_str(&format!("\nENEMY: {name}\n{description}\n"));
    }
    if let Some((name, description)) = &view.item {
        text.push_str(&format!("\nITEM: {name}\n{description}\n"));
    }
    text
}

/// Numbered equipment list used by the use/drop prompts.
pub fn equipment_names(player: &Player) -> Vec<String> {
    player.equipment().iter().map(Item::to_string).collect()
}

pub fn equipment_text(player: &Player) -> String {
    if player.equipment().is_empty() {
        return "Your equipment is empty.\n".to_string();
    }
    player.equipment().iter().map(Item::info).collect::<Vec<_>>().join("\n")
}

pub fn outcome_text(outcome: &RunOutcome) -> String {
    match outcome {
        RunOutcome::Victory => "Congratulations! You have won the game!".to_string(),
        RunOutcome::Defeat(cause) => format!("Game Over :(\n{cause}"),
    }
}

pub fn event_text(event: &LogEvent) -> String {
    match event {
        LogEvent::Entered { field } => format!("You entered {field}."),
        LogEvent::HazardDamage { amount } => format!("Ouch! You took {amount} points of damage!"),
        LogEvent::Regenerated { amount } => format!("Player has regenerated {amount} points of health."),
        LogEvent::EnemyAppeared { enemy, shout } => format!("Let's begin the fight!!!\n{enemy}: {shout}"),
        LogEvent::PlayerStruck { enemy, damage } => format!("{enemy} attacked for {damage} points."),
        LogEvent::EnemyStruck { enemy, damage } => format!("{enemy} took {damage} points of damage."),
        LogEvent::EnemyDefeated { .. } => "You Won. Enemy has died !!!".to_string(),
        LogEvent::Hid { enemy } => format!("You hide from {enemy}. You'd better get out of this field"),
        LogEvent::ItemPickedUp { item } => format!("{item} added to equipment!"),
        LogEvent::InventoryFull => "You don't have enough space in the inventory!".to_string(),
        LogEvent::ItemDropped { item } => format!("You have dropped {item}."),
        LogEvent::WeaponEquipped { weapon, previous } => swap_text("a weapon", weapon, previous.as_deref(), "weapon"),
        LogEvent::ArmorEquipped { armor, previous } => swap_text("armor", armor, previous.as_deref(), "armor"),
        LogEvent::PotionDrunk { healed } => format!("You have drank your potion! (+{healed} health)"),
        LogEvent::AlreadyFullHealth => "You have full health already!".to_string(),
        LogEvent::ItemInert { item } => format!("Nothing happens when you use {item}."),
        LogEvent::LeftLocation { level } => format!("You are now leaving previous location! (level {level})"),
        LogEvent::NoEarlierLocation => "No earlier locations available!".to_string(),
        LogEvent::AlreadyOpen { level } => format!("Location already open - no need for keys ;P (level {level})"),
        LogEvent::LocationUnlocked { .. } => "You have opened a new location!\n\n\
             You enter a place you do not know.\n\
             I wonder what might be around the corner?"
            .to_string(),
        LogEvent::KeyMismatch => "That key doesn't match ;P".to_string(),
        LogEvent::NoMatchingKey => "None of the available keys match!".to_string(),
        LogEvent::NotAGate => "You cannot use keys on a normal field!".to_string(),
        LogEvent::Finished(outcome) => outcome_text(outcome),
    }
}

fn swap_text(article: &str, name: &str, previous: Option<&str>, kind: &str) -> String {
    let mut text = format!("You have equipped {article}: {name}.");
    if let Some(previous) = previous {
        text.push_str(&format!("\nYour old {kind} ({previous}) is now in the inventory."));
    }
    text
}

/// Whether the location overview should follow `event`, as it does after
/// every change of location.
pub fn moves_location(event: &LogEvent) -> bool {
    matches!(event, LogEvent::LeftLocation { .. } | LogEvent::AlreadyOpen { .. } | LogEvent::LocationUnlocked { .. })
}

#[cfg(test)]
mod tests {
    use game_core::{DeathCause, Direction};

    use super::*;

    #[test]
    fn menu_groups_actions_under_titles() {
        let actions = [Action::PlayerInfo, Action::Map, Action::Go(Direction::East), Action::Save, Action::Exit];
        assert_eq!(
            menu_text(&actions),
            "Player Methods:\n[Player info]\nLocation Methods:\n[Map, Go east]\nGame Methods:\n[Save, Exit]\n"
        );
    }

    #[test]
    fn fight_menu_only_lists_moves() {
        assert_eq!(menu_text(&[Action::Attack, Action::Hide]), "Fight Moves:\n[Attack, Hide]\n");
    }

    #[test]
    fn surroundings_include_occupants() {
        let view = Surroundings {
            north: "Boarder".into(),
            south: "Road".into(),
            east: "Den".into(),
            west: "Boarder".into(),
            current: "Start".into(),
            description: "Where it begins.".into(),
            enemy: None,
            item: Some(("Key".into(), "Rusty.".into())),
        };
        let text = surroundings_text(&view);
        assert!(text.starts_with("NORTH: Boarder\nSOUTH: Road\nEAST: Den\nWEST: Boarder\n\nCURRENT: Start\n"));
        assert!(text.ends_with("\nITEM: Key\nRusty.\n"));
        assert!(!text.contains("ENEMY"));
    }

    #[test]
    fn defeat_names_the_cause() {
        let outcome = RunOutcome::Defeat(DeathCause::Slain { enemy: "Troll".into() });
        assert_eq!(outcome_text(&outcome), "Game Over :(\nTroll has defeated you...");
        assert_eq!(event_text(&LogEvent::Finished(outcome)), "Game Over :(\nTroll has defeated you...");
    }

    #[test]
    fn equip_swap_mentions_the_old_item() {
        let event = LogEvent::WeaponEquipped { weapon: "Axe".into(), previous: Some("Stick".into()) };
        assert_eq!(
            event_text(&event),
            "You have equipped a weapon: Axe.\nYour old weapon (Stick) is now in the inventory."
        );
    }
}
