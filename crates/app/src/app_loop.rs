//! Console session: scenario menu, new or loaded game, then one round per
//! prompt until the game ends.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use game_core::scenario::DEFAULT_SCENARIO_NAME;
use game_core::{Action, Game, LogEvent, Progress, RunOutcome, Scenario, list_scenarios, load_from_dir};
use tracing::{info, warn};

use crate::prompt::Prompter;
use crate::save_file::{SaveStore, parse_save_name};
use crate::ui_text::{
    BREAK, GREETING, equipment_names, equipment_text, event_text, menu_text, moves_location, surroundings_text,
};

/// Where the scenario menu is read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScenarioSource {
    /// Only the dungeon bundled with the library.
    Builtin,
    /// One sub-directory per game.
    Directory(PathBuf),
}

/// How a console session ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    Finished(RunOutcome),
    Exited,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StartMode {
    NewGame,
    LoadFromSave,
}

fn parse_start(input: &str) -> Result<StartMode, String> {
    match input.trim().to_lowercase().as_str() {
        "new game" => Ok(StartMode::NewGame),
        "load from save" => Ok(StartMode::LoadFromSave),
        _ => Err("Don't overthink it, enter the correct value".to_string()),
    }
}

pub struct Console<R, W> {
    prompter: Prompter<R, W>,
    saves: SaveStore,
    seed: u64,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, saves: SaveStore, seed: u64) -> Self {
        Self { prompter: Prompter::new(input, output), saves, seed }
    }

    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    pub fn run(&mut self, source: &ScenarioSource) -> Result<SessionEnd> {
        self.prompter.say(GREETING)?;
        let scenario = self.choose_scenario(source)?;
        let mut game = self.start_game(&scenario)?;

        self.prompter.say(&game.player().info())?;
        self.prompter.say(&surroundings_text(&game.location().surroundings()))?;
        while !game.end() {
            self.prompter.say(BREAK)?;
            if let Some(end) = self.round(&scenario, &mut game)? {
                return Ok(end);
            }
        }
        Ok(SessionEnd::Exited)
    }

    fn choose_scenario(&mut self, source: &ScenarioSource) -> Result<Scenario> {
        let scenario = match source {
            ScenarioSource::Builtin => {
                let names = [DEFAULT_SCENARIO_NAME];
                self.prompter.choose_index(&names)?;
                Scenario::build_default().context("bundled scenario is broken")?
            }
            ScenarioSource::Directory(root) => {
                let names = list_scenarios(root).with_context(|| format!("cannot list games in {}", root.display()))?;
                if names.is_empty() {
                    bail!("no games found in {}", root.display());
                }
                let index = self.prompter.choose_index(&names)?;
                load_from_dir(root, &names[index]).with_context(|| format!("Check your game's configuration ({})", names[index]))?
            }
        };
        self.prompter.say(&format!("So, you have chosen {}, fantastic!", scenario.name()))?;
        Ok(scenario)
    }

    fn start_game(&mut self, scenario: &Scenario) -> Result<Game> {
        self.prompter.say("[New game, Load from save]")?;
        let mode = self.prompter.retry(parse_start)?;
        if mode == StartMode::LoadFromSave {
            self.prompter.say("You want to load a previous game.")?;
            let saves = self.saves.list(scenario.name())?;
            if !saves.is_empty() {
                let index = self.prompter.choose_index(&saves)?;
                let record = self
                    .saves
                    .load(scenario.name(), &saves[index])
                    .with_context(|| format!("cannot load save {}", saves[index]))?;
                info!(save = %saves[index], "save loaded");
                return Ok(Game::from_record(record, self.seed)?);
            }
            self.prompter.say("Wow! Such Empty!\nLet's start a new game instead!")?;
        }
        self.prompter.say("First of all, chose a name for your character.")?;
        let name = self.prompter.choose_string()?;
        self.prompter.say("Let's begin the story...")?;
        let game = Game::start(scenario, &name, self.seed)?;
        self.prompter.say(scenario.introduction())?;
        Ok(game)
    }

    /// One menu, one choice. `Some` once the session is over.
    fn round(&mut self, scenario: &Scenario, game: &mut Game) -> Result<Option<SessionEnd>> {
        let actions = game.available_actions();
        self.prompter.say(&menu_text(&actions))?;
        let action = self.prompter.choose_action(&actions)?;

        let slot = if action.needs_slot() {
            self.prompter.say(if action == Action::UseItem {
                "Choose item you want to use?"
            } else {
                "Choose item you want to drop?"
            })?;
            self.prompter.choose_index(&equipment_names(game.player()))?
        } else {
            0
        };
        let Some(command) = action.command(slot) else {
            self.show(game, action)?;
            return Ok(None);
        };

        let progress = match game.apply(scenario, command) {
            Ok(progress) => progress,
            Err(err) => {
                self.prompter.say(&err.to_string())?;
                return Ok(None);
            }
        };
        let events = game.drain_log();
        self.report(game, &events)?;
        Ok(match progress {
            Progress::Finished(outcome) => Some(SessionEnd::Finished(outcome)),
            Progress::Exited => Some(SessionEnd::Exited),
            Progress::Continue | Progress::Combat => None,
        })
    }

    fn report(&mut self, game: &Game, events: &[LogEvent]) -> Result<()> {
        for event in events {
            self.prompter.say(&event_text(event))?;
            if moves_location(event) {
                self.prompter.say(&surroundings_text(&game.location().surroundings()))?;
            }
        }
        if game.in_combat() {
            self.prompter.say(&game.player().info())?;
        }
        Ok(())
    }

    /// Serves the informational entries, which leave the game untouched.
    fn show(&mut self, game: &Game, action: Action) -> Result<()> {
        let field = game.location().current_field();
        let text = match action {
            Action::PlayerInfo => game.player().info(),
            Action::EquipmentInfo => equipment_text(game.player()),
            Action::EnemyInfo => field.enemy().map(|enemy| enemy.info()).unwrap_or_default(),
            Action::ItemInfo => field.item().map(|item| item.info()).unwrap_or_default(),
            Action::Map => game.location().format_map(),
            Action::LocationInfo => surroundings_text(&game.location().surroundings()),
            Action::Save => return self.save(game),
            _ => return Ok(()),
        };
        self.prompter.say(&text)?;
        Ok(())
    }

    fn save(&mut self, game: &Game) -> Result<()> {
        self.prompter.say("Enter Save Name:")?;
        let name = self.prompter.retry(parse_save_name)?;
        match self.saves.write_atomic(game.name(), &name, &game.to_record()) {
            Ok(path) => {
                info!(path = %path.display(), "game saved");
                self.prompter.say(&format!("Game saved as {name}."))?;
            }
            Err(err) => {
                warn!(%err, "save failed");
                self.prompter.say(&format!("Could not save the game: {err}"))?;
            }
        }
        Ok(())
    }
}
