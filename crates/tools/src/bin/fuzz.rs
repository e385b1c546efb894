use anyhow::{Result, bail};
use clap::Parser;
use game_core::{Action, Game, GameError, Progress, Scenario};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    steps: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn check_invariants(game: &Game) {
    let player = game.player();
    assert!(player.health() <= player.base_health(), "Invariant failed: HP > Max HP");
    assert!(game.end() || player.is_alive(), "Invariant failed: dead player still playing");
    assert!(player.equipment().len() <= player.equipment_size(), "Invariant failed: equipment overflow");
    let level = game.level() as usize;
    assert!((1..=game.locations().len()).contains(&level), "Invariant failed: level {level} undiscovered");
    for location in game.locations() {
        assert!(location.current_field().enterable(), "Invariant failed: occupant inside wall");
        for enemy in location.fields().iter().flatten().filter_map(|field| field.enemy()) {
            assert!(enemy.is_alive(), "Invariant failed: dead {} left on the map", enemy.name());
            assert!(enemy.health() <= enemy.base_health(), "Invariant failed: enemy HP > Max HP");
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting Fuzz harness on seed {} for max {} steps...", args.seed, args.steps);
    let scenario = Scenario::build_default()?;
    let mut game = Game::start(&scenario, "Fuzzer", args.seed)?;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let mut steps = 0;
    while steps < args.steps {
        let actions = game.available_actions();
        if actions.is_empty() {
            break;
        }
        let action = choose(&mut rng, &actions);
        // Leaving would end the walk early
        if action == Action::Exit {
            continue;
        }
        let slot = rng.next_u64() as usize % (game.player().equipment().len() + 1);
        let Some(command) = action.command(slot) else {
            continue;
        };
        steps += 1;

        match game.apply(&scenario, command) {
            Ok(Progress::Finished(outcome)) => {
                println!("Finished with outcome {outcome:?} after {steps} steps");
                break;
            }
            Ok(_) | Err(GameError::NoSuchSlot { .. }) => {}
            Err(err) => bail!("step {steps}: {err}"),
        }
        game.drain_log();
        check_invariants(&game);
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
