pub mod app_loop;
pub mod prompt;
pub mod save_file;
pub mod seed;
pub mod ui_text;

use game_core::{DeathCause, RunOutcome};

/// Format a seed as an exact decimal string with no prefix or suffix.
pub fn format_seed(seed: u64) -> String {
    seed.to_string()
}

/// Map a `RunOutcome` to its reason code string.
pub fn reason_code(outcome: &RunOutcome) -> &'static str {
    match outcome {
        RunOutcome::Victory => "WIN_CLEAR",
        RunOutcome::Defeat(DeathCause::Hazard { .. }) => "HAZARD_HP_ZERO",
        RunOutcome::Defeat(DeathCause::Slain { .. }) => "SLAIN_HP_ZERO",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_seed_is_exact_decimal() {
        assert_eq!(format_seed(0), "0");
        assert_eq!(format_seed(12345), "12345");
        assert_eq!(format_seed(u64::MAX), "18446744073709551615");
    }

    #[test]
    fn reason_codes_follow_the_outcome() {
        assert_eq!(reason_code(&RunOutcome::Victory), "WIN_CLEAR");
        assert_eq!(reason_code(&RunOutcome::Defeat(DeathCause::Hazard { field: "Pit".into() })), "HAZARD_HP_ZERO");
        assert_eq!(reason_code(&RunOutcome::Defeat(DeathCause::Slain { enemy: "Troll".into() })), "SLAIN_HP_ZERO");
    }
}
