use std::iter;

use crate::error::ValidationError;

const BAR_WIDTH: i64 = 40;
/// Byte offset inside `[` + bar + `]` where the `stat/base` label goes.
const LABEL_OFFSET: usize = 20;

/// Renders `Name: [====...stat/base...----]\n`.
pub fn format_stats(name: &str, stat: i32, base: i32) -> Result<String, ValidationError> {
    if stat > base {
        return Err(ValidationError::StatAboveBase { stat, base });
    }
    Ok(stat_line(name, stat, base))
}

/// Infallible rendering for callers whose invariants already guarantee
/// `stat <= base`.
pub(crate) fn stat_line(name: &str, stat: i32, base: i32) -> String {
    let filled = if base <= 0 { BAR_WIDTH } else { BAR_WIDTH * i64::from(stat.clamp(0, base)) / i64::from(base) };
    let mut bar = String::with_capacity(BAR_WIDTH as usize + 16);
    bar.push('[');
    bar.extend(iter::repeat_n('=', filled as usize));
    bar.extend(iter::repeat_n('-', (BAR_WIDTH - filled) as usize));
    bar.push(']');
    bar.insert_str(LABEL_OFFSET, &format!("{stat}/{base}"));
    format!("{name}: {bar}\n")
}
