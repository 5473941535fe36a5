use chrono::Duration;
use once_cell::sync::Lazy;
use regex::Regex;

use super::errors::{EngineError, EngineResult};

static DURATION_FORMAT_REGEXP: Lazy<Regex> = Lazy::new(||
    Regex::new(r"(?i)^\s*(\d{1,9})\s*([smhdw])\s*$")
        .expect("invalid duration regexp"));

/// Parses a giveaway duration like `30s`, `45m`, `1h`, `2d` or `1w`.
pub fn parse_duration(input: &str) -> EngineResult<Duration> {
    let caps = DURATION_FORMAT_REGEXP.captures(input)
        .ok_or_else(|| EngineError::Validation(
            format!("unsupported duration '{input}', expected forms like 30s, 45m, 1h, 2d or 1w")))?;
    let amount: i64 = caps[1].parse()
        .map_err(|_| EngineError::Validation(format!("invalid duration amount in '{input}'")))?;
    if amount == 0 {
        return Err(EngineError::Validation(format!("the duration must be positive, got '{input}'")));
    }
    let span = match caps[2].to_ascii_lowercase().as_str() {
        "s" => Duration::seconds(amount),
        "m" => Duration::minutes(amount),
        "h" => Duration::hours(amount),
        "d" => Duration::days(amount),
        "w" => Duration::weeks(amount),
        unit => unreachable!("unit '{unit}' leaked through the duration regexp"),
    };
    Ok(span)
}
