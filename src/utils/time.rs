//! Time utilities: parsing HH:MM, parsing config durations, formatting durations.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveTime};
use std::time::Duration;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}

/// Parse a config duration such as `5h`, `35m`, `1h30m` or `30s`.
///
/// Units may appear in any order but each at most once; a bare number is rejected.
pub fn parse_duration(input: &str) -> AppResult<Duration> {
    let s = input.trim();
    if s.is_empty() {
        return Err(AppError::InvalidDuration(input.to_string()));
    }

    let mut total = 0u64;
    let mut digits = String::new();
    let mut seen = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }

        let factor = match c {
            'h' => 3600,
            'm' => 60,
            's' => 1,
            _ => return Err(AppError::InvalidDuration(input.to_string())),
        };
        if digits.is_empty() || seen.contains(c) {
            return Err(AppError::InvalidDuration(input.to_string()));
        }
        let value: u64 = digits
            .parse()
            .map_err(|_| AppError::InvalidDuration(input.to_string()))?;
        total = value
            .checked_mul(factor)
            .and_then(|secs| total.checked_add(secs))
            .ok_or_else(|| AppError::InvalidDuration(input.to_string()))?;
        seen.push(c);
        digits.clear();
    }

    if !digits.is_empty() {
        return Err(AppError::InvalidDuration(input.to_string()));
    }

    Ok(Duration::from_secs(total))
}

/// Convert a config duration for instant arithmetic; `name` labels the error.
pub fn to_chrono(name: &str, d: Duration) -> AppResult<chrono::Duration> {
    chrono::Duration::from_std(d)
        .map_err(|_| AppError::Config(format!("{name} is out of range")))
}

/// `HH:MM` of an optional instant, `--:--` when absent.
pub fn hhmm(t: Option<&DateTime<Local>>) -> String {
    match t {
        Some(t) => t.format("%H:%M").to_string(),
        None => "--:--".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_units() {
        assert_eq!(parse_duration("5h").unwrap(), Duration::from_secs(5 * 3600));
        assert_eq!(parse_duration("35m").unwrap(), Duration::from_secs(35 * 60));
        assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
    }

    #[test]
    fn parses_combined_units() {
        assert_eq!(
            parse_duration("1h30m").unwrap(),
            Duration::from_secs(5400)
        );
        assert_eq!(
            parse_duration(" 2m5s ").unwrap(),
            Duration::from_secs(125)
        );
    }

    #[test]
    fn rejects_malformed_durations() {
        for bad in ["", "5", "h", "5x", "1h1h", "m30", "99999999999999999h"] {
            assert!(
                matches!(parse_duration(bad), Err(AppError::InvalidDuration(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn chrono_conversion_rejects_out_of_range() {
        assert_eq!(
            to_chrono("x", Duration::from_secs(90)).unwrap(),
            chrono::Duration::seconds(90)
        );
        assert!(matches!(
            to_chrono("x", Duration::from_secs(u64::MAX)),
            Err(AppError::Config(_))
        ));
    }
}
