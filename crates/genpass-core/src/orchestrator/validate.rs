//! Numeric field validators.
//!
//! Form fields hold free text. Parsing follows the browser's integer parsing:
//! leading whitespace, an optional sign, then the longest run of digits
//! (`"12px"` is 12, `"px"` is nothing).

use crate::config::ConfigRecord;
use crate::derive::{MAX_LENGTH, MIN_LENGTH};

pub const DEFAULT_LENGTH: u32 = 12;
pub const DEFAULT_COST: u32 = 12;
const MIN_COST: i64 = 4;
const MAX_COST: i64 = 31;

fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

fn length_from(parsed: Option<i64>) -> u32 {
    match parsed {
        Some(n) if n != 0 => n.clamp(i64::from(MIN_LENGTH), i64::from(MAX_LENGTH)) as u32,
        _ => DEFAULT_LENGTH,
    }
}

fn cost_from(parsed: Option<i64>) -> u32 {
    match parsed {
        Some(n) => n.clamp(MIN_COST, MAX_COST) as u32,
        None => DEFAULT_COST,
    }
}

/// Password length in `[4, 24]`. Non-numeric or zero input means 12.
pub fn clamp_length(raw: &str) -> u32 {
    length_from(parse_leading_int(raw))
}

/// bcrypt cost in `[4, 31]`. Non-numeric input means 12.
pub fn clamp_cost(raw: &str) -> u32 {
    cost_from(parse_leading_int(raw))
}

/// A stored record with its numeric fields brought into range before it is
/// loaded into the form.
pub fn validate_record(record: ConfigRecord) -> ConfigRecord {
    ConfigRecord {
        length: length_from(Some(i64::from(record.length))),
        cost_factor: cost_from(Some(i64::from(record.cost_factor))),
        ..record
    }
}

/// Rotation counter. Non-numeric or negative input means 0.
pub fn parse_counter(raw: &str) -> u32 {
    parse_leading_int(raw)
        .map(|n| n.clamp(0, i64::from(u32::MAX)) as u32)
        .unwrap_or(0)
}
