//! Value helpers and format validators.

use crate::error::PatternError;
use regex::{Regex, RegexBuilder};
use serde_json::Value;
use std::net::IpAddr;
use std::sync::OnceLock;

/// Numeric view of a value: numbers, and strings holding a finite number.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
        }
        _ => None,
    }
}

pub fn is_numeric_string(value: &Value) -> bool {
    value.is_string() && as_number(value).is_some()
}

/// Equality where numbers compare by value (`2 == 2.0`).
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

/// Compiles a regular expression, accepting the `/body/flags` delimited form.
pub fn compile_regex(source: &str) -> Result<Regex, PatternError> {
    let invalid = |message: String| PatternError::InvalidRegex {
        pattern: source.to_string(),
        message,
    };
    if let Some(rest) = source.strip_prefix('/') {
        if let Some(end) = rest.rfind('/') {
            let flags = &rest[end + 1..];
            if flags.chars().all(|c| "imsxu".contains(c)) {
                return RegexBuilder::new(&rest[..end])
                    .case_insensitive(flags.contains('i'))
                    .multi_line(flags.contains('m'))
                    .dot_matches_new_line(flags.contains('s'))
                    .ignore_whitespace(flags.contains('x'))
                    .build()
                    .map_err(|e| invalid(e.to_string()));
            }
        }
    }
    Regex::new(source).map_err(|e| invalid(e.to_string()))
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?)*$",
        )
        .unwrap()
    })
}

fn uuid_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$").unwrap()
    })
}

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^[a-z][a-z0-9+.\-]*://[^\s/?#]+(?:[/?#]\S*)?$").unwrap())
}

fn date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").unwrap())
}

fn time_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(\d{2}):(\d{2})(?::(\d{2})(?:\.\d+)?)?(?:z|[+-]\d{2}(?::?\d{2})?)?$").unwrap()
    })
}

pub fn is_email(value: &Value) -> bool {
    match value {
        Value::String(s) => email_regex().is_match(s),
        _ => false,
    }
}

pub fn is_uuid(value: &Value) -> bool {
    match value {
        Value::String(s) => uuid_regex().is_match(s),
        _ => false,
    }
}

pub fn is_url(value: &Value) -> bool {
    match value {
        Value::String(s) => url_regex().is_match(s),
        _ => false,
    }
}

pub fn is_ip(value: &Value) -> bool {
    match value {
        Value::String(s) => s.parse::<IpAddr>().is_ok(),
        _ => false,
    }
}

const DAYS: [u32; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

fn is_leap_year(year: u32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn is_date_str(s: &str) -> bool {
    let Some(caps) = date_regex().captures(s) else {
        return false;
    };
    let year: u32 = caps[1].parse().unwrap_or(0);
    let month: u32 = caps[2].parse().unwrap_or(0);
    let day: u32 = caps[3].parse().unwrap_or(0);
    if !(1..=12).contains(&month) {
        return false;
    }
    let max_day = if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS[month as usize]
    };
    day >= 1 && day <= max_day
}

/// Wall clock time, seconds and zone designator optional.
fn is_time_str(s: &str) -> bool {
    let Some(caps) = time_regex().captures(s) else {
        return false;
    };
    let hr: u32 = caps[1].parse().unwrap_or(99);
    let min: u32 = caps[2].parse().unwrap_or(99);
    let sec: u32 = caps.get(3).and_then(|m| m.as_str().parse().ok()).unwrap_or(0);
    hr <= 23 && min <= 59 && sec <= 60
}

pub fn is_date(value: &Value) -> bool {
    matches!(value, Value::String(s) if is_date_str(s))
}

/// A calendar date, optionally followed by `T`, `t` or a space and a time.
pub fn is_datetime(value: &Value) -> bool {
    let Value::String(s) = value else {
        return false;
    };
    if is_date_str(s) {
        return true;
    }
    match s.split_once(['T', 't', ' ']) {
        Some((date, time)) => is_date_str(date) && is_time_str(time),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_as_number() {
        assert_eq!(as_number(&json!(3)), Some(3.0));
        assert_eq!(as_number(&json!(" 2.5 ")), Some(2.5));
        assert_eq!(as_number(&json!("")), None);
        assert_eq!(as_number(&json!("NaN")), None);
        assert_eq!(as_number(&json!("inf")), None);
        assert_eq!(as_number(&json!(true)), None);
    }

    #[test]
    fn test_is_datetime() {
        assert!(is_datetime(&json!("2024-01-01T00:00:00Z")));
        assert!(is_datetime(&json!("2024-01-01T00:00:00.123+02:00")));
        assert!(is_datetime(&json!("2024-01-01 10:30:00")));
        assert!(is_datetime(&json!("2024-02-29")));
        assert!(!is_datetime(&json!("2023-02-29")));
        assert!(!is_datetime(&json!("2024-13-01T00:00:00Z")));
        assert!(!is_datetime(&json!("2024-01-01T25:00:00Z")));
        assert!(!is_datetime(&json!("yesterday")));
        assert!(!is_datetime(&json!(20240101)));
    }

    #[test]
    fn test_is_email() {
        assert!(is_email(&json!("john.doe@example.com")));
        assert!(!is_email(&json!("john.doe@")));
    }

    #[test]
    fn test_is_uuid() {
        assert!(is_uuid(&json!("8f4b0d2e-6c1a-4b7e-9a3f-2d5c8e1b7a90")));
        assert!(is_uuid(&json!("8F4B0D2E-6C1A-4B7E-9A3F-2D5C8E1B7A90")));
        assert!(!is_uuid(&json!("8f4b0d2e6c1a4b7e9a3f2d5c8e1b7a90")));
    }

    #[test]
    fn test_is_url_and_ip() {
        assert!(is_url(&json!("https://example.com/a/b?c=d")));
        assert!(is_url(&json!("ftp://files.example.com")));
        assert!(!is_url(&json!("example.com")));
        assert!(is_ip(&json!("127.0.0.1")));
        assert!(is_ip(&json!("::1")));
        assert!(!is_ip(&json!("256.0.0.1")));
    }

    #[test]
    fn test_loose_eq() {
        assert!(loose_eq(&json!(2), &json!(2.0)));
        assert!(!loose_eq(&json!(2), &json!("2")));
        assert!(loose_eq(&json!({"a": [1]}), &json!({"a": [1]})));
    }
}
