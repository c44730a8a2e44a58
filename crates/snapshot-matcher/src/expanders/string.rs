//! String expanders.

use super::{flag_arg, string_arg};
use crate::error::PatternError;
use crate::types::{Arity, ExpanderDefinition};
use crate::util;
use serde_json::Value;
use std::sync::Arc;

fn fold(s: &str, ignore_case: bool) -> String {
    if ignore_case {
        s.to_lowercase()
    } else {
        s.to_string()
    }
}

fn starts_with(value: &Value, args: &[Value]) -> Result<bool, PatternError> {
    let prefix = string_arg("startsWith", args, 0)?;
    let Value::String(s) = value else {
        return Ok(false);
    };
    let ignore_case = flag_arg(args, 1);
    Ok(fold(s, ignore_case).starts_with(&fold(prefix, ignore_case)))
}

fn ends_with(value: &Value, args: &[Value]) -> Result<bool, PatternError> {
    let suffix = string_arg("endsWith", args, 0)?;
    let Value::String(s) = value else {
        return Ok(false);
    };
    let ignore_case = flag_arg(args, 1);
    Ok(fold(s, ignore_case).ends_with(&fold(suffix, ignore_case)))
}

fn contains(value: &Value, args: &[Value]) -> Result<bool, PatternError> {
    let needle = string_arg("contains", args, 0)?;
    let Value::String(s) = value else {
        return Ok(false);
    };
    let ignore_case = flag_arg(args, 1);
    Ok(fold(s, ignore_case).contains(&fold(needle, ignore_case)))
}

fn not_contains(value: &Value, args: &[Value]) -> Result<bool, PatternError> {
    let needle = string_arg("notContains", args, 0)?;
    let Value::String(s) = value else {
        return Ok(false);
    };
    let ignore_case = flag_arg(args, 1);
    Ok(!fold(s, ignore_case).contains(&fold(needle, ignore_case)))
}

fn match_regex(value: &Value, args: &[Value]) -> Result<bool, PatternError> {
    let source = string_arg("matchRegex", args, 0)?;
    let re = util::compile_regex(source)?;
    Ok(match value {
        Value::String(s) => re.is_match(s),
        Value::Number(n) => re.is_match(&n.to_string()),
        _ => false,
    })
}

pub fn expanders() -> Vec<Arc<ExpanderDefinition>> {
    vec![
        Arc::new(ExpanderDefinition { name: "startsWith", arity: Arity::Range(1, 2), check_fn: starts_with }),
        Arc::new(ExpanderDefinition { name: "endsWith", arity: Arity::Range(1, 2), check_fn: ends_with }),
        Arc::new(ExpanderDefinition { name: "contains", arity: Arity::Range(1, 2), check_fn: contains }),
        Arc::new(ExpanderDefinition { name: "notContains", arity: Arity::Range(1, 2), check_fn: not_contains }),
        Arc::new(ExpanderDefinition { name: "matchRegex", arity: Arity::Fixed(1), check_fn: match_regex }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_starts_with_ignore_case() {
        assert_eq!(starts_with(&json!("Order-1"), &[json!("order")]), Ok(false));
        assert_eq!(starts_with(&json!("Order-1"), &[json!("order"), json!(true)]), Ok(true));
        assert_eq!(starts_with(&json!(1), &[json!("1")]), Ok(false));
    }

    #[test]
    fn test_contains_and_not_contains() {
        assert_eq!(contains(&json!("hello world"), &[json!("o w")]), Ok(true));
        assert_eq!(not_contains(&json!("hello world"), &[json!("xyz")]), Ok(true));
        assert_eq!(not_contains(&json!("hello world"), &[json!("WORLD"), json!(true)]), Ok(false));
    }

    #[test]
    fn test_non_string_argument_is_an_error() {
        let err = ends_with(&json!("abc"), &[json!(1)]).unwrap_err();
        assert_eq!(err.to_string(), "\"endsWith\" expects a string as argument 0");
    }

    #[test]
    fn test_match_regex_with_delimiters() {
        assert_eq!(match_regex(&json!("AB-12"), &[json!("/^[a-z]{2}-\\d+$/i")]), Ok(true));
        assert_eq!(match_regex(&json!("AB-12"), &[json!("^[a-z]{2}-\\d+$")]), Ok(false));
        assert_eq!(match_regex(&json!(1234), &[json!("^\\d{4}$")]), Ok(true));
        assert!(matches!(
            match_regex(&json!("x"), &[json!("(")]),
            Err(PatternError::InvalidRegex { .. })
        ));
    }
}
