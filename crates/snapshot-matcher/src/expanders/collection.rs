//! Emptiness, membership and size expanders.

use super::{number_arg, string_arg};
use crate::error::PatternError;
use crate::types::{Arity, ExpanderDefinition};
use crate::util;
use serde_json::Value;
use std::sync::Arc;

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Null => true,
        _ => false,
    }
}

fn is_empty(value: &Value, _args: &[Value]) -> Result<bool, PatternError> {
    Ok(is_empty_value(value))
}

fn is_not_empty(value: &Value, _args: &[Value]) -> Result<bool, PatternError> {
    Ok(!is_empty_value(value))
}

fn in_array(value: &Value, args: &[Value]) -> Result<bool, PatternError> {
    let needle = args.first().ok_or(PatternError::InvalidArgument {
        expander: "inArray",
        index: 0,
        expected: "a value",
    })?;
    let Value::Array(items) = value else {
        return Ok(false);
    };
    Ok(items.iter().any(|item| util::loose_eq(item, needle)))
}

fn count(value: &Value, args: &[Value]) -> Result<bool, PatternError> {
    let expected = number_arg("count", args, 0)?;
    let len = match value {
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        _ => return Ok(false),
    };
    Ok(len as f64 == expected)
}

fn has_property(value: &Value, args: &[Value]) -> Result<bool, PatternError> {
    let name = string_arg("hasProperty", args, 0)?;
    Ok(value.as_object().is_some_and(|map| map.contains_key(name)))
}

/// Presence is decided by the caller; as a value check it always passes.
fn optional(_value: &Value, _args: &[Value]) -> Result<bool, PatternError> {
    Ok(true)
}

pub fn expanders() -> Vec<Arc<ExpanderDefinition>> {
    vec![
        Arc::new(ExpanderDefinition { name: "isEmpty", arity: Arity::Fixed(0), check_fn: is_empty }),
        Arc::new(ExpanderDefinition { name: "isNotEmpty", arity: Arity::Fixed(0), check_fn: is_not_empty }),
        Arc::new(ExpanderDefinition { name: "inArray", arity: Arity::Fixed(1), check_fn: in_array }),
        Arc::new(ExpanderDefinition { name: "count", arity: Arity::Fixed(1), check_fn: count }),
        Arc::new(ExpanderDefinition { name: "hasProperty", arity: Arity::Fixed(1), check_fn: has_property }),
        Arc::new(ExpanderDefinition { name: "optional", arity: Arity::Fixed(0), check_fn: optional }),
    ]
}
