//! Numeric bounds.

use super::number_arg;
use crate::error::PatternError;
use crate::types::{Arity, ExpanderDefinition};
use crate::util;
use serde_json::Value;
use std::sync::Arc;

fn lower_than(value: &Value, args: &[Value]) -> Result<bool, PatternError> {
    let bound = number_arg("lowerThan", args, 0)?;
    Ok(util::as_number(value).is_some_and(|n| n < bound))
}

fn greater_than(value: &Value, args: &[Value]) -> Result<bool, PatternError> {
    let bound = number_arg("greaterThan", args, 0)?;
    Ok(util::as_number(value).is_some_and(|n| n > bound))
}

pub fn expanders() -> Vec<Arc<ExpanderDefinition>> {
    vec![
        Arc::new(ExpanderDefinition { name: "lowerThan", arity: Arity::Fixed(1), check_fn: lower_than }),
        Arc::new(ExpanderDefinition { name: "greaterThan", arity: Arity::Fixed(1), check_fn: greater_than }),
    ]
}
