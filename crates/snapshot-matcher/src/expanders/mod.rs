//! Built-in expanders.

pub mod collection;
pub mod format;
pub mod number;
pub mod string;

use crate::error::PatternError;
use crate::types::{expanders_to_map, ExpanderDefinition, ExpanderMap};
use serde_json::Value;
use std::sync::{Arc, OnceLock};

/// All built-in expanders.
pub fn all_expanders() -> Vec<Arc<ExpanderDefinition>> {
    let mut expanders = Vec::new();
    expanders.extend(string::expanders());
    expanders.extend(format::expanders());
    expanders.extend(number::expanders());
    expanders.extend(collection::expanders());
    expanders
}

/// Shared map of the built-in expanders.
pub fn expanders_map() -> &'static ExpanderMap {
    static MAP: OnceLock<ExpanderMap> = OnceLock::new();
    MAP.get_or_init(|| expanders_to_map(all_expanders()))
}

pub(crate) fn string_arg<'a>(
    expander: &'static str,
    args: &'a [Value],
    index: usize,
) -> Result<&'a str, PatternError> {
    args.get(index)
        .and_then(Value::as_str)
        .ok_or(PatternError::InvalidArgument {
            expander,
            index,
            expected: "a string",
        })
}

pub(crate) fn number_arg(
    expander: &'static str,
    args: &[Value],
    index: usize,
) -> Result<f64, PatternError> {
    args.get(index)
        .and_then(crate::util::as_number)
        .ok_or(PatternError::InvalidArgument {
            expander,
            index,
            expected: "a number",
        })
}

/// Optional trailing boolean flag, `false` when absent.
pub(crate) fn flag_arg(args: &[Value], index: usize) -> bool {
    args.get(index).and_then(Value::as_bool).unwrap_or(false)
}
