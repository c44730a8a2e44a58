//! Paths into JSON trees.

use serde_json::Value;

/// A step in a path: an object key or a list index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    Key(String),
    Index(usize),
}

/// A path from the document root.
pub type Path = Vec<PathStep>;

/// Looks up one step. A key addresses a list when it is a decimal index, and
/// an index addresses a map through its decimal string.
pub fn child<'a>(val: &'a Value, step: &PathStep) -> Option<&'a Value> {
    match (val, step) {
        (Value::Object(map), PathStep::Key(key)) => map.get(key),
        (Value::Object(map), PathStep::Index(index)) => map.get(&index.to_string()),
        (Value::Array(arr), PathStep::Index(index)) => arr.get(*index),
        (Value::Array(arr), PathStep::Key(key)) => arr.get(key.parse::<usize>().ok()?),
        _ => None,
    }
}

/// Get a value from a JSON document by path.
///
/// Returns `None` if any step doesn't resolve.
pub fn get<'a>(val: &'a Value, path: &[PathStep]) -> Option<&'a Value> {
    let mut current = val;
    for step in path {
        current = child(current, step)?;
    }
    Some(current)
}
