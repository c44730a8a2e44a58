use super::Driver;
use crate::comparison::{ComparisonFailure, Operand};
use crate::error::NotSerializable;
use serde_json::Value;
use std::sync::Arc;

/// Writes the actual value verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextDriver;

impl TextDriver {
    pub fn new() -> Self {
        Self
    }
}

impl Driver for TextDriver {
    fn serialize(&self, failure: &ComparisonFailure) -> Result<String, NotSerializable> {
        match failure.actual() {
            Operand::Json(Value::String(text)) => Ok(text.clone()),
            Operand::Json(Value::Number(n)) if !n.is_f64() => Ok(n.to_string()),
            Operand::Unencodable(err) => Err(NotSerializable::Encode(Arc::clone(err))),
            other => Err(NotSerializable::Coercion {
                expected: "string or integer",
                found: other.kind(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn serialize(actual: Value) -> Result<String, NotSerializable> {
        TextDriver::new().serialize(&ComparisonFailure::new(Some("old".into()), actual))
    }

    #[test]
    fn test_string_is_written_verbatim() {
        assert_eq!(serialize(json!("hello\nworld")).unwrap(), "hello\nworld");
        assert_eq!(serialize(json!("")).unwrap(), "");
    }

    #[test]
    fn test_integer_is_stringified() {
        assert_eq!(serialize(json!(42)).unwrap(), "42");
        assert_eq!(serialize(json!(-3)).unwrap(), "-3");
    }

    #[test]
    fn test_other_values_are_rejected() {
        for value in [json!(1.5), json!(true), json!(null), json!([1]), json!({"a": 1})] {
            assert!(matches!(serialize(value), Err(NotSerializable::Coercion { .. })));
        }
    }
}
