//! The (expected, actual) pair produced by a failed assertion.

use crate::finite::check_finite;
use crate::xml::XmlDocument;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// One side of a comparison.
#[derive(Debug)]
pub enum Operand {
    Json(Value),
    Xml(XmlDocument),
    /// A value whose JSON encoding failed when the failure was captured.
    Unencodable(Arc<serde_json::Error>),
}

impl Operand {
    /// Encodes any serializable value; encoding errors are kept for the driver
    /// to report. NaN and infinities count as encoding errors.
    pub fn encode<T: Serialize + ?Sized>(value: &T) -> Self {
        match check_finite(value).and_then(|()| serde_json::to_value(value)) {
            Ok(value) => Operand::Json(value),
            Err(err) => Operand::Unencodable(Arc::new(err)),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Operand::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Short type name used in coercion errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Operand::Json(Value::Null) => "null",
            Operand::Json(Value::Bool(_)) => "boolean",
            Operand::Json(Value::Number(n)) if n.is_f64() => "float",
            Operand::Json(Value::Number(_)) => "integer",
            Operand::Json(Value::String(_)) => "string",
            Operand::Json(Value::Array(_)) => "list",
            Operand::Json(Value::Object(_)) => "map",
            Operand::Xml(_) => "XML document",
            Operand::Unencodable(_) => "unencodable value",
        }
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Operand::Json(value)
    }
}

impl From<XmlDocument> for Operand {
    fn from(doc: XmlDocument) -> Self {
        Operand::Xml(doc)
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::Json(Value::String(s.to_string()))
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        Operand::Json(Value::String(s))
    }
}

#[derive(Debug)]
pub struct ComparisonFailure {
    expected: Option<Operand>,
    actual: Operand,
    message: String,
}

impl ComparisonFailure {
    pub fn new(expected: Option<Operand>, actual: impl Into<Operand>) -> Self {
        Self {
            expected,
            actual: actual.into(),
            message: String::new(),
        }
    }

    /// Both sides taken from serializable values.
    pub fn from_serialize<E, A>(expected: &E, actual: &A) -> Self
    where
        E: Serialize + ?Sized,
        A: Serialize + ?Sized,
    {
        Self::new(Some(Operand::encode(expected)), Operand::encode(actual))
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn expected(&self) -> Option<&Operand> {
        self.expected.as_ref()
    }

    pub fn actual(&self) -> &Operand {
        &self.actual
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
