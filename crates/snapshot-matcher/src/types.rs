use crate::error::PatternError;
use crate::util;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// The `@type@` head of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    String,
    Integer,
    Number,
    Double,
    Boolean,
    Array,
    Null,
    /// `@*@` and `@wildcard@`.
    Wildcard,
    /// `@...@`.
    Unbounded,
    Uuid,
}

impl TypeKind {
    /// Resolves the name found between the two `@` signs.
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "string" => TypeKind::String,
            "integer" => TypeKind::Integer,
            "number" => TypeKind::Number,
            "double" => TypeKind::Double,
            "boolean" => TypeKind::Boolean,
            "array" => TypeKind::Array,
            "null" => TypeKind::Null,
            "*" | "wildcard" => TypeKind::Wildcard,
            "..." => TypeKind::Unbounded,
            "uuid" => TypeKind::Uuid,
            _ => return None,
        };
        Some(kind)
    }

    pub fn name(self) -> &'static str {
        match self {
            TypeKind::String => "string",
            TypeKind::Integer => "integer",
            TypeKind::Number => "number",
            TypeKind::Double => "double",
            TypeKind::Boolean => "boolean",
            TypeKind::Array => "array",
            TypeKind::Null => "null",
            TypeKind::Wildcard => "wildcard",
            TypeKind::Unbounded => "...",
            TypeKind::Uuid => "uuid",
        }
    }

    /// Type check only, expanders are applied separately.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            TypeKind::String => value.is_string(),
            TypeKind::Integer => value.is_i64() || value.is_u64(),
            TypeKind::Number => value.is_number() || util::is_numeric_string(value),
            TypeKind::Double => value.is_f64(),
            TypeKind::Boolean => value.is_boolean(),
            TypeKind::Array => value.is_array() || value.is_object(),
            TypeKind::Null => value.is_null(),
            TypeKind::Wildcard | TypeKind::Unbounded => true,
            TypeKind::Uuid => util::is_uuid(value),
        }
    }
}

/// Expander arity.
#[derive(Debug, Clone, PartialEq)]
pub enum Arity {
    /// Exactly `n` arguments.
    Fixed(usize),
    /// Between `min` and `max` arguments.
    Range(usize, usize),
}

/// Checks a value against the expander arguments.
pub type CheckFn = fn(&Value, &[Value]) -> Result<bool, PatternError>;

/// A named expander, e.g. `startsWith`.
pub struct ExpanderDefinition {
    pub name: &'static str,
    pub arity: Arity,
    pub check_fn: CheckFn,
}

impl fmt::Debug for ExpanderDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpanderDefinition")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

/// Map of expander name -> definition.
pub type ExpanderMap = HashMap<&'static str, Arc<ExpanderDefinition>>;

/// Asserts that an expander call has the correct number of arguments.
pub fn assert_arity(expander: &str, arity: &Arity, argc: usize) -> Result<(), PatternError> {
    match arity {
        Arity::Fixed(n) => {
            if argc != *n {
                Err(PatternError::Arity(format!(
                    "\"{}\" expander expects {} arguments.",
                    expander, n
                )))
            } else {
                Ok(())
            }
        }
        Arity::Range(min, max) => {
            if argc < *min {
                Err(PatternError::Arity(format!(
                    "\"{}\" expander expects at least {} arguments.",
                    expander, min
                )))
            } else if argc > *max {
                Err(PatternError::Arity(format!(
                    "\"{}\" expander expects at most {} arguments.",
                    expander, max
                )))
            } else {
                Ok(())
            }
        }
    }
}

/// Builds an `ExpanderMap` from a list of definitions.
pub fn expanders_to_map(expanders: Vec<Arc<ExpanderDefinition>>) -> ExpanderMap {
    let mut map = HashMap::new();
    for expander in expanders {
        map.insert(expander.name, expander);
    }
    map
}

/// One `.name(args)` call of a pattern.
#[derive(Debug, Clone)]
pub struct Expander {
    pub definition: Arc<ExpanderDefinition>,
    pub args: Vec<Value>,
}

impl Expander {
    pub fn name(&self) -> &'static str {
        self.definition.name
    }

    pub fn check(&self, value: &Value) -> Result<bool, PatternError> {
        (self.definition.check_fn)(value, &self.args)
    }
}

/// A parsed placeholder: a type followed by expanders.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub kind: TypeKind,
    pub expanders: Vec<Expander>,
}

impl Pattern {
    /// Parses a pattern using the built-in expanders.
    pub fn parse(source: &str) -> Result<Self, PatternError> {
        crate::parse::parse_pattern(source, crate::expanders::expanders_map())
    }

    /// `true` when the pattern carries `.optional()`.
    pub fn is_optional(&self) -> bool {
        self.expanders.iter().any(|e| e.name() == "optional")
    }

    pub fn matches(&self, value: &Value) -> Result<bool, PatternError> {
        if value.is_null() && self.is_optional() {
            return Ok(true);
        }
        if !self.kind.accepts(value) {
            return Ok(false);
        }
        for expander in &self.expanders {
            if !expander.check(value)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
