use super::Driver;
use crate::comparison::{ComparisonFailure, Operand};
use crate::config::UpdaterConfig;
use crate::error::NotSerializable;
use crate::format::to_pretty_json;
use crate::reconcile::{default_matcher_patterns, recover_empty_containers, Reconciler};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use snapshot_matcher::{Matcher, PatternMatcher};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Rewrites JSON snapshots, keeping placeholders from the old fixture that
/// still match the new actual value.
#[derive(Clone)]
pub struct JsonDriver {
    matcher: Arc<dyn Matcher>,
    fields: IndexMap<String, String>,
    matcher_patterns: Vec<String>,
    indent: usize,
}

impl JsonDriver {
    pub fn new(matcher: Arc<dyn Matcher>) -> Self {
        Self {
            matcher,
            fields: IndexMap::new(),
            matcher_patterns: default_matcher_patterns(),
            indent: 2,
        }
    }

    pub fn from_config(matcher: Arc<dyn Matcher>, config: &UpdaterConfig) -> Self {
        Self {
            matcher,
            fields: config.fields.clone(),
            matcher_patterns: config.matcher_patterns.clone(),
            indent: config.indent,
        }
    }

    pub fn with_fields(mut self, fields: IndexMap<String, String>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_matcher_patterns(mut self, patterns: Vec<String>) -> Self {
        self.matcher_patterns = patterns;
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn fields(&self) -> &IndexMap<String, String> {
        &self.fields
    }

    pub fn matcher_patterns(&self) -> &[String] {
        &self.matcher_patterns
    }

    fn expected_tree(&self, expected: Option<&Operand>) -> Value {
        match expected {
            Some(Operand::Json(original)) => {
                let mut normalized = original.clone();
                recover_empty_containers(&mut normalized, original);
                normalized
            }
            Some(other) => {
                debug!(kind = other.kind(), "expected side is not JSON, treating it as empty");
                Value::Object(Map::new())
            }
            None => Value::Object(Map::new()),
        }
    }
}

impl Default for JsonDriver {
    fn default() -> Self {
        Self::new(Arc::new(PatternMatcher::new()))
    }
}

impl fmt::Debug for JsonDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonDriver")
            .field("fields", &self.fields)
            .field("matcher_patterns", &self.matcher_patterns)
            .field("indent", &self.indent)
            .finish_non_exhaustive()
    }
}

impl Driver for JsonDriver {
    fn serialize(&self, failure: &ComparisonFailure) -> Result<String, NotSerializable> {
        let actual = match failure.actual() {
            Operand::Json(value @ (Value::Object(_) | Value::Array(_))) => value.clone(),
            Operand::Unencodable(err) => return Err(NotSerializable::Encode(Arc::clone(err))),
            other => {
                return Err(NotSerializable::Coercion {
                    expected: "list or map",
                    found: other.kind(),
                })
            }
        };
        let expected = self.expected_tree(failure.expected());

        let reconciler = Reconciler::new(self.matcher.as_ref(), &self.matcher_patterns, &self.fields);
        let updated = reconciler.reconcile(actual, &expected);

        to_pretty_json(&updated, self.indent).map_err(|err| NotSerializable::Encode(Arc::new(err)))
    }
}
