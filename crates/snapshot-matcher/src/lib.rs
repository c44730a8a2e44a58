//! Placeholder pattern matching for JSON fixtures.
//!
//! A fixture may hold a placeholder instead of a literal value. A placeholder
//! is a type pattern such as `@string@` or `@uuid@`, optionally followed by
//! expander calls that narrow it down: `@string@.startsWith("ord_")`,
//! `@integer@.greaterThan(0)`, `@string@.isDateTime()`.
//!
//! # Example
//!
//! ```
//! use snapshot_matcher::{Matcher, PatternMatcher};
//! use serde_json::json;
//!
//! let matcher = PatternMatcher::new();
//! assert!(matcher.matches(&json!(42), "@integer@"));
//! assert!(!matcher.matches(&json!(42), "@string@"));
//! assert!(matcher.matches(&json!("2024-01-01T00:00:00Z"), "@string@.isDateTime()"));
//!
//! assert!(matcher.match_values(
//!     &json!({"id": 7, "tags": ["a", "b", "c"]}),
//!     &json!({"id": "@integer@", "tags": ["a", "@...@"]}),
//! ));
//! ```

pub mod error;
pub mod expanders;
pub mod matcher;
pub mod parse;
pub mod types;
pub mod util;

pub use error::PatternError;
pub use expanders::{all_expanders, expanders_map};
pub use matcher::{Matcher, PatternMatcher};
pub use types::{Arity, Expander, ExpanderDefinition, ExpanderMap, Pattern, TypeKind};

/// Placeholder that, as the last element of an expected list, accepts any
/// remaining elements of the actual list.
pub const UNBOUNDED: &str = "@...@";
