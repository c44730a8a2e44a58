//! Rewriting expected-output fixtures from failed comparisons.
//!
//! When a test compares produced output with a recorded fixture and the two
//! differ, the fixture can be regenerated from the new output. The JSON
//! driver keeps the placeholders of the old fixture (`@integer@`, `@uuid@`,
//! ...) that still match, replaces the rest with the new literals, and keeps
//! `{}` and `[]` apart.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use snapshot_updater::{ComparisonFailure, DriverConfigurator, UpdaterConfig};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let fixture = dir.path().join("user.json");
//!
//! let mut configurator = DriverConfigurator::new();
//! configurator.create_drivers(&UpdaterConfig::default());
//! configurator.enable().unwrap();
//!
//! let failure = ComparisonFailure::new(
//!     Some(json!({"id": "@integer@", "name": "Alice"}).into()),
//!     json!({"id": 7, "name": "Bob"}),
//! );
//! configurator.update_json(&failure, &fixture).unwrap();
//!
//! assert_eq!(
//!     std::fs::read_to_string(&fixture).unwrap(),
//!     "{\n  \"id\": \"@integer@\",\n  \"name\": \"Bob\"\n}"
//! );
//! ```

pub mod comparison;
pub mod config;
pub mod configurator;
pub mod constraint;
pub mod driver;
pub mod error;
mod finite;
pub mod format;
pub mod path;
pub mod reconcile;
pub mod updater;
pub mod xml;

pub use comparison::{ComparisonFailure, Operand};
pub use config::{UpdaterConfig, UPDATE_SNAPSHOTS_ENV};
pub use configurator::{DriverConfigurator, UpdateSession};
pub use constraint::{assert_json_matches_file, AssertionFailure, ContentMatchesFile, JsonContentMatches};
pub use driver::{Driver, JsonDriver, TextDriver, XmlDriver};
pub use error::{ConfigError, NotSerializable, SnapshotError};
pub use reconcile::{Reconciler, DEFAULT_MATCHER_PATTERNS};
pub use updater::update_snapshot_file;
pub use xml::{XmlDocument, XmlError};

pub use snapshot_matcher::{Matcher, PatternMatcher};
