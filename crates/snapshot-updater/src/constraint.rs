//! Assertions that compare produced content with expected fixtures and
//! refresh the fixture when updating is enabled.

use crate::comparison::ComparisonFailure;
use crate::configurator::DriverConfigurator;
use serde_json::Value;
use snapshot_matcher::PatternMatcher;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

const JSON_MISMATCH: &str = "Failed asserting that two json values are equal.";

#[derive(Error, Debug)]
#[error("Failed asserting that {description}.")]
pub struct AssertionFailure {
    description: String,
    comparison: Option<ComparisonFailure>,
}

impl AssertionFailure {
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Present when both sides decoded as JSON.
    pub fn comparison(&self) -> Option<&ComparisonFailure> {
        self.comparison.as_ref()
    }
}

fn json_failure(actual: &str, expected: &str, description: String) -> AssertionFailure {
    let comparison = match (
        serde_json::from_str::<Value>(expected),
        serde_json::from_str::<Value>(actual),
    ) {
        (Ok(expected), Ok(actual)) => {
            Some(ComparisonFailure::new(Some(expected.into()), actual).with_message(JSON_MISMATCH))
        }
        _ => None,
    };
    AssertionFailure {
        description,
        comparison,
    }
}

/// Actual text matches an expected JSON string that may contain placeholders.
#[derive(Debug, Clone)]
pub struct JsonContentMatches<'m> {
    expected: String,
    matcher: &'m PatternMatcher,
}

impl<'m> JsonContentMatches<'m> {
    pub fn new(expected: impl Into<String>, matcher: &'m PatternMatcher) -> Self {
        Self {
            expected: expected.into(),
            matcher,
        }
    }

    pub fn evaluate(&self, actual: &str) -> Result<(), AssertionFailure> {
        if self.matcher.match_text(actual, &self.expected) {
            return Ok(());
        }
        Err(json_failure(
            actual,
            &self.expected,
            format!("{actual} matches JSON string {}", self.expected),
        ))
    }
}

/// Actual text matches the contents of a fixture file.
#[derive(Debug, Clone)]
pub struct ContentMatchesFile {
    path: PathBuf,
}

impl ContentMatchesFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn evaluate(&self, actual: &str, matcher: &PatternMatcher) -> Result<(), AssertionFailure> {
        let expected = match fs::read_to_string(&self.path) {
            Ok(expected) => expected,
            Err(err) => {
                return Err(AssertionFailure {
                    description: format!(
                        "content matches content of file \"{}\" (unreadable: {err})",
                        self.path.display()
                    ),
                    comparison: None,
                })
            }
        };
        if matcher.match_text(actual, &expected) {
            return Ok(());
        }
        Err(json_failure(
            actual,
            &expected,
            format!("content matches content of file \"{}\"", self.path.display()),
        ))
    }
}

/// Checks `actual` against the fixture at `path`. On a mismatch with updating
/// enabled the fixture is rewritten first, but the mismatch is still returned.
pub fn assert_json_matches_file(
    configurator: &DriverConfigurator,
    matcher: &PatternMatcher,
    actual: &str,
    path: impl AsRef<Path>,
) -> Result<(), AssertionFailure> {
    let path = path.as_ref();
    let Err(failure) = ContentMatchesFile::new(path).evaluate(actual, matcher) else {
        return Ok(());
    };

    if configurator.is_enabled() {
        if let Some(comparison) = failure.comparison() {
            if let Err(err) = configurator.update_json(comparison, path) {
                warn!(path = %path.display(), error = %err, "could not update snapshot");
            }
        }
    }
    Err(failure)
}
