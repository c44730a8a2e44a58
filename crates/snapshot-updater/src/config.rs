//! Updater settings.
//!
//! ```toml
//! indent = 2
//! matcher_patterns = ["@string@", "@integer@"]
//!
//! [fields]
//! createdAt = "@string@.isDateTime()"
//! ```

use crate::error::ConfigError;
use crate::reconcile::default_matcher_patterns;
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Environment variable that turns on snapshot updates.
pub const UPDATE_SNAPSHOTS_ENV: &str = "UPDATE_SNAPSHOTS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpdaterConfig {
    /// Keys whose values are always rewritten to the given pattern.
    pub fields: IndexMap<String, String>,
    /// Placeholder prefixes kept when they still match, tried in order.
    pub matcher_patterns: Vec<String>,
    /// Spaces per indentation level in written JSON snapshots.
    pub indent: usize,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            fields: IndexMap::new(),
            matcher_patterns: default_matcher_patterns(),
            indent: 2,
        }
    }
}

impl UpdaterConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn with_field(mut self, key: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.fields.insert(key.into(), pattern.into());
        self
    }
}

/// Whether [`UPDATE_SNAPSHOTS_ENV`] asks for updates.
pub fn update_requested() -> bool {
    update_mode_enabled(std::env::var(UPDATE_SNAPSHOTS_ENV).ok().as_deref())
}

pub(crate) fn update_mode_enabled(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "always")
    )
}
