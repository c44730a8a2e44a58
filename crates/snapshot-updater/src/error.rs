use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Actual value is not serializable: {0}")]
    ActualNotSerializable(#[from] NotSerializable),

    #[error("Updater is not enabled. You should call DriverConfigurator::enable first to enable it.")]
    NotEnabled,

    #[error("Updater is not created. You should call DriverConfigurator::create_drivers first to create it.")]
    NotCreated,

    #[error("Failed to write snapshot file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why the actual side of a comparison failure could not become a snapshot.
#[derive(Error, Debug)]
pub enum NotSerializable {
    #[error("JSON encoding failed: {0}")]
    Encode(#[source] Arc<serde_json::Error>),

    #[error("expected {expected}, got {found}")]
    Coercion {
        expected: &'static str,
        found: &'static str,
    },

    #[error("XML serialization failed: {0}")]
    Xml(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}
