//! Writing snapshot files.

use crate::comparison::ComparisonFailure;
use crate::configurator::DriverConfigurator;
use crate::driver::Driver;
use crate::error::SnapshotError;
use std::fs;
use std::path::Path;
use tracing::info;

impl DriverConfigurator {
    pub fn update_json(
        &self,
        failure: &ComparisonFailure,
        snapshot_file: impl AsRef<Path>,
    ) -> Result<(), SnapshotError> {
        update_snapshot_file(self.json_driver()?, failure, snapshot_file.as_ref())
    }

    pub fn update_text(
        &self,
        failure: &ComparisonFailure,
        snapshot_file: impl AsRef<Path>,
    ) -> Result<(), SnapshotError> {
        update_snapshot_file(self.text_driver()?, failure, snapshot_file.as_ref())
    }

    pub fn update_xml(
        &self,
        failure: &ComparisonFailure,
        snapshot_file: impl AsRef<Path>,
    ) -> Result<(), SnapshotError> {
        update_snapshot_file(self.xml_driver()?, failure, snapshot_file.as_ref())
    }
}

/// Serializes first, so a failing driver leaves the file untouched.
pub fn update_snapshot_file(
    driver: &dyn Driver,
    failure: &ComparisonFailure,
    snapshot_file: &Path,
) -> Result<(), SnapshotError> {
    let contents = driver.serialize(failure)?;
    fs::write(snapshot_file, &contents).map_err(|source| SnapshotError::Io {
        path: snapshot_file.to_path_buf(),
        source,
    })?;
    info!(path = %snapshot_file.display(), bytes = contents.len(), "snapshot updated");
    Ok(())
}
