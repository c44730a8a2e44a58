//! Owns the drivers and the switch that allows snapshot files to be
//! rewritten.

use crate::config::{update_requested, UpdaterConfig};
use crate::driver::{JsonDriver, TextDriver, XmlDriver};
use crate::error::SnapshotError;
use snapshot_matcher::{Matcher, PatternMatcher};
use std::ops::Deref;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug)]
struct Drivers {
    json: JsonDriver,
    text: TextDriver,
    xml: XmlDriver,
}

/// Drivers are created once per run; updates only happen while enabled.
#[derive(Debug, Default)]
pub struct DriverConfigurator {
    drivers: Option<Drivers>,
    enabled: bool,
}

impl DriverConfigurator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Created from `config`, enabled when `UPDATE_SNAPSHOTS` asks for it.
    pub fn from_env(config: &UpdaterConfig) -> Self {
        let mut configurator = Self::new();
        configurator.create_drivers(config);
        if update_requested() {
            configurator.enabled = true;
            info!("snapshot updates enabled from environment");
        }
        configurator
    }

    pub fn create_drivers(&mut self, config: &UpdaterConfig) {
        self.create_drivers_with_matcher(config, Arc::new(PatternMatcher::new()));
    }

    /// Replaces any previously created drivers.
    pub fn create_drivers_with_matcher(&mut self, config: &UpdaterConfig, matcher: Arc<dyn Matcher>) {
        debug!(
            fields = config.fields.len(),
            patterns = config.matcher_patterns.len(),
            "creating snapshot drivers"
        );
        self.drivers = Some(Drivers {
            json: JsonDriver::from_config(matcher, config),
            text: TextDriver::new(),
            xml: XmlDriver::new(),
        });
    }

    pub fn enable(&mut self) -> Result<(), SnapshotError> {
        if self.drivers.is_none() {
            return Err(SnapshotError::NotCreated);
        }
        self.enabled = true;
        Ok(())
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables updates until the returned guard is dropped.
    pub fn session(&mut self) -> Result<UpdateSession<'_>, SnapshotError> {
        self.enable()?;
        Ok(UpdateSession { configurator: self })
    }

    pub fn json_driver(&self) -> Result<&JsonDriver, SnapshotError> {
        Ok(&self.drivers()?.json)
    }

    pub fn text_driver(&self) -> Result<&TextDriver, SnapshotError> {
        Ok(&self.drivers()?.text)
    }

    pub fn xml_driver(&self) -> Result<&XmlDriver, SnapshotError> {
        Ok(&self.drivers()?.xml)
    }

    fn drivers(&self) -> Result<&Drivers, SnapshotError> {
        if !self.enabled {
            return Err(SnapshotError::NotEnabled);
        }
        self.drivers.as_ref().ok_or(SnapshotError::NotCreated)
    }
}

/// Guard returned by [`DriverConfigurator::session`]; disables updates on drop.
#[derive(Debug)]
pub struct UpdateSession<'a> {
    configurator: &'a mut DriverConfigurator,
}

impl Deref for UpdateSession<'_> {
    type Target = DriverConfigurator;

    fn deref(&self) -> &DriverConfigurator {
        self.configurator
    }
}

impl Drop for UpdateSession<'_> {
    fn drop(&mut self) {
        self.configurator.disable();
    }
}
