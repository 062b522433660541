//! Configuration resolution
//!
//! Resolves the effective settings from up to three layers: a TOML config
//! file, `EDGEONE_*` environment variables, and built-in defaults. Command
//! line flags are applied on top by the caller, which re-validates.

use crate::{Result, config::Settings};
use std::path::Path;
use tracing::{debug, warn};

/// Resolves settings with file < environment < CLI precedence
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Built-in defaults, the lowest-precedence layer
    defaults: Settings,
}

impl ConfigLoader {
    /// Create a loader with built-in defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve settings, starting from the config file when one exists
    ///
    /// A missing file is not an error: the login URL and endpoints have
    /// working defaults, so most runs never write a config file at all.
    pub fn load(&self, config_file: Option<&Path>) -> Result<Settings> {
        let base = match config_file {
            Some(path) if path.exists() => {
                debug!("Reading configuration from {:?}", path);
                Settings::from_file(path)?
            }
            Some(path) => {
                warn!("Configuration file {:?} not found, using defaults", path);
                self.defaults.clone()
            }
            None => self.defaults.clone(),
        };

        let settings = base.merge_with_env()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Get default configuration
    pub fn defaults(&self) -> &Settings {
        &self.defaults
    }
}
