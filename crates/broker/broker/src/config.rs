//! Broker configuration loaded from TOML.
//!
//! ```toml
//! initial_orientation = 90
//!
//! [settings]
//! detectable_auto_repeat = true
//! global_correction_enabled = false
//! redirect_keys = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::settings::GlobalSettings;

/// Configuration for the connection broker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrokerConfig {
	/// Global settings in effect before any setter is called.
	pub settings: GlobalSettings,
	/// Orientation reported to targets registered before any client rotates.
	pub initial_orientation: i32,
}

impl BrokerConfig {
	/// Parses a configuration document.
	pub fn from_toml_str(input: &str) -> Result<Self> {
		let config: Self = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads and parses the configuration file at `path`.
	pub fn load(path: &Path) -> Result<Self> {
		let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&input)
	}

	fn validate(&self) -> Result<()> {
		if !matches!(self.initial_orientation, 0 | 90 | 180 | 270) {
			return Err(ConfigError::InvalidOrientation(self.initial_orientation));
		}
		Ok(())
	}
}
