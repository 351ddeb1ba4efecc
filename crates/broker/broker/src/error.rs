//! Error types for broker configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading the broker configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or shape.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The initial orientation is not a right angle.
	#[error("invalid orientation angle: {0} (expected 0, 90, 180 or 270)")]
	InvalidOrientation(i32),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
