//! JSON-lines request replay.
//!
//! One [`Request`] per line. Blank lines and lines starting with `#` are
//! skipped.

use std::io::BufRead;
use std::path::PathBuf;

use imbroker::ConnectionBroker;
use imbroker::error::ConfigError;
use imbroker::proto::Request;
use thiserror::Error;

/// Errors that stop a replay.
#[derive(Debug, Error)]
pub enum ReplayError {
	/// The script file could not be opened.
	#[error("cannot open script {path}: {source}")]
	Open {
		/// Script path.
		path: PathBuf,
		/// The underlying I/O error.
		source: std::io::Error,
	},

	/// Reading the script failed midway.
	#[error("I/O error reading script: {0}")]
	Io(#[from] std::io::Error),

	/// A line is not a valid request.
	#[error("line {line}: {source}")]
	Parse {
		/// One-based line number.
		line: usize,
		/// The underlying JSON error.
		source: serde_json::Error,
	},

	/// The configuration could not be loaded.
	#[error(transparent)]
	Config(#[from] ConfigError),
}

/// Dispatches every request in `input` and returns how many were dispatched.
///
/// Stops at the first malformed line; requests before it stay applied.
pub fn replay(broker: &mut ConnectionBroker, input: impl BufRead) -> Result<usize, ReplayError> {
	let mut dispatched = 0;
	for (index, line) in input.lines().enumerate() {
		let line = line?;
		let line = line.trim();
		if line.is_empty() || line.starts_with('#') {
			continue;
		}

		let request: Request = serde_json::from_str(line).map_err(|source| ReplayError::Parse {
			line: index + 1,
			source,
		})?;
		tracing::debug!(connection = %request.connection, call = request.payload.name(), "replaying");
		broker.dispatch(request);
		dispatched += 1;
	}
	Ok(dispatched)
}
