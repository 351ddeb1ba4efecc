//! Server-wide input settings pushed to plugin targets.

use serde::{Deserialize, Serialize};

/// Settings owned by the broker rather than by any single client.
///
/// Every newly activated client must observe these, so activation re-sends
/// them even when nothing changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalSettings {
	/// Key releases of auto-repeated keys can be told apart from real releases.
	pub detectable_auto_repeat: bool,
	/// Error correction is enabled for every client.
	pub global_correction_enabled: bool,
	/// Hardware key events are redirected to the input method.
	pub redirect_keys: bool,
}
