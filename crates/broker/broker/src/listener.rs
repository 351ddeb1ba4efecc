//! Singular external listeners.
//!
//! Listeners are the host components that are not plugins: the rotation
//! animator, the toolbar manager UI, the window manager glue, and the
//! transport that tells clients they lost activation. They are notified
//! before targets wherever both are notified.

use imbroker_proto::{AttributeExtensionId, ConnectionId};

/// Observer for broker events that are not plugin notifications.
///
/// Every method has an empty default body.
#[allow(unused_variables)]
pub trait BrokerListener {
	/// `previous` is no longer the active connection.
	fn activation_lost(&self, previous: ConnectionId) {}

	/// The active client asked for the input method to be shown.
	fn show_input_method_request(&self) {}

	/// The active client asked for the input method to be hidden.
	fn hide_input_method_request(&self) {}

	/// The active client is about to rotate to `angle`.
	fn app_orientation_about_to_change(&self, angle: i32) {}

	/// The active client finished rotating to `angle`.
	fn app_orientation_changed(&self, angle: i32) {}

	/// The active client now uses a different attribute extension.
	fn toolbar_id_changed(&self, id: &AttributeExtensionId) {}

	/// The extension manager created a key override.
	fn key_override_created(&self) {}

	/// The input method window should be transient for `win_id`.
	fn set_transient_hint(&self, win_id: u64) {}
}
