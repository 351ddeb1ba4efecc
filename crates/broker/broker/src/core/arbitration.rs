//! Active-connection state machine and global settings.

use imbroker_proto::ConnectionId;

use super::ConnectionBroker;
use crate::settings::GlobalSettings;

impl ConnectionBroker {
	/// Makes `connection` the active connection.
	///
	/// No-op if it already is. Otherwise the previously active connection is
	/// told it lost activation, global settings are re-sent to every target
	/// (forced, even if unchanged) when `connection` is a real connection, and
	/// every target is told the client changed.
	pub fn activate_context(&mut self, connection: ConnectionId) {
		if connection == self.active {
			return;
		}

		let previous = self.active;
		if !previous.is_none() {
			self.notify_listeners(|listener| listener.activation_lost(previous));
		}

		self.active = connection;
		tracing::debug!(%previous, %connection, "active connection changed");

		if !connection.is_none() {
			self.apply_settings(self.settings, true);
		}

		self.notify_targets(|target, cx| target.handle_client_change(cx));
	}

	/// Cleans up after the transport lost `connection`.
	///
	/// Every attribute extension the connection registered is dropped whether
	/// or not it is active. If it was active, no connection is active
	/// afterwards and every target is told the client changed.
	pub fn handle_disconnection(&mut self, connection: ConnectionId) {
		self.extensions.remove_owned_by(connection);

		if connection.is_none() || connection != self.active {
			tracing::trace!(%connection, "inactive connection disconnected");
			return;
		}

		self.active = ConnectionId::NONE;
		tracing::debug!(%connection, "active connection disconnected");

		self.notify_targets(|target, cx| target.handle_client_change(cx));
	}

	/// Current global settings.
	#[must_use]
	pub fn settings(&self) -> GlobalSettings {
		self.settings
	}

	/// Whether auto-repeat releases are detectable.
	#[must_use]
	pub fn detectable_auto_repeat(&self) -> bool {
		self.settings.detectable_auto_repeat
	}

	/// Changes auto-repeat detectability; targets hear about actual changes.
	pub fn set_detectable_auto_repeat(&mut self, enabled: bool) {
		let settings = GlobalSettings {
			detectable_auto_repeat: enabled,
			..self.settings
		};
		self.apply_settings(settings, false);
	}

	/// Whether correction is enabled globally.
	#[must_use]
	pub fn global_correction_enabled(&self) -> bool {
		self.settings.global_correction_enabled
	}

	/// Changes global correction; targets hear about actual changes.
	pub fn set_global_correction_enabled(&mut self, enabled: bool) {
		let settings = GlobalSettings {
			global_correction_enabled: enabled,
			..self.settings
		};
		self.apply_settings(settings, false);
	}

	/// Whether key redirection is enabled.
	#[must_use]
	pub fn redirect_keys_enabled(&self) -> bool {
		self.settings.redirect_keys
	}

	/// Changes key redirection; targets hear about actual changes.
	pub fn set_redirect_keys(&mut self, enabled: bool) {
		let settings = GlobalSettings {
			redirect_keys: enabled,
			..self.settings
		};
		self.apply_settings(settings, false);
	}

	/// Stores `settings` and notifies targets if they changed or `force` is set.
	///
	/// With `force` the transmitted values may be identical to the previous
	/// ones; only the notification is guaranteed.
	fn apply_settings(&mut self, settings: GlobalSettings, force: bool) {
		if !force && settings == self.settings {
			return;
		}

		self.settings = settings;
		tracing::debug!(?settings, force, "global settings sent");
		self.notify_targets(|target, cx| target.handle_global_settings(cx, &settings));
	}
}
