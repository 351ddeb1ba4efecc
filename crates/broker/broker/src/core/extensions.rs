//! Attribute-extension calls.
//!
//! These are scoped by connection but not admission-filtered: a background
//! client may register its toolbars before it gains focus.

use imbroker_proto::ConnectionId;
use serde_json::Value;

use super::ConnectionBroker;

impl ConnectionBroker {
	/// Registers `resource` under `local_id` for `connection`.
	///
	/// Invalid ids and repeated registrations are ignored.
	pub fn register_attribute_extension(
		&mut self,
		connection: ConnectionId,
		local_id: i32,
		resource: &str,
	) {
		self.extensions.register(connection, local_id, resource);
	}

	/// Unregisters `local_id` for `connection`. Unknown ids are ignored.
	pub fn unregister_attribute_extension(&mut self, connection: ConnectionId, local_id: i32) {
		self.extensions.unregister(connection, local_id);
	}

	/// Changes one attribute of a registered extension.
	///
	/// Ignored unless `local_id` is registered for `connection`.
	pub fn set_extended_attribute(
		&mut self,
		connection: ConnectionId,
		local_id: i32,
		target: &str,
		target_name: &str,
		attribute: &str,
		value: &Value,
	) {
		self.extensions.set_extended_attribute(
			connection,
			local_id,
			target,
			target_name,
			attribute,
			value,
		);
	}
}
