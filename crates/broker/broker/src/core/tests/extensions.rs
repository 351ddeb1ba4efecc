use imbroker_proto::{AttributeExtensionId, ConnectionId};
use pretty_assertions::assert_eq;
use serde_json::json;

use super::helpers::Harness;

#[test]
fn disconnect_unregisters_extensions() {
	let mut h = Harness::active(3);
	let id = AttributeExtensionId::new(10, ConnectionId(3));

	h.broker
		.register_attribute_extension(ConnectionId(3), 10, "kbd.xml");
	assert_eq!(h.manager.resource(&id), Some("kbd.xml".to_owned()));

	h.broker.handle_disconnection(ConnectionId(3));

	assert!(!h.manager.ids().contains(&id));
	assert_eq!(h.broker.attribute_extension_ids().count(), 0);
}

#[test]
fn disconnect_drops_only_owned_extensions() {
	let mut h = Harness::active(4);
	h.broker
		.register_attribute_extension(ConnectionId(3), 1, "three.xml");
	h.broker
		.register_attribute_extension(ConnectionId(4), 1, "four.xml");
	h.take_log();

	h.broker.handle_disconnection(ConnectionId(3));

	assert_eq!(
		h.manager.ids(),
		vec![AttributeExtensionId::new(1, ConnectionId(4))]
	);
	assert_eq!(h.broker.active_connection(), ConnectionId(4));
	assert_eq!(h.take_log(), Vec::<String>::new());
}

#[test]
fn registration_is_not_admission_filtered() {
	let mut h = Harness::active(5);

	h.broker
		.register_attribute_extension(ConnectionId(9), 2, "bg.xml");

	assert_eq!(
		h.manager
			.resource(&AttributeExtensionId::new(2, ConnectionId(9))),
		Some("bg.xml".to_owned())
	);
}

#[test]
fn repeated_registration_keeps_first_resource() {
	let mut h = Harness::active(5);
	let id = AttributeExtensionId::new(1, ConnectionId(5));

	h.broker
		.register_attribute_extension(ConnectionId(5), 1, "first.xml");
	h.broker
		.register_attribute_extension(ConnectionId(5), 1, "second.xml");

	assert_eq!(h.manager.resource(&id), Some("first.xml".to_owned()));
}

#[test]
fn invalid_local_id_is_ignored() {
	let mut h = Harness::active(5);

	h.broker
		.register_attribute_extension(ConnectionId(5), -1, "bad.xml");

	assert_eq!(h.manager.ids(), Vec::<AttributeExtensionId>::new());
}

#[test]
fn unregister_removes_only_that_id() {
	let mut h = Harness::active(5);
	h.broker
		.register_attribute_extension(ConnectionId(5), 1, "a.xml");
	h.broker
		.register_attribute_extension(ConnectionId(5), 2, "b.xml");

	h.broker.unregister_attribute_extension(ConnectionId(5), 1);
	h.broker.unregister_attribute_extension(ConnectionId(6), 2);

	assert_eq!(
		h.manager.ids(),
		vec![AttributeExtensionId::new(2, ConnectionId(5))]
	);
}

#[test]
fn extended_attribute_requires_registration() {
	let mut h = Harness::active(5);
	let id = AttributeExtensionId::new(1, ConnectionId(5));

	h.broker.set_extended_attribute(
		ConnectionId(5),
		1,
		"/keys",
		"enter",
		"label",
		&json!("Go"),
	);
	h.broker
		.register_attribute_extension(ConnectionId(5), 1, "a.xml");
	h.broker.set_extended_attribute(
		ConnectionId(5),
		1,
		"/keys",
		"enter",
		"highlighted",
		&json!(true),
	);

	assert_eq!(h.manager.attribute(&id, "/keys", "enter", "label"), None);
	assert_eq!(
		h.manager.attribute(&id, "/keys", "enter", "highlighted"),
		Some(json!(true))
	);
}
