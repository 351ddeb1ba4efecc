use imbroker_proto::{AttributeExtensionId, ConnectionId, Request, RequestPayload};
use pretty_assertions::assert_eq;

use super::helpers::Harness;

fn replay(h: &mut Harness, lines: &[&str]) {
	for line in lines {
		let request: Request = serde_json::from_str(line).expect("request parses");
		h.broker.dispatch(request);
	}
}

#[test]
fn scripted_session_drives_broker() {
	let mut h = Harness::new();

	replay(
		&mut h,
		&[
			r#"{"connection":5,"kind":"activateContext"}"#,
			r#"{"connection":5,"kind":"updateWidgetInformation","state":{"focusState":true,"contentType":2},"focusChanged":true}"#,
			r#"{"connection":7,"kind":"showInputMethod"}"#,
			r#"{"connection":5,"kind":"showInputMethod"}"#,
			r#"{"connection":5,"kind":"registerAttributeExtension","id":10,"resource":"kbd.xml"}"#,
		],
	);

	assert_eq!(h.broker.active_connection(), ConnectionId(5));
	assert_eq!(h.broker.content_type(), Some(2));
	assert_eq!(
		h.take_log(),
		vec![
			"t.settings(false,false,false)",
			"t.client_change(5)",
			"t.focus(true)",
			"listener.toolbar(:-2)",
			"t.update",
			"listener.show",
		]
	);
	assert_eq!(
		h.manager.ids(),
		vec![AttributeExtensionId::new(10, ConnectionId(5))]
	);
}

#[test]
fn dispatched_disconnect_matches_direct_call() {
	let mut h = Harness::active(5);
	h.broker
		.register_attribute_extension(ConnectionId(5), 1, "a.xml");

	h.broker
		.dispatch(Request::new(ConnectionId(5), RequestPayload::Disconnect));

	assert!(h.broker.active_connection().is_none());
	assert_eq!(h.manager.ids(), Vec::<AttributeExtensionId>::new());
	assert_eq!(h.take_log(), vec!["t.client_change(0)"]);
}

#[test]
fn dispatched_orientation_is_filtered() {
	let mut h = Harness::active(5);

	h.broker.dispatch(Request::new(
		ConnectionId(6),
		RequestPayload::AppOrientationChanged { angle: 90 },
	));
	h.broker.dispatch(Request::new(
		ConnectionId(5),
		RequestPayload::AppOrientationChanged { angle: 180 },
	));

	assert_eq!(h.broker.last_orientation(), 180);
	assert_eq!(
		h.take_log(),
		vec!["listener.orientation_changed(180)", "t.orientation_changed(180)"]
	);
}
