use imbroker_proto::{AttributeExtensionId, ConnectionId, Rect, WidgetState};
use pretty_assertions::assert_eq;
use rstest::rstest;

use super::helpers::Harness;

const CONN: ConnectionId = ConnectionId(5);

fn focused(content_type: i32) -> WidgetState {
	WidgetState {
		focus_state: Some(true),
		content_type: Some(content_type),
		..WidgetState::default()
	}
}

#[test]
fn focus_update_notifies_focus_then_update() {
	let mut h = Harness::active(5);

	h.broker.update_widget_information(CONN, focused(2), true);

	assert_eq!(h.broker.content_type(), Some(2));
	assert_eq!(h.take_target_log("t"), vec!["t.focus(true)", "t.update"]);
}

#[test]
fn first_update_switches_to_standard_toolbar() {
	let mut h = Harness::active(5);

	h.broker.update_widget_information(CONN, focused(2), true);

	assert_eq!(
		h.take_log(),
		vec!["t.focus(true)", "listener.toolbar(:-2)", "t.update"]
	);
	assert_eq!(
		h.broker.current_extension_id(),
		&AttributeExtensionId::standard()
	);
}

#[test]
fn update_without_focus_change_only_updates() {
	let mut h = Harness::active(5);
	h.broker.update_widget_information(CONN, focused(1), true);
	h.take_log();

	h.broker.update_widget_information(
		CONN,
		WidgetState {
			win_id: Some(42),
			..focused(1)
		},
		false,
	);

	assert_eq!(h.take_log(), vec!["t.update"]);
}

#[test]
fn focus_change_refreshes_transient_hint() {
	let mut h = Harness::active(5);

	h.broker.update_widget_information(
		CONN,
		WidgetState {
			win_id: Some(42),
			..focused(1)
		},
		true,
	);

	let log = h.take_log();
	assert_eq!(&log[..2], ["t.focus(true)", "listener.transient_hint(42)"]);
	assert_eq!(h.broker.win_id(), Some(42));
}

#[test]
fn absent_focus_state_reads_as_unfocused() {
	let mut h = Harness::active(5);

	h.broker
		.update_widget_information(CONN, WidgetState::default(), true);

	assert_eq!(h.take_target_log("t"), vec!["t.focus(false)", "t.update"]);
}

#[test]
fn update_replaces_rather_than_merges() {
	let mut h = Harness::active(5);
	h.broker.update_widget_information(
		CONN,
		WidgetState {
			content_type: Some(3),
			hidden_text: Some(true),
			..WidgetState::default()
		},
		false,
	);

	h.broker.update_widget_information(
		CONN,
		WidgetState {
			prediction_enabled: Some(false),
			..WidgetState::default()
		},
		false,
	);

	assert_eq!(h.broker.content_type(), None);
	assert_eq!(h.broker.hidden_text(), None);
	assert_eq!(h.broker.prediction_enabled(), Some(false));
}

#[test]
fn accessors_read_every_attribute() {
	let mut h = Harness::active(5);
	let state = WidgetState {
		focus_state: Some(true),
		content_type: Some(4),
		correction_enabled: Some(true),
		prediction_enabled: Some(false),
		auto_capitalization_enabled: Some(true),
		surrounding_text: Some("hello".to_owned()),
		anchor_position: Some(2),
		cursor_position: Some(2),
		has_selection: Some(false),
		input_method_mode: Some(1),
		visualization_priority: Some(false),
		toolbar_id: None,
		toolbar: None,
		win_id: Some(9),
		cursor_rectangle: Some(Rect::new(1, 2, 3, 4)),
		hidden_text: Some(false),
		preedit_click_pos: Some(0),
	};

	h.broker.update_widget_information(CONN, state.clone(), true);

	assert_eq!(h.broker.widget_state(), &state);
	assert_eq!(h.broker.content_type(), Some(4));
	assert_eq!(h.broker.correction_enabled(), Some(true));
	assert_eq!(h.broker.prediction_enabled(), Some(false));
	assert_eq!(h.broker.auto_capitalization_enabled(), Some(true));
	assert_eq!(h.broker.surrounding_text(), Some(("hello".to_owned(), 2)));
	assert_eq!(h.broker.anchor_position(), Some(2));
	assert_eq!(h.broker.has_selection(), Some(false));
	assert_eq!(h.broker.input_method_mode(), Some(1));
	assert_eq!(h.broker.win_id(), Some(9));
	assert_eq!(h.broker.cursor_rectangle(), Some(Rect::new(1, 2, 3, 4)));
	assert_eq!(h.broker.hidden_text(), Some(false));
	assert_eq!(h.broker.preedit_click_pos(), Some(0));
	assert_eq!(h.broker.preedit_rectangle(), None);
	assert_eq!(h.broker.selection(), None);
}

#[test]
fn surrounding_text_needs_cursor() {
	let mut h = Harness::active(5);

	h.broker.update_widget_information(
		CONN,
		WidgetState {
			surrounding_text: Some("abc".to_owned()),
			..WidgetState::default()
		},
		false,
	);

	assert_eq!(h.broker.surrounding_text(), None);
}

#[rstest]
#[case::unchanged_true(Some(true), Some(true), None)]
#[case::absent_to_absent(None, None, None)]
#[case::absent_to_true(None, Some(true), Some(true))]
#[case::true_to_absent(Some(true), None, Some(false))]
#[case::false_to_absent(Some(false), None, None)]
fn visualization_change_fires_only_on_difference(
	#[case] before: Option<bool>,
	#[case] after: Option<bool>,
	#[case] expected: Option<bool>,
) {
	let mut h = Harness::active(5);
	h.broker.update_widget_information(
		CONN,
		WidgetState {
			visualization_priority: before,
			..WidgetState::default()
		},
		false,
	);
	h.take_log();

	h.broker.update_widget_information(
		CONN,
		WidgetState {
			visualization_priority: after,
			..WidgetState::default()
		},
		false,
	);

	let mut want: Vec<String> = expected
		.map(|priority| format!("t.visualization({priority})"))
		.into_iter()
		.collect();
	want.push("t.update".to_owned());
	assert_eq!(h.take_log(), want);
}

#[test]
fn toolbar_change_fires_only_on_difference() {
	let mut h = Harness::active(5);
	let with_toolbar = |id: Option<i32>| WidgetState {
		toolbar_id: id,
		..WidgetState::default()
	};

	h.broker
		.update_widget_information(CONN, with_toolbar(Some(1)), false);
	assert_eq!(h.take_log(), vec!["listener.toolbar(5:1)", "t.update"]);

	h.broker
		.update_widget_information(CONN, with_toolbar(Some(1)), false);
	assert_eq!(h.take_log(), vec!["t.update"]);

	h.broker
		.update_widget_information(CONN, with_toolbar(None), false);
	assert_eq!(h.take_log(), vec!["listener.toolbar(:-2)", "t.update"]);

	h.broker
		.update_widget_information(CONN, with_toolbar(Some(-7)), false);
	assert_eq!(h.take_log(), vec!["t.update"]);
}

#[test]
fn toolbar_change_restores_lost_extension() {
	let mut h = Harness::active(5);

	h.broker.update_widget_information(
		CONN,
		WidgetState {
			toolbar_id: Some(3),
			toolbar: Some("kbd.xml".to_owned()),
			..WidgetState::default()
		},
		false,
	);

	let id = AttributeExtensionId::new(3, CONN);
	assert_eq!(h.manager.resource(&id), Some("kbd.xml".to_owned()));
	assert_eq!(h.broker.attribute_extension_ids().collect::<Vec<_>>(), vec![&id]);
	assert_eq!(h.broker.current_extension_id(), &id);
}

#[test]
fn toolbar_change_keeps_loaded_extension() {
	let mut h = Harness::active(5);
	h.broker
		.register_attribute_extension(CONN, 3, "original.xml");

	h.broker.update_widget_information(
		CONN,
		WidgetState {
			toolbar_id: Some(3),
			toolbar: Some("other.xml".to_owned()),
			..WidgetState::default()
		},
		false,
	);

	let id = AttributeExtensionId::new(3, CONN);
	assert_eq!(h.manager.resource(&id), Some("original.xml".to_owned()));
}

#[test]
fn toolbar_without_resource_is_not_restored() {
	let mut h = Harness::active(5);

	h.broker.update_widget_information(
		CONN,
		WidgetState {
			toolbar_id: Some(3),
			toolbar: Some(String::new()),
			..WidgetState::default()
		},
		false,
	);

	assert_eq!(h.manager.ids(), Vec::<AttributeExtensionId>::new());
	assert_eq!(h.take_log(), vec!["listener.toolbar(5:3)", "t.update"]);
}

#[test]
fn snapshot_resyncs_mirror_but_keeps_preedit() {
	let mut h = Harness::active(5);
	h.broker.set_preedit(CONN, "pre", 3);

	h.broker.update_widget_information(
		CONN,
		WidgetState {
			surrounding_text: Some("xyz".to_owned()),
			cursor_position: Some(1),
			anchor_position: Some(1),
			..WidgetState::default()
		},
		false,
	);

	assert_eq!(h.broker.surrounding_text(), Some(("xyz".to_owned(), 1)));
	assert_eq!(h.broker.preedit(), "pre");
}
