//! Target and listener that log what the broker tells them.

use imbroker::proto::{AttributeExtensionId, ConnectionId, KeyEvent, Point, Rect};
use imbroker::settings::GlobalSettings;
use imbroker::{BrokerListener, InputMethodTarget, TargetContext};
use tracing::info;

/// Plugin stand-in that logs every notification.
#[derive(Debug, Default)]
pub struct TracingTarget {
	notifications: usize,
}

impl TracingTarget {
	/// Notifications received so far.
	pub fn notifications(&self) -> usize {
		self.notifications
	}

	fn count(&mut self) {
		self.notifications += 1;
	}
}

impl InputMethodTarget for TracingTarget {
	fn handle_app_orientation_changed(&mut self, _cx: &mut TargetContext<'_>, angle: i32) {
		self.count();
		info!(angle, "target: orientation changed");
	}

	fn handle_app_orientation_about_to_change(&mut self, _cx: &mut TargetContext<'_>, angle: i32) {
		self.count();
		info!(angle, "target: orientation about to change");
	}

	fn handle_mouse_click_on_preedit(&mut self, _cx: &mut TargetContext<'_>, pos: Point, rect: Rect) {
		self.count();
		info!(?pos, ?rect, "target: preedit clicked");
	}

	fn set_preedit(&mut self, _cx: &mut TargetContext<'_>, text: &str, cursor_pos: i32) {
		self.count();
		info!(text, cursor_pos, "target: preedit set");
	}

	fn reset(&mut self, _cx: &mut TargetContext<'_>) {
		self.count();
		info!("target: reset");
	}

	fn handle_focus_change(&mut self, _cx: &mut TargetContext<'_>, focused: bool) {
		self.count();
		info!(focused, "target: focus changed");
	}

	fn handle_visualization_priority_change(&mut self, _cx: &mut TargetContext<'_>, priority: bool) {
		self.count();
		info!(priority, "target: visualization priority changed");
	}

	fn update(&mut self, cx: &mut TargetContext<'_>) {
		self.count();
		info!(surrounding = ?cx.surrounding_text(), "target: widget state updated");
	}

	fn handle_client_change(&mut self, cx: &mut TargetContext<'_>) {
		self.count();
		info!(active = %cx.active_connection(), "target: client changed");
	}

	fn process_key_event(&mut self, _cx: &mut TargetContext<'_>, event: &KeyEvent) {
		self.count();
		info!(?event, "target: key event");
	}

	fn handle_global_settings(&mut self, _cx: &mut TargetContext<'_>, settings: &GlobalSettings) {
		self.count();
		info!(?settings, "target: global settings");
	}
}

/// Host observer that logs every notification.
#[derive(Debug)]
pub struct TracingListener;

impl BrokerListener for TracingListener {
	fn activation_lost(&self, previous: ConnectionId) {
		info!(%previous, "activation lost");
	}

	fn show_input_method_request(&self) {
		info!("show input method requested");
	}

	fn hide_input_method_request(&self) {
		info!("hide input method requested");
	}

	fn app_orientation_about_to_change(&self, angle: i32) {
		info!(angle, "orientation about to change");
	}

	fn app_orientation_changed(&self, angle: i32) {
		info!(angle, "orientation changed");
	}

	fn toolbar_id_changed(&self, id: &AttributeExtensionId) {
		info!(%id, "toolbar changed");
	}

	fn key_override_created(&self) {
		info!("key override created");
	}

	fn set_transient_hint(&self, win_id: u64) {
		info!(win_id, "transient hint");
	}
}
