//! Admission-filtered inbound calls.
//!
//! Every handler here is a silent no-op unless its connection is active.

use imbroker_proto::{ConnectionId, KeyEvent, Point, Rect};

use super::ConnectionBroker;

impl ConnectionBroker {
	/// The client asks for the input method to be shown.
	pub fn show_input_method(&mut self, connection: ConnectionId) {
		if !self.admits(connection, "showInputMethod") {
			return;
		}
		self.notify_listeners(|listener| listener.show_input_method_request());
	}

	/// The client asks for the input method to be hidden.
	pub fn hide_input_method(&mut self, connection: ConnectionId) {
		if !self.admits(connection, "hideInputMethod") {
			return;
		}
		self.notify_listeners(|listener| listener.hide_input_method_request());
	}

	/// The user clicked at `pos` inside the preedit drawn in `rect`.
	pub fn mouse_clicked_on_preedit(&mut self, connection: ConnectionId, pos: Point, rect: Rect) {
		if !self.admits(connection, "mouseClickedOnPreedit") {
			return;
		}
		self.notify_targets(|target, cx| target.handle_mouse_click_on_preedit(cx, pos, rect));
	}

	/// The client replaced the preedit.
	pub fn set_preedit(&mut self, connection: ConnectionId, text: &str, cursor_pos: i32) {
		if !self.admits(connection, "setPreedit") {
			return;
		}
		self.edit.set_preedit(text);
		self.notify_targets(|target, cx| target.set_preedit(cx, text, cursor_pos));
	}

	/// Resets every target.
	///
	/// Targets must not send a preedit while resetting; one sent anyway is
	/// discarded with a warning.
	pub fn reset(&mut self, connection: ConnectionId) {
		if !self.admits(connection, "reset") {
			return;
		}

		self.edit.clear_preedit();
		self.notify_targets(|target, cx| target.reset(cx));

		if !self.edit.preedit().is_empty() {
			tracing::warn!(%connection, preedit = self.edit.preedit(), "preedit set during reset, discarding");
			self.edit.clear_preedit();
		}
	}

	/// Routes a key event from the client through every target.
	pub fn process_key_event(&mut self, connection: ConnectionId, event: &KeyEvent) {
		if !self.admits(connection, "processKeyEvent") {
			return;
		}
		self.notify_targets(|target, cx| target.process_key_event(cx, event));
	}

	/// The client is about to rotate to `angle`.
	///
	/// Listeners hear first so rotation resources are ready before plugins
	/// repaint.
	pub fn received_app_orientation_about_to_change(&mut self, connection: ConnectionId, angle: i32) {
		if !self.admits(connection, "appOrientationAboutToChange") {
			return;
		}
		self.notify_listeners(|listener| listener.app_orientation_about_to_change(angle));
		self.notify_targets(|target, cx| target.handle_app_orientation_about_to_change(cx, angle));
	}

	/// The client finished rotating to `angle`.
	///
	/// Listeners hear first. The angle is remembered and sent to targets
	/// registered later.
	pub fn received_app_orientation_changed(&mut self, connection: ConnectionId, angle: i32) {
		if !self.admits(connection, "appOrientationChanged") {
			return;
		}
		self.notify_listeners(|listener| listener.app_orientation_changed(angle));
		self.notify_targets(|target, cx| target.handle_app_orientation_changed(cx, angle));
		self.last_orientation = angle;
	}

	/// Clipboard availability changed in the client.
	pub fn set_copy_paste_state(
		&mut self,
		connection: ConnectionId,
		copy_available: bool,
		paste_available: bool,
	) {
		if !self.admits(connection, "setCopyPasteState") {
			return;
		}
		self.extensions
			.manager()
			.set_copy_paste_state(copy_available, paste_available);
	}
}
