//! Widget-state snapshot replacement and accessors.

use imbroker_proto::{ConnectionId, Rect, WidgetState};

use super::ConnectionBroker;

impl ConnectionBroker {
	/// Replaces the active client's widget state.
	///
	/// Previous visualization priority and extension id are read before the
	/// snapshot is replaced. Then, in order: focus change (if `focus_changed`)
	/// and transient hint refresh, visualization change, toolbar change with
	/// self-healing registration, and finally the generic update.
	pub fn update_widget_information(
		&mut self,
		connection: ConnectionId,
		state: WidgetState,
		focus_changed: bool,
	) {
		if !self.admits(connection, "updateWidgetInformation") {
			return;
		}

		let old_visualization = self.widget.visualization_priority();
		let old_extension_id = self.current_extension_id.clone();

		self.widget.replace(state);
		self.edit.resync(self.widget.state());
		let new_extension_id = self.widget.resolve_extension_id(connection);

		if focus_changed {
			let focused = self.widget.focus_state();
			self.notify_targets(|target, cx| target.handle_focus_change(cx, focused));
			self.update_transient_hint();
		}

		let new_visualization = self.widget.visualization_priority();
		if old_visualization != new_visualization {
			self.notify_targets(|target, cx| {
				target.handle_visualization_priority_change(cx, new_visualization);
			});
		}

		if old_extension_id != new_extension_id {
			// The manager may have lost the extension if its owning process
			// restarted; the snapshot carries enough to load it again.
			if !self.extensions.manager().contains(&new_extension_id)
				&& let Some(resource) = self.widget.toolbar_resource()
				&& let Some(local_id) = self.widget.state().toolbar_id
			{
				self.extensions.restore(connection, local_id, resource);
			}

			tracing::debug!(from = %old_extension_id, to = %new_extension_id, "toolbar changed");
			self.notify_listeners(|listener| listener.toolbar_id_changed(&new_extension_id));
			self.current_extension_id = new_extension_id;
		}

		self.notify_targets(|target, cx| target.update(cx));
	}

	/// Points the window manager at the client window, if it is known.
	fn update_transient_hint(&self) {
		if let Some(win_id) = self.widget.win_id() {
			self.notify_listeners(|listener| listener.set_transient_hint(win_id));
		}
	}

	/// Client content type.
	#[must_use]
	pub fn content_type(&self) -> Option<i32> {
		self.widget.content_type()
	}

	/// Whether the client allows correction.
	#[must_use]
	pub fn correction_enabled(&self) -> Option<bool> {
		self.widget.correction_enabled()
	}

	/// Whether the client allows prediction.
	#[must_use]
	pub fn prediction_enabled(&self) -> Option<bool> {
		self.widget.prediction_enabled()
	}

	/// Whether the client allows auto-capitalization.
	#[must_use]
	pub fn auto_capitalization_enabled(&self) -> Option<bool> {
		self.widget.auto_capitalization_enabled()
	}

	/// Cursor rectangle in client window coordinates.
	#[must_use]
	pub fn cursor_rectangle(&self) -> Option<Rect> {
		self.widget.cursor_rectangle()
	}

	/// Whether the client hides its text.
	#[must_use]
	pub fn hidden_text(&self) -> Option<bool> {
		self.widget.hidden_text()
	}

	/// Whether the client has a selection.
	#[must_use]
	pub fn has_selection(&self) -> Option<bool> {
		self.widget.has_selection()
	}

	/// Client input method mode.
	#[must_use]
	pub fn input_method_mode(&self) -> Option<i32> {
		self.widget.input_method_mode()
	}

	/// Offset of the last click inside the preedit.
	#[must_use]
	pub fn preedit_click_pos(&self) -> Option<i32> {
		self.widget.preedit_click_pos()
	}

	/// Client window handle.
	#[must_use]
	pub fn win_id(&self) -> Option<u64> {
		self.widget.win_id()
	}

	/// Selection anchor, as last known or predicted.
	#[must_use]
	pub fn anchor_position(&self) -> Option<i32> {
		self.edit.anchor_position()
	}

	/// Surrounding text and cursor position, as last known or predicted.
	///
	/// Only `Some` when both are known.
	#[must_use]
	pub fn surrounding_text(&self) -> Option<(String, i32)> {
		Some((self.edit.surrounding_text()?, self.edit.cursor_position()?))
	}

	/// Preedit the broker believes the client shows.
	#[must_use]
	pub fn preedit(&self) -> &str {
		self.edit.preedit()
	}

	/// Always `None`; clients do not report the preedit rectangle.
	#[must_use]
	pub fn preedit_rectangle(&self) -> Option<Rect> {
		None
	}

	/// Always `None`; clients do not report selected text.
	#[must_use]
	pub fn selection(&self) -> Option<String> {
		None
	}
}
