//! Last-received widget-state snapshot.

use imbroker_proto::{AttributeExtensionId, ConnectionId, Rect, WidgetState};

/// Holds the active client's most recent [`WidgetState`].
///
/// Lookups return [`None`] for attributes the snapshot does not carry.
#[derive(Debug, Default)]
pub struct WidgetStateStore {
	state: WidgetState,
}

impl WidgetStateStore {
	/// Creates a store holding an empty snapshot.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// The current snapshot.
	#[must_use]
	pub fn state(&self) -> &WidgetState {
		&self.state
	}

	/// Replaces the snapshot wholesale and returns the previous one.
	pub fn replace(&mut self, state: WidgetState) -> WidgetState {
		std::mem::replace(&mut self.state, state)
	}

	/// Visualization priority, with absence read as `false`.
	#[must_use]
	pub fn visualization_priority(&self) -> bool {
		self.state.visualization_priority.unwrap_or(false)
	}

	/// Focus state, with absence read as `false`.
	#[must_use]
	pub fn focus_state(&self) -> bool {
		self.state.focus_state.unwrap_or(false)
	}

	/// Global extension id named by the snapshot for `owner`.
	///
	/// Falls back to [`AttributeExtensionId::standard`] when the snapshot
	/// names no valid toolbar.
	#[must_use]
	pub fn resolve_extension_id(&self, owner: ConnectionId) -> AttributeExtensionId {
		self.state
			.toolbar_id
			.map(|local_id| AttributeExtensionId::new(local_id, owner))
			.filter(AttributeExtensionId::is_valid)
			.unwrap_or_else(AttributeExtensionId::standard)
	}

	/// Toolbar resource reference, if present and non-empty.
	#[must_use]
	pub fn toolbar_resource(&self) -> Option<&str> {
		self.state.toolbar.as_deref().filter(|r| !r.is_empty())
	}

	/// Client content type.
	#[must_use]
	pub fn content_type(&self) -> Option<i32> {
		self.state.content_type
	}

	/// Whether correction is enabled.
	#[must_use]
	pub fn correction_enabled(&self) -> Option<bool> {
		self.state.correction_enabled
	}

	/// Whether prediction is enabled.
	#[must_use]
	pub fn prediction_enabled(&self) -> Option<bool> {
		self.state.prediction_enabled
	}

	/// Whether auto-capitalization is enabled.
	#[must_use]
	pub fn auto_capitalization_enabled(&self) -> Option<bool> {
		self.state.auto_capitalization_enabled
	}

	/// Cursor rectangle.
	#[must_use]
	pub fn cursor_rectangle(&self) -> Option<Rect> {
		self.state.cursor_rectangle
	}

	/// Whether the widget hides its text.
	#[must_use]
	pub fn hidden_text(&self) -> Option<bool> {
		self.state.hidden_text
	}

	/// Whether the widget has a selection.
	#[must_use]
	pub fn has_selection(&self) -> Option<bool> {
		self.state.has_selection
	}

	/// Client input method mode.
	#[must_use]
	pub fn input_method_mode(&self) -> Option<i32> {
		self.state.input_method_mode
	}

	/// Offset of the last click in the preedit.
	#[must_use]
	pub fn preedit_click_pos(&self) -> Option<i32> {
		self.state.preedit_click_pos
	}

	/// Client window handle.
	#[must_use]
	pub fn win_id(&self) -> Option<u64> {
		self.state.win_id
	}
}
