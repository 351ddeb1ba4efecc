//! Widget-state snapshot schema.
//!
//! A client reports its focused editor widget as a full snapshot. Every
//! attribute is optional and "absent" is a distinct state from any default
//! value, so each field is an [`Option`].

use serde::{Deserialize, Serialize};

use crate::types::Rect;

/// The fixed set of attribute names a snapshot may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetAttribute {
	/// `focusState`
	FocusState,
	/// `contentType`
	ContentType,
	/// `correctionEnabled`
	CorrectionEnabled,
	/// `predictionEnabled`
	PredictionEnabled,
	/// `autocapitalizationEnabled`
	AutoCapitalizationEnabled,
	/// `surroundingText`
	SurroundingText,
	/// `anchorPosition`
	AnchorPosition,
	/// `cursorPosition`
	CursorPosition,
	/// `hasSelection`
	HasSelection,
	/// `inputMethodMode`
	InputMethodMode,
	/// `visualizationPriority`
	VisualizationPriority,
	/// `toolbarId`
	ToolbarId,
	/// `toolbar`
	Toolbar,
	/// `winId`
	WinId,
	/// `cursorRectangle`
	CursorRectangle,
	/// `hiddenText`
	HiddenText,
	/// `preeditClickPos`
	PreeditClickPos,
}

impl WidgetAttribute {
	/// Every attribute, in wire order.
	pub const ALL: [Self; 17] = [
		Self::FocusState,
		Self::ContentType,
		Self::CorrectionEnabled,
		Self::PredictionEnabled,
		Self::AutoCapitalizationEnabled,
		Self::SurroundingText,
		Self::AnchorPosition,
		Self::CursorPosition,
		Self::HasSelection,
		Self::InputMethodMode,
		Self::VisualizationPriority,
		Self::ToolbarId,
		Self::Toolbar,
		Self::WinId,
		Self::CursorRectangle,
		Self::HiddenText,
		Self::PreeditClickPos,
	];

	/// Wire name of the attribute.
	#[must_use]
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::FocusState => "focusState",
			Self::ContentType => "contentType",
			Self::CorrectionEnabled => "correctionEnabled",
			Self::PredictionEnabled => "predictionEnabled",
			Self::AutoCapitalizationEnabled => "autocapitalizationEnabled",
			Self::SurroundingText => "surroundingText",
			Self::AnchorPosition => "anchorPosition",
			Self::CursorPosition => "cursorPosition",
			Self::HasSelection => "hasSelection",
			Self::InputMethodMode => "inputMethodMode",
			Self::VisualizationPriority => "visualizationPriority",
			Self::ToolbarId => "toolbarId",
			Self::Toolbar => "toolbar",
			Self::WinId => "winId",
			Self::CursorRectangle => "cursorRectangle",
			Self::HiddenText => "hiddenText",
			Self::PreeditClickPos => "preeditClickPos",
		}
	}
}

/// Snapshot of the client's focused widget.
///
/// Replaced wholesale on every update; fields never merge across snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetState {
	/// Whether the widget has input focus.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub focus_state: Option<bool>,
	/// Client-defined content type code.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub content_type: Option<i32>,
	/// Whether error correction is allowed.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub correction_enabled: Option<bool>,
	/// Whether word prediction is allowed.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub prediction_enabled: Option<bool>,
	/// Whether automatic capitalization is allowed.
	#[serde(
		default,
		rename = "autocapitalizationEnabled",
		skip_serializing_if = "Option::is_none"
	)]
	pub auto_capitalization_enabled: Option<bool>,
	/// Text around the cursor.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub surrounding_text: Option<String>,
	/// Selection anchor within the surrounding text.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub anchor_position: Option<i32>,
	/// Cursor within the surrounding text.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub cursor_position: Option<i32>,
	/// Whether the widget has a non-empty selection.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub has_selection: Option<bool>,
	/// Client-defined input method mode code.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub input_method_mode: Option<i32>,
	/// Whether the client asks for the input method to be drawn on top.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub visualization_priority: Option<bool>,
	/// Connection-local attribute extension id.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub toolbar_id: Option<i32>,
	/// Resource reference of the attribute extension.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub toolbar: Option<String>,
	/// Platform window handle of the client.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub win_id: Option<u64>,
	/// Cursor rectangle in window coordinates.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub cursor_rectangle: Option<Rect>,
	/// Whether the widget hides its text (password entry).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub hidden_text: Option<bool>,
	/// Character offset of the last click inside the preedit.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub preedit_click_pos: Option<i32>,
}

impl WidgetState {
	/// Returns `true` if the snapshot carries `attribute`.
	#[must_use]
	pub fn contains(&self, attribute: WidgetAttribute) -> bool {
		match attribute {
			WidgetAttribute::FocusState => self.focus_state.is_some(),
			WidgetAttribute::ContentType => self.content_type.is_some(),
			WidgetAttribute::CorrectionEnabled => self.correction_enabled.is_some(),
			WidgetAttribute::PredictionEnabled => self.prediction_enabled.is_some(),
			WidgetAttribute::AutoCapitalizationEnabled => {
				self.auto_capitalization_enabled.is_some()
			}
			WidgetAttribute::SurroundingText => self.surrounding_text.is_some(),
			WidgetAttribute::AnchorPosition => self.anchor_position.is_some(),
			WidgetAttribute::CursorPosition => self.cursor_position.is_some(),
			WidgetAttribute::HasSelection => self.has_selection.is_some(),
			WidgetAttribute::InputMethodMode => self.input_method_mode.is_some(),
			WidgetAttribute::VisualizationPriority => self.visualization_priority.is_some(),
			WidgetAttribute::ToolbarId => self.toolbar_id.is_some(),
			WidgetAttribute::Toolbar => self.toolbar.is_some(),
			WidgetAttribute::WinId => self.win_id.is_some(),
			WidgetAttribute::CursorRectangle => self.cursor_rectangle.is_some(),
			WidgetAttribute::HiddenText => self.hidden_text.is_some(),
			WidgetAttribute::PreeditClickPos => self.preedit_click_pos.is_some(),
		}
	}

	/// Iterates the attributes present in this snapshot.
	pub fn present(&self) -> impl Iterator<Item = WidgetAttribute> + '_ {
		WidgetAttribute::ALL
			.into_iter()
			.filter(|attribute| self.contains(*attribute))
	}
}
