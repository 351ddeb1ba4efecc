//! Connection-tagged inbound calls.
//!
//! A transport turns every call it receives from a client into a [`Request`]
//! and hands it to the broker in arrival order.

use serde::{Deserialize, Serialize};

use crate::types::{ConnectionId, KeyEvent, Point, Rect};
use crate::widget::WidgetState;

/// One inbound call from a client connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
	/// Connection that issued the call.
	pub connection: ConnectionId,
	/// The call itself.
	#[serde(flatten)]
	pub payload: RequestPayload,
}

impl Request {
	/// Tags `payload` with `connection`.
	#[must_use]
	pub fn new(connection: ConnectionId, payload: RequestPayload) -> Self {
		Self {
			connection,
			payload,
		}
	}
}

/// Inbound call variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RequestPayload {
	/// The connection's widget gained focus and wants to become active.
	ActivateContext,
	/// The transport lost the connection.
	Disconnect,
	/// Show the input method.
	ShowInputMethod,
	/// Hide the input method.
	HideInputMethod,
	/// The user clicked inside the preedit.
	MouseClickedOnPreedit {
		/// Click position.
		pos: Point,
		/// Preedit rectangle.
		rect: Rect,
	},
	/// The client replaced the preedit.
	SetPreedit {
		/// New preedit text.
		text: String,
		/// Cursor within the preedit.
		cursor_pos: i32,
	},
	/// Reset the input method state.
	Reset,
	/// A new widget-state snapshot.
	UpdateWidgetInformation {
		/// Full snapshot.
		state: WidgetState,
		/// Whether focus moved with this update.
		focus_changed: bool,
	},
	/// The client is about to rotate.
	AppOrientationAboutToChange {
		/// Target angle in degrees.
		angle: i32,
	},
	/// The client finished rotating.
	AppOrientationChanged {
		/// New angle in degrees.
		angle: i32,
	},
	/// Clipboard availability changed.
	SetCopyPasteState {
		/// Copy is possible.
		copy_available: bool,
		/// Paste is possible.
		paste_available: bool,
	},
	/// A key event to route through the plugins.
	ProcessKeyEvent {
		/// The event.
		event: KeyEvent,
	},
	/// Register an attribute extension under a connection-local id.
	RegisterAttributeExtension {
		/// Connection-local id.
		id: i32,
		/// Resource reference, e.g. a toolbar file name.
		resource: String,
	},
	/// Unregister an attribute extension.
	UnregisterAttributeExtension {
		/// Connection-local id.
		id: i32,
	},
	/// Change one attribute of a registered extension.
	SetExtendedAttribute {
		/// Connection-local id.
		id: i32,
		/// Target path inside the extension.
		target: String,
		/// Target item name.
		target_name: String,
		/// Attribute name.
		attribute: String,
		/// New value.
		value: serde_json::Value,
	},
}

impl RequestPayload {
	/// Short name used in diagnostics.
	#[must_use]
	pub const fn name(&self) -> &'static str {
		match self {
			Self::ActivateContext => "activateContext",
			Self::Disconnect => "disconnect",
			Self::ShowInputMethod => "showInputMethod",
			Self::HideInputMethod => "hideInputMethod",
			Self::MouseClickedOnPreedit { .. } => "mouseClickedOnPreedit",
			Self::SetPreedit { .. } => "setPreedit",
			Self::Reset => "reset",
			Self::UpdateWidgetInformation { .. } => "updateWidgetInformation",
			Self::AppOrientationAboutToChange { .. } => "appOrientationAboutToChange",
			Self::AppOrientationChanged { .. } => "appOrientationChanged",
			Self::SetCopyPasteState { .. } => "setCopyPasteState",
			Self::ProcessKeyEvent { .. } => "processKeyEvent",
			Self::RegisterAttributeExtension { .. } => "registerAttributeExtension",
			Self::UnregisterAttributeExtension { .. } => "unregisterAttributeExtension",
			Self::SetExtendedAttribute { .. } => "setExtendedAttribute",
		}
	}
}
