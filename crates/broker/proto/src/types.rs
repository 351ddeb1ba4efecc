//! Core value types shared by clients, the broker, and plugin targets.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Opaque identifier for one client application connection.
///
/// The value `0` is reserved and means "no active connection".
#[derive(
	Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ConnectionId(pub u32);

impl ConnectionId {
	/// Sentinel for "no connection is active".
	pub const NONE: Self = Self(0);

	/// Returns `true` for the [`ConnectionId::NONE`] sentinel.
	#[must_use]
	pub const fn is_none(self) -> bool {
		self.0 == 0
	}
}

impl fmt::Display for ConnectionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// A point in client window coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
	/// Horizontal coordinate.
	pub x: i32,
	/// Vertical coordinate.
	pub y: i32,
}

impl Point {
	/// Creates a point.
	#[must_use]
	pub const fn new(x: i32, y: i32) -> Self {
		Self { x, y }
	}
}

/// An axis-aligned rectangle in client window coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
	/// Left edge.
	pub x: i32,
	/// Top edge.
	pub y: i32,
	/// Width in pixels.
	pub width: i32,
	/// Height in pixels.
	pub height: i32,
}

impl Rect {
	/// Creates a rectangle.
	#[must_use]
	pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
		Self {
			x,
			y,
			width,
			height,
		}
	}
}

/// Platform key code carried by a [`KeyEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(pub u32);

impl Key {
	/// Escape key.
	pub const ESCAPE: Self = Self(0x0100_0000);
	/// Tab key.
	pub const TAB: Self = Self(0x0100_0001);
	/// Backspace key.
	pub const BACKSPACE: Self = Self(0x0100_0003);
	/// Return key.
	pub const RETURN: Self = Self(0x0100_0004);
	/// Delete key.
	pub const DELETE: Self = Self(0x0100_0007);
}

bitflags! {
	/// Keyboard modifiers held while a key event was generated.
	#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
	#[serde(transparent)]
	pub struct Modifiers: u32 {
		/// Shift.
		const SHIFT = 0x0200_0000;
		/// Control.
		const CONTROL = 0x0400_0000;
		/// Alt.
		const ALT = 0x0800_0000;
		/// Meta / super.
		const META = 0x1000_0000;
	}
}

/// Whether a key event is a press or a release.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyEventKind {
	/// Key went down.
	#[default]
	Press,
	/// Key went up.
	Release,
}

/// A keyboard event as delivered by a client or produced by a plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyEvent {
	/// Press or release.
	pub kind: KeyEventKind,
	/// Key code.
	pub key: Key,
	/// Held modifiers.
	#[serde(default)]
	pub modifiers: Modifiers,
	/// Text produced by the key, possibly empty.
	#[serde(default)]
	pub text: String,
	/// Set for auto-repeated events.
	#[serde(default)]
	pub auto_repeat: bool,
	/// Number of keys covered by this event.
	#[serde(default = "default_count")]
	pub count: u16,
	/// Hardware scan code.
	#[serde(default)]
	pub native_scan_code: u32,
	/// Platform modifier mask.
	#[serde(default)]
	pub native_modifiers: u32,
	/// Event timestamp in milliseconds.
	#[serde(default)]
	pub time: u64,
}

fn default_count() -> u16 {
	1
}

impl KeyEvent {
	/// Builds a plain event for `key` with no modifiers and no text.
	#[must_use]
	pub fn new(kind: KeyEventKind, key: Key) -> Self {
		Self {
			kind,
			key,
			modifiers: Modifiers::empty(),
			text: String::new(),
			auto_repeat: false,
			count: 1,
			native_scan_code: 0,
			native_modifiers: 0,
			time: 0,
		}
	}

	/// Builds a press of `key`.
	#[must_use]
	pub fn press(key: Key) -> Self {
		Self::new(KeyEventKind::Press, key)
	}

	/// Builds a release of `key`.
	#[must_use]
	pub fn release(key: Key) -> Self {
		Self::new(KeyEventKind::Release, key)
	}

	/// Returns `true` for a backspace press.
	#[must_use]
	pub fn is_backspace_press(&self) -> bool {
		self.kind == KeyEventKind::Press && self.key == Key::BACKSPACE
	}
}

/// How a plugin wants a key event delivered to the application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventRequest {
	/// Deliver both the key event and the key signal.
	#[default]
	Both,
	/// Only emit the key signal; the application never sees an event.
	SignalOnly,
	/// Only deliver the key event.
	EventOnly,
}

/// Global identity of an attribute extension (toolbar).
///
/// Clients register extensions under a connection-local integer id. The broker
/// scopes that id to the owning connection by pairing it with the connection's
/// decimal string form, so two clients may reuse the same local id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeExtensionId {
	id: i32,
	service: String,
}

impl AttributeExtensionId {
	const INVALID_ID: i32 = -1;
	const STANDARD_ID: i32 = -2;

	/// Scopes `local_id` to `owner`.
	#[must_use]
	pub fn new(local_id: i32, owner: ConnectionId) -> Self {
		Self {
			id: local_id,
			service: owner.to_string(),
		}
	}

	/// The well-known extension used when a client names no toolbar.
	#[must_use]
	pub fn standard() -> Self {
		Self {
			id: Self::STANDARD_ID,
			service: String::new(),
		}
	}

	/// Connection-local part of the id.
	#[must_use]
	pub fn local_id(&self) -> i32 {
		self.id
	}

	/// String identity of the owning connection.
	#[must_use]
	pub fn service(&self) -> &str {
		&self.service
	}

	/// Returns `true` if this id was scoped to `owner`.
	#[must_use]
	pub fn is_owned_by(&self, owner: ConnectionId) -> bool {
		self.service == owner.to_string()
	}

	/// An id is usable when its local part is non-negative, or when it is the
	/// standard extension.
	#[must_use]
	pub fn is_valid(&self) -> bool {
		self.id >= 0 || *self == Self::standard()
	}
}

impl Default for AttributeExtensionId {
	/// The invalid sentinel.
	fn default() -> Self {
		Self {
			id: Self::INVALID_ID,
			service: String::new(),
		}
	}
}

impl fmt::Display for AttributeExtensionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.service, self.id)
	}
}
