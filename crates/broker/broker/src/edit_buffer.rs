//! Local mirror of the active client's text state.
//!
//! Between two widget-state updates the broker predicts the effect of simple
//! commits and backspaces so that plugins reading surrounding text see a
//! plausible value. The mirror is advisory: the next snapshot from the client
//! overwrites it, and edits are only simulated when there is no selection and
//! no replacement.
//!
//! Positions count Unicode scalar values.

use imbroker_proto::{EventRequest, KeyEvent, WidgetState};
use ropey::Rope;

/// Preedit, surrounding text, cursor and anchor as last known or predicted.
#[derive(Debug, Default, Clone)]
pub struct EditBuffer {
	preedit: String,
	surrounding: Option<Rope>,
	cursor: Option<i32>,
	anchor: Option<i32>,
}

impl EditBuffer {
	/// Creates an empty mirror.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Takes surrounding text, cursor and anchor from a fresh snapshot.
	///
	/// The preedit is left alone; it tracks plugin output, not client state.
	pub fn resync(&mut self, state: &WidgetState) {
		self.surrounding = state.surrounding_text.as_deref().map(Rope::from_str);
		self.cursor = state.cursor_position;
		self.anchor = state.anchor_position;
	}

	/// Current preedit text.
	#[must_use]
	pub fn preedit(&self) -> &str {
		&self.preedit
	}

	/// Replaces the preedit.
	pub fn set_preedit(&mut self, text: &str) {
		text.clone_into(&mut self.preedit);
	}

	/// Empties the preedit.
	pub fn clear_preedit(&mut self) {
		self.preedit.clear();
	}

	/// Surrounding text, if known.
	#[must_use]
	pub fn surrounding_text(&self) -> Option<String> {
		self.surrounding.as_ref().map(Rope::to_string)
	}

	/// Cursor position, if known.
	#[must_use]
	pub fn cursor_position(&self) -> Option<i32> {
		self.cursor
	}

	/// Anchor position, if known.
	#[must_use]
	pub fn anchor_position(&self) -> Option<i32> {
		self.anchor
	}

	/// Cursor position when the anchor is known and sits on the cursor.
	///
	/// An unknown cursor reads as 0.
	fn collapsed_cursor(&self) -> Option<i32> {
		let cursor = self.cursor.unwrap_or(0);
		(self.anchor? == cursor).then_some(cursor)
	}

	/// Simulates committing `text` into the client.
	///
	/// Always clears the preedit. The text is only spliced into the mirror when
	/// no replacement is requested, there is no selection, and the insert
	/// position is not negative. Returns `true` if the mirror changed.
	pub fn commit(
		&mut self,
		text: &str,
		replace_start: i32,
		replace_length: i32,
		cursor_pos: i32,
	) -> bool {
		self.preedit.clear();

		if replace_length != 0 {
			return false;
		}
		let Some(cursor) = self.collapsed_cursor() else {
			return false;
		};
		let Some(insert_at) = cursor
			.checked_add(replace_start)
			.and_then(|pos| usize::try_from(pos).ok())
		else {
			return false;
		};

		let new_cursor = if cursor_pos >= 0 {
			cursor_pos
		} else {
			let Some(end) = insert_at
				.checked_add(text.chars().count())
				.and_then(|end| i32::try_from(end).ok())
			else {
				return false;
			};
			end
		};

		let rope = self.surrounding.get_or_insert_with(Rope::new);
		let len = rope.len_chars();
		if insert_at > len {
			rope.insert(len, &" ".repeat(insert_at - len));
		}
		rope.insert(insert_at, text);

		self.cursor = Some(new_cursor);
		self.anchor = Some(new_cursor);
		true
	}

	/// Simulates a key event sent to the client.
	///
	/// Only a backspace press delivered as an event, with no pending preedit,
	/// no selection and the cursor past the start, edits the mirror: the
	/// character before the cursor is removed and cursor and anchor move back
	/// together. Returns `true` if the mirror changed.
	pub fn key_event(&mut self, event: &KeyEvent, request: EventRequest) -> bool {
		if request == EventRequest::SignalOnly
			|| !self.preedit.is_empty()
			|| !event.is_backspace_press()
		{
			return false;
		}
		let Some(rope) = self.surrounding.as_ref() else {
			return false;
		};
		if rope.len_chars() == 0 {
			return false;
		}
		let Some(cursor) = self.collapsed_cursor().filter(|&c| c > 0) else {
			return false;
		};

		let remove_at = (cursor - 1) as usize;
		if let Some(rope) = self.surrounding.as_mut()
			&& remove_at < rope.len_chars()
		{
			rope.remove(remove_at..=remove_at);
		}
		self.cursor = Some(cursor - 1);
		self.anchor = Some(cursor - 1);
		true
	}
}
