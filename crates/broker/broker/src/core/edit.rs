//! Plugin output towards the active client.
//!
//! These calls come from plugins, not clients, so they carry no connection.
//! They only update the local mirror; delivering the output is the
//! transport's job.

use imbroker_proto::{EventRequest, KeyEvent};

use super::ConnectionBroker;

impl ConnectionBroker {
	/// Sends a preedit to the active client. Ignored while none is active.
	pub fn send_preedit_string(&mut self, text: &str) {
		if self.active.is_none() {
			tracing::trace!("preedit with no active connection ignored");
			return;
		}
		self.edit.set_preedit(text);
	}

	/// Commits text into the active client.
	///
	/// Clears the mirrored preedit and, when there is no selection and no
	/// replacement, splices `text` into the mirrored surrounding text.
	pub fn send_commit_string(
		&mut self,
		text: &str,
		replace_start: i32,
		replace_length: i32,
		cursor_pos: i32,
	) {
		if !self
			.edit
			.commit(text, replace_start, replace_length, cursor_pos)
		{
			tracing::trace!(replace_start, replace_length, "commit not mirrored");
		}
	}

	/// Sends a key event to the active client.
	///
	/// A backspace press with no preedit and no selection removes one
	/// character before the mirrored cursor.
	pub fn send_key_event(&mut self, event: &KeyEvent, request: EventRequest) {
		self.edit.key_event(event, request);
	}
}
