//! Plugin targets and their registry.
//!
//! A target is an input-method plugin that wants broker notifications. The
//! broker never owns a target: it keeps a [`Weak`] back-reference under a
//! [`TargetId`] handle and the host removes it explicitly with
//! [`ConnectionBroker::remove_target`](crate::ConnectionBroker::remove_target).

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use imbroker_proto::{ConnectionId, EventRequest, KeyEvent, Point, Rect};
use indexmap::IndexMap;

use crate::edit_buffer::EditBuffer;
use crate::settings::GlobalSettings;

/// Handle returned when a target is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TargetId(pub u64);

/// Capability set every input-method plugin exposes to the broker.
///
/// Every method has an empty default body so plugins implement only what they
/// react to. Each call receives a [`TargetContext`] for talking back to the
/// active client.
#[allow(unused_variables)]
pub trait InputMethodTarget {
	/// The client finished rotating to `angle`.
	fn handle_app_orientation_changed(&mut self, cx: &mut TargetContext<'_>, angle: i32) {}

	/// The client is about to rotate to `angle`.
	fn handle_app_orientation_about_to_change(&mut self, cx: &mut TargetContext<'_>, angle: i32) {}

	/// The user clicked inside the preedit.
	fn handle_mouse_click_on_preedit(&mut self, cx: &mut TargetContext<'_>, pos: Point, rect: Rect) {}

	/// The client replaced the preedit.
	fn set_preedit(&mut self, cx: &mut TargetContext<'_>, text: &str, cursor_pos: i32) {}

	/// Drop any composition state.
	///
	/// Must not send a new preedit; the broker discards one sent from here.
	fn reset(&mut self, cx: &mut TargetContext<'_>) {}

	/// The client widget gained or lost focus.
	fn handle_focus_change(&mut self, cx: &mut TargetContext<'_>, focused: bool) {}

	/// The client changed its visualization priority.
	fn handle_visualization_priority_change(&mut self, cx: &mut TargetContext<'_>, priority: bool) {}

	/// The widget state changed; always the last call of an update.
	fn update(&mut self, cx: &mut TargetContext<'_>) {}

	/// The active client changed or went away.
	fn handle_client_change(&mut self, cx: &mut TargetContext<'_>) {}

	/// A key event from the active client.
	fn process_key_event(&mut self, cx: &mut TargetContext<'_>, event: &KeyEvent) {}

	/// Global settings, sent on change and on every activation.
	fn handle_global_settings(&mut self, cx: &mut TargetContext<'_>, settings: &GlobalSettings) {}
}

/// Access a target has to the broker while it is being notified.
///
/// Output sent through the context updates the broker's mirror of the active
/// client's text, the same way the broker's own `send_*` methods do.
pub struct TargetContext<'a> {
	active: ConnectionId,
	edit: &'a mut EditBuffer,
}

impl<'a> TargetContext<'a> {
	pub(crate) fn new(active: ConnectionId, edit: &'a mut EditBuffer) -> Self {
		Self { active, edit }
	}

	/// Connection whose state the target is looking at.
	#[must_use]
	pub fn active_connection(&self) -> ConnectionId {
		self.active
	}

	/// Preedit the broker believes the client shows.
	#[must_use]
	pub fn preedit(&self) -> &str {
		self.edit.preedit()
	}

	/// Surrounding text and cursor as last known or predicted.
	#[must_use]
	pub fn surrounding_text(&self) -> Option<(String, i32)> {
		Some((self.edit.surrounding_text()?, self.edit.cursor_position()?))
	}

	/// Sends a preedit to the active client.
	///
	/// Ignored while no client is active.
	pub fn send_preedit_string(&mut self, text: &str) {
		if self.active.is_none() {
			tracing::trace!("preedit with no active connection ignored");
			return;
		}
		self.edit.set_preedit(text);
	}

	/// Commits text into the active client.
	pub fn send_commit_string(
		&mut self,
		text: &str,
		replace_start: i32,
		replace_length: i32,
		cursor_pos: i32,
	) {
		self.edit
			.commit(text, replace_start, replace_length, cursor_pos);
	}

	/// Sends a key event to the active client.
	pub fn send_key_event(&mut self, event: &KeyEvent, request: EventRequest) {
		self.edit.key_event(event, request);
	}
}

/// Weak handles to registered targets, in registration order.
#[derive(Default)]
pub struct TargetRegistry {
	next_id: u64,
	targets: IndexMap<TargetId, Weak<RefCell<dyn InputMethodTarget>>>,
}

impl std::fmt::Debug for TargetRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TargetRegistry")
			.field("next_id", &self.next_id)
			.field("targets", &self.targets.keys().collect::<Vec<_>>())
			.finish()
	}
}

impl TargetRegistry {
	/// Creates an empty registry.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a weak reference to `target` and returns its handle.
	///
	/// A target that is already registered keeps its existing handle.
	pub fn add<T: InputMethodTarget + 'static>(&mut self, target: &Rc<RefCell<T>>) -> TargetId {
		if let Some(id) = self.find(target) {
			return id;
		}

		let weak = Rc::downgrade(target);
		let weak: Weak<RefCell<dyn InputMethodTarget>> = weak;
		self.next_id += 1;
		let id = TargetId(self.next_id);
		self.targets.insert(id, weak);
		id
	}

	/// Handle under which `target` is registered, if any.
	#[must_use]
	pub fn find<T: InputMethodTarget + 'static>(&self, target: &Rc<RefCell<T>>) -> Option<TargetId> {
		let ptr = Rc::as_ptr(target);
		self.targets
			.iter()
			.find(|(_, weak)| std::ptr::addr_eq(weak.as_ptr(), ptr))
			.map(|(id, _)| *id)
	}

	/// Removes the target registered under `id`.
	pub fn remove(&mut self, id: TargetId) -> bool {
		self.targets.shift_remove(&id).is_some()
	}

	/// Number of registered handles, live or not.
	#[must_use]
	pub fn len(&self) -> usize {
		self.targets.len()
	}

	/// Returns `true` if no handle is registered.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.targets.is_empty()
	}

	/// Returns `true` if `id` is registered.
	#[must_use]
	pub fn contains(&self, id: TargetId) -> bool {
		self.targets.contains_key(&id)
	}

	/// Upgrades one handle.
	#[must_use]
	pub fn get(&self, id: TargetId) -> Option<Rc<RefCell<dyn InputMethodTarget>>> {
		self.targets.get(&id).and_then(Weak::upgrade)
	}

	/// Strong references to every live target, in registration order.
	///
	/// Handles whose target was dropped are skipped but stay registered until
	/// removed.
	#[must_use]
	pub fn live(&self) -> Vec<Rc<RefCell<dyn InputMethodTarget>>> {
		self.targets
			.iter()
			.filter_map(|(id, weak)| {
				let target = weak.upgrade();
				if target.is_none() {
					tracing::trace!(?id, "skipping dropped target");
				}
				target
			})
			.collect()
	}
}
