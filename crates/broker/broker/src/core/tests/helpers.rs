//! Common test utilities and helpers.

use std::cell::RefCell;
use std::rc::Rc;

use imbroker_proto::{AttributeExtensionId, ConnectionId, KeyEvent, Point, Rect};

use crate::core::ConnectionBroker;
use crate::extensions::InMemoryExtensionManager;
use crate::listener::BrokerListener;
use crate::settings::GlobalSettings;
use crate::target::{InputMethodTarget, TargetContext, TargetId};

/// Shared, ordered record of every notification.
pub type Log = Rc<RefCell<Vec<String>>>;

/// A target that records every call into the shared log.
pub struct RecordingTarget {
	pub name: &'static str,
	pub log: Log,
	/// Preedit to send back from `reset`, to exercise misuse handling.
	pub preedit_on_reset: Option<String>,
	/// Text to commit back when a key event arrives.
	pub commit_on_key: Option<String>,
}

impl RecordingTarget {
	pub fn new(name: &'static str, log: &Log) -> Rc<RefCell<Self>> {
		Rc::new(RefCell::new(Self {
			name,
			log: log.clone(),
			preedit_on_reset: None,
			commit_on_key: None,
		}))
	}

	fn record(&self, entry: impl AsRef<str>) {
		self.log
			.borrow_mut()
			.push(format!("{}.{}", self.name, entry.as_ref()));
	}
}

impl InputMethodTarget for RecordingTarget {
	fn handle_app_orientation_changed(&mut self, _cx: &mut TargetContext<'_>, angle: i32) {
		self.record(format!("orientation_changed({angle})"));
	}

	fn handle_app_orientation_about_to_change(&mut self, _cx: &mut TargetContext<'_>, angle: i32) {
		self.record(format!("orientation_about_to_change({angle})"));
	}

	fn handle_mouse_click_on_preedit(&mut self, _cx: &mut TargetContext<'_>, pos: Point, rect: Rect) {
		self.record(format!(
			"mouse_click({},{} in {}x{})",
			pos.x, pos.y, rect.width, rect.height
		));
	}

	fn set_preedit(&mut self, _cx: &mut TargetContext<'_>, text: &str, cursor_pos: i32) {
		self.record(format!("set_preedit({text},{cursor_pos})"));
	}

	fn reset(&mut self, cx: &mut TargetContext<'_>) {
		self.record("reset");
		if let Some(preedit) = &self.preedit_on_reset {
			cx.send_preedit_string(preedit);
		}
	}

	fn handle_focus_change(&mut self, _cx: &mut TargetContext<'_>, focused: bool) {
		self.record(format!("focus({focused})"));
	}

	fn handle_visualization_priority_change(&mut self, _cx: &mut TargetContext<'_>, priority: bool) {
		self.record(format!("visualization({priority})"));
	}

	fn update(&mut self, _cx: &mut TargetContext<'_>) {
		self.record("update");
	}

	fn handle_client_change(&mut self, cx: &mut TargetContext<'_>) {
		self.record(format!("client_change({})", cx.active_connection()));
	}

	fn process_key_event(&mut self, cx: &mut TargetContext<'_>, event: &KeyEvent) {
		self.record(format!("key({})", event.key.0));
		if let Some(text) = &self.commit_on_key {
			cx.send_commit_string(text, 0, 0, -1);
		}
	}

	fn handle_global_settings(&mut self, _cx: &mut TargetContext<'_>, settings: &GlobalSettings) {
		self.record(format!(
			"settings({},{},{})",
			settings.detectable_auto_repeat,
			settings.global_correction_enabled,
			settings.redirect_keys
		));
	}
}

/// A listener that records every call into the shared log.
pub struct RecordingListener {
	pub log: Log,
}

impl RecordingListener {
	fn record(&self, entry: impl AsRef<str>) {
		self.log
			.borrow_mut()
			.push(format!("listener.{}", entry.as_ref()));
	}
}

impl BrokerListener for RecordingListener {
	fn activation_lost(&self, previous: ConnectionId) {
		self.record(format!("activation_lost({previous})"));
	}

	fn show_input_method_request(&self) {
		self.record("show");
	}

	fn hide_input_method_request(&self) {
		self.record("hide");
	}

	fn app_orientation_about_to_change(&self, angle: i32) {
		self.record(format!("orientation_about_to_change({angle})"));
	}

	fn app_orientation_changed(&self, angle: i32) {
		self.record(format!("orientation_changed({angle})"));
	}

	fn toolbar_id_changed(&self, id: &AttributeExtensionId) {
		self.record(format!("toolbar({id})"));
	}

	fn key_override_created(&self) {
		self.record("key_override");
	}

	fn set_transient_hint(&self, win_id: u64) {
		self.record(format!("transient_hint({win_id})"));
	}
}

/// A broker wired to one recording target, one recording listener, and an
/// in-memory extension manager.
pub struct Harness {
	pub broker: ConnectionBroker,
	pub manager: Rc<InMemoryExtensionManager>,
	pub log: Log,
	pub target: Rc<RefCell<RecordingTarget>>,
	pub target_id: TargetId,
}

impl Harness {
	/// Fresh broker with nothing active and an empty log.
	pub fn new() -> Self {
		let manager = Rc::new(InMemoryExtensionManager::new());
		let mut broker = ConnectionBroker::new(manager.clone());
		let log = Log::default();

		broker.add_listener(Rc::new(RecordingListener { log: log.clone() }));
		let target = RecordingTarget::new("t", &log);
		let target_id = broker.add_target(&target);

		let harness = Self {
			broker,
			manager,
			log,
			target,
			target_id,
		};
		harness.take_log();
		harness
	}

	/// Fresh broker with `connection` active and an empty log.
	pub fn active(connection: u32) -> Self {
		let mut harness = Self::new();
		harness.broker.activate_context(ConnectionId(connection));
		harness.take_log();
		harness
	}

	/// Drains the log.
	pub fn take_log(&self) -> Vec<String> {
		std::mem::take(&mut *self.log.borrow_mut())
	}

	/// Drains the log, keeping only entries from target `name`.
	pub fn take_target_log(&self, name: &str) -> Vec<String> {
		let prefix = format!("{name}.");
		self.take_log()
			.into_iter()
			.filter(|entry| entry.starts_with(&prefix))
			.collect()
	}
}
