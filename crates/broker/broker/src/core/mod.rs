//! Connection arbitration and widget-state replication.
//!
//! # Purpose
//!
//! - Define the broker that sits between connected client applications and the registered input-method plugin targets.
//! - Guarantee that only one client's editing and focus state is visible to plugins at any time.
//! - Replicate the active client's widget state as wholesale snapshots and derive differential notifications from consecutive snapshots.
//! - Scope attribute extensions (toolbars) to the lifetime of the connection that registered them.
//! - Exclude the transport that delivers connection-tagged calls; a transport turns calls into [`Request`](imbroker_proto::Request) values and feeds [`ConnectionBroker::dispatch`].
//!
//! # Mental model
//!
//! - Clients connect and disconnect freely; each is named by a [`ConnectionId`]. `0` means "nobody".
//! - Exactly one connection is active. Focus moving to a client's widget makes the transport call `activate_context` for it.
//! - Every other inbound call is an admission-filtered event: calls from any connection other than the active one are dropped silently. This is policy, not an error.
//! - Plugins are [`InputMethodTarget`]s held by weak handle. Host-side observers that are not plugins are [`BrokerListener`]s.
//! - The broker keeps an advisory [`EditBuffer`] so that plugin commits and backspaces are reflected in surrounding text before the client sends its next snapshot.
//!
//! # Key types
//!
//! | Type | Meaning | Constraints | Constructed / mutated in |
//! |---|---|---|---|
//! | [`ConnectionBroker`] | Arbitration state machine and notification fan-out | MUST be the only owner of the active connection, snapshot, mirror and extension registry | `ConnectionBroker::*` |
//! | [`WidgetStateStore`] | Last snapshot from the active client | MUST be replaced wholesale, never merged | `ConnectionBroker::update_widget_information` |
//! | [`EditBuffer`] | Local mirror of preedit, surrounding text, cursor, anchor | MUST only be edited with a collapsed selection and no replacement | `ConnectionBroker::send_commit_string`, `ConnectionBroker::send_key_event`, [`TargetContext`] |
//! | [`AttributeExtensionRegistry`] | Extensions registered through the broker | MUST drop every id of a connection on its disconnection | `ConnectionBroker::register_attribute_extension`, `ConnectionBroker::handle_disconnection` |
//! | [`TargetRegistry`] | Weak handles to plugin targets | MUST NOT keep targets alive; removal is explicit | `ConnectionBroker::add_target`, `ConnectionBroker::remove_target` |
//! | [`GlobalSettings`] | Server-wide settings pushed to targets | MUST be re-sent on every activation of a real connection | `ConnectionBroker::activate_context`, setters |
//!
//! # Invariants
//!
//! 1. At most one connection is active, and only `activate_context` and `handle_disconnection` change it.
//!    - Enforced in: `ConnectionBroker::activate_context`, `ConnectionBroker::handle_disconnection`
//!    - Tested by: `core::tests::arbitration::disconnect_of_active_clears_it`
//!    - Failure symptom: two clients' state interleaves in the plugins.
//!
//! 2. Events tagged with a non-active connection MUST NOT notify anyone or mutate state.
//!    - Enforced in: `ConnectionBroker::admits`
//!    - Tested by: `core::tests::arbitration::inactive_connection_is_silent`
//!    - Failure symptom: a background client's stale focus or key events reach the plugins.
//!
//! 3. Activating a real connection MUST force a settings notification even if no setting changed.
//!    - Enforced in: `ConnectionBroker::activate_context`
//!    - Tested by: `core::tests::arbitration::activation_forces_settings_refresh`
//!    - Failure symptom: a newly focused client keeps stale auto-repeat or redirection behaviour.
//!
//! 4. Widget-state snapshots MUST replace the previous snapshot wholesale; old values are read before the replacement.
//!    - Enforced in: `ConnectionBroker::update_widget_information`
//!    - Tested by: `core::tests::widget_info::update_replaces_rather_than_merges`
//!    - Failure symptom: attributes of a previously focused widget leak into the next one.
//!
//! 5. Visualization and toolbar notifications fire iff the respective value differs between consecutive snapshots; the generic update fires last, always.
//!    - Enforced in: `ConnectionBroker::update_widget_information`
//!    - Tested by: `core::tests::widget_info::visualization_change_fires_only_on_difference`, `core::tests::widget_info::toolbar_change_fires_only_on_difference`
//!    - Failure symptom: plugins redraw on every keystroke, or miss a toolbar switch.
//!
//! 6. Disconnection MUST drop every extension owned by the connection, active or not.
//!    - Enforced in: `ConnectionBroker::handle_disconnection`
//!    - Tested by: `core::tests::extensions::disconnect_drops_only_owned_extensions`
//!    - Failure symptom: toolbars of dead clients stay loaded forever.
//!
//! 7. A preedit sent by a target during `reset` MUST be discarded.
//!    - Enforced in: `ConnectionBroker::reset`
//!    - Tested by: `core::tests::arbitration::preedit_sent_during_reset_is_discarded`
//!    - Failure symptom: the mirror reports a preedit the client never shows, blocking backspace simulation.
//!
//! # Data flow
//!
//! 1. Transport: decodes a client call into a [`Request`](imbroker_proto::Request) and calls [`ConnectionBroker::dispatch`].
//! 2. Admission: `activate_context`, `handle_disconnection` and extension calls pass; every other call is dropped unless its connection is active.
//! 3. Mutation: snapshot replacement, mirror resync or edit, registry change.
//! 4. Fan-out: listeners first where both are notified, then targets in registration order. Each target call gets a [`TargetContext`] through which the plugin may send preedit, commit, or key output back to the client.
//!
//! # Concurrency and ordering
//!
//! - Single-threaded, run-to-completion. Every mutating method takes `&mut self`, so the host's event loop is the single ordering point.
//! - Targets and listeners are `Rc`-based and the broker is not `Send`. A multi-threaded host MUST confine the broker to one thread or wrap it in one mutex.
//! - A target cannot re-enter the broker during fan-out; its only way back is the [`TargetContext`].

mod arbitration;
mod dispatch;
mod edit;
mod extensions;
mod inbound;
mod widget;


use std::cell::RefCell;
use std::rc::Rc;

use imbroker_proto::{AttributeExtensionId, ConnectionId, WidgetState};

use crate::config::BrokerConfig;
use crate::edit_buffer::EditBuffer;
use crate::extensions::{AttributeExtensionManager, AttributeExtensionRegistry};
use crate::listener::BrokerListener;
use crate::settings::GlobalSettings;
use crate::target::{InputMethodTarget, TargetContext, TargetId, TargetRegistry};
use crate::widget_state::WidgetStateStore;

/// Arbitrates client connections and replicates the active client's state to
/// plugin targets.
pub struct ConnectionBroker {
	/// Connection whose events are admitted; [`ConnectionId::NONE`] if none.
	active: ConnectionId,
	/// Last snapshot from the active client.
	widget: WidgetStateStore,
	/// Mirror of preedit and surrounding text.
	edit: EditBuffer,
	/// Extensions registered through this broker.
	extensions: AttributeExtensionRegistry,
	/// Extension id resolved from the current snapshot.
	current_extension_id: AttributeExtensionId,
	/// Plugin targets.
	targets: TargetRegistry,
	/// Host observers, notified in insertion order.
	listeners: Vec<Rc<dyn BrokerListener>>,
	/// Server-wide settings.
	settings: GlobalSettings,
	/// Angle of the last completed rotation.
	last_orientation: i32,
}

impl std::fmt::Debug for ConnectionBroker {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ConnectionBroker")
			.field("active", &self.active)
			.field("widget", &self.widget)
			.field("edit", &self.edit)
			.field("extensions", &self.extensions)
			.field("current_extension_id", &self.current_extension_id)
			.field("targets", &self.targets)
			.field("listeners", &self.listeners.len())
			.field("settings", &self.settings)
			.field("last_orientation", &self.last_orientation)
			.finish()
	}
}

impl ConnectionBroker {
	/// Creates a broker with default configuration.
	#[must_use]
	pub fn new(manager: Rc<dyn AttributeExtensionManager>) -> Self {
		Self::new_with_config(manager, &BrokerConfig::default())
	}

	/// Creates a broker with the given configuration.
	#[must_use]
	pub fn new_with_config(
		manager: Rc<dyn AttributeExtensionManager>,
		config: &BrokerConfig,
	) -> Self {
		Self {
			active: ConnectionId::NONE,
			widget: WidgetStateStore::new(),
			edit: EditBuffer::new(),
			extensions: AttributeExtensionRegistry::new(manager),
			current_extension_id: AttributeExtensionId::default(),
			targets: TargetRegistry::new(),
			listeners: Vec::new(),
			settings: config.settings,
			last_orientation: config.initial_orientation,
		}
	}

	/// Registers a plugin target and returns its handle.
	///
	/// The broker keeps only a weak reference. The new target is immediately
	/// told the last known orientation. Adding a registered target again
	/// returns its existing handle and notifies nothing.
	pub fn add_target<T: InputMethodTarget + 'static>(&mut self, target: &Rc<RefCell<T>>) -> TargetId {
		if let Some(id) = self.targets.find(target) {
			tracing::trace!(?id, "target already registered");
			return id;
		}

		let id = self.targets.add(target);
		tracing::debug!(?id, "target added");

		let angle = self.last_orientation;
		let mut cx = TargetContext::new(self.active, &mut self.edit);
		match target.try_borrow_mut() {
			Ok(mut target) => target.handle_app_orientation_changed(&mut cx, angle),
			Err(_) => tracing::warn!(?id, "new target is borrowed, orientation not sent"),
		}
		id
	}

	/// Unregisters a plugin target. Returns `false` for an unknown handle.
	pub fn remove_target(&mut self, id: TargetId) -> bool {
		let removed = self.targets.remove(id);
		if removed {
			tracing::debug!(?id, "target removed");
		}
		removed
	}

	/// Number of registered target handles.
	#[must_use]
	pub fn target_count(&self) -> usize {
		self.targets.len()
	}

	/// Adds a host observer.
	pub fn add_listener(&mut self, listener: Rc<dyn BrokerListener>) {
		self.listeners.push(listener);
	}

	/// Currently active connection, [`ConnectionId::NONE`] if none.
	#[must_use]
	pub fn active_connection(&self) -> ConnectionId {
		self.active
	}

	/// Current snapshot as received from the client.
	///
	/// Text fields here are not updated by simulated edits; use
	/// [`ConnectionBroker::surrounding_text`] for the mirrored view.
	#[must_use]
	pub fn widget_state(&self) -> &WidgetState {
		self.widget.state()
	}

	/// Extension id resolved from the current snapshot.
	#[must_use]
	pub fn current_extension_id(&self) -> &AttributeExtensionId {
		&self.current_extension_id
	}

	/// Extensions registered through the broker, in registration order.
	pub fn attribute_extension_ids(&self) -> impl Iterator<Item = &AttributeExtensionId> {
		self.extensions.ids()
	}

	/// Angle of the last completed rotation.
	#[must_use]
	pub fn last_orientation(&self) -> i32 {
		self.last_orientation
	}

	/// Forwards a key-override notification from the extension manager.
	pub fn key_override_created(&self) {
		self.notify_listeners(|listener| listener.key_override_created());
	}

	/// Returns `true` if `connection` is active, tracing the drop otherwise.
	fn admits(&self, connection: ConnectionId, call: &'static str) -> bool {
		if !self.active.is_none() && connection == self.active {
			return true;
		}
		tracing::trace!(%connection, active = %self.active, call, "call from inactive connection dropped");
		false
	}

	/// Calls `notify` on every live target, in registration order.
	fn notify_targets(
		&mut self,
		mut notify: impl FnMut(&mut dyn InputMethodTarget, &mut TargetContext<'_>),
	) {
		let targets = self.targets.live();
		let mut cx = TargetContext::new(self.active, &mut self.edit);
		for target in targets {
			match target.try_borrow_mut() {
				Ok(mut target) => notify(&mut *target, &mut cx),
				Err(_) => tracing::warn!("target is borrowed elsewhere, notification skipped"),
			}
		}
	}

	/// Calls `notify` on every listener, in insertion order.
	fn notify_listeners(&self, notify: impl Fn(&dyn BrokerListener)) {
		for listener in &self.listeners {
			notify(listener.as_ref());
		}
	}
}
