//! Attribute-extension (toolbar) registration scoped to connection lifetime.
//!
//! Clients name extensions with connection-local ids. The registry scopes each
//! id to its owning connection, forwards registration to the injected
//! [`AttributeExtensionManager`], and remembers which ids it registered so
//! that a disconnecting client's extensions can be dropped in one sweep.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use imbroker_proto::{AttributeExtensionId, ConnectionId};
use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

/// External owner of extension resources.
///
/// Parses toolbar resources, keeps their attribute values, and knows about
/// clipboard availability for toolbar buttons. Shared with the rest of the
/// host, so methods take `&self`.
pub trait AttributeExtensionManager {
	/// Loads `resource` under `id`.
	fn register(&self, id: &AttributeExtensionId, resource: &str);
	/// Drops the extension registered under `id`.
	fn unregister(&self, id: &AttributeExtensionId);
	/// Returns `true` if an extension is loaded under `id`.
	fn contains(&self, id: &AttributeExtensionId) -> bool;
	/// Changes one attribute of the extension registered under `id`.
	fn set_extended_attribute(
		&self,
		id: &AttributeExtensionId,
		target: &str,
		target_name: &str,
		attribute: &str,
		value: &Value,
	);
	/// Updates clipboard availability.
	fn set_copy_paste_state(&self, copy_available: bool, paste_available: bool);
}

/// Key of one extended attribute inside an [`InMemoryExtensionManager`].
pub type AttributeKey = (AttributeExtensionId, String, String, String);

/// Extension manager that keeps everything in memory and parses nothing.
#[derive(Debug, Default)]
pub struct InMemoryExtensionManager {
	extensions: RefCell<IndexMap<AttributeExtensionId, String>>,
	attributes: RefCell<IndexMap<AttributeKey, Value>>,
	copy_paste: Cell<(bool, bool)>,
}

impl InMemoryExtensionManager {
	/// Creates an empty manager.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Resource registered under `id`.
	#[must_use]
	pub fn resource(&self, id: &AttributeExtensionId) -> Option<String> {
		self.extensions.borrow().get(id).cloned()
	}

	/// Ids currently loaded, in registration order.
	#[must_use]
	pub fn ids(&self) -> Vec<AttributeExtensionId> {
		self.extensions.borrow().keys().cloned().collect()
	}

	/// Value last stored for one attribute.
	#[must_use]
	pub fn attribute(
		&self,
		id: &AttributeExtensionId,
		target: &str,
		target_name: &str,
		attribute: &str,
	) -> Option<Value> {
		let key = (
			id.clone(),
			target.to_owned(),
			target_name.to_owned(),
			attribute.to_owned(),
		);
		self.attributes.borrow().get(&key).cloned()
	}

	/// Last reported `(copy_available, paste_available)`.
	#[must_use]
	pub fn copy_paste_state(&self) -> (bool, bool) {
		self.copy_paste.get()
	}
}

impl AttributeExtensionManager for InMemoryExtensionManager {
	fn register(&self, id: &AttributeExtensionId, resource: &str) {
		self.extensions
			.borrow_mut()
			.insert(id.clone(), resource.to_owned());
	}

	fn unregister(&self, id: &AttributeExtensionId) {
		self.extensions.borrow_mut().shift_remove(id);
		self.attributes
			.borrow_mut()
			.retain(|(owner, ..), _| owner != id);
	}

	fn contains(&self, id: &AttributeExtensionId) -> bool {
		self.extensions.borrow().contains_key(id)
	}

	fn set_extended_attribute(
		&self,
		id: &AttributeExtensionId,
		target: &str,
		target_name: &str,
		attribute: &str,
		value: &Value,
	) {
		let key = (
			id.clone(),
			target.to_owned(),
			target_name.to_owned(),
			attribute.to_owned(),
		);
		self.attributes.borrow_mut().insert(key, value.clone());
	}

	fn set_copy_paste_state(&self, copy_available: bool, paste_available: bool) {
		self.copy_paste.set((copy_available, paste_available));
	}
}

/// Ids registered through the broker, each owned by one connection.
pub struct AttributeExtensionRegistry {
	manager: Rc<dyn AttributeExtensionManager>,
	ids: IndexSet<AttributeExtensionId>,
}

impl std::fmt::Debug for AttributeExtensionRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AttributeExtensionRegistry")
			.field("manager", &"<dyn AttributeExtensionManager>")
			.field("ids", &self.ids)
			.finish()
	}
}

impl AttributeExtensionRegistry {
	/// Creates an empty registry backed by `manager`.
	#[must_use]
	pub fn new(manager: Rc<dyn AttributeExtensionManager>) -> Self {
		Self {
			manager,
			ids: IndexSet::new(),
		}
	}

	/// The backing manager.
	#[must_use]
	pub fn manager(&self) -> &dyn AttributeExtensionManager {
		self.manager.as_ref()
	}

	/// Registers `resource` under `local_id` scoped to `owner`.
	///
	/// Returns `false` without touching the manager when the id is invalid or
	/// already registered.
	pub fn register(&mut self, owner: ConnectionId, local_id: i32, resource: &str) -> bool {
		let id = AttributeExtensionId::new(local_id, owner);
		if !id.is_valid() || self.ids.contains(&id) {
			tracing::trace!(%id, "extension registration ignored");
			return false;
		}

		self.manager.register(&id, resource);
		tracing::debug!(%id, resource, "extension registered");
		self.ids.insert(id);
		true
	}

	/// Loads `resource` into the manager again if the manager lost it.
	///
	/// Unlike [`register`](Self::register) this also applies to ids the
	/// registry already knows, for managers that restarted and forgot them.
	/// Returns `false` when the id is invalid or the manager has it.
	pub fn restore(&mut self, owner: ConnectionId, local_id: i32, resource: &str) -> bool {
		let id = AttributeExtensionId::new(local_id, owner);
		if !id.is_valid() || self.manager.contains(&id) {
			return false;
		}

		self.manager.register(&id, resource);
		tracing::debug!(%id, resource, "extension restored");
		self.ids.insert(id);
		true
	}

	/// Unregisters `local_id` scoped to `owner`.
	///
	/// Returns `false` when the id is not currently registered.
	pub fn unregister(&mut self, owner: ConnectionId, local_id: i32) -> bool {
		let id = AttributeExtensionId::new(local_id, owner);
		if !id.is_valid() || !self.ids.contains(&id) {
			tracing::trace!(%id, "extension unregistration ignored");
			return false;
		}

		self.manager.unregister(&id);
		tracing::debug!(%id, "extension unregistered");
		self.ids.shift_remove(&id);
		true
	}

	/// Forwards an attribute change for a registered id.
	///
	/// Returns `false` when `local_id` is not registered for `owner`.
	pub fn set_extended_attribute(
		&self,
		owner: ConnectionId,
		local_id: i32,
		target: &str,
		target_name: &str,
		attribute: &str,
		value: &Value,
	) -> bool {
		let id = AttributeExtensionId::new(local_id, owner);
		if !id.is_valid() || !self.ids.contains(&id) {
			tracing::trace!(%id, attribute, "extended attribute ignored");
			return false;
		}

		self.manager
			.set_extended_attribute(&id, target, target_name, attribute, value);
		true
	}

	/// Unregisters and forgets every id owned by `owner`.
	///
	/// Returns the number of ids removed.
	pub fn remove_owned_by(&mut self, owner: ConnectionId) -> usize {
		let manager = &self.manager;
		let before = self.ids.len();
		self.ids.retain(|id| {
			if id.is_owned_by(owner) {
				manager.unregister(id);
				false
			} else {
				true
			}
		});

		let removed = before - self.ids.len();
		if removed > 0 {
			tracing::debug!(%owner, removed, "extensions dropped with connection");
		}
		removed
	}

	/// Returns `true` if the broker registered `id`.
	#[must_use]
	pub fn contains(&self, id: &AttributeExtensionId) -> bool {
		self.ids.contains(id)
	}

	/// Registered ids in registration order.
	pub fn ids(&self) -> impl Iterator<Item = &AttributeExtensionId> {
		self.ids.iter()
	}
}
