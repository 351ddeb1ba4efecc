//! Input-method connection broker.
//!
//! Arbitrates between concurrently connected client applications so that only
//! the active client's editing state is visible to the registered plugin
//! targets. See [`core`] for the state machine and its invariants.

#![warn(missing_docs)]

pub mod config;
pub mod core;
pub mod edit_buffer;
pub mod error;
pub mod extensions;
pub mod listener;
pub mod settings;
pub mod target;
pub mod widget_state;

pub use imbroker_proto as proto;

pub use crate::config::BrokerConfig;
pub use crate::core::ConnectionBroker;
pub use crate::extensions::{AttributeExtensionManager, InMemoryExtensionManager};
pub use crate::listener::BrokerListener;
pub use crate::target::{InputMethodTarget, TargetContext, TargetId};
