//! Shared data types for the input-method connection broker.
//!
//! This crate defines the values exchanged between client applications, the
//! broker, and input-method plugin targets: connection identities, the
//! widget-state snapshot schema, attribute-extension ids, key events, and the
//! [`Request`] enum that a transport produces for every connection-tagged call.

#![warn(missing_docs)]

pub mod request;
pub mod types;
pub mod widget;

pub use request::{Request, RequestPayload};
pub use types::*;
pub use widget::{WidgetAttribute, WidgetState};
