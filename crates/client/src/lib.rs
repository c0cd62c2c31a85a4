//! JWeb client runtime.
//!
//! A browser-resident agent that keeps a page's DOM synchronized with
//! server-held state over a persistent connection: hydration from embedded
//! initial state, a reconnecting transport, inbound frame routing into the
//! state store and the attribute-driven DOM bindings, and outbound
//! forwarding of handler-bound DOM events.
//!
//! The core is platform-neutral; the `web` module (wasm builds only)
//! supplies the real DOM, WebSocket and timer implementations and a
//! [`web::boot`] entry point.

pub mod binder;
pub mod config;
pub mod connection;
pub mod dom;
pub mod hydrate;
pub mod logging;
pub mod runtime;
pub mod scheduler;
pub mod store;
pub mod transport;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{BindingAttrs, RuntimeConfig};
pub use connection::{ConnectionState, ReconnectConfig};
pub use runtime::JWebRuntime;
