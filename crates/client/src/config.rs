//! Runtime configuration.
//!
//! Everything the runtime needs is injected through this struct, so
//! multiple independent instances can coexist and tests never patch
//! global state. The defaults reproduce the wire and attribute contract
//! the server rendering layer emits.

use crate::connection::ReconnectConfig;

/// Names of the DOM attributes the binder and the event layer consume.
#[derive(Debug, Clone)]
pub struct BindingAttrs {
    /// Mirror binding: the element's value or text tracks the state value.
    pub mirror: String,
    /// Conditional-text binding, paired with `text` below.
    pub bind: String,
    /// `"<truthy>:<falsy>"` literals for the conditional-text mode.
    pub text: String,
    /// Class-toggle binding.
    pub toggle: String,
    /// Class added while the toggled state is truthy.
    pub toggle_class: String,
    /// Handler id carried by elements whose events are forwarded.
    pub handler: String,
}

impl Default for BindingAttrs {
    fn default() -> Self {
        Self {
            mirror: "data-state".into(),
            bind: "data-state-bind".into(),
            text: "data-state-text".into(),
            toggle: "data-state-toggle".into(),
            toggle_class: "toggle-on".into(),
            handler: "data-handler".into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Path of the transport endpoint; scheme and host mirror the page's.
    pub endpoint_path: String,
    /// Id of the element whose text content is the hydration document.
    pub hydration_element_id: String,
    /// Name of the custom event dispatched for every applied state change.
    pub state_change_event: String,
    pub heartbeat_interval_ms: u64,
    pub reconnect: ReconnectConfig,
    pub attrs: BindingAttrs,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            endpoint_path: "/jweb".into(),
            hydration_element_id: "jweb-hydration".into(),
            state_change_event: "jweb:stateChange".into(),
            heartbeat_interval_ms: 30_000,
            reconnect: ReconnectConfig::default(),
            attrs: BindingAttrs::default(),
        }
    }
}
