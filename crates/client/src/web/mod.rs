//! Browser glue: the real DOM, WebSocket transport, timer scheduler, and
//! the delegated event listeners that feed the runtime.

mod dom_web;
mod events;
mod socket;
mod timers;

pub use dom_web::WebDom;
pub use socket::WebSocketFactory;
pub use timers::BrowserScheduler;

use std::rc::Rc;

use crate::config::RuntimeConfig;
use crate::runtime::JWebRuntime;

/// Build a runtime against the live browser environment, wire the
/// delegated event listeners, and start it. The caller keeps the returned
/// handle alive for the lifetime of the page.
pub fn boot(config: RuntimeConfig) -> JWebRuntime {
    let handler_attr = config.attrs.handler.clone();
    let runtime = JWebRuntime::new(
        config,
        Rc::new(WebDom::new()),
        Rc::new(WebSocketFactory),
        Rc::new(BrowserScheduler),
    );
    events::attach_delegated_listeners(&runtime, &handler_attr);
    runtime.start();
    runtime
}
