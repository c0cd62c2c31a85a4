//! The transport seam.
//!
//! The runtime owns exactly one transport at a time and opens a fresh one
//! per connection attempt through a [`TransportFactory`]. Open, message and
//! close are reported through caller-supplied callbacks; sending is
//! synchronous and unbuffered, because frames produced while disconnected
//! are dropped by contract rather than queued.

use std::rc::Rc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to open transport: {0}")]
    Open(String),

    #[error("send on a transport that is not open")]
    NotOpen,

    #[error("send failed: {0}")]
    Send(String),
}

/// Callbacks a transport fires as connection events arrive. All single
/// threaded; `Rc` so the browser glue can hand clones to each closure.
#[derive(Clone)]
pub struct TransportCallbacks {
    pub on_open: Rc<dyn Fn()>,
    pub on_message: Rc<dyn Fn(String)>,
    pub on_close: Rc<dyn Fn()>,
}

/// One live (or opening) connection.
pub trait Transport {
    /// Push one text frame. Fails if the connection is not open.
    fn send(&self, frame: &str) -> Result<(), TransportError>;
}

/// Opens connections. A construction error is treated by the caller
/// exactly like an unexpected close.
pub trait TransportFactory {
    fn connect(
        &self,
        url: &str,
        callbacks: TransportCallbacks,
    ) -> Result<Box<dyn Transport>, TransportError>;
}
