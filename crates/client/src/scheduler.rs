//! The timer seam.
//!
//! Two timers exist in the whole runtime: the reconnect backoff (one-shot)
//! and the heartbeat (repeating). Neither is ever cancelled; a pending
//! reconnect is superseded by a successful connection, and the heartbeat
//! runs for the lifetime of the page.

pub trait Scheduler {
    fn set_timeout(&self, delay_ms: u64, callback: Box<dyn FnOnce()>);

    fn set_interval(&self, period_ms: u64, callback: Box<dyn Fn()>);
}
