//! `Scheduler` backed by the browser's timers via `gloo-timers`.

use gloo_timers::callback::{Interval, Timeout};

use crate::scheduler::Scheduler;

pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn set_timeout(&self, delay_ms: u64, callback: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms as u32, callback).forget();
    }

    fn set_interval(&self, period_ms: u64, callback: Box<dyn Fn()>) {
        Interval::new(period_ms as u32, move || callback()).forget();
    }
}
