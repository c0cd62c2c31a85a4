//! Cross-platform logging.
//!
//! The runtime logs through one set of macros whichever build it is:
//! `web_sys::console` on the browser target, `tracing` everywhere else
//! (which is what the deterministic test build uses).

macro_rules! define_emitter {
    ($name:ident, $console:ident, $level:ident) => {
        #[cfg(target_arch = "wasm32")]
        pub fn $name(msg: &str) {
            web_sys::console::$console(&msg.into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        pub fn $name(msg: &str) {
            tracing::$level!("{}", msg);
        }
    };
}

define_emitter!(emit_debug, debug_1, debug);
define_emitter!(emit_info, log_1, info);
define_emitter!(emit_warn, warn_1, warn);
define_emitter!(emit_error, error_1, error);

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::logging::emit_debug(&format!($($arg)*)) };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::logging::emit_info(&format!($($arg)*)) };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::logging::emit_warn(&format!($($arg)*)) };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::logging::emit_error(&format!($($arg)*)) };
}
