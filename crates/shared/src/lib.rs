//! Shared wire types for the JWeb state-synchronization protocol.
//!
//! Everything exchanged between the browser runtime and the server endpoint
//! is defined here: the tagged frame unions, the hydration document embedded
//! in the initial page, and the protocol error type. This crate has no I/O
//! and no platform code, so both the runtime and its tests depend on it.

pub mod error;
pub mod frames;
pub mod hydration;

pub use error::*;
pub use frames::*;
pub use hydration::*;
