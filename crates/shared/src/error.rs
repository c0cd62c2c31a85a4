//! Protocol error types.

use thiserror::Error;

/// Errors produced while encoding or decoding protocol frames.
///
/// The runtime never lets these escape a transport callback: a decode
/// failure on an inbound frame is logged and the frame is ignored.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed frame: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("frame encoding failed: {0}")]
    Encode(#[source] serde_json::Error),
}
