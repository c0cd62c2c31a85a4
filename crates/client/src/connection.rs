//! Connection state and reconnect policy.

/// Observable state of the single transport connection.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Reconnecting { attempt: u32 },
    Failed { reason: String },
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }

    pub fn is_connecting(&self) -> bool {
        matches!(
            self,
            ConnectionState::Connecting | ConnectionState::Reconnecting { .. }
        )
    }
}

/// Reconnect behavior after an unexpected close or a failed open.
///
/// The delay grows linearly with the attempt number and there is no jitter
/// and no cap on the per-attempt delay. Once `max_attempts` reconnects have
/// failed the runtime stays disconnected until the page reloads.
#[derive(Debug, Clone)]
pub struct ReconnectConfig {
    pub base_delay_ms: u64,
    pub max_attempts: u32,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: 1000,
            max_attempts: 5,
        }
    }
}

impl ReconnectConfig {
    /// Delay before the given attempt, 1-indexed.
    pub fn delay_for_attempt(&self, attempt: u32) -> u64 {
        self.base_delay_ms * u64::from(attempt)
    }
}
