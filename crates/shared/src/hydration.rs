//! The initial-state document embedded in the served page.

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::frames::StateEntry;

/// JSON blob the rendering layer embeds as the text content of a
/// well-known element, parsed exactly once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HydrationDoc {
    pub context_id: String,
    #[serde(default)]
    pub state: Vec<StateEntry>,
}

impl HydrationDoc {
    pub fn parse(raw: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(raw).map_err(ProtocolError::Decode)
    }
}
