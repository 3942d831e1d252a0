//! Frontend Settings
//!
//! Tunables for the sync layer. Defaults match the backend's event name.

use serde::{Deserialize, Serialize};

/// Event the backend emits whenever the todo table changes.
pub const REFRESH_EVENT: &str = "client:refresh";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// Name of the "data changed" event to subscribe to
    pub invalidation_event: String,
    /// Auto-dismiss delay for notices; 0 keeps them until dismissed
    pub notice_timeout_ms: u32,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            invalidation_event: REFRESH_EVENT.to_string(),
            notice_timeout_ms: 4000,
        }
    }
}

impl SyncSettings {
    pub fn auto_dismiss(&self) -> Option<u32> {
        (self.notice_timeout_ms > 0).then_some(self.notice_timeout_ms)
    }
}
