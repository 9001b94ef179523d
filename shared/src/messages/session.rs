//! Session liveness check response

use serde::{Deserialize, Serialize};

/// Body of the session-status endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub session_ok: bool,
}

impl SessionStatus {
    pub fn is_alive(&self) -> bool {
        self.session_ok
    }
}
