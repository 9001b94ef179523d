//! Type definitions for the orchestrator
//!
//! Data types used by the dispatch path that are not service traits.

use std::fmt;

use shared::RequestDescriptor;

use crate::error::OrchestratorError;

/// Fixed page regions the orchestrator writes into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Filters,
    Content,
    Dialog,
    MiniDashboard,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Filters => write!(f, "filters"),
            Region::Content => write!(f, "content"),
            Region::Dialog => write!(f, "dialog"),
            Region::MiniDashboard => write!(f, "mini_dashboard"),
        }
    }
}

/// Result of moving the history cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Landed on an entry; `None` for an entry without state
    Entry(Option<RequestDescriptor>),
    /// Moved past either end of the stack
    LeftApplication,
}

/// Why a call failed, as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    pub reason: String,
    pub status: Option<u16>,
    pub url: String,
}

impl TransportFailure {
    pub fn from_error(error: &OrchestratorError, url: impl Into<String>) -> Self {
        let reason = match error {
            OrchestratorError::HttpStatus { .. } => "error".to_string(),
            OrchestratorError::MalformedResponse { message, .. } => format!("parsererror: {message}"),
            OrchestratorError::Transport { message, .. } => message.clone(),
            other => other.to_string(),
        };

        Self {
            reason,
            status: error.status(),
            url: url.into(),
        }
    }
}

/// What a dispatch did, for callers that want to observe it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Applied {
        updates: usize,
        callback_invoked: bool,
    },
    Failed(TransportFailure),
}

impl DispatchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, DispatchOutcome::Applied { .. })
    }
}
