//! Shared types for the Taranis request orchestrator
//!
//! Contains the request descriptor, query decoding rules and the backend
//! response envelope used by the orchestrator and by every caller that builds
//! requests for it.

pub mod errors;
pub mod logging;
pub mod messages;
pub mod query;
pub mod types;

pub use errors::*;
pub use types::*;

pub use messages::{MiniDashboard, PageEnvelope, PageUpdate, ResponsePayload, SessionStatus};
pub use query::{HISTORY_MARKER_KEY, HISTORY_MARKER_VALUE, ParamValue, QueryParams};
