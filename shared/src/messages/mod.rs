//! Message types exchanged with the Taranis backend
//!
//! - `page`: the `{"page": {...}}` envelope returned by every load call
//! - `session`: the session liveness check

pub mod page;
pub mod session;

pub use page::{MiniDashboard, PageEnvelope, PageUpdate, ResponsePayload};
pub use session::SessionStatus;
