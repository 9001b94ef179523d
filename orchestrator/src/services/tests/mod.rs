//! Tests for orchestrator services
//!
//! The HTTP backend runs against a wiremock server; the headless runtimes are
//! exercised directly.

pub mod session_history;

// Re-export test utilities
pub use crate::traits::*;
