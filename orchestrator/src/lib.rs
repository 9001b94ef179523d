//! Request orchestrator for the Taranis web client
//!
//! Every module of the Taranis UI talks to the backend the same way: build a
//! query for a `module/page/action` route, POST it as JSON, patch the page
//! regions named in the response and call a success callback. This library
//! implements that cycle once, with the page, history and script runtime
//! injected as services.

pub mod callbacks;
pub mod config;
pub mod core;
pub mod error;
pub mod orchestrator;
pub mod services;
pub mod state;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use callbacks::{Callback, CallbackRegistry};
pub use config::OrchestratorConfig;
pub use error::{OrchestratorError, OrchestratorResult};
pub use orchestrator::RequestOrchestrator;
pub use state::OrchestratorState;
pub use traits::{BackendClient, HistoryStore, PageSurface, ScriptHost};
pub use types::{DispatchOutcome, Navigation, Region, TransportFailure};

pub use services::{HeadlessPage, HttpBackendClient, RecordingScriptHost, SessionHistory};

/// Orchestrator wired with the headless runtimes and the HTTP backend
pub type HeadlessOrchestrator = RequestOrchestrator<HttpBackendClient, HeadlessPage, SessionHistory, RecordingScriptHost>;
