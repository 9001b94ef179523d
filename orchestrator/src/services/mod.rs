//! Service implementations
//!
//! Real implementations of the orchestrator's service traits: the HTTP
//! backend client plus headless page, history and script runtimes.

pub mod headless_page;
pub mod http_backend;
pub mod script_host;
pub mod session_history;

#[cfg(test)]
pub mod tests;

// Re-export all service implementations
pub use headless_page::{Badge, Binding, HeadlessPage};
pub use http_backend::HttpBackendClient;
pub use script_host::{ExecutedScript, RecordingScriptHost};
pub use session_history::SessionHistory;
