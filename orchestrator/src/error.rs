//! Orchestrator-specific error types

use shared::SharedError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Transport failure calling {url}: {message}")]
    Transport { url: String, message: String },

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Malformed response from {url}: {message}")]
    MalformedResponse { url: String, message: String },

    #[error("Session check failed: {message}")]
    SessionCheck { message: String },

    #[error("Script load failed for {script}: {message}")]
    ScriptLoad { script: String, message: String },

    #[error("No callback registered under '{name}'")]
    UnknownCallback { name: String },

    #[error("Configuration error: {field}: {message}")]
    Configuration { field: String, message: String },

    #[error("Shared component error: {0}")]
    Shared(#[from] SharedError),
}

impl OrchestratorError {
    pub fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            field: field.into(),
            message: message.into(),
        }
    }

    /// HTTP status code, when the failure carried one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type OrchestratorResult<T> = Result<T, OrchestratorError>;

#[cfg(test)]
mod tests {
    use super::*;
    use shared::QueryParams;

    fn parse(raw: &str) -> OrchestratorResult<QueryParams> {
        Ok(QueryParams::parse(raw)?)
    }

    #[test]
    fn test_query_errors_convert() {
        let error = parse("q=%FF").unwrap_err();
        assert!(matches!(error, OrchestratorError::Shared(SharedError::InvalidEncoding { ref key, .. }) if key == "q"));
        assert!(error.status().is_none());
    }

    #[test]
    fn test_status_only_for_http_errors() {
        let error = OrchestratorError::HttpStatus {
            url: "http://taranis.test/taranis/load/a/b/c".to_string(),
            status: 502,
        };
        assert_eq!(error.status(), Some(502));
        assert_eq!(OrchestratorError::config("script_root", "missing").status(), None);
    }
}
