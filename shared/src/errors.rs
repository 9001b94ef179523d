//! Shared error types for the Taranis request orchestrator

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Invalid percent-encoding in value of '{key}': {message}")]
    InvalidEncoding { key: String, message: String },

    #[error("Serialization failed: {message}")]
    SerializationError { message: String },

    #[error("Deserialization failed: {message}")]
    DeserializationError { message: String },
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            SharedError::DeserializationError { message: err.to_string() }
        } else {
            SharedError::SerializationError { message: err.to_string() }
        }
    }
}

pub type SharedResult<T> = Result<T, SharedError>;
