//! Script host that records executed scripts
//!
//! Outside a browser there is no script engine; this host keeps the fetched
//! sources in execution order so embedders can hand them on.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::error::OrchestratorResult;
use crate::traits::ScriptHost;

/// A script as executed: id plus source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedScript {
    pub script: String,
    pub source: String,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingScriptHost {
    executed: Arc<RwLock<Vec<ExecutedScript>>>,
}

impl RecordingScriptHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn executed(&self) -> Vec<ExecutedScript> {
        self.executed.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Number of executions of one script id
    pub fn execution_count(&self, script: &str) -> usize {
        self.executed
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|executed| executed.script == script)
            .count()
    }
}

impl ScriptHost for RecordingScriptHost {
    fn execute(&self, script: &str, source: &str) -> OrchestratorResult<()> {
        debug!("▶️ Executing script {} ({} bytes)", script, source.len());
        self.executed
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ExecutedScript {
                script: script.to_string(),
                source: source.to_string(),
            });
        Ok(())
    }
}
