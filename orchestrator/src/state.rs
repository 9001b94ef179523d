//! Orchestrator state management
//!
//! The last-request slot and the loaded-scripts set live for the lifetime of
//! one orchestrator instance, which stands for one page lifetime.

use std::collections::HashSet;
use tokio::sync::{Mutex, RwLock};

use shared::RequestDescriptor;

/// Mutable state shared by every dispatch
#[derive(Debug, Default)]
pub struct OrchestratorState {
    // Overwritten on every issue, never queued; last writer wins
    last_request: RwLock<Option<RequestDescriptor>>,
    // Scripts executed or currently being loaded
    loaded_scripts: Mutex<HashSet<String>>,
}

impl OrchestratorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record_request(&self, descriptor: RequestDescriptor) {
        *self.last_request.write().await = Some(descriptor);
    }

    pub async fn last_request(&self) -> Option<RequestDescriptor> {
        self.last_request.read().await.clone()
    }

    /// Claim a script for loading. Returns false if it is already loaded or
    /// another dispatch is loading it.
    pub async fn reserve_script(&self, script: &str) -> bool {
        self.loaded_scripts.lock().await.insert(script.to_string())
    }

    /// Give a claim back after a failed load so a later response can retry
    pub async fn release_script(&self, script: &str) {
        self.loaded_scripts.lock().await.remove(script);
    }

    pub async fn loaded_scripts(&self) -> Vec<String> {
        let mut scripts: Vec<String> = self.loaded_scripts.lock().await.iter().cloned().collect();
        scripts.sort();
        scripts
    }
}
