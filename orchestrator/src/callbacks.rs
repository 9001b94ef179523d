//! Typed registry of success callbacks
//!
//! Callers register a handler under a stable name once and build descriptors
//! with the returned `CallbackId`. Asking for a handle to a name that was
//! never registered fails at construction time.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;
use shared::CallbackId;

use crate::error::{OrchestratorError, OrchestratorResult};

/// Handler invoked with the response's callback parameters
pub type Callback = Arc<dyn Fn(&Value) + Send + Sync>;

#[derive(Default, Clone)]
pub struct CallbackRegistry {
    handlers: Arc<RwLock<HashMap<CallbackId, Callback>>>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the handler stored under `name`
    pub fn register<F>(&self, name: &str, handler: F) -> CallbackId
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        let id = CallbackId::new(name);
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.clone(), Arc::new(handler));
        id
    }

    /// Checked handle to an already registered callback
    pub fn handle(&self, name: &str) -> OrchestratorResult<CallbackId> {
        let id = CallbackId::new(name);
        if self.contains(&id) {
            Ok(id)
        } else {
            Err(OrchestratorError::UnknownCallback { name: name.to_string() })
        }
    }

    pub fn contains(&self, id: &CallbackId) -> bool {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    /// Invoke the handler for `id`. Returns false when none is registered.
    pub fn invoke(&self, id: &CallbackId, params: &Value) -> bool {
        // Clone out so the handler runs without holding the lock
        let handler = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned();

        match handler {
            Some(handler) => {
                handler(params);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
