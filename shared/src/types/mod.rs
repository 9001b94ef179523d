//! Core types used by every caller of the request orchestrator

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Correlation id attached to the log lines of one dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form keeps log lines readable
        let full = self.0.simple().to_string();
        write!(f, "{}", &full[..8])
    }
}

/// Three-part routing key naming a backend handler
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Route {
    pub module: String,
    pub page: String,
    pub action: String,
}

impl Route {
    pub fn new(module: impl Into<String>, page: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            page: page.into(),
            action: action.into(),
        }
    }

    /// Path of the load endpoint relative to the script root
    pub fn load_path(&self) -> String {
        format!("load/{}/{}/{}", self.module, self.page, self.action)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.module, self.page, self.action)
    }
}

/// Stable name of a registered success callback.
///
/// Stored in the descriptor (and therefore in history state) instead of a
/// function value, so a replayed entry resolves to the same handler.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallbackId(String);

impl CallbackId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One orchestrated call. Its serialized form is exactly the history state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    #[serde(flatten)]
    pub route: Route,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_success: Option<CallbackId>,
    #[serde(default)]
    pub is_auto_refresh: bool,
    #[serde(default)]
    pub came_from_history_navigation: bool,
    #[serde(default)]
    pub is_first_page_load: bool,
}

impl RequestDescriptor {
    pub fn new(module: impl Into<String>, page: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            route: Route::new(module, page, action),
            raw_query: None,
            on_success: None,
            is_auto_refresh: false,
            came_from_history_navigation: false,
            is_first_page_load: false,
        }
    }

    pub fn with_query(mut self, raw_query: impl Into<String>) -> Self {
        self.raw_query = Some(raw_query.into());
        self
    }

    pub fn with_callback(mut self, callback: CallbackId) -> Self {
        self.on_success = Some(callback);
        self
    }

    /// Mark as a background poll: no error banner, no history entry
    pub fn auto_refresh(mut self) -> Self {
        self.is_auto_refresh = true;
        self
    }

    /// Mark as the bootstrap request of the page
    pub fn first_page_load(mut self) -> Self {
        self.is_first_page_load = true;
        self
    }

    /// Copy of this descriptor flagged as a back/forward replay
    pub fn as_history_replay(&self) -> Self {
        let mut replay = self.clone();
        replay.came_from_history_navigation = true;
        replay
    }

    /// Whether a successful content update should be recorded in history
    pub fn records_history(&self) -> bool {
        !self.is_auto_refresh && !self.came_from_history_navigation
    }
}
