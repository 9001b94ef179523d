//! Service trait definitions for dependency injection
//!
//! The backend, the page, browser history and the script runtime are all
//! reached through these traits so the dispatch path can be tested alone.

use async_trait::async_trait;

use shared::{PageEnvelope, QueryParams, RequestDescriptor, Route};

use crate::error::OrchestratorResult;
use crate::types::{Navigation, Region};

/// Taranis backend HTTP contract
#[mockall::automock]
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Full URL of the load endpoint for a route
    fn load_url(&self, route: &Route) -> String;

    /// Login page the browser is sent to when the session is gone
    fn login_url(&self) -> String;

    /// POST the JSON-encoded parameters to the route's load endpoint
    async fn load(&self, route: &Route, params: &QueryParams) -> OrchestratorResult<PageEnvelope>;

    /// Ask the backend whether the session is still alive
    async fn session_alive(&self) -> OrchestratorResult<bool>;

    /// Fetch the source of a script referenced by a response
    async fn fetch_script(&self, script: &str) -> OrchestratorResult<String>;
}

/// Page regions, widgets and indicators
#[mockall::automock]
pub trait PageSurface: Send + Sync {
    fn clear_error(&self);

    /// Render an error block into the content region
    fn show_error(&self, html: &str);

    fn start_busy(&self);

    fn stop_busy(&self);

    fn replace_region(&self, region: Region, html: &str);

    fn bind_date_pickers(&self, region: Region);

    /// Left/right list-transfer buttons
    fn bind_transfer_buttons(&self, region: Region);

    /// Double-click on a list item triggers the opposite transfer button
    fn bind_transfer_double_click(&self, region: Region);

    fn bind_pagination(&self, region: Region);

    /// Whether a keyboard-shortcut library is loaded
    fn has_keyboard_shortcuts(&self) -> bool;

    fn set_shortcut_hint_visible(&self, visible: bool);

    /// Update badge text and its mirrored data attribute
    fn set_unread_count(&self, category: &str, count: u64);

    fn close_dialog(&self);

    /// Hook run after a response force-closes the dialog
    fn advance_to_next_item(&self);

    /// Full-page navigation
    fn navigate_to(&self, url: &str);
}

/// Browser history stack
#[mockall::automock]
pub trait HistoryStore: Send + Sync {
    fn push(&self, state: RequestDescriptor);

    fn replace(&self, state: RequestDescriptor);

    fn back(&self) -> Navigation;

    fn forward(&self) -> Navigation;
}

/// Runtime that executes scripts referenced by responses
#[mockall::automock]
pub trait ScriptHost: Send + Sync {
    fn execute(&self, script: &str, source: &str) -> OrchestratorResult<()>;
}
