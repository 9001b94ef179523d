//! Test fixtures and data for orchestrator tests
//!
//! Consistent descriptors and backend responses used across all test suites.

use serde_json::{Value, json};
use shared::{PageEnvelope, RequestDescriptor};

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    /// Script root of the stubbed backend
    pub const SCRIPT_ROOT: &'static str = "http://taranis.test/taranis/";
    pub const LOGIN_URL: &'static str = "http://taranis.test/taranis/login";
    pub const CSRF_TOKEN: &'static str = "0123456789abcdef";

    pub const ASSESS_SCRIPT: &'static str = "js/assess.js";
    pub const ANALYZE_SCRIPT: &'static str = "js/analyze.js";

    /// The assess search call used in the end-to-end scenario
    pub fn assess_search() -> RequestDescriptor {
        RequestDescriptor::new("assess", "assess", "search").with_query("status=unread&status=read")
    }

    pub fn assess_overview() -> RequestDescriptor {
        RequestDescriptor::new("assess", "assess", "displayAssess")
    }

    pub fn publications() -> RequestDescriptor {
        RequestDescriptor::new("write", "publications", "displayPublications").with_query("pub_type=advisory")
    }

    pub fn content_json() -> Value {
        json!({"page": {"content": "<div>...</div>", "params": {"count": 5}}})
    }

    pub fn content_response() -> PageEnvelope {
        serde_json::from_value(Self::content_json()).unwrap()
    }

    pub fn content_only(html: &str) -> PageEnvelope {
        serde_json::from_value(json!({"page": {"content": html}})).unwrap()
    }

    pub fn filters_response() -> PageEnvelope {
        serde_json::from_value(json!({"page": {"filters": "<div id=\"filters\"/>"}})).unwrap()
    }

    pub fn dialog_response() -> PageEnvelope {
        serde_json::from_value(json!({"page": {"dialog": "<form id=\"edit-item\"/>"}})).unwrap()
    }

    pub fn close_dialog_response() -> PageEnvelope {
        serde_json::from_value(json!({"page": {"close_dialog": 1, "params": {"id": "20240101abc"}}})).unwrap()
    }

    pub fn mini_dashboard_response() -> PageEnvelope {
        serde_json::from_value(json!({
            "page": {
                "mini_dashboard": "<ul class=\"mini-dashboard\"/>",
                "unread_counts": {"assess": 42, "analyze": 3}
            }
        }))
        .unwrap()
    }

    pub fn scripts_response(scripts: &[&str]) -> PageEnvelope {
        serde_json::from_value(json!({"page": {"js": scripts}})).unwrap()
    }
}
