//! Load call response envelope
//!
//! The backend wraps every response under a single `page` key. Each sub-field
//! is optional and independent; `ResponsePayload::updates` turns the present
//! ones into an explicit list of page updates in application order.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Top-level wire envelope: `{"page": {...}}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageEnvelope {
    #[serde(default)]
    pub page: ResponsePayload,
}

/// Fields of the `page` object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponsePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialog: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(default, deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub js: Vec<String>,
    #[serde(default, deserialize_with = "flag")]
    pub close_dialog: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mini_dashboard: Option<String>,
    #[serde(default, deserialize_with = "counts", skip_serializing_if = "Option::is_none")]
    pub unread_counts: Option<BTreeMap<String, u64>>,
}

/// Rendered mini-dashboard plus unread count per category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiniDashboard {
    pub html: String,
    pub unread_counts: BTreeMap<String, u64>,
}

/// One region-level change carried by a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageUpdate {
    Filters(String),
    Content(String),
    MiniDashboard(MiniDashboard),
    CloseDialog,
    Dialog(String),
    Scripts(Vec<String>),
}

impl ResponsePayload {
    /// Present updates in the order they must be applied
    pub fn updates(&self) -> Vec<PageUpdate> {
        let mut updates = Vec::new();

        if let Some(filters) = &self.filters {
            updates.push(PageUpdate::Filters(filters.clone()));
        }
        if let Some(content) = &self.content {
            updates.push(PageUpdate::Content(content.clone()));
        }
        if let Some(html) = &self.mini_dashboard {
            updates.push(PageUpdate::MiniDashboard(MiniDashboard {
                html: html.clone(),
                unread_counts: self.unread_counts.clone().unwrap_or_default(),
            }));
        }
        if self.close_dialog {
            updates.push(PageUpdate::CloseDialog);
        }
        if let Some(dialog) = &self.dialog {
            updates.push(PageUpdate::Dialog(dialog.clone()));
        }
        if !self.js.is_empty() {
            updates.push(PageUpdate::Scripts(self.js.clone()));
        }

        updates
    }

    /// Parameters handed to the success callback, `{}` when absent
    pub fn callback_params(&self) -> Value {
        match &self.params {
            Some(Value::Null) | None => Value::Object(Map::new()),
            Some(params) => params.clone(),
        }
    }
}

/// Accepts `true`/`false`, `0`/`1` and `"0"`/`"1"`
fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_i64().is_some_and(|n| n != 0),
        Some(Value::String(s)) => !s.is_empty() && s != "0" && s != "false",
        _ => false,
    })
}

/// Accepts a single script id or a list of them
fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(script)) => vec![script],
        Some(OneOrMany::Many(scripts)) => scripts,
        None => Vec::new(),
    })
}

/// Badge counts as numbers or numeric strings; other values are dropped
fn counts<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<BTreeMap<String, u64>>, D::Error> {
    let Some(raw) = Option::<Map<String, Value>>::deserialize(deserializer)? else {
        return Ok(None);
    };

    let counts = raw
        .into_iter()
        .filter_map(|(category, value)| {
            let count = match value {
                Value::Number(n) => n.as_u64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            };
            count.map(|count| (category, count))
        })
        .collect();

    Ok(Some(counts))
}
