//! Query string decoding for orchestrated calls
//!
//! Callers describe parameters as `&`-joined `key=value` pairs with
//! percent-encoded values. Decoding preserves first-appearance key order and
//! accumulates repeated keys into ordered lists.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::errors::{SharedError, SharedResult};

/// Field injected when a call replays a browser history entry
pub const HISTORY_MARKER_KEY: &str = "history_replay";
pub const HISTORY_MARKER_VALUE: &str = "1";

/// Decoded value of one query key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Single(String),
    Multi(Vec<String>),
}

impl ParamValue {
    /// Accumulate a repeated key: scalar becomes a two-element list, lists grow
    fn push(&mut self, value: String) {
        match self {
            ParamValue::Single(first) => {
                let first = std::mem::take(first);
                *self = ParamValue::Multi(vec![first, value]);
            }
            ParamValue::Multi(values) => values.push(value),
        }
    }

    pub fn values(&self) -> Vec<&str> {
        match self {
            ParamValue::Single(value) => vec![value.as_str()],
            ParamValue::Multi(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

/// Ordered key → value(s) mapping sent as the `params` body field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, ParamValue)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a raw query string.
    ///
    /// A single leading `&` is stripped, pairs split on the first `=`, and
    /// values are percent-decoded exactly once (`+` stays a literal plus).
    pub fn parse(raw: &str) -> SharedResult<Self> {
        let mut params = Self::new();
        let trimmed = raw.strip_prefix('&').unwrap_or(raw);

        for pair in trimmed.split('&').filter(|pair| !pair.is_empty()) {
            let (key, encoded) = pair.split_once('=').unwrap_or((pair, ""));
            let value = urlencoding::decode(encoded).map_err(|e| SharedError::InvalidEncoding {
                key: key.to_string(),
                message: e.to_string(),
            })?;
            params.append(key, value.into_owned());
        }

        Ok(params)
    }

    /// Add a value, accumulating when the key is already present
    pub fn append(&mut self, key: &str, value: String) {
        match self.entries.iter_mut().find(|(existing, _)| existing == key) {
            Some((_, current)) => current.push(value),
            None => self.entries.push((key.to_string(), ParamValue::Single(value))),
        }
    }

    /// Set a scalar field, replacing any previous value
    pub fn insert_marker(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(existing, _)| existing == key) {
            Some((_, current)) => *current = ParamValue::Single(value.to_string()),
            None => self
                .entries
                .push((key.to_string(), ParamValue::Single(value.to_string()))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Re-encode into `key=value` pairs, repeating multi-valued keys
    pub fn to_query_string(&self) -> String {
        let mut pairs = Vec::new();
        for (key, value) in &self.entries {
            for item in value.values() {
                pairs.push(format!("{}={}", key, urlencoding::encode(item)));
            }
        }
        pairs.join("&")
    }

    /// JSON text of the mapping, as placed in the `params` form field
    pub fn to_json(&self) -> SharedResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Serialize for QueryParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_pairs() {
        let params = QueryParams::parse("id=42&status=unread").unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("id"), Some(&ParamValue::Single("42".to_string())));
        assert_eq!(params.get("status"), Some(&ParamValue::Single("unread".to_string())));
    }

    #[test]
    fn test_leading_ampersand_is_stripped() {
        let params = QueryParams::parse("&search=cve").unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("search"), Some(&ParamValue::Single("cve".to_string())));
    }

    #[test]
    fn test_duplicate_keys_accumulate_in_order() {
        let params = QueryParams::parse("a=1&a=2&a=3").unwrap();
        assert_eq!(
            params.get("a"),
            Some(&ParamValue::Multi(vec!["1".to_string(), "2".to_string(), "3".to_string()]))
        );
    }

    #[test]
    fn test_value_split_on_first_equals_only() {
        let params = QueryParams::parse("expr=a=b&flag").unwrap();
        assert_eq!(params.get("expr"), Some(&ParamValue::Single("a=b".to_string())));
        assert_eq!(params.get("flag"), Some(&ParamValue::Single(String::new())));
    }

    #[test]
    fn test_values_decoded_exactly_once() {
        // %2541 is an encoded "%41"; decoding twice would yield "A"
        let params = QueryParams::parse("q=%2541&name=J%C3%BCrgen&plus=a+b").unwrap();
        assert_eq!(params.get("q"), Some(&ParamValue::Single("%41".to_string())));
        assert_eq!(params.get("name"), Some(&ParamValue::Single("Jürgen".to_string())));
        assert_eq!(params.get("plus"), Some(&ParamValue::Single("a+b".to_string())));
    }

    #[test]
    fn test_reencode_reproduces_mapping() {
        let raw = "search=heartbleed%20openssl&source=nvd&start=2024-01-01";
        let params = QueryParams::parse(raw).unwrap();
        let again = QueryParams::parse(&params.to_query_string()).unwrap();
        assert_eq!(again, params);
    }

    #[test]
    fn test_json_form_keeps_order_and_lists() {
        let params = QueryParams::parse("status=unread&status=read&page=2").unwrap();
        assert_eq!(params.to_json().unwrap(), r#"{"status":["unread","read"],"page":"2"}"#);
    }

    #[test]
    fn test_insert_marker_overrides_existing_value() {
        let mut params = QueryParams::parse("history_replay=0&x=1").unwrap();
        params.insert_marker(HISTORY_MARKER_KEY, HISTORY_MARKER_VALUE);
        assert_eq!(
            params.get(HISTORY_MARKER_KEY),
            Some(&ParamValue::Single("1".to_string()))
        );
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_empty_query() {
        assert!(QueryParams::parse("").unwrap().is_empty());
        assert_eq!(QueryParams::new().to_json().unwrap(), "{}");
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let result = QueryParams::parse("bad=%FF%FE");
        assert!(matches!(result, Err(SharedError::InvalidEncoding { .. })));
    }
}
