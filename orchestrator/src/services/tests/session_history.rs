//! Tests for SessionHistory

use shared::RequestDescriptor;

use crate::services::SessionHistory;
use crate::traits::HistoryStore;
use crate::types::Navigation;

fn descriptor(action: &str) -> RequestDescriptor {
    RequestDescriptor::new("assess", "assess", action)
}

#[test]
fn test_starts_with_stateless_entry() {
    let history = SessionHistory::new();
    assert_eq!(history.len(), 1);
    assert_eq!(history.cursor(), 0);
    assert!(history.current().is_none());
}

#[test]
fn test_push_moves_cursor() {
    let history = SessionHistory::new();
    history.push(descriptor("displayAssess"));
    history.push(descriptor("search"));

    assert_eq!(history.len(), 3);
    assert_eq!(history.cursor(), 2);
    assert_eq!(history.current(), Some(descriptor("search")));
}

#[test]
fn test_replace_keeps_length() {
    let history = SessionHistory::new();
    history.replace(descriptor("displayAssess"));

    assert_eq!(history.len(), 1);
    assert_eq!(history.current(), Some(descriptor("displayAssess")));
}

#[test]
fn test_back_and_forward() {
    let history = SessionHistory::new();
    history.push(descriptor("first"));
    history.push(descriptor("second"));

    assert_eq!(history.back(), Navigation::Entry(Some(descriptor("first"))));
    assert_eq!(history.back(), Navigation::Entry(None));
    assert_eq!(history.back(), Navigation::LeftApplication);

    assert_eq!(history.forward(), Navigation::Entry(Some(descriptor("first"))));
    assert_eq!(history.forward(), Navigation::Entry(Some(descriptor("second"))));
    assert_eq!(history.forward(), Navigation::LeftApplication);
}

#[test]
fn test_push_after_back_drops_forward_entries() {
    let history = SessionHistory::new();
    history.push(descriptor("first"));
    history.push(descriptor("second"));
    history.back();
    history.push(descriptor("third"));

    assert_eq!(
        history.entries(),
        vec![None, Some(descriptor("first")), Some(descriptor("third"))]
    );
    assert_eq!(history.forward(), Navigation::LeftApplication);
}
