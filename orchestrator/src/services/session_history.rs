//! In-memory browser history
//!
//! Mirrors the browser's session history: a stack of entries with a cursor.
//! The stack starts with one entry without state (the page as first opened).

use std::sync::{Arc, PoisonError, RwLock};

use shared::RequestDescriptor;

use crate::traits::HistoryStore;
use crate::types::Navigation;

#[derive(Debug)]
struct Stack {
    entries: Vec<Option<RequestDescriptor>>,
    cursor: usize,
}

impl Default for Stack {
    fn default() -> Self {
        Self {
            entries: vec![None],
            cursor: 0,
        }
    }
}

/// Session history; clones share the same stack
#[derive(Debug, Clone, Default)]
pub struct SessionHistory {
    stack: Arc<RwLock<Stack>>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries, including the initial stateless one
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.stack.read().unwrap_or_else(PoisonError::into_inner).entries.len()
    }

    pub fn cursor(&self) -> usize {
        self.stack.read().unwrap_or_else(PoisonError::into_inner).cursor
    }

    /// State of the entry under the cursor
    pub fn current(&self) -> Option<RequestDescriptor> {
        let stack = self.stack.read().unwrap_or_else(PoisonError::into_inner);
        stack.entries[stack.cursor].clone()
    }

    pub fn entries(&self) -> Vec<Option<RequestDescriptor>> {
        self.stack.read().unwrap_or_else(PoisonError::into_inner).entries.clone()
    }
}

impl HistoryStore for SessionHistory {
    fn push(&self, state: RequestDescriptor) {
        let mut stack = self.stack.write().unwrap_or_else(PoisonError::into_inner);
        let keep = stack.cursor + 1;
        // Pushing drops any forward entries
        stack.entries.truncate(keep);
        stack.entries.push(Some(state));
        stack.cursor = keep;
    }

    fn replace(&self, state: RequestDescriptor) {
        let mut stack = self.stack.write().unwrap_or_else(PoisonError::into_inner);
        let cursor = stack.cursor;
        stack.entries[cursor] = Some(state);
    }

    fn back(&self) -> Navigation {
        let mut stack = self.stack.write().unwrap_or_else(PoisonError::into_inner);
        if stack.cursor == 0 {
            return Navigation::LeftApplication;
        }
        stack.cursor -= 1;
        Navigation::Entry(stack.entries[stack.cursor].clone())
    }

    fn forward(&self) -> Navigation {
        let mut stack = self.stack.write().unwrap_or_else(PoisonError::into_inner);
        if stack.cursor + 1 >= stack.entries.len() {
            return Navigation::LeftApplication;
        }
        stack.cursor += 1;
        Navigation::Entry(stack.entries[stack.cursor].clone())
    }
}
