//! In-memory page model
//!
//! Keeps region markup, badges, widget bindings and indicator state so the
//! orchestrator can run outside a browser (CLI, tests, server-side rendering).

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

use crate::traits::PageSurface;
use crate::types::Region;

/// Widget bindings performed on a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    DatePickers,
    TransferButtons,
    TransferDoubleClick,
    Pagination,
}

/// Unread badge: displayed text plus the mirrored data attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub text: String,
    pub data_count: u64,
}

#[derive(Debug, Default)]
struct PageModel {
    regions: HashMap<Region, String>,
    bindings: Vec<(Region, Binding)>,
    badges: BTreeMap<String, Badge>,
    error: Option<String>,
    // Calls currently holding the indicator; shown while non-zero
    busy_depth: u32,
    busy_starts: u32,
    dialog_open: bool,
    advanced: u32,
    shortcut_hint_visible: bool,
    navigated_to: Option<String>,
}

/// Headless `PageSurface`; clones share the same page
#[derive(Debug, Clone, Default)]
pub struct HeadlessPage {
    model: Arc<RwLock<PageModel>>,
    keyboard_shortcuts: bool,
}

impl HeadlessPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page where a keyboard-shortcut library is loaded
    pub fn with_keyboard_shortcuts() -> Self {
        Self {
            keyboard_shortcuts: true,
            ..Self::default()
        }
    }

    /// Open a dialog, as a module script would before dispatching into it
    pub fn open_dialog(&self, html: &str) {
        let mut model = self.write();
        model.dialog_open = true;
        model.regions.insert(Region::Dialog, html.to_string());
    }

    pub fn region(&self, region: Region) -> Option<String> {
        self.read().regions.get(&region).cloned()
    }

    pub fn bindings(&self, region: Region) -> Vec<Binding> {
        self.read()
            .bindings
            .iter()
            .filter(|(bound, _)| *bound == region)
            .map(|(_, binding)| *binding)
            .collect()
    }

    pub fn badge(&self, category: &str) -> Option<Badge> {
        self.read().badges.get(category).cloned()
    }

    pub fn error(&self) -> Option<String> {
        self.read().error.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.read().busy_depth > 0
    }

    /// How many times the busy indicator was started
    pub fn busy_starts(&self) -> u32 {
        self.read().busy_starts
    }

    pub fn is_dialog_open(&self) -> bool {
        self.read().dialog_open
    }

    /// How many times the advance-to-next-item hook ran
    pub fn advanced_count(&self) -> u32 {
        self.read().advanced
    }

    pub fn is_shortcut_hint_visible(&self) -> bool {
        self.read().shortcut_hint_visible
    }

    pub fn navigated_to(&self) -> Option<String> {
        self.read().navigated_to.clone()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, PageModel> {
        self.model.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, PageModel> {
        self.model.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn bind(&self, region: Region, binding: Binding) {
        self.write().bindings.push((region, binding));
    }
}

impl PageSurface for HeadlessPage {
    fn clear_error(&self) {
        self.write().error = None;
    }

    fn show_error(&self, html: &str) {
        let mut model = self.write();
        model.error = Some(html.to_string());
        model.regions.insert(Region::Content, html.to_string());
    }

    fn start_busy(&self) {
        let mut model = self.write();
        model.busy_depth += 1;
        model.busy_starts += 1;
    }

    fn stop_busy(&self) {
        let mut model = self.write();
        model.busy_depth = model.busy_depth.saturating_sub(1);
    }

    fn replace_region(&self, region: Region, html: &str) {
        let mut model = self.write();
        if region == Region::Dialog {
            model.dialog_open = true;
        }
        model.regions.insert(region, html.to_string());
    }

    fn bind_date_pickers(&self, region: Region) {
        self.bind(region, Binding::DatePickers);
    }

    fn bind_transfer_buttons(&self, region: Region) {
        self.bind(region, Binding::TransferButtons);
    }

    fn bind_transfer_double_click(&self, region: Region) {
        self.bind(region, Binding::TransferDoubleClick);
    }

    fn bind_pagination(&self, region: Region) {
        self.bind(region, Binding::Pagination);
    }

    fn has_keyboard_shortcuts(&self) -> bool {
        self.keyboard_shortcuts
    }

    fn set_shortcut_hint_visible(&self, visible: bool) {
        self.write().shortcut_hint_visible = visible;
    }

    fn set_unread_count(&self, category: &str, count: u64) {
        self.write().badges.insert(
            category.to_string(),
            Badge {
                text: count.to_string(),
                data_count: count,
            },
        );
    }

    fn close_dialog(&self) {
        let mut model = self.write();
        model.dialog_open = false;
        model.regions.remove(&Region::Dialog);
    }

    fn advance_to_next_item(&self) {
        self.write().advanced += 1;
    }

    fn navigate_to(&self, url: &str) {
        self.write().navigated_to = Some(url.to_string());
    }
}
