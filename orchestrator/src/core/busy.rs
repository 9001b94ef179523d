//! Scoped busy indicator

use crate::traits::PageSurface;

/// Starts the page's busy indicator and stops it when dropped.
///
/// Dropping also happens while unwinding, so a panicking response handler
/// still leaves the indicator stopped.
pub struct BusyGuard<'a, P: PageSurface + ?Sized> {
    page: &'a P,
}

impl<'a, P: PageSurface + ?Sized> BusyGuard<'a, P> {
    pub fn start(page: &'a P) -> Self {
        page.start_busy();
        Self { page }
    }
}

impl<P: PageSurface + ?Sized> Drop for BusyGuard<'_, P> {
    fn drop(&mut self) {
        self.page.stop_busy();
    }
}
