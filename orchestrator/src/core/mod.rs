//! Core dispatch helpers
//!
//! Pure logic with no I/O of its own: the scoped busy indicator and the
//! failure block renderer.

pub mod busy;
pub mod error_block;

pub use busy::BusyGuard;
pub use error_block::{FLAVOR_LINES, render_error_block};
