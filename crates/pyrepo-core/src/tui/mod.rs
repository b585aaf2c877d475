//! CLI output using cliclack (Charm-style inline logs)
//!
//! This module is optional and only available when the `tui` feature is enabled.

#[cfg(feature = "tui")]
mod session;

#[cfg(feature = "tui")]
pub use session::{run, ClackReporter};
