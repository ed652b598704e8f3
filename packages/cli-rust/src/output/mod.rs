//! Output utilities for CLI commands
//!
//! Terminal helpers: a spinner for systemctl round-trips, color styling
//! for systemd states, and error formatting with actionable tips.

pub mod colors;
pub mod errors;
pub mod spinner;

pub use colors::state_style;
pub use errors::{exit_code, show_error};
pub use spinner::CommandSpinner;
