//! Color utilities for CLI output

use console::{Style, StyledObject};

/// Style a systemd state string with appropriate colors
///
/// - "active", "enabled" -> green bold
/// - "failed" -> red
/// - "activating", "deactivating", "reloading" -> yellow
/// - other ("inactive", "disabled", "unknown", ...) -> dim
pub fn state_style(state: &str) -> StyledObject<String> {
    let style = match state.to_lowercase().as_str() {
        "active" | "enabled" => Style::new().green().bold(),
        "failed" => Style::new().red(),
        "activating" | "deactivating" | "reloading" => Style::new().yellow(),
        _ => Style::new().dim(),
    };
    style.apply_to(state.to_string())
}
