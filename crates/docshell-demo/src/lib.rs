#![forbid(unsafe_code)]

//! Headless walkthrough of the docshell layout.
//!
//! The demo plays the host: it owns an [`EventHub`](docshell_runtime::EventHub),
//! mounts a provider, feeds it a scripted sequence of pointer, key and
//! viewport events, and renders the shell into a text buffer after each
//! step. Sizes are in terminal cells, so the bundled config scales the
//! pixel defaults down.

pub mod env;
pub mod scenario;
pub mod views;

use docshell_layout::{LayoutConfig, LayoutConfigError};

/// Cell-scale layout constants for a terminal-sized viewport.
pub const DEMO_CONFIG: &str = r#"
navigation_min_width = 16
navigation_max_width = 36
navigation_default_width = 22
intelligence_min_width = 20
intelligence_max_width = 44
intelligence_default_width = 28
mobile_breakpoint_px = 60
desktop_breakpoint_px = 100
collapsed_width_px = 3
header_height = 2
resize_debounce_ms = 120
"#;

/// The bundled demo config.
pub fn demo_config() -> Result<LayoutConfig, LayoutConfigError> {
    LayoutConfig::from_toml_str(DEMO_CONFIG)
}
