#![forbid(unsafe_code)]

//! Environment knobs for the demo binary.
//!
//! - `DOCSHELL_DEMO_COLS` / `DOCSHELL_DEMO_ROWS`: initial viewport size
//! - `DOCSHELL_LOG_JSON`: emit logs as JSON lines
//! - `RUST_LOG`: standard tracing filter

use std::env;

/// Default viewport when no override is set.
pub const DEFAULT_SIZE: (u16, u16) = (120, 16);

/// Parse a boolean environment flag.
///
/// Accepts "1" or "true" (case-insensitive) as enabled.
pub fn env_flag(name: &str) -> bool {
    env_flag_with(name, &env_get)
}

/// Initial viewport size in cells.
pub fn demo_viewport() -> (u16, u16) {
    demo_viewport_with(&env_get)
}

/// Whether logs should be JSON formatted.
pub fn log_json() -> bool {
    env_flag("DOCSHELL_LOG_JSON")
}

fn env_get(name: &str) -> Option<String> {
    env::var(name).ok()
}

fn env_flag_with<F: Fn(&str) -> Option<String>>(name: &str, get: &F) -> bool {
    get(name)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn env_u16_with<F: Fn(&str) -> Option<String>>(name: &str, get: &F) -> Option<u16> {
    get(name).and_then(|value| value.trim().parse::<u16>().ok())
}

fn demo_viewport_with<F: Fn(&str) -> Option<String>>(get: &F) -> (u16, u16) {
    let (cols, rows) = DEFAULT_SIZE;
    (
        env_u16_with("DOCSHELL_DEMO_COLS", get)
            .filter(|&c| c > 0)
            .unwrap_or(cols),
        env_u16_with("DOCSHELL_DEMO_ROWS", get)
            .filter(|&r| r > 0)
            .unwrap_or(rows),
    )
}
