#![forbid(unsafe_code)]

//! Layout configuration as data.
//!
//! Panel width bounds and breakpoint thresholds are configuration constants,
//! not runtime inputs. [`LayoutConfig`] groups them into one struct that can
//! be loaded from TOML or JSON at startup.
//!
//! # Loading
//!
//! ```toml
//! # docshell-layout.toml
//! navigation_min_width = 200
//! navigation_max_width = 420
//! mobile_breakpoint_px = 720
//! ```
//!
//! ```rust,ignore
//! let config = LayoutConfig::from_toml_file("docshell-layout.toml")?;
//! let config = LayoutConfig::from_json_str(json)?;
//! ```
//!
//! Missing keys take their [`Default`] value; every loader validates before
//! returning.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Breakpoints;
use crate::panel::{PanelBounds, PanelSide};

/// Tunable layout constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Narrowest expanded navigation panel.
    pub navigation_min_width: u16,
    /// Widest expanded navigation panel.
    pub navigation_max_width: u16,
    /// Navigation width before the user drags it.
    pub navigation_default_width: u16,
    /// Narrowest expanded intelligence panel.
    pub intelligence_min_width: u16,
    /// Widest expanded intelligence panel.
    pub intelligence_max_width: u16,
    /// Intelligence width before the user drags it.
    pub intelligence_default_width: u16,
    /// Viewport widths below this are mobile.
    pub mobile_breakpoint_px: u16,
    /// Viewport widths at or above this are desktop.
    pub desktop_breakpoint_px: u16,
    /// Width of a collapsed panel rail on tablet and desktop.
    pub collapsed_width_px: u16,
    /// Fixed header height.
    pub header_height: u16,
    /// Quiet period before a viewport resize is applied.
    pub resize_debounce_ms: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            navigation_min_width: 180,
            navigation_max_width: 400,
            navigation_default_width: 240,
            intelligence_min_width: 280,
            intelligence_max_width: 560,
            intelligence_default_width: 360,
            mobile_breakpoint_px: Breakpoints::DEFAULT.mobile,
            desktop_breakpoint_px: Breakpoints::DEFAULT.desktop,
            collapsed_width_px: 48,
            header_height: 56,
            resize_debounce_ms: 120,
        }
    }
}

impl LayoutConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, LayoutConfigError> {
        let config: Self = toml::from_str(s).map_err(LayoutConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, LayoutConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(LayoutConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, LayoutConfigError> {
        let config: Self = serde_json::from_str(s).map_err(LayoutConfigError::Json)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, LayoutConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(LayoutConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Load from a file, picking the format from its extension
    /// (`.json` is JSON, anything else is TOML).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LayoutConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for panel in PanelSide::ALL {
            let (min, max, default) = self.raw_widths(panel);
            if max == 0 {
                errors.push(format!("{panel}_max_width must be > 0"));
            }
            if min > max {
                errors.push(format!(
                    "{panel}_min_width ({min}) must be <= {panel}_max_width ({max})"
                ));
            } else if default < min || default > max {
                errors.push(format!(
                    "{panel}_default_width ({default}) must be within [{min}, {max}]"
                ));
            }
            if self.collapsed_width_px > min {
                errors.push(format!(
                    "collapsed_width_px ({}) must be <= {panel}_min_width ({min})",
                    self.collapsed_width_px
                ));
            }
        }

        if self.mobile_breakpoint_px > self.desktop_breakpoint_px {
            errors.push(format!(
                "mobile_breakpoint_px ({}) must be <= desktop_breakpoint_px ({})",
                self.mobile_breakpoint_px, self.desktop_breakpoint_px
            ));
        }

        errors
    }

    /// Validate, converting a non-empty error list into an error.
    pub fn validated(self) -> Result<Self, LayoutConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(LayoutConfigError::Validation(errors))
        }
    }

    /// Breakpoint thresholds.
    #[must_use]
    pub fn breakpoints(&self) -> Breakpoints {
        Breakpoints::new(self.mobile_breakpoint_px, self.desktop_breakpoint_px)
    }

    /// Width bounds for a panel.
    #[must_use]
    pub fn bounds(&self, panel: PanelSide) -> PanelBounds {
        let (min, max, _) = self.raw_widths(panel);
        PanelBounds::new(min, max)
    }

    /// Initial width for a panel, clamped into its bounds.
    #[must_use]
    pub fn default_width(&self, panel: PanelSide) -> u16 {
        let (_, _, default) = self.raw_widths(panel);
        self.bounds(panel).clamp(default)
    }

    /// Resize quiet period.
    #[must_use]
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    fn raw_widths(&self, panel: PanelSide) -> (u16, u16, u16) {
        match panel {
            PanelSide::Navigation => (
                self.navigation_min_width,
                self.navigation_max_width,
                self.navigation_default_width,
            ),
            PanelSide::Intelligence => (
                self.intelligence_min_width,
                self.intelligence_max_width,
                self.intelligence_default_width,
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from loading a [`LayoutConfig`].
#[derive(Debug)]
pub enum LayoutConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    Toml(toml::de::Error),
    /// JSON parse error.
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for LayoutConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for LayoutConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
