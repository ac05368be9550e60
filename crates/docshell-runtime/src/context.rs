#![forbid(unsafe_code)]

//! The layout context handed to slots, and the scope that carries it.
//!
//! A [`LayoutContext`] is a read snapshot of the provider's state plus a
//! message channel back to it. Slots never mutate layout directly: toggles
//! enqueue a [`LayoutMsg`] that the provider applies on its next pump.
//!
//! Slots obtain the context from a [`RenderScope`]. A scope created outside
//! a provider has no context, and asking it for one is an error naming the
//! consumer:
//!
//! ```
//! use docshell_runtime::context::{LayoutError, RenderScope};
//!
//! let err = RenderScope::root().layout("canvas").unwrap_err();
//! assert!(matches!(err, LayoutError::MissingProvider { .. }));
//! assert!(err.to_string().contains("canvas"));
//! ```

use std::fmt;
use std::sync::mpsc;

use docshell_layout::{Breakpoint, LayoutConfig, LayoutState, PanelSide, ShellLayout};

/// A request from a context consumer to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMsg {
    Toggle(PanelSide),
    SetCollapsed(PanelSide, bool),
}

/// Snapshot of the shared layout state, as seen by slots.
#[derive(Debug, Clone)]
pub struct LayoutContext {
    state: LayoutState,
    config: LayoutConfig,
    shell: ShellLayout,
    sender: mpsc::Sender<LayoutMsg>,
}

impl LayoutContext {
    pub(crate) fn new(
        state: LayoutState,
        config: LayoutConfig,
        shell: ShellLayout,
        sender: mpsc::Sender<LayoutMsg>,
    ) -> Self {
        Self {
            state,
            config,
            shell,
            sender,
        }
    }

    #[must_use]
    pub fn state(&self) -> &LayoutState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Slot placement for this snapshot.
    #[must_use]
    pub fn shell(&self) -> &ShellLayout {
        &self.shell
    }

    #[must_use]
    pub fn breakpoint(&self) -> Breakpoint {
        self.state.breakpoint()
    }

    #[must_use]
    pub fn is_mobile(&self) -> bool {
        self.state.is_mobile()
    }

    #[must_use]
    pub fn is_tablet(&self) -> bool {
        self.state.is_tablet()
    }

    #[must_use]
    pub fn is_desktop(&self) -> bool {
        self.state.is_desktop()
    }

    #[must_use]
    pub fn navigation_collapsed(&self) -> bool {
        self.state.navigation_collapsed()
    }

    #[must_use]
    pub fn intelligence_collapsed(&self) -> bool {
        self.state.intelligence_collapsed()
    }

    #[must_use]
    pub fn navigation_width(&self) -> u16 {
        self.state.width(PanelSide::Navigation)
    }

    #[must_use]
    pub fn intelligence_width(&self) -> u16 {
        self.state.width(PanelSide::Intelligence)
    }

    #[must_use]
    pub fn viewport_width(&self) -> u16 {
        self.state.viewport_width()
    }

    #[must_use]
    pub fn viewport_height(&self) -> u16 {
        self.state.viewport_height()
    }

    /// Ask the provider to flip the navigation panel.
    pub fn toggle_navigation(&self) {
        self.send(LayoutMsg::Toggle(PanelSide::Navigation));
    }

    /// Ask the provider to flip the intelligence panel.
    pub fn toggle_intelligence(&self) {
        self.send(LayoutMsg::Toggle(PanelSide::Intelligence));
    }

    pub fn set_collapsed(&self, panel: PanelSide, collapsed: bool) {
        self.send(LayoutMsg::SetCollapsed(panel, collapsed));
    }

    fn send(&self, msg: LayoutMsg) {
        if self.sender.send(msg).is_err() {
            tracing::debug!(?msg, "layout provider unmounted; message dropped");
        }
    }
}

/// Render-time scope carrying the layout context, if any.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderScope<'a> {
    layout: Option<&'a LayoutContext>,
}

impl<'a> RenderScope<'a> {
    /// A scope with no provider above it.
    #[must_use]
    pub fn root() -> Self {
        Self { layout: None }
    }

    /// A scope inside a provider.
    #[must_use]
    pub fn with_layout(layout: &'a LayoutContext) -> Self {
        Self {
            layout: Some(layout),
        }
    }

    /// Whether a provider is in scope.
    #[must_use]
    pub fn has_layout(&self) -> bool {
        self.layout.is_some()
    }

    /// Consume the layout context on behalf of `consumer`.
    pub fn layout(&self, consumer: &str) -> Result<&'a LayoutContext, LayoutError> {
        self.layout.ok_or_else(|| LayoutError::MissingProvider {
            consumer: consumer.to_owned(),
        })
    }
}

/// Errors raised by layout context consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The context was consumed outside any provider.
    MissingProvider { consumer: String },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingProvider { consumer } => write!(
                f,
                "layout context requested by `{consumer}` outside of a LayoutProvider; \
                 render it inside a provider scope"
            ),
        }
    }
}

impl std::error::Error for LayoutError {}
