#![forbid(unsafe_code)]

//! Runtime for the docshell adaptive layout.
//!
//! # Key Components
//!
//! - [`LayoutProvider`] - owns the layout state and applies every change
//! - [`LayoutContext`] - the snapshot + toggles slots consume
//! - [`RenderScope`] - carries the context to slots; fails fast without one
//! - [`EventHub`] - host window/document listener registry
//! - [`SlotRegistry`] - composes slot views into a [`TextBuffer`]
//! - [`StorageBackend`] - optional persistence of panel preferences
//!
//! # Role in docshell
//! `docshell-runtime` is the stateful layer. `docshell-layout` decides what
//! a given state looks like; this crate decides when the state changes and
//! who hears about it.

pub mod buffer;
pub mod context;
pub mod hub;
pub mod persistence;
pub mod provider;
pub mod slot;

pub use buffer::TextBuffer;
pub use context::{LayoutContext, LayoutError, LayoutMsg, RenderScope};
pub use hub::{EventHub, ListenTarget, Listener, ListenerGuard};
pub use persistence::{FileStorage, MemoryStorage, StorageBackend, StorageError, StorageResult};
pub use provider::LayoutProvider;
pub use slot::{SlotChrome, SlotFrame, SlotRegistry, SlotView};
