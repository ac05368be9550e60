#![forbid(unsafe_code)]

//! Host listener registry.
//!
//! The host owns two global event targets: the window (viewport resizes and
//! keys) and the document (the pointer stream). Code that wants those events
//! calls [`EventHub::listen`] and gets a [`Listener`]: a channel receiver
//! plus a [`ListenerGuard`] that deregisters on drop.
//!
//! The hub is a cloneable handle around shared state, so the host, the
//! provider and tests all see the same registrations:
//!
//! ```
//! use docshell_core::event::Event;
//! use docshell_runtime::hub::{EventHub, ListenTarget};
//!
//! let hub = EventHub::new();
//! let listener = hub.listen(ListenTarget::Window);
//! assert_eq!(hub.listener_count(ListenTarget::Window), 1);
//!
//! hub.emit(Event::Resize { width: 800, height: 600 });
//! assert_eq!(listener.drain().len(), 1);
//!
//! drop(listener);
//! assert_eq!(hub.listener_count(ListenTarget::Window), 0);
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak, mpsc};

use docshell_core::event::Event;

/// A global host event target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenTarget {
    /// Viewport resizes and keyboard input.
    Window,
    /// Pointer input anywhere in the document.
    Document,
}

impl ListenTarget {
    pub const ALL: [ListenTarget; 2] = [Self::Window, Self::Document];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Window => "window",
            Self::Document => "document",
        }
    }

    /// Which target an event is dispatched on.
    #[must_use]
    pub const fn for_event(event: &Event) -> Self {
        match event {
            Event::Mouse(_) => Self::Document,
            Event::Key(_) | Event::Resize { .. } => Self::Window,
        }
    }
}

impl fmt::Display for ListenTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug)]
struct Registration {
    id: u64,
    target: ListenTarget,
    sender: mpsc::Sender<Event>,
}

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    registrations: Vec<Registration>,
}

/// Shared handle to the host's listener registry.
#[derive(Debug, Clone, Default)]
pub struct EventHub {
    inner: Arc<Mutex<Registry>>,
}

impl EventHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener on `target`.
    #[must_use = "dropping the listener deregisters it immediately"]
    pub fn listen(&self, target: ListenTarget) -> Listener {
        let (sender, receiver) = mpsc::channel();
        let mut registry = self.lock();
        registry.next_id += 1;
        let id = registry.next_id;
        registry.registrations.push(Registration {
            id,
            target,
            sender,
        });
        tracing::trace!(id, target = target.label(), "listener registered");
        Listener {
            receiver,
            guard: ListenerGuard {
                id,
                target,
                registry: Arc::downgrade(&self.inner),
            },
        }
    }

    /// Dispatch an event to every listener on its target.
    ///
    /// Returns the number of listeners that received it. Registrations whose
    /// receiver is gone are pruned.
    pub fn emit(&self, event: Event) -> usize {
        let target = ListenTarget::for_event(&event);
        let mut registry = self.lock();
        let mut delivered = 0;
        registry.registrations.retain(|reg| {
            if reg.target != target {
                return true;
            }
            match reg.sender.send(event.clone()) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(_) => false,
            }
        });
        delivered
    }

    /// Number of live registrations on `target`.
    #[must_use]
    pub fn listener_count(&self, target: ListenTarget) -> usize {
        self.lock()
            .registrations
            .iter()
            .filter(|reg| reg.target == target)
            .count()
    }

    /// Number of live registrations across all targets.
    #[must_use]
    pub fn total_listeners(&self) -> usize {
        self.lock().registrations.len()
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Deregisters a listener when dropped.
#[derive(Debug)]
pub struct ListenerGuard {
    id: u64,
    target: ListenTarget,
    registry: Weak<Mutex<Registry>>,
}

impl ListenerGuard {
    #[must_use]
    pub fn target(&self) -> ListenTarget {
        self.target
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        // The hub may already be gone; nothing to deregister then.
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut registry = registry.lock().unwrap_or_else(PoisonError::into_inner);
        registry.registrations.retain(|reg| reg.id != self.id);
        tracing::trace!(
            id = self.id,
            target = self.target.label(),
            "listener released"
        );
    }
}

/// A live registration: events arrive on the receiver until dropped.
#[derive(Debug)]
pub struct Listener {
    receiver: mpsc::Receiver<Event>,
    guard: ListenerGuard,
}

impl Listener {
    #[must_use]
    pub fn target(&self) -> ListenTarget {
        self.guard.target()
    }

    /// Take every event delivered so far, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<Event> {
        self.receiver.try_iter().collect()
    }
}
