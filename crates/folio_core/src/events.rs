//! Lifecycle-scoped event dispatch
//!
//! Replaces document-level listeners with an injected dispatcher. Every
//! listener is owned by a [`Subscription`] guard; dropping the guard
//! deregisters the listener, so a component that is torn down cannot leak
//! its scroll or pointer handlers.
//!
//! The dispatcher is single-threaded: handlers are `Rc` closures and the
//! listener table lives in a `RefCell`. Handlers may subscribe or drop
//! subscriptions while an event is being dispatched.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::geometry::{Point, Viewport};

new_key_type! {
    /// Handle to a registered listener
    pub struct ListenerId;
}

/// Kinds of events a listener can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Scroll,
    Resize,
    MouseMove,
    MouseDown,
    MouseUp,
    /// Pointer entered an interactive element (link, button, input)
    InteractiveEnter,
    /// Pointer left an interactive element
    InteractiveLeave,
    /// Pointer re-entered the document
    DocumentEnter,
    /// Pointer left the document
    DocumentLeave,
}

/// An input event delivered to listeners
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Scroll {
        scroll_y: f32,
    },
    Resize {
        viewport: Viewport,
    },
    MouseMove {
        position: Point,
    },
    /// `path` lists the keys of the tagged regions containing the target,
    /// innermost first (the equivalent of walking `closest()` upwards).
    MouseDown {
        position: Point,
        path: SmallVec<[String; 4]>,
    },
    MouseUp {
        position: Point,
    },
    InteractiveEnter,
    InteractiveLeave,
    DocumentEnter,
    DocumentLeave,
}

impl Event {
    pub fn event_type(&self) -> EventType {
        match self {
            Event::Scroll { .. } => EventType::Scroll,
            Event::Resize { .. } => EventType::Resize,
            Event::MouseMove { .. } => EventType::MouseMove,
            Event::MouseDown { .. } => EventType::MouseDown,
            Event::MouseUp { .. } => EventType::MouseUp,
            Event::InteractiveEnter => EventType::InteractiveEnter,
            Event::InteractiveLeave => EventType::InteractiveLeave,
            Event::DocumentEnter => EventType::DocumentEnter,
            Event::DocumentLeave => EventType::DocumentLeave,
        }
    }

    /// Pointer-down with no tagged regions on its path
    pub fn mouse_down(position: Point) -> Self {
        Event::MouseDown {
            position,
            path: SmallVec::new(),
        }
    }

    /// Pointer-down whose target sits inside the given regions
    pub fn mouse_down_within<I, S>(position: Point, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Event::MouseDown {
            position,
            path: regions.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether a pointer-down target lies inside the region with `key`
    ///
    /// Always false for events other than `MouseDown`.
    pub fn is_within(&self, key: &str) -> bool {
        match self {
            Event::MouseDown { path, .. } => path.iter().any(|region| region == key),
            _ => false,
        }
    }
}

type Handler = Rc<dyn Fn(&Event)>;

struct Listener {
    event_type: EventType,
    handler: Handler,
}

#[derive(Default)]
struct ListenerTable {
    listeners: SlotMap<ListenerId, Listener>,
}

/// Dispatches events to subscribed listeners
///
/// Cloning the dispatcher yields another handle to the same listener table.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    table: Rc<RefCell<ListenerTable>>,
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("listeners", &self.total_listeners())
            .finish()
    }
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for `event_type`
    ///
    /// The listener stays registered until the returned guard is dropped.
    pub fn subscribe<F>(&self, event_type: EventType, handler: F) -> Subscription
    where
        F: Fn(&Event) + 'static,
    {
        let id = self.table.borrow_mut().listeners.insert(Listener {
            event_type,
            handler: Rc::new(handler),
        });
        tracing::trace!("listener {:?} subscribed to {:?}", id, event_type);

        Subscription {
            id,
            table: Rc::downgrade(&self.table),
        }
    }

    /// Deliver an event to every listener of its type
    ///
    /// Returns the number of listeners invoked.
    pub fn dispatch(&self, event: &Event) -> usize {
        let event_type = event.event_type();

        // Snapshot the handlers so listeners can (un)subscribe re-entrantly
        let handlers: SmallVec<[Handler; 8]> = self
            .table
            .borrow()
            .listeners
            .values()
            .filter(|listener| listener.event_type == event_type)
            .map(|listener| Rc::clone(&listener.handler))
            .collect();

        for handler in &handlers {
            handler(event);
        }
        handlers.len()
    }

    /// Number of listeners registered for `event_type`
    pub fn listener_count(&self, event_type: EventType) -> usize {
        self.table
            .borrow()
            .listeners
            .values()
            .filter(|listener| listener.event_type == event_type)
            .count()
    }

    /// Number of listeners registered across all event types
    pub fn total_listeners(&self) -> usize {
        self.table.borrow().listeners.len()
    }
}

/// Guard owning a registered listener
///
/// Dropping the guard deregisters the listener. If the dispatcher is gone
/// already, dropping is a no-op.
#[must_use = "dropping a Subscription immediately deregisters its listener"]
pub struct Subscription {
    id: ListenerId,
    table: Weak<RefCell<ListenerTable>>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Subscription {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Whether the listener is still registered with a live dispatcher
    pub fn is_active(&self) -> bool {
        self.table
            .upgrade()
            .map(|table| table.borrow().listeners.contains_key(self.id))
            .unwrap_or(false)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(table) = self.table.upgrade() {
            if table.borrow_mut().listeners.remove(self.id).is_some() {
                tracing::trace!("listener {:?} unsubscribed", self.id);
            }
        }
    }
}
