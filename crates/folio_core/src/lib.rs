//! Folio Core
//!
//! Foundational primitives shared by every Folio crate:
//!
//! - **Geometry**: viewport-relative element rectangles, pointer positions
//! - **Event Dispatch**: scroll, resize and pointer events delivered to
//!   listeners whose lifetime is tied to a [`Subscription`] guard
//!
//! # Example
//!
//! ```rust
//! use folio_core::{Event, EventDispatcher, EventType};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let dispatcher = EventDispatcher::new();
//! let seen = Rc::new(Cell::new(0.0));
//!
//! let sink = seen.clone();
//! let subscription = dispatcher.subscribe(EventType::Scroll, move |event| {
//!     if let Event::Scroll { scroll_y } = event {
//!         sink.set(*scroll_y);
//!     }
//! });
//!
//! dispatcher.dispatch(&Event::Scroll { scroll_y: 240.0 });
//! assert_eq!(seen.get(), 240.0);
//!
//! // Dropping the guard deregisters the listener
//! drop(subscription);
//! assert_eq!(dispatcher.listener_count(EventType::Scroll), 0);
//! ```

pub mod events;
pub mod geometry;

pub use events::{Event, EventDispatcher, EventType, ListenerId, Subscription};
pub use geometry::{ElementRect, Point, Viewport};
