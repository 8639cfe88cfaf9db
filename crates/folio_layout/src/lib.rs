//! Folio View-State Engine
//!
//! Headless state behind the portfolio page's scroll choreography:
//!
//! - **Visibility**: which tracked elements have crossed the reveal threshold
//! - **Reveal store**: arena of tracked elements with one-shot or repeatable
//!   revealed flags
//! - **Observer**: lifecycle-scoped service coalescing scroll/resize bursts
//!   into one evaluation per frame
//! - **Sections**: active navigation section under a probe line
//! - **Tabs**: content switcher that replays entrances on selection
//! - **Navigation menu** and **cursor follower** state
//!
//! # Example
//!
//! ```rust
//! use folio_core::{ElementRect, Event, EventDispatcher, Viewport};
//! use folio_layout::{RevealObserver, TrackedElement, VisibilityTracker};
//!
//! let dispatcher = EventDispatcher::new();
//! let observer = RevealObserver::new(Viewport::new(1280.0, 1000.0), VisibilityTracker::default());
//! let scroll = observer.scroll_position();
//!
//! let card = observer.register(TrackedElement::new(
//!     "project-card",
//!     scroll.anchor(ElementRect::with_height(1600.0, 400.0)),
//! ));
//!
//! let lease = observer.acquire(&dispatcher);
//! observer.run_frame();
//! assert!(!observer.is_revealed(card));
//!
//! dispatcher.dispatch(&Event::Scroll { scroll_y: 900.0 });
//! observer.run_frame();
//! assert!(observer.is_revealed(card));
//! drop(lease);
//! ```

pub mod cursor;
pub mod element;
pub mod nav;
pub mod observer;
pub mod reveal;
pub mod sections;
pub mod tabs;
pub mod visibility;

pub use cursor::{CursorFollower, CursorStyle, CursorVariant, Rgba};
pub use element::{BoundsProvider, DocumentAnchored, ElementId, RevealMode, ScrollPosition, TrackedElement};
pub use nav::NavMenu;
pub use observer::{ObserverLease, RevealObserver};
pub use reveal::{RevealStore, RevealTransition};
pub use sections::{is_scrolled, scroll_progress, section_at, Section, SectionResolver, NAV_SECTIONS};
pub use tabs::{AboutTab, Tab, TabGroup};
pub use visibility::{evaluate, is_visible, RevealChanges, VisibilityTracker, DEFAULT_THRESHOLD, TITLE_THRESHOLD};
