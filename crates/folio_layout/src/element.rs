//! Tracked elements
//!
//! A tracked element is the behavioural shadow of a presentational node that
//! plays an entrance animation. It is created when the node mounts and
//! removed when it unmounts; its position is read through a
//! [`BoundsProvider`] instead of querying markup on every scroll.

use std::cell::Cell;
use std::rc::Rc;

use folio_core::ElementRect;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Handle to a tracked element in the reveal store
    pub struct ElementId;
}

/// How an element's revealed flag follows its visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealMode {
    /// Play once and lock: revealed never goes back to false
    #[default]
    OneShot,
    /// Toggle with scroll position: revealed mirrors visibility
    Repeatable,
}

/// Source of an element's viewport-relative position
///
/// Returning `None` means the node is not laid out (or not present); the
/// element is skipped for that pass.
pub trait BoundsProvider {
    fn bounds(&self) -> Option<ElementRect>;
}

impl<F> BoundsProvider for F
where
    F: Fn() -> Option<ElementRect>,
{
    fn bounds(&self) -> Option<ElementRect> {
        self()
    }
}

/// Shared document scroll offset
///
/// Cheap to clone; every clone observes the same value. Scroll listeners
/// write it, document-anchored bounds providers read it.
#[derive(Debug, Clone, Default)]
pub struct ScrollPosition(Rc<Cell<f32>>);

impl ScrollPosition {
    pub fn new(scroll_y: f32) -> Self {
        Self(Rc::new(Cell::new(scroll_y)))
    }

    pub fn get(&self) -> f32 {
        self.0.get()
    }

    pub fn set(&self, scroll_y: f32) {
        self.0.set(scroll_y);
    }

    /// Bounds provider for an element laid out at a fixed document offset
    pub fn anchor(&self, document_rect: ElementRect) -> DocumentAnchored {
        DocumentAnchored {
            document_rect,
            scroll: self.clone(),
        }
    }
}

/// Element at a fixed document position, projected into the viewport
#[derive(Debug, Clone)]
pub struct DocumentAnchored {
    document_rect: ElementRect,
    scroll: ScrollPosition,
}

impl DocumentAnchored {
    pub fn document_rect(&self) -> ElementRect {
        self.document_rect
    }
}

impl BoundsProvider for DocumentAnchored {
    fn bounds(&self) -> Option<ElementRect> {
        Some(self.document_rect.relative_to_scroll(self.scroll.get()))
    }
}

/// An element registered for scroll reveal
pub struct TrackedElement {
    pub(crate) key: String,
    pub(crate) bounds: Box<dyn BoundsProvider>,
    pub(crate) mode: RevealMode,
    /// Overrides the evaluation threshold (title underlines use 0.5)
    pub(crate) threshold: Option<f32>,
    pub(crate) revealed: bool,
    /// Children of unselected tabs are not evaluated
    pub(crate) suspended: bool,
}

impl std::fmt::Debug for TrackedElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackedElement")
            .field("key", &self.key)
            .field("mode", &self.mode)
            .field("threshold", &self.threshold)
            .field("revealed", &self.revealed)
            .field("suspended", &self.suspended)
            .finish()
    }
}

impl TrackedElement {
    /// Create a one-shot element using the evaluation's default threshold
    pub fn new(key: impl Into<String>, bounds: impl BoundsProvider + 'static) -> Self {
        Self {
            key: key.into(),
            bounds: Box::new(bounds),
            mode: RevealMode::OneShot,
            threshold: None,
            revealed: false,
            suspended: false,
        }
    }

    /// Set the reveal mode
    pub fn mode(mut self, mode: RevealMode) -> Self {
        self.mode = mode;
        self
    }

    /// Shorthand for `mode(RevealMode::Repeatable)`
    pub fn repeatable(self) -> Self {
        self.mode(RevealMode::Repeatable)
    }

    /// Use a fixed threshold ratio instead of the evaluation default
    pub fn threshold(mut self, ratio: f32) -> Self {
        self.threshold = Some(ratio);
        self
    }

    /// Register the element suspended (not evaluated until resumed)
    pub fn suspended(mut self) -> Self {
        self.suspended = true;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn reveal_mode(&self) -> RevealMode {
        self.mode
    }

    pub fn threshold_override(&self) -> Option<f32> {
        self.threshold
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Current viewport-relative bounds, if the node is laid out
    pub fn current_bounds(&self) -> Option<ElementRect> {
        self.bounds.bounds()
    }
}
