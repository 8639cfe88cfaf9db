//! Geometry primitives
//!
//! All vertical offsets are in CSS pixels. Element rectangles are
//! viewport-relative (what a bounding-client-rect query reports), while
//! section offsets are document-relative.

use serde::{Deserialize, Serialize};

/// A pointer position in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Vertical extent of an element relative to the top of the viewport
///
/// `top` is negative once the element has scrolled past the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementRect {
    pub top: f32,
    pub bottom: f32,
}

impl ElementRect {
    /// Create a rect from top and bottom edges
    pub fn new(top: f32, bottom: f32) -> Self {
        Self { top, bottom }
    }

    /// Create a rect from a top edge and a height
    pub fn with_height(top: f32, height: f32) -> Self {
        Self {
            top,
            bottom: top + height,
        }
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Convert a document-relative rect into a viewport-relative one
    pub fn relative_to_scroll(&self, scroll_y: f32) -> Self {
        Self {
            top: self.top - scroll_y,
            bottom: self.bottom - scroll_y,
        }
    }
}

/// Size of the visible viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Centre of the viewport, used as the initial pointer position
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}
