//! Custom cursor follower
//!
//! A circle that tracks the pointer. Pointer moves never touch the rendered
//! style directly: each move cancels the previously requested frame and
//! requests a new one carrying the latest position, so at most one update is
//! applied per rendered frame and only the freshest position survives.

use folio_animation::{FrameRequestId, FrameScheduler};
use folio_core::{Event, Point, Viewport};

/// Cursor appearance variant
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorVariant {
    #[default]
    Default,
    /// Over a link, button or form control
    Hover,
    /// Pointer button held down
    Click,
}

impl CursorVariant {
    /// Diameter in pixels
    pub fn size(&self) -> f32 {
        match self {
            CursorVariant::Default => 32.0,
            CursorVariant::Hover => 48.0,
            CursorVariant::Click => 24.0,
        }
    }

    /// Offset from the pointer to the circle's top-left corner
    pub fn offset(&self) -> f32 {
        match self {
            CursorVariant::Hover => 24.0,
            CursorVariant::Default | CursorVariant::Click => 16.0,
        }
    }

    pub fn color(&self) -> Rgba {
        let alpha = match self {
            CursorVariant::Default => 0.5,
            CursorVariant::Hover => 0.8,
            CursorVariant::Click => 1.0,
        };
        Rgba::ACCENT.with_alpha(alpha)
    }
}

/// 8-bit RGB colour with float alpha
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// Site accent colour
    pub const ACCENT: Rgba = Rgba {
        r: 232,
        g: 160,
        b: 164,
        a: 1.0,
    };

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS `rgba()` notation
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Resolved style for the render step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorStyle {
    pub translate_x: f32,
    pub translate_y: f32,
    pub size: f32,
    pub color: Rgba,
    pub opacity: f32,
}

/// Latest pointer position cell plus appearance state
#[derive(Debug)]
pub struct CursorFollower {
    position: Point,
    variant: CursorVariant,
    visible: bool,
    frames: FrameScheduler<Point>,
    pending: Option<FrameRequestId>,
}

impl CursorFollower {
    /// Create a follower resting at the viewport centre
    pub fn new(viewport: Viewport) -> Self {
        Self {
            position: viewport.center(),
            variant: CursorVariant::default(),
            visible: true,
            frames: FrameScheduler::new(),
            pending: None,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn variant(&self) -> CursorVariant {
        self.variant
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn has_pending_frame(&self) -> bool {
        self.frames.has_pending()
    }

    /// Record a pointer move (last write wins within a frame)
    pub fn on_mouse_move(&mut self, position: Point) {
        if let Some(id) = self.pending.take() {
            self.frames.cancel(id);
        }
        self.pending = Some(self.frames.request(position));
    }

    pub fn on_mouse_down(&mut self) {
        self.variant = CursorVariant::Click;
    }

    pub fn on_mouse_up(&mut self) {
        self.variant = CursorVariant::Default;
    }

    pub fn on_interactive_enter(&mut self) {
        self.variant = CursorVariant::Hover;
    }

    pub fn on_interactive_leave(&mut self) {
        self.variant = CursorVariant::Default;
    }

    /// Route an input event; returns true if the event was relevant
    pub fn handle(&mut self, event: &Event) -> bool {
        match event {
            Event::MouseMove { position } => self.on_mouse_move(*position),
            Event::MouseDown { .. } => self.on_mouse_down(),
            Event::MouseUp { .. } => self.on_mouse_up(),
            Event::InteractiveEnter => self.on_interactive_enter(),
            Event::InteractiveLeave => self.on_interactive_leave(),
            Event::DocumentLeave => self.visible = false,
            Event::DocumentEnter => self.visible = true,
            Event::Scroll { .. } | Event::Resize { .. } => return false,
        }
        true
    }

    /// Apply the pending position, if any; returns true if it moved
    pub fn run_frame(&mut self) -> bool {
        self.pending = None;
        match self.frames.run_frame().pop() {
            Some(position) => {
                self.position = position;
                true
            }
            None => false,
        }
    }

    /// Style for the current position and variant
    pub fn style(&self) -> CursorStyle {
        let offset = self.variant.offset();
        CursorStyle {
            translate_x: self.position.x - offset,
            translate_y: self.position.y - offset,
            size: self.variant.size(),
            color: self.variant.color(),
            opacity: if self.visible { 1.0 } else { 0.0 },
        }
    }

    /// Cancel the pending frame (component teardown)
    pub fn teardown(&mut self) {
        if let Some(id) = self.pending.take() {
            self.frames.cancel(id);
        }
        self.frames.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_viewport_center() {
        let cursor = CursorFollower::new(Viewport::new(1000.0, 600.0));
        assert_eq!(cursor.position(), Point::new(500.0, 300.0));
        assert_eq!(cursor.style().size, 32.0);
    }

    #[test]
    fn test_moves_coalesce_to_latest_position() {
        let mut cursor = CursorFollower::new(Viewport::default());
        cursor.on_mouse_move(Point::new(10.0, 10.0));
        cursor.on_mouse_move(Point::new(20.0, 25.0));
        cursor.on_mouse_move(Point::new(40.0, 50.0));

        assert_eq!(cursor.frames.pending_count(), 1);
        assert!(cursor.run_frame());
        assert_eq!(cursor.position(), Point::new(40.0, 50.0));
        assert!(!cursor.run_frame());
    }

    #[test]
    fn test_variant_styles() {
        let mut cursor = CursorFollower::new(Viewport::default());
        cursor.on_mouse_move(Point::new(100.0, 100.0));
        cursor.run_frame();

        cursor.on_interactive_enter();
        let hover = cursor.style();
        assert_eq!((hover.translate_x, hover.size), (76.0, 48.0));
        assert_eq!(hover.color.to_css(), "rgba(232, 160, 164, 0.8)");

        cursor.on_mouse_down();
        let click = cursor.style();
        assert_eq!((click.translate_x, click.size), (84.0, 24.0));
        assert_eq!(click.color.a, 1.0);

        cursor.on_mouse_up();
        assert_eq!(cursor.variant(), CursorVariant::Default);
    }

    #[test]
    fn test_document_leave_hides_cursor() {
        let mut cursor = CursorFollower::new(Viewport::default());
        assert!(cursor.handle(&Event::DocumentLeave));
        assert_eq!(cursor.style().opacity, 0.0);

        cursor.handle(&Event::DocumentEnter);
        assert_eq!(cursor.style().opacity, 1.0);
        assert!(!cursor.handle(&Event::Scroll { scroll_y: 1.0 }));
    }

    #[test]
    fn test_teardown_drops_pending_move() {
        let mut cursor = CursorFollower::new(Viewport::new(200.0, 200.0));
        cursor.on_mouse_move(Point::new(5.0, 5.0));
        cursor.teardown();

        assert!(!cursor.has_pending_frame());
        assert!(!cursor.run_frame());
        assert_eq!(cursor.position(), Point::new(100.0, 100.0));
    }
}
