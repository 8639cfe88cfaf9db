//! Active-section resolution
//!
//! Navigation links highlight the section under a probe line placed a fixed
//! distance below the top of the viewport (roughly the height of the fixed
//! header). Sections are checked in declared order and the first one whose
//! `[top, top + height)` range contains the probe wins. When the probe is
//! above the first section or below the last, the previous answer stands.

use serde::{Deserialize, Serialize};

/// Anchor ids of the page sections, in document order
pub const NAV_SECTIONS: [&str; 5] = ["home", "about", "skills", "projects", "contact"];

/// Distance from the viewport top to the probe line
pub const DEFAULT_PROBE_OFFSET: f32 = 100.0;

/// Fallback header height used for `scroll-margin-top`
pub const DEFAULT_HEADER_HEIGHT: f32 = 70.0;

/// Scroll offset past which the header switches to its compact style
pub const SCROLLED_OFFSET: f32 = 50.0;

/// Layout snapshot of one anchored section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    /// Document-relative top edge
    pub top_offset: f32,
    pub height: f32,
}

impl Section {
    pub fn new(id: impl Into<String>, top_offset: f32, height: f32) -> Self {
        Self {
            id: id.into(),
            top_offset,
            height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.top_offset + self.height
    }

    /// Half-open containment: the bottom edge belongs to the next section
    pub fn contains(&self, y: f32) -> bool {
        y >= self.top_offset && y < self.bottom()
    }
}

/// First section in declared order containing `probe_y`
pub fn section_at(probe_y: f32, sections: &[Section]) -> Option<&Section> {
    sections.iter().find(|section| section.contains(probe_y))
}

/// Tracks which section the navigation highlights
#[derive(Debug, Clone)]
pub struct SectionResolver {
    probe_offset: f32,
    sections: Vec<Section>,
    active: Option<String>,
}

impl Default for SectionResolver {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_OFFSET).with_initial(NAV_SECTIONS[0])
    }
}

impl SectionResolver {
    /// Create a resolver with no active section
    pub fn new(probe_offset: f32) -> Self {
        Self {
            probe_offset,
            sections: Vec::new(),
            active: None,
        }
    }

    /// Section reported before the first match
    pub fn with_initial(mut self, id: impl Into<String>) -> Self {
        self.active = Some(id.into());
        self
    }

    pub fn probe_offset(&self) -> f32 {
        self.probe_offset
    }

    /// Replace the layout snapshot (after mount or a layout change)
    pub fn update_layout(&mut self, sections: Vec<Section>) {
        self.sections = sections;
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Resolve the active section for `scroll_y` against the stored layout
    pub fn resolve(&mut self, scroll_y: f32) -> Option<&str> {
        let probe = scroll_y + self.probe_offset;
        if let Some(section) = section_at(probe, &self.sections) {
            if self.active.as_deref() != Some(section.id.as_str()) {
                tracing::debug!("active section -> {}", section.id);
                self.active = Some(section.id.clone());
            }
        }
        self.active.as_deref()
    }

    /// Resolve against an explicit layout snapshot, keeping it for later calls
    pub fn resolve_in(&mut self, scroll_y: f32, sections: &[Section]) -> Option<&str> {
        if self.sections.as_slice() != sections {
            self.sections = sections.to_vec();
        }
        self.resolve(scroll_y)
    }

    /// Scroll offset that brings section `id` to the top of the viewport
    pub fn scroll_target(&self, id: &str) -> Option<f32> {
        self.sections
            .iter()
            .find(|section| section.id == id)
            .map(|section| section.top_offset)
    }
}

/// Whether the header should use its compact, scrolled style
pub fn is_scrolled(scroll_y: f32) -> bool {
    scroll_y > SCROLLED_OFFSET
}

/// Fraction of the document scrolled, for the top progress bar
pub fn scroll_progress(scroll_y: f32, document_height: f32, viewport_height: f32) -> f32 {
    let scrollable = document_height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_y / scrollable).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Vec<Section> {
        vec![
            Section::new("home", 0.0, 800.0),
            Section::new("about", 800.0, 900.0),
            Section::new("skills", 1700.0, 700.0),
            Section::new("projects", 2400.0, 1000.0),
            Section::new("contact", 3400.0, 800.0),
        ]
    }

    #[test]
    fn test_probe_offset_shifts_boundary() {
        let mut resolver = SectionResolver::default();
        resolver.update_layout(layout());

        assert_eq!(resolver.resolve(699.0), Some("home"));
        assert_eq!(resolver.resolve(700.0), Some("about"));
        assert_eq!(resolver.resolve(1650.0), Some("skills"));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let sections = layout();
        let mut resolver = SectionResolver::default();

        let first = resolver.resolve_in(2000.0, &sections).map(str::to_string);
        for _ in 0..10 {
            assert_eq!(resolver.resolve_in(2000.0, &sections), first.as_deref());
        }
        assert_eq!(first.as_deref(), Some("skills"));
    }

    #[test]
    fn test_no_match_keeps_previous() {
        let mut resolver = SectionResolver::default();
        resolver.update_layout(layout());

        assert_eq!(resolver.resolve(3500.0), Some("contact"));
        assert_eq!(resolver.resolve(9000.0), Some("contact"));
    }

    #[test]
    fn test_initial_section_before_any_match() {
        let mut resolver = SectionResolver::default();
        resolver.update_layout(vec![Section::new("about", 500.0, 400.0)]);

        assert_eq!(resolver.resolve(0.0), Some("home"));

        let mut bare = SectionResolver::new(DEFAULT_PROBE_OFFSET);
        assert_eq!(bare.resolve(0.0), None);
    }

    #[test]
    fn test_overlapping_sections_prefer_declared_order() {
        let sections = vec![
            Section::new("first", 0.0, 1000.0),
            Section::new("second", 500.0, 1000.0),
        ];
        let mut resolver = SectionResolver::new(0.0);

        assert_eq!(resolver.resolve_in(600.0, &sections), Some("first"));
        assert_eq!(resolver.resolve_in(1200.0, &sections), Some("second"));
    }

    #[test]
    fn test_scroll_target_and_header_state() {
        let mut resolver = SectionResolver::default();
        resolver.update_layout(layout());

        assert_eq!(resolver.scroll_target("projects"), Some(2400.0));
        assert_eq!(resolver.scroll_target("blog"), None);
        assert!(!is_scrolled(50.0));
        assert!(is_scrolled(51.0));
    }

    #[test]
    fn test_scroll_progress_is_clamped() {
        assert_eq!(scroll_progress(0.0, 4200.0, 800.0), 0.0);
        assert_eq!(scroll_progress(1700.0, 4200.0, 800.0), 0.5);
        assert_eq!(scroll_progress(9999.0, 4200.0, 800.0), 1.0);
        assert_eq!(scroll_progress(100.0, 600.0, 800.0), 0.0);
    }
}
