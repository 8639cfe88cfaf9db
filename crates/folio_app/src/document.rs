//! Headless document layout
//!
//! Places every section and revealable item of the catalog on a single
//! vertical axis, the way the rendered page stacks them. Tab contents share
//! the same slots: only the active tab's items are evaluated.

use std::time::Duration;

use folio_animation::Stagger;
use folio_content::Catalog;
use folio_core::{ElementRect, Viewport};
use folio_layout::{AboutTab, RevealMode, Section};

use crate::config::{NavigationConfig, RevealConfig};

const SECTION_PADDING: f32 = 96.0;
const TITLE_HEIGHT: f32 = 120.0;
const TAB_BAR_HEIGHT: f32 = 72.0;
const TIMELINE_ROW: f32 = 220.0;
const SKILL_ROW: f32 = 96.0;
const PROJECT_ROW: f32 = 480.0;
const CONTACT_FORM_HEIGHT: f32 = 640.0;
const GRID_COLUMNS: usize = 2;

/// Tab an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabSlot {
    About(AboutTab),
    SkillCategory(usize),
}

/// One revealable element of the document
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPlacement {
    pub key: String,
    pub rect: ElementRect,
    pub mode: RevealMode,
    pub threshold: Option<f32>,
    pub tab: Option<TabSlot>,
    /// Entrance delay once revealed
    pub delay: Duration,
}

impl ItemPlacement {
    fn new(key: impl Into<String>, rect: ElementRect) -> Self {
        Self {
            key: key.into(),
            rect,
            mode: RevealMode::OneShot,
            threshold: None,
            tab: None,
            delay: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentLayout {
    pub sections: Vec<Section>,
    pub items: Vec<ItemPlacement>,
    pub height: f32,
}

impl DocumentLayout {
    /// Stack the configured sections with the catalog's content
    pub fn build(catalog: &Catalog, navigation: &NavigationConfig, reveal: &RevealConfig, viewport: Viewport) -> Self {
        let mut layout = DocumentLayout::default();

        for id in &navigation.sections {
            let top = layout.height;
            let mut cursor = top + SECTION_PADDING;

            if id != "home" {
                let mut title = ItemPlacement::new(format!("{id}-title"), ElementRect::with_height(cursor, TITLE_HEIGHT));
                title.threshold = Some(reveal.title_threshold);
                layout.items.push(title);
                cursor += TITLE_HEIGHT;
            }

            let content_bottom = match id.as_str() {
                "about" => layout.place_timelines(catalog, cursor),
                "skills" => layout.place_skills(catalog, cursor),
                "projects" => layout.place_projects(catalog, cursor),
                "contact" => {
                    layout
                        .items
                        .push(ItemPlacement::new("contact-form", ElementRect::with_height(cursor, CONTACT_FORM_HEIGHT)));
                    cursor + CONTACT_FORM_HEIGHT
                }
                _ => cursor,
            };

            let height = (content_bottom + SECTION_PADDING - top).max(viewport.height);
            let mut container = ItemPlacement::new(format!("section-{id}"), ElementRect::with_height(top, height));
            container.mode = RevealMode::Repeatable;
            layout.items.push(container);

            layout.sections.push(Section::new(id.clone(), top, height));
            layout.height = top + height;
        }
        layout
    }

    fn place_timelines(&mut self, catalog: &Catalog, top: f32) -> f32 {
        let top = top + TAB_BAR_HEIGHT;
        let stagger = Stagger::timeline();
        let mut rows = 0;

        for tab in AboutTab::ALL {
            let entries = match tab {
                AboutTab::Journey => &catalog.journey,
                AboutTab::Courses => &catalog.courses,
                AboutTab::Achievements => &catalog.achievements,
            };
            for (index, _) in entries.iter().enumerate() {
                let y = top + index as f32 * TIMELINE_ROW;
                let mut item = ItemPlacement::new(format!("{tab}-{index}"), ElementRect::with_height(y, TIMELINE_ROW - 20.0));
                item.tab = Some(TabSlot::About(tab));
                item.delay = stagger.delay_for(index);
                self.items.push(item);
            }
            rows = rows.max(entries.len());
        }
        top + rows as f32 * TIMELINE_ROW
    }

    fn place_skills(&mut self, catalog: &Catalog, top: f32) -> f32 {
        let top = top + TAB_BAR_HEIGHT;
        let stagger = Stagger::skills();
        let mut rows = 0;

        for (category, entry) in catalog.skill_categories.iter().enumerate() {
            for (index, _) in entry.skills.iter().enumerate() {
                let y = top + (index / GRID_COLUMNS) as f32 * SKILL_ROW;
                let mut item = ItemPlacement::new(format!("skill-{category}-{index}"), ElementRect::with_height(y, SKILL_ROW - 16.0));
                item.tab = Some(TabSlot::SkillCategory(category));
                item.delay = stagger.delay_for(index);
                self.items.push(item);
            }
            rows = rows.max(entry.skills.len().div_ceil(GRID_COLUMNS));
        }
        top + rows as f32 * SKILL_ROW
    }

    fn place_projects(&mut self, catalog: &Catalog, top: f32) -> f32 {
        let stagger = Stagger::cards();
        for (index, project) in catalog.projects.iter().enumerate() {
            let y = top + (index / GRID_COLUMNS) as f32 * PROJECT_ROW;
            let mut item = ItemPlacement::new(project.key(), ElementRect::with_height(y, PROJECT_ROW - 32.0));
            item.delay = stagger.delay_for(index);
            self.items.push(item);
        }
        top + catalog.projects.len().div_ceil(GRID_COLUMNS) as f32 * PROJECT_ROW
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == id)
    }

    pub fn item(&self, key: &str) -> Option<&ItemPlacement> {
        self.items.iter().find(|item| item.key == key)
    }
}
