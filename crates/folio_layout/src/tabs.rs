//! Tabbed content selection
//!
//! A tab group swaps which list of content items is displayed. Each tab owns
//! the tracked elements of its items. Selecting a different tab:
//!
//! 1. suspends the previous tab's children (they are no longer evaluated),
//! 2. resets every child of the new tab to not-revealed and resumes them,
//!
//! so the next visibility pass replays their staggered entrance. Any tab can
//! follow any other; there is no terminal state.

use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::element::ElementId;
use crate::observer::RevealObserver;
use crate::reveal::RevealStore;

/// One tab: a label, an optional icon key and its tracked children
#[derive(Debug, Clone)]
pub struct Tab {
    pub label: String,
    pub icon: Option<String>,
    children: SmallVec<[ElementId; 8]>,
}

impl Tab {
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }
}

/// Ordered tabs keyed by `K`, exactly one of which is active
#[derive(Debug, Clone)]
pub struct TabGroup<K> {
    tabs: IndexMap<K, Tab>,
    active: usize,
}

impl<K> Default for TabGroup<K> {
    fn default() -> Self {
        Self {
            tabs: IndexMap::new(),
            active: 0,
        }
    }
}

impl<K: Hash + Eq + Clone + fmt::Debug> TabGroup<K> {
    /// Create an empty group; the first tab added becomes active
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tab
    pub fn with_tab(mut self, key: K, label: impl Into<String>, icon: Option<&str>) -> Self {
        self.push(key, label, icon);
        self
    }

    pub fn push(&mut self, key: K, label: impl Into<String>, icon: Option<&str>) {
        self.tabs.insert(
            key,
            Tab {
                label: label.into(),
                icon: icon.map(str::to_string),
                children: SmallVec::new(),
            },
        );
    }

    /// Attach a tracked element to a tab
    ///
    /// Returns false if the tab does not exist.
    pub fn add_child(&mut self, key: &K, child: ElementId) -> bool {
        match self.tabs.get_mut(key) {
            Some(tab) => {
                tab.children.push(child);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_key(&self) -> Option<&K> {
        self.tabs.get_index(self.active).map(|(key, _)| key)
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.tabs.get_index(self.active).map(|(_, tab)| tab)
    }

    pub fn tab(&self, key: &K) -> Option<&Tab> {
        self.tabs.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &Tab)> {
        self.tabs.iter()
    }

    /// Suspend every inactive tab's children and resume the active ones
    ///
    /// Call once after the children have been registered.
    pub fn sync(&self, store: &mut RevealStore) {
        for (index, (_, tab)) in self.tabs.iter().enumerate() {
            for &child in &tab.children {
                store.set_suspended(child, index != self.active);
            }
        }
    }

    /// Make `key` the active tab
    ///
    /// Returns false (and changes nothing) if the key is unknown or already
    /// active.
    pub fn select(&mut self, key: &K, store: &mut RevealStore) -> bool {
        match self.tabs.get_index_of(key) {
            Some(index) => self.select_index(index, store),
            None => false,
        }
    }

    /// Make the tab at `index` active
    pub fn select_index(&mut self, index: usize, store: &mut RevealStore) -> bool {
        if index >= self.tabs.len() || index == self.active {
            return false;
        }

        if let Some((_, previous)) = self.tabs.get_index(self.active) {
            for &child in &previous.children {
                store.set_suspended(child, true);
            }
        }

        self.active = index;
        if let Some((key, next)) = self.tabs.get_index(index) {
            for &child in &next.children {
                store.reset(child);
                store.set_suspended(child, false);
            }
            tracing::debug!("tab {:?} selected, {} item(s) reset", key, next.children.len());
        }
        true
    }

    /// Select through the observer, scheduling the re-entrance pass
    pub fn select_observed(&mut self, key: &K, observer: &RevealObserver) -> bool {
        observer.update_store(|store| self.select(key, store))
    }
}

/// Tabs of the About section's timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AboutTab {
    Journey,
    Courses,
    Achievements,
}

impl AboutTab {
    pub const ALL: [AboutTab; 3] = [AboutTab::Journey, AboutTab::Courses, AboutTab::Achievements];

    pub fn as_str(&self) -> &'static str {
        match self {
            AboutTab::Journey => "journey",
            AboutTab::Courses => "courses",
            AboutTab::Achievements => "achievements",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AboutTab::Journey => "My Journey",
            AboutTab::Courses => "Courses",
            AboutTab::Achievements => "Achievements",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            AboutTab::Journey => "graduation",
            AboutTab::Courses => "book",
            AboutTab::Achievements => "award",
        }
    }

    /// Tab group with the three tabs, journey active
    pub fn group() -> TabGroup<AboutTab> {
        Self::ALL
            .into_iter()
            .fold(TabGroup::new(), |group, tab| {
                group.with_tab(tab, tab.label(), Some(tab.icon()))
            })
    }
}

impl fmt::Display for AboutTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::TrackedElement;
    use crate::visibility::evaluate;
    use folio_core::ElementRect;

    fn visible_child(store: &mut RevealStore, key: &str) -> ElementId {
        store.register(TrackedElement::new(key.to_string(), || {
            Some(ElementRect::with_height(100.0, 50.0))
        }))
    }

    fn setup() -> (RevealStore, TabGroup<AboutTab>, Vec<ElementId>, Vec<ElementId>) {
        let mut store = RevealStore::new();
        let mut group = AboutTab::group();

        let journey: Vec<_> = (0..3)
            .map(|i| visible_child(&mut store, &format!("journey-{i}")))
            .collect();
        let courses: Vec<_> = (0..2)
            .map(|i| visible_child(&mut store, &format!("course-{i}")))
            .collect();
        for &id in &journey {
            group.add_child(&AboutTab::Journey, id);
        }
        for &id in &courses {
            group.add_child(&AboutTab::Courses, id);
        }
        group.sync(&mut store);
        (store, group, journey, courses)
    }

    #[test]
    fn test_unselected_tab_is_not_evaluated() {
        let (mut store, _group, journey, courses) = setup();

        let changes = evaluate(&mut store, 1000.0, 0.8);
        assert_eq!(changes.revealed, journey);
        assert!(courses.iter().all(|&id| !store.is_revealed(id)));
    }

    #[test]
    fn test_select_resets_children_before_next_pass() {
        let (mut store, mut group, journey, courses) = setup();
        evaluate(&mut store, 1000.0, 0.8);

        assert!(group.select(&AboutTab::Courses, &mut store));
        evaluate(&mut store, 1000.0, 0.8);
        assert!(courses.iter().all(|&id| store.is_revealed(id)));

        // Back to journey: its one-shot children replay their entrance
        assert!(group.select(&AboutTab::Journey, &mut store));
        assert!(journey.iter().all(|&id| !store.is_revealed(id)));

        let changes = evaluate(&mut store, 1000.0, 0.8);
        assert_eq!(changes.revealed, journey);
        assert_eq!(group.active_key(), Some(&AboutTab::Journey));
    }

    #[test]
    fn test_reselecting_active_tab_is_noop() {
        let (mut store, mut group, journey, _) = setup();
        evaluate(&mut store, 1000.0, 0.8);

        assert!(!group.select(&AboutTab::Journey, &mut store));
        assert!(journey.iter().all(|&id| store.is_revealed(id)));
    }

    #[test]
    fn test_index_selection_for_skill_categories() {
        let mut store = RevealStore::new();
        let mut categories: TabGroup<usize> = TabGroup::new();
        for (index, name) in ["Data Analytics", "Business Intelligence"].iter().enumerate() {
            categories.push(index, *name, None);
        }

        assert!(categories.select_index(1, &mut store));
        assert_eq!(categories.active_index(), 1);
        assert!(!categories.select_index(7, &mut store));
        assert!(!categories.select(&9, &mut store));
    }

    #[test]
    fn test_select_observed_schedules_pass() {
        use crate::visibility::VisibilityTracker;
        use folio_core::{EventDispatcher, Viewport};

        let dispatcher = EventDispatcher::new();
        let observer = RevealObserver::new(Viewport::new(800.0, 1000.0), VisibilityTracker::default());
        let mut group = AboutTab::group();
        let course = observer.register(
            TrackedElement::new("course-0", || Some(ElementRect::with_height(10.0, 10.0)))
                .suspended(),
        );
        group.add_child(&AboutTab::Courses, course);

        let _lease = observer.acquire(&dispatcher);
        observer.run_frame();
        assert!(!observer.is_revealed(course));

        assert!(group.select_observed(&AboutTab::Courses, &observer));
        assert!(observer.has_pending_frame());
        assert_eq!(observer.run_frame().revealed, vec![course]);
    }
}
