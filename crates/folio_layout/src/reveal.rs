//! Reveal state store
//!
//! Arena of [`TrackedElement`]s indexed by [`ElementId`], populated when
//! nodes mount and pruned when they unmount. Holds each element's revealed
//! flag and applies visibility according to its [`RevealMode`]:
//!
//! - `OneShot`: becomes revealed the first time it is visible, then locks
//! - `Repeatable`: mirrors the visibility reported by every pass
//!
//! The only way back to not-revealed for a one-shot element is an explicit
//! [`RevealStore::reset`], which tab selection uses to replay entrances.

use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::element::{ElementId, RevealMode, TrackedElement};

/// Effect of one `apply` call on an element's revealed flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealTransition {
    Unchanged,
    Revealed,
    Concealed,
}

impl RevealTransition {
    /// Compute the next revealed flag for `mode`
    pub fn next(mode: RevealMode, revealed: bool, is_visible: bool) -> (bool, Self) {
        let next = match mode {
            RevealMode::OneShot => revealed || is_visible,
            RevealMode::Repeatable => is_visible,
        };
        let transition = match (revealed, next) {
            (false, true) => RevealTransition::Revealed,
            (true, false) => RevealTransition::Concealed,
            _ => RevealTransition::Unchanged,
        };
        (next, transition)
    }
}

/// Registry of tracked elements and their reveal flags
#[derive(Debug, Default)]
pub struct RevealStore {
    elements: SlotMap<ElementId, TrackedElement>,
    /// Stable string key → element, for lookups by markup identity
    keys: FxHashMap<String, ElementId>,
}

impl RevealStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track an element
    ///
    /// If another element already uses the same key, the key now resolves
    /// to the new element (last wins); both stay tracked.
    pub fn register(&mut self, element: TrackedElement) -> ElementId {
        let key = element.key.clone();
        let id = self.elements.insert(element);

        if let Some(previous) = self.keys.insert(key, id) {
            tracing::warn!(
                "duplicate reveal key registered: {}",
                self.elements[previous].key
            );
        }
        tracing::trace!("tracking element {:?}", id);
        id
    }

    /// Stop tracking an element (node unmounted)
    pub fn unregister(&mut self, id: ElementId) -> Option<TrackedElement> {
        let element = self.elements.remove(id)?;
        if self.keys.get(&element.key) == Some(&id) {
            self.keys.remove(&element.key);
        }
        Some(element)
    }

    pub fn get(&self, id: ElementId) -> Option<&TrackedElement> {
        self.elements.get(id)
    }

    pub fn find(&self, key: &str) -> Option<ElementId> {
        self.keys.get(key).copied()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    /// Revealed flag of an element; untracked elements read as not revealed
    pub fn is_revealed(&self, id: ElementId) -> bool {
        self.elements.get(id).is_some_and(|element| element.revealed)
    }

    /// Apply a visibility observation to an element
    ///
    /// Unknown ids are ignored.
    pub fn apply(&mut self, id: ElementId, is_visible: bool) -> RevealTransition {
        let Some(element) = self.elements.get_mut(id) else {
            return RevealTransition::Unchanged;
        };
        let (revealed, transition) =
            RevealTransition::next(element.mode, element.revealed, is_visible);
        element.revealed = revealed;
        transition
    }

    /// Force an element back to not-revealed, whatever its mode
    pub fn reset(&mut self, id: ElementId) {
        if let Some(element) = self.elements.get_mut(id) {
            element.revealed = false;
        }
    }

    /// Exclude an element from (or return it to) evaluation passes
    pub fn set_suspended(&mut self, id: ElementId, suspended: bool) {
        if let Some(element) = self.elements.get_mut(id) {
            element.suspended = suspended;
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &TrackedElement)> {
        self.elements.iter()
    }

    /// Ids of every element currently revealed
    pub fn revealed_ids(&self) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|(_, element)| element.revealed)
            .map(|(id, _)| id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::ElementRect;

    fn element(key: &str) -> TrackedElement {
        TrackedElement::new(key, ElementRectProvider(ElementRect::new(0.0, 10.0)))
    }

    struct ElementRectProvider(ElementRect);

    impl crate::element::BoundsProvider for ElementRectProvider {
        fn bounds(&self) -> Option<ElementRect> {
            Some(self.0)
        }
    }

    #[test]
    fn test_one_shot_never_reverts() {
        let mut store = RevealStore::new();
        let id = store.register(element("card"));

        assert_eq!(store.apply(id, false), RevealTransition::Unchanged);
        assert_eq!(store.apply(id, true), RevealTransition::Revealed);
        assert_eq!(store.apply(id, true), RevealTransition::Unchanged);

        for _ in 0..5 {
            assert_eq!(store.apply(id, false), RevealTransition::Unchanged);
            assert!(store.is_revealed(id));
        }
    }

    #[test]
    fn test_repeatable_mirrors_latest_visibility() {
        let mut store = RevealStore::new();
        let id = store.register(element("section").repeatable());

        let sequence = [true, false, false, true, true, false];
        for visible in sequence {
            store.apply(id, visible);
            assert_eq!(store.is_revealed(id), visible);
        }
    }

    #[test]
    fn test_reset_reverts_one_shot() {
        let mut store = RevealStore::new();
        let id = store.register(element("skill"));
        store.apply(id, true);

        store.reset(id);
        assert!(!store.is_revealed(id));
    }

    #[test]
    fn test_unregister_releases_key() {
        let mut store = RevealStore::new();
        let id = store.register(element("title"));
        assert_eq!(store.find("title"), Some(id));

        let removed = store.unregister(id).map(|e| e.key().to_string());
        assert_eq!(removed.as_deref(), Some("title"));
        assert_eq!(store.find("title"), None);
        assert!(!store.is_revealed(id));
        assert_eq!(store.apply(id, true), RevealTransition::Unchanged);
    }

    #[test]
    fn test_duplicate_key_resolves_to_latest() {
        let mut store = RevealStore::new();
        let first = store.register(element("dup"));
        let second = store.register(element("dup"));

        assert_eq!(store.find("dup"), Some(second));
        store.unregister(first);
        assert_eq!(store.find("dup"), Some(second));
        assert_eq!(store.len(), 1);
    }
}
