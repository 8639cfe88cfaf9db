//! Visibility tracking
//!
//! An element is visible once its viewport-relative top edge has risen to
//! `viewport_height * threshold` or above. Each evaluation pass walks the
//! tracked (non-suspended) elements once, feeds the result into the reveal
//! store and reports which elements changed.

use crate::element::ElementId;
use crate::reveal::{RevealStore, RevealTransition};
use folio_core::ElementRect;

/// Threshold for generic fade/scale reveals
pub const DEFAULT_THRESHOLD: f32 = 0.8;

/// Threshold for section-title underline reveals
pub const TITLE_THRESHOLD: f32 = 0.5;

/// Whether `rect` has crossed `threshold` of a viewport `viewport_height` tall
pub fn is_visible(rect: ElementRect, viewport_height: f32, threshold: f32) -> bool {
    rect.top <= viewport_height * threshold
}

/// Elements whose revealed flag changed during one pass
///
/// Ids appear at most once, in store slot order. Slots freed by
/// unregistering are reused, so this is not registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealChanges {
    /// Newly crossed the threshold (revealed became true)
    pub revealed: Vec<ElementId>,
    /// Repeatable elements that left the view (revealed became false)
    pub concealed: Vec<ElementId>,
    /// Elements whose bounds were read this pass
    pub evaluated: usize,
}

impl RevealChanges {
    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty() && self.concealed.is_empty()
    }
}

/// Run one evaluation pass over `store`
///
/// Suspended elements and elements without bounds are skipped. An element's
/// own threshold override takes precedence over `threshold_ratio`.
pub fn evaluate(store: &mut RevealStore, viewport_height: f32, threshold_ratio: f32) -> RevealChanges {
    let mut observations = Vec::with_capacity(store.len());
    for (id, element) in store.iter() {
        if element.suspended {
            continue;
        }
        let Some(rect) = element.bounds.bounds() else {
            continue;
        };
        let threshold = element.threshold.unwrap_or(threshold_ratio);
        observations.push((id, is_visible(rect, viewport_height, threshold)));
    }

    let mut changes = RevealChanges {
        evaluated: observations.len(),
        ..Default::default()
    };
    for (id, visible) in observations {
        match store.apply(id, visible) {
            RevealTransition::Revealed => changes.revealed.push(id),
            RevealTransition::Concealed => changes.concealed.push(id),
            RevealTransition::Unchanged => {}
        }
    }
    changes
}

/// Evaluation driver holding the default threshold and pass statistics
#[derive(Debug, Clone)]
pub struct VisibilityTracker {
    threshold: f32,
    passes: u64,
}

impl Default for VisibilityTracker {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl VisibilityTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            passes: 0,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Number of passes run so far
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Run a pass with the tracker's default threshold
    pub fn evaluate(&mut self, store: &mut RevealStore, viewport_height: f32) -> RevealChanges {
        self.passes += 1;
        let changes = evaluate(store, viewport_height, self.threshold);
        if !changes.is_empty() {
            tracing::debug!(
                "visibility pass {}: {} revealed, {} concealed of {} evaluated",
                self.passes,
                changes.revealed.len(),
                changes.concealed.len(),
                changes.evaluated
            );
        }
        changes
    }
}
