//! Reveal observer service
//!
//! Owns the reveal store and connects it to scroll and resize events. The
//! presentation layer acquires an [`ObserverLease`] when it mounts and drops
//! it when it unmounts. Listeners are attached by the first lease and
//! detached with the last one, so repeated mounts never stack duplicate
//! document listeners.
//!
//! Scroll bursts are coalesced: an event only requests an animation frame if
//! none is pending, and [`RevealObserver::run_frame`] performs at most one
//! evaluation pass per frame.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use folio_animation::{FrameRequestId, FrameScheduler};
use folio_core::{Event, EventDispatcher, EventType, Subscription, Viewport};

use crate::element::{ElementId, ScrollPosition, TrackedElement};
use crate::reveal::RevealStore;
use crate::visibility::{RevealChanges, VisibilityTracker};

/// Why an evaluation frame was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameReason {
    Mount,
    Scroll,
    Resize,
    Invalidate,
}

struct ObserverState {
    store: RevealStore,
    tracker: VisibilityTracker,
    frames: FrameScheduler<FrameReason>,
    pending: Option<FrameRequestId>,
    viewport: Viewport,
    scroll: ScrollPosition,
    leases: usize,
    listeners: Vec<Subscription>,
}

impl ObserverState {
    fn request_frame(&mut self, reason: FrameReason) {
        if self.pending.is_some_and(|id| self.frames.is_pending(id)) {
            return;
        }
        self.pending = Some(self.frames.request(reason));
    }

    fn cancel_frame(&mut self) {
        if let Some(id) = self.pending.take() {
            self.frames.cancel(id);
        }
    }
}

/// Lifecycle-scoped scroll reveal service
///
/// Cloning yields another handle to the same service.
#[derive(Clone)]
pub struct RevealObserver {
    state: Rc<RefCell<ObserverState>>,
}

impl std::fmt::Debug for RevealObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("RevealObserver")
            .field("tracked", &state.store.len())
            .field("leases", &state.leases)
            .field("viewport", &state.viewport)
            .finish()
    }
}

impl RevealObserver {
    pub fn new(viewport: Viewport, tracker: VisibilityTracker) -> Self {
        Self {
            state: Rc::new(RefCell::new(ObserverState {
                store: RevealStore::new(),
                tracker,
                frames: FrameScheduler::new(),
                pending: None,
                viewport,
                scroll: ScrollPosition::default(),
                leases: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Acquire the service for a mounted component
    ///
    /// The first lease attaches scroll and resize listeners to `dispatcher`
    /// and requests the initial evaluation, so content that is already in
    /// view reveals before any scroll happens.
    pub fn acquire(&self, dispatcher: &EventDispatcher) -> ObserverLease {
        let mut state = self.state.borrow_mut();
        state.leases += 1;

        if state.leases == 1 {
            let weak = Rc::downgrade(&self.state);
            let on_scroll = dispatcher.subscribe(EventType::Scroll, move |event| {
                if let (Some(state), Event::Scroll { scroll_y }) = (weak.upgrade(), event) {
                    let mut state = state.borrow_mut();
                    state.scroll.set(*scroll_y);
                    state.request_frame(FrameReason::Scroll);
                }
            });

            let weak = Rc::downgrade(&self.state);
            let on_resize = dispatcher.subscribe(EventType::Resize, move |event| {
                if let (Some(state), Event::Resize { viewport }) = (weak.upgrade(), event) {
                    let mut state = state.borrow_mut();
                    state.viewport = *viewport;
                    state.request_frame(FrameReason::Resize);
                }
            });

            state.listeners = vec![on_scroll, on_resize];
            state.request_frame(FrameReason::Mount);
            tracing::debug!("reveal observer attached");
        }

        ObserverLease {
            state: Rc::downgrade(&self.state),
        }
    }

    /// Number of outstanding leases
    pub fn lease_count(&self) -> usize {
        self.state.borrow().leases
    }

    pub fn is_attached(&self) -> bool {
        !self.state.borrow().listeners.is_empty()
    }

    /// Track an element and schedule an evaluation for it
    pub fn register(&self, element: TrackedElement) -> ElementId {
        let mut state = self.state.borrow_mut();
        let id = state.store.register(element);
        if state.leases > 0 {
            state.request_frame(FrameReason::Invalidate);
        }
        id
    }

    pub fn unregister(&self, id: ElementId) -> bool {
        self.state.borrow_mut().store.unregister(id).is_some()
    }

    pub fn is_revealed(&self, id: ElementId) -> bool {
        self.state.borrow().store.is_revealed(id)
    }

    /// Shared scroll offset, for building document-anchored bounds
    pub fn scroll_position(&self) -> ScrollPosition {
        self.state.borrow().scroll.clone()
    }

    pub fn viewport(&self) -> Viewport {
        self.state.borrow().viewport
    }

    /// Replace the viewport outside of a resize event
    pub fn set_viewport(&self, viewport: Viewport) {
        let mut state = self.state.borrow_mut();
        state.viewport = viewport;
        if state.leases > 0 {
            state.request_frame(FrameReason::Resize);
        }
    }

    /// Read the store
    pub fn with_store<R>(&self, f: impl FnOnce(&RevealStore) -> R) -> R {
        f(&self.state.borrow().store)
    }

    /// Mutate the store, then schedule a re-evaluation
    pub fn update_store<R>(&self, f: impl FnOnce(&mut RevealStore) -> R) -> R {
        let mut state = self.state.borrow_mut();
        let result = f(&mut state.store);
        state.request_frame(FrameReason::Invalidate);
        result
    }

    /// Request an evaluation on the next frame
    pub fn invalidate(&self) {
        self.state.borrow_mut().request_frame(FrameReason::Invalidate);
    }

    pub fn has_pending_frame(&self) -> bool {
        self.state.borrow().frames.has_pending()
    }

    /// Run the frame step: one evaluation if any event requested it
    pub fn run_frame(&self) -> RevealChanges {
        let mut state = self.state.borrow_mut();
        let reasons = state.frames.run_frame();
        state.pending = None;

        if reasons.is_empty() || state.leases == 0 {
            return RevealChanges::default();
        }
        tracing::trace!("reveal frame for {:?}", reasons);

        let ObserverState {
            store,
            tracker,
            viewport,
            ..
        } = &mut *state;
        tracker.evaluate(store, viewport.height)
    }
}

/// Keeps the observer's listeners attached while alive
#[must_use = "dropping the lease immediately releases the observer"]
pub struct ObserverLease {
    state: Weak<RefCell<ObserverState>>,
}

impl std::fmt::Debug for ObserverLease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverLease").finish_non_exhaustive()
    }
}

impl Drop for ObserverLease {
    fn drop(&mut self) {
        let Some(state) = self.state.upgrade() else {
            return;
        };
        // Subscriptions are dropped after the borrow is released
        let listeners = {
            let mut state = state.borrow_mut();
            state.leases = state.leases.saturating_sub(1);
            if state.leases > 0 {
                return;
            }
            state.cancel_frame();
            std::mem::take(&mut state.listeners)
        };
        drop(listeners);
        tracing::debug!("reveal observer detached");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::ElementRect;

    fn observer() -> RevealObserver {
        RevealObserver::new(Viewport::new(1280.0, 1000.0), VisibilityTracker::default())
    }

    #[test]
    fn test_initial_pass_reveals_visible_content() {
        let dispatcher = EventDispatcher::new();
        let observer = observer();
        let scroll = observer.scroll_position();
        let hero = observer.register(TrackedElement::new(
            "hero",
            scroll.anchor(ElementRect::with_height(100.0, 500.0)),
        ));

        let _lease = observer.acquire(&dispatcher);
        let changes = observer.run_frame();

        assert_eq!(changes.revealed, vec![hero]);
    }

    #[test]
    fn test_scroll_burst_coalesces_into_one_pass() {
        let dispatcher = EventDispatcher::new();
        let observer = observer();
        let scroll = observer.scroll_position();
        let card = observer.register(TrackedElement::new(
            "card",
            scroll.anchor(ElementRect::with_height(2000.0, 300.0)),
        ));
        let _lease = observer.acquire(&dispatcher);
        observer.run_frame();

        for y in (0..=1300).step_by(10) {
            dispatcher.dispatch(&Event::Scroll { scroll_y: y as f32 });
        }
        assert!(observer.has_pending_frame());

        let changes = observer.run_frame();
        assert_eq!(changes.revealed, vec![card]);
        assert!(!observer.has_pending_frame());
        assert_eq!(observer.state.borrow().tracker.passes(), 2);
    }

    #[test]
    fn test_resize_updates_viewport() {
        let dispatcher = EventDispatcher::new();
        let observer = observer();
        let card = observer.register(TrackedElement::new("card", || {
            Some(ElementRect::with_height(900.0, 100.0))
        }));
        let _lease = observer.acquire(&dispatcher);
        assert!(observer.run_frame().revealed.is_empty());

        dispatcher.dispatch(&Event::Resize {
            viewport: Viewport::new(1280.0, 1200.0),
        });
        assert_eq!(observer.run_frame().revealed, vec![card]);
    }

    #[test]
    fn test_viewport_set_before_mount_is_kept() {
        let dispatcher = EventDispatcher::new();
        let observer = observer();
        let card = observer.register(TrackedElement::new("card", || {
            Some(ElementRect::with_height(900.0, 100.0))
        }));

        observer.set_viewport(Viewport::new(1280.0, 1200.0));
        assert!(!observer.has_pending_frame());

        let _lease = observer.acquire(&dispatcher);
        assert_eq!(observer.run_frame().revealed, vec![card]);
    }

    #[test]
    fn test_repeated_mounts_share_one_listener_set() {
        let dispatcher = EventDispatcher::new();
        let observer = observer();

        let first = observer.acquire(&dispatcher);
        let second = observer.acquire(&dispatcher);
        assert_eq!(dispatcher.listener_count(EventType::Scroll), 1);
        assert_eq!(observer.lease_count(), 2);

        drop(first);
        assert!(observer.is_attached());

        drop(second);
        assert!(!observer.is_attached());
        assert!(!observer.has_pending_frame());
        assert_eq!(dispatcher.total_listeners(), 0);
    }

    #[test]
    fn test_no_evaluation_without_lease() {
        let dispatcher = EventDispatcher::new();
        let observer = observer();
        let card = observer.register(TrackedElement::new("card", || {
            Some(ElementRect::with_height(0.0, 100.0))
        }));

        dispatcher.dispatch(&Event::Scroll { scroll_y: 10.0 });
        observer.invalidate();
        assert!(observer.run_frame().is_empty());
        assert!(!observer.is_revealed(card));
    }
}
