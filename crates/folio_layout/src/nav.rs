//! Mobile navigation menu
//!
//! The menu closes when the pointer goes down anywhere outside the menu
//! container and its toggle button. Picking a link closes the menu first and
//! scrolls a short moment later, so the collapse animation is not cut off by
//! the scroll.

use std::time::{Duration, Instant};

use folio_animation::{TimerId, TimerQueue};
use folio_core::Event;

/// Region key of the dropdown container
pub const MENU_CONTAINER: &str = "mobile-menu-container";

/// Region key of the hamburger toggle
pub const MENU_BUTTON: &str = "mobile-menu-button";

/// Delay between closing the menu and starting the scroll
pub const NAVIGATE_DELAY: Duration = Duration::from_millis(100);

/// Open/closed state of the mobile menu plus its pending navigation
#[derive(Debug, Default)]
pub struct NavMenu {
    open: bool,
    timers: TimerQueue<String>,
    pending_navigation: Option<TimerId>,
}

impl NavMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Page scrolling is locked while the menu covers it
    pub fn locks_body_scroll(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
        tracing::debug!("nav menu {}", if self.open { "opened" } else { "closed" });
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Handle a pointer-down; returns true if it closed the menu
    pub fn on_pointer_down(&mut self, event: &Event) -> bool {
        if !self.open || event.is_within(MENU_CONTAINER) || event.is_within(MENU_BUTTON) {
            return false;
        }
        self.open = false;
        true
    }

    /// Close the menu and schedule a scroll to `section_id`
    ///
    /// A newer navigation replaces one that has not fired yet.
    pub fn navigate_to(&mut self, section_id: impl Into<String>, now: Instant) {
        self.open = false;
        if let Some(previous) = self.pending_navigation.take() {
            self.timers.cancel(previous);
        }
        self.pending_navigation = Some(self.timers.schedule(now, NAVIGATE_DELAY, section_id.into()));
    }

    pub fn has_pending_navigation(&self) -> bool {
        self.pending_navigation
            .is_some_and(|id| self.timers.is_scheduled(id))
    }

    /// When the pending navigation fires
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Section to scroll to, once the navigation delay has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let target = self.timers.poll(now).pop()?;
        self.pending_navigation = None;
        Some(target)
    }

    /// Drop any pending navigation (component teardown)
    pub fn teardown(&mut self) {
        self.timers.clear();
        self.pending_navigation = None;
        self.open = false;
    }
}
