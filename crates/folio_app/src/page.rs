//! Page composition
//!
//! [`Page`] wires every subsystem to one event dispatcher:
//!
//! - the loading screen ticks until complete, then the reveal observer is
//!   mounted and performs its initial pass
//! - scroll events move the active section and, through the observer, drive
//!   reveal passes once per frame
//! - pointer events feed the cursor follower and close the mobile menu
//! - tab selections reset and replay their items' entrances
//!
//! Time is always passed in explicitly, so a page can be driven headlessly.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use folio_contact::ContactForm;
use folio_content::Catalog;
use folio_core::{ElementRect, Event, EventDispatcher, EventType, Subscription, Viewport};
use folio_layout::{
    is_scrolled, scroll_progress, AboutTab, CursorFollower, CursorStyle, ElementId, NavMenu, ObserverLease,
    RevealObserver, SectionResolver, TabGroup, TrackedElement, VisibilityTracker,
};
use rustc_hash::FxHashMap;

use crate::config::AppConfig;
use crate::document::{DocumentLayout, TabSlot};
use crate::error::Result;
use crate::loading::{LoadingEvent, LoadingScreen};

/// Something that happened while advancing timers
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    LoadingProgress(u8),
    /// Loading finished and the reveal observer is mounted
    Mounted,
    /// A menu navigation scrolled the page
    Navigated { section: String, scroll_y: f32 },
    /// The contact success banner was hidden
    BannerHidden,
}

/// An element revealed in a frame, with its entrance delay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    pub key: String,
    pub delay: Duration,
}

/// What one rendered frame changed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub revealed: Vec<Reveal>,
    pub concealed: Vec<String>,
    pub cursor_moved: bool,
}

impl FrameReport {
    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty() && self.concealed.is_empty() && !self.cursor_moved
    }
}

/// Snapshot of everything the presentation layer renders
#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    pub scroll_y: f32,
    pub active_section: Option<String>,
    /// Compact header style
    pub scrolled: bool,
    pub scroll_progress: f32,
    pub menu_open: bool,
    pub body_scroll_locked: bool,
    pub loading_progress: u8,
    pub mounted: bool,
    pub about_tab: Option<AboutTab>,
    pub skill_category: usize,
    pub cursor: CursorStyle,
    pub revealed: usize,
    pub tracked: usize,
}

pub struct Page {
    config: AppConfig,
    catalog: Catalog,
    layout: DocumentLayout,
    dispatcher: EventDispatcher,
    observer: RevealObserver,
    lease: Option<ObserverLease>,
    resolver: Rc<RefCell<SectionResolver>>,
    nav: Rc<RefCell<NavMenu>>,
    cursor: Rc<RefCell<CursorFollower>>,
    contact: Rc<RefCell<ContactForm>>,
    about_tabs: TabGroup<AboutTab>,
    skill_tabs: TabGroup<usize>,
    loading: LoadingScreen,
    keys: FxHashMap<ElementId, (String, Duration)>,
    /// Document rects by item key, rewritten on relayout
    rects: FxHashMap<String, Rc<Cell<ElementRect>>>,
    listeners: Vec<Subscription>,
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("observer", &self.observer)
            .field("mounted", &self.lease.is_some())
            .field("loading", &self.loading)
            .finish_non_exhaustive()
    }
}

impl Page {
    pub fn new(config: AppConfig, catalog: Catalog, viewport: Viewport) -> Self {
        let loading = LoadingScreen::new(config.loading.clone());
        Self::with_loading(config, catalog, viewport, loading)
    }

    /// Build a page with a custom loading screen
    pub fn with_loading(config: AppConfig, catalog: Catalog, viewport: Viewport, loading: LoadingScreen) -> Self {
        let layout = DocumentLayout::build(&catalog, &config.navigation, &config.reveal, viewport);
        let dispatcher = EventDispatcher::new();
        let observer = RevealObserver::new(viewport, VisibilityTracker::new(config.reveal.threshold));

        let mut resolver =
            SectionResolver::new(config.navigation.probe_offset).with_initial(config.navigation.initial_section.clone());
        resolver.update_layout(layout.sections.clone());

        let mut about_tabs = AboutTab::group();
        let mut skill_tabs = TabGroup::new();
        for (index, category) in catalog.skill_categories.iter().enumerate() {
            skill_tabs.push(index, category.name.clone(), None);
        }

        let scroll = observer.scroll_position();
        let mut keys = FxHashMap::default();
        let mut rects = FxHashMap::default();
        for item in &layout.items {
            let rect = Rc::new(Cell::new(item.rect));
            let bounds = {
                let rect = Rc::clone(&rect);
                let scroll = scroll.clone();
                move || Some(rect.get().relative_to_scroll(scroll.get()))
            };
            rects.insert(item.key.clone(), rect);
            let mut element = TrackedElement::new(item.key.clone(), bounds).mode(item.mode);
            if let Some(ratio) = item.threshold {
                element = element.threshold(ratio);
            }
            let id = observer.register(element);
            match item.tab {
                Some(TabSlot::About(tab)) => {
                    about_tabs.add_child(&tab, id);
                }
                Some(TabSlot::SkillCategory(index)) => {
                    skill_tabs.add_child(&index, id);
                }
                None => {}
            }
            keys.insert(id, (item.key.clone(), item.delay));
        }
        observer.update_store(|store| {
            about_tabs.sync(store);
            skill_tabs.sync(store);
        });

        let mut page = Self {
            config,
            catalog,
            layout,
            dispatcher,
            observer,
            lease: None,
            resolver: Rc::new(RefCell::new(resolver)),
            nav: Rc::new(RefCell::new(NavMenu::new())),
            cursor: Rc::new(RefCell::new(CursorFollower::new(viewport))),
            contact: Rc::new(RefCell::new(ContactForm::new())),
            about_tabs,
            skill_tabs,
            loading,
            keys,
            rects,
            listeners: Vec::new(),
        };
        page.attach_listeners();
        tracing::debug!("page built: {} tracked element(s), {} section(s)", page.keys.len(), page.layout.sections.len());
        page
    }

    fn attach_listeners(&mut self) {
        let resolver = Rc::clone(&self.resolver);
        let scroll = self.observer.scroll_position();
        self.listeners.push(self.dispatcher.subscribe(EventType::Scroll, move |event| {
            if let Event::Scroll { scroll_y } = event {
                scroll.set(*scroll_y);
                resolver.borrow_mut().resolve(*scroll_y);
            }
        }));

        let nav = Rc::clone(&self.nav);
        self.listeners.push(self.dispatcher.subscribe(EventType::MouseDown, move |event| {
            nav.borrow_mut().on_pointer_down(event);
        }));

        for event_type in [
            EventType::MouseMove,
            EventType::MouseDown,
            EventType::MouseUp,
            EventType::InteractiveEnter,
            EventType::InteractiveLeave,
            EventType::DocumentEnter,
            EventType::DocumentLeave,
        ] {
            let cursor = Rc::clone(&self.cursor);
            self.listeners.push(self.dispatcher.subscribe(event_type, move |event| {
                cursor.borrow_mut().handle(event);
            }));
        }
    }

    /// Page over the built-in catalog
    pub fn builtin(config: AppConfig, viewport: Viewport) -> Result<Self> {
        Ok(Self::new(config, Catalog::builtin()?, viewport))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn layout(&self) -> &DocumentLayout {
        &self.layout
    }

    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    pub fn observer(&self) -> &RevealObserver {
        &self.observer
    }

    /// Shared contact form, for driving it through a `ContactSession`
    pub fn contact(&self) -> Rc<RefCell<ContactForm>> {
        Rc::clone(&self.contact)
    }

    pub fn is_mounted(&self) -> bool {
        self.lease.is_some()
    }

    /// Start the loading screen
    pub fn start(&mut self, now: Instant) {
        self.loading.start(now);
    }

    /// Mount the reveal observer now, skipping the loading screen
    pub fn mount(&mut self) {
        if self.lease.is_none() {
            self.lease = Some(self.observer.acquire(&self.dispatcher));
            tracing::info!("page mounted");
        }
    }

    /// Advance every timer to `now`
    pub fn tick(&mut self, now: Instant) -> Vec<PageEvent> {
        let mut events = Vec::new();

        for event in self.loading.poll(now) {
            match event {
                LoadingEvent::Progress(progress) => events.push(PageEvent::LoadingProgress(progress)),
                LoadingEvent::Complete => {
                    self.mount();
                    events.push(PageEvent::Mounted);
                }
            }
        }

        let target = self.nav.borrow_mut().poll(now);
        if let Some(section) = target {
            if let Some(scroll_y) = self.scroll_to_section(&section) {
                events.push(PageEvent::Navigated { section, scroll_y });
            }
        }

        if self.contact.borrow_mut().poll(now) {
            events.push(PageEvent::BannerHidden);
        }
        events
    }

    /// Earliest time at which [`tick`](Self::tick) has work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.loading.next_deadline(),
            self.nav.borrow().next_deadline(),
            self.contact.borrow().next_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    pub fn dispatch(&self, event: &Event) -> usize {
        self.dispatcher.dispatch(event)
    }

    pub fn scroll_y(&self) -> f32 {
        self.observer.scroll_position().get()
    }

    fn max_scroll(&self) -> f32 {
        (self.layout.height - self.observer.viewport().height).max(0.0)
    }

    /// Scroll to `scroll_y`, clamped to the document
    ///
    /// The offset is recorded even while nothing listens, so a later mount
    /// evaluates against it.
    pub fn scroll_to(&self, scroll_y: f32) -> f32 {
        let scroll_y = scroll_y.clamp(0.0, self.max_scroll());
        self.observer.scroll_position().set(scroll_y);
        self.resolver.borrow_mut().resolve(scroll_y);
        self.dispatch(&Event::Scroll { scroll_y });
        scroll_y
    }

    /// Scroll a section to just below the fixed header
    pub fn scroll_to_section(&self, id: &str) -> Option<f32> {
        let top = self.resolver.borrow().scroll_target(id)?;
        Some(self.scroll_to(top - self.config.navigation.header_height))
    }

    /// Change the viewport and lay the document out again
    pub fn resize(&mut self, viewport: Viewport) {
        self.relayout(viewport);
        self.dispatch(&Event::Resize { viewport });
    }

    fn relayout(&mut self, viewport: Viewport) {
        self.layout = DocumentLayout::build(&self.catalog, &self.config.navigation, &self.config.reveal, viewport);
        for item in &self.layout.items {
            if let Some(rect) = self.rects.get(&item.key) {
                rect.set(item.rect);
            }
        }

        self.observer.set_viewport(viewport);
        let scroll = self.observer.scroll_position();
        scroll.set(scroll.get().clamp(0.0, (self.layout.height - viewport.height).max(0.0)));
        let mut resolver = self.resolver.borrow_mut();
        resolver.update_layout(self.layout.sections.clone());
        resolver.resolve(scroll.get());
        tracing::debug!("relayout for {}x{}: height {}", viewport.width, viewport.height, self.layout.height);
    }

    pub fn toggle_menu(&self) {
        self.nav.borrow_mut().toggle();
    }

    /// Close the menu and scroll to `id` once the menu has collapsed
    pub fn navigate_to(&self, id: &str, now: Instant) {
        self.nav.borrow_mut().navigate_to(id, now);
    }

    pub fn select_about_tab(&mut self, tab: AboutTab) -> bool {
        self.about_tabs.select_observed(&tab, &self.observer)
    }

    pub fn select_skill_category(&mut self, index: usize) -> bool {
        let tabs = &mut self.skill_tabs;
        self.observer.update_store(|store| tabs.select_index(index, store))
    }

    /// Run one rendered frame
    pub fn run_frame(&self) -> FrameReport {
        let changes = self.observer.run_frame();
        let cursor_moved = self.cursor.borrow_mut().run_frame();

        let revealed = changes
            .revealed
            .iter()
            .filter_map(|id| self.keys.get(id))
            .map(|(key, delay)| Reveal {
                key: key.clone(),
                delay: *delay,
            })
            .collect();
        let concealed = changes
            .concealed
            .iter()
            .filter_map(|id| self.keys.get(id))
            .map(|(key, _)| key.clone())
            .collect();

        FrameReport {
            revealed,
            concealed,
            cursor_moved,
        }
    }

    pub fn is_revealed(&self, key: &str) -> bool {
        self.observer
            .with_store(|store| store.find(key).is_some_and(|id| store.is_revealed(id)))
    }

    pub fn state(&self) -> PageState {
        let scroll_y = self.scroll_y();
        let viewport = self.observer.viewport();
        let nav = self.nav.borrow();
        let (revealed, tracked) = self.observer.with_store(|store| (store.revealed_ids().len(), store.len()));

        PageState {
            scroll_y,
            active_section: self.resolver.borrow().active().map(str::to_string),
            scrolled: is_scrolled(scroll_y),
            scroll_progress: scroll_progress(scroll_y, self.layout.height, viewport.height),
            menu_open: nav.is_open(),
            body_scroll_locked: nav.locks_body_scroll(),
            loading_progress: self.loading.progress(),
            mounted: self.is_mounted(),
            about_tab: self.about_tabs.active_key().copied(),
            skill_category: self.skill_tabs.active_index(),
            cursor: self.cursor.borrow().style(),
            revealed,
            tracked,
        }
    }

    /// Release listeners and cancel every pending frame and timer
    pub fn teardown(&mut self) {
        self.lease = None;
        self.listeners.clear();
        self.cursor.borrow_mut().teardown();
        self.nav.borrow_mut().teardown();
        self.contact.borrow_mut().teardown();
        self.loading.teardown();
        tracing::debug!("page torn down");
    }
}
