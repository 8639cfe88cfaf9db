//! Folio application
//!
//! Ties the engine crates together into a headless portfolio page:
//! configuration from `folio.toml`, the loading screen, a document layout
//! built from the content catalog, and the [`Page`] that routes events to
//! every subsystem.
//!
//! # Example
//!
//! ```rust
//! use folio_app::{AppConfig, Page};
//! use folio_core::Viewport;
//!
//! let mut page = Page::builtin(AppConfig::default(), Viewport::new(1280.0, 800.0)).unwrap();
//! page.mount();
//! page.run_frame();
//!
//! page.scroll_to_section("skills");
//! page.run_frame();
//! assert_eq!(page.state().active_section.as_deref(), Some("skills"));
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod loading;
pub mod page;

pub use config::{AppConfig, LoadingConfig, NavigationConfig, RevealConfig, CONFIG_FILE};
pub use document::{DocumentLayout, ItemPlacement, TabSlot};
pub use error::{AppError, Result};
pub use loading::{LoadingEvent, LoadingPhase, LoadingScreen, RandomSteps, StepSource};
pub use page::{FrameReport, Page, PageEvent, PageState, Reveal};
