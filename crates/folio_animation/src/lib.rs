//! Folio Animation Timing
//!
//! Timing primitives for a single-threaded UI event loop.
//!
//! # Features
//!
//! - **Frame requests**: `requestAnimationFrame` semantics with explicit
//!   cancellation, so listeners can coalesce bursts of input into one update
//!   per rendered frame
//! - **Timers**: delayed payloads polled against an explicit clock
//! - **Stagger**: per-index entrance delays for lists of revealed items

pub mod frame;
pub mod stagger;
pub mod timer;

pub use frame::{FrameRequestId, FrameScheduler};
pub use stagger::Stagger;
pub use timer::{TimerId, TimerQueue};
