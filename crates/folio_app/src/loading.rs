//! Loading screen progress
//!
//! Progress climbs from 0 by a random step every tick until it reaches 100,
//! then the screen completes after a short hold. A maximum duration caps the
//! whole sequence: whichever comes first completes the screen. The page
//! mounts its reveal observer once loading completes.

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};
use std::time::{Duration, Instant};

use folio_animation::TimerQueue;

use crate::config::LoadingConfig;

/// Source of progress increments
pub trait StepSource {
    /// Next increment, within `1..=max`
    fn next_step(&mut self, max: u8) -> u8;
}

impl<F: FnMut(u8) -> u8> StepSource for F {
    fn next_step(&mut self, max: u8) -> u8 {
        self(max)
    }
}

/// Xorshift steps seeded from the process hasher keys
#[derive(Debug, Clone)]
pub struct RandomSteps {
    state: u64,
}

impl Default for RandomSteps {
    fn default() -> Self {
        let mut hasher = RandomState::new().build_hasher();
        hasher.write_u64(0x9e37_79b9_7f4a_7c15);
        Self {
            state: hasher.finish() | 1,
        }
    }
}

impl StepSource for RandomSteps {
    fn next_step(&mut self, max: u8) -> u8 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        (self.state % u64::from(max.max(1))) as u8 + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingPhase {
    Idle,
    Loading,
    /// At 100, waiting out the completion hold
    Finishing,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingEvent {
    Progress(u8),
    Complete,
}

#[derive(Debug, Clone, Copy)]
enum LoadingTimer {
    /// Scheduled tick, carrying its own deadline
    Tick(Instant),
    Complete,
    /// Maximum duration elapsed
    Deadline,
}

pub struct LoadingScreen {
    config: LoadingConfig,
    progress: u8,
    phase: LoadingPhase,
    timers: TimerQueue<LoadingTimer>,
    steps: Box<dyn StepSource>,
}

impl std::fmt::Debug for LoadingScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadingScreen")
            .field("progress", &self.progress)
            .field("phase", &self.phase)
            .finish()
    }
}

impl LoadingScreen {
    pub fn new(config: LoadingConfig) -> Self {
        Self::with_steps(config, RandomSteps::default())
    }

    /// Use a custom increment source
    pub fn with_steps(config: LoadingConfig, steps: impl StepSource + 'static) -> Self {
        Self {
            config,
            progress: 0,
            phase: LoadingPhase::Idle,
            timers: TimerQueue::new(),
            steps: Box::new(steps),
        }
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn phase(&self) -> LoadingPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == LoadingPhase::Complete
    }

    /// Begin ticking; does nothing once started
    pub fn start(&mut self, now: Instant) {
        if self.phase != LoadingPhase::Idle {
            return;
        }
        self.phase = LoadingPhase::Loading;
        if let Some(max) = self.config.max_duration() {
            self.timers.schedule(now, max, LoadingTimer::Deadline);
        }
        let first = now + self.config.tick();
        self.timers.schedule(now, self.config.tick(), LoadingTimer::Tick(first));
    }

    /// When the next tick, hold or cap fires
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Fire every timer due at `now` in deadline order, catching up on
    /// missed ticks
    pub fn poll(&mut self, now: Instant) -> Vec<LoadingEvent> {
        let mut events = Vec::new();
        while let Some(deadline) = self.timers.next_deadline().filter(|deadline| *deadline <= now) {
            for timer in self.timers.poll(deadline) {
                if self.is_complete() {
                    break;
                }
                match timer {
                    LoadingTimer::Tick(at) => self.tick(at, &mut events),
                    LoadingTimer::Complete => self.complete(&mut events),
                    LoadingTimer::Deadline => {
                        tracing::debug!("loading capped at {}%", self.progress);
                        self.complete(&mut events);
                    }
                }
            }
        }
        events
    }

    fn complete(&mut self, events: &mut Vec<LoadingEvent>) {
        self.phase = LoadingPhase::Complete;
        self.timers.clear();
        tracing::info!("loading complete");
        events.push(LoadingEvent::Complete);
    }

    fn tick(&mut self, at: Instant, events: &mut Vec<LoadingEvent>) {
        let step = self.steps.next_step(self.config.max_step).clamp(1, self.config.max_step.max(1));
        self.progress = self.progress.saturating_add(step).min(100);
        events.push(LoadingEvent::Progress(self.progress));

        if self.progress >= 100 {
            self.phase = LoadingPhase::Finishing;
            self.timers.schedule(at, self.config.completion_delay(), LoadingTimer::Complete);
        } else {
            let next = at + self.config.tick();
            self.timers.schedule(at, self.config.tick(), LoadingTimer::Tick(next));
        }
    }

    /// Upper bound on the time to completion from start
    pub fn worst_case(&self) -> Duration {
        let uncapped = self.config.tick() * 100 + self.config.completion_delay();
        match self.config.max_duration() {
            Some(max) => uncapped.min(max),
            None => uncapped,
        }
    }

    /// Cancel pending timers (component teardown)
    pub fn teardown(&mut self) {
        self.timers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(step: u8) -> impl FnMut(u8) -> u8 {
        move |_| step
    }

    #[test]
    fn test_progress_climbs_each_tick() {
        let start = Instant::now();
        let mut screen = LoadingScreen::with_steps(LoadingConfig::default(), fixed(7));
        screen.start(start);

        assert!(screen.poll(start + Duration::from_millis(199)).is_empty());
        assert_eq!(
            screen.poll(start + Duration::from_millis(200)),
            vec![LoadingEvent::Progress(7)]
        );
        assert_eq!(
            screen.poll(start + Duration::from_millis(600)),
            vec![LoadingEvent::Progress(14), LoadingEvent::Progress(21)]
        );
    }

    #[test]
    fn test_completion_after_hold() {
        let start = Instant::now();
        let mut screen = LoadingScreen::with_steps(LoadingConfig::default(), fixed(10));
        screen.start(start);

        // Ten ticks reach 100 at 2000ms
        let events = screen.poll(start + Duration::from_millis(2000));
        assert_eq!(events.last(), Some(&LoadingEvent::Progress(100)));
        assert_eq!(screen.phase(), LoadingPhase::Finishing);

        assert!(screen.poll(start + Duration::from_millis(2499)).is_empty());
        assert_eq!(
            screen.poll(start + Duration::from_millis(2500)),
            vec![LoadingEvent::Complete]
        );
        assert!(screen.is_complete());
    }

    #[test]
    fn test_progress_is_capped() {
        let start = Instant::now();
        let mut screen = LoadingScreen::with_steps(LoadingConfig::default(), fixed(30));
        screen.start(start);

        let events = screen.poll(start + Duration::from_secs(10));
        assert_eq!(
            events,
            vec![
                LoadingEvent::Progress(30),
                LoadingEvent::Progress(60),
                LoadingEvent::Progress(90),
                LoadingEvent::Progress(100),
                LoadingEvent::Complete,
            ]
        );
    }

    #[test]
    fn test_max_duration_caps_slow_progress() {
        let start = Instant::now();
        let mut screen = LoadingScreen::with_steps(LoadingConfig::default(), fixed(1));
        screen.start(start);
        assert_eq!(screen.worst_case(), Duration::from_millis(3000));

        assert_eq!(screen.poll(start + Duration::from_millis(2999)).len(), 14);
        assert_eq!(screen.next_deadline(), Some(start + Duration::from_millis(3000)));

        // The cap and the fifteenth tick share a deadline; the cap wins
        assert_eq!(
            screen.poll(start + Duration::from_secs(10)),
            vec![LoadingEvent::Complete]
        );
        assert!(screen.is_complete());
        assert_eq!(screen.progress(), 14);
        assert_eq!(screen.next_deadline(), None);
    }

    #[test]
    fn test_late_poll_catches_up_in_order() {
        let start = Instant::now();
        let mut screen = LoadingScreen::with_steps(LoadingConfig::default(), fixed(1));
        screen.start(start);

        let events = screen.poll(start + Duration::from_secs(10));
        assert_eq!(events.len(), 15);
        assert_eq!(events[13], LoadingEvent::Progress(14));
        assert_eq!(events.last(), Some(&LoadingEvent::Complete));
    }

    #[test]
    fn test_uncapped_screen_waits_for_progress() {
        let start = Instant::now();
        let config = LoadingConfig {
            max_duration_ms: 0,
            ..LoadingConfig::default()
        };
        let mut screen = LoadingScreen::with_steps(config, fixed(1));
        screen.start(start);

        assert!(!screen.poll(start + Duration::from_secs(10)).contains(&LoadingEvent::Complete));
        assert_eq!(screen.progress(), 50);
        assert_eq!(screen.worst_case(), Duration::from_millis(20_500));
    }

    #[test]
    fn test_random_steps_stay_in_range() {
        let mut steps = RandomSteps::default();
        for _ in 0..1000 {
            let step = steps.next_step(10);
            assert!((1..=10).contains(&step));
        }
    }

    #[test]
    fn test_random_screen_completes_within_worst_case() {
        let start = Instant::now();
        let mut screen = LoadingScreen::new(LoadingConfig::default());
        screen.start(start);

        let events = screen.poll(start + screen.worst_case());
        assert_eq!(events.last(), Some(&LoadingEvent::Complete));
    }

    #[test]
    fn test_teardown_stops_ticks() {
        let start = Instant::now();
        let mut screen = LoadingScreen::with_steps(LoadingConfig::default(), fixed(5));
        screen.start(start);
        assert_eq!(screen.next_deadline(), Some(start + Duration::from_millis(200)));
        screen.teardown();

        assert_eq!(screen.next_deadline(), None);
        assert!(screen.poll(start + Duration::from_secs(5)).is_empty());
        assert_eq!(screen.progress(), 0);
    }
}
