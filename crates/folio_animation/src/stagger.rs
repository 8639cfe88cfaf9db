//! Staggered entrance delays
//!
//! Lists of revealed items play their entrance one after another: item `i`
//! starts `base + step * i` after the list is revealed.

use std::time::Duration;

/// Linear per-index delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stagger {
    pub base: Duration,
    pub step: Duration,
}

impl Stagger {
    pub const fn new(base: Duration, step: Duration) -> Self {
        Self { base, step }
    }

    /// Timeline entries: 200ms lead-in, 100ms apart
    pub const fn timeline() -> Self {
        Self::new(Duration::from_millis(200), Duration::from_millis(100))
    }

    /// Project cards and tab buttons: 100ms apart
    pub const fn cards() -> Self {
        Self::new(Duration::ZERO, Duration::from_millis(100))
    }

    /// Skill cards inside the active category: 50ms apart
    pub const fn skills() -> Self {
        Self::new(Duration::ZERO, Duration::from_millis(50))
    }

    /// Delay before item `index` starts its entrance
    pub fn delay_for(&self, index: usize) -> Duration {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        self.base + self.step.saturating_mul(index)
    }

    /// Delays for the first `count` items
    pub fn delays(&self, count: usize) -> impl Iterator<Item = Duration> + '_ {
        (0..count).map(move |index| self.delay_for(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeline_delays() {
        let delays: Vec<_> = Stagger::timeline().delays(3).collect();
        assert_eq!(
            delays,
            vec![
                Duration::from_millis(200),
                Duration::from_millis(300),
                Duration::from_millis(400)
            ]
        );
    }

    #[test]
    fn test_skill_cards_start_immediately() {
        let stagger = Stagger::skills();
        assert_eq!(stagger.delay_for(0), Duration::ZERO);
        assert_eq!(stagger.delay_for(4), Duration::from_millis(200));
    }
}
