//! Staggered start times for groups of elements.

use web_time::Duration;

/// Per-index start delays for a group animating together.
///
/// Creates a "wave" across the group: member `i` starts at
/// `base_delay + i * interval`.
///
/// # Timing
///
/// - Member 0: starts at `base_delay`
/// - Member 1: starts at `base_delay + interval`
/// - Member N: starts at `base_delay + N * interval`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stagger {
    /// Delay before the first member starts.
    pub base_delay: Duration,
    /// Delay between consecutive members starting.
    pub interval: Duration,
}

impl Stagger {
    /// Stagger with no base delay.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            base_delay: Duration::ZERO,
            interval,
        }
    }

    /// Set the delay before the first member.
    #[must_use]
    pub const fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Start delay for the member at `index`.
    #[must_use]
    pub fn delay_for(&self, index: usize) -> Duration {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        self.base_delay
            .saturating_add(self.interval.saturating_mul(index))
    }

    /// Time until the last of `count` members finishes a `duration` motion.
    #[must_use]
    pub fn total_duration_for(&self, count: usize, duration: Duration) -> Duration {
        if count == 0 {
            return Duration::ZERO;
        }
        self.delay_for(count - 1).saturating_add(duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_grow_linearly() {
        let stagger = Stagger::new(Duration::from_millis(100))
            .with_base_delay(Duration::from_millis(200));
        assert_eq!(stagger.delay_for(0), Duration::from_millis(200));
        assert_eq!(stagger.delay_for(3), Duration::from_millis(500));
    }

    #[test]
    fn total_duration() {
        let stagger = Stagger::new(Duration::from_millis(20));
        let d = Duration::from_millis(300);
        assert_eq!(stagger.total_duration_for(0, d), Duration::ZERO);
        assert_eq!(stagger.total_duration_for(1, d), d);
        assert_eq!(
            stagger.total_duration_for(5, d),
            Duration::from_millis(380)
        );
    }

    #[test]
    fn huge_index_saturates() {
        let stagger = Stagger::new(Duration::MAX);
        assert_eq!(stagger.delay_for(usize::MAX), Duration::MAX);
    }
}
