//! Motions: things that map elapsed time to a [`VisualState`].

use web_time::Duration;

use super::state::VisualState;
use crate::util::easing::EasingFunction;

/// Defines how an element's state evolves over time.
///
/// Implementations are pure functions of elapsed time, so the registry can
/// sample them at any frame rate (or jump straight to the end).
pub trait Motion {
    /// State at `elapsed` time since the motion was started.
    fn sample(&self, elapsed: Duration) -> VisualState;

    /// Total duration including any delay. `None` runs forever.
    fn duration(&self) -> Option<Duration>;

    /// Optional name for debugging/logging.
    fn name(&self) -> &'static str {
        "unnamed"
    }
}

/// Progress of `elapsed` through a `duration`, clamped to `[0, 1]`.
#[inline]
#[must_use]
pub fn progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
}

/// Single eased interpolation between two states, after an optional delay.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    /// State held during the delay and at t=0.
    pub from: VisualState,
    /// State at t=1.
    pub to: VisualState,
    /// Hold time before interpolation starts.
    pub delay: Duration,
    /// Interpolation time.
    pub duration: Duration,
    /// Easing applied to progress.
    pub easing: EasingFunction,
}

impl Tween {
    /// Tween with no delay.
    #[must_use]
    pub fn new(
        from: VisualState,
        to: VisualState,
        duration: Duration,
        easing: EasingFunction,
    ) -> Self {
        Self {
            from,
            to,
            delay: Duration::ZERO,
            duration,
            easing,
        }
    }

    /// Set the hold time before interpolation.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Motion for Tween {
    fn sample(&self, elapsed: Duration) -> VisualState {
        let Some(active) = elapsed.checked_sub(self.delay) else {
            return self.from;
        };
        let t = progress(active, self.duration);
        self.from.lerp(&self.to, self.easing.evaluate(t))
    }

    fn duration(&self) -> Option<Duration> {
        Some(self.delay + self.duration)
    }

    fn name(&self) -> &'static str {
        "tween"
    }
}

/// One leg of a [`Keyframes`] sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// State reached at the end of this leg.
    pub target: VisualState,
    /// Length of this leg.
    pub duration: Duration,
    /// Easing within this leg.
    pub easing: EasingFunction,
}

impl Segment {
    /// Leg towards `target`.
    #[must_use]
    pub fn new(
        target: VisualState,
        duration: Duration,
        easing: EasingFunction,
    ) -> Self {
        Self {
            target,
            duration,
            easing,
        }
    }
}

/// Back-to-back segments starting from an initial state.
///
/// # Timing
///
/// Segment `i` starts when segment `i - 1` ends; each interpolates from the
/// previous segment's target (or the initial state) to its own target.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframes {
    initial: VisualState,
    segments: Vec<Segment>,
}

impl Keyframes {
    /// Empty sequence resting at `initial`.
    #[must_use]
    pub fn new(initial: VisualState) -> Self {
        Self {
            initial,
            segments: Vec::new(),
        }
    }

    /// Append a segment.
    #[must_use]
    pub fn then(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    /// The segments in play order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Sum of all segment durations.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.segments.iter().map(|s| s.duration).sum()
    }

    /// Index of the segment playing at `elapsed` (`None` once finished).
    #[must_use]
    pub fn segment_at(&self, elapsed: Duration) -> Option<usize> {
        let mut end = Duration::ZERO;
        for (i, segment) in self.segments.iter().enumerate() {
            end += segment.duration;
            if elapsed < end {
                return Some(i);
            }
        }
        None
    }

    /// Final state of the sequence.
    #[must_use]
    pub fn final_state(&self) -> VisualState {
        self.segments.last().map_or(self.initial, |s| s.target)
    }
}

impl Motion for Keyframes {
    fn sample(&self, elapsed: Duration) -> VisualState {
        let mut from = self.initial;
        let mut remaining = elapsed;
        for segment in &self.segments {
            if remaining < segment.duration {
                let t = progress(remaining, segment.duration);
                return from.lerp(&segment.target, segment.easing.evaluate(t));
            }
            remaining -= segment.duration;
            from = segment.target;
        }
        from
    }

    fn duration(&self) -> Option<Duration> {
        Some(self.total_duration())
    }

    fn name(&self) -> &'static str {
        "keyframes"
    }
}
