//! Idle detection as an explicit state machine.

use serde::Serialize;
use web_time::{Duration, Instant};

use crate::input::ActivityKind;
use crate::options::IdleOptions;
use crate::util::millis;

/// Edge reported when the idle state flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdleTransition {
    /// No watched activity for the full timeout.
    Started,
    /// Watched activity arrived while idle.
    Ended,
}

/// Detector state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdlePhase {
    /// Counting down towards idle.
    Active,
    /// Idle since the given instant.
    Idle {
        /// When the timeout elapsed.
        since: Instant,
    },
    /// Torn down; ignores everything.
    Stopped,
}

/// Snapshot of the detector for consumers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivityState {
    /// Whether the page is idle.
    pub is_idle: bool,
    /// Idle ramp progress in `[0, 1]`; zero while active.
    pub idle_progress: f32,
    /// Last watched activity.
    pub last_activity: Instant,
}

/// Raises idle after a period without watched input.
///
/// Time is passed in by the host: [`tick`](Self::tick) must be called
/// regularly (every frame is fine) for the timeout to be observed.
#[derive(Debug, Clone)]
pub struct IdleDetector {
    timeout: Duration,
    ramp: Duration,
    watched: Vec<ActivityKind>,
    last_activity: Instant,
    phase: IdlePhase,
}

impl IdleDetector {
    /// Detector armed at `now`.
    #[must_use]
    pub fn new(options: &IdleOptions, now: Instant) -> Self {
        let mut watched = options.watched.clone();
        for kind in ActivityKind::ALWAYS_WATCHED {
            if !watched.contains(&kind) {
                watched.push(kind);
            }
        }
        Self {
            timeout: millis(options.timeout_ms),
            ramp: millis(options.ramp_ms),
            watched,
            last_activity: now,
            phase: IdlePhase::Active,
        }
    }

    /// Whether `kind` resets the timer.
    #[must_use]
    pub fn watches(&self, kind: ActivityKind) -> bool {
        self.watched.contains(&kind)
    }

    /// Record user activity.
    ///
    /// Restarts the countdown and, if the page was idle, reports
    /// [`IdleTransition::Ended`].
    pub fn handle_activity(
        &mut self,
        kind: ActivityKind,
        now: Instant,
    ) -> Option<IdleTransition> {
        if self.phase == IdlePhase::Stopped || !self.watches(kind) {
            return None;
        }
        self.last_activity = now;
        match self.phase {
            IdlePhase::Idle { .. } => {
                self.phase = IdlePhase::Active;
                log::debug!("idle ended by {kind:?}");
                Some(IdleTransition::Ended)
            }
            IdlePhase::Active | IdlePhase::Stopped => None,
        }
    }

    /// Advance the clock. Reports [`IdleTransition::Started`] once the
    /// timeout has elapsed without activity.
    pub fn tick(&mut self, now: Instant) -> Option<IdleTransition> {
        if self.phase != IdlePhase::Active {
            return None;
        }
        if self.time_since_activity(now) < self.timeout {
            return None;
        }
        self.phase = IdlePhase::Idle {
            since: self.last_activity + self.timeout,
        };
        log::debug!("idle after {:?}", self.timeout);
        Some(IdleTransition::Started)
    }

    /// Whether the page is idle.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self.phase, IdlePhase::Idle { .. })
    }

    /// Current state.
    #[must_use]
    pub fn phase(&self) -> IdlePhase {
        self.phase
    }

    /// Time since the last watched activity.
    #[must_use]
    pub fn time_since_activity(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_activity)
    }

    /// Idle ramp progress: 0 while active, rising linearly to 1 over the
    /// ramp time once idle.
    #[must_use]
    pub fn idle_progress(&self, now: Instant) -> f32 {
        let IdlePhase::Idle { since } = self.phase else {
            return 0.0;
        };
        if self.ramp.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(since);
        (elapsed.as_secs_f32() / self.ramp.as_secs_f32()).min(1.0)
    }

    /// Snapshot for consumers.
    #[must_use]
    pub fn state(&self, now: Instant) -> ActivityState {
        ActivityState {
            is_idle: self.is_idle(),
            idle_progress: self.idle_progress(now),
            last_activity: self.last_activity,
        }
    }

    /// When the page will go idle if nothing happens (`None` unless active).
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        (self.phase == IdlePhase::Active)
            .then(|| self.last_activity + self.timeout)
    }

    /// Re-arm from scratch at `now` (also revives a torn-down detector).
    pub fn reset(&mut self, now: Instant) {
        self.last_activity = now;
        self.phase = IdlePhase::Active;
    }

    /// Stop for good: no transition is reported afterwards.
    pub fn teardown(&mut self) {
        self.phase = IdlePhase::Stopped;
    }
}
