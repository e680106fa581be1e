//! Explicitly owned element → motion map.

use rustc_hash::FxHashMap;
use web_time::Instant;

use super::state::VisualState;
use super::tween::Motion;
use crate::surface::{ElementId, Surface};

/// Identifies one started motion.
///
/// Handles are never reused, so a stale handle can be told apart from the
/// motion that replaced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MotionHandle(u64);

impl MotionHandle {
    /// Raw generation number.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

struct ActiveMotion {
    motion: Box<dyn Motion>,
    started: Instant,
    handle: MotionHandle,
}

/// A motion that ran to completion during [`AnimationRegistry::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finished {
    /// Element the motion was running on.
    pub id: ElementId,
    /// Handle returned when the motion was started.
    pub handle: MotionHandle,
}

/// Owns every running motion, at most one per element.
///
/// Starting a motion on an element that is already animating replaces the
/// old one (restart preemption). The last state written for each element is
/// remembered so a replacement can start from where the element actually
/// is.
#[derive(Default)]
pub struct AnimationRegistry {
    active: FxHashMap<ElementId, ActiveMotion>,
    last: FxHashMap<ElementId, VisualState>,
    next_handle: u64,
}

impl AnimationRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `motion` on `id` at `now`, replacing any motion already there.
    pub fn start<M: Motion + 'static>(
        &mut self,
        id: ElementId,
        motion: M,
        now: Instant,
    ) -> MotionHandle {
        let handle = MotionHandle(self.next_handle);
        self.next_handle += 1;

        let entry = ActiveMotion {
            motion: Box::new(motion),
            started: now,
            handle,
        };
        if let Some(old) = self.active.insert(id, entry) {
            log::trace!(
                "{id}: '{}' preempted by '{}'",
                old.motion.name(),
                self.active
                    .get(&id)
                    .map_or("unnamed", |m| m.motion.name())
            );
        }
        handle
    }

    /// Stop the motion on `id`, leaving the element where it is.
    ///
    /// Returns whether a motion was running.
    pub fn cancel(&mut self, id: ElementId) -> bool {
        self.active.remove(&id).is_some()
    }

    /// Stop every motion. Returns how many were running.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.active.len();
        self.active.clear();
        count
    }

    /// Jump the motion on `id` to its end state, write it, and remove it.
    ///
    /// Unbounded motions are simply cancelled.
    pub fn finish(&mut self, id: ElementId, surface: &mut dyn Surface) -> bool {
        let Some(active) = self.active.remove(&id) else {
            return false;
        };
        if let Some(duration) = active.motion.duration() {
            let state = active.motion.sample(duration);
            self.write(id, &state, surface);
        }
        true
    }

    /// Whether `id` has a running motion.
    #[must_use]
    pub fn is_animating(&self, id: ElementId) -> bool {
        self.active.contains_key(&id)
    }

    /// Handle of the motion running on `id`.
    #[must_use]
    pub fn handle(&self, id: ElementId) -> Option<MotionHandle> {
        self.active.get(&id).map(|m| m.handle)
    }

    /// Number of running motions.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Last state written for `id` by this registry.
    #[must_use]
    pub fn current(&self, id: ElementId) -> Option<VisualState> {
        self.last.get(&id).copied()
    }

    /// Write `state` to `id` directly, cancelling any running motion.
    pub fn set(
        &mut self,
        id: ElementId,
        state: &VisualState,
        surface: &mut dyn Surface,
    ) {
        let _ = self.active.remove(&id);
        self.write(id, state, surface);
    }

    /// Sample every running motion at `now` and write the results.
    ///
    /// Motions that reached their end are written one final time, removed,
    /// and returned sorted by element.
    pub fn update(
        &mut self,
        now: Instant,
        surface: &mut dyn Surface,
    ) -> Vec<Finished> {
        let mut finished = Vec::new();
        for (id, active) in &self.active {
            let elapsed = now.saturating_duration_since(active.started);
            let state = active.motion.sample(elapsed);
            surface.apply(*id, &state);
            let _ = self.last.insert(*id, state);

            if active.motion.duration().is_some_and(|d| elapsed >= d) {
                finished.push(Finished {
                    id: *id,
                    handle: active.handle,
                });
            }
        }

        for done in &finished {
            let _ = self.active.remove(&done.id);
        }
        finished.sort_by_key(|f| f.id);
        finished
    }

    fn write(
        &mut self,
        id: ElementId,
        state: &VisualState,
        surface: &mut dyn Surface,
    ) {
        surface.apply(id, state);
        let _ = self.last.insert(id, *state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Tween;
    use crate::surface::{RecordingSurface, Viewport};
    use crate::util::easing::EasingFunction;
    use web_time::Duration;

    fn fade(ms: u64) -> Tween {
        Tween::new(
            VisualState::REST.with_opacity(0.0),
            VisualState::REST,
            Duration::from_millis(ms),
            EasingFunction::Linear,
        )
    }

    #[test]
    fn start_preempts_existing() {
        let mut registry = AnimationRegistry::new();
        let now = Instant::now();
        let id = ElementId(1);

        let first = registry.start(id, fade(100), now);
        let second = registry.start(id, fade(100), now);

        assert_ne!(first, second);
        assert_eq!(registry.active_count(), 1);
        assert_eq!(registry.handle(id), Some(second));
    }

    #[test]
    fn update_reports_finished_once() {
        let mut registry = AnimationRegistry::new();
        let mut surface = RecordingSurface::new(Viewport::default());
        let now = Instant::now();
        let id = ElementId(7);
        let handle = registry.start(id, fade(100), now);

        let mid = registry.update(now + Duration::from_millis(50), &mut surface);
        assert!(mid.is_empty());
        let opacity = surface.state(id).map(|s| s.opacity);
        assert!(opacity.is_some_and(|o| (o - 0.5).abs() < 1e-3));

        let done = registry.update(now + Duration::from_millis(120), &mut surface);
        assert_eq!(done, vec![Finished { id, handle }]);
        assert!(!registry.is_animating(id));
        assert!(surface.state(id).is_some_and(|s| s.is_rest()));

        let again = registry.update(now + Duration::from_millis(200), &mut surface);
        assert!(again.is_empty());
    }

    #[test]
    fn finish_writes_end_state() {
        let mut registry = AnimationRegistry::new();
        let mut surface = RecordingSurface::new(Viewport::default());
        let id = ElementId(2);
        let _ = registry.start(id, fade(1000), Instant::now());

        assert!(registry.finish(id, &mut surface));
        assert!(surface.state(id).is_some_and(|s| s.is_rest()));
        assert!(!registry.finish(id, &mut surface));
    }

    #[test]
    fn cancel_all_clears() {
        let mut registry = AnimationRegistry::new();
        let now = Instant::now();
        for i in 0..4 {
            let _ = registry.start(ElementId(i), fade(100), now);
        }
        assert_eq!(registry.cancel_all(), 4);
        assert_eq!(registry.active_count(), 0);
        assert!(!registry.cancel(ElementId(0)));
    }
}
