//! One-shot directional reveals on first visibility.
//!
//! # Lifecycle
//!
//! 1. [`register`](RevealScheduler::register) every tagged element, in
//!    document order.
//! 2. [`initialize`](RevealScheduler::initialize) once: elements already
//!    at least partly in view are set straight to their final state; everything else
//!    is hidden at its direction's start state.
//! 3. [`update`](RevealScheduler::update) on every scroll/frame: elements
//!    whose top edge crosses the trigger line start their reveal. The
//!    trigger is never re-armed.

use rustc_hash::FxHashMap;
use web_time::{Duration, Instant};

use crate::animation::{AnimationRegistry, Stagger, Tween, VisualState};
use crate::markup::{RevealDescriptor, RevealDirection};
use crate::options::RevealOptions;
use crate::surface::{ElementId, Surface};
use crate::util::easing::EasingFunction;
use crate::util::secs;

/// Where an element is in its reveal lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStatus {
    /// Registered, scheduler not initialized yet.
    Registered,
    /// Hidden, waiting for the trigger line.
    Pending,
    /// Reveal motion started (or finished).
    Revealing,
    /// Was in view at initialization; set to final without animating.
    InView,
    /// Element had no bounds at initialization; left alone.
    Missing,
}

#[derive(Debug, Clone)]
struct Entry {
    id: ElementId,
    descriptor: RevealDescriptor,
    delay: Duration,
    status: RevealStatus,
}

/// Schedules directional reveals and group staggers.
#[derive(Debug, Clone)]
pub struct RevealScheduler {
    options: RevealOptions,
    reduced_motion: bool,
    entries: Vec<Entry>,
    initialized: bool,
}

impl RevealScheduler {
    /// Empty scheduler.
    #[must_use]
    pub fn new(options: RevealOptions, reduced_motion: bool) -> Self {
        Self {
            options,
            reduced_motion,
            entries: Vec::new(),
            initialized: false,
        }
    }

    /// Add an element. Registration order is stagger order within groups.
    pub fn register(&mut self, id: ElementId, descriptor: RevealDescriptor) {
        if self.entries.iter().any(|e| e.id == id) {
            log::warn!("{id} registered for reveal twice, ignoring");
            return;
        }
        self.entries.push(Entry {
            id,
            delay: descriptor.delay,
            descriptor,
            status: RevealStatus::Registered,
        });
    }

    /// Number of registered elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stagger interval used for a group of `len` members whose first
    /// member declared `declared`.
    #[must_use]
    pub fn group_stagger(&self, len: usize, declared: Option<Duration>) -> Duration {
        let stagger = declared.unwrap_or_else(|| secs(self.options.group_stagger));
        let is_text_group = len > self.options.text_group_min_len
            && stagger < secs(self.options.text_stagger_below);
        if is_text_group {
            secs(self.options.text_stagger)
        } else {
            stagger
        }
    }

    /// Start state for a direction (reduced motion: opacity only).
    #[must_use]
    pub fn initial_state(&self, direction: RevealDirection) -> VisualState {
        let hidden = VisualState::REST.with_opacity(0.0).with_interactive(false);
        if self.reduced_motion {
            return hidden;
        }
        let o = &self.options;
        match direction {
            RevealDirection::Up => hidden.with_offset(0.0, o.vertical_distance),
            RevealDirection::Down => hidden.with_offset(0.0, -o.vertical_distance),
            RevealDirection::Left => hidden.with_offset(o.horizontal_distance, 0.0),
            RevealDirection::Right => hidden.with_offset(-o.horizontal_distance, 0.0),
            RevealDirection::In => hidden.with_scale(o.scale_in_from),
            RevealDirection::Out => hidden.with_scale(o.scale_out_from),
        }
    }

    /// Preset duration and easing for a direction.
    #[must_use]
    pub fn preset(&self, direction: RevealDirection) -> (Duration, EasingFunction) {
        let o = &self.options;
        if self.reduced_motion {
            return (secs(o.reduced_duration), o.reduced_easing);
        }
        match direction {
            RevealDirection::Up
            | RevealDirection::Down
            | RevealDirection::Left
            | RevealDirection::Right => (secs(o.slide_duration), o.slide_easing),
            RevealDirection::In | RevealDirection::Out => {
                (secs(o.scale_duration), o.scale_easing)
            }
        }
    }

    /// Resolve staggers and write every element's starting state.
    ///
    /// Elements overlapping the viewport go straight to their final
    /// state. Calling this twice is a no-op.
    pub fn initialize(
        &mut self,
        registry: &mut AnimationRegistry,
        surface: &mut dyn Surface,
    ) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        self.resolve_delays();

        let viewport = surface.viewport();
        let mut in_view = 0;
        for i in 0..self.entries.len() {
            let id = self.entries[i].id;
            let direction = self.entries[i].descriptor.direction;
            let status = match surface.bounds(id) {
                None => RevealStatus::Missing,
                Some(rect) if rect.intersects(viewport) => {
                    registry.set(id, &VisualState::REST, surface);
                    in_view += 1;
                    RevealStatus::InView
                }
                Some(_) => {
                    let initial = self.initial_state(direction);
                    registry.set(id, &initial, surface);
                    RevealStatus::Pending
                }
            };
            self.entries[i].status = status;
        }
        log::debug!(
            "reveal: {} elements, {in_view} already in view",
            self.entries.len()
        );
    }

    /// Effective delay = own delay + index within group × group stagger.
    fn resolve_delays(&mut self) {
        let mut groups: FxHashMap<&str, Vec<usize>> = FxHashMap::default();
        for (i, entry) in self.entries.iter().enumerate() {
            if let Some(group) = entry.descriptor.group.as_deref() {
                groups.entry(group).or_default().push(i);
            }
        }

        let mut delays = Vec::new();
        for members in groups.values() {
            let declared = members
                .first()
                .and_then(|&first| self.entries[first].descriptor.stagger);
            let stagger = Stagger::new(self.group_stagger(members.len(), declared));
            for (index, &i) in members.iter().enumerate() {
                let own = self.entries[i].descriptor.delay;
                delays.push((i, stagger.with_base_delay(own).delay_for(index)));
            }
        }
        for (i, delay) in delays {
            self.entries[i].delay = delay;
        }
    }

    /// Start reveals for pending elements whose top edge has crossed the
    /// trigger line. Returns the elements triggered this call.
    pub fn update(
        &mut self,
        now: Instant,
        registry: &mut AnimationRegistry,
        surface: &dyn Surface,
    ) -> Vec<ElementId> {
        let line = surface.viewport().height * self.options.trigger_ratio;
        let due: Vec<ElementId> = self
            .entries
            .iter()
            .filter(|e| e.status == RevealStatus::Pending)
            .filter(|e| surface.bounds(e.id).is_some_and(|r| r.top() < line))
            .map(|e| e.id)
            .collect();

        for id in &due {
            let _ = self.reveal(*id, now, registry);
        }
        due
    }

    /// Start the reveal of `id` now, regardless of scroll position.
    ///
    /// Returns `false` if the element is unknown or not pending.
    pub fn reveal(
        &mut self,
        id: ElementId,
        now: Instant,
        registry: &mut AnimationRegistry,
    ) -> bool {
        let Some(index) = self
            .entries
            .iter()
            .position(|e| e.id == id && e.status == RevealStatus::Pending)
        else {
            return false;
        };

        let entry = &self.entries[index];
        let (preset_duration, easing) = self.preset(entry.descriptor.direction);
        let duration = entry.descriptor.duration.unwrap_or(preset_duration);
        let tween = Tween::new(
            self.initial_state(entry.descriptor.direction),
            VisualState::REST,
            duration,
            easing,
        )
        .with_delay(entry.delay);
        let _ = registry.start(id, tween, now);
        self.entries[index].status = RevealStatus::Revealing;
        true
    }

    /// Status of `id`.
    #[must_use]
    pub fn status(&self, id: ElementId) -> Option<RevealStatus> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.status)
    }

    /// Whether `id` has been revealed (or never needed to be).
    #[must_use]
    pub fn is_revealed(&self, id: ElementId) -> bool {
        matches!(
            self.status(id),
            Some(RevealStatus::Revealing | RevealStatus::InView)
        )
    }

    /// Delay applied to `id`'s reveal, including group stagger.
    #[must_use]
    pub fn effective_delay(&self, id: ElementId) -> Option<Duration> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.delay)
    }

    /// Number of elements still waiting for the trigger line.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.status == RevealStatus::Pending)
            .count()
    }

    /// Cancel in-flight reveals and forget every element.
    pub fn teardown(&mut self, registry: &mut AnimationRegistry) {
        for entry in &self.entries {
            if entry.status == RevealStatus::Revealing {
                let _ = registry.cancel(entry.id);
            }
        }
        self.entries.clear();
        self.initialized = false;
    }
}
