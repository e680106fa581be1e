//! The hero's idle "tear apart" effect.
//!
//! While the page is idle, every registered element drifts along its own
//! [`DriftConfig`] as idle progress ramps up, and the hero container zooms
//! out. When activity resumes, everything eases back to rest with a short
//! stagger.

use rand::Rng;
use web_time::{Duration, Instant};

use super::drift::{idle_transform, DriftConfig, DriftGenerator, DriftRange};
use crate::animation::{AnimationRegistry, Stagger, Tween, VisualState};
use crate::options::IdleOptions;
use crate::surface::{ElementId, Surface};
use crate::util::easing::EasingFunction;
use crate::util::millis;

#[derive(Debug, Clone)]
struct Member {
    id: ElementId,
    range: DriftRange,
    drift: Option<DriftConfig>,
}

/// Drives registered hero elements apart while idle.
#[derive(Debug, Clone)]
pub struct IdleScatter {
    members: Vec<Member>,
    container: Option<ElementId>,
    default_range: DriftRange,
    idle_opacity: f32,
    container_zoom: f32,
    return_duration: Duration,
    return_stagger: Stagger,
    return_easing: EasingFunction,
    scattered: bool,
}

impl IdleScatter {
    /// Empty scatter configured from idle options.
    #[must_use]
    pub fn new(options: &IdleOptions, default_range: DriftRange) -> Self {
        Self {
            members: Vec::new(),
            container: None,
            default_range,
            idle_opacity: options.idle_opacity,
            container_zoom: options.container_zoom,
            return_duration: millis(options.return_duration_ms),
            return_stagger: Stagger::new(millis(options.return_stagger_ms)),
            return_easing: options.return_easing,
            scattered: false,
        }
    }

    /// Add (or re-register) an element. `None` uses the default ranges.
    pub fn register(&mut self, id: ElementId, range: Option<DriftRange>) {
        let range = range.unwrap_or(self.default_range);
        if let Some(member) = self.members.iter_mut().find(|m| m.id == id) {
            member.range = range;
            return;
        }
        self.members.push(Member {
            id,
            range,
            drift: None,
        });
    }

    /// Set the container that zooms out while idle.
    pub fn set_container(&mut self, container: Option<ElementId>) {
        self.container = container;
    }

    /// Number of registered elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether no element is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether elements are currently drifting.
    #[must_use]
    pub fn is_scattered(&self) -> bool {
        self.scattered
    }

    /// Drift drawn for `id` in the current idle cycle.
    #[must_use]
    pub fn drift_of(&self, id: ElementId) -> Option<DriftConfig> {
        self.members.iter().find(|m| m.id == id).and_then(|m| m.drift)
    }

    /// Start an idle cycle: draw a fresh drift for every element.
    pub fn begin<R: Rng>(&mut self, generator: &mut DriftGenerator<R>) {
        for member in &mut self.members {
            member.drift = Some(generator.generate(&member.range));
        }
        self.scattered = true;
        log::debug!("scattering {} idle elements", self.members.len());
    }

    /// Write every element's state at idle `progress`.
    ///
    /// Writing cancels any return motion still running on the element.
    pub fn update(
        &self,
        progress: f32,
        registry: &mut AnimationRegistry,
        surface: &mut dyn Surface,
    ) {
        if !self.scattered {
            return;
        }
        for member in &self.members {
            if let Some(drift) = &member.drift {
                let state = idle_transform(progress, drift, self.idle_opacity);
                registry.set(member.id, &state, surface);
            }
        }
        if let Some(container) = self.container {
            let p = progress.clamp(0.0, 1.0);
            let scale = 1.0 - p * (1.0 - self.container_zoom);
            registry.set(
                container,
                &VisualState::REST.with_scale(scale),
                surface,
            );
        }
    }

    /// End the idle cycle: ease every element back to rest from wherever
    /// it is, with a short stagger between elements.
    pub fn end(&mut self, registry: &mut AnimationRegistry, now: Instant) {
        if !self.scattered {
            return;
        }
        self.scattered = false;

        for (index, member) in self.members.iter_mut().enumerate() {
            let from = registry.current(member.id).unwrap_or(VisualState::REST);
            let tween = Tween::new(
                from,
                VisualState::REST,
                self.return_duration,
                self.return_easing,
            )
            .with_delay(self.return_stagger.delay_for(index));
            let _ = registry.start(member.id, tween, now);
            member.drift = None;
        }

        if let Some(container) = self.container {
            let from = registry.current(container).unwrap_or(VisualState::REST);
            let zoom = Tween::new(
                from,
                VisualState::REST,
                self.return_duration,
                self.return_easing,
            );
            let _ = registry.start(container, zoom, now);
        }
    }

    /// Time for every element to settle after [`end`](Self::end).
    #[must_use]
    pub fn return_duration(&self) -> Duration {
        self.return_stagger
            .total_duration_for(self.members.len(), self.return_duration)
    }

    /// Snap every element back to rest immediately.
    pub fn reset(
        &mut self,
        registry: &mut AnimationRegistry,
        surface: &mut dyn Surface,
    ) {
        for member in &mut self.members {
            member.drift = None;
            registry.set(member.id, &VisualState::REST, surface);
        }
        if let Some(container) = self.container {
            registry.set(container, &VisualState::REST, surface);
        }
        self.scattered = false;
    }

    /// Forget every element and the container.
    pub fn clear(&mut self) {
        self.members.clear();
        self.container = None;
        self.scattered = false;
    }
}
