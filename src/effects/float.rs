//! Zero-gravity floating.
//!
//! Each `data-float` element sways between rest and its level's amplitude
//! forever, with a random start offset so neighbours never move in
//! lockstep. The amplitude grows while the page is idle.

use glam::Vec2;
use rand::Rng;
use web_time::{Duration, Instant};

use super::drift::DriftGenerator;
use crate::markup::FloatLevel;
use crate::options::{FloatOptions, FloatPreset};
use crate::surface::{ElementId, OffsetFrame};
use crate::util::easing::EasingFunction;
use crate::util::secs;

/// One element's looping sway.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatMotion {
    origin: Vec2,
    amplitude: Vec2,
    half_period: Duration,
    delay: Duration,
    started: Instant,
    easing: EasingFunction,
}

impl FloatMotion {
    /// Sway towards `amplitude` and back, one sweep per `half_period`,
    /// starting after `delay`.
    #[must_use]
    pub const fn new(
        amplitude: Vec2,
        half_period: Duration,
        delay: Duration,
        started: Instant,
        easing: EasingFunction,
    ) -> Self {
        Self {
            origin: Vec2::ZERO,
            amplitude,
            half_period,
            delay,
            started,
            easing,
        }
    }

    /// Same sway, but holding `origin` through the delay and easing from
    /// it on the first sweep.
    #[must_use]
    pub const fn starting_from(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    /// Peak offset of the sway.
    #[must_use]
    pub const fn amplitude(&self) -> Vec2 {
        self.amplitude
    }

    /// Offset at `now`.
    ///
    /// The origin during the start delay. The first sweep eases from the
    /// origin out to the amplitude; after that each sweep alternates
    /// between rest and the amplitude.
    #[must_use]
    pub fn offset(&self, now: Instant) -> Vec2 {
        let elapsed = now.saturating_duration_since(self.started);
        let Some(running) = elapsed.checked_sub(self.delay) else {
            return self.origin;
        };
        let half = self.half_period.as_secs_f64();
        if half <= 0.0 {
            return self.origin;
        }
        let sweeps = running.as_secs_f64() / half;
        let frac = sweeps.fract() as f32;
        let sweep = sweeps.floor() as u64;
        if sweep == 0 {
            return self.origin.lerp(self.amplitude, self.easing.evaluate(frac));
        }
        let phase = if sweep % 2 == 0 { frac } else { 1.0 - frac };
        self.amplitude * self.easing.evaluate(phase)
    }
}

#[derive(Debug, Clone)]
struct Member {
    id: ElementId,
    level: FloatLevel,
    motion: Option<FloatMotion>,
}

/// Owns every floating element on the page.
#[derive(Debug, Clone)]
pub struct FloatDriver {
    options: FloatOptions,
    members: Vec<Member>,
    idle: bool,
    active: bool,
}

impl FloatDriver {
    /// Inactive driver with no elements.
    #[must_use]
    pub fn new(options: FloatOptions) -> Self {
        Self {
            options,
            members: Vec::new(),
            idle: false,
            active: false,
        }
    }

    /// Preset for a level, `None` for [`FloatLevel::None`].
    #[must_use]
    pub const fn preset(&self, level: FloatLevel) -> Option<&FloatPreset> {
        match level {
            FloatLevel::None => None,
            FloatLevel::Low => Some(&self.options.low),
            FloatLevel::Medium => Some(&self.options.medium),
            FloatLevel::High => Some(&self.options.high),
        }
    }

    /// Add an element. Returns `false` for [`FloatLevel::None`].
    pub fn register(&mut self, id: ElementId, level: FloatLevel) -> bool {
        if level == FloatLevel::None {
            return false;
        }
        self.members.retain(|m| m.id != id);
        self.members.push(Member {
            id,
            level,
            motion: None,
        });
        true
    }

    /// Number of floating elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether no element floats.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether offsets are produced.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the idle amplitudes are in use.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.idle
    }

    /// Current sway of an element.
    #[must_use]
    pub fn motion_of(&self, id: ElementId) -> Option<FloatMotion> {
        self.members.iter().find(|m| m.id == id).and_then(|m| m.motion)
    }

    /// Start every element swaying with a fresh random start offset.
    pub fn activate<R: Rng>(&mut self, now: Instant, generator: &mut DriftGenerator<R>) {
        self.active = true;
        self.rebuild(now, generator);
        log::debug!("floating {} elements", self.members.len());
    }

    /// Switch between the active and idle amplitudes.
    ///
    /// Each element waits a fresh random delay where it is, then eases
    /// from there to the new amplitude. Calling with the current mode is a
    /// no-op.
    pub fn set_idle<R: Rng>(
        &mut self,
        idle: bool,
        now: Instant,
        generator: &mut DriftGenerator<R>,
    ) {
        if self.idle == idle {
            return;
        }
        self.idle = idle;
        if self.active {
            self.rebuild(now, generator);
        }
    }

    fn rebuild<R: Rng>(&mut self, now: Instant, generator: &mut DriftGenerator<R>) {
        let idle = self.idle;
        let max_offset = self.options.max_start_offset;
        let easing = self.options.easing;
        for i in 0..self.members.len() {
            let Some(preset) = self.preset(self.members[i].level).copied() else {
                continue;
            };
            let amplitude = if idle {
                Vec2::new(preset.idle_x, preset.idle_y)
            } else {
                Vec2::new(preset.active_x, preset.active_y)
            };
            let delay = secs(generator.start_offset(max_offset));
            let origin = self.members[i]
                .motion
                .map_or(Vec2::ZERO, |motion| motion.offset(now));
            self.members[i].motion = Some(
                FloatMotion::new(amplitude, secs(preset.half_period), delay, now, easing)
                    .starting_from(origin),
            );
        }
    }

    /// Add every element's current sway to `frame`.
    pub fn update(&self, now: Instant, frame: &mut OffsetFrame) {
        if !self.active {
            return;
        }
        for member in &self.members {
            if let Some(motion) = &member.motion {
                frame.add(member.id, motion.offset(now));
            }
        }
    }

    /// Drop every element.
    pub fn clear(&mut self) {
        self.members.clear();
        self.active = false;
        self.idle = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sway(amplitude: Vec2, delay_ms: u64, start: Instant) -> FloatMotion {
        FloatMotion::new(
            amplitude,
            Duration::from_secs(5),
            Duration::from_millis(delay_ms),
            start,
            EasingFunction::SineInOut,
        )
    }

    #[test]
    fn sway_is_a_yoyo() {
        let start = Instant::now();
        let motion = sway(Vec2::new(0.0, 4.0), 0, start);
        assert_eq!(motion.offset(start), Vec2::ZERO);
        // Midway through the first sweep
        let mid = motion.offset(start + Duration::from_millis(2500));
        assert!((mid.y - 2.0).abs() < 1e-3);
        // Peak after one sweep, back at rest after two
        let peak = motion.offset(start + Duration::from_secs(5));
        assert!((peak.y - 4.0).abs() < 1e-3);
        let back = motion.offset(start + Duration::from_secs(10));
        assert!(back.y.abs() < 1e-3);
    }

    #[test]
    fn sway_waits_for_delay() {
        let start = Instant::now();
        let motion = sway(Vec2::new(2.0, 8.0), 1500, start);
        assert_eq!(motion.offset(start + Duration::from_millis(1400)), Vec2::ZERO);
        assert!(motion.offset(start + Duration::from_millis(4000)).y > 0.0);
    }

    #[test]
    fn offset_never_exceeds_amplitude() {
        let start = Instant::now();
        let motion = sway(Vec2::new(5.0, 15.0), 300, start);
        for ms in (0..30_000).step_by(97) {
            let o = motion.offset(start + Duration::from_millis(ms));
            assert!(o.x >= 0.0 && o.x <= 5.0 + 1e-4);
            assert!(o.y >= 0.0 && o.y <= 15.0 + 1e-4);
        }
    }

    #[test]
    fn none_level_is_not_registered() {
        let mut floats = FloatDriver::new(FloatOptions::default());
        assert!(!floats.register(ElementId(1), FloatLevel::None));
        assert!(floats.register(ElementId(2), FloatLevel::Low));
        assert_eq!(floats.len(), 1);
    }

    #[test]
    fn idle_switches_amplitude() {
        let mut floats = FloatDriver::new(FloatOptions::default());
        let mut rng = DriftGenerator::from_seed(5);
        let now = Instant::now();
        let _ = floats.register(ElementId(1), FloatLevel::Medium);

        floats.activate(now, &mut rng);
        let active = floats.motion_of(ElementId(1)).unwrap();
        assert_eq!(active.amplitude(), Vec2::new(2.0, 8.0));

        floats.set_idle(true, now, &mut rng);
        let idle = floats.motion_of(ElementId(1)).unwrap();
        assert_eq!(idle.amplitude(), Vec2::new(4.0, 12.0));
        assert!(floats.is_idle());
    }

    #[test]
    fn idle_switch_continues_from_current_offset() {
        let mut floats = FloatDriver::new(FloatOptions::default());
        let mut rng = DriftGenerator::from_seed(9);
        let start = Instant::now();
        let id = ElementId(1);
        let _ = floats.register(id, FloatLevel::High);
        floats.activate(start, &mut rng);

        let switch = start + Duration::from_secs(11);
        let before = floats.motion_of(id).unwrap().offset(switch);
        assert!(before.length() > 0.0);

        floats.set_idle(true, switch, &mut rng);
        let motion = floats.motion_of(id).unwrap();
        let next_frame = motion.offset(switch + Duration::from_millis(16));
        assert!((next_frame - before).length() < 0.5, "{before} -> {next_frame}");

        // Peaks at the idle amplitude within the max delay plus one sweep
        let high = FloatOptions::default().high;
        let target = Vec2::new(high.idle_x, high.idle_y);
        let peak = (0..=12_000u64)
            .step_by(16)
            .map(|ms| motion.offset(switch + Duration::from_millis(ms)).length())
            .fold(0.0_f32, f32::max);
        assert!((peak - target.length()).abs() < 0.1, "{peak}");
    }

    #[test]
    fn first_sweep_starts_at_origin() {
        let start = Instant::now();
        let origin = Vec2::new(1.0, 3.0);
        let motion = sway(Vec2::new(2.0, 8.0), 500, start).starting_from(origin);
        assert_eq!(motion.offset(start + Duration::from_millis(200)), origin);
        assert_eq!(motion.offset(start + Duration::from_millis(500)), origin);
        let peak = motion.offset(start + Duration::from_millis(5500));
        assert!((peak - Vec2::new(2.0, 8.0)).length() < 1e-3);
        let back = motion.offset(start + Duration::from_millis(10_500));
        assert!(back.length() < 1e-3);
    }

    #[test]
    fn inactive_driver_writes_nothing() {
        let mut floats = FloatDriver::new(FloatOptions::default());
        let _ = floats.register(ElementId(1), FloatLevel::High);
        let mut frame = OffsetFrame::default();
        floats.update(Instant::now(), &mut frame);
        assert!(frame.is_empty());

        let mut rng = DriftGenerator::from_seed(5);
        floats.activate(Instant::now(), &mut rng);
        floats.clear();
        floats.update(Instant::now(), &mut frame);
        assert!(frame.is_empty());
        assert!(floats.motion_of(ElementId(1)).is_none());
    }
}
