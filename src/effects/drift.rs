//! Randomized per-element drift for the idle scatter.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::animation::VisualState;
use crate::markup::IdleEffectConfig;
use crate::options::{DriftOptions, ValueRange};

/// How one element drifts away while the page is idle.
///
/// Immutable once generated; a fresh one is drawn every idle cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DriftConfig {
    /// Unit vector the element drifts along.
    pub direction: Vec2,
    /// Drift distance at full progress, in pixels.
    pub speed: f32,
    /// Rotation at full progress, in degrees.
    pub rotation: f32,
    /// Scale at full progress.
    pub scale: f32,
}

impl DriftConfig {
    /// Offset at full progress.
    #[must_use]
    pub fn displacement(&self) -> Vec2 {
        self.direction * self.speed
    }
}

/// Bounds the generator samples within.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftRange {
    /// Drift distance in pixels.
    pub distance: ValueRange,
    /// Rotation in degrees.
    pub rotation: ValueRange,
    /// Scale factor.
    pub scale: ValueRange,
}

impl From<&DriftOptions> for DriftRange {
    fn from(options: &DriftOptions) -> Self {
        Self {
            distance: options.distance,
            rotation: options.rotation,
            scale: options.scale,
        }
    }
}

impl From<IdleEffectConfig> for DriftRange {
    fn from(config: IdleEffectConfig) -> Self {
        Self {
            distance: ValueRange::new(config.drift * 0.5, config.drift),
            rotation: ValueRange::new(-config.rotation, config.rotation),
            scale: ValueRange::new(
                config.scale,
                (config.scale + 0.03).min(1.0),
            ),
        }
    }
}

impl Default for DriftRange {
    fn default() -> Self {
        Self::from(&DriftOptions::default())
    }
}

/// Seedable source of [`DriftConfig`]s.
///
/// Values are uniform within the caller's ranges; tests should assert
/// bounds (or seed the generator), never exact numbers from entropy.
#[derive(Debug, Clone)]
pub struct DriftGenerator<R = StdRng> {
    rng: R,
}

impl DriftGenerator<StdRng> {
    /// Deterministic generator.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from the OS.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> DriftGenerator<R> {
    /// Wrap any random source.
    #[must_use]
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw a drift configuration within `range`.
    ///
    /// The direction angle is uniform in `[0, 2π)`. Inverted ranges are
    /// normalized; degenerate ranges yield exactly their value.
    pub fn generate(&mut self, range: &DriftRange) -> DriftConfig {
        let angle = self.rng.random::<f32>() * TAU;
        DriftConfig {
            direction: Vec2::from_angle(angle),
            speed: self.sample(range.distance),
            rotation: self.sample(range.rotation),
            scale: self.sample(range.scale),
        }
    }

    /// Uniform start offset in `[0, max]` seconds (for desynchronizing
    /// looping motions).
    pub fn start_offset(&mut self, max: f32) -> f32 {
        self.sample(ValueRange::new(0.0, max.max(0.0)))
    }

    fn sample(&mut self, range: ValueRange) -> f32 {
        let r = range.normalized();
        if r.min.is_nan() || r.max.is_nan() || r.min >= r.max {
            return r.min;
        }
        let v = r.min + self.rng.random::<f32>() * (r.max - r.min);
        // Rounding can push `v` a hair past `max`
        v.clamp(r.min, r.max)
    }
}

/// Visual state of a drifting element at `progress` through the idle ramp.
///
/// Progress is eased with a cubic ease-out; opacity fades towards
/// `idle_opacity`.
#[must_use]
pub fn idle_transform(
    progress: f32,
    config: &DriftConfig,
    idle_opacity: f32,
) -> VisualState {
    let p = progress.clamp(0.0, 1.0);
    let eased = 1.0 - (1.0 - p).powi(3);
    let offset = config.displacement() * eased;
    VisualState {
        opacity: 1.0 - (1.0 - idle_opacity) * eased,
        x: offset.x,
        y: offset.y,
        scale: 1.0 - (1.0 - config.scale) * eased,
        rotation: config.rotation * eased,
        ..VisualState::REST
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_values_stay_in_bounds() {
        let mut drift = DriftGenerator::from_seed(7);
        let range = DriftRange::default();
        for _ in 0..1000 {
            let cfg = drift.generate(&range);
            assert!(range.distance.contains(cfg.speed));
            assert!(range.rotation.contains(cfg.rotation));
            assert!(range.scale.contains(cfg.scale));
            assert!((cfg.direction.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn degenerate_and_inverted_ranges() {
        let mut drift = DriftGenerator::from_seed(1);
        let range = DriftRange {
            distance: ValueRange::exactly(30.0),
            rotation: ValueRange::new(3.0, -3.0),
            scale: ValueRange::exactly(0.9),
        };
        for _ in 0..100 {
            let cfg = drift.generate(&range);
            assert_eq!(cfg.speed, 30.0);
            assert_eq!(cfg.scale, 0.9);
            assert!(cfg.rotation >= -3.0 && cfg.rotation <= 3.0);
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let range = DriftRange::default();
        let mut a = DriftGenerator::from_seed(42);
        let mut b = DriftGenerator::from_seed(42);
        for _ in 0..10 {
            assert_eq!(a.generate(&range), b.generate(&range));
        }
    }

    #[test]
    fn element_config_derives_ranges() {
        let range = DriftRange::from(IdleEffectConfig {
            drift: 40.0,
            rotation: 3.0,
            scale: 0.99,
        });
        assert_eq!(range.distance, ValueRange::new(20.0, 40.0));
        assert_eq!(range.rotation, ValueRange::new(-3.0, 3.0));
        assert_eq!(range.scale, ValueRange::new(0.99, 1.0));
    }

    #[test]
    fn idle_transform_endpoints() {
        let cfg = DriftConfig {
            direction: Vec2::X,
            speed: 40.0,
            rotation: 2.0,
            scale: 0.95,
        };
        assert!(idle_transform(0.0, &cfg, 0.8).is_rest());

        let full = idle_transform(1.0, &cfg, 0.8);
        assert!((full.x - 40.0).abs() < 1e-4);
        assert!((full.rotation - 2.0).abs() < 1e-4);
        assert!((full.scale - 0.95).abs() < 1e-4);
        assert!((full.opacity - 0.8).abs() < 1e-4);

        // Ease-out is ahead of linear halfway through
        assert!(idle_transform(0.5, &cfg, 0.8).x > 20.0);
    }

    #[test]
    fn start_offset_bounds() {
        let mut drift = DriftGenerator::from_seed(3);
        for _ in 0..100 {
            let offset = drift.start_offset(2.0);
            assert!((0.0..=2.0).contains(&offset));
        }
        assert_eq!(drift.start_offset(-1.0), 0.0);
    }
}
