use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

/// Amplitude and timing of one float level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct FloatPreset {
    /// Horizontal amplitude while the page is active, in pixels.
    pub active_x: f32,
    /// Vertical amplitude while the page is active, in pixels.
    pub active_y: f32,
    /// Horizontal amplitude while idle, in pixels.
    pub idle_x: f32,
    /// Vertical amplitude while idle, in pixels.
    pub idle_y: f32,
    /// Time for one sweep from one extreme to the other, in seconds.
    pub half_period: f32,
}

impl FloatPreset {
    const fn new(active: (f32, f32), idle: (f32, f32), half_period: f32) -> Self {
        Self {
            active_x: active.0,
            active_y: active.1,
            idle_x: idle.0,
            idle_y: idle.1,
            half_period,
        }
    }
}

impl Default for FloatPreset {
    fn default() -> Self {
        Self::new((0.0, 0.0), (0.0, 0.0), 0.0)
    }
}

/// Zero-gravity floating presets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Float", inline)]
#[serde(default)]
pub struct FloatOptions {
    /// `data-float="low"`.
    #[schemars(skip)]
    pub low: FloatPreset,
    /// `data-float="medium"`.
    #[schemars(skip)]
    pub medium: FloatPreset,
    /// `data-float="high"`.
    #[schemars(skip)]
    pub high: FloatPreset,
    /// Upper bound of the random per-element start offset, in seconds.
    #[schemars(title = "Max Start Offset", range(min = 0.0, max = 10.0), extend("step" = 0.1))]
    pub max_start_offset: f32,
    /// Easing of each sweep.
    #[schemars(skip)]
    pub easing: EasingFunction,
}

impl Default for FloatOptions {
    fn default() -> Self {
        Self {
            low: FloatPreset::new((0.0, 4.0), (0.0, 6.0), 5.0),
            medium: FloatPreset::new((2.0, 8.0), (4.0, 12.0), 7.0),
            high: FloatPreset::new((5.0, 15.0), (10.0, 20.0), 9.0),
            max_start_offset: 2.0,
            easing: EasingFunction::SineInOut,
        }
    }
}
