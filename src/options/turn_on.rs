use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

/// One flicker of the turn-on: rise to a peak, fall to a trough.
///
/// Each half takes `duration / 2`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct FlashOptions {
    /// Full flicker duration in seconds.
    pub duration: f32,
    /// Root opacity at the peak.
    pub peak_opacity: f32,
    /// Root scale at the peak.
    pub peak_scale: f32,
    /// Root opacity at the trough.
    pub trough_opacity: f32,
    /// Root scale at the trough.
    pub trough_scale: f32,
    /// Background opacity at the peak (above 1 glows).
    pub glow: f32,
    /// Background opacity at the trough, as a multiple of the "off"
    /// background opacity.
    pub glow_falloff: f32,
    /// Easing of the rise.
    pub rise_easing: EasingFunction,
    /// Easing of the fall.
    pub fall_easing: EasingFunction,
}

impl Default for FlashOptions {
    fn default() -> Self {
        Self {
            duration: 0.12,
            peak_opacity: 1.0,
            peak_scale: 1.02,
            trough_opacity: 0.25,
            trough_scale: 0.98,
            glow: 1.4,
            glow_falloff: 1.5,
            rise_easing: EasingFunction::Power2In,
            fall_easing: EasingFunction::Power1Out,
        }
    }
}

/// Hero "light bulb" turn-on timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Turn-On", inline)]
#[serde(default)]
pub struct TurnOnOptions {
    /// Time the hero stays "off" before flickering, in milliseconds.
    /// Halved under reduced motion.
    #[schemars(title = "Delay (ms)", range(min = 0, max = 5000))]
    pub delay_ms: u64,
    /// Root opacity while off.
    #[schemars(skip)]
    pub off_opacity: f32,
    /// Root scale while off.
    #[schemars(title = "Off Scale", range(min = 0.8, max = 1.0), extend("step" = 0.01))]
    pub off_scale: f32,
    /// Background opacity while off.
    #[schemars(title = "Background Off Opacity", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub background_off_opacity: f32,
    /// First, strongest flicker.
    #[schemars(skip)]
    pub flash1: FlashOptions,
    /// Second, softer flicker.
    #[schemars(skip)]
    pub flash2: FlashOptions,
    /// Settle to the final state, in seconds.
    #[schemars(title = "Stabilize Duration", range(min = 0.1, max = 3.0), extend("step" = 0.05))]
    pub stabilize_duration: f32,
    /// Easing of the settle.
    #[schemars(skip)]
    pub stabilize_easing: EasingFunction,
    /// Single fade used under reduced motion, in seconds.
    #[schemars(title = "Reduced Duration", range(min = 0.1, max = 3.0), extend("step" = 0.05))]
    pub reduced_duration: f32,
    /// Easing of the reduced-motion fade.
    #[schemars(skip)]
    pub reduced_easing: EasingFunction,
}

impl Default for TurnOnOptions {
    fn default() -> Self {
        Self {
            delay_ms: 300,
            off_opacity: 0.0,
            off_scale: 0.97,
            background_off_opacity: 0.3,
            flash1: FlashOptions::default(),
            flash2: FlashOptions {
                duration: 0.15,
                peak_opacity: 0.8,
                peak_scale: 1.01,
                trough_opacity: 0.3,
                trough_scale: 0.99,
                glow: 1.2,
                glow_falloff: 1.2,
                rise_easing: EasingFunction::Power1InOut,
                fall_easing: EasingFunction::Power1Out,
            },
            stabilize_duration: 0.5,
            stabilize_easing: EasingFunction::Power3Out,
            reduced_duration: 0.45,
            reduced_easing: EasingFunction::Power2Out,
        }
    }
}
