//! Easing functions for animation interpolation.
//!
//! The curve names follow the `power`/`sine` families the site's motion
//! design is written in (`power2.out`, `sine.inOut`, ...), so presets can
//! be authored in TOML with the same vocabulary. All curves map `[0, 1]`
//! onto `[0, 1]` with `f(0) = 0` and `f(1) = 1`.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Easing function variants for animation curves.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    #[serde(rename = "none")]
    Linear,
    /// Quadratic ease-in.
    #[serde(rename = "power1.in")]
    Power1In,
    /// Quadratic ease-out.
    #[serde(rename = "power1.out")]
    Power1Out,
    /// Quadratic ease-in-out.
    #[serde(rename = "power1.inOut")]
    Power1InOut,
    /// Cubic ease-in (slow start, fast end).
    #[serde(rename = "power2.in")]
    Power2In,
    /// Cubic ease-out (fast start, slow end).
    #[default]
    #[serde(rename = "power2.out")]
    Power2Out,
    /// Quartic ease-out, used for settling motions.
    #[serde(rename = "power3.out")]
    Power3Out,
    /// Sinusoidal ease-in-out, used for yoyo floating.
    #[serde(rename = "sine.inOut")]
    SineInOut,
}

impl EasingFunction {
    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn evaluate(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::Power1In => t * t,
            Self::Power1Out => 1.0 - (1.0 - t).powi(2),
            Self::Power1InOut => in_out(t, 2),
            Self::Power2In => t * t * t,
            Self::Power2Out => 1.0 - (1.0 - t).powi(3),
            Self::Power3Out => 1.0 - (1.0 - t).powi(4),
            Self::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }

    /// The preset name (`"power2.out"`, ...).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "none",
            Self::Power1In => "power1.in",
            Self::Power1Out => "power1.out",
            Self::Power1InOut => "power1.inOut",
            Self::Power2In => "power2.in",
            Self::Power2Out => "power2.out",
            Self::Power3Out => "power3.out",
            Self::SineInOut => "sine.inOut",
        }
    }
}

/// Symmetric in-out curve built from a power of `t`.
#[inline]
fn in_out(t: f32, power: i32) -> f32 {
    if t < 0.5 {
        (2.0 * t).powi(power) / 2.0
    } else {
        1.0 - (2.0 * (1.0 - t)).powi(power) / 2.0
    }
}

/// Error for an easing name that matches no known curve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEasing(pub String);

impl fmt::Display for UnknownEasing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown easing '{}'", self.0)
    }
}

impl std::error::Error for UnknownEasing {}

impl FromStr for EasingFunction {
    type Err = UnknownEasing;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "none" | "linear" => Ok(Self::Linear),
            "power1.in" => Ok(Self::Power1In),
            "power1.out" | "power1" => Ok(Self::Power1Out),
            "power1.inOut" => Ok(Self::Power1InOut),
            "power2.in" => Ok(Self::Power2In),
            "power2.out" | "power2" => Ok(Self::Power2Out),
            "power3.out" | "power3" => Ok(Self::Power3Out),
            "sine.inOut" => Ok(Self::SineInOut),
            other => Err(UnknownEasing(other.to_owned())),
        }
    }
}
