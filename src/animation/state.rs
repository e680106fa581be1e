//! Per-element visual state.

use serde::Serialize;

/// The visual state of an element at a point in time.
///
/// Offsets are in CSS pixels relative to the element's layout position,
/// rotation in degrees, blur in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisualState {
    /// Opacity. Values above 1.0 are allowed mid-animation (glow).
    pub opacity: f32,
    /// Horizontal translation.
    pub x: f32,
    /// Vertical translation.
    pub y: f32,
    /// Uniform scale factor.
    pub scale: f32,
    /// Rotation in degrees.
    pub rotation: f32,
    /// Blur filter radius. Zero means no filter at all.
    pub blur: f32,
    /// Whether the element receives pointer events.
    pub interactive: bool,
}

impl VisualState {
    /// Resting state: fully visible, untransformed, no filter.
    pub const REST: Self = Self {
        opacity: 1.0,
        x: 0.0,
        y: 0.0,
        scale: 1.0,
        rotation: 0.0,
        blur: 0.0,
        interactive: true,
    };

    /// Resting state with a different opacity.
    #[must_use]
    pub const fn with_opacity(self, opacity: f32) -> Self {
        Self { opacity, ..self }
    }

    /// Same state with a different scale.
    #[must_use]
    pub const fn with_scale(self, scale: f32) -> Self {
        Self { scale, ..self }
    }

    /// Same state translated to `(x, y)`.
    #[must_use]
    pub const fn with_offset(self, x: f32, y: f32) -> Self {
        Self { x, y, ..self }
    }

    /// Same state with pointer events toggled.
    #[must_use]
    pub const fn with_interactive(self, interactive: bool) -> Self {
        Self {
            interactive,
            ..self
        }
    }

    /// Linear interpolation between two states.
    ///
    /// `interactive` is discrete: it flips to the target's value only once
    /// `t` reaches 1.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            opacity: lerp(self.opacity, other.opacity, t),
            x: lerp(self.x, other.x, t),
            y: lerp(self.y, other.y, t),
            scale: lerp(self.scale, other.scale, t),
            rotation: lerp(self.rotation, other.rotation, t),
            blur: lerp(self.blur, other.blur, t).max(0.0),
            interactive: if t >= 1.0 {
                other.interactive
            } else {
                self.interactive
            },
        }
    }

    /// Whether this is (within tolerance) the resting state.
    #[must_use]
    pub fn is_rest(&self) -> bool {
        const EPS: f32 = 1e-4;
        (self.opacity - 1.0).abs() < EPS
            && self.x.abs() < EPS
            && self.y.abs() < EPS
            && (self.scale - 1.0).abs() < EPS
            && self.rotation.abs() < EPS
            && self.blur == 0.0
    }
}

impl Default for VisualState {
    fn default() -> Self {
        Self::REST
    }
}

/// Scalar linear interpolation.
#[inline]
#[must_use]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}
