use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Scroll and pointer parallax magnitudes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Parallax", inline)]
#[serde(default)]
pub struct ParallaxOptions {
    /// Total scroll travel for `low`, in pixels.
    #[schemars(title = "Low Range", range(min = 0.0, max = 200.0), extend("step" = 1.0))]
    pub low_range: f32,
    /// Total scroll travel for `medium`, in pixels.
    #[schemars(title = "Medium Range", range(min = 0.0, max = 200.0), extend("step" = 1.0))]
    pub medium_range: f32,
    /// Total scroll travel for `high`, in pixels.
    #[schemars(title = "High Range", range(min = 0.0, max = 200.0), extend("step" = 1.0))]
    pub high_range: f32,
    /// Depth multiplier for `background`.
    #[schemars(skip)]
    pub background_factor: f32,
    /// Depth multiplier for `mid`.
    #[schemars(skip)]
    pub mid_factor: f32,
    /// Depth multiplier for `foreground`.
    #[schemars(skip)]
    pub foreground_factor: f32,
    /// Depth multiplier for `ui`.
    #[schemars(skip)]
    pub ui_factor: f32,
    /// Maximum pointer-parallax travel at depth 1, in pixels.
    #[schemars(title = "Pointer Intensity", range(min = 0.0, max = 100.0), extend("step" = 1.0))]
    pub pointer_intensity: f32,
    /// Time constant of the pointer smoothing, in seconds.
    #[schemars(title = "Pointer Smoothing", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub pointer_smoothing: f32,
    /// Move layers against the pointer instead of with it.
    #[schemars(title = "Invert Pointer")]
    pub invert_pointer: bool,
}

impl Default for ParallaxOptions {
    fn default() -> Self {
        Self {
            low_range: 12.0,
            medium_range: 25.0,
            high_range: 50.0,
            background_factor: 0.1,
            mid_factor: 1.0,
            foreground_factor: 1.2,
            ui_factor: 0.0,
            pointer_intensity: 20.0,
            pointer_smoothing: 0.1,
            invert_pointer: false,
        }
    }
}
