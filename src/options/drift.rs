use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ValueRange;

/// Ranges the drift generator samples from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Drift", inline)]
#[serde(default)]
pub struct DriftOptions {
    /// Drift distance in pixels at full idle progress.
    pub distance: ValueRange,
    /// Rotation in degrees at full idle progress.
    pub rotation: ValueRange,
    /// Scale factor at full idle progress.
    pub scale: ValueRange,
}

impl Default for DriftOptions {
    fn default() -> Self {
        Self {
            distance: ValueRange::new(20.0, 50.0),
            rotation: ValueRange::new(-2.0, 2.0),
            scale: ValueRange::new(0.95, 0.98),
        }
    }
}
