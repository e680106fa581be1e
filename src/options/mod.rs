//! Centralized motion options with TOML preset support.
//!
//! Every tunable timing and magnitude (idle timeout, drift ranges, reveal
//! presets, the turn-on timeline, parallax and float levels) is
//! consolidated here. Options serialize to/from TOML for motion presets
//! stored in `presets/`.

mod drift;
mod float;
mod idle;
mod page;
mod parallax;
mod reveal;
mod turn_on;

use std::path::Path;

pub use drift::DriftOptions;
pub use float::{FloatOptions, FloatPreset};
pub use idle::IdleOptions;
pub use page::PageOptions;
pub use parallax::ParallaxOptions;
pub use reveal::RevealOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use turn_on::{FlashOptions, TurnOnOptions};

use crate::error::MotionError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[idle]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct MotionOptions {
    /// Page-wide switches.
    pub page: PageOptions,
    /// Idle detection and idle scatter.
    pub idle: IdleOptions,
    /// Drift generator ranges.
    pub drift: DriftOptions,
    /// Directional reveal presets.
    pub reveal: RevealOptions,
    /// Hero turn-on timeline.
    pub turn_on: TurnOnOptions,
    /// Scroll and pointer parallax.
    pub parallax: ParallaxOptions,
    /// Zero-gravity floating.
    pub float: FloatOptions,
}

impl MotionOptions {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(MotionOptions)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`MotionError::OptionsParse`] if the TOML is malformed.
    pub fn from_toml(content: &str) -> Result<Self, MotionError> {
        toml::from_str(content)
            .map_err(|e| MotionError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, MotionError> {
        let content =
            std::fs::read_to_string(path).map_err(MotionError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Fails if serialization or any filesystem write fails.
    pub fn save(&self, path: &Path) -> Result<(), MotionError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MotionError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(MotionError::Io)?;
        }
        std::fs::write(path, content).map_err(MotionError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

/// Inclusive `[min, max]` range for randomized parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct ValueRange {
    /// Lower bound.
    pub min: f32,
    /// Upper bound.
    pub max: f32,
}

impl ValueRange {
    /// Range from its bounds.
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Degenerate range containing only `value`.
    #[must_use]
    pub const fn exactly(value: f32) -> Self {
        Self::new(value, value)
    }

    /// Same range with `min <= max`.
    #[must_use]
    pub fn normalized(self) -> Self {
        if self.min <= self.max {
            self
        } else {
            Self::new(self.max, self.min)
        }
    }

    /// Whether `value` lies inside the (normalized) range.
    #[must_use]
    pub fn contains(&self, value: f32) -> bool {
        let r = self.normalized();
        value >= r.min && value <= r.max
    }
}
