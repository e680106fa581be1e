use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::input::ActivityKind;
use crate::util::easing::EasingFunction;

/// Idle detection and the hero's idle scatter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Idle", inline)]
#[serde(default)]
pub struct IdleOptions {
    /// Time without activity before the page counts as idle.
    #[schemars(title = "Timeout (ms)", range(min = 500, max = 60000))]
    pub timeout_ms: u64,
    /// Time for idle progress to ramp from 0 to 1 once idle.
    #[schemars(title = "Ramp (ms)", range(min = 100, max = 10000))]
    pub ramp_ms: u64,
    /// Activity kinds that reset the timer. Click and wheel always do.
    #[schemars(skip)]
    pub watched: Vec<ActivityKind>,
    /// Hero container scale at full idle progress.
    #[schemars(title = "Container Zoom", range(min = 0.5, max = 1.0), extend("step" = 0.01))]
    pub container_zoom: f32,
    /// Opacity of scattered elements at full idle progress.
    #[schemars(title = "Idle Opacity", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub idle_opacity: f32,
    /// Duration of the return to rest when activity resumes.
    #[schemars(title = "Return Duration (ms)", range(min = 0, max = 2000))]
    pub return_duration_ms: u64,
    /// Delay between consecutive elements starting their return.
    #[schemars(title = "Return Stagger (ms)", range(min = 0, max = 200))]
    pub return_stagger_ms: u64,
    /// Easing of the return to rest.
    #[schemars(skip)]
    pub return_easing: EasingFunction,
}

impl Default for IdleOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 4000,
            ramp_ms: 2000,
            watched: ActivityKind::DEFAULT_WATCHED.to_vec(),
            container_zoom: 0.85,
            idle_opacity: 0.8,
            return_duration_ms: 300,
            return_stagger_ms: 20,
            return_easing: EasingFunction::Power2Out,
        }
    }
}
