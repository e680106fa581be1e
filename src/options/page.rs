use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Page-wide motion settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Page", inline)]
#[serde(default)]
pub struct PageOptions {
    /// Honour a reduced-motion preference: opacity-only reveals, a single
    /// fade for the turn-on, and no parallax, floating or idle scatter.
    #[schemars(title = "Reduced Motion")]
    pub reduced_motion: bool,
    /// Settle time between the turn-on completing and scroll effects
    /// activating, in milliseconds.
    #[schemars(title = "Activation Delay (ms)", range(min = 0, max = 2000))]
    pub activation_delay_ms: u64,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            activation_delay_ms: 100,
        }
    }
}
