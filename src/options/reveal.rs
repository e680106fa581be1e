use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

/// Directional reveal presets and group staggering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Reveal", inline)]
#[serde(default)]
pub struct RevealOptions {
    /// Vertical start offset for `up`/`down`, in pixels.
    #[schemars(title = "Vertical Distance", range(min = 0.0, max = 200.0), extend("step" = 1.0))]
    pub vertical_distance: f32,
    /// Horizontal start offset for `left`/`right`, in pixels.
    #[schemars(title = "Horizontal Distance", range(min = 0.0, max = 200.0), extend("step" = 1.0))]
    pub horizontal_distance: f32,
    /// Duration of slide reveals in seconds.
    #[schemars(title = "Slide Duration", range(min = 0.1, max = 3.0), extend("step" = 0.05))]
    pub slide_duration: f32,
    /// Easing of slide reveals.
    #[schemars(skip)]
    pub slide_easing: EasingFunction,
    /// Start scale for `in`.
    #[schemars(title = "Scale In From", range(min = 0.5, max = 1.0), extend("step" = 0.01))]
    pub scale_in_from: f32,
    /// Start scale for `out`.
    #[schemars(title = "Scale Out From", range(min = 1.0, max = 1.5), extend("step" = 0.01))]
    pub scale_out_from: f32,
    /// Duration of scale reveals in seconds.
    #[schemars(title = "Scale Duration", range(min = 0.1, max = 3.0), extend("step" = 0.05))]
    pub scale_duration: f32,
    /// Easing of scale reveals.
    #[schemars(skip)]
    pub scale_easing: EasingFunction,
    /// Default stagger between members of a group, in seconds.
    #[schemars(title = "Group Stagger", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub group_stagger: f32,
    /// Stagger used for large groups of text-sized elements.
    #[schemars(title = "Text Stagger", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub text_stagger: f32,
    /// Groups with more members than this and a stagger below
    /// `text_stagger_below` use `text_stagger`.
    #[schemars(skip)]
    pub text_group_min_len: usize,
    /// Stagger threshold for the text-group rule, in seconds.
    #[schemars(skip)]
    pub text_stagger_below: f32,
    /// Trigger line as a fraction of viewport height below the top.
    #[schemars(title = "Trigger Line", range(min = 0.5, max = 2.0), extend("step" = 0.05))]
    pub trigger_ratio: f32,
    /// Duration of the opacity-only reveal under reduced motion.
    #[schemars(title = "Reduced Duration", range(min = 0.1, max = 3.0), extend("step" = 0.05))]
    pub reduced_duration: f32,
    /// Easing of the reduced-motion reveal.
    #[schemars(skip)]
    pub reduced_easing: EasingFunction,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            vertical_distance: 50.0,
            horizontal_distance: 60.0,
            slide_duration: 0.7,
            slide_easing: EasingFunction::Power2Out,
            scale_in_from: 0.9,
            scale_out_from: 1.1,
            scale_duration: 0.8,
            scale_easing: EasingFunction::Power3Out,
            group_stagger: 0.1,
            text_stagger: 0.05,
            text_group_min_len: 3,
            text_stagger_below: 0.08,
            trigger_ratio: 1.2,
            reduced_duration: 0.6,
            reduced_easing: EasingFunction::Power2Out,
        }
    }
}
