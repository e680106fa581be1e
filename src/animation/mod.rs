//! Tween primitives and the registry that runs them.

mod registry;
mod stagger;
mod state;
mod tween;

pub use registry::{AnimationRegistry, Finished, MotionHandle};
pub use stagger::Stagger;
pub use state::{lerp, VisualState};
pub use tween::{progress, Keyframes, Motion, Segment, Tween};
