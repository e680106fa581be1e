//! The individual effect state machines.
//!
//! Each effect owns only its own bookkeeping; element state flows through
//! the shared [`AnimationRegistry`](crate::animation::AnimationRegistry)
//! (for tweens) or an [`OffsetFrame`](crate::surface::OffsetFrame) (for
//! additive per-frame offsets). The
//! [`Choreographer`](crate::choreographer::Choreographer) decides when each
//! one runs.

pub mod drift;
pub mod float;
pub mod idle;
pub mod parallax;
pub mod reveal;
pub mod scatter;
pub mod turn_on;

pub use drift::{idle_transform, DriftConfig, DriftGenerator, DriftRange};
pub use float::{FloatDriver, FloatMotion};
pub use idle::{ActivityState, IdleDetector, IdlePhase, IdleTransition};
pub use parallax::{scroll_offset, ParallaxDriver};
pub use reveal::{RevealScheduler, RevealStatus};
pub use scatter::IdleScatter;
pub use turn_on::{TurnOnElements, TurnOnEvent, TurnOnPhase, TurnOnSequencer};
