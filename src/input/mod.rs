//! Input handling: the page events the engine reacts to.

/// Platform-agnostic input events.
pub mod event;

pub use event::{ActivityKind, InputEvent};
