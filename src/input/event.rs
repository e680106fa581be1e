use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Platform-agnostic page input events.
///
/// These are fed into the
/// [`Choreographer`](crate::choreographer::Choreographer), which forwards
/// activity to the idle detector and positions to the parallax driver.
///
/// # Example
///
/// ```ignore
/// choreographer.handle_input(
///     InputEvent::PointerMoved { x: 100.0, y: 200.0 },
///     Instant::now(),
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Pointer moved to a viewport position.
    PointerMoved {
        /// Horizontal position in CSS pixels.
        x: f32,
        /// Vertical position in CSS pixels.
        y: f32,
    },
    /// The page scrolled.
    Scrolled {
        /// New vertical scroll offset in CSS pixels.
        offset_y: f32,
    },
    /// A touch started.
    Touch,
    /// A key was pressed.
    KeyDown,
    /// A click anywhere on the page.
    Click,
    /// Mouse wheel turned (fires even when the page cannot scroll).
    Wheel {
        /// Vertical wheel delta.
        delta: f32,
    },
    /// The viewport was resized.
    Resized {
        /// New width in CSS pixels.
        width: f32,
        /// New height in CSS pixels.
        height: f32,
    },
}

impl InputEvent {
    /// The kind of user activity this event represents, if any.
    ///
    /// Resizes are not user activity and never wake the page from idle.
    #[must_use]
    pub const fn activity_kind(&self) -> Option<ActivityKind> {
        match self {
            Self::PointerMoved { .. } => Some(ActivityKind::PointerMove),
            Self::Scrolled { .. } => Some(ActivityKind::Scroll),
            Self::Touch => Some(ActivityKind::Touch),
            Self::KeyDown => Some(ActivityKind::KeyDown),
            Self::Click => Some(ActivityKind::Click),
            Self::Wheel { .. } => Some(ActivityKind::Wheel),
            Self::Resized { .. } => None,
        }
    }
}

/// Kinds of user activity the idle detector can watch.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// Pointer movement.
    PointerMove,
    /// Page scroll.
    Scroll,
    /// Touch start.
    Touch,
    /// Key press.
    KeyDown,
    /// Click. Always watched.
    Click,
    /// Wheel. Always watched.
    Wheel,
}

impl ActivityKind {
    /// Kinds that reset the idle timer regardless of configuration.
    pub const ALWAYS_WATCHED: [Self; 2] = [Self::Click, Self::Wheel];

    /// Default configurable kinds.
    pub const DEFAULT_WATCHED: [Self; 4] =
        [Self::PointerMove, Self::Scroll, Self::Touch, Self::KeyDown];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_is_not_activity() {
        let event = InputEvent::Resized {
            width: 10.0,
            height: 10.0,
        };
        assert_eq!(event.activity_kind(), None);
        assert_eq!(
            InputEvent::Wheel { delta: -3.0 }.activity_kind(),
            Some(ActivityKind::Wheel)
        );
    }

    #[test]
    fn kind_names_are_snake_case() {
        let json = serde_json::to_string(&ActivityKind::PointerMove);
        assert_eq!(json.ok().as_deref(), Some("\"pointer_move\""));
    }
}
