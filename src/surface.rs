//! The seam between the engine and whatever actually draws elements.
//!
//! A [`Surface`] receives computed [`VisualState`]s and offsets, and answers
//! layout questions (element bounds, viewport size). The browser adapter
//! implements it over DOM styles; [`RecordingSurface`] keeps everything in
//! memory for tests and the headless CLI.

use std::fmt;

use glam::Vec2;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::animation::VisualState;

/// Opaque handle for an animated element, issued by the host.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
)]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Element bounds relative to the viewport's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    /// Left edge in CSS pixels.
    pub x: f32,
    /// Top edge in CSS pixels.
    pub y: f32,
    /// Width in CSS pixels.
    pub width: f32,
    /// Height in CSS pixels.
    pub height: f32,
}

impl Rect {
    /// Rect from position and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top edge.
    #[must_use]
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Left edge.
    #[must_use]
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Whether any part of the rect overlaps the viewport.
    #[must_use]
    pub fn intersects(&self, viewport: Viewport) -> bool {
        self.top() < viewport.height
            && self.bottom() > 0.0
            && self.left() < viewport.width
            && self.right() > 0.0
    }

    /// Same rect moved vertically by `dy`.
    #[must_use]
    pub fn shifted(&self, dy: f32) -> Self {
        Self {
            y: self.y + dy,
            ..*self
        }
    }
}

/// Visible area size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    /// Width in CSS pixels.
    pub width: f32,
    /// Height in CSS pixels.
    pub height: f32,
}

impl Viewport {
    /// Viewport from its size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Pointer position mapped to `[-0.5, 0.5]` on both axes.
    #[must_use]
    pub fn normalize(&self, x: f32, y: f32) -> Vec2 {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(x / self.width - 0.5, y / self.height - 0.5)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

/// Renderer-side sink for computed element state.
pub trait Surface {
    /// Write the full visual state (opacity, transform, filter,
    /// interactivity) of an element.
    fn apply(&mut self, id: ElementId, state: &VisualState);

    /// Write the additive translation layered on top of the visual state
    /// (parallax and floating).
    fn apply_offset(&mut self, id: ElementId, offset: Vec2);

    /// Current bounds of an element, or `None` if it is gone.
    fn bounds(&self, id: ElementId) -> Option<Rect>;

    /// Current viewport size.
    fn viewport(&self) -> Viewport;
}

/// Per-frame accumulator of additive offsets.
///
/// Several drivers may offset the same element in one frame; their
/// contributions are summed before a single write per element.
#[derive(Debug, Default)]
pub struct OffsetFrame {
    offsets: FxHashMap<ElementId, Vec2>,
}

impl OffsetFrame {
    /// Add an offset contribution for an element.
    pub fn add(&mut self, id: ElementId, offset: Vec2) {
        *self.offsets.entry(id).or_insert(Vec2::ZERO) += offset;
    }

    /// Summed offset for an element this frame.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<Vec2> {
        self.offsets.get(&id).copied()
    }

    /// Number of elements with an offset this frame.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether no element was offset this frame.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Write every accumulated offset to the surface and clear.
    pub fn flush(&mut self, surface: &mut dyn Surface) {
        for (id, offset) in self.offsets.drain() {
            surface.apply_offset(id, offset);
        }
    }
}

/// In-memory surface recording the last state written to each element.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    viewport: Viewport,
    bounds: FxHashMap<ElementId, Rect>,
    states: FxHashMap<ElementId, VisualState>,
    offsets: FxHashMap<ElementId, Vec2>,
    writes: usize,
}

impl RecordingSurface {
    /// Empty surface with the given viewport.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    /// Place an element on the page.
    pub fn set_bounds(&mut self, id: ElementId, rect: Rect) {
        let _ = self.bounds.insert(id, rect);
    }

    /// Remove an element from the page.
    pub fn remove(&mut self, id: ElementId) {
        let _ = self.bounds.remove(&id);
    }

    /// Scroll the page down by `dy` pixels (every element moves up).
    pub fn scroll_by(&mut self, dy: f32) {
        for rect in self.bounds.values_mut() {
            *rect = rect.shifted(-dy);
        }
    }

    /// Resize the viewport.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Last visual state written to an element.
    #[must_use]
    pub fn state(&self, id: ElementId) -> Option<VisualState> {
        self.states.get(&id).copied()
    }

    /// Last offset written to an element.
    #[must_use]
    pub fn offset(&self, id: ElementId) -> Option<Vec2> {
        self.offsets.get(&id).copied()
    }

    /// Total number of writes (state and offset) so far.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Every element with a recorded state, sorted by id.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(ElementId, VisualState)> {
        let mut all: Vec<_> =
            self.states.iter().map(|(id, s)| (*id, *s)).collect();
        all.sort_by_key(|(id, _)| *id);
        all
    }
}

impl Surface for RecordingSurface {
    fn apply(&mut self, id: ElementId, state: &VisualState) {
        self.writes += 1;
        let _ = self.states.insert(id, *state);
    }

    fn apply_offset(&mut self, id: ElementId, offset: Vec2) {
        self.writes += 1;
        let _ = self.offsets.insert(id, offset);
    }

    fn bounds(&self, id: ElementId) -> Option<Rect> {
        self.bounds.get(&id).copied()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}
