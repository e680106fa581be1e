//! [`Surface`] over inline DOM styles.
//!
//! Each element keeps the last visual state and offset written to it; both
//! are folded into one `transform` so a parallax offset never clobbers a
//! running reveal.

use folio_motion::animation::VisualState;
use folio_motion::surface::{ElementId, Rect, Surface, Viewport};
use glam::Vec2;
use rustc_hash::FxHashMap;
use wasm_bindgen::JsValue;
use web_sys::{CssStyleDeclaration, HtmlElement, Window};

struct Slot {
    element: HtmlElement,
    state: Option<VisualState>,
    offset: Vec2,
}

/// Writes computed states to element styles.
pub struct DomSurface {
    window: Window,
    slots: FxHashMap<ElementId, Slot>,
    viewport: Viewport,
}

impl DomSurface {
    /// Empty surface over the window's viewport.
    #[must_use]
    pub fn new(window: Window) -> Self {
        let viewport = read_viewport(&window);
        Self {
            window,
            slots: FxHashMap::default(),
            viewport,
        }
    }

    /// Track an element under `id`.
    pub fn insert(&mut self, id: ElementId, element: HtmlElement) {
        let _ = self.slots.insert(
            id,
            Slot {
                element,
                state: None,
                offset: Vec2::ZERO,
            },
        );
    }

    /// The element tracked under `id`.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&HtmlElement> {
        self.slots.get(&id).map(|slot| &slot.element)
    }

    /// Number of tracked elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no element is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Re-read the viewport size after a resize.
    pub fn refresh_viewport(&mut self) -> Viewport {
        self.viewport = read_viewport(&self.window);
        self.viewport
    }

    /// Stop tracking every element. Inline styles are left in place.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

impl Surface for DomSurface {
    fn apply(&mut self, id: ElementId, state: &VisualState) {
        let Some(slot) = self.slots.get_mut(&id) else {
            return;
        };
        slot.state = Some(*state);
        let style = slot.element.style();
        let _ = style.set_property("opacity", &state.opacity.to_string());
        write_transform(&style, state, slot.offset);
        if state.blur > 0.0 {
            let _ = style.set_property("filter", &format!("blur({}px)", state.blur));
        } else {
            let _ = style.remove_property("filter");
        }
        if state.interactive {
            let _ = style.remove_property("pointer-events");
        } else {
            let _ = style.set_property("pointer-events", "none");
        }
    }

    fn apply_offset(&mut self, id: ElementId, offset: Vec2) {
        let Some(slot) = self.slots.get_mut(&id) else {
            return;
        };
        slot.offset = offset;
        let state = slot.state.unwrap_or(VisualState::REST);
        write_transform(&slot.element.style(), &state, offset);
    }

    /// Layout bounds: the client rect with our own offset taken back out,
    /// so parallax does not feed on itself.
    fn bounds(&self, id: ElementId) -> Option<Rect> {
        let slot = self.slots.get(&id)?;
        if !slot.element.is_connected() {
            return None;
        }
        let r = slot.element.get_bounding_client_rect();
        Some(Rect::new(
            r.x() as f32 - slot.offset.x,
            r.y() as f32 - slot.offset.y,
            r.width() as f32,
            r.height() as f32,
        ))
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

fn write_transform(style: &CssStyleDeclaration, state: &VisualState, offset: Vec2) {
    let x = state.x + offset.x;
    let y = state.y + offset.y;
    if x == 0.0 && y == 0.0 && state.scale == 1.0 && state.rotation == 0.0 {
        let _ = style.remove_property("transform");
        return;
    }
    let value = format!(
        "translate3d({x}px, {y}px, 0) scale({}) rotate({}deg)",
        state.scale, state.rotation
    );
    let _ = style.set_property("transform", &value);
}

/// Inner window size in CSS pixels.
#[must_use]
pub fn read_viewport(window: &Window) -> Viewport {
    let px = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    Viewport::new(px(window.inner_width()), px(window.inner_height()))
}
