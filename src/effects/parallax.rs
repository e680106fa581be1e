//! Scroll and pointer parallax.
//!
//! Both flavours are pure arithmetic per frame: scroll parallax reads the
//! element's bounds, pointer parallax reads the last pointer position. The
//! results are added to the frame's [`OffsetFrame`] rather than written
//! directly, so they compose with floating.

use glam::Vec2;
use web_time::Duration;

use crate::animation::lerp;
use crate::markup::{DepthLevel, ParallaxBinding, ParallaxLevel};
use crate::options::ParallaxOptions;
use crate::surface::{ElementId, OffsetFrame, Rect, Surface, Viewport};

#[derive(Debug, Clone, Copy)]
struct ScrollLayer {
    id: ElementId,
    range: f32,
}

#[derive(Debug, Clone, Copy)]
struct PointerLayer {
    id: ElementId,
    depth: f32,
    current: Vec2,
    target: Vec2,
}

/// Maps scroll and pointer position to bounded per-element offsets.
#[derive(Debug, Clone)]
pub struct ParallaxDriver {
    options: ParallaxOptions,
    scroll: Vec<ScrollLayer>,
    pointer: Vec<PointerLayer>,
    active: bool,
}

impl ParallaxDriver {
    /// Inactive driver with no layers.
    #[must_use]
    pub fn new(options: ParallaxOptions) -> Self {
        Self {
            options,
            scroll: Vec::new(),
            pointer: Vec::new(),
            active: false,
        }
    }

    /// Total scroll travel for a level, before the depth factor.
    #[must_use]
    pub fn level_range(&self, level: ParallaxLevel) -> f32 {
        match level {
            ParallaxLevel::None => 0.0,
            ParallaxLevel::Low => self.options.low_range,
            ParallaxLevel::Medium => self.options.medium_range,
            ParallaxLevel::High => self.options.high_range,
        }
    }

    /// Multiplier for a depth layer.
    #[must_use]
    pub fn depth_factor(&self, depth: DepthLevel) -> f32 {
        match depth {
            DepthLevel::Background => self.options.background_factor,
            DepthLevel::Mid => self.options.mid_factor,
            DepthLevel::Foreground => self.options.foreground_factor,
            DepthLevel::Ui => self.options.ui_factor,
        }
    }

    /// Add a scroll-driven element.
    ///
    /// Returns `false` (and registers nothing) when the binding's effective
    /// range is zero.
    pub fn register_scroll(&mut self, id: ElementId, binding: ParallaxBinding) -> bool {
        let range = self.level_range(binding.level) * self.depth_factor(binding.depth);
        if range == 0.0 {
            return false;
        }
        self.scroll.retain(|l| l.id != id);
        self.scroll.push(ScrollLayer { id, range });
        true
    }

    /// Add a pointer-driven layer. Higher depth moves more.
    pub fn register_pointer(&mut self, id: ElementId, depth: f32) {
        self.pointer.retain(|l| l.id != id);
        self.pointer.push(PointerLayer {
            id,
            depth,
            current: Vec2::ZERO,
            target: Vec2::ZERO,
        });
    }

    /// Number of registered layers (scroll, pointer).
    #[must_use]
    pub fn layer_counts(&self) -> (usize, usize) {
        (self.scroll.len(), self.pointer.len())
    }

    /// Whether the driver produces offsets.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start producing offsets.
    pub fn activate(&mut self) {
        if !self.active {
            log::debug!(
                "parallax active: {} scroll, {} pointer layers",
                self.scroll.len(),
                self.pointer.len()
            );
        }
        self.active = true;
    }

    /// Record a pointer position; layers ease towards their new targets on
    /// the following updates.
    pub fn handle_pointer(&mut self, x: f32, y: f32, viewport: Viewport) {
        if !self.active {
            return;
        }
        let sign = if self.options.invert_pointer { -1.0 } else { 1.0 };
        let base = viewport.normalize(x, y) * self.options.pointer_intensity * sign;
        for layer in &mut self.pointer {
            layer.target = base * layer.depth;
        }
    }

    /// Add this frame's offsets for every layer.
    ///
    /// `dt` is the time since the previous update, used for pointer
    /// smoothing. Elements without bounds are skipped.
    pub fn update(&mut self, dt: Duration, surface: &dyn Surface, frame: &mut OffsetFrame) {
        if !self.active {
            return;
        }
        let viewport = surface.viewport();
        for layer in &self.scroll {
            if let Some(rect) = surface.bounds(layer.id) {
                let y = scroll_offset(layer.range, rect, viewport);
                frame.add(layer.id, Vec2::new(0.0, y));
            }
        }

        let blend = smoothing_blend(dt, self.options.pointer_smoothing);
        for layer in &mut self.pointer {
            layer.current += (layer.target - layer.current) * blend;
            frame.add(layer.id, layer.current);
        }
    }

    /// Drop every layer.
    pub fn clear(&mut self) {
        self.scroll.clear();
        self.pointer.clear();
        self.active = false;
    }
}

/// Vertical scroll offset for an element spanning `range` pixels of travel.
///
/// Progress runs from 0 when the element's top sits at the viewport bottom
/// to 1 when its bottom reaches the viewport top; the offset moves linearly
/// from `-range / 2` to `range / 2`.
#[must_use]
pub fn scroll_offset(range: f32, rect: Rect, viewport: Viewport) -> f32 {
    let travel = viewport.height + rect.height;
    if travel <= 0.0 {
        return 0.0;
    }
    let progress = ((viewport.height - rect.top()) / travel).clamp(0.0, 1.0);
    lerp(-range / 2.0, range / 2.0, progress)
}

/// Fraction of the remaining distance covered in `dt` by an exponential
/// follower with time constant `tau`.
fn smoothing_blend(dt: Duration, tau: f32) -> f32 {
    if tau <= 0.0 {
        return 1.0;
    }
    1.0 - (-dt.as_secs_f32() / tau).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    fn binding(level: ParallaxLevel, depth: DepthLevel) -> ParallaxBinding {
        ParallaxBinding { level, depth }
    }

    #[test]
    fn scroll_offset_spans_range() {
        let vp = Viewport::new(1000.0, 800.0);
        // Entering from below
        let entering = Rect::new(0.0, 800.0, 100.0, 200.0);
        assert_eq!(scroll_offset(25.0, entering, vp), -12.5);
        // Leaving at the top
        let leaving = Rect::new(0.0, -200.0, 100.0, 200.0);
        assert_eq!(scroll_offset(25.0, leaving, vp), 12.5);
        // Halfway
        let middle = Rect::new(0.0, 300.0, 100.0, 200.0);
        assert!(scroll_offset(25.0, middle, vp).abs() < 1e-4);
        // Far below: clamped
        let far = Rect::new(0.0, 5000.0, 100.0, 200.0);
        assert_eq!(scroll_offset(25.0, far, vp), -12.5);
    }

    #[test]
    fn depth_scales_range_and_ui_is_skipped() {
        let mut parallax = ParallaxDriver::new(ParallaxOptions::default());
        assert!(!parallax.register_scroll(
            ElementId(1),
            binding(ParallaxLevel::High, DepthLevel::Ui)
        ));
        assert!(parallax.register_scroll(
            ElementId(2),
            binding(ParallaxLevel::High, DepthLevel::Background)
        ));
        assert_eq!(parallax.layer_counts(), (1, 0));
        assert!(
            (parallax.level_range(ParallaxLevel::High)
                * parallax.depth_factor(DepthLevel::Background)
                - 5.0)
                .abs()
                < 1e-4
        );
    }

    #[test]
    fn inactive_driver_writes_nothing() {
        let mut parallax = ParallaxDriver::new(ParallaxOptions::default());
        let mut surface = RecordingSurface::new(Viewport::default());
        surface.set_bounds(ElementId(1), Rect::new(0.0, 100.0, 10.0, 10.0));
        let _ = parallax.register_scroll(
            ElementId(1),
            binding(ParallaxLevel::Medium, DepthLevel::Mid),
        );
        let mut frame = OffsetFrame::default();
        parallax.update(Duration::from_millis(16), &surface, &mut frame);
        assert!(frame.is_empty());

        parallax.activate();
        parallax.update(Duration::from_millis(16), &surface, &mut frame);
        assert!(frame.get(ElementId(1)).is_some());
    }

    #[test]
    fn pointer_layers_converge_on_target() {
        let mut parallax = ParallaxDriver::new(ParallaxOptions::default());
        let surface = RecordingSurface::new(Viewport::new(1000.0, 1000.0));
        parallax.register_pointer(ElementId(3), 2.0);
        parallax.activate();
        // Pointer at the right edge: 0.5 * 20 * 2 = 20 px
        parallax.handle_pointer(1000.0, 500.0, surface.viewport());

        let mut frame = OffsetFrame::default();
        parallax.update(Duration::from_millis(16), &surface, &mut frame);
        let first = frame.get(ElementId(3)).unwrap();
        assert!(first.x > 0.0 && first.x < 20.0);

        for _ in 0..100 {
            let mut frame = OffsetFrame::default();
            parallax.update(Duration::from_millis(16), &surface, &mut frame);
        }
        let mut frame = OffsetFrame::default();
        parallax.update(Duration::from_millis(16), &surface, &mut frame);
        let settled = frame.get(ElementId(3)).unwrap();
        assert!((settled.x - 20.0).abs() < 1e-2);
        assert!(settled.y.abs() < 1e-4);
    }

    #[test]
    fn invert_flips_direction() {
        let options = ParallaxOptions {
            invert_pointer: true,
            pointer_smoothing: 0.0,
            ..ParallaxOptions::default()
        };
        let mut parallax = ParallaxDriver::new(options);
        let surface = RecordingSurface::new(Viewport::new(1000.0, 1000.0));
        parallax.register_pointer(ElementId(3), 1.0);
        parallax.activate();
        parallax.handle_pointer(1000.0, 1000.0, surface.viewport());

        let mut frame = OffsetFrame::default();
        parallax.update(Duration::from_millis(16), &surface, &mut frame);
        assert_eq!(frame.get(ElementId(3)), Some(Vec2::new(-10.0, -10.0)));
    }
}
