//! Page-level owner of every effect.
//!
//! The choreographer is the only thing a host talks to. It owns the
//! [`AnimationRegistry`] and every effect state machine, and sequences
//! them:
//!
//! ```text
//! mount -> turn-on -> (activation delay) -> gate open -> reveal / parallax / float
//!   \-> idle detection runs throughout; the hero scatters only after turn-on
//! ```
//!
//! Everything is driven from the host loop: [`handle_input`] for input
//! events and [`frame`] once per animation frame. Time is always passed
//! in.
//!
//! [`handle_input`]: Choreographer::handle_input
//! [`frame`]: Choreographer::frame

use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;
use web_time::{Duration, Instant};

use crate::animation::AnimationRegistry;
use crate::effects::{
    DriftGenerator, DriftRange, FloatDriver, IdleDetector, IdleScatter,
    IdleTransition, ParallaxDriver, RevealScheduler, TurnOnElements,
    TurnOnEvent, TurnOnPhase, TurnOnSequencer,
};
use crate::input::InputEvent;
use crate::markup::{
    AttributeSource, ElementMarkup, HERO_BACKGROUND, HERO_CONTENT, HERO_ROOT,
};
use crate::options::MotionOptions;
use crate::surface::{ElementId, OffsetFrame, Surface, Viewport};
use crate::util::millis;

/// One tagged element on the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageElement {
    /// Host-issued handle.
    pub id: ElementId,
    /// Parsed effect attributes.
    pub markup: ElementMarkup,
}

/// Everything the choreographer animates on one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageLayout {
    /// Tagged elements in document order.
    pub elements: Vec<PageElement>,
    /// Hero elements for the turn-on; `None` if the page has no hero.
    pub turn_on: Option<TurnOnElements>,
    /// Element zoomed out while the hero scatters (usually the hero root).
    pub scatter_container: Option<ElementId>,
}

impl PageLayout {
    /// Empty layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a layout from every element's attributes, in document order.
    ///
    /// Hero roles come from `data-hero-root`, `data-hero-background` and
    /// `data-hero-turnon-content`; the hero root doubles as the scatter
    /// container. Elements with no effect attribute are dropped.
    #[must_use]
    pub fn scan<'a, A, I>(elements: I) -> Self
    where
        A: AttributeSource + ?Sized + 'a,
        I: IntoIterator<Item = (ElementId, &'a A)>,
    {
        let mut layout = Self::new();
        let mut root = None;
        let mut background = None;
        let mut content = None;

        for (id, attrs) in elements {
            if attrs.attribute(HERO_ROOT).is_some() {
                root = root.or(Some(id));
            }
            if attrs.attribute(HERO_BACKGROUND).is_some() {
                background = background.or(Some(id));
            }
            if attrs.attribute(HERO_CONTENT).is_some() {
                content = content.or(Some(id));
            }
            let markup = ElementMarkup::from_attributes(attrs);
            if markup.is_animated() {
                layout.elements.push(PageElement { id, markup });
            }
        }

        layout.turn_on = root.map(|root| TurnOnElements {
            root,
            background,
            content,
        });
        layout.scatter_container = root;
        layout
    }
}

/// Something that happened during a frame or input event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ChoreographyEvent {
    /// The turn-on sequence progressed.
    TurnOn(TurnOnEvent),
    /// The page went idle or became active again.
    Idle(IdleTransition),
    /// Scroll effects were enabled after the turn-on.
    GateOpened,
    /// A reveal was triggered.
    Revealed(ElementId),
}

/// Summary of one [`Choreographer::frame`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    /// Events since the previous frame, in order.
    pub events: Vec<ChoreographyEvent>,
    /// Turn-on phase after the frame.
    pub turn_on: TurnOnPhase,
    /// Idle ramp progress in `[0, 1]`.
    pub idle_progress: f32,
    /// Motions still running in the registry.
    pub animating: usize,
}

/// Whether scroll-driven effects may run yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gate {
    Closed,
    Opening { at: Instant },
    Open,
}

/// Owns and sequences every effect on a page.
pub struct Choreographer<R = StdRng> {
    options: MotionOptions,
    registry: AnimationRegistry,
    drift: DriftGenerator<R>,
    idle: Option<IdleDetector>,
    scatter: IdleScatter,
    reveal: RevealScheduler,
    turn_on: TurnOnSequencer,
    parallax: ParallaxDriver,
    floats: FloatDriver,
    gate: Gate,
    viewport: Viewport,
    last_frame: Option<Instant>,
    pending: Vec<ChoreographyEvent>,
    mounted: bool,
}

impl Choreographer<StdRng> {
    /// Choreographer with an OS-seeded drift generator.
    #[must_use]
    pub fn new(options: MotionOptions) -> Self {
        Self::with_generator(options, DriftGenerator::from_entropy())
    }

    /// Choreographer whose random drifts and float offsets are reproducible.
    #[must_use]
    pub fn with_seed(options: MotionOptions, seed: u64) -> Self {
        Self::with_generator(options, DriftGenerator::from_seed(seed))
    }
}

impl<R: Rng> Choreographer<R> {
    /// Choreographer drawing randomness from `drift`.
    #[must_use]
    pub fn with_generator(options: MotionOptions, drift: DriftGenerator<R>) -> Self {
        let reduced = options.page.reduced_motion;
        Self {
            registry: AnimationRegistry::new(),
            drift,
            idle: None,
            scatter: IdleScatter::new(&options.idle, DriftRange::from(&options.drift)),
            reveal: RevealScheduler::new(options.reveal.clone(), reduced),
            turn_on: TurnOnSequencer::new(options.turn_on.clone(), reduced),
            parallax: ParallaxDriver::new(options.parallax.clone()),
            floats: FloatDriver::new(options.float.clone()),
            gate: Gate::Closed,
            viewport: Viewport::default(),
            last_frame: None,
            pending: Vec::new(),
            mounted: false,
            options,
        }
    }

    /// Active options.
    #[must_use]
    pub fn options(&self) -> &MotionOptions {
        &self.options
    }

    /// Whether reduced motion is in effect.
    #[must_use]
    pub fn reduced_motion(&self) -> bool {
        self.options.page.reduced_motion
    }

    /// The registry running every tween.
    #[must_use]
    pub fn registry(&self) -> &AnimationRegistry {
        &self.registry
    }

    /// Turn-on sequencer.
    #[must_use]
    pub fn turn_on(&self) -> &TurnOnSequencer {
        &self.turn_on
    }

    /// Reveal scheduler.
    #[must_use]
    pub fn reveal(&self) -> &RevealScheduler {
        &self.reveal
    }

    /// Parallax driver.
    #[must_use]
    pub fn parallax(&self) -> &ParallaxDriver {
        &self.parallax
    }

    /// Float driver.
    #[must_use]
    pub fn floats(&self) -> &FloatDriver {
        &self.floats
    }

    /// Idle scatter.
    #[must_use]
    pub fn scatter(&self) -> &IdleScatter {
        &self.scatter
    }

    /// Whether the page is mounted.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether scroll effects are running.
    #[must_use]
    pub fn is_gate_open(&self) -> bool {
        self.gate == Gate::Open
    }

    /// Whether the page is idle.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.idle.as_ref().is_some_and(IdleDetector::is_idle)
    }

    /// Register every element, write initial states, and arm the turn-on.
    ///
    /// Under reduced motion parallax, floating and the idle scatter are
    /// never registered. Mounting twice without [`unmount`](Self::unmount)
    /// is ignored.
    pub fn mount(
        &mut self,
        layout: &PageLayout,
        now: Instant,
        surface: &mut dyn Surface,
    ) -> Vec<ChoreographyEvent> {
        if self.mounted {
            log::warn!("page already mounted, ignoring");
            return Vec::new();
        }
        self.mounted = true;
        self.viewport = surface.viewport();
        let reduced = self.reduced_motion();

        for element in &layout.elements {
            self.register(element, reduced);
        }
        if !reduced {
            self.scatter.set_container(layout.scatter_container);
        }
        self.idle = Some(IdleDetector::new(&self.options.idle, now));
        self.reveal.initialize(&mut self.registry, surface);

        let events = self
            .turn_on
            .mount(layout.turn_on, now, &mut self.registry, surface);
        log::info!(
            "mounted {} elements ({} reveals, reduced motion: {reduced})",
            layout.elements.len(),
            self.reveal.len()
        );
        self.absorb_turn_on(events, now)
    }

    fn register(&mut self, element: &PageElement, reduced: bool) {
        let id = element.id;
        let markup = &element.markup;
        if let Some(descriptor) = &markup.reveal {
            self.reveal.register(id, descriptor.clone());
        }
        if reduced {
            return;
        }
        if let Some(binding) = markup.parallax {
            let _ = self.parallax.register_scroll(id, binding);
        }
        if let Some(depth) = markup.layer_depth {
            self.parallax.register_pointer(id, depth);
        }
        let _ = self.floats.register(id, markup.float);
        if let Some(idle) = &markup.idle {
            self.scatter.register(id, idle.config.map(DriftRange::from));
        }
    }

    /// Feed one input event.
    ///
    /// Activity resets the idle timer (and ends an idle cycle); pointer
    /// moves retarget pointer parallax. Events raised here are reported by
    /// the next [`frame`](Self::frame).
    pub fn handle_input(&mut self, event: InputEvent, now: Instant) {
        if !self.mounted {
            return;
        }
        match event {
            InputEvent::PointerMoved { x, y } => {
                self.parallax.handle_pointer(x, y, self.viewport);
            }
            InputEvent::Resized { width, height } => {
                self.viewport = Viewport::new(width, height);
            }
            _ => {}
        }

        let Some(kind) = event.activity_kind() else {
            return;
        };
        let transition = self
            .idle
            .as_mut()
            .and_then(|idle| idle.handle_activity(kind, now));
        if transition == Some(IdleTransition::Ended) {
            self.end_idle(now);
            self.pending
                .push(ChoreographyEvent::Idle(IdleTransition::Ended));
        }
    }

    /// Advance every effect to `now` and write the results to `surface`.
    pub fn frame(&mut self, now: Instant, surface: &mut dyn Surface) -> FrameReport {
        let mut events = std::mem::take(&mut self.pending);
        if !self.mounted {
            return self.report(events, now);
        }
        self.viewport = surface.viewport();
        let dt = self
            .last_frame
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_frame = Some(now);

        let turn_on = self.turn_on.update(now, &mut self.registry, surface);
        events.extend(self.absorb_turn_on(turn_on, now));

        if let Gate::Opening { at } = self.gate {
            if now >= at {
                self.open_gate(now);
                events.push(ChoreographyEvent::GateOpened);
            }
        }

        if self.idle.as_mut().and_then(|idle| idle.tick(now))
            == Some(IdleTransition::Started)
        {
            self.start_idle(now);
            events.push(ChoreographyEvent::Idle(IdleTransition::Started));
        }

        if self.gate == Gate::Open {
            let revealed = self.reveal.update(now, &mut self.registry, &*surface);
            events.extend(revealed.into_iter().map(ChoreographyEvent::Revealed));
        }

        if self.scatter.is_scattered() {
            let progress = self.idle_progress(now);
            self.scatter.update(progress, &mut self.registry, surface);
        }

        let _ = self.registry.update(now, surface);

        let mut offsets = OffsetFrame::default();
        self.parallax.update(dt, &*surface, &mut offsets);
        self.floats.update(now, &mut offsets);
        offsets.flush(surface);

        self.report(events, now)
    }

    /// Jump the turn-on to its end. Scroll effects still wait for the
    /// activation delay.
    pub fn skip_intro(
        &mut self,
        now: Instant,
        surface: &mut dyn Surface,
    ) -> Vec<ChoreographyEvent> {
        let events = self.turn_on.skip(&mut self.registry, surface);
        self.absorb_turn_on(events, now)
    }

    /// Play the turn-on again. Any idle scatter snaps back to rest first.
    ///
    /// Returns `false` if the page has no hero.
    pub fn replay_intro(&mut self, now: Instant, surface: &mut dyn Surface) -> bool {
        if self.turn_on.elements().is_none() {
            return false;
        }
        self.scatter.reset(&mut self.registry, surface);
        self.turn_on.replay(now, &mut self.registry, surface)
    }

    /// Cancel every tween and timer and forget the page. Elements are left
    /// as they are.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        let cancelled = self.registry.cancel_all();
        self.turn_on.teardown(&mut self.registry);
        self.reveal.teardown(&mut self.registry);
        if let Some(idle) = self.idle.as_mut() {
            idle.teardown();
        }
        self.idle = None;
        self.scatter.clear();
        self.parallax.clear();
        self.floats.clear();
        self.gate = Gate::Closed;
        self.last_frame = None;
        self.pending.clear();
        self.mounted = false;
        log::debug!("unmounted, {cancelled} motions cancelled");
    }

    fn absorb_turn_on(
        &mut self,
        events: Vec<TurnOnEvent>,
        now: Instant,
    ) -> Vec<ChoreographyEvent> {
        if events.contains(&TurnOnEvent::Completed) && self.gate == Gate::Closed {
            let at = now + millis(self.options.page.activation_delay_ms);
            self.gate = Gate::Opening { at };
        }
        events.into_iter().map(ChoreographyEvent::TurnOn).collect()
    }

    fn open_gate(&mut self, now: Instant) {
        self.gate = Gate::Open;
        if self.reduced_motion() {
            log::debug!("gate open (reduced motion: reveals only)");
            return;
        }
        self.parallax.activate();
        self.floats.activate(now, &mut self.drift);
        if self.is_idle() {
            self.floats.set_idle(true, now, &mut self.drift);
        }
        log::debug!("gate open");
    }

    fn start_idle(&mut self, now: Instant) {
        if self.reduced_motion() {
            return;
        }
        if self.turn_on.is_complete() && !self.scatter.is_empty() {
            self.scatter.begin(&mut self.drift);
        }
        self.floats.set_idle(true, now, &mut self.drift);
    }

    fn end_idle(&mut self, now: Instant) {
        self.scatter.end(&mut self.registry, now);
        self.floats.set_idle(false, now, &mut self.drift);
    }

    fn idle_progress(&self, now: Instant) -> f32 {
        self.idle.as_ref().map_or(0.0, |idle| idle.idle_progress(now))
    }

    fn report(&self, events: Vec<ChoreographyEvent>, now: Instant) -> FrameReport {
        FrameReport {
            events,
            turn_on: self.turn_on.phase(),
            idle_progress: self.idle_progress(now),
            animating: self.registry.active_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::RevealStatus;
    use crate::surface::{Rect, RecordingSurface};

    const HERO: ElementId = ElementId(1);
    const BACKGROUND: ElementId = ElementId(2);
    const CONTENT: ElementId = ElementId(3);
    const TITLE: ElementId = ElementId(4);
    const CARD: ElementId = ElementId(10);
    const LAYER: ElementId = ElementId(11);
    const FLOATER: ElementId = ElementId(12);

    fn attrs(pairs: &[(&'static str, &'static str)]) -> Vec<(&'static str, &'static str)> {
        pairs.to_vec()
    }

    fn page() -> (PageLayout, RecordingSurface) {
        let hero = attrs(&[("data-hero-root", "")]);
        let background = attrs(&[("data-hero-background", "")]);
        let content = attrs(&[("data-hero-turnon-content", "")]);
        let title = attrs(&[("data-idle-element", "title")]);
        let card = attrs(&[
            ("data-animate-direction", "up"),
            ("data-parallax", "medium"),
        ]);
        let layer = attrs(&[("data-layer", "2")]);
        let floater = attrs(&[("data-float", "low")]);

        let elements: Vec<(ElementId, &[(&str, &str)])> = vec![
            (HERO, hero.as_slice()),
            (BACKGROUND, background.as_slice()),
            (CONTENT, content.as_slice()),
            (TITLE, title.as_slice()),
            (CARD, card.as_slice()),
            (LAYER, layer.as_slice()),
            (FLOATER, floater.as_slice()),
        ];
        let layout = PageLayout::scan(elements);

        let mut surface = RecordingSurface::new(Viewport::new(1000.0, 800.0));
        surface.set_bounds(HERO, Rect::new(0.0, 0.0, 1000.0, 800.0));
        surface.set_bounds(TITLE, Rect::new(100.0, 300.0, 400.0, 80.0));
        // Far below the fold
        surface.set_bounds(CARD, Rect::new(0.0, 2000.0, 300.0, 200.0));
        surface.set_bounds(FLOATER, Rect::new(0.0, 100.0, 50.0, 50.0));
        (layout, surface)
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn has(report: &FrameReport, event: ChoreographyEvent) -> bool {
        report.events.contains(&event)
    }

    #[test]
    fn scan_finds_hero_roles() {
        let (layout, _) = page();
        assert_eq!(
            layout.turn_on,
            Some(TurnOnElements {
                root: HERO,
                background: Some(BACKGROUND),
                content: Some(CONTENT),
            })
        );
        assert_eq!(layout.scatter_container, Some(HERO));
        // Hero elements without effect attributes are not animated elements
        assert_eq!(layout.elements.len(), 4);
    }

    #[test]
    fn gate_opens_after_turn_on_and_delay() {
        let (layout, mut surface) = page();
        let mut page = Choreographer::with_seed(MotionOptions::default(), 1);
        let t0 = Instant::now();
        let _ = page.mount(&layout, t0, &mut surface);

        // Card below the fold starts hidden
        assert_eq!(page.reveal().status(CARD), Some(RevealStatus::Pending));
        assert_eq!(surface.state(CARD).map(|s| s.opacity), Some(0.0));

        let total = page.turn_on().total_time();
        let report = page.frame(t0 + total, &mut surface);
        assert!(has(&report, ChoreographyEvent::TurnOn(TurnOnEvent::Completed)));
        assert!(!page.is_gate_open());
        assert!(!page.parallax().is_active());

        let report = page.frame(t0 + total + ms(100), &mut surface);
        assert!(has(&report, ChoreographyEvent::GateOpened));
        assert!(page.parallax().is_active());
        assert!(page.floats().is_active());
    }

    #[test]
    fn reveals_wait_for_the_gate() {
        let (layout, mut surface) = page();
        let mut page = Choreographer::with_seed(MotionOptions::default(), 1);
        let t0 = Instant::now();
        let _ = page.mount(&layout, t0, &mut surface);

        // Scrolled into view during the intro: nothing happens yet
        surface.scroll_by(1500.0);
        let report = page.frame(t0 + ms(200), &mut surface);
        assert!(!has(&report, ChoreographyEvent::Revealed(CARD)));
        assert_eq!(page.reveal().status(CARD), Some(RevealStatus::Pending));

        let _ = page.skip_intro(t0 + ms(250), &mut surface);
        let _ = page.frame(t0 + ms(300), &mut surface);
        let report = page.frame(t0 + ms(350), &mut surface);
        assert!(has(&report, ChoreographyEvent::GateOpened));
        assert!(has(&report, ChoreographyEvent::Revealed(CARD)));
    }

    #[test]
    fn idle_scatters_hero_after_turn_on() {
        let (layout, mut surface) = page();
        let mut page = Choreographer::with_seed(MotionOptions::default(), 7);
        let t0 = Instant::now();
        let _ = page.mount(&layout, t0, &mut surface);
        let _ = page.skip_intro(t0, &mut surface);

        let report = page.frame(t0 + ms(4000), &mut surface);
        assert!(has(&report, ChoreographyEvent::Idle(IdleTransition::Started)));
        assert!(page.scatter().is_scattered());

        // Ramp completes after two more seconds
        let report = page.frame(t0 + ms(6000), &mut surface);
        assert!((report.idle_progress - 1.0).abs() < 1e-6);
        let hero = surface.state(HERO).unwrap();
        assert!((hero.scale - 0.85).abs() < 1e-4);
        let title = surface.state(TITLE).unwrap();
        assert!((title.opacity - 0.8).abs() < 1e-4);

        page.handle_input(InputEvent::Click, t0 + ms(6100));
        let report = page.frame(t0 + ms(6100), &mut surface);
        assert!(has(&report, ChoreographyEvent::Idle(IdleTransition::Ended)));
        assert!(!page.scatter().is_scattered());

        let _ = page.frame(t0 + ms(6500), &mut surface);
        assert!(surface.state(TITLE).unwrap().is_rest());
        assert!(surface.state(HERO).unwrap().is_rest());
    }

    #[test]
    fn replay_restores_scattered_hero_and_completes_again() {
        let (layout, mut surface) = page();
        let mut page = Choreographer::with_seed(MotionOptions::default(), 7);
        let t0 = Instant::now();
        let _ = page.mount(&layout, t0, &mut surface);
        let _ = page.skip_intro(t0, &mut surface);
        let _ = page.frame(t0 + ms(4000), &mut surface);
        let _ = page.frame(t0 + ms(6000), &mut surface);
        assert!(page.scatter().is_scattered());
        assert!(!surface.state(TITLE).unwrap().is_rest());

        let replayed = t0 + ms(6000);
        assert!(page.replay_intro(replayed, &mut surface));
        assert!(!page.scatter().is_scattered());
        assert!(surface.state(TITLE).unwrap().is_rest());
        assert_eq!(page.turn_on().phase(), TurnOnPhase::Armed);
        // The container is also the hero root, now back in its off state
        let hero = surface.state(HERO).unwrap();
        assert_eq!(hero.opacity, 0.0);
        assert!((hero.scale - 0.97).abs() < 1e-6);

        // Still idle, but the members stay put while the intro plays
        let report = page.frame(replayed + ms(500), &mut surface);
        assert!(has(&report, ChoreographyEvent::TurnOn(TurnOnEvent::Started)));
        assert!(surface.state(TITLE).unwrap().is_rest());

        let report = page.frame(replayed + page.turn_on().total_time(), &mut surface);
        assert!(has(&report, ChoreographyEvent::TurnOn(TurnOnEvent::Completed)));
        assert!(page.turn_on().is_complete());
        assert!(surface.state(HERO).unwrap().is_rest());
    }

    #[test]
    fn reduced_motion_skips_parallax_float_and_scatter() {
        let (layout, mut surface) = page();
        let mut options = MotionOptions::default();
        options.page.reduced_motion = true;
        let mut page = Choreographer::with_seed(options, 1);
        let t0 = Instant::now();
        let _ = page.mount(&layout, t0, &mut surface);

        assert_eq!(page.parallax().layer_counts(), (0, 0));
        assert!(page.floats().is_empty());
        assert!(page.scatter().is_empty());

        let total = page.turn_on().total_time();
        assert_eq!(total, ms(600));
        let _ = page.frame(t0 + total, &mut surface);
        let report = page.frame(t0 + total + ms(100), &mut surface);
        assert!(has(&report, ChoreographyEvent::GateOpened));
        assert!(!page.parallax().is_active());

        let report = page.frame(t0 + ms(10_000), &mut surface);
        assert!(has(&report, ChoreographyEvent::Idle(IdleTransition::Started)));
        assert!(!page.scatter().is_scattered());
    }

    #[test]
    fn page_without_hero_opens_gate_quickly() {
        let mut page = Choreographer::with_seed(MotionOptions::default(), 1);
        let mut surface = RecordingSurface::new(Viewport::default());
        let t0 = Instant::now();
        let events = page.mount(&PageLayout::new(), t0, &mut surface);
        assert_eq!(
            events,
            vec![ChoreographyEvent::TurnOn(TurnOnEvent::Completed)]
        );
        assert!(!page.replay_intro(t0, &mut surface));
        let report = page.frame(t0 + ms(100), &mut surface);
        assert!(has(&report, ChoreographyEvent::GateOpened));
    }

    #[test]
    fn pointer_parallax_moves_layers() {
        let (layout, mut surface) = page();
        let mut page = Choreographer::with_seed(MotionOptions::default(), 1);
        let t0 = Instant::now();
        let _ = page.mount(&layout, t0, &mut surface);
        let _ = page.skip_intro(t0, &mut surface);
        let _ = page.frame(t0 + ms(100), &mut surface);
        assert!(page.is_gate_open());

        page.handle_input(InputEvent::PointerMoved { x: 1000.0, y: 400.0 }, t0 + ms(110));
        for step in 1..=60 {
            let _ = page.frame(t0 + ms(100 + step * 16), &mut surface);
        }
        // 0.5 * 20 * depth 2
        let offset = surface.offset(LAYER).unwrap();
        assert!((offset.x - 20.0).abs() < 0.1);
        assert!(surface.offset(FLOATER).is_some());
    }

    #[test]
    fn unmount_cancels_everything() {
        let (layout, mut surface) = page();
        let mut page = Choreographer::with_seed(MotionOptions::default(), 1);
        let t0 = Instant::now();
        let _ = page.mount(&layout, t0, &mut surface);
        let _ = page.frame(t0 + ms(350), &mut surface);
        assert!(page.registry().active_count() > 0);

        page.unmount();
        assert!(!page.is_mounted());
        assert_eq!(page.registry().active_count(), 0);
        assert_eq!(page.turn_on().phase(), TurnOnPhase::Idle);

        // Frames after unmount write nothing
        let writes = surface.writes();
        let _ = page.frame(t0 + ms(5000), &mut surface);
        assert_eq!(surface.writes(), writes);

        // And the page can be mounted again
        let _ = page.mount(&layout, t0 + ms(6000), &mut surface);
        assert_eq!(page.turn_on().phase(), TurnOnPhase::Armed);
        assert_eq!(surface.state(HERO).map(|s| s.opacity), Some(0.0));
    }
}
