//! The hero "light bulb" turn-on sequence.
//!
//! ```text
//! Idle --mount--> Armed --delay--> Flashing1 -> Flashing2 -> Stabilizing -> Complete
//!                              \-> Fading (reduced motion) -----------------/
//! ```
//!
//! Transitions are time-driven; the only user-facing control is
//! [`skip`](TurnOnSequencer::skip), which jumps straight to `Complete`.
//! However the sequence ends, the root finishes at opacity 1, scale 1, and
//! with no filter.

use serde::Serialize;
use web_time::{Duration, Instant};

use crate::animation::{AnimationRegistry, Keyframes, Segment, VisualState};
use crate::options::{FlashOptions, TurnOnOptions};
use crate::surface::{ElementId, Surface};
use crate::util::{millis, secs};

/// Sequencer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOnPhase {
    /// Not mounted.
    Idle,
    /// Mounted in the "off" state, waiting out the delay.
    Armed,
    /// First, strongest flicker.
    Flashing1,
    /// Second, softer flicker.
    Flashing2,
    /// Settling to the final state.
    Stabilizing,
    /// Single fade used under reduced motion.
    Fading,
    /// Done. Terminal until an explicit replay.
    Complete,
}

impl TurnOnPhase {
    const fn order(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Armed => 1,
            Self::Flashing1 | Self::Fading => 2,
            Self::Flashing2 => 3,
            Self::Stabilizing => 4,
            Self::Complete => 5,
        }
    }
}

/// Something observers of the sequence may care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "phase", rename_all = "snake_case")]
pub enum TurnOnEvent {
    /// The timeline began playing (after the delay).
    Started,
    /// Entered a new phase.
    PhaseChanged(TurnOnPhase),
    /// Reached `Complete`. Reported exactly once per run.
    Completed,
}

/// Elements the sequence animates. The page owns them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TurnOnElements {
    /// Hero root: opacity/scale flicker.
    pub root: ElementId,
    /// Hero background: brightness glow.
    pub background: Option<ElementId>,
    /// Hero content wrapper; follows the root.
    pub content: Option<ElementId>,
}

/// Plays the turn-on exactly once per mount.
#[derive(Debug, Clone)]
pub struct TurnOnSequencer {
    options: TurnOnOptions,
    reduced_motion: bool,
    elements: Option<TurnOnElements>,
    phase: TurnOnPhase,
    armed_at: Option<Instant>,
    started_at: Option<Instant>,
}

impl TurnOnSequencer {
    /// Unmounted sequencer.
    #[must_use]
    pub fn new(options: TurnOnOptions, reduced_motion: bool) -> Self {
        Self {
            options,
            reduced_motion,
            elements: None,
            phase: TurnOnPhase::Idle,
            armed_at: None,
            started_at: None,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> TurnOnPhase {
        self.phase
    }

    /// Whether the sequence has reached `Complete`.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == TurnOnPhase::Complete
    }

    /// Mounted elements.
    #[must_use]
    pub fn elements(&self) -> Option<TurnOnElements> {
        self.elements
    }

    /// Wait between mount and the first flicker.
    #[must_use]
    pub fn delay(&self) -> Duration {
        let delay = millis(self.options.delay_ms);
        if self.reduced_motion {
            delay / 2
        } else {
            delay
        }
    }

    /// The timed phases and their lengths, in play order.
    #[must_use]
    pub fn schedule(&self) -> Vec<(TurnOnPhase, Duration)> {
        let o = &self.options;
        if self.reduced_motion {
            return vec![(TurnOnPhase::Fading, secs(o.reduced_duration))];
        }
        vec![
            (TurnOnPhase::Flashing1, flash_duration(&o.flash1)),
            (TurnOnPhase::Flashing2, flash_duration(&o.flash2)),
            (TurnOnPhase::Stabilizing, secs(o.stabilize_duration)),
        ]
    }

    /// Length of the timeline, excluding the delay.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.schedule().iter().map(|(_, d)| *d).sum()
    }

    /// Delay plus timeline.
    #[must_use]
    pub fn total_time(&self) -> Duration {
        self.delay() + self.total_duration()
    }

    /// Mount onto the hero and arm the sequence.
    ///
    /// Applies the "off" state immediately. Without a root element there is
    /// nothing to animate and the sequence completes at once. Mounting
    /// again without [`teardown`](Self::teardown) is ignored.
    pub fn mount(
        &mut self,
        elements: Option<TurnOnElements>,
        now: Instant,
        registry: &mut AnimationRegistry,
        surface: &mut dyn Surface,
    ) -> Vec<TurnOnEvent> {
        if self.phase != TurnOnPhase::Idle {
            log::warn!("turn-on already mounted ({:?}), ignoring", self.phase);
            return Vec::new();
        }
        let Some(elements) = elements else {
            log::debug!("no hero root, turn-on completes immediately");
            self.phase = TurnOnPhase::Complete;
            return vec![TurnOnEvent::Completed];
        };
        self.elements = Some(elements);
        self.arm(now, registry, surface);
        Vec::new()
    }

    fn arm(
        &mut self,
        now: Instant,
        registry: &mut AnimationRegistry,
        surface: &mut dyn Surface,
    ) {
        let Some(el) = self.elements else {
            return;
        };
        registry.set(el.root, &self.root_off(), surface);
        if let Some(bg) = el.background {
            registry.set(bg, &self.background_off(), surface);
        }
        if let Some(content) = el.content {
            registry.set(content, &VisualState::REST, surface);
        }
        self.phase = TurnOnPhase::Armed;
        self.armed_at = Some(now);
        self.started_at = None;
    }

    /// Advance the sequence to `now`.
    ///
    /// Starts the timeline once the delay has passed, reports every phase
    /// crossed since the last call, and finalizes at the end.
    pub fn update(
        &mut self,
        now: Instant,
        registry: &mut AnimationRegistry,
        surface: &mut dyn Surface,
    ) -> Vec<TurnOnEvent> {
        let mut events = Vec::new();

        if self.phase == TurnOnPhase::Armed {
            let Some(start) = self.armed_at.map(|t| t + self.delay()) else {
                return events;
            };
            if now < start {
                return events;
            }
            self.start_timeline(start, registry);
            events.push(TurnOnEvent::Started);
        }

        let Some(started) = self.started_at else {
            return events;
        };
        if self.phase == TurnOnPhase::Complete {
            return events;
        }

        let elapsed = now.saturating_duration_since(started);
        let mut end = Duration::ZERO;
        for (phase, duration) in self.schedule() {
            let begin = end;
            end += duration;
            // Phases crossed entirely between two updates are still reported
            if elapsed >= begin && phase.order() > self.phase.order() {
                self.phase = phase;
                events.push(TurnOnEvent::PhaseChanged(phase));
            }
        }

        if elapsed >= end {
            self.finalize(registry, surface);
            events.push(TurnOnEvent::PhaseChanged(TurnOnPhase::Complete));
            events.push(TurnOnEvent::Completed);
        }
        events
    }

    fn start_timeline(&mut self, start: Instant, registry: &mut AnimationRegistry) {
        self.started_at = Some(start);
        let Some(el) = self.elements else {
            return;
        };
        let _ = registry.start(el.root, self.root_timeline(), start);
        if let Some(bg) = el.background {
            let _ = registry.start(bg, self.background_timeline(), start);
        }
        log::debug!(
            "turn-on started ({:?}, reduced motion: {})",
            self.total_duration(),
            self.reduced_motion
        );
    }

    /// Jump to `Complete`, clearing all transient visual state.
    ///
    /// No-op if already complete.
    pub fn skip(
        &mut self,
        registry: &mut AnimationRegistry,
        surface: &mut dyn Surface,
    ) -> Vec<TurnOnEvent> {
        if self.phase == TurnOnPhase::Complete {
            return Vec::new();
        }
        log::debug!("turn-on skipped during {:?}", self.phase);
        self.finalize(registry, surface);
        vec![
            TurnOnEvent::PhaseChanged(TurnOnPhase::Complete),
            TurnOnEvent::Completed,
        ]
    }

    /// Explicitly play the sequence again from the "off" state.
    ///
    /// Returns `false` if nothing is mounted.
    pub fn replay(
        &mut self,
        now: Instant,
        registry: &mut AnimationRegistry,
        surface: &mut dyn Surface,
    ) -> bool {
        if self.elements.is_none() {
            return false;
        }
        self.arm(now, registry, surface);
        true
    }

    /// Cancel everything and return to `Idle`. The elements are left as
    /// they are.
    pub fn teardown(&mut self, registry: &mut AnimationRegistry) {
        if let Some(el) = self.elements.take() {
            let _ = registry.cancel(el.root);
            if let Some(bg) = el.background {
                let _ = registry.cancel(bg);
            }
        }
        self.phase = TurnOnPhase::Idle;
        self.armed_at = None;
        self.started_at = None;
    }

    fn finalize(
        &mut self,
        registry: &mut AnimationRegistry,
        surface: &mut dyn Surface,
    ) {
        if let Some(el) = self.elements {
            registry.set(el.root, &VisualState::REST, surface);
            if let Some(bg) = el.background {
                registry.set(bg, &VisualState::REST, surface);
            }
            if let Some(content) = el.content {
                registry.set(content, &VisualState::REST, surface);
            }
        }
        self.phase = TurnOnPhase::Complete;
    }

    fn root_off(&self) -> VisualState {
        VisualState::REST
            .with_opacity(self.options.off_opacity)
            .with_scale(self.options.off_scale)
    }

    fn background_off(&self) -> VisualState {
        VisualState::REST.with_opacity(self.options.background_off_opacity)
    }

    /// Root keyframes: two peak/trough flickers, then a settle.
    #[must_use]
    pub fn root_timeline(&self) -> Keyframes {
        let o = &self.options;
        let off = self.root_off();
        if self.reduced_motion {
            return Keyframes::new(off).then(Segment::new(
                VisualState::REST,
                secs(o.reduced_duration),
                o.reduced_easing,
            ));
        }
        let flicker = |frames: Keyframes, f: &FlashOptions| {
            let half = flash_duration(f) / 2;
            frames
                .then(Segment::new(
                    VisualState::REST
                        .with_opacity(f.peak_opacity)
                        .with_scale(f.peak_scale),
                    half,
                    f.rise_easing,
                ))
                .then(Segment::new(
                    VisualState::REST
                        .with_opacity(f.trough_opacity)
                        .with_scale(f.trough_scale),
                    half,
                    f.fall_easing,
                ))
        };
        let frames = flicker(Keyframes::new(off), &o.flash1);
        flicker(frames, &o.flash2).then(Segment::new(
            VisualState::REST,
            secs(o.stabilize_duration),
            o.stabilize_easing,
        ))
    }

    /// Background keyframes: glow with each flicker, then full brightness.
    #[must_use]
    pub fn background_timeline(&self) -> Keyframes {
        let o = &self.options;
        let off = self.background_off();
        if self.reduced_motion {
            return Keyframes::new(off).then(Segment::new(
                VisualState::REST,
                secs(o.reduced_duration),
                o.reduced_easing,
            ));
        }
        let glow = |frames: Keyframes, f: &FlashOptions| {
            let half = flash_duration(f) / 2;
            frames
                .then(Segment::new(
                    VisualState::REST.with_opacity(f.glow),
                    half,
                    f.rise_easing,
                ))
                .then(Segment::new(
                    VisualState::REST
                        .with_opacity(o.background_off_opacity * f.glow_falloff),
                    half,
                    f.fall_easing,
                ))
        };
        let frames = glow(Keyframes::new(off), &o.flash1);
        glow(frames, &o.flash2).then(Segment::new(
            VisualState::REST,
            secs(o.stabilize_duration),
            o.stabilize_easing,
        ))
    }
}

/// Flash duration rounded to an even number of microseconds so both
/// halves sum back to it exactly.
fn flash_duration(flash: &FlashOptions) -> Duration {
    (secs(flash.duration) / 2) * 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Motion;
    use crate::surface::{RecordingSurface, Viewport};

    const ROOT: ElementId = ElementId(1);
    const BG: ElementId = ElementId(2);

    fn elements() -> Option<TurnOnElements> {
        Some(TurnOnElements {
            root: ROOT,
            background: Some(BG),
            content: None,
        })
    }

    struct Rig {
        seq: TurnOnSequencer,
        registry: AnimationRegistry,
        surface: RecordingSurface,
        t0: Instant,
    }

    impl Rig {
        fn new(reduced: bool) -> Self {
            let mut rig = Self {
                seq: TurnOnSequencer::new(TurnOnOptions::default(), reduced),
                registry: AnimationRegistry::new(),
                surface: RecordingSurface::new(Viewport::default()),
                t0: Instant::now(),
            };
            let events =
                rig.seq.mount(elements(), rig.t0, &mut rig.registry, &mut rig.surface);
            assert!(events.is_empty());
            rig
        }

        fn step(&mut self, ms: u64) -> Vec<TurnOnEvent> {
            let now = self.t0 + Duration::from_millis(ms);
            let _ = self.registry.update(now, &mut self.surface);
            self.seq.update(now, &mut self.registry, &mut self.surface)
        }
    }

    #[test]
    fn mount_applies_off_state() {
        let rig = Rig::new(false);
        assert_eq!(rig.seq.phase(), TurnOnPhase::Armed);
        let root = rig.surface.state(ROOT).unwrap();
        assert_eq!(root.opacity, 0.0);
        assert_eq!(root.scale, 0.97);
        assert_eq!(rig.surface.state(BG).unwrap().opacity, 0.3);
    }

    #[test]
    fn full_sequence_walks_every_phase() {
        let mut rig = Rig::new(false);
        assert!(rig.step(299).is_empty());

        let events = rig.step(300);
        assert_eq!(
            events,
            vec![
                TurnOnEvent::Started,
                TurnOnEvent::PhaseChanged(TurnOnPhase::Flashing1)
            ]
        );
        // Flash 1 peak at 60 ms in
        let _ = rig.step(360);
        let root = rig.surface.state(ROOT).unwrap();
        assert!((root.opacity - 1.0).abs() < 1e-3);
        assert!((root.scale - 1.02).abs() < 1e-3);
        assert!((rig.surface.state(BG).unwrap().opacity - 1.4).abs() < 1e-3);

        assert_eq!(
            rig.step(420 + 1),
            vec![TurnOnEvent::PhaseChanged(TurnOnPhase::Flashing2)]
        );
        assert_eq!(
            rig.step(570 + 1),
            vec![TurnOnEvent::PhaseChanged(TurnOnPhase::Stabilizing)]
        );
        assert_eq!(
            rig.step(1070),
            vec![
                TurnOnEvent::PhaseChanged(TurnOnPhase::Complete),
                TurnOnEvent::Completed
            ]
        );
        assert!(rig.surface.state(ROOT).unwrap().is_rest());
        assert_eq!(rig.surface.state(ROOT).unwrap().blur, 0.0);
        // Completed is reported once
        assert!(rig.step(2000).is_empty());
    }

    #[test]
    fn large_gap_reports_crossed_phases_in_order() {
        let mut rig = Rig::new(false);
        let events = rig.step(5000);
        assert_eq!(
            events,
            vec![
                TurnOnEvent::Started,
                TurnOnEvent::PhaseChanged(TurnOnPhase::Flashing1),
                TurnOnEvent::PhaseChanged(TurnOnPhase::Flashing2),
                TurnOnEvent::PhaseChanged(TurnOnPhase::Stabilizing),
                TurnOnEvent::PhaseChanged(TurnOnPhase::Complete),
                TurnOnEvent::Completed,
            ]
        );
        assert!(rig.seq.is_complete());
    }

    #[test]
    fn reduced_motion_is_a_single_fade() {
        let mut rig = Rig::new(true);
        assert_eq!(rig.seq.delay(), Duration::from_millis(150));
        assert_eq!(rig.seq.schedule().len(), 1);
        assert_eq!(rig.seq.total_duration(), Duration::from_millis(450));

        assert_eq!(
            rig.step(150),
            vec![
                TurnOnEvent::Started,
                TurnOnEvent::PhaseChanged(TurnOnPhase::Fading)
            ]
        );
        let events = rig.step(600);
        assert_eq!(events.last(), Some(&TurnOnEvent::Completed));
        assert!(rig.surface.state(ROOT).unwrap().is_rest());
    }

    #[test]
    fn skip_from_any_phase_ends_clean() {
        for at in [0, 350, 500, 900] {
            let mut rig = Rig::new(false);
            let _ = rig.step(at);
            let events = rig.seq.skip(&mut rig.registry, &mut rig.surface);
            assert_eq!(events.last(), Some(&TurnOnEvent::Completed));
            assert!(rig.seq.is_complete());
            let root = rig.surface.state(ROOT).unwrap();
            assert!(root.is_rest(), "skip at {at}ms left {root:?}");
            assert_eq!(root.blur, 0.0);
            assert!(!rig.registry.is_animating(ROOT));
            // Skipping again does nothing
            assert!(rig.seq.skip(&mut rig.registry, &mut rig.surface).is_empty());
        }
    }

    #[test]
    fn missing_root_completes_immediately() {
        let mut seq = TurnOnSequencer::new(TurnOnOptions::default(), false);
        let mut registry = AnimationRegistry::new();
        let mut surface = RecordingSurface::new(Viewport::default());
        let events = seq.mount(None, Instant::now(), &mut registry, &mut surface);
        assert_eq!(events, vec![TurnOnEvent::Completed]);
        assert!(seq.is_complete());
        assert_eq!(surface.writes(), 0);
    }

    #[test]
    fn runs_once_per_mount_and_replays_explicitly() {
        let mut rig = Rig::new(false);
        let _ = rig.step(2000);
        assert!(rig.seq.is_complete());

        // A second mount is ignored
        let again = rig.seq.mount(
            elements(),
            rig.t0,
            &mut rig.registry,
            &mut rig.surface,
        );
        assert!(again.is_empty());
        assert!(rig.seq.is_complete());

        let replay_at = rig.t0 + Duration::from_millis(3000);
        assert!(rig.seq.replay(replay_at, &mut rig.registry, &mut rig.surface));
        assert_eq!(rig.seq.phase(), TurnOnPhase::Armed);
        let events = rig.step(5000);
        assert_eq!(events.last(), Some(&TurnOnEvent::Completed));
    }

    #[test]
    fn timelines_match_schedule() {
        let seq = TurnOnSequencer::new(TurnOnOptions::default(), false);
        let root = seq.root_timeline();
        assert_eq!(root.total_duration(), seq.total_duration());
        assert_eq!(root.duration(), Some(Duration::from_millis(770)));
        // Background trough after flash 1 is 1.5x the off opacity
        let trough = seq.background_timeline().segments()[1].target.opacity;
        assert!((trough - 0.45).abs() < 1e-5);
    }
}
