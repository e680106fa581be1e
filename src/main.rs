//! Headless page simulation.
//!
//! Loads motion options (and optionally portfolio content), mounts a demo
//! page on an in-memory surface, plays a scripted session of pointer
//! moves, scrolling and idling, and writes one JSON line per frame that
//! produced events, followed by the final element states.

use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use folio_motion::animation::VisualState;
use folio_motion::choreographer::{
    ChoreographyEvent, Choreographer, PageLayout,
};
use folio_motion::content::Portfolio;
use folio_motion::effects::TurnOnPhase;
use folio_motion::error::MotionError;
use folio_motion::input::InputEvent;
use folio_motion::options::MotionOptions;
use folio_motion::surface::{ElementId, Rect, RecordingSurface, Viewport};
use serde::Serialize;
use web_time::{Duration, Instant};

/// Simulate a portfolio page headlessly and print a JSON trace.
#[derive(Debug, Parser)]
#[command(name = "folio-motion")]
#[command(version, about, long_about = None)]
struct Args {
    /// Motion options preset (TOML)
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Portfolio content to validate before simulating (TOML or JSON)
    #[arg(long, value_name = "FILE")]
    content: Option<PathBuf>,

    /// Simulated session length
    #[arg(long, value_name = "N", default_value_t = 12.0)]
    seconds: f32,

    /// Frames per simulated second
    #[arg(
        long,
        value_name = "N",
        default_value_t = 60,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    fps: u32,

    /// Seed for reproducible drifts and float offsets
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Force reduced motion regardless of the options file
    #[arg(long)]
    reduced_motion: bool,

    /// Print the options JSON schema and exit
    #[arg(long)]
    schema: bool,
}

#[derive(Serialize)]
struct TraceLine<'a> {
    t_ms: u128,
    events: &'a [ChoreographyEvent],
    turn_on: TurnOnPhase,
    idle_progress: f32,
    animating: usize,
}

#[derive(Serialize)]
struct FinalStates {
    t_ms: u128,
    states: Vec<(ElementId, VisualState)>,
}

/// Hero with a background, a title and tagline that scatter while idle, a
/// staggered card grid below the fold, a pointer layer and two floaters.
fn demo_page() -> (PageLayout, RecordingSurface) {
    let mut surface = RecordingSurface::new(Viewport::new(1280.0, 800.0));
    let mut elements: Vec<(ElementId, Vec<(&str, &str)>, Rect)> = vec![
        (ElementId(1), vec![("data-hero-root", "")], Rect::new(0.0, 0.0, 1280.0, 800.0)),
        (
            ElementId(2),
            vec![("data-hero-background", ""), ("data-layer", "0.5")],
            Rect::new(0.0, 0.0, 1280.0, 800.0),
        ),
        (
            ElementId(3),
            vec![("data-hero-turnon-content", "")],
            Rect::new(140.0, 200.0, 1000.0, 400.0),
        ),
        (
            ElementId(4),
            vec![
                ("data-idle-element", "name"),
                ("data-idle-drift", "60"),
                ("data-idle-rotation", "3"),
            ],
            Rect::new(200.0, 260.0, 880.0, 120.0),
        ),
        (
            ElementId(5),
            vec![("data-idle-element", "tagline"), ("data-float", "low")],
            Rect::new(300.0, 400.0, 680.0, 40.0),
        ),
        (
            ElementId(6),
            vec![("data-float", "medium"), ("data-layer", "1.5")],
            Rect::new(1100.0, 600.0, 60.0, 60.0),
        ),
        (
            ElementId(7),
            vec![("data-animate-direction", "left"), ("data-parallax", "low")],
            Rect::new(80.0, 1000.0, 500.0, 300.0),
        ),
    ];
    for i in 0..4u32 {
        let x = 80.0 + 300.0 * i as f32;
        elements.push((
            ElementId(10 + i),
            vec![
                ("data-animate-direction", "up"),
                ("data-animate-group", "projects"),
                ("data-parallax", "medium"),
                ("data-depth", "foreground"),
            ],
            Rect::new(x, 1500.0, 260.0, 360.0),
        ));
    }

    for (id, _, rect) in &elements {
        surface.set_bounds(*id, *rect);
    }
    let layout = PageLayout::scan(
        elements
            .iter()
            .map(|(id, attrs, _)| (*id, attrs.as_slice())),
    );
    (layout, surface)
}

/// Scripted input for the frame at `t` (seconds since mount).
fn script(t: f32, frame: f32) -> Vec<InputEvent> {
    let mut events = Vec::new();
    if (1.5..2.5).contains(&t) {
        let x = 640.0 + (t - 1.5) * 500.0;
        events.push(InputEvent::PointerMoved { x, y: 300.0 });
    }
    if (3.0..5.0).contains(&t) {
        events.push(InputEvent::Scrolled {
            offset_y: (t - 3.0) * 600.0,
        });
    }
    // Nothing else until well past the idle timeout, then a click
    if (t - 11.0).abs() < frame / 2.0 {
        events.push(InputEvent::Click);
    }
    events
}

fn run(args: &Args) -> Result<(), MotionError> {
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if args.schema {
        let schema = MotionOptions::json_schema();
        serde_json::to_writer_pretty(&mut out, &schema)
            .map_err(|e| MotionError::Trace(e.to_string()))?;
        writeln!(out)?;
        return Ok(());
    }

    let mut options = match &args.options {
        Some(path) => MotionOptions::load(path)?,
        None => MotionOptions::default(),
    };
    options.page.reduced_motion |= args.reduced_motion;

    if let Some(path) = &args.content {
        let portfolio = Portfolio::load_validated(path)?;
        log::info!(
            "content: {} projects, {} social links",
            portfolio.projects.len(),
            portfolio.social.len()
        );
    }

    let mut page = match args.seed {
        Some(seed) => Choreographer::with_seed(options, seed),
        None => Choreographer::new(options),
    };
    let (layout, mut surface) = demo_page();

    let frame = Duration::from_secs(1) / args.fps;
    let frames = (args.seconds.max(0.0) * args.fps as f32).ceil() as u32;
    let t0 = Instant::now();
    let mut scrolled = 0.0;

    let mounted = page.mount(&layout, t0, &mut surface);
    write_json(
        &mut out,
        &TraceLine {
            t_ms: 0,
            events: &mounted,
            turn_on: page.turn_on().phase(),
            idle_progress: 0.0,
            animating: page.registry().active_count(),
        },
    )?;

    for i in 1..=frames {
        let elapsed = frame * i;
        let now = t0 + elapsed;
        let t = elapsed.as_secs_f32();
        for event in script(t, frame.as_secs_f32()) {
            if let InputEvent::Scrolled { offset_y } = event {
                surface.scroll_by(offset_y - scrolled);
                scrolled = offset_y;
            }
            page.handle_input(event, now);
        }

        let report = page.frame(now, &mut surface);
        if !report.events.is_empty() {
            write_json(
                &mut out,
                &TraceLine {
                    t_ms: elapsed.as_millis(),
                    events: &report.events,
                    turn_on: report.turn_on,
                    idle_progress: report.idle_progress,
                    animating: report.animating,
                },
            )?;
        }
    }

    write_json(
        &mut out,
        &FinalStates {
            t_ms: (frame * frames).as_millis(),
            states: surface.snapshot(),
        },
    )?;
    page.unmount();
    out.flush()?;
    Ok(())
}

fn write_json(out: &mut impl Write, value: &impl Serialize) -> Result<(), MotionError> {
    serde_json::to_writer(&mut *out, value)
        .map_err(|e| MotionError::Trace(e.to_string()))?;
    writeln!(out)?;
    Ok(())
}

fn main() {
    env_logger::init();

    // Usage errors exit with 2, --help and --version with 0
    let args = Args::try_parse().unwrap_or_else(|e| e.exit());

    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    #[test]
    fn cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_without_flags() {
        let args = Args::try_parse_from(["folio-motion"]).unwrap();
        assert_eq!(args.fps, 60);
        assert!((args.seconds - 12.0).abs() < f32::EPSILON);
        assert!(args.seed.is_none());
        assert!(!args.reduced_motion && !args.schema);
    }

    #[test]
    fn parses_every_flag() {
        let args = Args::try_parse_from([
            "folio-motion",
            "--options",
            "presets/calm.toml",
            "--content",
            "content/portfolio.toml",
            "--seconds",
            "3.5",
            "--fps",
            "30",
            "--seed",
            "42",
            "--reduced-motion",
        ])
        .unwrap();
        assert_eq!(args.options, Some(PathBuf::from("presets/calm.toml")));
        assert_eq!(args.content, Some(PathBuf::from("content/portfolio.toml")));
        assert_eq!(args.fps, 30);
        assert_eq!(args.seed, Some(42));
        assert!(args.reduced_motion);
    }

    #[test]
    fn bad_arguments_are_usage_errors() {
        let zero_fps = Args::try_parse_from(["folio-motion", "--fps", "0"]).unwrap_err();
        assert_eq!(zero_fps.kind(), ErrorKind::ValueValidation);
        assert_eq!(zero_fps.exit_code(), 2);

        let unknown = Args::try_parse_from(["folio-motion", "--loud"]).unwrap_err();
        assert_eq!(unknown.kind(), ErrorKind::UnknownArgument);
        assert_eq!(unknown.exit_code(), 2);

        let missing = Args::try_parse_from(["folio-motion", "--seed"]).unwrap_err();
        assert_eq!(missing.exit_code(), 2);
    }
}
