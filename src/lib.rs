// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Headless animation choreography for a single-page portfolio site.
//!
//! folio-motion decides what every animated element on the page looks like
//! at a given instant: the hero "light bulb" turn-on, one-shot directional
//! reveals, scroll and pointer parallax, zero-gravity floating, and the
//! idle "scatter" of hero elements. It never touches the DOM itself; a host
//! feeds it input events and frame ticks and writes the computed
//! [`VisualState`](animation::VisualState)s back through a
//! [`Surface`](surface::Surface).
//!
//! # Key entry points
//!
//! - [`choreographer::Choreographer`] - page-level owner of every effect
//! - [`options::MotionOptions`] - tunable timings and magnitudes (TOML)
//! - [`markup`] - the `data-*` attribute contract between markup and engine
//! - [`effects`] - the individual effect state machines
//! - [`content`] - portfolio content validation and repository listings
//!
//! # Architecture
//!
//! Everything is single-threaded and driven by the host loop. Time is
//! passed in explicitly as [`web_time::Instant`], so the engine runs the
//! same in a browser (`crates/folio-web`), in the headless CLI, and in
//! tests. Tweens live in an explicitly owned
//! [`AnimationRegistry`](animation::AnimationRegistry): starting a tween on
//! an element always cancels the one already running there.

pub mod animation;
pub mod choreographer;
pub mod content;
pub mod effects;
pub mod error;
pub mod input;
pub mod markup;
pub mod options;
pub mod surface;
pub mod util;
