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
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
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

//! Camera control core for real-time 3D engines.
//!
//! Cinecam drives a camera through two modes: smoothed tracking of a game
//! entity, and time-scaled playback of a recorded fly-by path. A per-camera
//! controller arbitrates between them and commits one pose per tick.
//!
//! # Key entry points
//!
//! - [`camera::CameraController`] - per-camera mode arbitration and the
//!   `follow_entity` / `play_flyby` / `advance` entry points
//! - [`camera::PathData`] - validated keyframe sequence for fly-bys
//! - [`camera::CameraRegistry`] - multi-camera ownership by id
//! - [`world`] - entity lookup and collision query seams, with in-memory
//!   implementations
//! - [`options::Options`] - follow/fly-by/projection tuning with TOML presets
//!
//! # Tick model
//!
//! The host calls `follow_entity` each tick while tracking, and `advance`
//! each tick to progress a fly-by. All work runs on the caller's thread;
//! entity and collision services are borrowed through a
//! [`camera::TickContext`] for the duration of the call.

pub mod animation;
pub mod camera;
pub mod error;
pub mod options;
pub mod world;

pub use error::CameraError;
