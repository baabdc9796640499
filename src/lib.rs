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

//! Digital twin viewer core for a wind turbine.
//!
//! A scene is one visual STL mesh plus a fixed set of invisible capsule
//! collision volumes, each bound to a static inspection record. Clicking a
//! screen point casts a ray through the camera; the nearest volume along the
//! ray writes its record into a single-slot selection store, and the detail
//! panel renders from that store.
//!
//! # Key entry points
//!
//! - [`viewer::TwinViewer`] - event-driven front end tying everything
//!   together
//! - [`scene::SceneComposer`] - visual mesh loading and hit volumes
//! - [`catalog::Catalog`] - validated set of inspection records
//! - [`selection::SelectionStore`] - the current selection
//! - [`panel::DetailPanel`] - view model for the selected record
//! - [`options::Options`] - runtime configuration with TOML support
//!
//! # Threading
//!
//! Everything runs on the caller's (UI) thread except the mesh load, which
//! runs once on a background thread and is observed through
//! [`scene::SceneComposer::poll`]. No rendering backend is bundled; a front
//! end draws the [`scene::SceneFrame`] and [`panel::PanelView`] it is given.

pub mod camera;
pub mod catalog;
pub mod error;
pub mod input;
pub mod mesh;
pub mod options;
pub mod panel;
pub mod picking;
pub mod scene;
pub mod selection;
pub mod viewer;
