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

//! View-controller management for 3D render surfaces.
//!
//! A render surface is driven by exactly one camera-control strategy at a
//! time. Vista keeps every configured strategy instance alive, decides which
//! one is current, and keeps the surface driven when views are switched,
//! copied, reordered or deleted.
//!
//! # Key entry points
//!
//! - [`ViewManager`] - owns the views and runs the current-view state
//!   machine
//! - [`controller::ViewController`] - the strategy trait, with orbit,
//!   XY-orbit, first-person and top-down orthographic implementations
//! - [`factory::ControllerFactory`] - name and alias resolution
//! - [`options::Options`] - TOML-backed startup configuration
//!
//! # Architecture
//!
//! Views live in a generational arena ([`store::ViewStore`]) so handles
//! stay valid across reordering and never alias a later view. Every
//! removal path funnels through one place in the manager that runs the
//! fallback before the removed controller is dropped. Observers subscribe
//! to [`events::ViewEvent`]s; multi-step transitions are delivered as one
//! batch.

pub mod camera;
pub mod controller;
pub mod error;
pub mod events;
pub mod factory;
pub mod manager;
pub mod options;
pub mod registry;
pub mod store;
pub mod surface;

pub use error::VistaError;
pub use manager::{ManagerState, ViewManager};
