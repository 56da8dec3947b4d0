//! Camera placement shared by all view controllers.
//!
//! Controllers own their parameters; [`CameraPose`] is the common currency
//! they use to hand state to one another.

/// Camera pose type and orbit helpers.
pub mod core;

pub use self::core::CameraPose;
