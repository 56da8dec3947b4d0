//! Crate-level error types.

use std::fmt;

/// Errors produced by the vista crate.
#[derive(Debug)]
pub enum VistaError {
    /// No controller type is registered under this identifier or alias.
    UnknownType(String),
    /// An operation required a current view but none exists.
    NoCurrentView,
    /// The handle does not refer to a view in the store.
    InvalidHandle,
    /// `initialize` was called on a manager that already left the
    /// uninitialized state.
    AlreadyInitialized,
    /// The manager has been shut down and accepts no further changes.
    TornDown,
    /// The controller has no property with this name.
    UnknownProperty(String),
    /// The value kind does not match the property's kind.
    PropertyType(String),
    /// Controller parameter blob could not be (de)serialized.
    Params(serde_json::Error),
    /// A saved view configuration contained no usable views.
    EmptyConfig,
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for VistaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownType(name) => {
                write!(f, "unknown view controller type '{name}'")
            }
            Self::NoCurrentView => write!(f, "no current view controller"),
            Self::InvalidHandle => write!(f, "stale or invalid view handle"),
            Self::AlreadyInitialized => {
                write!(f, "view manager is already initialized")
            }
            Self::TornDown => write!(f, "view manager has been shut down"),
            Self::UnknownProperty(name) => {
                write!(f, "unknown view property '{name}'")
            }
            Self::PropertyType(name) => {
                write!(f, "wrong value type for view property '{name}'")
            }
            Self::Params(e) => write!(f, "view parameter error: {e}"),
            Self::EmptyConfig => {
                write!(f, "saved view configuration has no usable views")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for VistaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Params(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for VistaError {
    fn from(e: serde_json::Error) -> Self {
        Self::Params(e)
    }
}

impl From<std::io::Error> for VistaError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
