use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which controller types the manager seeds and falls back to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Views", inline)]
#[serde(default)]
pub struct ViewOptions {
    /// Type seeded as the first current view during `initialize`.
    #[schemars(title = "Initial View")]
    pub initial_type: String,
    /// Type materialized when the requested bootstrap type is unknown, or
    /// when the last current view is destroyed. Must name a registered type.
    #[schemars(title = "Fallback View")]
    pub default_type: String,
    /// Prefix prepended to the name of a copied view.
    #[schemars(skip)]
    pub copy_prefix: String,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            initial_type: "Orbit".into(),
            default_type: "Orbit".into(),
            copy_prefix: "Copy of ".into(),
        }
    }
}
