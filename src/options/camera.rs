use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Initial parameters copied into every newly constructed view controller.
pub struct CameraOptions {
    /// Vertical field of view in degrees (perspective controllers).
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Starting eye-to-focus distance for orbiting controllers.
    #[schemars(title = "Distance", range(min = 0.1, max = 1000.0), extend("step" = 0.5))]
    pub distance: f32,
    /// World units spanned by one screen pixel's worth of ortho zoom.
    #[schemars(title = "Ortho Scale", range(min = 0.1, max = 500.0), extend("step" = 0.5))]
    pub ortho_scale: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            distance: 10.0,
            ortho_scale: 10.0,
        }
    }
}
