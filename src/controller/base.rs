use super::{ControllerContext, SceneAnchor};
use crate::camera::CameraPose;

/// State every controller carries regardless of strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewBase {
    /// User-visible instance name.
    pub name: String,
    /// Reference frame pushed in by the manager when the view becomes
    /// current.
    pub target_frame: String,
    /// Scene node the controller is bound to.
    pub anchor: SceneAnchor,
}

impl ViewBase {
    /// Fresh base state named `name`, bound to the context's anchor.
    pub fn new(name: &str, context: &ControllerContext) -> Self {
        Self {
            name: name.to_owned(),
            target_frame: String::new(),
            anchor: context.anchor.clone(),
        }
    }

    /// Convert an anchor-relative pose to world space.
    pub fn to_world(&self, local: &CameraPose) -> CameraPose {
        local.translated(self.anchor.origin)
    }

    /// Convert a world-space pose to anchor-relative coordinates.
    pub fn to_local(&self, world: &CameraPose) -> CameraPose {
        world.translated(-self.anchor.origin)
    }
}
