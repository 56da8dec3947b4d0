//! View controllers: interchangeable camera-control strategies.
//!
//! A [`ViewController`] owns all of its parameter state and is driven by
//! exactly one render surface while it is the current view. The manager
//! never looks inside a controller; it talks to it through this trait
//! (naming, target frame, pose hand-off, copying, parameter blobs, and the
//! editable property list shown in the UI tree).

mod base;
/// Free-look first-person controller.
pub mod fps;
/// Free orbit around a focal point.
pub mod orbit;
/// Fixed-orientation top-down orthographic controller.
pub mod ortho;
mod property;
/// Orbit whose focal point is pinned to the anchor's XY plane.
pub mod xy_orbit;

pub use base::ViewBase;
use glam::Vec3;
pub use property::{Property, PropertyValue};

use crate::camera::CameraPose;
use crate::error::VistaError;
use crate::options::CameraOptions;

/// The scene node every controller is bound to. Poses reported by
/// controllers are in world space; parameters are kept relative to the
/// anchor's origin.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneAnchor {
    /// Name of the render-target scene node.
    pub name: String,
    /// World-space origin of the scene node.
    pub origin: Vec3,
}

impl Default for SceneAnchor {
    fn default() -> Self {
        Self {
            name: "root".into(),
            origin: Vec3::ZERO,
        }
    }
}

/// Everything a controller constructor needs.
#[derive(Debug, Clone, Default)]
pub struct ControllerContext {
    /// Scene node the new controller binds to.
    pub anchor: SceneAnchor,
    /// Initial camera parameters.
    pub camera: CameraOptions,
}

/// A pluggable strategy that drives the camera of a render surface.
pub trait ViewController {
    /// Canonical (fully qualified) type identifier.
    fn class_name(&self) -> &'static str;

    /// Short display name of the controller type.
    fn type_name(&self) -> &'static str;

    /// Shared naming/frame/anchor state.
    fn base(&self) -> &ViewBase;

    /// Mutable access to the shared state.
    fn base_mut(&mut self) -> &mut ViewBase;

    /// User-visible name of this instance.
    fn name(&self) -> &str {
        &self.base().name
    }

    /// Rename this instance.
    fn set_name(&mut self, name: String) {
        self.base_mut().name = name;
    }

    /// Reference frame the controller tracks.
    fn target_frame(&self) -> &str {
        &self.base().target_frame
    }

    /// Point the controller at a new reference frame.
    fn set_target_frame(&mut self, frame: &str) {
        frame.clone_into(&mut self.base_mut().target_frame);
    }

    /// World-space camera placement implied by the current parameters.
    fn pose(&self) -> CameraPose;

    /// Rebuild parameters so the camera matches `pose` as closely as this
    /// strategy allows.
    fn look_at_pose(&mut self, pose: &CameraPose);

    /// Whether [`ViewController::pose`] reports a meaningful focal point.
    /// Free-look controllers only have a heading; their focus is a unit
    /// step ahead of the eye.
    fn has_focal_point(&self) -> bool {
        true
    }

    /// Carry over state from the view this one replaces.
    ///
    /// Default: adopt the previous controller's pose.
    fn initialize_from(&mut self, previous: &dyn ViewController) {
        self.look_at_pose(&previous.pose());
    }

    /// Deep copy of this controller, parameters included.
    fn copy(&self) -> Box<dyn ViewController>;

    /// Per-frame tick; only the current view receives it.
    fn update(&mut self, _wall_dt: f32, _sim_dt: f32) {}

    /// Editable parameters, in display order.
    fn properties(&self) -> Vec<Property>;

    /// Change one parameter by display name.
    fn set_property(
        &mut self,
        name: &str,
        value: &PropertyValue,
    ) -> Result<(), VistaError>;

    /// Opaque parameter blob for saved-view serialization.
    fn save(&self) -> Result<serde_json::Value, VistaError>;

    /// Restore parameters from a blob produced by [`ViewController::save`].
    fn load(&mut self, params: &serde_json::Value) -> Result<(), VistaError>;
}

impl std::fmt::Debug for dyn ViewController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewController")
            .field("class_name", &self.class_name())
            .field("name", &self.name())
            .field("target_frame", &self.target_frame())
            .finish()
    }
}
