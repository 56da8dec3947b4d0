use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::{
    ControllerContext, Property, PropertyValue, ViewBase, ViewController,
};
use crate::camera::CameraPose;
use crate::error::VistaError;

/// Height of the eye above the focal plane. Orthographic projection makes
/// the exact value irrelevant as long as the scene sits in front of it.
const EYE_HEIGHT: f32 = 500.0;
const MIN_SCALE: f32 = 0.001;

/// Top-down parameters, relative to the anchor origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrthoParams {
    /// Center of the view on the XY plane.
    pub center: Vec2,
    /// Pixels per world unit.
    pub scale: f32,
    /// Rotation of the screen's up axis around +Z, radians.
    pub angle: f32,
}

impl Default for OrthoParams {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            scale: 10.0,
            angle: 0.0,
        }
    }
}

/// Looks straight down -Z with an orthographic projection.
#[derive(Debug, Clone)]
pub struct FixedOrientationOrthoViewController {
    base: ViewBase,
    params: OrthoParams,
}

impl FixedOrientationOrthoViewController {
    /// Canonical identifier.
    pub const CLASS_NAME: &'static str =
        "rviz::FixedOrientationOrthoViewController";
    /// Short display name.
    pub const TYPE_NAME: &'static str = "TopDownOrtho";

    /// New controller named `name`, bound to the context's anchor.
    pub fn new(context: &ControllerContext, name: &str) -> Self {
        Self {
            base: ViewBase::new(name, context),
            params: OrthoParams {
                scale: context.camera.ortho_scale.max(MIN_SCALE),
                ..OrthoParams::default()
            },
        }
    }

    /// Current parameters.
    pub fn params(&self) -> &OrthoParams {
        &self.params
    }
}

impl ViewController for FixedOrientationOrthoViewController {
    fn class_name(&self) -> &'static str {
        Self::CLASS_NAME
    }

    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }

    fn pose(&self) -> CameraPose {
        let focus = self.params.center.extend(0.0);
        let (sin, cos) = self.params.angle.sin_cos();
        self.base.to_world(&CameraPose {
            eye: focus + Vec3::Z * EYE_HEIGHT,
            focus,
            up: Vec3::new(-sin, cos, 0.0),
        })
    }

    /// Keeps the scale; centers on the previous focal point and turns the
    /// screen so the previous view direction points up.
    fn look_at_pose(&mut self, pose: &CameraPose) {
        let local = self.base.to_local(pose);
        self.params.center = local.focus.truncate();
        let heading = (local.focus - local.eye).truncate();
        if heading.length_squared() > f32::EPSILON {
            self.params.angle = (-heading.x).atan2(heading.y);
        }
    }

    fn copy(&self) -> Box<dyn ViewController> {
        Box::new(self.clone())
    }

    fn properties(&self) -> Vec<Property> {
        vec![
            Property::vector("Center", self.params.center.extend(0.0)),
            Property::float("Scale", self.params.scale),
            Property::float("Angle", self.params.angle),
        ]
    }

    fn set_property(
        &mut self,
        name: &str,
        value: &PropertyValue,
    ) -> Result<(), VistaError> {
        match name {
            "Center" => self.params.center = value.as_vector(name)?.truncate(),
            "Scale" => {
                self.params.scale = value.as_float(name)?.max(MIN_SCALE);
            }
            "Angle" => self.params.angle = value.as_float(name)?,
            _ => return Err(VistaError::UnknownProperty(name.to_owned())),
        }
        Ok(())
    }

    fn save(&self) -> Result<serde_json::Value, VistaError> {
        Ok(serde_json::to_value(&self.params)?)
    }

    fn load(&mut self, params: &serde_json::Value) -> Result<(), VistaError> {
        self.params = OrthoParams::deserialize(params)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_straight_down_at_center() {
        let ctx = ControllerContext::default();
        let mut view = FixedOrientationOrthoViewController::new(&ctx, "Top");
        view.set_property(
            "Center",
            &PropertyValue::Vector(Vec3::new(3.0, 4.0, 9.0)),
        )
        .unwrap();
        let pose = view.pose();
        assert_eq!(pose.focus, Vec3::new(3.0, 4.0, 0.0));
        assert_eq!(pose.eye.truncate(), pose.focus.truncate());
        assert!(pose.eye.z > pose.focus.z);
    }

    #[test]
    fn previous_heading_points_up() {
        let ctx = ControllerContext::default();
        let mut view = FixedOrientationOrthoViewController::new(&ctx, "Top");
        view.look_at_pose(&CameraPose {
            eye: Vec3::new(-10.0, 1.0, 5.0),
            focus: Vec3::new(2.0, 1.0, 0.0),
            up: Vec3::Z,
        });
        let pose = view.pose();
        assert_eq!(pose.focus, Vec3::new(2.0, 1.0, 0.0));
        // Heading was +X, so the screen's up axis should be +X.
        assert!(pose.up.distance(Vec3::X) < 1e-5);
        assert_eq!(view.params().scale, 10.0);
    }
}
