use std::f32::consts::FRAC_PI_2;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::{
    ControllerContext, Property, PropertyValue, ViewBase, ViewController,
};
use crate::camera::CameraPose;
use crate::error::VistaError;

const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.001;

/// First-person parameters, relative to the anchor origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FpsParams {
    /// Eye position.
    pub position: Vec3,
    /// Heading around +Z, radians.
    pub yaw: f32,
    /// Look elevation, radians.
    pub pitch: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
}

impl Default for FpsParams {
    fn default() -> Self {
        Self {
            position: Vec3::new(5.0, 5.0, 10.0),
            yaw: -3.0 * std::f32::consts::FRAC_PI_4,
            pitch: -std::f32::consts::FRAC_PI_4,
            fovy: 45.0,
        }
    }
}

impl FpsParams {
    fn forward(&self) -> Vec3 {
        Vec3::new(
            self.pitch.cos() * self.yaw.cos(),
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
        )
    }
}

/// Free-look camera: position plus heading, no focal point of its own.
#[derive(Debug, Clone)]
pub struct FpsViewController {
    base: ViewBase,
    params: FpsParams,
}

impl FpsViewController {
    /// Canonical identifier.
    pub const CLASS_NAME: &'static str = "rviz::FPSViewController";
    /// Short display name.
    pub const TYPE_NAME: &'static str = "FPS";

    /// New controller named `name`, bound to the context's anchor.
    pub fn new(context: &ControllerContext, name: &str) -> Self {
        Self {
            base: ViewBase::new(name, context),
            params: FpsParams {
                fovy: context.camera.fovy,
                ..FpsParams::default()
            },
        }
    }

    /// Current parameters.
    pub fn params(&self) -> &FpsParams {
        &self.params
    }
}

impl ViewController for FpsViewController {
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

    fn has_focal_point(&self) -> bool {
        false
    }

    fn pose(&self) -> CameraPose {
        let p = &self.params;
        self.base.to_world(&CameraPose {
            eye: p.position,
            focus: p.position + p.forward(),
            up: Vec3::Z,
        })
    }

    fn look_at_pose(&mut self, pose: &CameraPose) {
        let local = self.base.to_local(pose);
        self.params.position = local.eye;
        let forward = (local.focus - local.eye).normalize_or_zero();
        if forward != Vec3::ZERO {
            self.params.yaw = forward.y.atan2(forward.x);
            self.params.pitch =
                forward.z.asin().clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }
    }

    fn copy(&self) -> Box<dyn ViewController> {
        Box::new(self.clone())
    }

    fn properties(&self) -> Vec<Property> {
        vec![
            Property::vector("Position", self.params.position),
            Property::float("Yaw", self.params.yaw),
            Property::float("Pitch", self.params.pitch),
            Property::float("Field of View", self.params.fovy),
        ]
    }

    fn set_property(
        &mut self,
        name: &str,
        value: &PropertyValue,
    ) -> Result<(), VistaError> {
        match name {
            "Position" => self.params.position = value.as_vector(name)?,
            "Yaw" => self.params.yaw = value.as_float(name)?,
            "Pitch" => {
                self.params.pitch =
                    value.as_float(name)?.clamp(-PITCH_LIMIT, PITCH_LIMIT);
            }
            "Field of View" => {
                self.params.fovy = value.as_float(name)?.clamp(1.0, 179.0);
            }
            _ => return Err(VistaError::UnknownProperty(name.to_owned())),
        }
        Ok(())
    }

    fn save(&self) -> Result<serde_json::Value, VistaError> {
        Ok(serde_json::to_value(&self.params)?)
    }

    fn load(&mut self, params: &serde_json::Value) -> Result<(), VistaError> {
        self.params = FpsParams::deserialize(params)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::orbit::OrbitViewController;

    #[test]
    fn takes_eye_and_heading_from_orbit() {
        let ctx = ControllerContext::default();
        let orbit = OrbitViewController::new(&ctx, "Orbit");
        let mut fps = FpsViewController::new(&ctx, "FPS");
        fps.initialize_from(&orbit);

        let from = orbit.pose();
        let to = fps.pose();
        assert!(from.eye.distance(to.eye) < 1e-4);
        let expected = (from.focus - from.eye).normalize();
        let actual = (to.focus - to.eye).normalize();
        assert!(expected.dot(actual) > 0.9999);
    }

    #[test]
    fn copy_is_independent() {
        let ctx = ControllerContext::default();
        let mut fps = FpsViewController::new(&ctx, "FPS");
        let copy = fps.copy();
        fps.set_property("Position", &PropertyValue::Vector(Vec3::ONE))
            .unwrap();
        assert_ne!(copy.pose().eye, fps.pose().eye);
        assert_eq!(copy.class_name(), FpsViewController::CLASS_NAME);
    }
}
