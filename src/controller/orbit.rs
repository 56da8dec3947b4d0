use std::f32::consts::FRAC_PI_2;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::{
    ControllerContext, Property, PropertyValue, ViewBase, ViewController,
};
use crate::camera::CameraPose;
use crate::error::VistaError;

/// Keeps the eye off the poles so the Z-up basis stays well defined.
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.001;
const MIN_DISTANCE: f32 = 0.01;

/// Orbit parameters, relative to the anchor origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitParams {
    /// Point the camera orbits around.
    pub focus: Vec3,
    /// Eye-to-focus distance.
    pub distance: f32,
    /// Rotation around +Z, radians.
    pub yaw: f32,
    /// Elevation above the XY plane, radians.
    pub pitch: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Turntable rotation applied every tick, radians per second.
    pub turntable_speed: f32,
}

impl Default for OrbitParams {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            distance: 10.0,
            yaw: std::f32::consts::FRAC_PI_4,
            pitch: std::f32::consts::FRAC_PI_4,
            fovy: 45.0,
            turntable_speed: 0.0,
        }
    }
}

impl OrbitParams {
    /// Defaults with the context's camera options applied.
    pub fn from_context(context: &ControllerContext) -> Self {
        Self {
            distance: context.camera.distance.max(MIN_DISTANCE),
            fovy: context.camera.fovy,
            ..Self::default()
        }
    }

    /// Anchor-relative pose.
    pub fn local_pose(&self) -> CameraPose {
        CameraPose::orbiting(self.focus, self.distance, self.yaw, self.pitch)
    }

    /// Adopt an anchor-relative pose.
    pub fn set_from_pose(&mut self, local: &CameraPose) {
        let (yaw, pitch) = local.yaw_pitch();
        self.focus = local.focus;
        self.distance = local.distance().max(MIN_DISTANCE);
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Advance the turntable.
    pub fn tick(&mut self, wall_dt: f32) {
        if self.turntable_speed != 0.0 {
            self.yaw = (self.yaw + self.turntable_speed * wall_dt)
                .rem_euclid(std::f32::consts::TAU);
        }
    }

    /// Editable parameters.
    pub fn properties(&self) -> Vec<Property> {
        vec![
            Property::vector("Focal Point", self.focus),
            Property::float("Distance", self.distance),
            Property::float("Yaw", self.yaw),
            Property::float("Pitch", self.pitch),
            Property::float("Field of View", self.fovy),
            Property::float("Turntable Speed", self.turntable_speed),
        ]
    }

    /// Set one parameter by display name, clamping to valid ranges.
    pub fn set_property(
        &mut self,
        name: &str,
        value: &PropertyValue,
    ) -> Result<(), VistaError> {
        match name {
            "Focal Point" => self.focus = value.as_vector(name)?,
            "Distance" => {
                self.distance = value.as_float(name)?.max(MIN_DISTANCE);
            }
            "Yaw" => self.yaw = value.as_float(name)?,
            "Pitch" => {
                self.pitch =
                    value.as_float(name)?.clamp(-PITCH_LIMIT, PITCH_LIMIT);
            }
            "Field of View" => {
                self.fovy = value.as_float(name)?.clamp(1.0, 179.0);
            }
            "Turntable Speed" => self.turntable_speed = value.as_float(name)?,
            _ => return Err(VistaError::UnknownProperty(name.to_owned())),
        }
        Ok(())
    }
}

/// Orbits a focal point at a fixed distance, free to pan in 3D.
#[derive(Debug, Clone)]
pub struct OrbitViewController {
    base: ViewBase,
    params: OrbitParams,
}

impl OrbitViewController {
    /// Canonical identifier.
    pub const CLASS_NAME: &'static str = "rviz::OrbitViewController";
    /// Short display name.
    pub const TYPE_NAME: &'static str = "Orbit";

    /// New controller named `name`, bound to the context's anchor.
    pub fn new(context: &ControllerContext, name: &str) -> Self {
        Self {
            base: ViewBase::new(name, context),
            params: OrbitParams::from_context(context),
        }
    }

    /// Current parameters.
    pub fn params(&self) -> &OrbitParams {
        &self.params
    }
}

impl ViewController for OrbitViewController {
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
        self.base.to_world(&self.params.local_pose())
    }

    fn look_at_pose(&mut self, pose: &CameraPose) {
        let local = self.base.to_local(pose);
        self.params.set_from_pose(&local);
    }

    /// Keeps the own orbit distance when the previous view has no focal
    /// point to orbit.
    fn initialize_from(&mut self, previous: &dyn ViewController) {
        let pose = previous.pose();
        if previous.has_focal_point() {
            self.look_at_pose(&pose);
        } else {
            self.look_at_pose(&pose.with_focus_distance(self.params.distance));
        }
    }

    fn copy(&self) -> Box<dyn ViewController> {
        Box::new(self.clone())
    }

    fn update(&mut self, wall_dt: f32, _sim_dt: f32) {
        self.params.tick(wall_dt);
    }

    fn properties(&self) -> Vec<Property> {
        self.params.properties()
    }

    fn set_property(
        &mut self,
        name: &str,
        value: &PropertyValue,
    ) -> Result<(), VistaError> {
        self.params.set_property(name, value)
    }

    fn save(&self) -> Result<serde_json::Value, VistaError> {
        Ok(serde_json::to_value(&self.params)?)
    }

    fn load(&mut self, params: &serde_json::Value) -> Result<(), VistaError> {
        self.params = OrbitParams::deserialize(params)?;
        Ok(())
    }
}
