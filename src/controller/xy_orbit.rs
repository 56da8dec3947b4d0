use serde::Deserialize;

use super::orbit::OrbitParams;
use super::{
    ControllerContext, Property, PropertyValue, ViewBase, ViewController,
};
use crate::camera::CameraPose;
use crate::error::VistaError;

/// Orbit controller whose focal point always lies on the anchor's XY plane.
#[derive(Debug, Clone)]
pub struct XYOrbitViewController {
    base: ViewBase,
    params: OrbitParams,
}

impl XYOrbitViewController {
    /// Canonical identifier.
    pub const CLASS_NAME: &'static str = "rviz::XYOrbitViewController";
    /// Short display name.
    pub const TYPE_NAME: &'static str = "XYOrbit";

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

    /// Move the focal point to where the eye ray meets the XY plane, or
    /// straight down onto it when the ray runs parallel or away from it.
    fn pin_focus(&mut self, local: &CameraPose) {
        let dir = local.focus - local.eye;
        let hit = if dir.z.abs() > f32::EPSILON {
            let t = -local.eye.z / dir.z;
            (t > 0.0).then(|| local.eye + dir * t)
        } else {
            None
        };
        let mut focus = hit.unwrap_or(local.focus);
        focus.z = 0.0;
        self.params.set_from_pose(&CameraPose {
            eye: local.eye,
            focus,
            up: local.up,
        });
    }
}

impl ViewController for XYOrbitViewController {
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
        self.pin_focus(&local);
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
        self.params.set_property(name, value)?;
        self.params.focus.z = 0.0;
        Ok(())
    }

    fn save(&self) -> Result<serde_json::Value, VistaError> {
        Ok(serde_json::to_value(&self.params)?)
    }

    fn load(&mut self, params: &serde_json::Value) -> Result<(), VistaError> {
        self.params = OrbitParams::deserialize(params)?;
        self.params.focus.z = 0.0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn focus_lands_on_xy_plane() {
        let ctx = ControllerContext::default();
        let mut view = XYOrbitViewController::new(&ctx, "XYOrbit");
        view.look_at_pose(&CameraPose {
            eye: Vec3::new(0.0, -10.0, 10.0),
            focus: Vec3::new(0.0, 0.0, 5.0),
            up: Vec3::Z,
        });
        let focus = view.pose().focus;
        assert!(focus.z.abs() < 1e-5);
        // Ray from (0,-10,10) through (0,0,5) meets z = 0 at y = 10.
        assert!((focus.y - 10.0).abs() < 1e-3);
    }

    #[test]
    fn focal_point_edits_stay_on_plane() {
        let ctx = ControllerContext::default();
        let mut view = XYOrbitViewController::new(&ctx, "XYOrbit");
        view.set_property(
            "Focal Point",
            &PropertyValue::Vector(Vec3::new(1.0, 2.0, 3.0)),
        )
        .unwrap();
        assert_eq!(view.params().focus, Vec3::new(1.0, 2.0, 0.0));
    }
}
