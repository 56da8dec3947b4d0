use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Strategy-neutral camera placement shared between view controllers.
///
/// Every controller can report its pose and rebuild its own parameters from
/// another controller's pose, which is how state carries over when the
/// current view is switched to a different type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at focus point in world space.
    pub focus: Vec3,
    /// Up direction vector.
    pub up: Vec3,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 10.0),
            focus: Vec3::ZERO,
            up: Vec3::Z,
        }
    }
}

impl CameraPose {
    /// Pose orbiting `focus` at `distance`, with `yaw` measured around +Z
    /// from +X and `pitch` above the XY plane (radians).
    pub fn orbiting(focus: Vec3, distance: f32, yaw: f32, pitch: f32) -> Self {
        let dir = Vec3::new(
            pitch.cos() * yaw.cos(),
            pitch.cos() * yaw.sin(),
            pitch.sin(),
        );
        Self {
            eye: focus + dir * distance,
            focus,
            up: Vec3::Z,
        }
    }

    /// Eye-to-focus distance.
    pub fn distance(&self) -> f32 {
        self.eye.distance(self.focus)
    }

    /// Yaw and pitch of the eye around the focus point, inverse of
    /// [`CameraPose::orbiting`]. Degenerate poses report `(0, 0)`.
    pub fn yaw_pitch(&self) -> (f32, f32) {
        let offset = self.eye - self.focus;
        let len = offset.length();
        if len <= f32::EPSILON {
            return (0.0, 0.0);
        }
        let dir = offset / len;
        (dir.y.atan2(dir.x), dir.z.clamp(-1.0, 1.0).asin())
    }

    /// Same eye and heading, with the focus pushed out to `distance`.
    /// A pose without a heading is returned unchanged.
    #[must_use]
    pub fn with_focus_distance(&self, distance: f32) -> Self {
        let dir = (self.focus - self.eye).normalize_or_zero();
        if dir == Vec3::ZERO {
            return *self;
        }
        Self {
            focus: self.eye + dir * distance,
            ..*self
        }
    }

    /// Same pose shifted by `offset` (eye and focus move together).
    #[must_use]
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            eye: self.eye + offset,
            focus: self.focus + offset,
            up: self.up,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbiting_places_eye_at_distance() {
        let pose = CameraPose::orbiting(Vec3::new(1.0, 2.0, 3.0), 5.0, 0.3, 0.4);
        assert!((pose.distance() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn yaw_pitch_inverts_orbiting() {
        let pose = CameraPose::orbiting(Vec3::ZERO, 8.0, 1.1, -0.5);
        let (yaw, pitch) = pose.yaw_pitch();
        assert!((yaw - 1.1).abs() < 1e-4);
        assert!((pitch + 0.5).abs() < 1e-4);
    }

    #[test]
    fn focus_distance_keeps_eye_and_heading() {
        let pose = CameraPose {
            eye: Vec3::new(0.0, 0.0, 3.0),
            focus: Vec3::new(1.0, 0.0, 3.0),
            up: Vec3::Z,
        };
        let pushed = pose.with_focus_distance(7.0);
        assert_eq!(pushed.eye, pose.eye);
        assert!((pushed.focus - Vec3::new(7.0, 0.0, 3.0)).length() < 1e-5);
        let degenerate = CameraPose {
            eye: Vec3::ONE,
            focus: Vec3::ONE,
            up: Vec3::Z,
        };
        assert_eq!(degenerate.with_focus_distance(7.0), degenerate);
    }

    #[test]
    fn degenerate_pose_has_zero_angles() {
        let pose = CameraPose {
            eye: Vec3::ONE,
            focus: Vec3::ONE,
            up: Vec3::Z,
        };
        assert_eq!(pose.yaw_pitch(), (0.0, 0.0));
    }
}
