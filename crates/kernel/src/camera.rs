use glam::{Mat4, Quat, Vec3};
use neonrun_common::Transform;
use serde::{Deserialize, Serialize};

/// Follow-camera tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Desired camera position relative to the target.
    pub offset: Vec3,
    /// Fraction of the remaining distance covered per tick, in `(0, 1]`.
    pub smoothing: f32,
    pub initial_position: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 3.0, 8.0),
            smoothing: 0.1,
            initial_position: Vec3::new(0.0, 5.0, 10.0),
        }
    }
}

/// Camera pose for one frame: eye position and the point it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTransform {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraTransform {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at, Vec3::Y)
    }

    /// Rotation taking the camera's -Z axis onto the look direction.
    pub fn rotation(&self) -> Quat {
        let dir = (self.look_at - self.position).normalize_or_zero();
        if dir == Vec3::ZERO {
            Quat::IDENTITY
        } else {
            Quat::from_rotation_arc(Vec3::NEG_Z, dir)
        }
    }

    pub fn to_transform(&self) -> Transform {
        Transform {
            position: self.position,
            rotation: self.rotation(),
            scale: Vec3::ONE,
        }
    }
}

/// First-order low-pass follow camera.
///
/// Each update moves the camera `smoothing` of the way toward
/// `target + offset`. The factor is per call, so convergence speed depends
/// on the tick rate.
#[derive(Debug, Clone)]
pub struct CameraFollow {
    position: Vec3,
    look_at: Vec3,
    offset: Vec3,
    smoothing: f32,
}

impl CameraFollow {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            position: config.initial_position,
            look_at: Vec3::ZERO,
            offset: config.offset,
            smoothing: config.smoothing,
        }
    }

    pub fn update(&mut self, target: Vec3) -> CameraTransform {
        self.position = self.position.lerp(target + self.offset, self.smoothing);
        self.look_at = target;
        self.transform()
    }

    pub fn transform(&self) -> CameraTransform {
        CameraTransform {
            position: self.position,
            look_at: self.look_at,
        }
    }

    /// Jump straight to the rest pose for `target`, skipping smoothing.
    pub fn snap_to(&mut self, target: Vec3) {
        self.position = target + self.offset;
        self.look_at = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_update_moves_a_tenth_of_the_way() {
        let mut cam = CameraFollow::new(&CameraConfig::default());
        let t = cam.update(Vec3::new(0.0, 1.0, 0.0));
        // start (0,5,10), goal (0,4,8)
        assert!(t.position.abs_diff_eq(Vec3::new(0.0, 4.9, 9.8), 1e-5));
        assert_eq!(t.look_at, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn converges_geometrically() {
        let mut cam = CameraFollow::new(&CameraConfig::default());
        let target = Vec3::new(30.0, 1.0, -40.0);
        let goal = target + Vec3::new(0.0, 3.0, 8.0);
        let mut prev = cam.transform().position.distance(goal);
        for _ in 0..200 {
            let d = cam.update(target).position.distance(goal);
            assert!(d <= prev * 0.9 + 1e-4);
            prev = d;
        }
        assert!(prev < 1e-3);
    }

    #[test]
    fn smoothing_one_snaps() {
        let mut cam = CameraFollow::new(&CameraConfig {
            smoothing: 1.0,
            ..CameraConfig::default()
        });
        let t = cam.update(Vec3::new(5.0, 1.0, 5.0));
        assert!(t.position.abs_diff_eq(Vec3::new(5.0, 4.0, 13.0), 1e-6));
    }

    #[test]
    fn rotation_looks_at_target() {
        let t = CameraTransform {
            position: Vec3::new(0.0, 0.0, 10.0),
            look_at: Vec3::ZERO,
        };
        let forward = t.rotation() * Vec3::NEG_Z;
        assert!(forward.abs_diff_eq(Vec3::NEG_Z, 1e-5));

        let degenerate = CameraTransform {
            position: Vec3::ONE,
            look_at: Vec3::ONE,
        };
        assert_eq!(degenerate.rotation(), Quat::IDENTITY);
    }

    #[test]
    fn snap_skips_smoothing() {
        let mut cam = CameraFollow::new(&CameraConfig::default());
        cam.snap_to(Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(cam.transform().position, Vec3::new(1.0, 4.0, 9.0));
    }
}
