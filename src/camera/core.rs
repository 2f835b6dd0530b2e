use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::animation::interpolation::{lerp_f32, lerp_position, slerp_shortest};

/// Default vertical field of view in degrees.
pub const DEFAULT_FOV: f32 = 60.0;

/// Camera pose: where the camera is, where it faces, and how wide it sees.
///
/// The camera looks along its local -Z axis with +Y up, matching
/// [`Mat4::look_at_rh`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Eye position in world space.
    pub position: Vec3,
    /// Camera orientation.
    pub orientation: Quat,
    /// Vertical field of view in degrees.
    pub fov: f32,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            fov: DEFAULT_FOV,
        }
    }
}

impl Pose {
    /// Pose from explicit parts.
    #[must_use]
    pub fn new(position: Vec3, orientation: Quat, fov: f32) -> Self {
        Self {
            position,
            orientation,
            fov,
        }
    }

    /// Pose at `position` facing `target`. Falls back to identity
    /// orientation when the two points coincide.
    #[must_use]
    pub fn looking_at(position: Vec3, target: Vec3, fov: f32) -> Self {
        let orientation = look_rotation(target - position, f32::MIN, f32::MAX)
            .unwrap_or(Quat::IDENTITY);
        Self::new(position, orientation, fov)
    }

    /// Forward (view) direction.
    #[inline]
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// Up direction.
    #[inline]
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }

    /// Right direction.
    #[inline]
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.orientation * Vec3::X
    }

    /// Yaw and pitch in radians (roll is ignored).
    #[must_use]
    pub fn yaw_pitch(&self) -> (f32, f32) {
        let (yaw, pitch, _roll) = self.orientation.to_euler(EulerRot::YXZ);
        (yaw, pitch)
    }

    /// World-to-view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), self.up())
    }

    /// Combined view-projection matrix.
    #[must_use]
    pub fn view_projection(&self, projection: &Projection) -> Mat4 {
        projection.matrix(self.fov) * self.view_matrix()
    }

    /// Interpolate toward `other`: linear position and fov, shortest-arc
    /// slerp for orientation. `t` is clamped to [0, 1]; the endpoints are
    /// returned exactly.
    #[must_use]
    pub fn interpolate(&self, other: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 {
            return *self;
        }
        if t == 1.0 {
            return *other;
        }
        Self {
            position: lerp_position(self.position, other.position, t),
            orientation: slerp_shortest(self.orientation, other.orientation, t),
            fov: lerp_f32(self.fov, other.fov, t),
        }
    }

    /// Whether every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.orientation.is_finite()
            && self.fov.is_finite()
    }
}

/// Rotation that points the camera's -Z axis along `direction`, with pitch
/// clamped to `[min_pitch, max_pitch]` radians and no roll.
///
/// Returns `None` for a zero-length direction.
#[must_use]
pub fn look_rotation(
    direction: Vec3,
    min_pitch: f32,
    max_pitch: f32,
) -> Option<Quat> {
    let dir = direction.try_normalize()?;
    let yaw = (-dir.x).atan2(-dir.z);
    let pitch = dir.y.clamp(-1.0, 1.0).asin().clamp(min_pitch, max_pitch);
    Some(Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0))
}

/// Which controller currently drives the camera.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum CameraMode {
    /// Nothing drives the camera; the pose holds.
    #[default]
    Idle,
    /// Tracking an entity.
    Following,
    /// Playing a recorded fly-by path.
    FlyingBy,
}

/// Camera pose and mode as committed for the current frame.
///
/// Only the owning [`CameraController`](super::controller::CameraController)
/// mutates it; renderers and HUD logic get shared access.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraState {
    /// Committed pose.
    pub pose: Pose,
    /// Active mode.
    pub mode: CameraMode,
}

/// Perspective projection parameters not carried by the pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            aspect: 16.0 / 9.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}

impl Projection {
    /// Projection matrix for vertical field of view `fovy` in degrees.
    #[must_use]
    pub fn matrix(&self, fovy: f32) -> Mat4 {
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        Mat4::perspective_rh(fovy.to_radians(), self.aspect, self.znear, self.zfar)
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform holding the view-projection matrix and camera metadata.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
    /// Camera forward direction for lighting.
    pub forward: [f32; 3],
    /// Vertical field of view in degrees.
    pub fovy: f32,
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            aspect: 16.0 / 9.0,
            forward: [0.0, 0.0, -1.0],
            fovy: DEFAULT_FOV,
        }
    }

    /// Update uniform fields from a committed pose.
    pub fn update_view_proj(&mut self, pose: &Pose, projection: &Projection) {
        self.view_proj = pose.view_projection(projection).to_cols_array_2d();
        self.position = pose.position.to_array();
        self.aspect = projection.aspect;
        self.forward = pose.forward().to_array();
        self.fovy = pose.fov;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_pose_looks_down_negative_z() {
        let pose = Pose::default();
        assert!((pose.forward() - Vec3::NEG_Z).length() < 1e-6);
        assert!((pose.up() - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn looking_at_faces_target() {
        let pose =
            Pose::looking_at(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO, 45.0);
        let expected = (Vec3::ZERO - pose.position).normalize();
        assert!((pose.forward() - expected).length() < 1e-5);
        // No roll: right stays horizontal
        assert!(pose.right().y.abs() < 1e-5);
    }

    #[test]
    fn look_rotation_clamps_pitch() {
        let limit = 0.5;
        let q = look_rotation(Vec3::new(0.0, -10.0, -1.0), -limit, limit)
            .unwrap();
        let pitch = (q * Vec3::NEG_Z).y.asin();
        assert!((pitch + limit).abs() < 1e-5);
    }

    #[test]
    fn look_rotation_rejects_zero_direction() {
        assert!(look_rotation(Vec3::ZERO, -1.0, 1.0).is_none());
    }

    #[test]
    fn interpolate_returns_endpoints_exactly() {
        let a = Pose::new(Vec3::ZERO, Quat::from_rotation_y(0.3), 50.0);
        let b = Pose::new(Vec3::ONE, Quat::from_rotation_x(0.2), 70.0);
        assert_eq!(a.interpolate(&b, 0.0), a);
        assert_eq!(a.interpolate(&b, 1.0), b);
        let mid = a.interpolate(&b, 0.5);
        assert!((mid.position - Vec3::splat(0.5)).length() < 1e-6);
        assert!((mid.fov - 60.0).abs() < 1e-5);
    }

    #[test]
    fn view_matrix_maps_eye_to_origin() {
        let pose =
            Pose::looking_at(Vec3::new(3.0, 2.0, 1.0), Vec3::ZERO, 60.0);
        let eye_in_view = pose.view_matrix().transform_point3(pose.position);
        assert!(eye_in_view.length() < 1e-5);
    }

    #[test]
    fn uniform_tracks_pose() {
        let pose = Pose::looking_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, 45.0);
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&pose, &Projection::default());
        assert_eq!(uniform.position, [0.0, 0.0, 5.0]);
        assert_eq!(uniform.fovy, 45.0);
        assert!((Vec3::from(uniform.forward) - Vec3::NEG_Z).length() < 1e-5);
    }
}
