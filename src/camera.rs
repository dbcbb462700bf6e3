//! Perspective camera and orbit interaction.

use std::f32::consts::{PI, TAU};

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

use crate::params::{CameraParams, OrbitParams};

/// Keeps the orbit away from the poles, where look-at with +y up degenerates
const POLAR_EPSILON: f32 = 1e-6;

/// Perspective camera with an explicit transform
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Vertical field of view (degrees)
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,

    /// Eye position (world space)
    pub position: Vec3,

    /// Euler angles, XYZ order (radians)
    pub rotation: Vec3,
}

impl Camera {
    /// Create camera from parameters; rotation starts at zero (looking down -z)
    pub fn new(params: &CameraParams, aspect: f32) -> Self {
        Self {
            fov_degrees: params.fov_degrees,
            aspect,
            near: params.near_plane,
            far: params.far_plane,
            position: Vec3::from_array(params.position),
            rotation: Vec3::ZERO,
        }
    }

    /// Update aspect ratio (projection is derived from it on every query)
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Camera-to-world transform
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation(), self.position)
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.world_matrix().inverse()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Viewing direction (world space)
    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    /// Rotate so the camera faces `target` with +y up
    pub fn look_at(&mut self, target: Vec3) {
        if (target - self.position).length_squared() <= f32::EPSILON {
            return;
        }

        let view = Mat4::look_at_rh(self.position, target, Vec3::Y);
        let orientation = Quat::from_mat4(&view.inverse()).normalize();
        let (x, y, z) = orientation.to_euler(EulerRot::XYZ);
        self.rotation = Vec3::new(x, y, z);
    }
}

/// Orbit controls: drag to rotate around the target, wheel to dolly
///
/// Input handlers only accumulate deltas; [`OrbitControls::update`] applies
/// them to the camera once per frame and re-aims it at the target.
pub struct OrbitControls {
    params: OrbitParams,
    target: Vec3,
    azimuth_delta: f32,
    polar_delta: f32,
    scale: f32,
    dragging: bool,
    last_cursor: Option<Vec2>,
}

impl OrbitControls {
    pub fn new(params: OrbitParams) -> Self {
        Self {
            target: Vec3::from_array(params.target),
            params,
            azimuth_delta: 0.0,
            polar_delta: 0.0,
            scale: 1.0,
            dragging: false,
            last_cursor: None,
        }
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Rotate button pressed or released
    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    /// Cursor position in pixels; rotates while dragging
    ///
    /// A drag across the full viewport height is one full turn at speed 1.
    pub fn cursor_moved(&mut self, position: Vec2, viewport_height: f32) {
        if let Some(last) = self.last_cursor {
            if self.dragging && viewport_height > 0.0 {
                let delta = position - last;
                let turn = TAU * self.params.rotate_speed / viewport_height;
                self.azimuth_delta -= delta.x * turn;
                self.polar_delta -= delta.y * turn;
            }
        }
        self.last_cursor = Some(position);
    }

    /// Wheel input in notches; positive moves toward the target
    pub fn zoom(&mut self, notches: f32) {
        self.scale *= self.params.zoom_scale.powf(notches);
    }

    /// Apply pending input and aim the camera at the target
    pub fn update(&mut self, camera: &mut Camera) {
        let offset = camera.position - self.target;
        let radius = offset.length();

        if radius > f32::EPSILON {
            let azimuth = offset.x.atan2(offset.z) + self.azimuth_delta;
            let polar = ((offset.y / radius).clamp(-1.0, 1.0).acos() + self.polar_delta)
                .clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
            let radius = (radius * self.scale)
                .clamp(self.params.min_distance, self.params.max_distance);

            let sin_polar = polar.sin();
            camera.position = self.target
                + Vec3::new(
                    radius * sin_polar * azimuth.sin(),
                    radius * polar.cos(),
                    radius * sin_polar * azimuth.cos(),
                );
        }

        camera.look_at(self.target);

        self.azimuth_delta = 0.0;
        self.polar_delta = 0.0;
        self.scale = 1.0;
    }
}
