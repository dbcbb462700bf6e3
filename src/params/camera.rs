//! Camera, orbit and debug panel parameters.

use std::f32::consts::TAU;

/// Perspective camera defaults
#[derive(Debug, Clone)]
pub struct CameraParams {
    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (world units)
    pub near_plane: f32,

    /// Far clipping plane (world units)
    pub far_plane: f32,

    /// Initial eye position
    pub position: [f32; 3],
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near_plane: 0.1,
            far_plane: 100.0,
            position: [0.0, 5.0, 1.0],
        }
    }
}

/// Orbit interaction tuning
#[derive(Debug, Clone)]
pub struct OrbitParams {
    /// Point the camera orbits and looks at
    pub target: [f32; 3],

    /// Rotation speed multiplier (1.0 = full turn per viewport height dragged)
    pub rotate_speed: f32,

    /// Dolly factor per wheel notch (< 1 moves closer)
    pub zoom_scale: f32,

    /// Distance clamp (world units)
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitParams {
    fn default() -> Self {
        Self {
            target: [0.0, 0.0, 0.0],
            rotate_speed: 1.0,
            zoom_scale: 0.95,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
        }
    }
}

/// Ranges exposed by the debug control panel
#[derive(Debug, Clone)]
pub struct PanelParams {
    /// Translate x / y range and step
    pub translate_xy: (f32, f32, f32),

    /// Translate z range and step
    pub translate_z: (f32, f32, f32),

    /// Rotation range and step (radians)
    pub rotate: (f32, f32, f32),

    /// Step multiplier while Shift is held
    pub coarse_multiplier: f32,
}

impl Default for PanelParams {
    fn default() -> Self {
        Self {
            translate_xy: (-25.0, 25.0, 0.01),
            translate_z: (0.0, 1000.0, 0.0001),
            rotate: (0.0, TAU, 0.001),
            coarse_multiplier: 100.0,
        }
    }
}
