//! Window, projection and scene configuration.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (logical pixels)
    pub window_width: u32,

    /// Window height (logical pixels)
    pub window_height: u32,

    /// Upper bound on device pixels per logical pixel for the render target
    pub max_pixel_ratio: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            max_pixel_ratio: 2.0,
        }
    }
}

/// Point light in the scene description
///
/// The surface program is unlit; the light is carried for completeness of
/// the scene and reported at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// Linear RGB
    pub color: [f32; 3],

    pub intensity: f32,

    /// World-space position
    pub position: [f32; 3],
}

/// Scene-level settings outside the surface program
#[derive(Debug, Clone)]
pub struct SceneParams {
    /// Clear color (RGB)
    pub background: [f64; 3],

    pub light: PointLight,

    /// Value of the `base_color` uniform (RGB)
    pub base_color: [f32; 3],
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            background: [0.2, 0.2, 0.2],
            light: PointLight {
                color: [1.0, 1.0, 1.0],
                intensity: 0.1,
                position: [2.0, 3.0, 4.0],
            },
            base_color: [1.0, 0.0, 0.0],
        }
    }
}
