//! Surface mesh and displacement parameters.

/// Surface mesh geometry
#[derive(Debug, Clone)]
pub struct SurfaceParams {
    /// Plane extent along x (world units)
    pub width: f32,

    /// Plane extent along y before the model rotation (world units)
    pub height: f32,

    /// Fraction of the extent used as the segment count per axis
    /// 100 units × 0.95 = 95 segments
    pub divisions: f32,

    /// Model rotation about x (radians, applied as-is)
    pub rotation_x_rad: f32,
}

impl Default for SurfaceParams {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
            divisions: 0.95,
            // Radians, not degrees: the reference scene uses -90 directly
            rotation_x_rad: -90.0,
        }
    }
}

impl SurfaceParams {
    /// Upper bound on segments per axis; keeps every index within `u32`
    pub const MAX_SEGMENTS: u32 = 4096;

    /// Segment counts along (x, y), in [1, MAX_SEGMENTS] per axis
    pub fn segments(&self) -> (u32, u32) {
        let count = |extent: f32| {
            let n = (extent * self.divisions).floor();
            if n.is_nan() {
                1
            } else {
                n.clamp(1.0, Self::MAX_SEGMENTS as f32) as u32
            }
        };
        (count(self.width), count(self.height))
    }
}

/// Constants of the vertex displacement stage
///
/// These feed both the CPU evaluation and the generated WGSL.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplacementParams {
    /// uv → noise sampling coordinate scale (cells across the surface)
    pub spatial_frequency: f32,

    /// Noise → color seed gain
    pub seed_scale: f32,

    /// Noise → color seed offset
    pub seed_bias: f32,

    /// Color seed → z displacement scale
    pub height_scale: f32,
}

impl Default for DisplacementParams {
    fn default() -> Self {
        Self {
            spatial_frequency: 10.0,
            seed_scale: 1.3,
            seed_bias: 0.5,
            height_scale: 0.15,
        }
    }
}
