//! Vertex displacement stage (CPU reference of `vs_main`).

use glam::{Vec2, Vec3};

use crate::noise::gradient_noise;
use crate::params::DisplacementParams;

/// Output of the displacement stage for one vertex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplacedVertex {
    /// Model-space position: uv remapped to [-1, 1]², z from the seed
    pub position: Vec3,

    /// Color seed handed to the fragment stage (all components equal)
    pub color_seed: Vec3,
}

/// Noise sampling coordinate for `uv` at time `time_s`
///
/// The x shift by time is what scrolls the field.
#[inline]
pub fn sample_coord(uv: Vec2, time_s: f32, params: &DisplacementParams) -> Vec2 {
    let mut st = uv * params.spatial_frequency;
    st.x += time_s;
    st
}

/// Color seed for `uv` at time `time_s`
pub fn color_seed(uv: Vec2, time_s: f32, params: &DisplacementParams) -> Vec3 {
    let n = gradient_noise(sample_coord(uv, time_s, params));
    Vec3::splat(n * params.seed_scale + params.seed_bias)
}

/// Displace one vertex
pub fn displace(uv: Vec2, time_s: f32, params: &DisplacementParams) -> DisplacedVertex {
    let color_seed = color_seed(uv, time_s, params);
    let xy = uv * 2.0 - 1.0;

    DisplacedVertex {
        position: Vec3::new(xy.x, xy.y, color_seed.z * params.height_scale),
        color_seed,
    }
}

/// Z displacement only
pub fn height_at(uv: Vec2, time_s: f32, params: &DisplacementParams) -> f32 {
    color_seed(uv, time_s, params).z * params.height_scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_at_time_zero() {
        let params = DisplacementParams::default();
        let out = displace(Vec2::ZERO, 0.0, &params);

        assert_eq!(sample_coord(Vec2::ZERO, 0.0, &params), Vec2::ZERO);
        assert_eq!(out.color_seed, Vec3::splat(0.5));
        assert_eq!(out.position.x, -1.0);
        assert_eq!(out.position.y, -1.0);
        assert!((out.position.z - 0.075).abs() < 1e-7);
    }

    #[test]
    fn test_time_scrolls_along_x() {
        let params = DisplacementParams::default();
        // Shifting time by dt equals shifting u by dt / frequency
        let uv = Vec2::new(0.25, 0.5);
        let dt = 2.0;
        let shifted = Vec2::new(uv.x + dt / params.spatial_frequency, uv.y);
        let a = sample_coord(uv, dt, &params);
        let b = sample_coord(shifted, 0.0, &params);
        assert!((a - b).length() < 1e-5);
    }

    #[test]
    fn test_displacement_range() {
        let params = DisplacementParams::default();
        let lo = params.height_scale * (params.seed_bias - params.seed_scale);
        let hi = params.height_scale * (params.seed_bias + params.seed_scale);

        for t in [0.0f32, 0.5, 3.25, 17.0] {
            for j in 0..=40 {
                for i in 0..=40 {
                    let uv = Vec2::new(i as f32 / 40.0, j as f32 / 40.0);
                    let z = height_at(uv, t, &params);
                    assert!(z >= lo - 1e-6 && z <= hi + 1e-6, "z={} at {:?}", z, uv);
                }
            }
        }
    }

    #[test]
    fn test_seed_components_equal() {
        let params = DisplacementParams::default();
        let seed = color_seed(Vec2::new(0.33, 0.71), 1.5, &params);
        assert_eq!(seed.x, seed.y);
        assert_eq!(seed.y, seed.z);
    }

    #[test]
    fn test_xy_spans_unit_square() {
        let params = DisplacementParams::default();
        let corner = displace(Vec2::ONE, 4.0, &params);
        assert_eq!(corner.position.x, 1.0);
        assert_eq!(corner.position.y, 1.0);
    }
}
