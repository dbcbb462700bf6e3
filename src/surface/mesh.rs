//! Surface grid mesh.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::displace::{displace, height_at, DisplacedVertex};
use crate::params::{DisplacementParams, SurfaceParams};

/// Vertex data for the surface mesh (flat position + UV coordinates)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Regular grid over the plane
///
/// Topology and vertices are fixed after construction. Displaced positions
/// are never written back; they are recomputed from `uv` on demand.
pub struct SurfaceMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    segments: (u32, u32),
}

impl SurfaceMesh {
    /// Build the grid described by `params`
    pub fn new(params: &SurfaceParams) -> Self {
        let (sx, sy) = params.segments();
        let seg_w = params.width / sx as f32;
        let seg_h = params.height / sy as f32;
        let half_w = params.width / 2.0;
        let half_h = params.height / 2.0;

        // Sized in usize; segments() bounds the u32 index range
        let (cols, rows) = (sx as usize, sy as usize);
        let mut vertices = Vec::with_capacity((cols + 1) * (rows + 1));
        let mut indices = Vec::with_capacity(cols * rows * 6);

        // Rows run top to bottom, so v falls as iy grows
        for iy in 0..=sy {
            for ix in 0..=sx {
                vertices.push(Vertex {
                    position: [
                        ix as f32 * seg_w - half_w,
                        -(iy as f32 * seg_h - half_h),
                        0.0,
                    ],
                    uv: [ix as f32 / sx as f32, 1.0 - iy as f32 / sy as f32],
                });
            }
        }

        // Two counter-clockwise triangles per cell, front face toward +z
        let row = sx + 1;
        for iy in 0..sy {
            for ix in 0..sx {
                let a = ix + row * iy;
                let b = ix + row * (iy + 1);
                let c = (ix + 1) + row * (iy + 1);
                let d = (ix + 1) + row * iy;

                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self {
            vertices,
            indices,
            segments: (sx, sy),
        }
    }

    /// Segment counts along (x, y)
    pub fn segments(&self) -> (u32, u32) {
        self.segments
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Evaluate the displacement stage for every vertex at `time_s`
    pub fn displaced(&self, time_s: f32, params: &DisplacementParams) -> Vec<DisplacedVertex> {
        self.vertices
            .iter()
            .map(|v| displace(Vec2::from_array(v.uv), time_s, params))
            .collect()
    }

    /// Height of the rendered surface at a parametric coordinate
    ///
    /// Matches the GPU at vertices; between vertices the GPU interpolates
    /// linearly while this samples the field directly.
    pub fn query_height(&self, uv: Vec2, time_s: f32, params: &DisplacementParams) -> f32 {
        height_at(uv.clamp(Vec2::ZERO, Vec2::ONE), time_s, params)
    }
}
