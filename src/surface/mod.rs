//! Tessellated surface and its noise-driven vertex displacement.

mod displace;
mod mesh;

pub use displace::{color_seed, displace, height_at, sample_coord, DisplacedVertex};
pub use mesh::{SurfaceMesh, Vertex};
