//! Parameter definitions with units and documented semantics.
//!
//! Defaults reproduce the reference scene: a 100×100 plane split into
//! 95×95 cells, a 75° camera five units above it, and a grey backdrop.

mod camera;
mod render;
mod surface;

pub use camera::{CameraParams, OrbitParams, PanelParams};
pub use render::{PointLight, RenderConfig, SceneParams};
pub use surface::{DisplacementParams, SurfaceParams};
