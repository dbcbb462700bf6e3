//! Bandscape library - noise-displaced, color-banded animated surface

pub mod banding;
pub mod camera;
pub mod cli;
pub mod clock;
pub mod context;
pub mod controls;
pub mod noise;
pub mod params;
pub mod rendering;
pub mod shader;
pub mod surface;
