//! WGSL program generation for the surface pipeline.
//!
//! The template in `shaders/surface.wgsl` carries `{{NAME}}` placeholders.
//! They are filled from [`crate::noise`], [`crate::banding`] and the
//! displacement parameters, so the GPU program and the CPU reference
//! cannot drift apart.

use std::borrow::Cow;

use glam::{Vec2, Vec3};

use crate::banding::{GRASS_COLOR, GRASS_MAX, ROCK_COLOR, ROCK_MAX, WATER_COLOR, WATER_MAX};
use crate::noise::{HASH_SCALE, HASH_X, HASH_Y};
use crate::params::DisplacementParams;

const SURFACE_TEMPLATE: &str = include_str!("shaders/surface.wgsl");

/// Vertex stage entry point
pub const VERTEX_ENTRY: &str = "vs_main";

/// Fragment stage entry point
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Float literal that parses back to the same `f32`
fn wgsl_f32(v: f32) -> String {
    format!("{:?}", v)
}

fn wgsl_vec2(v: Vec2) -> String {
    format!("{}, {}", wgsl_f32(v.x), wgsl_f32(v.y))
}

fn wgsl_vec3(v: Vec3) -> String {
    format!("{}, {}, {}", wgsl_f32(v.x), wgsl_f32(v.y), wgsl_f32(v.z))
}

/// Generated vertex + fragment program
#[derive(Debug, Clone)]
pub struct SurfaceProgram {
    source: String,
}

impl SurfaceProgram {
    /// Fill the template with the given displacement constants
    pub fn new(params: &DisplacementParams) -> Self {
        let substitutions = [
            ("HASH_X", wgsl_vec2(HASH_X)),
            ("HASH_Y", wgsl_vec2(HASH_Y)),
            ("HASH_SCALE", wgsl_f32(HASH_SCALE)),
            ("SPATIAL_FREQUENCY", wgsl_f32(params.spatial_frequency)),
            ("SEED_SCALE", wgsl_f32(params.seed_scale)),
            ("SEED_BIAS", wgsl_f32(params.seed_bias)),
            ("HEIGHT_SCALE", wgsl_f32(params.height_scale)),
            ("WATER_MAX", wgsl_f32(WATER_MAX)),
            ("GRASS_MAX", wgsl_f32(GRASS_MAX)),
            ("ROCK_MAX", wgsl_f32(ROCK_MAX)),
            ("WATER_COLOR", wgsl_vec3(WATER_COLOR)),
            ("GRASS_COLOR", wgsl_vec3(GRASS_COLOR)),
            ("ROCK_COLOR", wgsl_vec3(ROCK_COLOR)),
        ];

        let source = substitutions
            .iter()
            .fold(SURFACE_TEMPLATE.to_string(), |src, (name, value)| {
                src.replace(&format!("{{{{{}}}}}", name), value)
            });

        Self { source }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Descriptor for `wgpu::Device::create_shader_module`
    pub fn descriptor(&self) -> wgpu::ShaderModuleDescriptor<'_> {
        wgpu::ShaderModuleDescriptor {
            label: Some("Surface Shader"),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(&self.source)),
        }
    }
}
