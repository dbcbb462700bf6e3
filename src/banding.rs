//! Fragment banding stage (CPU reference of `fs_main`).
//!
//! Quantizes the interpolated color seed into a terrain palette. The chain
//! of comparisons has gaps: a seed of exactly 0.5, anything at or above 0.8,
//! and NaN fall through and are drawn with the raw seed.

use glam::{Vec3, Vec4};

/// Upper bound (exclusive) of the water band
pub const WATER_MAX: f32 = 0.3;

/// Upper bound (exclusive) of the grass band
pub const GRASS_MAX: f32 = 0.5;

/// Upper bound (exclusive) of the rock band; its lower bound is exclusive too
pub const ROCK_MAX: f32 = 0.8;

pub const WATER_COLOR: Vec3 = Vec3::new(0.0, 0.0, 0.8);
pub const GRASS_COLOR: Vec3 = Vec3::new(0.15625, 0.453125, 0.08203125);
pub const ROCK_COLOR: Vec3 = Vec3::new(0.203125, 0.0703125, 0.03515625);

/// Band a seed value falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    /// c < 0.3
    Water,
    /// 0.3 <= c < 0.5
    Grass,
    /// 0.5 < c < 0.8
    Rock,
    /// Everything else: the raw seed is drawn
    Passthrough,
}

impl Band {
    /// Classify the first seed component
    pub fn classify(c: f32) -> Self {
        if c < WATER_MAX {
            Band::Water
        } else if c >= WATER_MAX && c < GRASS_MAX {
            Band::Grass
        } else if c > GRASS_MAX && c < ROCK_MAX {
            Band::Rock
        } else {
            Band::Passthrough
        }
    }

    /// Palette color, `None` for passthrough
    pub fn color(self) -> Option<Vec3> {
        match self {
            Band::Water => Some(WATER_COLOR),
            Band::Grass => Some(GRASS_COLOR),
            Band::Rock => Some(ROCK_COLOR),
            Band::Passthrough => None,
        }
    }
}

/// Shade one fragment: opaque RGBA for an interpolated color seed
pub fn shade(color_seed: Vec3) -> Vec4 {
    let rgb = Band::classify(color_seed.x)
        .color()
        .unwrap_or(color_seed);
    rgb.extend(1.0)
}
