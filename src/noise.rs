//! Hash-based 2D gradient noise.
//!
//! The CPU functions here and the WGSL emitted by [`crate::shader`] share
//! every constant, so a sample taken on either side agrees to within f32
//! rounding of the platform's `sin`.

#![allow(clippy::excessive_precision)]

use glam::Vec2;

/// Dot-product constants for the x component of a corner gradient
pub const HASH_X: Vec2 = Vec2::new(127.1, 311.7);

/// Dot-product constants for the y component of a corner gradient
pub const HASH_Y: Vec2 = Vec2::new(269.5, 183.3);

/// Multiplier applied to `sin` before taking the fractional part
pub const HASH_SCALE: f32 = 43758.5453123;

/// GLSL-style fractional part (`x - floor(x)`, always in [0, 1))
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

#[inline]
fn fract2(v: Vec2) -> Vec2 {
    v - v.floor()
}

/// Pseudo-random gradient for a lattice point, each component in [-1, 1]
pub fn hash_gradient(p: Vec2) -> Vec2 {
    let s = Vec2::new(p.dot(HASH_X), p.dot(HASH_Y));
    let s = Vec2::new(s.x.sin(), s.y.sin());
    -1.0 + 2.0 * fract2(s * HASH_SCALE)
}

#[inline]
fn mix(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Sample gradient noise at `st`
///
/// Returns a value in roughly [-1, 1]; exactly 0 on integer lattice points.
pub fn gradient_noise(st: Vec2) -> f32 {
    let i = st.floor();
    let f = fract2(st);

    // Smoothstep weights
    let u = f * f * (3.0 - 2.0 * f);

    let corner = |offset: Vec2| hash_gradient(i + offset).dot(f - offset);

    let c00 = corner(Vec2::new(0.0, 0.0));
    let c10 = corner(Vec2::new(1.0, 0.0));
    let c01 = corner(Vec2::new(0.0, 1.0));
    let c11 = corner(Vec2::new(1.0, 1.0));

    mix(mix(c00, c10, u.x), mix(c01, c11, u.x), u.y)
}
