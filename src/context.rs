//! Per-session render context: uniform set, camera and viewport.
//!
//! Owned by [`crate::clock::FrameLoop`]. Event handlers mutate it between
//! ticks; during a tick the renderer only reads it.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

use crate::camera::Camera;
use crate::params::{SceneParams, SurfaceParams};

/// Uniform values shared with the surface program
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceUniforms {
    /// Animation time (seconds since the loop started)
    pub time: f32,

    /// Cursor position (logical pixels, origin top-left)
    pub mouse_position: Vec2,

    /// Viewport size (logical pixels)
    pub viewport_resolution: Vec2,

    pub base_color: Vec3,
}

/// GPU layout of the uniform block (matches `SurfaceUniforms` in the WGSL)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct GpuUniforms {
    pub model: [[f32; 4]; 4],
    pub view_proj: [[f32; 4]; 4],
    pub resolution: [f32; 2],
    pub mouse: [f32; 2],
    pub base_color: [f32; 3],
    pub time: f32,
}

/// Window size bookkeeping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Logical size (physical / scale factor)
    pub logical_size: Vec2,

    /// Device pixels per logical pixel reported by the window
    pub scale_factor: f64,

    /// Device pixels per logical pixel used for the render target (capped)
    pub pixel_ratio: f64,

    /// Render target size in pixels, never zero
    pub target_size: (u32, u32),
}

impl Viewport {
    pub fn new(physical_width: u32, physical_height: u32, scale_factor: f64, max_pixel_ratio: f64) -> Self {
        let scale_factor = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        let logical_w = physical_width as f64 / scale_factor;
        let logical_h = physical_height as f64 / scale_factor;
        let pixel_ratio = scale_factor.min(max_pixel_ratio);

        let target = |logical: f64| ((logical * pixel_ratio).round() as u32).max(1);

        Self {
            logical_size: Vec2::new(logical_w as f32, logical_h as f32),
            scale_factor,
            pixel_ratio,
            target_size: (target(logical_w), target(logical_h)),
        }
    }

    /// Width over height, 1.0 for a collapsed viewport
    pub fn aspect(&self) -> f32 {
        if self.logical_size.x > 0.0 && self.logical_size.y > 0.0 {
            self.logical_size.x / self.logical_size.y
        } else {
            1.0
        }
    }
}

/// Everything a render call reads
pub struct RenderContext {
    pub uniforms: SurfaceUniforms,
    pub camera: Camera,
    pub viewport: Viewport,
    model: Mat4,
    max_pixel_ratio: f64,
    minimized: bool,
}

impl RenderContext {
    pub fn new(
        viewport: Viewport,
        mut camera: Camera,
        scene: &SceneParams,
        surface: &SurfaceParams,
        max_pixel_ratio: f64,
    ) -> Self {
        camera.set_aspect(viewport.aspect());

        let uniforms = SurfaceUniforms {
            time: 0.0,
            mouse_position: viewport.logical_size / 2.0,
            viewport_resolution: viewport.logical_size,
            base_color: Vec3::from_array(scene.base_color),
        };

        Self {
            uniforms,
            camera,
            viewport,
            model: Mat4::from_rotation_x(surface.rotation_x_rad),
            max_pixel_ratio,
            minimized: false,
        }
    }

    /// Handle a window resize (physical pixels)
    ///
    /// A zero-sized window (minimized) marks the context as not presentable
    /// and returns false; the last real viewport is kept.
    pub fn resize(&mut self, physical_width: u32, physical_height: u32, scale_factor: f64) -> bool {
        if physical_width == 0 || physical_height == 0 {
            self.minimized = true;
            return false;
        }

        self.minimized = false;

        self.viewport = Viewport::new(
            physical_width,
            physical_height,
            scale_factor,
            self.max_pixel_ratio,
        );
        self.camera.set_aspect(self.viewport.aspect());
        self.uniforms.viewport_resolution = self.viewport.logical_size;
        true
    }

    /// False while the window has no drawable area
    pub fn is_presentable(&self) -> bool {
        !self.minimized
    }

    /// Record cursor position given in physical pixels
    pub fn set_mouse(&mut self, physical: Vec2) {
        self.uniforms.mouse_position = physical / self.viewport.scale_factor as f32;
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.model
    }

    /// Pack the current state for upload
    pub fn gpu_uniforms(&self) -> GpuUniforms {
        GpuUniforms {
            model: self.model.to_cols_array_2d(),
            view_proj: self.camera.view_proj().to_cols_array_2d(),
            resolution: self.uniforms.viewport_resolution.to_array(),
            mouse: self.uniforms.mouse_position.to_array(),
            base_color: self.uniforms.base_color.to_array(),
            time: self.uniforms.time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{CameraParams, RenderConfig};

    fn context(scale_factor: f64) -> RenderContext {
        let render = RenderConfig::default();
        let viewport = Viewport::new(
            (1280.0 * scale_factor) as u32,
            (720.0 * scale_factor) as u32,
            scale_factor,
            render.max_pixel_ratio,
        );
        let camera = Camera::new(&CameraParams::default(), 1.0);
        RenderContext::new(
            viewport,
            camera,
            &SceneParams::default(),
            &SurfaceParams::default(),
            render.max_pixel_ratio,
        )
    }

    #[test]
    fn test_gpu_uniform_layout() {
        // Must match the WGSL struct: two mat4, two vec2, vec3 + f32
        assert_eq!(std::mem::size_of::<GpuUniforms>(), 160);
        assert_eq!(std::mem::offset_of!(GpuUniforms, resolution), 128);
        assert_eq!(std::mem::offset_of!(GpuUniforms, base_color), 144);
        assert_eq!(std::mem::offset_of!(GpuUniforms, time), 156);
    }

    #[test]
    fn test_initial_uniforms() {
        let ctx = context(1.0);
        assert_eq!(ctx.uniforms.time, 0.0);
        assert_eq!(ctx.uniforms.mouse_position, Vec2::new(640.0, 360.0));
        assert_eq!(ctx.uniforms.viewport_resolution, Vec2::new(1280.0, 720.0));
        assert_eq!(ctx.uniforms.base_color, Vec3::new(1.0, 0.0, 0.0));
        assert!((ctx.camera.aspect - 1280.0 / 720.0).abs() < 1e-6);
    }

    #[test]
    fn test_pixel_ratio_capped() {
        let viewport = Viewport::new(3000, 1500, 3.0, 2.0);
        assert_eq!(viewport.logical_size, Vec2::new(1000.0, 500.0));
        assert_eq!(viewport.pixel_ratio, 2.0);
        assert_eq!(viewport.target_size, (2000, 1000));

        let retina = Viewport::new(2560, 1440, 2.0, 2.0);
        assert_eq!(retina.target_size, (2560, 1440));

        let low = Viewport::new(1280, 720, 1.0, 2.0);
        assert_eq!(low.pixel_ratio, 1.0);
        assert_eq!(low.target_size, (1280, 720));
    }

    #[test]
    fn test_resize_updates_aspect_and_resolution() {
        let mut ctx = context(1.0);
        assert!(ctx.resize(800, 800, 1.0));
        assert_eq!(ctx.camera.aspect, 1.0);
        assert_eq!(ctx.uniforms.viewport_resolution, Vec2::new(800.0, 800.0));
        assert_eq!(ctx.viewport.target_size, (800, 800));
    }

    #[test]
    fn test_resize_ignores_zero_size() {
        let mut ctx = context(1.0);
        let before = ctx.viewport;
        assert!(!ctx.resize(0, 600, 1.0));
        assert_eq!(ctx.viewport, before);
    }

    #[test]
    fn test_minimize_and_restore() {
        let mut ctx = context(1.0);
        assert!(ctx.is_presentable());

        ctx.resize(0, 0, 1.0);
        assert!(!ctx.is_presentable());

        assert!(ctx.resize(1024, 768, 1.0));
        assert!(ctx.is_presentable());
        assert_eq!(ctx.viewport.target_size, (1024, 768));
    }

    #[test]
    fn test_mouse_in_logical_pixels() {
        let mut ctx = context(2.0);
        ctx.set_mouse(Vec2::new(400.0, 200.0));
        assert_eq!(ctx.uniforms.mouse_position, Vec2::new(200.0, 100.0));
    }

    #[test]
    fn test_gpu_uniforms_carry_time() {
        let mut ctx = context(1.0);
        ctx.uniforms.time = 3.5;
        let gpu = ctx.gpu_uniforms();
        assert_eq!(gpu.time, 3.5);
        assert_eq!(gpu.base_color, [1.0, 0.0, 0.0]);
        assert_eq!(gpu.model, ctx.model_matrix().to_cols_array_2d());
    }
}
