//! Bandscape - a noise-displaced plane, banded into water, grass and rock.
//!
//! Drag to orbit, scroll to zoom. Tab / Shift+Tab picks a camera value,
//! the arrow keys nudge it (hold Shift for coarse steps). Escape quits.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, ModifiersState, PhysicalKey},
    window::{Window, WindowId},
};

use bandscape::camera::{Camera, OrbitControls};
use bandscape::cli::Args;
use bandscape::clock::{FrameLoop, FrameTarget};
use bandscape::context::{RenderContext, Viewport};
use bandscape::controls::{ControlPanel, PanelCommand};
use bandscape::params::*;
use bandscape::rendering::RenderSystem;
use bandscape::shader::SurfaceProgram;
use bandscape::surface::SurfaceMesh;

/// Renderer side of the frame loop
struct Viewer {
    render_system: RenderSystem,
    orbit: OrbitControls,
}

impl FrameTarget for Viewer {
    type Error = wgpu::SurfaceError;

    fn update_controls(&mut self, camera: &mut Camera) {
        self.orbit.update(camera);
    }

    fn render(&mut self, context: &RenderContext) -> Result<(), Self::Error> {
        self.render_system.update_uniforms(&context.gpu_uniforms());
        self.render_system.render()
    }
}

/// Everything that exists once the window is up
struct Session {
    window: Arc<Window>,
    frame_loop: FrameLoop,
    viewer: Viewer,
    panel: ControlPanel,
}

/// Main application state
struct App {
    // Configuration
    render_config: RenderConfig,
    camera_params: CameraParams,
    surface_params: SurfaceParams,
    displacement: DisplacementParams,
    scene: SceneParams,

    session: Option<Session>,
    startup_error: Option<anyhow::Error>,
    modifiers: ModifiersState,
}

impl App {
    fn new(args: &Args) -> Self {
        Self {
            render_config: args.render_config(),
            camera_params: args.camera_params(),
            surface_params: args.surface_params(),
            displacement: DisplacementParams::default(),
            scene: SceneParams::default(),
            session: None,
            startup_error: None,
            modifiers: ModifiersState::default(),
        }
    }

    /// Create the window, GPU resources and frame loop
    fn start_session(&self, event_loop: &ActiveEventLoop) -> Result<Session> {
        let window_attributes = Window::default_attributes()
            .with_title("Bandscape")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("Failed to create window")?,
        );

        let size = window.inner_size();
        let viewport = Viewport::new(
            size.width,
            size.height,
            window.scale_factor(),
            self.render_config.max_pixel_ratio,
        );

        let mesh = SurfaceMesh::new(&self.surface_params);
        let program = SurfaceProgram::new(&self.displacement);
        let (sx, sy) = mesh.segments();
        log::info!(
            "Surface: {}x{} segments, {} vertices, {} indices",
            sx,
            sy,
            mesh.vertices.len(),
            mesh.indices.len()
        );

        let render_system = pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            &mesh,
            &program,
            viewport.target_size,
            self.scene.background,
        ))
        .context("Failed to initialize renderer")?;

        let light = self.scene.light;
        log::info!(
            "Scene: background {:?}, point light {:?} x{} at {:?}",
            self.scene.background,
            light.color,
            light.intensity,
            light.position
        );

        let camera = Camera::new(&self.camera_params, viewport.aspect());
        let context = RenderContext::new(
            viewport,
            camera,
            &self.scene,
            &self.surface_params,
            self.render_config.max_pixel_ratio,
        );

        Ok(Session {
            window,
            frame_loop: FrameLoop::new(context),
            viewer: Viewer {
                render_system,
                orbit: OrbitControls::new(OrbitParams::default()),
            },
            panel: ControlPanel::new(&PanelParams::default()),
        })
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(session) = &self.session {
            let frame_loop = &session.frame_loop;
            if frame_loop.is_running() && frame_loop.context().is_presentable() {
                session.window.request_redraw();
            }
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() || self.startup_error.is_some() {
            return; // Already initialized
        }

        match self.start_session(event_loop) {
            Ok(session) => {
                log::info!("Bandscape is running, press ESC to quit");
                self.session = Some(session);
            }
            Err(err) => {
                log::error!("Startup failed: {:#}", err);
                self.startup_error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                session.frame_loop.stop();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                let scale_factor = session.window.scale_factor();
                let context = session.frame_loop.context_mut();
                if context.resize(size.width, size.height, scale_factor) {
                    let (width, height) = context.viewport.target_size;
                    session.viewer.render_system.resize(width, height);
                    log::info!(
                        "Resized to {}x{} (render target {}x{})",
                        context.viewport.logical_size.x,
                        context.viewport.logical_size.y,
                        width,
                        height
                    );
                } else {
                    log::debug!("Window minimized, frames paused");
                }
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
            }
            WindowEvent::CursorMoved { position, .. } => {
                let position = Vec2::new(position.x as f32, position.y as f32);
                let height = session.window.inner_size().height as f32;
                session.frame_loop.context_mut().set_mouse(position);
                session.viewer.orbit.cursor_moved(position, height);
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                session
                    .viewer
                    .orbit
                    .set_dragging(state == ElementState::Pressed);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => (pos.y / 100.0) as f32,
                };
                session.viewer.orbit.zoom(notches);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        ..
                    },
                ..
            } => {
                let shift = self.modifiers.shift_key();
                let command = match code {
                    KeyCode::Escape => {
                        session.frame_loop.stop();
                        event_loop.exit();
                        return;
                    }
                    KeyCode::Tab if shift => PanelCommand::SelectPrevious,
                    KeyCode::Tab => PanelCommand::SelectNext,
                    KeyCode::ArrowUp => PanelCommand::Increase,
                    KeyCode::ArrowDown => PanelCommand::Decrease,
                    _ => return,
                };
                let camera = &mut session.frame_loop.context_mut().camera;
                session.panel.apply(command, shift, camera);
            }
            WindowEvent::RedrawRequested => match session.frame_loop.tick(&mut session.viewer) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::warn!("Surface lost or outdated, reconfiguring");
                    session.viewer.render_system.reconfigure();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of GPU memory, stopping");
                    session.frame_loop.stop();
                    event_loop.exit();
                }
                Err(err) => log::warn!("Frame skipped: {:?}", err),
            },
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.print_shader {
        let program = SurfaceProgram::new(&DisplacementParams::default());
        print!("{}", program.source());
        return Ok(());
    }

    log::info!("Bandscape - noise-displaced surface");

    let mut app = App::new(&args);
    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop
        .run_app(&mut app)
        .context("Event loop terminated with an error")?;

    match app.startup_error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
