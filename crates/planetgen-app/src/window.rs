//! Window creation and event handling via winit.
//!
//! [`AppState`] implements winit's [`ApplicationHandler`]. The planet mesh is
//! generated before the event loop starts and uploaded once when the window
//! appears; every frame after that only updates the camera uniform.

use std::sync::Arc;

use planetgen_config::{CameraConfig, Config, DrawMode};
use planetgen_input::{FrameInput, KeyboardState, MouseState};
use planetgen_mesh::MeshExport;
use planetgen_render::{
    DepthBuffer, FrameEncoder, OrbitCamera, OrbitCameraSettings, PlanetBuffers, PlanetPipelines,
    RenderContext, RenderContextError, RenderPassBuilder, SurfaceError,
    init_render_context_blocking,
};
use tracing::{debug, error, info, instrument, warn};
use winit::application::ApplicationHandler;
use winit::error::{EventLoopError, OsError};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::draw_mode;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] OsError),

    #[error("GPU initialization failed: {0}")]
    Render(#[from] RenderContextError),

    #[error("GPU out of memory")]
    OutOfMemory,
}

pub fn camera_settings(camera: &CameraConfig) -> OrbitCameraSettings {
    OrbitCameraSettings {
        fov_y_degrees: camera.fov_y_degrees,
        near: camera.near,
        far: camera.far,
        start_distance: camera.start_distance,
        min_distance: camera.min_distance,
        zoom_step: camera.zoom_step,
        sensitivity: camera.mouse_sensitivity,
    }
}

pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(draw_mode::window_title(
            &config.window.title,
            config.render.draw_mode,
        ))
        .with_inner_size(winit::dpi::LogicalSize::new(
            f64::from(config.window.width),
            f64::from(config.window.height),
        ))
}

/// GPU state that only exists while a window does.
struct Viewer {
    gpu: RenderContext,
    depth: DepthBuffer,
    pipelines: PlanetPipelines,
    buffers: PlanetBuffers,
}

impl Viewer {
    fn new(gpu: RenderContext, export: &MeshExport) -> Self {
        let (width, height) = gpu.size();
        let depth = DepthBuffer::new(&gpu.device, width, height);
        let pipelines =
            PlanetPipelines::new(&gpu.device, gpu.surface_format, Some(DepthBuffer::stencil_state()));
        let buffers = PlanetBuffers::from_export(&gpu.device, export);
        Self {
            gpu,
            depth,
            pipelines,
            buffers,
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
        let (width, height) = self.gpu.size();
        self.depth.resize(&self.gpu.device, width, height);
    }

    fn aspect(&self) -> f32 {
        let (width, height) = self.gpu.size();
        width as f32 / height as f32
    }

    fn render(
        &mut self,
        camera: &OrbitCamera,
        mode: DrawMode,
        clear_rgb: [f32; 3],
    ) -> Result<(), SurfaceError> {
        self.pipelines
            .write_uniform(&self.gpu.queue, &camera.uniform(self.aspect()));

        let texture = self.gpu.get_current_texture()?;
        let builder = RenderPassBuilder::new()
            .clear_rgb(clear_rgb)
            .depth(self.depth.view.clone(), DepthBuffer::CLEAR_VALUE)
            .label("planet-pass");

        let mut frame = FrameEncoder::new(&self.gpu.device, &self.gpu.queue, texture);
        if let Some(mut pass) = frame.begin_render_pass(&builder) {
            self.pipelines
                .draw(&mut pass, &self.buffers, draw_mode::topology(mode));
        }
        frame.submit();
        Ok(())
    }
}

/// Viewer state: window, GPU resources, camera, input and draw mode.
pub struct AppState {
    config: Config,
    export: MeshExport,
    window: Option<Arc<Window>>,
    viewer: Option<Viewer>,
    pub camera: OrbitCamera,
    pub draw_mode: DrawMode,
    mouse_state: MouseState,
    keyboard_state: KeyboardState,
    error: Option<AppError>,
}

impl AppState {
    pub fn new(config: Config, export: MeshExport) -> Self {
        let camera = OrbitCamera::new(camera_settings(&config.camera));
        let draw_mode = config.render.draw_mode;
        Self {
            config,
            export,
            window: None,
            viewer: None,
            camera,
            draw_mode,
            mouse_state: MouseState::new(),
            keyboard_state: KeyboardState::new(),
            error: None,
        }
    }

    /// Title for the current draw mode.
    pub fn title(&self) -> String {
        draw_mode::window_title(&self.config.window.title, self.draw_mode)
    }

    /// Apply one frame of input. Returns `false` when the viewer should close.
    pub fn apply_input(&mut self, input: &FrameInput) -> bool {
        if input.escape {
            info!("Escape pressed, shutting down");
            return false;
        }

        if input.left_held {
            self.camera.drag_primary(input.cursor_delta);
        }
        if input.right_held {
            self.camera.drag_secondary(input.cursor_delta);
        }
        self.camera.zoom(input.scroll);

        if let Some(mode) = input.number_key.and_then(draw_mode::from_number_key)
            && mode != self.draw_mode
        {
            info!(mode = %mode, "Draw mode changed");
            self.draw_mode = mode;
            if let Some(window) = &self.window {
                window.set_title(&self.title());
            }
        }
        true
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        error!("{err}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn create_viewer(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let window = Arc::new(event_loop.create_window(window_attributes_from_config(&self.config))?);
        let gpu = init_render_context_blocking(window.clone(), self.config.window.vsync)?;
        let viewer = Viewer::new(gpu, &self.export);
        info!(
            vertices = self.export.vertices().len(),
            triangles = self.export.triangle_count(),
            "Planet uploaded"
        );
        window.request_redraw();
        self.viewer = Some(viewer);
        self.window = Some(window);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let input = FrameInput::capture(&self.mouse_state, &self.keyboard_state);
        self.mouse_state.end_frame();
        self.keyboard_state.end_frame();
        if !self.apply_input(&input) {
            event_loop.exit();
            return;
        }

        let Some(viewer) = &mut self.viewer else {
            return;
        };
        match viewer.render(&self.camera, self.draw_mode, self.config.render.clear_color) {
            Ok(()) => {}
            Err(SurfaceError::Lost) => {
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    viewer.resize(size.width, size.height);
                }
            }
            Err(SurfaceError::OutOfMemory) => {
                self.fail(event_loop, AppError::OutOfMemory);
                return;
            }
            Err(SurfaceError::Timeout) => warn!("Surface timeout, skipping frame"),
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none()
            && let Err(err) = self.create_viewer(event_loop)
        {
            self.fail(event_loop, err);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(viewer) = &mut self.viewer {
                    viewer.resize(size.width, size.height);
                    debug!(
                        "Window resized to {}x{}",
                        viewer.depth.width(),
                        viewer.depth.height()
                    );
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.keyboard_state.process_event(&event);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_state.on_cursor_moved(position.x, position.y);
            }
            WindowEvent::CursorLeft { .. } => {
                self.mouse_state.on_cursor_left();
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse_state.on_button(button, state);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.mouse_state.on_scroll(delta);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

/// Open the viewer window on `export` and block until it closes.
#[instrument(skip_all)]
pub fn run(config: Config, export: MeshExport) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let mut app = AppState::new(config, export);
    event_loop.run_app(&mut app)?;
    // Drop GPU resources before the window.
    app.viewer = None;
    app.window = None;
    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
