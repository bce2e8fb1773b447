//! Per-window application state: GPU resources, camera, and input.

use std::path::PathBuf;
use std::sync::Arc;

use candlescape_config::Config;
use candlescape_core::PriceRange;
use candlescape_data::{count_inconsistent, CsvLoader, DataSource, SampleData};
use candlescape_render::{
    Camera, CameraSettings, GpuContext, InstanceBuilder, LightUniform, Palette, Projection,
    SceneRenderer,
};
use glam::Vec4;
use winit::{
    event::{ElementState, MouseButton, MouseScrollDelta},
    event_loop::ActiveEventLoop,
    keyboard::KeyCode,
    window::Window,
};

use crate::input::{InputAction, InputHandler};

/// Picks the candle source: command-line path, then configured CSV, then the
/// built-in sample set.
pub fn select_data_source(cli_path: Option<PathBuf>, config: &Config) -> Box<dyn DataSource> {
    match cli_path.or_else(|| config.data.csv_path.clone()) {
        Some(path) => Box::new(CsvLoader::new(path)),
        None => Box::new(SampleData::new(config.data.sample_count)),
    }
}

pub fn camera_settings(config: &Config) -> CameraSettings {
    let camera = &config.camera;
    CameraSettings {
        drag_sensitivity: camera.drag_sensitivity,
        zoom_speed: camera.zoom_speed,
        move_speed: camera.move_speed,
        min_zoom: camera.min_zoom,
        max_zoom: camera.max_zoom,
        projection: Projection {
            fov_y: camera.fov_y.to_radians(),
            near: camera.near,
            far: camera.far,
        },
    }
    .sanitized()
}

pub fn instance_builder(config: &Config) -> InstanceBuilder {
    let scene = &config.scene;
    InstanceBuilder::new(scene.spacing, scene.vertical_range).with_palette(Palette {
        bullish: Vec4::from_array(scene.bullish_color),
        bearish: Vec4::from_array(scene.bearish_color),
        wick: Vec4::from_array(scene.wick_color),
    })
}

fn clear_color(rgba: [f32; 4]) -> wgpu::Color {
    wgpu::Color {
        r: rgba[0] as f64,
        g: rgba[1] as f64,
        b: rgba[2] as f64,
        a: rgba[3] as f64,
    }
}

pub struct State {
    pub window: Arc<Window>,
    pub gpu: GpuContext,
    pub renderer: SceneRenderer,
    pub camera: Camera,
    pub input: InputHandler,
}

impl State {
    pub async fn new(
        window: Arc<Window>,
        config: &Config,
        source: &dyn DataSource,
    ) -> anyhow::Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("Failed to find a suitable GPU adapter"))?;
        log::info!("Using adapter {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("Surface reports no supported formats"))?;
        log::info!("Surface format {:?}", surface_format);

        let config_surface = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        let gpu = GpuContext::new(device, queue, surface, config_surface);

        log::info!("Loading candles from {}", source.describe());
        let candles = source.load()?;
        if let Some(range) = PriceRange::from_candles(&candles) {
            log::info!(
                "Loaded {} candles, price range {}..{}",
                candles.len(),
                range.min,
                range.max
            );
        } else {
            log::warn!("No candles loaded; the scene will be empty");
        }
        let inconsistent = count_inconsistent(&candles);
        if inconsistent > 0 {
            log::warn!(
                "{} candles have high/low outside their open/close",
                inconsistent
            );
        }

        let light = LightUniform::new(config.lighting.direction, config.lighting.ambient);
        let (width, height) = gpu.dimensions();
        let renderer = SceneRenderer::new(
            &gpu.device,
            gpu.surface_format(),
            width,
            height,
            instance_builder(config),
            light,
            clear_color(config.scene.background_color),
            &candles,
        );

        Ok(Self {
            window,
            gpu,
            renderer,
            camera: Camera::with_settings(camera_settings(config)),
            input: InputHandler::with_scroll_line_pixels(config.camera.scroll_line_pixels),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if self.gpu.resize(width, height) {
            self.renderer.resize(&self.gpu.device, width, height);
        }
    }

    /// Reconfigure the surface at the window's current size after it was
    /// lost or became outdated.
    pub fn reconfigure(&mut self) {
        let size = self.window.inner_size();
        self.resize(size.width, size.height);
        self.gpu.configure_surface();
    }

    /// Per-frame update: apply held movement keys and upload the camera.
    pub fn update(&mut self) {
        self.camera.on_keys_held(self.input.movement_keys());
        self.renderer.update_camera(&self.gpu.queue, &self.camera);
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.window.request_redraw();

        let output = self.gpu.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.renderer.render(&mut encoder, &view);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    pub fn handle_key(&mut self, event_loop: &ActiveEventLoop, code: KeyCode, is_pressed: bool) {
        if let Some(action) = self.input.handle_key(code, is_pressed) {
            self.apply(event_loop, action);
        }
    }

    pub fn handle_mouse_input(
        &mut self,
        event_loop: &ActiveEventLoop,
        state: ElementState,
        button: MouseButton,
    ) {
        if let Some(action) = self.input.handle_mouse_input(state, button) {
            self.apply(event_loop, action);
        }
    }

    pub fn handle_cursor_moved(&mut self, event_loop: &ActiveEventLoop, position: (f64, f64)) {
        if let Some(action) = self.input.handle_cursor_moved(position) {
            self.apply(event_loop, action);
        }
    }

    pub fn handle_mouse_wheel(&mut self, event_loop: &ActiveEventLoop, delta: MouseScrollDelta) {
        if let Some(action) = self.input.handle_mouse_wheel(delta) {
            self.apply(event_loop, action);
        }
    }

    fn apply(&mut self, event_loop: &ActiveEventLoop, action: InputAction) {
        match action {
            InputAction::Exit => event_loop.exit(),
            InputAction::ResetCamera => self.camera.reset(),
            InputAction::Drag { dx, dy } => self.camera.on_drag(dx, dy),
            InputAction::Scroll { delta } => self.camera.on_scroll(delta),
            InputAction::StartDrag | InputAction::EndDrag => {}
        }
        self.window.request_redraw();
    }
}
