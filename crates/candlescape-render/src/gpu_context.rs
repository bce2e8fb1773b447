//! GPU context management for wgpu-based rendering.
//!
//! This module provides the [`GpuContext`] struct which encapsulates the core wgpu
//! resources needed for GPU rendering: device, queue, surface, and configuration.

/// Encapsulates the core wgpu resources needed for GPU rendering.
///
/// `GpuContext` owns the GPU device, command queue, render surface, and surface
/// configuration. The surface is configured on construction.
pub struct GpuContext {
    /// The wgpu device for creating GPU resources.
    pub device: wgpu::Device,
    /// The command queue for submitting GPU commands.
    pub queue: wgpu::Queue,
    /// The render surface (backed by the window).
    pub surface: wgpu::Surface<'static>,
    /// Configuration for the surface (format, size, present mode, etc.).
    pub config: wgpu::SurfaceConfiguration,
}

impl GpuContext {
    /// Creates a new `GpuContext` and configures the surface.
    ///
    /// Zero dimensions are raised to 1 to avoid configuring an empty surface.
    #[must_use]
    pub fn new(
        device: wgpu::Device,
        queue: wgpu::Queue,
        surface: wgpu::Surface<'static>,
        mut config: wgpu::SurfaceConfiguration,
    ) -> Self {
        config.width = config.width.max(1);
        config.height = config.height.max(1);
        surface.configure(&device, &config);
        Self {
            device,
            queue,
            surface,
            config,
        }
    }

    /// Resizes the surface to the given dimensions.
    ///
    /// Returns `true` when the surface was reconfigured. A zero-sized request
    /// (minimized window) leaves the surface untouched.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }

        if self.config.width != width || self.config.height != height {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            return true;
        }
        false
    }

    /// Reconfigures the surface with the current configuration, e.g. after
    /// the surface was lost or became outdated.
    pub fn configure_surface(&self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Gets the current texture from the surface for rendering.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface texture cannot be acquired (e.g., if
    /// the surface is lost or outdated).
    pub fn get_current_texture(&self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    /// Returns the surface texture format.
    #[must_use]
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the current surface dimensions as (width, height).
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }
}
