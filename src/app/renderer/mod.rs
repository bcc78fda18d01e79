//! Rendering: the renderer contract and its wgpu implementation
//!
//! ## Architecture
//!
//! - `Renderer`: start / paint / publish / stop contract driven by the frame loop
//! - `GpuContext`: the drawing context (window surface, device, queue)
//! - `program`: the fixed pass-through pipeline bound every frame
//! - `gpu`: `GpuRenderer`, tying the pipeline and the FPS overlay together

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;
use wgpu::{Device, Queue, Surface, SurfaceConfiguration};
use winit::window::Window;

use super::events::Size;
use crate::sim::ClearColor;

mod gpu;
pub mod program;

pub use gpu::GpuRenderer;

/// Errors raised while setting up or drawing frames
#[derive(Debug, Error)]
pub enum RenderError {
    /// The pass-through program failed validation
    #[error("failed to build GPU program: {0}")]
    Program(String),

    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to open GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    IncompatibleSurface,
}

impl RenderError {
    /// Returns true if the app cannot keep painting after this error
    pub fn is_fatal(&self) -> bool {
        matches!(self, RenderError::Surface(wgpu::SurfaceError::OutOfMemory))
    }
}

/// Lifecycle contract between the frame loop and whatever draws the frames
pub trait Renderer {
    /// Drawing context handed over when the app becomes visible
    type Context;

    /// Allocates GPU resources; nothing is kept on failure
    fn start(&mut self, ctx: &mut Self::Context) -> Result<(), RenderError>;

    /// Draws one frame cleared to `clear` for the given viewport
    fn paint(
        &mut self,
        ctx: &mut Self::Context,
        size: Size,
        clear: ClearColor,
    ) -> Result<(), RenderError>;

    /// Shows the frame produced by the last `paint`
    fn publish(&mut self, ctx: &mut Self::Context);

    /// Releases everything acquired by `start`
    fn stop(&mut self, ctx: &mut Self::Context);
}

/// Drawing context: a configured window surface plus its device and queue
pub struct GpuContext {
    window: Arc<Window>,
    surface: Surface<'static>,
    device: Device,
    queue: Queue,
    config: SurfaceConfiguration,
    runtime: tokio::runtime::Handle,
}

impl GpuContext {
    /// Creates a surface for the window and opens a device that can present to it
    pub async fn new(
        window: Arc<Window>,
        vsync: bool,
        runtime: tokio::runtime::Handle,
    ) -> Result<Self, RenderError> {
        info!("Initializing wgpu context");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        info!(
            adapter.name = adapter.get_info().name,
            adapter.backend = ?adapter.get_info().backend,
            "Found GPU adapter"
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Touch Tint Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
                experimental_features: Default::default(),
            })
            .await?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(RenderError::IncompatibleSurface)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: if vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        info!(
            surface.width = config.width,
            surface.height = config.height,
            surface.format = ?config.format,
            "Surface configured"
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            runtime,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    pub fn surface(&self) -> &Surface<'static> {
        &self.surface
    }

    /// Returns a reference to the surface configuration
    pub fn config(&self) -> &SurfaceConfiguration {
        &self.config
    }

    /// Reconfigures the surface if `size` differs from the current configuration
    ///
    /// Empty sizes are ignored.
    pub fn fit_to(&mut self, size: Size) {
        if size.is_empty() || (size.width == self.config.width && size.height == self.config.height)
        {
            return;
        }

        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);

        info!(
            width = size.width,
            height = size.height,
            "Surface resized"
        );
    }

    /// Reapplies the current configuration after the surface was lost
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Drives one of wgpu's futures to completion on the app runtime
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}
