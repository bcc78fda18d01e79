//! winit application handler feeding the frame loop

use std::sync::Arc;

use tracing::{debug, error, info};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoopProxy};
use winit::window::{Window, WindowId};

use super::config::AppConfig;
use super::events::{AppEvent, PaintOrigin, PaintRequest, Size};
use super::frame_loop::{Dispatch, FrameLoop};
use super::input::TouchInput;
use super::renderer::{GpuContext, GpuRenderer};
use super::window::window_attributes_from_config;

/// Main application: translates winit callbacks into frame loop events
pub struct App {
    config: AppConfig,
    runtime: tokio::runtime::Runtime,
    proxy: EventLoopProxy<PaintRequest>,
    window: Option<Arc<Window>>,
    frame_loop: FrameLoop<GpuRenderer>,
    touch_input: TouchInput,
}

impl App {
    /// Creates the application with the provided configuration
    ///
    /// `proxy` must belong to the event loop the app will run on; it carries
    /// the self-scheduled paint requests.
    pub fn new(config: AppConfig, proxy: EventLoopProxy<PaintRequest>) -> anyhow::Result<Self> {
        info!(profile = %config.profile, "Starting touch tint");
        info!(?config.window, "Window configuration");

        // wgpu's adapter, device and error-scope requests are async; the
        // winit loop is not
        let runtime = tokio::runtime::Runtime::new()?;

        Ok(Self {
            frame_loop: FrameLoop::new(GpuRenderer::new(config.overlay.show_fps)),
            touch_input: TouchInput::new(config.input.mouse_as_touch),
            config,
            runtime,
            proxy,
            window: None,
        })
    }

    /// Current size of the window in physical pixels
    fn window_size(window: &Window) -> Size {
        let size = window.inner_size();
        Size::new(size.width, size.height, window.scale_factor())
    }

    /// Hands one event to the frame loop and carries out its answer
    fn dispatch(&mut self, event_loop: &ActiveEventLoop, event: AppEvent<GpuContext>) {
        match self.frame_loop.handle(event) {
            Dispatch::Idle => {}
            Dispatch::SchedulePaint => {
                if self.proxy.send_event(PaintRequest).is_err() {
                    debug!("Event loop closed, dropping paint request");
                }
            }
            Dispatch::Exit => {
                error!("Exiting after unrecoverable render error");
                event_loop.exit();
            }
        }
    }

    /// Returns the window, creating it on first use
    fn ensure_window(&mut self, event_loop: &ActiveEventLoop) -> Option<Arc<Window>> {
        if let Some(window) = &self.window {
            return Some(window.clone());
        }

        match event_loop.create_window(window_attributes_from_config(&self.config.window)) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    window.width = size.width,
                    window.height = size.height,
                    "Window created successfully"
                );
                let window = Arc::new(window);
                self.window = Some(window.clone());
                Some(window)
            }
            Err(e) => {
                error!(error = %e, "Failed to create window");
                None
            }
        }
    }

    /// Builds the drawing context for the window
    fn create_context(&self, window: Arc<Window>) -> Option<GpuContext> {
        let context = self.runtime.block_on(GpuContext::new(
            window,
            self.config.window.vsync,
            self.runtime.handle().clone(),
        ));

        match context {
            Ok(context) => Some(context),
            Err(e) => {
                error!(error = %e, "Failed to create drawing context");
                None
            }
        }
    }
}

impl ApplicationHandler<PaintRequest> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = self.ensure_window(event_loop) else {
            return;
        };

        self.dispatch(event_loop, AppEvent::Resized(Self::window_size(&window)));
        let context = self.create_context(window);
        self.dispatch(event_loop, AppEvent::Visible(context));
    }

    fn suspended(&mut self, event_loop: &ActiveEventLoop) {
        self.dispatch(event_loop, AppEvent::Hidden);
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, _event: PaintRequest) {
        self.dispatch(event_loop, AppEvent::Paint(PaintOrigin::Scheduled));
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(phase) = self.touch_input.handle_window_event(&event) {
            self.dispatch(event_loop, AppEvent::Touch(phase));
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, exiting");
                self.dispatch(event_loop, AppEvent::Hidden);
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                let scale_factor = self.window.as_ref().map_or(1.0, |w| w.scale_factor());
                self.dispatch(
                    event_loop,
                    AppEvent::Resized(Size::new(new_size.width, new_size.height, scale_factor)),
                );
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(window) = self.window.clone() {
                    self.dispatch(event_loop, AppEvent::Resized(Self::window_size(&window)));
                }
            }
            WindowEvent::RedrawRequested => {
                self.dispatch(event_loop, AppEvent::Paint(PaintOrigin::External));
            }
            _ => {}
        }
    }

    fn exiting(&mut self, event_loop: &ActiveEventLoop) {
        self.dispatch(event_loop, AppEvent::Hidden);
    }
}
