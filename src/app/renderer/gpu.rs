//! wgpu implementation of the renderer contract

use tracing::{debug, info, warn};

use super::program::{PassThroughProgram, Uniforms};
use super::{GpuContext, RenderError, Renderer};
use crate::app::debug_ui::FpsOverlay;
use crate::app::events::Size;
use crate::sim::ClearColor;

/// Resources that exist between a successful start and the matching stop
struct Resources {
    program: PassThroughProgram,
    overlay: Option<FpsOverlay>,
}

/// Clears the window to the backdrop color and draws the FPS overlay
pub struct GpuRenderer {
    show_fps: bool,
    resources: Option<Resources>,
    pending_frame: Option<wgpu::SurfaceTexture>,
}

impl GpuRenderer {
    pub fn new(show_fps: bool) -> Self {
        Self {
            show_fps,
            resources: None,
            pending_frame: None,
        }
    }
}

fn to_wgpu(color: ClearColor) -> wgpu::Color {
    wgpu::Color {
        r: color.r as f64,
        g: color.g as f64,
        b: color.b as f64,
        a: color.a as f64,
    }
}

impl Renderer for GpuRenderer {
    type Context = GpuContext;

    fn start(&mut self, ctx: &mut GpuContext) -> Result<(), RenderError> {
        let device = ctx.device();

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let program = PassThroughProgram::new(device, ctx.config().format);
        if let Some(err) = ctx.block_on(device.pop_error_scope()) {
            program.destroy();
            return Err(RenderError::Program(err.to_string()));
        }
        program.set_uniforms(ctx.queue(), Uniforms::default());

        let overlay = self
            .show_fps
            .then(|| FpsOverlay::new(device, ctx.config().format));

        self.resources = Some(Resources { program, overlay });
        info!(overlay = self.show_fps, "Renderer started");
        Ok(())
    }

    fn paint(
        &mut self,
        ctx: &mut GpuContext,
        size: Size,
        clear: ClearColor,
    ) -> Result<(), RenderError> {
        let Some(resources) = self.resources.as_mut() else {
            debug!("Paint before start, skipping");
            return Ok(());
        };
        if size.is_empty() {
            return Ok(());
        }

        ctx.fit_to(size);

        let output = match ctx.surface().get_current_texture() {
            Ok(output) => output,
            Err(e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                warn!(error = %e, "Surface lost, reconfiguring");
                ctx.reconfigure();
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = ctx
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Backdrop Encoder"),
            });

        let overlay_frame = resources
            .overlay
            .as_mut()
            .map(|overlay| overlay.prepare(ctx.device(), ctx.queue(), &mut encoder, size));

        {
            let mut rpass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Backdrop Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(to_wgpu(clear)),
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                })
                .forget_lifetime();

            resources.program.bind(&mut rpass);

            if let (Some(overlay), Some((frame, _))) = (&resources.overlay, &overlay_frame) {
                overlay.render(&mut rpass, frame);
            }
        }

        let mut command_buffers = Vec::new();
        if let Some((frame, extra)) = overlay_frame {
            command_buffers.extend(extra);
            if let Some(overlay) = resources.overlay.as_mut() {
                overlay.finish(frame);
            }
        }
        command_buffers.push(encoder.finish());
        ctx.queue().submit(command_buffers);

        self.pending_frame = Some(output);
        Ok(())
    }

    fn publish(&mut self, ctx: &mut GpuContext) {
        if let Some(frame) = self.pending_frame.take() {
            ctx.window().pre_present_notify();
            frame.present();
        }
    }

    fn stop(&mut self, _ctx: &mut GpuContext) {
        self.pending_frame = None;
        if let Some(resources) = self.resources.take() {
            resources.program.destroy();
            if let Some(overlay) = resources.overlay {
                let timer = overlay.timer();
                info!(
                    fps = timer.fps(),
                    last_frame_ms = timer.last_frame_ms(),
                    "Overlay released"
                );
                overlay.release();
            }
            info!("Renderer stopped");
        }
    }
}
