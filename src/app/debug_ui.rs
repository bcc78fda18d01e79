//! Frame-rate overlay drawn over the backdrop

use std::collections::VecDeque;
use std::time::Instant;

use egui::{Color32, RichText};
use wgpu::{CommandBuffer, CommandEncoder, Device, Queue, RenderPass, TextureFormat};

use super::events::Size;

/// Number of frame intervals averaged into the FPS reading
pub const FRAME_WINDOW: usize = 100;

/// Rolling frame interval history
#[derive(Debug, Clone, Default)]
pub struct FrameTimer {
    frame_times: VecDeque<f32>,
    last_frame: Option<Instant>,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a frame painted now
    pub fn record_frame(&mut self) {
        self.record_frame_at(Instant::now());
    }

    /// Records a frame painted at `now`
    ///
    /// The first frame only sets the reference point.
    pub fn record_frame_at(&mut self, now: Instant) {
        if let Some(last) = self.last_frame {
            let frame_time = now.saturating_duration_since(last).as_secs_f32();
            if self.frame_times.len() == FRAME_WINDOW {
                self.frame_times.pop_front();
            }
            self.frame_times.push_back(frame_time);
        }
        self.last_frame = Some(now);
    }

    /// Average frames per second over the window
    pub fn fps(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        let avg_frame_time = self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        if avg_frame_time > 0.0 {
            1.0 / avg_frame_time
        } else {
            0.0
        }
    }

    /// Duration of the most recent frame in milliseconds
    pub fn last_frame_ms(&self) -> f32 {
        self.frame_times.back().map_or(0.0, |t| t * 1000.0)
    }

    /// Number of recorded intervals
    pub fn samples(&self) -> usize {
        self.frame_times.len()
    }
}

/// Lays out the FPS label in the top-left corner
pub fn fps_label(ctx: &egui::Context, fps: f32) {
    egui::Area::new(egui::Id::new("fps_overlay"))
        .fixed_pos(egui::pos2(8.0, 8.0))
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(Color32::from_black_alpha(160))
                .inner_margin(egui::Margin::same(4))
                .corner_radius(egui::CornerRadius::same(4))
                .show(ui, |ui| {
                    ui.label(
                        RichText::new(format!("{fps:.0} FPS"))
                            .monospace()
                            .color(Color32::WHITE),
                    );
                });
        });
}

/// Builds the egui input describing a viewport of `size`
pub fn raw_input_for(size: Size) -> egui::RawInput {
    let pixels_per_point = size.scale_factor.max(f64::EPSILON) as f32;
    let mut raw_input = egui::RawInput {
        screen_rect: Some(egui::Rect::from_min_size(
            egui::Pos2::ZERO,
            egui::vec2(
                size.width as f32 / pixels_per_point,
                size.height as f32 / pixels_per_point,
            ),
        )),
        ..Default::default()
    };
    raw_input
        .viewports
        .entry(egui::ViewportId::ROOT)
        .or_default()
        .native_pixels_per_point = Some(pixels_per_point);
    raw_input
}

/// Tessellated overlay for one frame
pub struct OverlayFrame {
    primitives: Vec<egui::ClippedPrimitive>,
    screen: egui_wgpu::ScreenDescriptor,
    textures_to_free: Vec<egui::TextureId>,
}

/// FPS indicator backed by its own egui context and wgpu renderer
pub struct FpsOverlay {
    ctx: egui::Context,
    renderer: egui_wgpu::Renderer,
    timer: FrameTimer,
}

impl FpsOverlay {
    pub fn new(device: &Device, format: TextureFormat) -> Self {
        let renderer = egui_wgpu::Renderer::new(
            device,
            format,
            egui_wgpu::RendererOptions {
                depth_stencil_format: None,
                msaa_samples: 1,
                ..Default::default()
            },
        );

        Self {
            ctx: egui::Context::default(),
            renderer,
            timer: FrameTimer::new(),
        }
    }

    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    /// Records the frame, lays out the label and uploads what it needs
    ///
    /// Returned command buffers must be submitted before `encoder`.
    pub fn prepare(
        &mut self,
        device: &Device,
        queue: &Queue,
        encoder: &mut CommandEncoder,
        size: Size,
    ) -> (OverlayFrame, Vec<CommandBuffer>) {
        self.timer.record_frame();
        let fps = self.timer.fps();

        let full_output = self.ctx.run(raw_input_for(size), |ctx| fps_label(ctx, fps));
        let primitives = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }

        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [size.width, size.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let command_buffers =
            self.renderer
                .update_buffers(device, queue, encoder, &primitives, &screen);

        (
            OverlayFrame {
                primitives,
                screen,
                textures_to_free: full_output.textures_delta.free,
            },
            command_buffers,
        )
    }

    /// Draws the prepared overlay into the pass
    pub fn render(&self, rpass: &mut RenderPass<'static>, frame: &OverlayFrame) {
        self.renderer.render(rpass, &frame.primitives, &frame.screen);
    }

    /// Frees textures egui no longer needs
    pub fn finish(&mut self, frame: OverlayFrame) {
        for id in &frame.textures_to_free {
            self.renderer.free_texture(id);
        }
    }

    /// Drops the font atlas and every other texture the overlay uploaded
    pub fn release(mut self) {
        let textures: Vec<egui::TextureId> = self
            .ctx
            .tex_manager()
            .read()
            .allocated()
            .map(|(id, _)| *id)
            .collect();
        for id in &textures {
            self.renderer.free_texture(id);
        }
    }
}
