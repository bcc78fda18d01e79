//! FPS overlay layout health check

use egui::Context;

use crate::app::debug_ui::{fps_label, raw_input_for};
use crate::app::events::Size;
use crate::health::check::{CheckResult, SystemCheck};

/// Checks that egui can lay out the FPS label without a GPU
pub struct OverlayLayoutCheck {
    sizes: Vec<Size>,
}

impl OverlayLayoutCheck {
    /// Creates a check over a phone-sized and a desktop-sized viewport
    pub fn new() -> Self {
        Self {
            sizes: vec![Size::new(1080, 2400, 3.0), Size::new(800, 600, 1.0)],
        }
    }
}

impl Default for OverlayLayoutCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for OverlayLayoutCheck {
    fn name(&self) -> &'static str {
        "Overlay Layout"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates egui context creation and FPS label tessellation")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();

        for size in &self.sizes {
            let ctx = Context::default();
            // The first pass only measures the new area
            let _ = ctx.run(raw_input_for(*size), |ctx| fps_label(ctx, 60.0));
            let output = ctx.run(raw_input_for(*size), |ctx| fps_label(ctx, 60.0));
            let primitives = ctx.tessellate(output.shapes, output.pixels_per_point);

            if primitives.is_empty() {
                details.push(format!(
                    "  ✗ {}x{} @{:.1}x: no primitives",
                    size.width, size.height, size.scale_factor
                ));
                return CheckResult::fail("FPS label produced nothing to draw")
                    .with_details(details.join("\n"));
            }

            details.push(format!(
                "  ✓ {}x{} @{:.1}x: {} primitives, {:.1} px/pt",
                size.width,
                size.height,
                size.scale_factor,
                primitives.len(),
                output.pixels_per_point
            ));
        }

        CheckResult::pass(format!("{} viewports laid out", self.sizes.len()))
            .with_details(details.join("\n"))
    }
}
