//! Frame timer health check

use std::time::{Duration, Instant};

use crate::app::debug_ui::{FRAME_WINDOW, FrameTimer};
use crate::health::check::{CheckResult, SystemCheck};

/// Checks the FPS calculation behind the overlay
pub struct FrameTimerCheck;

impl FrameTimerCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FrameTimerCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for FrameTimerCheck {
    fn name(&self) -> &'static str {
        "Frame Timer"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates frame interval tracking and FPS averaging")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();
        let mut timer = FrameTimer::new();

        if timer.fps() != 0.0 {
            details.push("  ✗ Initial FPS should be 0.0".to_string());
            return CheckResult::fail("Incorrect initial FPS").with_details(details.join("\n"));
        }
        details.push("  ✓ Initial FPS: 0.0".to_string());

        // Simulated 60Hz frames
        let start = Instant::now();
        let interval = Duration::from_micros(16_667);
        for i in 0..(FRAME_WINDOW as u32 * 2) {
            timer.record_frame_at(start + interval * i);
        }

        if timer.samples() != FRAME_WINDOW {
            details.push(format!(
                "  ✗ Window holds {} samples (expected {})",
                timer.samples(),
                FRAME_WINDOW
            ));
            return CheckResult::fail("Frame window unbounded").with_details(details.join("\n"));
        }
        details.push(format!("  ✓ Window bounded at {} samples", FRAME_WINDOW));

        let fps = timer.fps();
        if (fps - 60.0).abs() > 0.5 {
            details.push(format!("  ✗ FPS {:.1} (expected ~60)", fps));
            return CheckResult::fail("FPS calculation broken").with_details(details.join("\n"));
        }
        details.push(format!("  ✓ Simulated 60Hz reads as {:.1} FPS", fps));

        CheckResult::pass("Frame timing operational").with_details(details.join("\n"))
    }
}
