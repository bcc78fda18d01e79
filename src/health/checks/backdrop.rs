//! Backdrop state health check

use crate::health::check::{CheckResult, SystemCheck};
use crate::sim::{Backdrop, ClearColor, GREEN_STEPS_PER_CHANNEL, TouchPhase};

/// Checks that the touch flag and green level follow their paint rules
pub struct BackdropCheck;

impl BackdropCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BackdropCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for BackdropCheck {
    fn name(&self) -> &'static str {
        "Backdrop"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates touch tracking, green accumulation and wrap-around")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();
        let mut backdrop = Backdrop::new();

        if backdrop.next_clear_color() != ClearColor::RED {
            details.push("  ✗ Idle frame should be red".to_string());
            return CheckResult::fail("Idle color wrong").with_details(details.join("\n"));
        }
        details.push("  ✓ Idle frame: red".to_string());

        backdrop.touch(TouchPhase::Begin);
        for _ in 0..5 {
            backdrop.next_clear_color();
        }
        if (backdrop.green_level() - 0.05).abs() > 1e-6 {
            details.push(format!(
                "  ✗ Green after 5 frames: {:.3} (expected 0.05)",
                backdrop.green_level()
            ));
            return CheckResult::fail("Green accumulation wrong").with_details(details.join("\n"));
        }
        details.push("  ✓ Green after 5 touching frames: 0.05".to_string());

        for _ in 5..=GREEN_STEPS_PER_CHANNEL {
            backdrop.next_clear_color();
        }
        if backdrop.green_level() != 0.0 {
            details.push(format!(
                "  ✗ Green after {} frames: {:.3} (expected wrap to 0)",
                GREEN_STEPS_PER_CHANNEL + 1,
                backdrop.green_level()
            ));
            return CheckResult::fail("Green wrap-around wrong").with_details(details.join("\n"));
        }
        details.push("  ✓ Green wraps past a full channel".to_string());

        backdrop.touch(TouchPhase::Move);
        backdrop.next_clear_color();
        backdrop.touch(TouchPhase::End);
        if backdrop.is_touching() || backdrop.next_clear_color() != ClearColor::RED {
            details.push("  ✗ Release should return to red".to_string());
            return CheckResult::fail("Release handling wrong").with_details(details.join("\n"));
        }
        details.push("  ✓ Release resets to red".to_string());

        CheckResult::pass("Backdrop rules hold").with_details(details.join("\n"))
    }
}
