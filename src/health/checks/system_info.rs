//! System information health check

use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};

use crate::health::check::{CheckResult, SystemCheck};

/// Checks that the host can run a windowed GPU app: display server, CPU and
/// memory
pub struct SystemInfoCheck;

impl SystemInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemInfoCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for SystemInfoCheck {
    fn name(&self) -> &'static str {
        "System Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates OS, display server, CPU, and memory")
    }

    fn check(&self) -> CheckResult {
        let sys = System::new_with_specifics(
            RefreshKind::nothing()
                .with_cpu(CpuRefreshKind::everything())
                .with_memory(MemoryRefreshKind::everything()),
        );

        let mut details = vec![
            format!(
                "  OS: {} {}",
                System::name().unwrap_or_else(|| "Unknown".to_string()),
                System::os_version().unwrap_or_else(|| "Unknown".to_string())
            ),
            format!(
                "  Kernel: {}",
                System::kernel_version().unwrap_or_else(|| "Unknown".to_string())
            ),
        ];

        let display = display_server(
            std::env::var_os("WAYLAND_DISPLAY").is_some(),
            std::env::var_os("DISPLAY").is_some(),
        );
        match display {
            Some(server) => details.push(format!("  Display: {}", server)),
            None => {
                details.push("  Display: none (WAYLAND_DISPLAY and DISPLAY unset)".to_string());
                return CheckResult::warn("No display server, the window cannot open")
                    .with_details(details.join("\n"));
            }
        }

        let logical_cores = sys.cpus().len();
        if logical_cores == 0 {
            return CheckResult::warn("Unable to detect CPU cores")
                .with_details(details.join("\n"));
        }
        details.push(format!("  CPU cores: {} logical", logical_cores));

        let total_memory_gb = sys.total_memory() as f64 / 1_073_741_824.0;
        details.push(format!("  Memory: {:.1} GB total", total_memory_gb));

        if total_memory_gb < 1.0 {
            return CheckResult::warn("Low memory detected").with_details(details.join("\n"));
        }

        CheckResult::pass("System info gathered successfully").with_details(details.join("\n"))
    }
}

/// Names the display server a window would be created on
#[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
fn display_server(wayland: bool, x11: bool) -> Option<&'static str> {
    match (wayland, x11) {
        (true, _) => Some("Wayland"),
        (false, true) => Some("X11"),
        (false, false) => None,
    }
}

#[cfg(not(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android")))))]
fn display_server(_wayland: bool, _x11: bool) -> Option<&'static str> {
    Some("native")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_os = "linux")]
    #[test]
    fn test_display_server_prefers_wayland() {
        assert_eq!(display_server(true, true), Some("Wayland"));
        assert_eq!(display_server(false, true), Some("X11"));
        assert_eq!(display_server(false, false), None);
    }

    #[test]
    fn test_check_never_fails() {
        assert!(SystemInfoCheck::new().check().status.is_ok());
    }
}
