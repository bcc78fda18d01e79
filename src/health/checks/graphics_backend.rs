//! Graphics backend health check

use std::collections::BTreeSet;

use crate::health::check::{CheckResult, SystemCheck};

/// Checks that wgpu can find an adapter to paint with
pub struct GraphicsBackendCheck {
    backends: wgpu::Backends,
}

impl GraphicsBackendCheck {
    pub fn new() -> Self {
        Self {
            backends: wgpu::Backends::all(),
        }
    }

    /// Restricts the check to the given backends (e.g. `Backends::GL` on older phones)
    pub fn with_backends(backends: wgpu::Backends) -> Self {
        Self { backends }
    }
}

impl Default for GraphicsBackendCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for GraphicsBackendCheck {
    fn name(&self) -> &'static str {
        "Graphics Backend"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates wgpu instance creation and adapter availability")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: self.backends,
            ..Default::default()
        });
        details.push("  ✓ wgpu instance created".to_string());

        let adapters = instance.enumerate_adapters(self.backends);

        if adapters.is_empty() {
            details.push("  ⚠ No graphics adapters found".to_string());
            return CheckResult::warn("No graphics adapters available (headless?)")
                .with_details(details.join("\n"));
        }

        let mut hardware = false;
        let mut backend_names = BTreeSet::new();

        for (i, adapter) in adapters.iter().enumerate() {
            let info = adapter.get_info();
            backend_names.insert(format!("{:?}", info.backend));

            let device_type = match info.device_type {
                wgpu::DeviceType::DiscreteGpu => "Discrete GPU",
                wgpu::DeviceType::IntegratedGpu => "Integrated GPU",
                wgpu::DeviceType::VirtualGpu => "Virtual GPU",
                wgpu::DeviceType::Cpu => "CPU",
                wgpu::DeviceType::Other => "Other",
            };
            hardware |= matches!(
                info.device_type,
                wgpu::DeviceType::DiscreteGpu | wgpu::DeviceType::IntegratedGpu
            );

            details.push(format!(
                "    [{i}] {} - {} ({:?})",
                info.name, device_type, info.backend
            ));
        }

        details.push(format!(
            "  Backends available: {}",
            backend_names.into_iter().collect::<Vec<_>>().join(", ")
        ));

        if hardware {
            CheckResult::pass(format!("{} adapter(s) found", adapters.len()))
                .with_details(details.join("\n"))
        } else {
            CheckResult::warn(format!(
                "{} adapter(s) found (no hardware GPU detected)",
                adapters.len()
            ))
            .with_details(details.join("\n"))
        }
    }
}
