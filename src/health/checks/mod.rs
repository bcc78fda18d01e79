//! Built-in health checks for core systems

pub mod backdrop;
pub mod build_info;
pub mod config;
pub mod frame_timer;
pub mod graphics_backend;
pub mod overlay_layout;
pub mod system_info;

pub use backdrop::BackdropCheck;
pub use build_info::BuildInfoCheck;
pub use config::ConfigCheck;
pub use frame_timer::FrameTimerCheck;
pub use graphics_backend::GraphicsBackendCheck;
pub use overlay_layout::OverlayLayoutCheck;
pub use system_info::SystemInfoCheck;
