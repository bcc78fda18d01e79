//! Touch tint application
//!
//! Handles windowing, the paint loop, rendering, and touch input.

pub mod config;
pub mod debug_ui;
pub mod events;
pub mod frame_loop;
pub mod input;
pub mod renderer;
mod runner;
mod window;

pub use config::{AppConfig, InputConfig, LoggingConfig, OverlayConfig, WindowConfig};
pub use events::{AppEvent, PaintOrigin, PaintRequest, Size};
pub use frame_loop::{Dispatch, FrameLoop};
pub use renderer::{GpuContext, GpuRenderer, RenderError, Renderer};
pub use runner::App;
pub use window::window_attributes_from_config;
