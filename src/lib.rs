//! Touch Tint
//!
//! Paints the screen red, and a climbing shade of green while it is touched.
//! Built with winit, wgpu, and egui.

/// Application - windowing, paint loop, rendering, and input handling
pub mod app;

/// Build-time information (git SHA, branch, timestamp, etc.)
pub mod build_info;

/// Startup and environment health checks
pub mod health;

/// Backdrop state - touch flag and green level
pub mod sim;
