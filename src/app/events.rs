//! Platform events consumed by the frame loop

use crate::sim::TouchPhase;

/// Viewport size in physical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
    /// Physical pixels per logical point
    pub scale_factor: f64,
}

impl Size {
    pub fn new(width: u32, height: u32, scale_factor: f64) -> Self {
        Self {
            width,
            height,
            scale_factor,
        }
    }

    /// Returns true if either dimension is zero (e.g. a minimized window)
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(0, 0, 1.0)
    }
}

/// Where a paint request came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintOrigin {
    /// Posted by the frame loop itself after publishing a frame
    Scheduled,
    /// Requested by the platform (expose, resize, ...)
    External,
}

/// Tagged union of everything the frame loop reacts to
///
/// `C` is the drawing context handed over when the app becomes visible.
#[derive(Debug)]
pub enum AppEvent<C> {
    /// The app crossed into the visible stage
    Visible(Option<C>),
    /// The app crossed out of the visible stage
    Hidden,
    /// The viewport changed size
    Resized(Size),
    /// A frame should be painted
    Paint(PaintOrigin),
    /// A touch contact changed
    Touch(TouchPhase),
}

/// Marker posted through the event loop proxy to request the next frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintRequest;
