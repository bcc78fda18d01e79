//! Event dispatch for the paint loop
//!
//! Events arrive one at a time on the platform thread. Each is dispatched by
//! kind and the loop answers with what the platform should do next. Continuous
//! animation comes from answering every published frame with
//! [`Dispatch::SchedulePaint`].

use tracing::{debug, error, info, warn};

use super::events::{AppEvent, PaintOrigin, Size};
use super::renderer::Renderer;
use crate::sim::Backdrop;

/// What the platform adapter should do after an event was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Nothing to do
    Idle,
    /// Post a self-originated paint request to the event queue
    SchedulePaint,
    /// Painting cannot continue; leave the event loop
    Exit,
}

/// Owns the backdrop state, the renderer and the current drawing context
pub struct FrameLoop<R: Renderer> {
    renderer: R,
    context: Option<R::Context>,
    started: bool,
    size: Size,
    backdrop: Backdrop,
    frames_painted: u64,
    /// A scheduled paint request is queued and not yet handled
    paint_pending: bool,
}

impl<R: Renderer> FrameLoop<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            context: None,
            started: false,
            size: Size::default(),
            backdrop: Backdrop::new(),
            frames_painted: 0,
            paint_pending: false,
        }
    }

    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Returns the drawing context while visible
    pub fn context(&self) -> Option<&R::Context> {
        self.context.as_ref()
    }

    /// Last recorded viewport size
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns true while visible with a renderer that started successfully
    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn frames_painted(&self) -> u64 {
        self.frames_painted
    }

    /// Handles one platform event
    pub fn handle(&mut self, event: AppEvent<R::Context>) -> Dispatch {
        match event {
            AppEvent::Visible(context) => self.on_visible(context),
            AppEvent::Hidden => {
                self.on_hidden();
                Dispatch::Idle
            }
            AppEvent::Resized(size) => {
                self.size = size;
                // Restarts a paint chain that stopped on an empty viewport
                if self.started && !size.is_empty() {
                    self.schedule_paint()
                } else {
                    Dispatch::Idle
                }
            }
            AppEvent::Paint(origin) => self.on_paint(origin),
            AppEvent::Touch(phase) => {
                self.backdrop.touch(phase);
                Dispatch::Idle
            }
        }
    }

    fn on_visible(&mut self, context: Option<R::Context>) -> Dispatch {
        if self.context.is_some() {
            debug!("Already visible, ignoring duplicate visibility event");
            return Dispatch::Idle;
        }
        let Some(mut context) = context else {
            warn!("Became visible without a drawing context");
            return Dispatch::Idle;
        };

        info!("Became visible, starting renderer");
        self.started = match self.renderer.start(&mut context) {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "Renderer start-up failed, painting disabled");
                false
            }
        };
        self.context = Some(context);

        if self.started {
            self.schedule_paint()
        } else {
            Dispatch::Idle
        }
    }

    fn on_hidden(&mut self) {
        let Some(mut context) = self.context.take() else {
            return;
        };

        info!(frames = self.frames_painted, "Became hidden, stopping renderer");
        self.renderer.stop(&mut context);
        self.started = false;
    }

    fn on_paint(&mut self, origin: PaintOrigin) -> Dispatch {
        // The loop paints as fast as the display allows, so platform
        // requests would only duplicate frames.
        if origin == PaintOrigin::External {
            return Dispatch::Idle;
        }
        self.paint_pending = false;
        let Some(context) = self.context.as_mut() else {
            return Dispatch::Idle;
        };
        if !self.started {
            debug!("Renderer not started, skipping paint");
            return Dispatch::Idle;
        }
        // Nothing would be presented to pace the loop; the next non-empty
        // resize picks it back up.
        if self.size.is_empty() {
            debug!("Empty viewport, pausing paints");
            return Dispatch::Idle;
        }

        let clear = self.backdrop.next_clear_color();
        match self.renderer.paint(context, self.size, clear) {
            Ok(()) => {
                self.renderer.publish(context);
                self.frames_painted += 1;
                self.schedule_paint()
            }
            Err(e) if e.is_fatal() => {
                error!(error = %e, "Fatal render error");
                Dispatch::Exit
            }
            Err(e) => {
                warn!(error = %e, "Frame dropped");
                self.schedule_paint()
            }
        }
    }

    /// Asks for a paint unless one is already queued, so at most one paint
    /// chain is ever running
    fn schedule_paint(&mut self) -> Dispatch {
        if self.paint_pending {
            return Dispatch::Idle;
        }
        self.paint_pending = true;
        Dispatch::SchedulePaint
    }
}
