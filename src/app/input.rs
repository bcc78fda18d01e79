//! Touch input collection from winit events
//!
//! Real touch contacts map straight onto backdrop phases. On desktops the
//! left mouse button can stand in for a single contact.

use winit::event::{ElementState, MouseButton, WindowEvent};

use crate::sim::TouchPhase;

/// Translates winit window events into touch phases
#[derive(Debug, Clone, Default)]
pub struct TouchInput {
    mouse_as_touch: bool,
    mouse_down: bool,
}

impl TouchInput {
    pub fn new(mouse_as_touch: bool) -> Self {
        Self {
            mouse_as_touch,
            mouse_down: false,
        }
    }

    /// Handle a winit window event, returning the touch phase it implies
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> Option<TouchPhase> {
        match event {
            WindowEvent::Touch(touch) => Some(Self::touch_phase(touch.phase)),
            WindowEvent::MouseInput { state, button, .. } => self.mouse_button(*button, *state),
            WindowEvent::CursorMoved { .. } => self.cursor_moved(),
            WindowEvent::CursorLeft { .. } => self.cursor_left(),
            _ => None,
        }
    }

    /// Maps a native touch phase; a cancelled contact counts as lifted
    pub fn touch_phase(phase: winit::event::TouchPhase) -> TouchPhase {
        match phase {
            winit::event::TouchPhase::Started => TouchPhase::Begin,
            winit::event::TouchPhase::Moved => TouchPhase::Move,
            winit::event::TouchPhase::Ended | winit::event::TouchPhase::Cancelled => {
                TouchPhase::End
            }
        }
    }

    /// Left button press and release emulate a contact going down and up
    pub fn mouse_button(&mut self, button: MouseButton, state: ElementState) -> Option<TouchPhase> {
        if !self.mouse_as_touch || button != MouseButton::Left {
            return None;
        }

        match state {
            ElementState::Pressed => {
                self.mouse_down = true;
                Some(TouchPhase::Begin)
            }
            ElementState::Released => {
                let was_down = std::mem::take(&mut self.mouse_down);
                was_down.then_some(TouchPhase::End)
            }
        }
    }

    /// Cursor motion counts as a contact move only while the button is held
    pub fn cursor_moved(&mut self) -> Option<TouchPhase> {
        (self.mouse_as_touch && self.mouse_down).then_some(TouchPhase::Move)
    }

    /// Leaving the window lifts the emulated contact
    pub fn cursor_left(&mut self) -> Option<TouchPhase> {
        if self.mouse_as_touch && std::mem::take(&mut self.mouse_down) {
            Some(TouchPhase::End)
        } else {
            None
        }
    }
}
