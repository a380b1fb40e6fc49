//! Raw input collection from winit events

use glam::Vec2;
use winit::event::{ElementState, WindowEvent};

use super::state::{InputState, MouseButton, TouchPhase};

/// Collects raw input from winit events and maintains InputState
pub struct InputCollector {
    state: InputState,
    scale_factor: f32,
}

impl InputCollector {
    /// Creates a new input collector
    pub fn new() -> Self {
        Self {
            state: InputState::new(),
            scale_factor: 1.0,
        }
    }

    /// Update scale factor (DPI scaling)
    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        self.scale_factor = scale_factor;
    }

    /// Handle a winit window event
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.handle_cursor(Vec2::new(position.x as f32, position.y as f32));
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let button = match button {
                    winit::event::MouseButton::Left => MouseButton::Left,
                    winit::event::MouseButton::Right => MouseButton::Right,
                    winit::event::MouseButton::Middle => MouseButton::Middle,
                    _ => return,
                };
                self.handle_button(button, *state == ElementState::Pressed);
            }

            WindowEvent::Touch(touch) => {
                let phase = match touch.phase {
                    winit::event::TouchPhase::Started => TouchPhase::Began,
                    winit::event::TouchPhase::Moved => TouchPhase::Moved,
                    winit::event::TouchPhase::Ended => TouchPhase::Ended,
                    winit::event::TouchPhase::Cancelled => TouchPhase::Canceled,
                };
                let location = Vec2::new(touch.location.x as f32, touch.location.y as f32);
                self.handle_touch(touch.id, location, phase);
            }

            _ => {}
        }
    }

    /// Cursor moved to a position in physical pixels
    pub fn handle_cursor(&mut self, physical: Vec2) {
        self.state.set_mouse_position(physical / self.scale_factor);
    }

    /// Button changed state
    pub fn handle_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            self.state.press(button);
        } else {
            self.state.release(button);
        }
    }

    /// Finger changed state at a position in physical pixels
    pub fn handle_touch(&mut self, id: u64, physical: Vec2, phase: TouchPhase) {
        self.state.set_touch(id, physical / self.scale_factor, phase);
    }

    /// Advance to next frame (transitions edge states to steady states)
    pub fn advance_frame(&mut self) {
        self.state.advance_frame();
    }

    /// Get current input state
    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Clone current state for one tick
    ///
    /// Cloned rather than taken so continuous state like the cursor survives.
    pub fn snapshot(&self) -> InputState {
        self.state.clone()
    }
}

impl Default for InputCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputSource;

    #[test]
    fn test_cursor_is_scaled_to_logical_pixels() {
        let mut collector = InputCollector::new();
        collector.set_scale_factor(2.0);
        collector.handle_cursor(Vec2::new(200.0, 100.0));
        assert_eq!(collector.state().mouse_position(), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_click_spans_two_frames() {
        let mut collector = InputCollector::new();
        collector.handle_button(MouseButton::Right, true);
        let pressed = collector.snapshot();
        collector.advance_frame();
        collector.handle_button(MouseButton::Right, false);
        let released = collector.snapshot();

        assert!(pressed.mouse_button_down(MouseButton::Right));
        assert!(released.mouse_button_up(MouseButton::Right));
        assert!(!released.mouse_button_down(MouseButton::Right));
    }

    #[test]
    fn test_touch_points_keep_begin_order() {
        let mut collector = InputCollector::new();
        collector.handle_touch(42, Vec2::new(10.0, 10.0), TouchPhase::Began);
        collector.handle_touch(3, Vec2::new(20.0, 20.0), TouchPhase::Began);
        collector.advance_frame();
        collector.handle_touch(42, Vec2::new(11.0, 10.0), TouchPhase::Ended);

        let frame = collector.snapshot();
        assert_eq!(frame.touch_count(), 2);
        assert_eq!(frame.touch(0).map(|t| (t.id, t.phase)), Some((42, TouchPhase::Ended)));
        assert_eq!(
            frame.touch(1).map(|t| (t.id, t.phase)),
            Some((3, TouchPhase::Stationary))
        );

        collector.advance_frame();
        assert_eq!(collector.state().touch(0).map(|t| t.id), Some(3));
    }
}
