//! Raw input state and the polling interface the tracker reads it through

use glam::Vec2;
use indexmap::IndexMap;

/// Mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Button press state with edge detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Released,
    /// Pressed this frame (edge)
    JustPressed,
    /// Held down (multiple frames)
    Pressed,
    /// Released this frame (edge)
    JustReleased,
    /// Pressed and released within the same frame (both edges)
    Tapped,
}

impl ButtonState {
    /// Advance state for next frame (transitions edges to steady states)
    pub fn advance(self) -> Self {
        match self {
            Self::JustPressed => Self::Pressed,
            Self::JustReleased | Self::Tapped => Self::Released,
            state => state,
        }
    }

    /// Returns true if button is currently down (just pressed or held)
    pub fn is_down(self) -> bool {
        matches!(self, Self::JustPressed | Self::Pressed)
    }

    /// Returns true if button was just pressed this frame
    pub fn is_just_pressed(self) -> bool {
        matches!(self, Self::JustPressed | Self::Tapped)
    }

    /// Returns true if button was just released this frame
    pub fn is_just_released(self) -> bool {
        matches!(self, Self::JustReleased | Self::Tapped)
    }

    /// State after a press edge arrives
    pub fn press(self) -> Self {
        match self {
            Self::Pressed => Self::Pressed,
            _ => Self::JustPressed,
        }
    }

    /// State after a release edge arrives
    ///
    /// A release landing on a press from the same frame keeps both edges.
    pub fn release(self) -> Self {
        match self {
            Self::JustPressed => Self::Tapped,
            _ => Self::JustReleased,
        }
    }
}

/// Lifecycle phase of a touch point within one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Began,
    Moved,
    Stationary,
    Ended,
    Canceled,
}

impl TouchPhase {
    /// Returns true for the phases that end a touch
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Canceled)
    }
}

/// One active touch as seen this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Hardware finger id, stable for the lifetime of the touch
    pub id: u64,
    /// Screen position in logical pixels
    pub position: Vec2,
    pub phase: TouchPhase,
}

/// Polling interface over the current hardware frame
pub trait InputSource {
    /// Button went down this frame
    fn mouse_button_down(&self, button: MouseButton) -> bool;

    /// Button went up this frame
    fn mouse_button_up(&self, button: MouseButton) -> bool;

    /// Button is down, whether or not it changed this frame
    fn mouse_button_held(&self, button: MouseButton) -> bool;

    /// Cursor position in logical pixels
    fn mouse_position(&self) -> Vec2;

    /// Number of touches reported this frame
    fn touch_count(&self) -> usize;

    /// Touch at `index` in `0..touch_count()`
    fn touch(&self, index: usize) -> Option<TouchPoint>;
}

/// State of all mouse buttons
#[derive(Debug, Clone, Default)]
pub struct MouseButtons {
    pub left: ButtonState,
    pub right: ButtonState,
    pub middle: ButtonState,
}

impl MouseButtons {
    /// State of one button
    pub fn get(&self, button: MouseButton) -> ButtonState {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Right => self.right,
            MouseButton::Middle => self.middle,
        }
    }

    /// Mutable state of one button
    pub fn get_mut(&mut self, button: MouseButton) -> &mut ButtonState {
        match button {
            MouseButton::Left => &mut self.left,
            MouseButton::Right => &mut self.right,
            MouseButton::Middle => &mut self.middle,
        }
    }
}

/// Mouse input state
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    /// DPI-scaled logical coordinates (screen space)
    pub position: Vec2,
    pub buttons: MouseButtons,
}

/// Raw input state snapshot for a single frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub mouse: MouseState,
    /// Touches keyed by finger id, in the order they began
    pub touches: IndexMap<u64, TouchPoint>,
}

impl InputState {
    /// Creates a new empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the cursor
    pub fn set_mouse_position(&mut self, position: Vec2) {
        self.mouse.position = position;
    }

    /// Records a button press edge
    pub fn press(&mut self, button: MouseButton) {
        let state = self.mouse.buttons.get_mut(button);
        *state = state.press();
    }

    /// Records a button release edge
    pub fn release(&mut self, button: MouseButton) {
        let state = self.mouse.buttons.get_mut(button);
        *state = state.release();
    }

    /// Records a touch update, keeping `Began` if the touch started this frame
    pub fn set_touch(&mut self, id: u64, position: Vec2, phase: TouchPhase) {
        let phase = match self.touches.get(&id) {
            Some(existing) if existing.phase == TouchPhase::Began && phase == TouchPhase::Moved => {
                TouchPhase::Began
            }
            _ => phase,
        };
        self.touches.insert(
            id,
            TouchPoint {
                id,
                position,
                phase,
            },
        );
    }

    /// Advance all edge states for next frame
    ///
    /// Ended and canceled touches are dropped; the rest become stationary
    /// until the platform reports them again.
    pub fn advance_frame(&mut self) {
        let buttons = &mut self.mouse.buttons;
        buttons.left = buttons.left.advance();
        buttons.right = buttons.right.advance();
        buttons.middle = buttons.middle.advance();

        self.touches.retain(|_, touch| !touch.phase.is_terminal());
        for touch in self.touches.values_mut() {
            touch.phase = TouchPhase::Stationary;
        }
    }
}

impl InputSource for InputState {
    fn mouse_button_down(&self, button: MouseButton) -> bool {
        self.mouse.buttons.get(button).is_just_pressed()
    }

    fn mouse_button_up(&self, button: MouseButton) -> bool {
        self.mouse.buttons.get(button).is_just_released()
    }

    fn mouse_button_held(&self, button: MouseButton) -> bool {
        self.mouse.buttons.get(button).is_down()
    }

    fn mouse_position(&self) -> Vec2 {
        self.mouse.position
    }

    fn touch_count(&self) -> usize {
        self.touches.len()
    }

    fn touch(&self, index: usize) -> Option<TouchPoint> {
        self.touches.get_index(index).map(|(_, touch)| *touch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_edges_advance_to_steady_states() {
        let mut state = InputState::new();
        state.press(MouseButton::Left);
        assert!(state.mouse_button_down(MouseButton::Left));
        assert!(state.mouse_button_held(MouseButton::Left));

        state.advance_frame();
        assert!(!state.mouse_button_down(MouseButton::Left));
        assert!(state.mouse_button_held(MouseButton::Left));

        state.release(MouseButton::Left);
        assert!(state.mouse_button_up(MouseButton::Left));
        assert!(!state.mouse_button_held(MouseButton::Left));

        state.advance_frame();
        assert_eq!(state.mouse.buttons.left, ButtonState::Released);
    }

    #[test]
    fn test_press_and_release_in_one_frame_keeps_both_edges() {
        let mut state = InputState::new();
        state.press(MouseButton::Left);
        state.release(MouseButton::Left);
        assert_eq!(state.mouse.buttons.left, ButtonState::Tapped);
        assert!(state.mouse_button_down(MouseButton::Left));
        assert!(state.mouse_button_up(MouseButton::Left));
        assert!(!state.mouse_button_held(MouseButton::Left));

        state.advance_frame();
        assert_eq!(state.mouse.buttons.left, ButtonState::Released);
        assert!(!state.mouse_button_down(MouseButton::Left));
        assert!(!state.mouse_button_up(MouseButton::Left));
    }

    #[test]
    fn test_touch_lifecycle() {
        let mut state = InputState::new();
        state.set_touch(7, Vec2::new(1.0, 2.0), TouchPhase::Began);
        // A move in the same frame keeps the began edge
        state.set_touch(7, Vec2::new(3.0, 4.0), TouchPhase::Moved);
        assert_eq!(state.touch(0).map(|t| t.phase), Some(TouchPhase::Began));
        assert_eq!(state.touch(0).map(|t| t.position), Some(Vec2::new(3.0, 4.0)));

        state.advance_frame();
        assert_eq!(state.touch(0).map(|t| t.phase), Some(TouchPhase::Stationary));

        state.set_touch(7, Vec2::new(3.0, 4.0), TouchPhase::Ended);
        assert_eq!(state.touch_count(), 1);
        state.advance_frame();
        assert_eq!(state.touch_count(), 0);
        assert!(state.touch(0).is_none());
    }
}
