//! Input handling for the candlescape viewer.
//!
//! Converts raw winit events into [`InputAction`]s and tracks which movement
//! keys are held so the camera can apply them once per frame.

use candlescape_render::{Movement, MovementKeys};
use winit::{
    event::{ElementState, MouseButton, MouseScrollDelta},
    keyboard::KeyCode,
};

/// Pixels per wheel line when the config does not say otherwise.
pub const DEFAULT_SCROLL_LINE_PIXELS: f32 = 20.0;

/// Semantic actions that can be triggered by user input.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    /// Exit the application.
    Exit,
    /// Return the camera to its initial viewpoint.
    ResetCamera,
    /// Start a drag operation (left mouse pressed).
    StartDrag,
    /// End a drag operation (left mouse released).
    EndDrag,
    /// Rotate the camera by a cursor delta in screen pixels.
    Drag { dx: f32, dy: f32 },
    /// Dolly the camera by a pixel-equivalent scroll delta.
    Scroll { delta: f32 },
}

/// Maps a physical key to the camera movement it drives.
pub fn movement_for_key(code: KeyCode) -> Option<Movement> {
    match code {
        KeyCode::KeyW => Some(Movement::Forward),
        KeyCode::KeyS => Some(Movement::Backward),
        KeyCode::KeyA | KeyCode::ArrowLeft => Some(Movement::StrafeLeft),
        KeyCode::KeyD | KeyCode::ArrowRight => Some(Movement::StrafeRight),
        KeyCode::KeyE | KeyCode::ArrowUp => Some(Movement::Up),
        KeyCode::KeyQ | KeyCode::ArrowDown => Some(Movement::Down),
        _ => None,
    }
}

/// Tracks mouse and keyboard state between events.
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Whether the left mouse button is currently pressed.
    pub mouse_pressed: bool,
    /// Last known cursor position in screen coordinates.
    pub last_mouse_pos: Option<[f32; 2]>,
    /// Movement keys currently held down.
    pub held: MovementKeys,
    pub scroll_line_pixels: f32,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self::with_scroll_line_pixels(DEFAULT_SCROLL_LINE_PIXELS)
    }

    #[must_use]
    pub fn with_scroll_line_pixels(scroll_line_pixels: f32) -> Self {
        Self {
            mouse_pressed: false,
            last_mouse_pos: None,
            held: MovementKeys::new(),
            scroll_line_pixels,
        }
    }

    /// Handle a keyboard event.
    ///
    /// Movement keys update the held set on both press and release and never
    /// produce an action. Other bindings fire on press only.
    #[must_use]
    pub fn handle_key(&mut self, code: KeyCode, is_pressed: bool) -> Option<InputAction> {
        if let Some(movement) = movement_for_key(code) {
            self.held.set(movement, is_pressed);
            return None;
        }

        if !is_pressed {
            return None;
        }

        match code {
            KeyCode::Escape => Some(InputAction::Exit),
            KeyCode::KeyR => Some(InputAction::ResetCamera),
            _ => None,
        }
    }

    /// Handle a mouse button event.
    #[must_use]
    pub fn handle_mouse_input(
        &mut self,
        state: ElementState,
        button: MouseButton,
    ) -> Option<InputAction> {
        if button != MouseButton::Left {
            return None;
        }

        match state {
            ElementState::Pressed => {
                self.mouse_pressed = true;
                Some(InputAction::StartDrag)
            }
            ElementState::Released => {
                self.mouse_pressed = false;
                Some(InputAction::EndDrag)
            }
        }
    }

    /// Handle cursor movement.
    ///
    /// While dragging, returns the delta since the previous cursor position.
    /// The first movement after the cursor enters only records the position.
    #[must_use]
    pub fn handle_cursor_moved(&mut self, position: (f64, f64)) -> Option<InputAction> {
        let current = [position.0 as f32, position.1 as f32];
        let previous = self.last_mouse_pos.replace(current);

        if !self.mouse_pressed {
            return None;
        }

        previous.map(|last| InputAction::Drag {
            dx: current[0] - last[0],
            dy: current[1] - last[1],
        })
    }

    /// Handle the cursor leaving the window.
    pub fn handle_cursor_left(&mut self) {
        self.last_mouse_pos = None;
    }

    /// Handle a mouse wheel event.
    ///
    /// Line deltas are converted to pixels; zero deltas are ignored.
    #[must_use]
    pub fn handle_mouse_wheel(&self, delta: MouseScrollDelta) -> Option<InputAction> {
        let delta = match delta {
            MouseScrollDelta::LineDelta(_, y) => y * self.scroll_line_pixels,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
        };

        (delta != 0.0).then_some(InputAction::Scroll { delta })
    }

    /// Forget held keys and drag state, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
        self.mouse_pressed = false;
    }

    pub fn movement_keys(&self) -> &MovementKeys {
        &self.held
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_key_bindings() {
        let mut handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(KeyCode::Escape, true),
            Some(InputAction::Exit)
        );
        assert_eq!(
            handler.handle_key(KeyCode::KeyR, true),
            Some(InputAction::ResetCamera)
        );
        assert_eq!(handler.handle_key(KeyCode::KeyR, false), None);
        assert_eq!(handler.handle_key(KeyCode::KeyZ, true), None);
    }

    #[test]
    fn test_movement_keys_held_until_release() {
        let mut handler = InputHandler::new();

        assert_eq!(handler.handle_key(KeyCode::KeyW, true), None);
        assert_eq!(handler.handle_key(KeyCode::ArrowLeft, true), None);
        assert!(handler.movement_keys().contains(Movement::Forward));
        assert!(handler.movement_keys().contains(Movement::StrafeLeft));

        // Key repeat is idempotent
        let _ = handler.handle_key(KeyCode::KeyW, true);
        assert!(handler.movement_keys().contains(Movement::Forward));

        let _ = handler.handle_key(KeyCode::KeyW, false);
        assert!(!handler.movement_keys().contains(Movement::Forward));
        assert!(handler.movement_keys().contains(Movement::StrafeLeft));
    }

    #[test]
    fn test_movement_key_mapping() {
        assert_eq!(movement_for_key(KeyCode::KeyS), Some(Movement::Backward));
        assert_eq!(movement_for_key(KeyCode::KeyD), Some(Movement::StrafeRight));
        assert_eq!(movement_for_key(KeyCode::ArrowRight), Some(Movement::StrafeRight));
        assert_eq!(movement_for_key(KeyCode::KeyE), Some(Movement::Up));
        assert_eq!(movement_for_key(KeyCode::ArrowUp), Some(Movement::Up));
        assert_eq!(movement_for_key(KeyCode::KeyQ), Some(Movement::Down));
        assert_eq!(movement_for_key(KeyCode::ArrowDown), Some(Movement::Down));
        assert_eq!(movement_for_key(KeyCode::Escape), None);
    }

    #[test]
    fn test_mouse_drag_start_end() {
        let mut handler = InputHandler::new();

        let action = handler.handle_mouse_input(ElementState::Pressed, MouseButton::Left);
        assert_eq!(action, Some(InputAction::StartDrag));
        assert!(handler.mouse_pressed);

        let action = handler.handle_mouse_input(ElementState::Released, MouseButton::Left);
        assert_eq!(action, Some(InputAction::EndDrag));
        assert!(!handler.mouse_pressed);

        let action = handler.handle_mouse_input(ElementState::Pressed, MouseButton::Right);
        assert!(action.is_none());
        assert!(!handler.mouse_pressed);
    }

    #[test]
    fn test_cursor_movement_dragging() {
        let mut handler = InputHandler::new();
        handler.mouse_pressed = true;

        // First movement just sets position
        let action = handler.handle_cursor_moved((100.0, 100.0));
        assert!(action.is_none());

        let action = handler.handle_cursor_moved((110.0, 95.0));
        assert_eq!(action, Some(InputAction::Drag { dx: 10.0, dy: -5.0 }));
    }

    #[test]
    fn test_cursor_movement_not_dragging() {
        let mut handler = InputHandler::new();
        assert!(handler.handle_cursor_moved((100.0, 200.0)).is_none());
        assert_eq!(handler.last_mouse_pos, Some([100.0, 200.0]));

        // Pressing afterwards drags from the tracked position
        let _ = handler.handle_mouse_input(ElementState::Pressed, MouseButton::Left);
        let action = handler.handle_cursor_moved((103.0, 204.0));
        assert_eq!(action, Some(InputAction::Drag { dx: 3.0, dy: 4.0 }));
    }

    #[test]
    fn test_mouse_wheel() {
        let handler = InputHandler::with_scroll_line_pixels(10.0);

        let action = handler.handle_mouse_wheel(MouseScrollDelta::LineDelta(0.0, -2.0));
        assert_eq!(action, Some(InputAction::Scroll { delta: -20.0 }));

        let action =
            handler.handle_mouse_wheel(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 7.5)));
        assert_eq!(action, Some(InputAction::Scroll { delta: 7.5 }));

        let action = handler.handle_mouse_wheel(MouseScrollDelta::LineDelta(3.0, 0.0));
        assert!(action.is_none());
    }

    #[test]
    fn test_release_all() {
        let mut handler = InputHandler::new();
        let _ = handler.handle_key(KeyCode::KeyW, true);
        let _ = handler.handle_mouse_input(ElementState::Pressed, MouseButton::Left);

        handler.release_all();
        assert!(handler.movement_keys().is_empty());
        assert!(!handler.mouse_pressed);
    }
}
