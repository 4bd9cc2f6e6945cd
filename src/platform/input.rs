//! Keyboard state for the game

use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// What a key does in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Drop,
    Close,
}

impl InputAction {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Space => Some(Self::Drop),
            KeyCode::Escape => Some(Self::Close),
            _ => None,
        }
    }
}

/// Key levels sampled once per frame
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    pub drop_held: bool,
    pub close_requested: bool,
}

impl InputState {
    /// Apply a physical key event; returns the action it mapped to
    pub fn handle_key(&mut self, code: KeyCode, state: ElementState) -> Option<InputAction> {
        let action = InputAction::from_key(code)?;
        let pressed = state == ElementState::Pressed;
        match action {
            InputAction::Drop => self.drop_held = pressed,
            InputAction::Close => self.close_requested |= pressed,
        }
        Some(action)
    }

    /// Release held keys, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.drop_held = false;
    }
}
