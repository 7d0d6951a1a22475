use serde::{Deserialize, Serialize};

/// Logical buttons the player character responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    Jump,
    Left,
    Right,
}

impl Button {
    /// Map a host key code (DOM `KeyboardEvent.code` naming) to a button.
    ///
    /// Arrows, WASD and Space are bound; everything else is ignored.
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" | "KeyW" | "Space" => Some(Button::Jump),
            "ArrowLeft" | "KeyA" => Some(Button::Left),
            "ArrowRight" | "KeyD" => Some(Button::Right),
            _ => None,
        }
    }
}

/// Held state of each logical button, written by the host's key events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub jump: bool,
    pub left: bool,
    pub right: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press or release. No debouncing: the last write wins.
    pub fn set(&mut self, button: Button, pressed: bool) {
        match button {
            Button::Jump => self.jump = pressed,
            Button::Left => self.left = pressed,
            Button::Right => self.right = pressed,
        }
    }

    pub fn is_down(&self, button: Button) -> bool {
        match button {
            Button::Jump => self.jump,
            Button::Left => self.left,
            Button::Right => self.right,
        }
    }

    /// Whether either horizontal direction is held.
    pub fn is_walking(&self) -> bool {
        self.left || self.right
    }
}
