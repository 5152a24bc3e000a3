//! Per-frame input snapshot filled in by the host.

use std::collections::HashSet;

use gloam_math::Vector2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    E,
    K,
    L,
    Space,
    LeftShift,
    RightShift,
    LeftCtrl,
    RightCtrl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
}

/// Keys held, keys pressed this frame, and this frame's mouse motion.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Key>,
    pressed: HashSet<Key>,
    buttons: HashSet<MouseButton>,
    /// Mouse movement in axis units since the last frame.
    pub mouse_delta: Vector2,
    /// Scroll wheel movement since the last frame.
    pub scroll: f64,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key went down this frame.
    pub fn press(&mut self, key: Key) {
        if self.held.insert(key) {
            self.pressed.insert(key);
        }
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn set_button(&mut self, button: MouseButton, down: bool) {
        if down {
            self.buttons.insert(button);
        } else {
            self.buttons.remove(&button);
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn is_button_held(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button)
    }

    pub fn shift(&self) -> bool {
        self.is_held(Key::LeftShift) || self.is_held(Key::RightShift)
    }

    pub fn ctrl(&self) -> bool {
        self.is_held(Key::LeftCtrl) || self.is_held(Key::RightCtrl)
    }

    /// Raw WASD axes: x is A/D, y is S/W, each in {-1, 0, 1}.
    pub fn move_axis(&self) -> Vector2 {
        let mut axis = Vector2::ZERO;
        if self.is_held(Key::A) {
            axis.x -= 1.0;
        }
        if self.is_held(Key::D) {
            axis.x += 1.0;
        }
        if self.is_held(Key::S) {
            axis.y -= 1.0;
        }
        if self.is_held(Key::W) {
            axis.y += 1.0;
        }
        axis
    }

    /// Clear per-frame state. Held keys and buttons persist.
    pub fn end_frame(&mut self) {
        self.pressed.clear();
        self.mouse_delta = Vector2::ZERO;
        self.scroll = 0.0;
    }
}
