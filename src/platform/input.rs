//! Keyboard state

use std::collections::HashSet;

/// Logical movement keys polled by the net
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code` to a movement key
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Key::Left),
            "ArrowRight" | "KeyD" => Some(Key::Right),
            _ => None,
        }
    }
}

/// Source of pressed-key state
pub trait InputProvider {
    fn is_pressed(&self, key: Key) -> bool;
}

/// Tracks which keys are currently held, fed by key-down/key-up events
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<Key>,
}

impl KeyState {
    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Apply a raw key event. Unmapped codes are ignored.
    pub fn set_code(&mut self, code: &str, pressed: bool) {
        if let Some(key) = Key::from_code(code) {
            if pressed {
                self.press(key);
            } else {
                self.release(key);
            }
        }
    }
}

impl InputProvider for KeyState {
    fn is_pressed(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}
