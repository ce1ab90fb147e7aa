//! Live held-key set
//!
//! Key events only flip membership; the games sample "is this key down right
//! now" once per tick. There is no event queue.

use serde::{Deserialize, Serialize};

/// Keys the games listen to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    W,
    A,
    S,
    D,
    Space,
    Shift,
    CapsLock,
    Enter,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value. Unknown keys map to `None`.
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "w" | "W" => Some(Key::W),
            "a" | "A" => Some(Key::A),
            "s" | "S" => Some(Key::S),
            "d" | "D" => Some(Key::D),
            " " | "Spacebar" => Some(Key::Space),
            "Shift" => Some(Key::Shift),
            "CapsLock" => Some(Key::CapsLock),
            "Enter" => Some(Key::Enter),
            _ => None,
        }
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// Set of currently held keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySet {
    bits: u16,
    /// Set when any key (known or not) went down since the last `take_any_pressed`
    any_pressed: bool,
}

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set with the given keys held (tests and scripted input)
    pub fn with(keys: &[Key]) -> Self {
        let mut set = Self::new();
        for &key in keys {
            set.press(key);
        }
        set
    }

    pub fn press(&mut self, key: Key) {
        self.bits |= key.bit();
        self.any_pressed = true;
    }

    pub fn release(&mut self, key: Key) {
        self.bits &= !key.bit();
    }

    /// Feed a DOM key-down; unknown keys still count as "any key"
    pub fn press_dom(&mut self, key: &str) {
        match Key::from_dom(key) {
            Some(k) => self.press(k),
            None => self.any_pressed = true,
        }
    }

    pub fn release_dom(&mut self, key: &str) {
        if let Some(k) = Key::from_dom(key) {
            self.release(k);
        }
    }

    /// Mark that the player clicked (counts as "any key" for start screens)
    pub fn click(&mut self) {
        self.any_pressed = true;
    }

    #[inline]
    pub fn is_down(&self, key: Key) -> bool {
        self.bits & key.bit() != 0
    }

    /// True if any of `keys` is held
    #[inline]
    pub fn any_down(&self, keys: &[Key]) -> bool {
        keys.iter().any(|&k| self.is_down(k))
    }

    /// Whether a key went down since the last call; clears the latch
    pub fn take_any_pressed(&mut self) -> bool {
        std::mem::take(&mut self.any_pressed)
    }

    /// Peek the "any key pressed" latch without clearing it
    pub fn any_pressed(&self) -> bool {
        self.any_pressed
    }

    /// Release everything (window blur)
    pub fn clear(&mut self) {
        self.bits = 0;
    }
}
