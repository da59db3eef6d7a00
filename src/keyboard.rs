use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};

pub const KEY_COUNT: usize = 16;

/// Host key bytes of the conventional QWERTY layout, indexed by logical key.
///
/// 1 2 3 C       1 2 3 4
/// 4 5 6 D  <-   q w e r
/// 7 8 9 E       a s d f
/// A 0 B F       z x c v
pub const SCAN_CODES: [u8; KEY_COUNT] = [
    b'x', b'1', b'2', b'3', b'q', b'w', b'e', b'a', b's', b'd', b'z', b'c', b'4', b'r', b'f', b'v',
];

/// Logical key index for a host key byte of the conventional layout.
pub fn key_for_scan_code(code: u8) -> Option<u8> {
    SCAN_CODES
        .iter()
        .position(|c| *c == code.to_ascii_lowercase())
        .map(|idx| idx as u8)
}

/// The 16-key input latch.
///
/// Written by the input activity, read by the interpreter. Every entry is its
/// own atomic, so a reader never observes a half written update.
pub struct Keyboard {
    pressed_keys: [AtomicBool; KEY_COUNT],
}

impl Keyboard {
    pub fn new() -> Self {
        Self {
            pressed_keys: Default::default(),
        }
    }

    /// Whether the key with the given index is currently down. Indices outside
    /// 0x0 - 0xF are never pressed.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.pressed_keys
            .get(key as usize)
            .map_or(false, |k| k.load(Ordering::Acquire))
    }

    pub fn press_key(&self, key: u8) {
        self.set_key_state(key, true);
    }

    pub fn release_key(&self, key: u8) {
        self.set_key_state(key, false);
    }

    pub fn set_key_state(&self, key: u8, pressed: bool) {
        match self.pressed_keys.get(key as usize) {
            Some(k) => {
                log::debug!("Key {:X} {}", key, if pressed { "pressed" } else { "released" });
                k.store(pressed, Ordering::Release);
            }
            None => log::warn!("Discarding out of range key index: {}", key),
        }
    }

    pub fn clear(&self) {
        for key in &self.pressed_keys {
            key.store(false, Ordering::Release);
        }
    }

    /// Lowest index among the keys that are currently down.
    pub fn first_pressed(&self) -> Option<u8> {
        self.pressed_keys
            .iter()
            .position(|k| k.load(Ordering::Acquire))
            .map(|idx| idx as u8)
    }

    /// Highest index among the keys that are currently down.
    pub fn last_pressed(&self) -> Option<u8> {
        self.pressed_keys
            .iter()
            .rposition(|k| k.load(Ordering::Acquire))
            .map(|idx| idx as u8)
    }
}

impl Default for Keyboard {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Keyboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Keyboard[{}]", self)
    }
}

impl Display for Keyboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for key in &self.pressed_keys {
            write!(f, "{}", if key.load(Ordering::Acquire) { "o" } else { " " })?;
        }

        Ok(())
    }
}
