//! Keypad trait

use crate::input::Key;

/// Source of debounced key presses
pub trait Keypad {
    /// Return the key pressed since the last poll, if any
    ///
    /// Each physical press is reported once. `now_ms` is the caller's
    /// monotonic clock, used by drivers for debouncing.
    fn poll_key(&mut self, now_ms: u32) -> Option<Key>;
}
