//! Keypad input handling
//!
//! Turns raw key presses into navigation signals through a bounded
//! numeric entry field.

pub mod entry;
pub mod key;

pub use entry::{EntryField, EntryState, NavigationSignal};
pub use key::{Key, KEYMAP};
