//! Keypad key classes

use crate::ui::Screen;

/// Legend of the 4×4 matrix keypad, row-major
pub const KEYMAP: [[char; 4]; 4] = [
    ['1', '2', '3', 'A'],
    ['4', '5', '6', 'B'],
    ['7', '8', '9', 'C'],
    ['*', '0', '#', 'D'],
];

/// A decoded key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    /// Digit 0-9
    Digit(u8),
    /// `#`: accept the current value
    Confirm,
    /// `*`: clear the value, or cancel when already empty
    Clear,
    /// `A`-`D`: go straight to a screen
    Jump(Screen),
}

impl Key {
    /// Decode a keypad legend character
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(Key::Digit(c as u8 - b'0')),
            '#' => Some(Key::Confirm),
            '*' => Some(Key::Clear),
            'A'..='D' => Screen::from_index(c as u8 - b'A').map(Key::Jump),
            _ => None,
        }
    }

    /// Legend character for this key
    pub fn to_char(self) -> char {
        match self {
            Key::Digit(d) => char::from(b'0' + d.min(9)),
            Key::Confirm => '#',
            Key::Clear => '*',
            Key::Jump(screen) => char::from(b'A' + screen.index()),
        }
    }

    /// Key at a matrix position
    pub fn at(row: usize, col: usize) -> Option<Self> {
        KEYMAP
            .get(row)
            .and_then(|r| r.get(col))
            .and_then(|&c| Key::from_char(c))
    }
}
