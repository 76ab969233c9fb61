//! Character display trait

use core::fmt::Write;

use heapless::String;

/// Columns on the operator display
pub const DISPLAY_COLS: u8 = 16;

/// Rows on the operator display
pub const DISPLAY_ROWS: u8 = 2;

/// Addressable character-grid display
///
/// Writes never fail from the caller's point of view; a driver that can
/// lose a write has nowhere to report it, since the display itself is the
/// only channel to the operator.
pub trait CharDisplay {
    /// Blank the display and home the cursor
    fn clear(&mut self);

    /// Move the cursor
    ///
    /// - `col`: Column (0-based)
    /// - `row`: Row (0-based)
    fn set_cursor(&mut self, col: u8, row: u8);

    /// Write ASCII text at the cursor, advancing it
    fn write_str(&mut self, text: &str);

    /// Enable or disable the blinking cursor block
    fn set_blink(&mut self, enabled: bool);
}

/// Helpers for rendering numbers and positioned text
pub trait DisplayExt: CharDisplay {
    /// Write a single character at the cursor
    fn write_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.write_str(c.encode_utf8(&mut buf));
    }

    /// Write a decimal number at the cursor
    fn write_number(&mut self, value: u32) {
        let mut text: String<10> = String::new();
        // u32::MAX has 10 digits
        let _ = write!(text, "{}", value);
        self.write_str(&text);
    }

    /// Write text at a position
    fn text_at(&mut self, col: u8, row: u8, text: &str) {
        self.set_cursor(col, row);
        self.write_str(text);
    }

    /// Write a decimal number at a position
    fn number_at(&mut self, col: u8, row: u8, value: u32) {
        self.set_cursor(col, row);
        self.write_number(value);
    }
}

// Blanket implementation for all CharDisplay types
impl<T: CharDisplay + ?Sized> DisplayExt for T {}

/// Number of characters `value` occupies in decimal
pub fn decimal_width(value: u32) -> u8 {
    let mut width = 1;
    let mut rest = value / 10;
    while rest > 0 {
        width += 1;
        rest /= 10;
    }
    width
}
