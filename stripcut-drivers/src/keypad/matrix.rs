//! 4x4 matrix keypad
//!
//! Rows are driven low one at a time while the pulled-up columns are
//! read; a low column means the key at that crossing is held. A key is
//! reported once, after the scan result has been stable for the debounce
//! time. Releases are debounced the same way but not reported.

use embedded_hal::digital::{InputPin, OutputPin};
use stripcut_core::input::Key;
use stripcut_core::traits::Keypad;

/// Matrix position of a held key
type Position = (usize, usize);

/// Debounced 4x4 matrix keypad
pub struct MatrixKeypad<R, C> {
    rows: [R; 4],
    cols: [C; 4],
    debounce_ms: u32,
    /// Latest raw scan result
    candidate: Option<Position>,
    /// When `candidate` last changed
    since_ms: u32,
    /// Last debounced state
    stable: Option<Position>,
}

impl<R: OutputPin, C: InputPin> MatrixKeypad<R, C> {
    /// Take the row outputs and column inputs
    ///
    /// Columns must have pull-ups. All rows are parked high.
    pub fn new(mut rows: [R; 4], cols: [C; 4], debounce_ms: u16) -> Self {
        for row in rows.iter_mut() {
            let _ = row.set_high();
        }
        Self {
            rows,
            cols,
            debounce_ms: u32::from(debounce_ms),
            candidate: None,
            since_ms: 0,
            stable: None,
        }
    }

    /// First held key in row-major order
    fn scan(&mut self) -> Option<Position> {
        let mut found = None;
        for (r, row) in self.rows.iter_mut().enumerate() {
            let _ = row.set_low();
            if found.is_none() {
                found = self
                    .cols
                    .iter_mut()
                    .position(|col| col.is_low().unwrap_or(false))
                    .map(|c| (r, c));
            }
            let _ = row.set_high();
        }
        found
    }
}

impl<R: OutputPin, C: InputPin> Keypad for MatrixKeypad<R, C> {
    fn poll_key(&mut self, now_ms: u32) -> Option<Key> {
        let raw = self.scan();
        if raw != self.candidate {
            self.candidate = raw;
            self.since_ms = now_ms;
            return None;
        }
        if raw == self.stable || now_ms.wrapping_sub(self.since_ms) < self.debounce_ms {
            return None;
        }

        self.stable = raw;
        raw.and_then(|(row, col)| Key::at(row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{ColPin, MatrixState, RowPin};
    use core::cell::RefCell;
    use std::rc::Rc;
    use stripcut_core::ui::Screen;

    fn keypad(debounce_ms: u16) -> (MatrixKeypad<RowPin, ColPin>, Rc<RefCell<MatrixState>>) {
        let matrix = Rc::new(RefCell::new(MatrixState::default()));
        let rows = [0, 1, 2, 3].map(|r| RowPin::new(&matrix, r));
        let cols = [0, 1, 2, 3].map(|c| ColPin::new(&matrix, c));
        (MatrixKeypad::new(rows, cols, debounce_ms), matrix)
    }

    #[test]
    fn test_press_reported_once_after_debounce() {
        let (mut keypad, matrix) = keypad(100);
        matrix.borrow_mut().pressed = Some((0, 1));

        assert_eq!(keypad.poll_key(0), None);
        assert_eq!(keypad.poll_key(50), None);
        assert_eq!(keypad.poll_key(100), Some(Key::Digit(2)));
        assert_eq!(keypad.poll_key(150), None);
        assert_eq!(keypad.poll_key(400), None);
    }

    #[test]
    fn test_bounce_restarts_debounce() {
        let (mut keypad, matrix) = keypad(100);

        matrix.borrow_mut().pressed = Some((3, 2));
        assert_eq!(keypad.poll_key(0), None);
        matrix.borrow_mut().pressed = None;
        assert_eq!(keypad.poll_key(40), None);
        matrix.borrow_mut().pressed = Some((3, 2));
        assert_eq!(keypad.poll_key(60), None);

        assert_eq!(keypad.poll_key(120), None);
        assert_eq!(keypad.poll_key(160), Some(Key::Confirm));
    }

    #[test]
    fn test_repeat_press_after_release() {
        let (mut keypad, matrix) = keypad(10);

        matrix.borrow_mut().pressed = Some((2, 3));
        keypad.poll_key(0);
        assert_eq!(keypad.poll_key(10), Some(Key::Jump(Screen::Acceleration)));

        matrix.borrow_mut().pressed = None;
        keypad.poll_key(20);
        assert_eq!(keypad.poll_key(30), None);

        matrix.borrow_mut().pressed = Some((2, 3));
        keypad.poll_key(40);
        assert_eq!(keypad.poll_key(50), Some(Key::Jump(Screen::Acceleration)));
    }

    #[test]
    fn test_every_position_decodes() {
        for row in 0..4 {
            for col in 0..4 {
                let (mut keypad, matrix) = keypad(0);
                matrix.borrow_mut().pressed = Some((row, col));
                keypad.poll_key(0);
                assert_eq!(keypad.poll_key(1), Key::at(row, col));
            }
        }
    }
}
