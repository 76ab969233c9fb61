//! Numeric entry field
//!
//! A bounded decimal accumulator bound to one cursor position on the
//! display. The field is polled once per tick with whatever key was read
//! that tick; it finishes by yielding a [`NavigationSignal`].
//!
//! Key handling:
//!
//! | Key     | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | digit   | appended if the result stays `<= max` and is nonzero       |
//! | `*`     | reset a nonzero value to 0, or yield `Cancel` when empty   |
//! | `#`     | yield `Value(current)`                                     |
//! | `A`-`D` | yield `JumpToScreen`, dropping anything typed              |
//!
//! Rejected digits are ignored without feedback.

use core::task::Poll;

use crate::input::Key;
use crate::traits::display::{decimal_width, CharDisplay, DisplayExt};
use crate::ui::Screen;

/// Outcome of a finished entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavigationSignal {
    /// Confirmed value
    Value(u16),
    /// Operator asked for a specific screen
    JumpToScreen(Screen),
    /// Clear pressed on an empty field
    Cancel,
}

/// Entry progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EntryState {
    /// Nothing typed in this edit yet
    Idle,
    /// At least one digit accepted
    Editing,
}

/// Bounded numeric entry tied to one display position
#[derive(Debug, Clone)]
pub struct EntryField {
    col: u8,
    row: u8,
    max: u16,
    value: u16,
    /// Characters currently echoed at the field position
    echoed: u8,
    echo: bool,
    state: EntryState,
}

impl EntryField {
    /// Start an echoing field at `(col, row)`
    ///
    /// The field starts out holding `initial` (clamped to `max`), drawn
    /// immediately. Digits append to it; `*` starts over from 0.
    pub fn begin<D: CharDisplay + ?Sized>(
        display: &mut D,
        col: u8,
        row: u8,
        initial: u16,
        max: u16,
    ) -> Self {
        let value = initial.min(max);
        display.number_at(col, row, u32::from(value));
        Self {
            col,
            row,
            max,
            value,
            echoed: decimal_width(u32::from(value)),
            echo: true,
            state: EntryState::Idle,
        }
    }

    /// A non-echoing field that accepts no digits
    ///
    /// Only confirm, clear and jump keys have an effect, so it works as a
    /// prompt for read-only pages.
    pub fn prompt() -> Self {
        Self {
            col: 0,
            row: 0,
            max: 0,
            value: 0,
            echoed: 0,
            echo: false,
            state: EntryState::Idle,
        }
    }

    /// Current accumulated value
    pub fn value(&self) -> u16 {
        self.value
    }

    /// Inclusive upper bound
    pub fn max(&self) -> u16 {
        self.max
    }

    /// Current entry state
    pub fn state(&self) -> EntryState {
        self.state
    }

    /// Feed one polling tick
    ///
    /// `key` is the key read this tick, or `None` when nothing was pressed.
    pub fn poll<D: CharDisplay + ?Sized>(
        &mut self,
        key: Option<Key>,
        display: &mut D,
    ) -> Poll<NavigationSignal> {
        let Some(key) = key else {
            return Poll::Pending;
        };

        match key {
            Key::Jump(screen) => Poll::Ready(NavigationSignal::JumpToScreen(screen)),
            Key::Confirm => Poll::Ready(NavigationSignal::Value(self.value)),
            Key::Clear if self.value == 0 => Poll::Ready(NavigationSignal::Cancel),
            Key::Clear => {
                self.reset(display);
                Poll::Pending
            }
            Key::Digit(digit) => {
                self.push_digit(digit, display);
                Poll::Pending
            }
        }
    }

    /// Append a digit if the result stays within bounds
    ///
    /// Returns whether the digit was accepted.
    fn push_digit<D: CharDisplay + ?Sized>(&mut self, digit: u8, display: &mut D) -> bool {
        let candidate = u32::from(self.value) * 10 + u32::from(digit);
        if candidate > u32::from(self.max) || candidate == 0 {
            trace!("digit {} rejected", digit);
            return false;
        }

        if self.echo {
            // Replace the "0" placeholder
            if self.value == 0 {
                self.blank(display);
            }
            display.set_cursor(self.col.saturating_add(self.echoed), self.row);
            display.write_char(char::from(b'0' + digit));
            self.echoed = self.echoed.saturating_add(1);
        }

        // candidate <= max <= u16::MAX
        self.value = candidate as u16;
        self.state = EntryState::Editing;
        true
    }

    /// Drop the accumulated value and redraw the placeholder
    fn reset<D: CharDisplay + ?Sized>(&mut self, display: &mut D) {
        self.value = 0;
        self.state = EntryState::Idle;

        if self.echo {
            self.blank(display);
            display.text_at(self.col, self.row, "0");
            self.echoed = 1;
        }
    }

    /// Erase everything echoed so far
    fn blank<D: CharDisplay + ?Sized>(&mut self, display: &mut D) {
        for i in 0..self.echoed {
            display.text_at(self.col.saturating_add(i), self.row, " ");
        }
        self.echoed = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::GridDisplay;
    use proptest::prelude::*;

    fn feed(field: &mut EntryField, display: &mut GridDisplay, keys: &str) -> Poll<NavigationSignal> {
        let mut result = Poll::Pending;
        for c in keys.chars() {
            result = field.poll(Key::from_char(c), display);
            if result.is_ready() {
                break;
            }
        }
        result
    }

    #[test]
    fn test_digits_accumulate() {
        let mut display = GridDisplay::new();
        let mut field = EntryField::begin(&mut display, 7, 0, 0, 255);

        assert_eq!(
            feed(&mut field, &mut display, "125#"),
            Poll::Ready(NavigationSignal::Value(125))
        );
        assert_eq!(display.line(0), "       125");
    }

    #[test]
    fn test_digit_over_max_rejected() {
        let mut display = GridDisplay::new();
        let mut field = EntryField::begin(&mut display, 0, 0, 0, 255);

        assert_eq!(feed(&mut field, &mut display, "259"), Poll::Pending);
        assert_eq!(field.value(), 25);
        assert_eq!(display.line(0), "25");
    }

    #[test]
    fn test_leading_zero_rejected() {
        let mut display = GridDisplay::new();
        let mut field = EntryField::begin(&mut display, 0, 1, 0, 10_000);

        assert_eq!(feed(&mut field, &mut display, "00"), Poll::Pending);
        assert_eq!(field.value(), 0);
        assert_eq!(field.state(), EntryState::Idle);
        assert_eq!(display.line(1), "0");

        assert_eq!(feed(&mut field, &mut display, "100"), Poll::Pending);
        assert_eq!(field.value(), 100);
        assert_eq!(display.line(1), "100");
    }

    #[test]
    fn test_confirm_zero() {
        let mut display = GridDisplay::new();
        let mut field = EntryField::begin(&mut display, 0, 0, 0, 255);
        assert_eq!(
            feed(&mut field, &mut display, "#"),
            Poll::Ready(NavigationSignal::Value(0))
        );
    }

    #[test]
    fn test_clear_resets_then_cancels() {
        let mut display = GridDisplay::new();
        let mut field = EntryField::begin(&mut display, 7, 1, 0, 10_000);

        assert_eq!(feed(&mut field, &mut display, "4321*"), Poll::Pending);
        assert_eq!(field.value(), 0);
        assert_eq!(field.state(), EntryState::Idle);
        assert_eq!(display.line(1), "       0");

        assert_eq!(
            feed(&mut field, &mut display, "*"),
            Poll::Ready(NavigationSignal::Cancel)
        );
    }

    #[test]
    fn test_jump_discards_entry() {
        let mut display = GridDisplay::new();
        let mut field = EntryField::begin(&mut display, 0, 0, 0, 5_000);

        assert_eq!(
            feed(&mut field, &mut display, "12C"),
            Poll::Ready(NavigationSignal::JumpToScreen(Screen::Acceleration))
        );
    }

    #[test]
    fn test_prefilled_value_kept_on_confirm() {
        let mut display = GridDisplay::new();
        let mut field = EntryField::begin(&mut display, 7, 0, 25, 255);
        assert_eq!(display.line(0), "       25");

        assert_eq!(
            feed(&mut field, &mut display, "#"),
            Poll::Ready(NavigationSignal::Value(25))
        );
    }

    #[test]
    fn test_prefilled_value_rejects_overflowing_digit() {
        let mut display = GridDisplay::new();
        let mut field = EntryField::begin(&mut display, 7, 0, 25, 255);

        assert_eq!(feed(&mut field, &mut display, "9"), Poll::Pending);
        assert_eq!(field.value(), 25);
        assert_eq!(field.state(), EntryState::Idle);
        assert_eq!(display.line(0), "       25");
    }

    #[test]
    fn test_digits_append_to_prefilled_value() {
        let mut display = GridDisplay::new();
        let mut field = EntryField::begin(&mut display, 7, 0, 3, 255);

        assert_eq!(
            feed(&mut field, &mut display, "5#"),
            Poll::Ready(NavigationSignal::Value(35))
        );
        assert_eq!(display.line(0), "       35");
    }

    #[test]
    fn test_clear_then_retype_prefilled_value() {
        let mut display = GridDisplay::new();
        let mut field = EntryField::begin(&mut display, 7, 0, 500, 5_000);

        assert_eq!(
            feed(&mut field, &mut display, "*800#"),
            Poll::Ready(NavigationSignal::Value(800))
        );
        assert_eq!(display.line(0), "       800");
    }

    #[test]
    fn test_clear_prefilled_blanks_all_digits() {
        let mut display = GridDisplay::new();
        let mut field = EntryField::begin(&mut display, 0, 0, 4_000, 5_000);

        assert_eq!(feed(&mut field, &mut display, "*"), Poll::Pending);
        assert_eq!(display.line(0), "0");
    }

    #[test]
    fn test_initial_clamped_to_max() {
        let mut display = GridDisplay::new();
        let field = EntryField::begin(&mut display, 0, 0, 300, 255);
        assert_eq!(field.value(), 255);
    }

    #[test]
    fn test_no_key_is_noop() {
        let mut display = GridDisplay::new();
        let mut field = EntryField::begin(&mut display, 0, 0, 12, 255);
        for _ in 0..10 {
            assert_eq!(field.poll(None, &mut display), Poll::Pending);
        }
        assert_eq!(field.value(), 12);
    }

    #[test]
    fn test_prompt_ignores_digits() {
        let mut display = GridDisplay::new();
        let mut field = EntryField::prompt();

        assert_eq!(feed(&mut field, &mut display, "123"), Poll::Pending);
        assert_eq!(display.line(0), "");
        assert_eq!(
            feed(&mut field, &mut display, "#"),
            Poll::Ready(NavigationSignal::Value(0))
        );
    }

    #[test]
    fn test_direction_field_accepts_only_one() {
        let mut display = GridDisplay::new();
        let mut field = EntryField::begin(&mut display, 0, 0, 0, 1);

        assert_eq!(
            feed(&mut field, &mut display, "0211#"),
            Poll::Ready(NavigationSignal::Value(1))
        );
    }

    proptest! {
        #[test]
        fn prop_digit_sequence_is_base10(value in 1u16..=10_000) {
            let mut display = GridDisplay::new();
            let mut field = EntryField::begin(&mut display, 0, 0, 0, 10_000);

            let keys = format!("{}#", value);
            prop_assert_eq!(
                feed(&mut field, &mut display, &keys),
                Poll::Ready(NavigationSignal::Value(value))
            );
        }

        #[test]
        fn prop_value_never_exceeds_max(
            max in 0u16..=10_000,
            digits in proptest::collection::vec(0u8..=9, 0..12),
        ) {
            let mut display = GridDisplay::new();
            let mut field = EntryField::begin(&mut display, 0, 0, 0, max);

            for digit in digits {
                let before = field.value();
                prop_assert_eq!(field.poll(Some(Key::Digit(digit)), &mut display), Poll::Pending);

                let candidate = u32::from(before) * 10 + u32::from(digit);
                if candidate > u32::from(max) || candidate == 0 {
                    prop_assert_eq!(field.value(), before);
                } else {
                    prop_assert_eq!(u32::from(field.value()), candidate);
                }
                prop_assert!(field.value() <= max);
            }
        }

        #[test]
        fn prop_jump_wins_in_any_state(
            digits in proptest::collection::vec(0u8..=9, 0..6),
            target in 0u8..4,
        ) {
            let mut display = GridDisplay::new();
            let mut field = EntryField::begin(&mut display, 0, 0, 0, 10_000);
            for digit in digits {
                let _ = field.poll(Some(Key::Digit(digit)), &mut display);
            }

            let screen = Screen::from_index(target).unwrap();
            prop_assert_eq!(
                field.poll(Some(Key::Jump(screen)), &mut display),
                Poll::Ready(NavigationSignal::JumpToScreen(screen))
            );
        }
    }
}
