//! HD44780 character LCD driver
//!
//! Drives a 16x2 HD44780-compatible module over the 4-bit parallel bus
//! (RS, EN, D4-D7). R/W is assumed tied low, so the busy flag is never
//! read; every command is followed by a fixed delay instead.
//!
//! Pin errors are dropped: the display is the operator's only output, so
//! there is nowhere to report them.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use stripcut_core::traits::display::{CharDisplay, DISPLAY_COLS, DISPLAY_ROWS};

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE: u8 = 0x04;
const CMD_DISPLAY_CONTROL: u8 = 0x08;
const CMD_FUNCTION_SET: u8 = 0x20;
const CMD_SET_DDRAM: u8 = 0x80;

const ENTRY_INCREMENT: u8 = 0x02;
const DISPLAY_ON: u8 = 0x04;
const BLINK_ON: u8 = 0x01;
const FUNCTION_TWO_LINES: u8 = 0x08;

/// DDRAM address of each row's first column
const ROW_OFFSETS: [u8; 2] = [0x00, 0x40];

/// Execution time of ordinary commands (µs)
const COMMAND_DELAY_US: u32 = 50;

/// Execution time of clear and home (µs)
const CLEAR_DELAY_US: u32 = 2_000;

/// HD44780 on a 4-bit bus
pub struct Hd44780<RS, EN, D, DELAY> {
    rs: RS,
    en: EN,
    data: [D; 4],
    delay: DELAY,
    /// Current display-control flags
    control: u8,
}

impl<RS, EN, D, DELAY> Hd44780<RS, EN, D, DELAY>
where
    RS: OutputPin,
    EN: OutputPin,
    D: OutputPin,
    DELAY: DelayNs,
{
    /// Take the pins and run the power-on initialization
    ///
    /// `data` is D4..D7 in order.
    pub fn new(rs: RS, en: EN, data: [D; 4], delay: DELAY) -> Self {
        let mut lcd = Self {
            rs,
            en,
            data,
            delay,
            control: DISPLAY_ON,
        };
        lcd.init();
        lcd
    }

    fn init(&mut self) {
        let _ = self.rs.set_low();
        let _ = self.en.set_low();
        self.delay.delay_ms(50);

        // Reset into 8-bit mode three times, then switch to 4-bit
        self.write_nibble(0x03);
        self.delay.delay_us(4_500);
        self.write_nibble(0x03);
        self.delay.delay_us(4_500);
        self.write_nibble(0x03);
        self.delay.delay_us(150);
        self.write_nibble(0x02);

        self.command(CMD_FUNCTION_SET | FUNCTION_TWO_LINES);
        self.command(CMD_DISPLAY_CONTROL | self.control);
        self.command(CMD_CLEAR);
        self.delay.delay_us(CLEAR_DELAY_US);
        self.command(CMD_ENTRY_MODE | ENTRY_INCREMENT);
    }

    fn pulse_enable(&mut self) {
        let _ = self.en.set_high();
        self.delay.delay_us(1);
        let _ = self.en.set_low();
        self.delay.delay_us(COMMAND_DELAY_US);
    }

    fn write_nibble(&mut self, nibble: u8) {
        for (bit, pin) in self.data.iter_mut().enumerate() {
            let _ = if nibble & (1 << bit) != 0 {
                pin.set_high()
            } else {
                pin.set_low()
            };
        }
        self.pulse_enable();
    }

    fn write_byte(&mut self, value: u8, is_data: bool) {
        let _ = if is_data {
            self.rs.set_high()
        } else {
            self.rs.set_low()
        };
        self.write_nibble(value >> 4);
        self.write_nibble(value & 0x0F);
    }

    fn command(&mut self, cmd: u8) {
        self.write_byte(cmd, false);
    }

    /// Release the pins and delay
    pub fn release(self) -> (RS, EN, [D; 4], DELAY) {
        (self.rs, self.en, self.data, self.delay)
    }
}

impl<RS, EN, D, DELAY> CharDisplay for Hd44780<RS, EN, D, DELAY>
where
    RS: OutputPin,
    EN: OutputPin,
    D: OutputPin,
    DELAY: DelayNs,
{
    fn clear(&mut self) {
        self.command(CMD_CLEAR);
        self.delay.delay_us(CLEAR_DELAY_US);
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        let row = row.min(DISPLAY_ROWS - 1);
        let col = col.min(DISPLAY_COLS - 1);
        self.command(CMD_SET_DDRAM | (ROW_OFFSETS[usize::from(row)] + col));
    }

    fn write_str(&mut self, text: &str) {
        for c in text.chars() {
            // The character ROM only matches ASCII
            let byte = if c.is_ascii() { c as u8 } else { b'?' };
            self.write_byte(byte, true);
        }
    }

    fn set_blink(&mut self, enabled: bool) {
        if enabled {
            self.control |= BLINK_ON;
        } else {
            self.control &= !BLINK_ON;
        }
        self.command(CMD_DISPLAY_CONTROL | self.control);
    }
}
