//! Field rendering
//!
//! Every model field is drawn the same way, editor and review alike:
//!
//! ```text
//! 0      7
//! Length:100mm
//! Speed: 500/s
//! Dir:   rev
//! ```
//!
//! The label starts at column 0 and the value at [`VALUE_COL`].

use crate::model::{FieldKind, StripJob};
use crate::traits::display::{CharDisplay, DisplayExt, DISPLAY_COLS};

/// Column where field values start
pub const VALUE_COL: u8 = 7;

/// Column of the job label on the job screen
pub const ID_COL: u8 = DISPLAY_COLS - 1;

/// Label drawn left of a field's value
pub const fn label(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Count => "Strips:",
        FieldKind::Length => "Length:",
        FieldKind::Speed => "Speed:",
        FieldKind::Acceleration => "Accel:",
        FieldKind::Direction => "Dir:",
    }
}

/// Unit suffix drawn after a numeric value
pub const fn unit(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Count | FieldKind::Direction => "",
        FieldKind::Length => "mm",
        FieldKind::Speed => "/s",
        FieldKind::Acceleration => "/s2",
    }
}

/// Write a field value with its unit at the cursor
pub fn write_value<D: CharDisplay + ?Sized>(display: &mut D, kind: FieldKind, value: u16) {
    match kind {
        FieldKind::Direction => display.write_str(if value == 0 { "fwd" } else { "rev" }),
        _ => {
            display.write_number(u32::from(value));
            display.write_str(unit(kind));
        }
    }
}

/// Draw a field on `row`
///
/// With `value` set the value is drawn too; without it only the label is
/// drawn, leaving the value column to an entry field.
pub fn write_field<D: CharDisplay + ?Sized>(
    display: &mut D,
    row: u8,
    kind: FieldKind,
    value: Option<u16>,
) {
    display.text_at(0, row, label(kind));
    if let Some(value) = value {
        display.set_cursor(VALUE_COL, row);
        write_value(display, kind, value);
    }
}

/// Draw the input hint for a field on `row`
pub fn write_hint<D: CharDisplay + ?Sized>(display: &mut D, row: u8, kind: FieldKind) {
    display.set_cursor(0, row);
    match kind {
        FieldKind::Direction => display.write_str("0=fwd 1=rev"),
        _ => {
            display.write_str("max ");
            write_value(display, kind, kind.max());
        }
    }
}

/// Draw a one-line job summary (`A: 3x100mm`) on `row`
pub fn write_job<D: CharDisplay + ?Sized>(display: &mut D, row: u8, job: &StripJob) {
    display.set_cursor(0, row);
    display.write_char(job.id.as_char());
    display.write_str(": ");
    display.write_number(u32::from(job.strip_count));
    display.write_char('x');
    write_value(display, FieldKind::Length, job.length_mm);
}
