//! Mock collaborators for host tests

use std::collections::VecDeque;
use std::string::String;
use std::vec::Vec;

use stripcut_hal::{ByteStorage, StorageError};

use crate::input::Key;
use crate::traits::display::{DISPLAY_COLS, DISPLAY_ROWS};
use crate::traits::{CharDisplay, CutActuator, Keypad, StepperActuator};

const COLS: usize = DISPLAY_COLS as usize;
const ROWS: usize = DISPLAY_ROWS as usize;

/// 16x2 character grid
pub struct GridDisplay {
    cells: [[char; COLS]; ROWS],
    col: usize,
    row: usize,
    blink: bool,
}

impl GridDisplay {
    pub fn new() -> Self {
        Self {
            cells: [[' '; COLS]; ROWS],
            col: 0,
            row: 0,
            blink: false,
        }
    }

    /// Row contents without trailing blanks
    pub fn line(&self, row: usize) -> String {
        let text: String = self.cells[row].iter().collect();
        text.trim_end().into()
    }

    pub fn blink(&self) -> bool {
        self.blink
    }
}

impl CharDisplay for GridDisplay {
    fn clear(&mut self) {
        self.cells = [[' '; COLS]; ROWS];
        self.col = 0;
        self.row = 0;
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        self.col = usize::from(col);
        self.row = usize::from(row).min(ROWS - 1);
    }

    fn write_str(&mut self, text: &str) {
        for c in text.chars() {
            // Writes past the last column are lost, like on the panel
            if self.col < COLS {
                self.cells[self.row][self.col] = c;
            }
            self.col += 1;
        }
    }

    fn set_blink(&mut self, enabled: bool) {
        self.blink = enabled;
    }
}

/// Keypad replaying queued presses, one per poll
pub struct ScriptedKeypad {
    queue: VecDeque<Option<Key>>,
}

impl ScriptedKeypad {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Queue the keys of a legend string; `.` queues an idle poll
    pub fn press_str(&mut self, keys: &str) {
        for c in keys.chars() {
            self.queue.push_back(Key::from_char(c));
        }
    }

    pub fn is_drained(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Keypad for ScriptedKeypad {
    fn poll_key(&mut self, _now_ms: u32) -> Option<Key> {
        self.queue.pop_front().flatten()
    }
}

/// Stepper that moves one step per `run`
pub struct SimStepper {
    moves: Vec<i32>,
    remaining: i32,
    max_speed: i32,
    acceleration: u16,
    jammed: bool,
}

impl SimStepper {
    pub fn new() -> Self {
        Self {
            moves: Vec::new(),
            remaining: 0,
            max_speed: 0,
            acceleration: 0,
            jammed: false,
        }
    }

    /// Stop responding to `run`
    pub fn jam(&mut self) {
        self.jammed = true;
    }

    pub fn moves(&self) -> &[i32] {
        &self.moves
    }

    pub fn max_speed(&self) -> i32 {
        self.max_speed
    }

    pub fn acceleration(&self) -> u16 {
        self.acceleration
    }
}

impl StepperActuator for SimStepper {
    fn set_max_speed(&mut self, steps_per_s: i32) {
        self.max_speed = steps_per_s;
    }

    fn set_acceleration(&mut self, steps_per_s2: u16) {
        self.acceleration = steps_per_s2;
    }

    fn move_by(&mut self, steps: i32) {
        self.moves.push(steps);
        self.remaining += steps;
    }

    fn distance_to_go(&self) -> i32 {
        self.remaining
    }

    fn run(&mut self) {
        if !self.jammed {
            self.remaining -= self.remaining.signum();
        }
    }
}

/// Cutter recording every commanded angle
pub struct SimCutter {
    angles: Vec<u8>,
    hold_reads: u32,
    reads: u32,
}

impl SimCutter {
    pub fn new() -> Self {
        Self {
            angles: Vec::new(),
            hold_reads: 0,
            reads: 0,
        }
    }

    /// Report the endstop asserted for the next `reads` reads
    pub fn hold_endstop(&mut self, reads: u32) {
        self.hold_reads = reads;
    }

    pub fn angles(&self) -> &[u8] {
        &self.angles
    }

    pub fn endstop_reads(&self) -> u32 {
        self.reads
    }

    /// Number of times the cutter reached `angle`
    pub fn sweeps(&self, angle: u8) -> usize {
        self.angles.iter().filter(|&&a| a == angle).count()
    }
}

impl CutActuator for SimCutter {
    fn set_angle(&mut self, degrees: u8) {
        self.angles.push(degrees);
    }

    fn endstop_asserted(&mut self) -> bool {
        self.reads += 1;
        if self.hold_reads > 0 {
            self.hold_reads -= 1;
            true
        } else {
            false
        }
    }
}

/// RAM byte storage, erased to 0xFF
pub struct MemStorage {
    bytes: Vec<u8>,
    fail_writes: bool,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: vec![0xFF; capacity],
            fail_writes: false,
        }
    }

    /// Make every later write fail with a device error
    pub fn fail_writes(&mut self) {
        self.fail_writes = true;
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl ByteStorage for MemStorage {
    fn capacity(&self) -> usize {
        self.bytes.len()
    }

    fn read(&mut self, offset: usize, buffer: &mut [u8]) -> Result<(), StorageError> {
        self.check_bounds(offset, buffer.len())?;
        buffer.copy_from_slice(&self.bytes[offset..offset + buffer.len()]);
        Ok(())
    }

    fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), StorageError> {
        self.check_bounds(offset, data.len())?;
        if self.fail_writes {
            return Err(StorageError::Device);
        }
        self.bytes[offset..offset + data.len()].copy_from_slice(data);
        Ok(())
    }
}
