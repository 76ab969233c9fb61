//! Mock embedded-hal peripherals for host tests

use core::cell::{Cell, RefCell};
use core::convert::Infallible;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};

/// Pin whose level and rising edges are visible through clones
#[derive(Clone, Default)]
pub struct SharedPin {
    level: Rc<Cell<bool>>,
    rises: Rc<Cell<u32>>,
}

impl SharedPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> bool {
        self.level.get()
    }

    pub fn set(&self, high: bool) {
        self.level.set(high);
    }

    pub fn rises(&self) -> u32 {
        self.rises.get()
    }
}

impl ErrorType for SharedPin {
    type Error = Infallible;
}

impl OutputPin for SharedPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.level.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        if !self.level.get() {
            self.rises.set(self.rises.get() + 1);
        }
        self.level.set(true);
        Ok(())
    }
}

impl InputPin for SharedPin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.level.get())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.level.get())
    }
}

/// HD44780 bus: RS, EN, D4-D7
#[derive(Default)]
pub struct BusState {
    levels: [bool; 6],
    /// Nibbles latched on EN falling edges, with the RS level
    pub nibbles: Vec<(bool, u8)>,
}

impl BusState {
    /// Latched nibbles paired into bytes
    pub fn bytes(&self) -> Vec<(bool, u8)> {
        self.nibbles
            .chunks_exact(2)
            .map(|pair| (pair[0].0, (pair[0].1 << 4) | pair[1].1))
            .collect()
    }
}

pub const RS: usize = 0;
pub const EN: usize = 1;

#[derive(Clone)]
pub struct BusPin {
    bus: Rc<RefCell<BusState>>,
    index: usize,
}

impl BusPin {
    pub fn new(bus: &Rc<RefCell<BusState>>, index: usize) -> Self {
        Self {
            bus: bus.clone(),
            index,
        }
    }

    fn set(&mut self, high: bool) {
        let mut bus = self.bus.borrow_mut();
        let falling = self.index == EN && bus.levels[EN] && !high;
        bus.levels[self.index] = high;
        if falling {
            let nibble = (0..4).fold(0u8, |acc, bit| acc | (u8::from(bus.levels[2 + bit]) << bit));
            let rs = bus.levels[RS];
            bus.nibbles.push((rs, nibble));
        }
    }
}

impl ErrorType for BusPin {
    type Error = Infallible;
}

impl OutputPin for BusPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.set(true);
        Ok(())
    }
}

/// 4x4 key matrix with at most one key held
#[derive(Default)]
pub struct MatrixState {
    /// Row drive levels (true = high)
    rows: [bool; 4],
    pub pressed: Option<(usize, usize)>,
}

pub struct RowPin {
    matrix: Rc<RefCell<MatrixState>>,
    row: usize,
}

impl RowPin {
    pub fn new(matrix: &Rc<RefCell<MatrixState>>, row: usize) -> Self {
        Self {
            matrix: matrix.clone(),
            row,
        }
    }
}

impl ErrorType for RowPin {
    type Error = Infallible;
}

impl OutputPin for RowPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.matrix.borrow_mut().rows[self.row] = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.matrix.borrow_mut().rows[self.row] = true;
        Ok(())
    }
}

pub struct ColPin {
    matrix: Rc<RefCell<MatrixState>>,
    col: usize,
}

impl ColPin {
    pub fn new(matrix: &Rc<RefCell<MatrixState>>, col: usize) -> Self {
        Self {
            matrix: matrix.clone(),
            col,
        }
    }
}

impl ErrorType for ColPin {
    type Error = Infallible;
}

impl InputPin for ColPin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        self.is_low().map(|low| !low)
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        let matrix = self.matrix.borrow();
        // Columns are pulled up; a held key connects them to its row
        Ok(matches!(matrix.pressed, Some((row, col)) if col == self.col && !matrix.rows[row]))
    }
}

/// Delay that returns immediately
pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// PWM channel recording every duty written
#[derive(Clone)]
pub struct PwmRecorder {
    max: u16,
    pub duties: Rc<RefCell<Vec<u16>>>,
}

impl PwmRecorder {
    pub fn new(max: u16) -> Self {
        Self {
            max,
            duties: Rc::default(),
        }
    }

    pub fn last(&self) -> Option<u16> {
        self.duties.borrow().last().copied()
    }
}

impl pwm::ErrorType for PwmRecorder {
    type Error = Infallible;
}

impl SetDutyCycle for PwmRecorder {
    fn max_duty_cycle(&self) -> u16 {
        self.max
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        self.duties.borrow_mut().push(duty);
        Ok(())
    }
}
