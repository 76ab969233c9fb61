//! Millimeter to step conversion
//!
//! The feed gear turns once per `steps_per_revolution` full steps and
//! advances the strip by its circumference:
//!
//! ```text
//! steps = floor(steps_per_revolution / (π · gear_diameter_mm) · length_mm)
//! ```
//!
//! With the stock 200 steps/rev motor and 50 mm gear, 100 mm is 127 steps.

use core::f32::consts::PI;

use crate::config::{MachineConfig, DEFAULT_GEAR_DIAMETER_MM, DEFAULT_STEPS_PER_REVOLUTION};

/// Fixed mechanical ratio between strip length and motor steps
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Converter {
    steps_per_mm: f32,
}

impl Converter {
    /// Ratio for a motor and feed gear
    ///
    /// A zero gear diameter yields a converter that always returns 0.
    pub fn new(steps_per_revolution: u16, gear_diameter_mm: u16) -> Self {
        let steps_per_mm = if gear_diameter_mm == 0 {
            0.0
        } else {
            f32::from(steps_per_revolution) / (PI * f32::from(gear_diameter_mm))
        };
        Self { steps_per_mm }
    }

    /// Ratio for a machine configuration
    pub fn from_config(config: &MachineConfig) -> Self {
        Self::new(config.steps_per_revolution, config.gear_diameter_mm)
    }

    /// Steps per millimeter of strip
    pub fn steps_per_mm(&self) -> f32 {
        self.steps_per_mm
    }

    /// Whole steps for a strip length, rounded down
    pub fn steps(&self, length_mm: u16) -> i32 {
        // Truncation of a non-negative value is floor
        (self.steps_per_mm * f32::from(length_mm)) as i32
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(DEFAULT_STEPS_PER_REVOLUTION, DEFAULT_GEAR_DIAMETER_MM)
    }
}

/// Convert a strip length to steps on the stock machine
pub fn mm_to_steps(length_mm: u16) -> i32 {
    Converter::default().steps(length_mm)
}
