//! Machine configuration
//!
//! Mechanical constants, timing and slot count for one strip cutter.
//! The firmware generates a [`MachineConfig`] from `machine.toml` at build
//! time; [`MachineConfig::default`] matches the stock machine.

use crate::model::MAX_JOBS;

/// Stepper full steps per motor revolution
pub const DEFAULT_STEPS_PER_REVOLUTION: u16 = 200;

/// Diameter of the feed gear in millimeters
pub const DEFAULT_GEAR_DIAMETER_MM: u16 = 50;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `job_slots` must be within 1..=MAX_JOBS
    InvalidJobSlots,
    /// Steps per revolution and gear diameter must be nonzero
    InvalidMechanics,
    /// Cut sweep must be within 1..=180 degrees
    InvalidSweep,
}

/// Complete machine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MachineConfig {
    /// Number of operator-editable job slots (1 = single primary job)
    pub job_slots: u8,
    /// Stepper full steps per revolution
    pub steps_per_revolution: u16,
    /// Feed gear diameter (mm)
    pub gear_diameter_mm: u16,
    /// Cut actuator end-of-sweep angle (degrees)
    pub cut_sweep_deg: u8,
    /// Delay after each one-degree sweep increment (ms)
    pub cut_step_delay_ms: u16,
    /// Pause between strips (ms)
    pub settle_delay_ms: u16,
    /// How long the boot banner stays up (ms)
    pub boot_banner_ms: u16,
    /// How long "Done." stays up after a run (ms)
    pub done_banner_ms: u16,
    /// Keypad debounce time (ms)
    pub key_debounce_ms: u16,
    /// Give up on a motion or endstop wait after this long (ms).
    /// `None` waits forever.
    pub stall_timeout_ms: Option<u32>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            job_slots: 1,
            steps_per_revolution: DEFAULT_STEPS_PER_REVOLUTION,
            gear_diameter_mm: DEFAULT_GEAR_DIAMETER_MM,
            cut_sweep_deg: 180,
            cut_step_delay_ms: 15,
            settle_delay_ms: 500,
            boot_banner_ms: 500,
            done_banner_ms: 2000,
            key_debounce_ms: 100,
            stall_timeout_ms: None,
        }
    }
}

impl MachineConfig {
    /// Check the configuration for values the controller cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.job_slots == 0 || usize::from(self.job_slots) > MAX_JOBS {
            return Err(ConfigError::InvalidJobSlots);
        }
        if self.steps_per_revolution == 0 || self.gear_diameter_mm == 0 {
            return Err(ConfigError::InvalidMechanics);
        }
        if self.cut_sweep_deg == 0 || self.cut_sweep_deg > 180 {
            return Err(ConfigError::InvalidSweep);
        }
        Ok(())
    }
}
