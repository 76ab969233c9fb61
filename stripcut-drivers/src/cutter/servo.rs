//! Hobby-servo cutter with a rest-position endstop
//!
//! The servo is driven by a PWM channel running at the servo frame rate
//! (normally 50 Hz). An angle maps linearly onto a pulse width between
//! `min_pulse_us` and `max_pulse_us`.

use embedded_hal::digital::InputPin;
use embedded_hal::pwm::SetDutyCycle;
use stripcut_core::traits::CutActuator;

/// Largest commandable angle
const MAX_ANGLE: u8 = 180;

/// Servo timing and endstop polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServoConfig {
    /// Pulse width at 0°
    pub min_pulse_us: u16,
    /// Pulse width at 180°
    pub max_pulse_us: u16,
    /// PWM frame period
    pub period_us: u16,
    /// Endstop pulls its input low when triggered
    pub endstop_active_low: bool,
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self {
            min_pulse_us: 544,
            max_pulse_us: 2400,
            period_us: 20_000,
            endstop_active_low: true,
        }
    }
}

impl ServoConfig {
    /// Pulse width for an angle, clamped to 180°
    pub fn pulse_us(&self, degrees: u8) -> u16 {
        let degrees = u32::from(degrees.min(MAX_ANGLE));
        let min = u32::from(self.min_pulse_us);
        let span = u32::from(self.max_pulse_us.saturating_sub(self.min_pulse_us));
        (min + span * degrees / u32::from(MAX_ANGLE)) as u16
    }
}

/// Cutter built from a servo PWM channel and an endstop input
pub struct ServoCutter<P, E> {
    pwm: P,
    endstop: E,
    config: ServoConfig,
}

impl<P: SetDutyCycle, E: InputPin> ServoCutter<P, E> {
    pub fn new(pwm: P, endstop: E, config: ServoConfig) -> Self {
        Self {
            pwm,
            endstop,
            config,
        }
    }

    pub fn config(&self) -> &ServoConfig {
        &self.config
    }
}

impl<P: SetDutyCycle, E: InputPin> CutActuator for ServoCutter<P, E> {
    fn set_angle(&mut self, degrees: u8) {
        let pulse = self.config.pulse_us(degrees);
        let period = self.config.period_us.max(pulse);
        let _ = self.pwm.set_duty_cycle_fraction(pulse, period);
    }

    fn endstop_asserted(&mut self) -> bool {
        let level = if self.config.endstop_active_low {
            self.endstop.is_low()
        } else {
            self.endstop.is_high()
        };
        // An unreadable endstop counts as released
        level.unwrap_or(false)
    }
}
