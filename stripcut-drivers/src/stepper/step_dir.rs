//! Step/dir stepper with a constant-acceleration ramp
//!
//! Works with any driver taking STEP and DIR inputs (A4988, DRV8825,
//! TMC2209 in standalone mode). Steps are generated in software from
//! [`StepperActuator::run`], which must be called far more often than the
//! step rate.
//!
//! The ramp works on squared speeds so no square roots are needed per
//! step: each step changes `v²` by `2a`, and deceleration starts once the
//! remaining distance is within `v² / 2a` steps.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use stripcut_core::traits::StepperActuator;

/// STEP pulse high time (µs)
const PULSE_WIDTH_US: u32 = 2;

/// Monotonic microsecond clock
pub trait Clock {
    /// Microseconds since an arbitrary epoch
    fn now_us(&self) -> u64;
}

impl<F: Fn() -> u64> Clock for F {
    fn now_us(&self) -> u64 {
        self()
    }
}

/// Software step/dir stepper
pub struct StepDirStepper<STEP, DIR, DELAY, CLK> {
    step: STEP,
    dir: DIR,
    delay: DELAY,
    clock: CLK,
    /// Max speed magnitude (steps/s)
    max_speed: u32,
    /// Negative max speed: flip DIR for every move
    reversed: bool,
    /// Steps/s²; 0 runs at max speed throughout
    acceleration: u32,
    /// Signed steps left in the current move
    remaining: i32,
    /// Current speed (steps/s), 0 when at rest
    speed: u32,
    last_step_us: u64,
}

impl<STEP, DIR, DELAY, CLK> StepDirStepper<STEP, DIR, DELAY, CLK>
where
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
    CLK: Clock,
{
    /// Create a stepper at rest
    pub fn new(mut step: STEP, dir: DIR, delay: DELAY, clock: CLK) -> Self {
        let _ = step.set_low();
        Self {
            step,
            dir,
            delay,
            clock,
            max_speed: 0,
            reversed: false,
            acceleration: 0,
            remaining: 0,
            speed: 0,
            last_step_us: 0,
        }
    }

    /// Current speed in steps/s
    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Speed of the first step from rest
    fn start_speed(&self) -> u32 {
        if self.acceleration == 0 {
            return self.max_speed;
        }
        // Speed reached after one step at constant acceleration
        isqrt(2 * u64::from(self.acceleration)).clamp(1, self.max_speed)
    }

    fn pulse(&mut self) {
        let forward = (self.remaining > 0) != self.reversed;
        let _ = if forward {
            self.dir.set_high()
        } else {
            self.dir.set_low()
        };
        let _ = self.step.set_high();
        self.delay.delay_us(PULSE_WIDTH_US);
        let _ = self.step.set_low();
        self.remaining -= self.remaining.signum();
    }

    /// Speed for the next step, given the steps left after this one
    fn next_speed(&self) -> u32 {
        if self.acceleration == 0 {
            return self.max_speed;
        }
        let v2 = u64::from(self.speed) * u64::from(self.speed);
        let two_a = 2 * u64::from(self.acceleration);
        let stopping = v2 / two_a;
        let left = u64::from(self.remaining.unsigned_abs());

        let next = if left <= stopping {
            isqrt(v2.saturating_sub(two_a))
        } else {
            isqrt(v2 + two_a)
        };
        next.clamp(self.start_speed(), self.max_speed)
    }
}

impl<STEP, DIR, DELAY, CLK> StepperActuator for StepDirStepper<STEP, DIR, DELAY, CLK>
where
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
    CLK: Clock,
{
    fn set_max_speed(&mut self, steps_per_s: i32) {
        self.max_speed = steps_per_s.unsigned_abs();
        self.reversed = steps_per_s < 0;
        self.speed = self.speed.min(self.max_speed);
    }

    fn set_acceleration(&mut self, steps_per_s2: u16) {
        self.acceleration = u32::from(steps_per_s2);
    }

    fn move_by(&mut self, steps: i32) {
        self.remaining = self.remaining.saturating_add(steps);
    }

    fn distance_to_go(&self) -> i32 {
        self.remaining
    }

    fn run(&mut self) {
        if self.remaining == 0 {
            self.speed = 0;
            return;
        }
        if self.max_speed == 0 {
            return;
        }

        let now = self.clock.now_us();
        if self.speed == 0 {
            // Leaving rest: step immediately
            self.speed = self.start_speed();
        } else if now.wrapping_sub(self.last_step_us) < 1_000_000 / u64::from(self.speed) {
            return;
        }

        self.pulse();
        self.last_step_us = now;
        self.speed = if self.remaining == 0 {
            0
        } else {
            self.next_speed()
        };
    }
}

/// Integer square root, rounded down
fn isqrt(value: u64) -> u32 {
    if value < 2 {
        return value as u32;
    }
    let mut x = value;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + value / x) / 2;
    }
    x as u32
}
