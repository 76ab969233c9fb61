//! Stripcut - Strip Cutter Firmware
//!
//! Main firmware binary for RP2040-based strip cutters: a 16x2 character
//! LCD and 4x4 keypad for setup, a step/dir feed stepper and a hobby-servo
//! cutter with an endstop.
//!
//! Machine constants come from `machine.toml`, validated and compiled in
//! by `build.rs`.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::{Config as PwmConfig, Pwm, PwmOutput};
use embassy_time::{Delay, Instant};
use {defmt_rtt as _, panic_probe as _};

use stripcut_core::config::MachineConfig;
use stripcut_core::store::PersistentStore;
use stripcut_core::Controller;
use stripcut_drivers::cutter::{ServoConfig, ServoCutter};
use stripcut_drivers::display::Hd44780;
use stripcut_drivers::keypad::MatrixKeypad;
use stripcut_drivers::stepper::{Clock, StepDirStepper};
use stripcut_hal_rp2040::FlashStorage;

/// Machine configuration generated from machine.toml
const MACHINE: MachineConfig = include!(concat!(env!("OUT_DIR"), "/machine_config.rs"));

/// Servo configuration generated from machine.toml
const SERVO: ServoConfig = include!(concat!(env!("OUT_DIR"), "/servo_config.rs"));

/// PWM clock divider: 125 MHz / 40 = 3.125 MHz
const SERVO_PWM_DIVIDER: u8 = 40;

/// PWM wrap value for a 50 Hz servo frame at 3.125 MHz
const SERVO_PWM_TOP: u16 = 62_499;

/// Microsecond clock backed by the embassy time driver
struct MonoClock;

impl Clock for MonoClock {
    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }
}

type Lcd = Hd44780<Output<'static>, Output<'static>, Output<'static>, Delay>;
type Keys = MatrixKeypad<Output<'static>, Input<'static>>;
type Feed = StepDirStepper<Output<'static>, Output<'static>, Delay, MonoClock>;
type Cutter = ServoCutter<PwmOutput<'static>, Input<'static>>;
type Machine = Controller<FlashStorage<'static>, Lcd, Keys, Feed, Cutter>;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Stripcut firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // LCD: RS=GPIO2, EN=GPIO3, D4-D7=GPIO4-7
    let lcd = Hd44780::new(
        Output::new(p.PIN_2, Level::Low),
        Output::new(p.PIN_3, Level::Low),
        [
            Output::new(p.PIN_4, Level::Low),
            Output::new(p.PIN_5, Level::Low),
            Output::new(p.PIN_6, Level::Low),
            Output::new(p.PIN_7, Level::Low),
        ],
        Delay,
    );
    info!("LCD initialized");

    // Keypad: rows GPIO8-11, columns GPIO12-15 with pull-ups
    let keypad = MatrixKeypad::new(
        [
            Output::new(p.PIN_8, Level::High),
            Output::new(p.PIN_9, Level::High),
            Output::new(p.PIN_10, Level::High),
            Output::new(p.PIN_11, Level::High),
        ],
        [
            Input::new(p.PIN_12, Pull::Up),
            Input::new(p.PIN_13, Pull::Up),
            Input::new(p.PIN_14, Pull::Up),
            Input::new(p.PIN_15, Pull::Up),
        ],
        MACHINE.key_debounce_ms,
    );

    // Feed stepper: STEP=GPIO16, DIR=GPIO17
    let stepper = StepDirStepper::new(
        Output::new(p.PIN_16, Level::Low),
        Output::new(p.PIN_17, Level::Low),
        Delay,
        MonoClock,
    );

    // Servo on GPIO18 (PWM slice 1, channel A), endstop on GPIO19
    let mut pwm_config = PwmConfig::default();
    pwm_config.divider = SERVO_PWM_DIVIDER.into();
    pwm_config.top = SERVO_PWM_TOP;
    let pwm = Pwm::new_output_a(p.PWM_SLICE1, p.PIN_18, pwm_config);
    let (servo, _) = pwm.split();
    let servo = unwrap!(servo);
    let endstop = Input::new(p.PIN_19, Pull::Up);
    let cutter = ServoCutter::new(servo, endstop, SERVO);
    info!("Actuators initialized");

    let storage = unwrap!(FlashStorage::new(p.FLASH));
    let store = PersistentStore::new(storage);

    let controller = unwrap!(Controller::new(MACHINE, store, lcd, keypad, stepper, cutter));
    info!("Controller ready ({} job slots)", MACHINE.job_slots);

    spawner.spawn(controller_task(controller)).unwrap();
}

/// Drive the controller as fast as the executor allows
///
/// The stepper is stepped from `poll`, so the loop must not sleep.
#[embassy_executor::task]
async fn controller_task(mut controller: Machine) -> ! {
    loop {
        controller.poll(Instant::now().as_millis() as u32);
        yield_now().await;
    }
}
