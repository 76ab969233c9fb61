//! Collaborator traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod cutter;
pub mod display;
pub mod keypad;
pub mod stepper;

pub use cutter::CutActuator;
pub use display::{CharDisplay, DisplayExt, DISPLAY_COLS, DISPLAY_ROWS};
pub use keypad::Keypad;
pub use stepper::StepperActuator;
