//! Board-agnostic core logic for the strip cutter firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (display, keypad, stepper, cut actuator)
//! - Job and motion-profile model, persisted at fixed offsets
//! - Numeric entry field with navigation signals
//! - Configuration screens and the confirmation review loop
//! - Millimeter to step conversion and the execution sequencer
//! - The top-level controller tying a session together
//!
//! Everything is polled: no call blocks, and every wait (keypad, motion,
//! endstop, delays) is a `Poll::Pending` the caller retries on its next
//! tick.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

mod fmt;

pub mod config;
pub mod controller;
pub mod input;
pub mod model;
pub mod motion;
pub mod store;
pub mod traits;
pub mod ui;

#[cfg(test)]
mod mock;

pub use controller::{Controller, PhaseKind};
