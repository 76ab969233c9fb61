//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the collaborator
//! traits defined in stripcut-core, written against `embedded-hal` 1.0:
//!
//! - Character display (HD44780, 4-bit parallel)
//! - Matrix keypad (4x4, debounced)
//! - Step/dir stepper with a constant-acceleration ramp
//! - Hobby-servo cutter with an endstop input

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod cutter;
pub mod display;
pub mod keypad;
pub mod stepper;

#[cfg(test)]
mod mock;
