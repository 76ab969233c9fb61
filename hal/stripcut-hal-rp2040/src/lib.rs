//! RP2040-specific HAL for the strip cutter firmware
//!
//! Implements the shared `stripcut-hal` traits on RP2040 peripherals:
//!
//! - Flash storage (implements `stripcut_hal::ByteStorage`)

#![no_std]

pub mod flash;

pub use flash::FlashStorage;
pub use stripcut_hal::{ByteStorage, StorageError};
