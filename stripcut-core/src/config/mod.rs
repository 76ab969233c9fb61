//! Configuration types
//!
//! Machine constants that the firmware bakes in from `machine.toml`.

pub mod machine;

pub use machine::*;
