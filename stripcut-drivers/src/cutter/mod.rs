//! Cut actuator drivers

pub mod servo;

pub use servo::{ServoConfig, ServoCutter};
