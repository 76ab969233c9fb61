//! Keypad drivers

pub mod matrix;

pub use matrix::MatrixKeypad;
