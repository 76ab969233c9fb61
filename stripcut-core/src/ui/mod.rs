//! Operator interface
//!
//! Configuration screens, the navigator that walks them, and the review
//! pages shown before a run. All rendering of model fields goes through
//! [`field`].

pub mod field;
pub mod navigator;
pub mod review;
pub mod screen;

pub use navigator::{NavContext, NavRequest, Navigator, ScreenEditor, ScreenOutcome};
pub use review::{ReviewLine, ReviewLoop, ReviewOutcome};
pub use screen::Screen;
