//! Shared motion profile

use serde::{Deserialize, Serialize};

/// Stepper motion settings shared by every job in a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionProfile {
    /// Max speed in steps/s (0-5000)
    pub max_speed: u16,
    /// Acceleration in steps/s² (0-2000)
    pub acceleration: u16,
    /// Run the feed backwards
    pub reversed: bool,
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self {
            max_speed: 500,
            acceleration: 100,
            reversed: false,
        }
    }
}

impl MotionProfile {
    /// Max speed as applied to the stepper: negated when reversed
    pub fn signed_max_speed(&self) -> i32 {
        let speed = i32::from(self.max_speed);
        if self.reversed {
            -speed
        } else {
            speed
        }
    }
}
