//! Feed stepper trait
//!
//! Modelled on accelerated step/dir drivers: the caller configures speed
//! and acceleration, queues a relative move, then keeps calling
//! [`StepperActuator::run`] until [`StepperActuator::distance_to_go`]
//! reaches zero.

/// Stepper actuator for the strip feed
pub trait StepperActuator {
    /// Set the maximum speed in steps/s
    ///
    /// A negative speed runs every subsequent move in reverse.
    fn set_max_speed(&mut self, steps_per_s: i32);

    /// Set the acceleration/deceleration rate in steps/s²
    fn set_acceleration(&mut self, steps_per_s2: u16);

    /// Queue a move relative to the current position
    fn move_by(&mut self, steps: i32);

    /// Steps remaining until the queued target is reached
    fn distance_to_go(&self) -> i32;

    /// Advance the motion by at most one step if one is due
    ///
    /// Must be called as often as possible while a move is pending.
    fn run(&mut self);

    /// Check whether a move is still in progress
    fn is_moving(&self) -> bool {
        self.distance_to_go() != 0
    }
}
