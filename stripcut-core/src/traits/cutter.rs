//! Cut actuator trait

/// Angular cut actuator with a rest-position endstop
pub trait CutActuator {
    /// Command an absolute angle in degrees (0-180)
    fn set_angle(&mut self, degrees: u8);

    /// Read the endstop sensor
    ///
    /// Takes `&mut self` because pin reads typically require mutable access.
    fn endstop_asserted(&mut self) -> bool;
}
