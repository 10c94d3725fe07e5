//! DC motor driver trait
//!
//! Speed is signed: positive runs forward, negative runs in reverse and zero
//! lets the motor coast.

/// Trait for brushed DC motors behind an H-bridge
pub trait DcMotorDriver {
    /// Error type for motor operations
    type Error;

    /// Set signed speed (`-0xFFFF..=0xFFFF`, 0 coasts)
    fn set_speed(&mut self, speed: i32) -> Result<(), Self::Error>;

    /// Read back the commanded signed speed
    fn speed(&mut self) -> Result<i32, Self::Error>;

    /// Short the motor terminals to stop quickly
    fn brake(&mut self) -> Result<(), Self::Error>;

    /// Disconnect the motor and let it spin down
    fn coast(&mut self) -> Result<(), Self::Error> {
        self.set_speed(0)
    }
}
