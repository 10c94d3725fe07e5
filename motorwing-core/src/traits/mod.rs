//! Motor driver traits
//!
//! These traits define the interface between application logic and the
//! PCA9685-backed motor implementations.

pub mod motor;
pub mod stepper;

pub use motor::DcMotorDriver;
pub use stepper::{Direction, StepStyle, StepperDriver};
