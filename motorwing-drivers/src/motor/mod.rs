//! DC motor driver implementations
//!
//! Brushed DC motors on an H-bridge: one PCA9685 channel sets the speed,
//! two more switch the bridge inputs.

pub mod dc;

pub use dc::DcMotor;
