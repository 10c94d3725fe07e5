//! Stepper driver implementations

pub mod bipolar;

pub use bipolar::{StepperMotor, StepperState};
