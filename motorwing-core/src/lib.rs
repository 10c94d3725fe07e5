//! Board-agnostic core logic for the Motorwing PCA9685 stack
//!
//! This crate contains everything that does not touch a bus:
//!
//! - Motor driver traits (stepper, DC)
//! - The stepper coil sequencing state machine
//! - Configuration type definitions (microstep resolution, port wiring)

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod stepping;
pub mod traits;
