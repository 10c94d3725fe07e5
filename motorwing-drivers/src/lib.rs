//! PCA9685 driver implementations
//!
//! This crate provides the PWM controller model and the motor drivers
//! built on it, implementing the traits defined in motorwing-core:
//!
//! - PCA9685 controller and per-channel views
//! - Bipolar stepper motors (single, double, interleaved, microstepped)
//! - Brushed DC motors
//! - Motor wing board glue tying the ports to their channels
//!
//! # Features
//!
//! - `defmt` - Enable `defmt::Format` on public types and driver logging

#![no_std]
#![deny(unsafe_code)]

pub mod error;
pub mod motor;
pub mod pwm;
pub mod stepper;
pub mod wing;

pub use error::{ArgumentError, Error};
pub use pwm::{Channel, Pca9685};
pub use wing::MotorWing;
