//! Motorwing Hardware Abstraction Layer
//!
//! This crate defines the boundary between the PCA9685 driver logic and the
//! bus transport that actually moves bytes to the chip. The drivers only ever
//! read or write a run of registers at an address; everything below that
//! (clocking, addressing, retries) belongs to the transport.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  motorwing-drivers (PCA9685, motors)    │
//! └─────────────────────────────────────────┘
//!                     │  RegisterAccess
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  motorwing-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │  I2cBus
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  embedded-hal │       │  custom bus   │
//! │  I2c (HalI2c) │       │  implementors │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`register::RegisterAccess`] - Byte-level register read/write
//! - [`i2c::I2cBus`] - I2C bus operations
//!
//! # Features
//!
//! - `defmt` - Enable `defmt::Format` on error types
//! - `mock` - In-memory register file for host-side tests

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod register;

// Re-export key traits at crate root for convenience
pub use i2c::{HalI2c, I2cBus};
pub use register::{I2cRegisters, RegisterAccess, RegisterError};
