//! PCA9685 16-channel PWM controller
//!
//! [`Pca9685`] owns the register access and delay source; [`Channel`] is a
//! borrowed per-output view handed out by [`Pca9685::channel`].

pub mod channel;
pub mod pca9685;
pub mod registers;

pub use channel::Channel;
pub use pca9685::Pca9685;
