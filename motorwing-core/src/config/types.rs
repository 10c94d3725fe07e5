//! Configuration type definitions
//!
//! Value types shared by every motor on one controller, and the error
//! raised when a configuration cannot be accepted.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of PWM outputs on one PCA9685
pub const CHANNEL_COUNT: usize = 16;

/// Microstep resolution per full step
///
/// Only 8 and 16 have waveform tables, so those are the only values the
/// type can hold. Raw numbers from a host configuration go through
/// [`TryFrom<u8>`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub enum Microsteps {
    /// 8 microsteps per full step
    Eight,
    /// 16 microsteps per full step
    #[default]
    Sixteen,
}

impl Microsteps {
    /// Microsteps per full step as a number
    pub const fn count(self) -> u16 {
        match self {
            Microsteps::Eight => 8,
            Microsteps::Sixteen => 16,
        }
    }

    /// Microsteps in one full electrical cycle (four quadrants)
    pub const fn cycle_len(self) -> u16 {
        self.count() * 4
    }
}

impl TryFrom<u8> for Microsteps {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            8 => Ok(Microsteps::Eight),
            16 => Ok(Microsteps::Sixteen),
            other => Err(ConfigError::InvalidMicrosteps(other)),
        }
    }
}

impl From<Microsteps> for u8 {
    fn from(value: Microsteps) -> Self {
        value.count() as u8
    }
}

/// Configuration errors
///
/// Raised while building configuration, never in the middle of a motor
/// operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Microstep count other than 8 or 16
    InvalidMicrosteps(u8),
    /// Channel index outside 0-15
    ChannelOutOfRange(u8),
    /// The same channel assigned twice within one motor
    DuplicateChannel(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::InvalidMicrosteps(n) => {
                write!(f, "microsteps must be 8 or 16, got {}", n)
            }
            ConfigError::ChannelOutOfRange(c) => {
                write!(f, "channel {} out of range (must be 0-15)", c)
            }
            ConfigError::DuplicateChannel(c) => write!(f, "channel {} assigned twice", c),
        }
    }
}
