//! Error types for the PCA9685 drivers

use core::fmt;

/// Which argument was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArgumentError {
    /// Duty cycle outside 0-0xFFFF, or a raw tick above 0x1000
    DutyCycle,
    /// Frequency not reachable with a prescale of 3-255
    Frequency,
    /// Channel index outside 0-15
    Channel,
    /// DC motor speed outside -0xFFFF..=0xFFFF
    Speed,
    /// Motor port index not present on the wing
    Motor,
}

/// Errors from controller, channel and motor operations
///
/// Argument errors are always raised before any register is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// Register transfer failed at the transport
    Io(E),

    /// Value not representable on the device
    InvalidArgument(ArgumentError),

    /// PRESCALE holds a value below 3: device not configured or bad read
    InvalidState {
        /// Value read back from PRESCALE
        prescale: u8,
    },

    /// All channels share one frequency; it cannot be set per channel
    UnsupportedOperation,
}

// Allow ergonomic `?` propagation from raw transport errors.
impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Error::Io(error)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "register I/O error: {:?}", e),
            Error::InvalidArgument(arg) => write!(f, "invalid argument: {:?}", arg),
            Error::InvalidState { prescale } => {
                write!(f, "prescale register holds {} (must be at least 3)", prescale)
            }
            Error::UnsupportedOperation => {
                write!(f, "frequency is shared by all channels and cannot be set per channel")
            }
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::Io(e) => defmt::write!(f, "register I/O error: {}", e),
            Error::InvalidArgument(arg) => defmt::write!(f, "invalid argument: {}", arg),
            Error::InvalidState { prescale } => defmt::write!(f, "invalid prescale {}", prescale),
            Error::UnsupportedOperation => defmt::write!(f, "per-channel frequency unsupported"),
        }
    }
}
