//! Hardware configuration types
//!
//! Controller addressing and the wiring of stepper and DC motor ports to
//! PCA9685 channels.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::{ConfigError, Microsteps, CHANNEL_COUNT};

/// Default 7-bit I2C address of the PCA9685
pub const DEFAULT_ADDRESS: u8 = 0x40;

/// Internal oscillator frequency of the PCA9685
pub const DEFAULT_REFERENCE_CLOCK_HZ: u32 = 25_000_000;

/// PWM frequency used for motor drive
pub const DEFAULT_MOTOR_FREQUENCY_HZ: f32 = 1600.0;

/// Stepper ports on a motor wing
pub const STEPPER_PORT_COUNT: usize = 2;

/// DC motor ports on a motor wing
pub const DC_MOTOR_PORT_COUNT: usize = 4;

/// Channel wiring of the stepper ports (pwm_a, ain2, ain1, pwm_b, bin2, bin1)
pub const STEPPER_PORTS: [StepperPins; STEPPER_PORT_COUNT] = [
    StepperPins::wired([8, 9, 10, 13, 12, 11]),
    StepperPins::wired([2, 3, 4, 7, 6, 5]),
];

/// Channel wiring of the DC motor ports (pwm, in2, in1)
pub const DC_MOTOR_PORTS: [DcMotorPins; DC_MOTOR_PORT_COUNT] = [
    DcMotorPins::wired([8, 9, 10]),
    DcMotorPins::wired([13, 12, 11]),
    DcMotorPins::wired([2, 3, 4]),
    DcMotorPins::wired([7, 6, 5]),
];

/// PCA9685 controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControllerConfig {
    /// 7-bit I2C address
    pub address: u8,
    /// Oscillator feeding the prescaler (internal 25 MHz unless EXTCLK is used)
    pub reference_clock_hz: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            reference_clock_hz: DEFAULT_REFERENCE_CLOCK_HZ,
        }
    }
}

/// Motor wing configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotorWingConfig {
    /// Controller addressing and clock
    pub controller: ControllerConfig,
    /// PWM frequency set once at construction
    pub pwm_frequency_hz: f32,
    /// Microstep resolution shared by every stepper on the wing
    pub microsteps: Microsteps,
}

impl Default for MotorWingConfig {
    fn default() -> Self {
        Self {
            controller: ControllerConfig::default(),
            pwm_frequency_hz: DEFAULT_MOTOR_FREQUENCY_HZ,
            microsteps: Microsteps::default(),
        }
    }
}

/// Check that every channel exists and none repeats
fn validate_channels(channels: &[u8]) -> Result<(), ConfigError> {
    for (i, &channel) in channels.iter().enumerate() {
        if channel as usize >= CHANNEL_COUNT {
            return Err(ConfigError::ChannelOutOfRange(channel));
        }
        if channels[..i].contains(&channel) {
            return Err(ConfigError::DuplicateChannel(channel));
        }
    }
    Ok(())
}

/// Channels driving one bipolar stepper through a dual H-bridge
///
/// `pwm_a`/`pwm_b` set the coil current, the other four switch the bridge
/// inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "[u8; 6]", into = "[u8; 6]"))]
pub struct StepperPins {
    channels: [u8; 6],
}

impl StepperPins {
    /// Validated wiring in (pwm_a, ain2, ain1, pwm_b, bin2, bin1) order
    pub fn new(channels: [u8; 6]) -> Result<Self, ConfigError> {
        validate_channels(&channels)?;
        Ok(Self { channels })
    }

    const fn wired(channels: [u8; 6]) -> Self {
        Self { channels }
    }

    /// Coil A current channel
    pub const fn pwm_a(&self) -> u8 {
        self.channels[0]
    }

    /// Coil A bridge input 2
    pub const fn ain2(&self) -> u8 {
        self.channels[1]
    }

    /// Coil A bridge input 1
    pub const fn ain1(&self) -> u8 {
        self.channels[2]
    }

    /// Coil B current channel
    pub const fn pwm_b(&self) -> u8 {
        self.channels[3]
    }

    /// Coil B bridge input 2
    pub const fn bin2(&self) -> u8 {
        self.channels[4]
    }

    /// Coil B bridge input 1
    pub const fn bin1(&self) -> u8 {
        self.channels[5]
    }

    /// All six channels in wiring order
    pub const fn channels(&self) -> [u8; 6] {
        self.channels
    }
}

impl TryFrom<[u8; 6]> for StepperPins {
    type Error = ConfigError;

    fn try_from(channels: [u8; 6]) -> Result<Self, Self::Error> {
        Self::new(channels)
    }
}

impl From<StepperPins> for [u8; 6] {
    fn from(pins: StepperPins) -> Self {
        pins.channels
    }
}

/// Channels driving one brushed DC motor through an H-bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "[u8; 3]", into = "[u8; 3]"))]
pub struct DcMotorPins {
    channels: [u8; 3],
}

impl DcMotorPins {
    /// Validated wiring in (pwm, in2, in1) order
    pub fn new(channels: [u8; 3]) -> Result<Self, ConfigError> {
        validate_channels(&channels)?;
        Ok(Self { channels })
    }

    const fn wired(channels: [u8; 3]) -> Self {
        Self { channels }
    }

    /// Speed channel
    pub const fn pwm(&self) -> u8 {
        self.channels[0]
    }

    /// Bridge input 2 (high when reversing)
    pub const fn in2(&self) -> u8 {
        self.channels[1]
    }

    /// Bridge input 1 (high when running forward)
    pub const fn in1(&self) -> u8 {
        self.channels[2]
    }
}

impl TryFrom<[u8; 3]> for DcMotorPins {
    type Error = ConfigError;

    fn try_from(channels: [u8; 3]) -> Result<Self, Self::Error> {
        Self::new(channels)
    }
}

impl From<DcMotorPins> for [u8; 3] {
    fn from(pins: DcMotorPins) -> Self {
        pins.channels
    }
}
