//! Stepper motor driver trait
//!
//! Open-loop stepping: the driver only knows the electrical position it last
//! commanded, never the shaft angle.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Step direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Advance the electrical position
    Forward,
    /// Retreat the electrical position
    Backward,
}

impl Direction {
    /// Get the opposite direction
    pub fn opposite(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Coil energization style for one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StepStyle {
    /// Full step, one coil energized at a time
    #[default]
    Single,
    /// Full step, two coils energized (more torque)
    Double,
    /// Half step, alternating one and two coils
    Interleave,
    /// Microstep with sine-weighted coil currents
    Microstep,
}

/// Trait for stepper motor drivers
pub trait StepperDriver {
    /// Error type for stepping operations
    type Error;

    /// Move one step and energize the coils for the new position
    ///
    /// Returns the new electrical position in microsteps, always within
    /// one electrical cycle.
    fn onestep(&mut self, direction: Direction, style: StepStyle) -> Result<u16, Self::Error>;

    /// Current electrical position in microsteps
    fn position(&self) -> u16;

    /// De-energize every coil so the shaft turns freely
    fn release(&mut self) -> Result<(), Self::Error>;
}
