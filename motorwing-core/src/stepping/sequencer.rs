//! One-step transition function
//!
//! Positions count microsteps within one electrical cycle of
//! `4 * microsteps`. The cycle splits into 8 half-step buckets of
//! `microsteps / 2` for full and half stepping, or 4 quadrants of
//! `microsteps` for microstepping.

use crate::config::Microsteps;
use crate::traits::{Direction, StepStyle};

use super::tables::{microstep_curve, FULL_DRIVE, HALF_STEP_LATCH, MICROSTEP_LATCH};

/// Four-bit bridge pattern
///
/// Bit 0 drives AIN2, bit 1 BIN1, bit 2 AIN1, bit 3 BIN2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Latch(pub u8);

impl Latch {
    /// Coil A bridge input 2
    pub const fn ain2(self) -> bool {
        self.0 & 0x1 != 0
    }

    /// Coil B bridge input 1
    pub const fn bin1(self) -> bool {
        self.0 & 0x2 != 0
    }

    /// Coil A bridge input 1
    pub const fn ain1(self) -> bool {
        self.0 & 0x4 != 0
    }

    /// Coil B bridge input 2
    pub const fn bin2(self) -> bool {
        self.0 & 0x8 != 0
    }
}

/// Outputs for one electrical position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CoilDrive {
    /// Electrical position after the step
    pub position: u16,
    /// Coil A current, 8-bit scale
    pub level_a: u8,
    /// Coil B current, 8-bit scale
    pub level_b: u8,
    /// Bridge input pattern
    pub latch: Latch,
}

/// Electrical position tracker for one stepper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepSequencer {
    microsteps: Microsteps,
    current_step: u16,
}

impl StepSequencer {
    /// Start at position 0
    pub const fn new(microsteps: Microsteps) -> Self {
        Self {
            microsteps,
            current_step: 0,
        }
    }

    /// Start at an arbitrary position, wrapped into one cycle
    pub const fn with_position(microsteps: Microsteps, position: u16) -> Self {
        Self {
            microsteps,
            current_step: position % microsteps.cycle_len(),
        }
    }

    /// Current electrical position
    pub const fn position(&self) -> u16 {
        self.current_step
    }

    /// Resolution this sequencer steps with
    pub const fn microsteps(&self) -> Microsteps {
        self.microsteps
    }

    /// Advance one step and compute the outputs for the new position
    pub fn advance(&mut self, direction: Direction, style: StepStyle) -> CoilDrive {
        let n = self.microsteps.count() as i32;
        let half = n / 2;
        let odd_bucket = (self.current_step as i32 / half) % 2 == 1;

        let delta = match style {
            // Land on even buckets: one coil
            StepStyle::Single => {
                if odd_bucket {
                    half
                } else {
                    n
                }
            }
            // Land on odd buckets: two coils
            StepStyle::Double => {
                if odd_bucket {
                    n
                } else {
                    half
                }
            }
            StepStyle::Interleave => half,
            StepStyle::Microstep => 1,
        };
        let delta = match direction {
            Direction::Forward => delta,
            Direction::Backward => -delta,
        };

        let cycle = self.microsteps.cycle_len() as i32;
        self.current_step = (self.current_step as i32 + delta).rem_euclid(cycle) as u16;

        self.drive(style)
    }

    /// Outputs for the current position under a style
    pub fn drive(&self, style: StepStyle) -> CoilDrive {
        let step = self.current_step as usize;
        let n = self.microsteps.count() as usize;

        let (level_a, level_b, latch) = match style {
            StepStyle::Microstep => {
                let (a, b) = self.microstep_levels();
                (a, b, MICROSTEP_LATCH[step / n])
            }
            _ => (FULL_DRIVE, FULL_DRIVE, HALF_STEP_LATCH[step / (n / 2)]),
        };

        CoilDrive {
            position: self.current_step,
            level_a,
            level_b,
            latch: Latch(latch),
        }
    }

    /// Sine/cosine weighted coil currents for the current position
    ///
    /// Coil A follows the falling quarter wave while coil B rises, then the
    /// roles swap every quadrant.
    fn microstep_levels(&self) -> (u8, u8) {
        let curve = microstep_curve(self.microsteps);
        let s = self.current_step as usize;
        let n = self.microsteps.count() as usize;

        match s / n {
            0 => (curve[n - s], curve[s]),
            1 => (curve[s - n], curve[2 * n - s]),
            2 => (curve[3 * n - s], curve[s - 2 * n]),
            _ => (curve[s - 3 * n], curve[4 * n - s]),
        }
    }
}
