//! Stepper coil sequencing
//!
//! Pure state machine that turns (direction, style) requests into a new
//! electrical position plus the coil currents and bridge pattern for that
//! position. Applying the result to hardware is the driver's job.

pub mod sequencer;
pub mod tables;

pub use sequencer::{CoilDrive, Latch, StepSequencer};
pub use tables::{microstep_curve, FULL_DRIVE};
