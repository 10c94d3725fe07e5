//! Bipolar stepper on two PCA9685-driven H-bridges
//!
//! Each coil has a current channel (`pwm_a`, `pwm_b`) and two bridge
//! inputs. [`StepSequencer`] decides the coil currents and bridge pattern;
//! this driver writes them out through the controller's channels.

use embedded_hal::delay::DelayNs;
use motorwing_core::config::{Microsteps, StepperPins};
use motorwing_core::stepping::{CoilDrive, Latch, StepSequencer};
use motorwing_core::traits::{Direction, StepStyle, StepperDriver};
use motorwing_hal::RegisterAccess;

use crate::error::Error;
use crate::pwm::Pca9685;

/// Per-stepper state that outlives any borrow of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepperState {
    pins: StepperPins,
    sequencer: StepSequencer,
}

impl StepperState {
    /// Stepper at electrical position 0
    pub const fn new(pins: StepperPins, microsteps: Microsteps) -> Self {
        Self {
            pins,
            sequencer: StepSequencer::new(microsteps),
        }
    }

    /// Channel wiring
    pub const fn pins(&self) -> &StepperPins {
        &self.pins
    }

    /// Current electrical position
    pub const fn position(&self) -> u16 {
        self.sequencer.position()
    }
}

/// Stepper motor driving its coils through a borrowed controller
pub struct StepperMotor<'a, R, D> {
    pca: &'a mut Pca9685<R, D>,
    state: &'a mut StepperState,
}

impl<'a, R, D> StepperMotor<'a, R, D>
where
    R: RegisterAccess,
    D: DelayNs,
{
    /// Pair a controller with the state of one stepper
    pub fn new(pca: &'a mut Pca9685<R, D>, state: &'a mut StepperState) -> Self {
        Self { pca, state }
    }

    /// Write coil currents then bridge inputs
    fn apply(&mut self, drive: &CoilDrive) -> Result<(), Error<R::Error>> {
        let pins = self.state.pins;

        self.set_current(pins.pwm_a(), drive.level_a)?;
        self.set_current(pins.pwm_b(), drive.level_b)?;
        self.set_bridge(&pins, drive.latch)
    }

    /// 8-bit current level scaled to 12-bit ticks
    fn set_current(&mut self, channel: u8, level: u8) -> Result<(), Error<R::Error>> {
        self.pca.channel(channel)?.set_on_off(0, level as u16 * 16)
    }

    fn set_bridge(&mut self, pins: &StepperPins, latch: Latch) -> Result<(), Error<R::Error>> {
        self.pca.channel(pins.ain2())?.set_level(latch.ain2())?;
        self.pca.channel(pins.bin1())?.set_level(latch.bin1())?;
        self.pca.channel(pins.ain1())?.set_level(latch.ain1())?;
        self.pca.channel(pins.bin2())?.set_level(latch.bin2())
    }
}

impl<'a, R, D> StepperDriver for StepperMotor<'a, R, D>
where
    R: RegisterAccess,
    D: DelayNs,
{
    type Error = Error<R::Error>;

    fn onestep(&mut self, direction: Direction, style: StepStyle) -> Result<u16, Self::Error> {
        let drive = self.state.sequencer.advance(direction, style);

        #[cfg(feature = "defmt")]
        defmt::trace!("step {} {} -> {}", direction, style, drive.position);

        self.apply(&drive)?;
        Ok(drive.position)
    }

    fn position(&self) -> u16 {
        self.state.position()
    }

    fn release(&mut self) -> Result<(), Self::Error> {
        let pins = self.state.pins;
        self.set_current(pins.pwm_a(), 0)?;
        self.set_current(pins.pwm_b(), 0)?;
        self.set_bridge(&pins, Latch(0))
    }
}
