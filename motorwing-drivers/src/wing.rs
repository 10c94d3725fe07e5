//! Motor wing: one PCA9685 driving two stepper ports or four DC motor ports
//!
//! Stepper and DC ports share channels (stepper port 0 uses the channels
//! of DC ports 0 and 1), so use a given set of channels for one kind of
//! motor at a time.

use embedded_hal::delay::DelayNs;
use motorwing_core::config::{
    MotorWingConfig, DC_MOTOR_PORTS, STEPPER_PORTS, STEPPER_PORT_COUNT,
};
use motorwing_hal::{I2cBus, I2cRegisters, RegisterAccess};

use crate::error::{ArgumentError, Error};
use crate::motor::DcMotor;
use crate::pwm::Pca9685;
use crate::stepper::{StepperMotor, StepperState};

/// Motor wing built on one PCA9685
pub struct MotorWing<R, D> {
    pca: Pca9685<R, D>,
    steppers: [StepperState; STEPPER_PORT_COUNT],
}

impl<B, D> MotorWing<I2cRegisters<B>, D>
where
    B: I2cBus,
    D: DelayNs,
{
    /// Build a wing on an I2C bus at the configured address
    pub fn from_i2c(
        bus: B,
        delay: D,
        config: &MotorWingConfig,
    ) -> Result<Self, Error<<I2cRegisters<B> as RegisterAccess>::Error>> {
        let registers = I2cRegisters::new(bus, config.controller.address);
        Self::new(registers, delay, config)
    }
}

impl<R, D> MotorWing<R, D>
where
    R: RegisterAccess,
    D: DelayNs,
{
    /// Reset the controller and set the motor PWM frequency
    pub fn new(registers: R, delay: D, config: &MotorWingConfig) -> Result<Self, Error<R::Error>> {
        let mut pca =
            Pca9685::with_reference_clock(registers, delay, config.controller.reference_clock_hz)?;
        pca.set_frequency_hz(config.pwm_frequency_hz)?;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "motor wing ready: {} Hz, {} microsteps",
            config.pwm_frequency_hz,
            config.microsteps
        );

        Ok(Self {
            pca,
            steppers: STEPPER_PORTS.map(|pins| StepperState::new(pins, config.microsteps)),
        })
    }

    /// Stepper on port 0 or 1
    ///
    /// The electrical position persists across calls.
    pub fn stepper(&mut self, port: usize) -> Result<StepperMotor<'_, R, D>, Error<R::Error>> {
        let state = self
            .steppers
            .get_mut(port)
            .ok_or(Error::InvalidArgument(ArgumentError::Motor))?;
        Ok(StepperMotor::new(&mut self.pca, state))
    }

    /// DC motor on port 0-3
    pub fn dc_motor(&mut self, port: usize) -> Result<DcMotor<'_, R, D>, Error<R::Error>> {
        let pins = *DC_MOTOR_PORTS
            .get(port)
            .ok_or(Error::InvalidArgument(ArgumentError::Motor))?;
        Ok(DcMotor::new(&mut self.pca, pins))
    }

    /// The underlying controller, for direct channel access
    pub fn controller(&mut self) -> &mut Pca9685<R, D> {
        &mut self.pca
    }

    /// Reset the controller and give back the register access and delay
    pub fn release(self) -> Result<(R, D), Error<R::Error>> {
        self.pca.release()
    }
}
