//! DC motor driver with PWM speed control
//!
//! This driver provides:
//! - Signed 16-bit speed (sign selects the bridge direction)
//! - Coasting at zero speed (both bridge inputs low)
//! - Braking (both bridge inputs high, no drive)
//!
//! # Usage
//!
//! ```ignore
//! let mut motor = wing.dc_motor(0)?;
//! motor.set_speed(0x8000)?;   // half speed forward
//! motor.set_speed(-0xFFFF)?;  // full speed reverse
//! motor.brake()?;
//! ```

use embedded_hal::delay::DelayNs;
use motorwing_core::config::DcMotorPins;
use motorwing_core::traits::{DcMotorDriver, Direction};
use motorwing_hal::RegisterAccess;

use crate::error::{ArgumentError, Error};
use crate::pwm::Pca9685;

/// Largest speed magnitude
pub const MAX_SPEED: u32 = 0xFFFF;

/// DC motor driving its bridge through a borrowed controller
pub struct DcMotor<'a, R, D> {
    pca: &'a mut Pca9685<R, D>,
    pins: DcMotorPins,
}

impl<'a, R, D> DcMotor<'a, R, D>
where
    R: RegisterAccess,
    D: DelayNs,
{
    /// Pair a controller with one motor's wiring
    pub fn new(pca: &'a mut Pca9685<R, D>, pins: DcMotorPins) -> Self {
        Self { pca, pins }
    }

    /// Channel wiring
    pub fn pins(&self) -> &DcMotorPins {
        &self.pins
    }

    /// Bridge inputs as (in1, in2)
    fn set_bridge(&mut self, in1: bool, in2: bool) -> Result<(), Error<R::Error>> {
        // Both inputs are never high together mid-change
        if in1 {
            self.pca.channel(self.pins.in2())?.set_level(in2)?;
            self.pca.channel(self.pins.in1())?.set_level(in1)
        } else {
            self.pca.channel(self.pins.in1())?.set_level(in1)?;
            self.pca.channel(self.pins.in2())?.set_level(in2)
        }
    }

    /// Direction the bridge is currently set for, if running
    pub fn direction(&mut self) -> Result<Option<Direction>, Error<R::Error>> {
        let in1 = self.pca.channel(self.pins.in1())?.is_high()?;
        let in2 = self.pca.channel(self.pins.in2())?.is_high()?;
        Ok(match (in1, in2) {
            (true, false) => Some(Direction::Forward),
            (false, true) => Some(Direction::Backward),
            _ => None,
        })
    }
}

impl<'a, R, D> DcMotorDriver for DcMotor<'a, R, D>
where
    R: RegisterAccess,
    D: DelayNs,
{
    type Error = Error<R::Error>;

    fn set_speed(&mut self, speed: i32) -> Result<(), Self::Error> {
        let magnitude = speed.unsigned_abs();
        if magnitude > MAX_SPEED {
            return Err(Error::InvalidArgument(ArgumentError::Speed));
        }

        match speed {
            s if s > 0 => self.set_bridge(true, false)?,
            s if s < 0 => self.set_bridge(false, true)?,
            _ => self.set_bridge(false, false)?,
        }
        self.pca.channel(self.pins.pwm())?.set_duty_cycle(magnitude)
    }

    /// Signed speed read back from the chip
    ///
    /// The magnitude comes back on the 12-bit lattice of
    /// [`Channel::duty_cycle`](crate::pwm::Channel::duty_cycle).
    fn speed(&mut self) -> Result<i32, Self::Error> {
        let duty = self.pca.channel(self.pins.pwm())?.duty_cycle()? as i32;
        match self.direction()? {
            Some(Direction::Backward) => Ok(-duty),
            _ => Ok(duty),
        }
    }

    fn brake(&mut self) -> Result<(), Self::Error> {
        self.pca.channel(self.pins.in1())?.set_level(true)?;
        self.pca.channel(self.pins.in2())?.set_level(true)?;
        self.pca.channel(self.pins.pwm())?.set_duty_cycle(0u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motorwing_core::config::DC_MOTOR_PORTS;
    use motorwing_hal::mock::{RecordingDelay, RegisterFile};

    #[test]
    fn test_forward_and_reverse() {
        let mut file = RegisterFile::new();
        let mut pca = Pca9685::new(&mut file, RecordingDelay::new()).unwrap();
        let mut motor = DcMotor::new(&mut pca, DC_MOTOR_PORTS[0]);

        motor.set_speed(0xFFFF).unwrap();
        assert_eq!(motor.speed(), Ok(0xFFFF));
        assert_eq!(motor.direction(), Ok(Some(Direction::Forward)));

        motor.set_speed(-0x8000).unwrap();
        assert_eq!(motor.speed(), Ok(-0x8000));
        assert_eq!(motor.direction(), Ok(Some(Direction::Backward)));
    }

    #[test]
    fn test_speed_reads_back_on_lattice() {
        let mut file = RegisterFile::new();
        let mut pca = Pca9685::new(&mut file, RecordingDelay::new()).unwrap();
        let mut motor = DcMotor::new(&mut pca, DC_MOTOR_PORTS[2]);

        motor.set_speed(-1000).unwrap();
        assert_eq!(motor.speed(), Ok(-992));
    }

    #[test]
    fn test_zero_coasts() {
        let mut file = RegisterFile::new();
        let mut pca = Pca9685::new(&mut file, RecordingDelay::new()).unwrap();
        let mut motor = DcMotor::new(&mut pca, DC_MOTOR_PORTS[1]);

        motor.set_speed(20_000).unwrap();
        motor.coast().unwrap();
        assert_eq!(motor.speed(), Ok(0));
        assert_eq!(motor.direction(), Ok(None));
    }

    #[test]
    fn test_brake_sets_both_inputs() {
        let mut file = RegisterFile::new();
        let mut pca = Pca9685::new(&mut file, RecordingDelay::new()).unwrap();
        let pins = DC_MOTOR_PORTS[3];
        let mut motor = DcMotor::new(&mut pca, pins);

        motor.set_speed(-30_000).unwrap();
        motor.brake().unwrap();
        assert_eq!(motor.speed(), Ok(0));
        assert_eq!(motor.direction(), Ok(None));

        assert!(pca.channel(pins.in1()).unwrap().is_high().unwrap());
        assert!(pca.channel(pins.in2()).unwrap().is_high().unwrap());
    }

    #[test]
    fn test_out_of_range_speed_writes_nothing() {
        let mut file = RegisterFile::new();
        let mut pca = Pca9685::new(&mut file, RecordingDelay::new()).unwrap();
        let mut motor = DcMotor::new(&mut pca, DC_MOTOR_PORTS[0]);

        let err = Err(Error::InvalidArgument(ArgumentError::Speed));
        assert_eq!(motor.set_speed(0x1_0000), err);
        assert_eq!(motor.set_speed(-0x1_0000), err);
        assert_eq!(motor.set_speed(i32::MIN), err);
        drop(pca);

        assert_eq!(file.writes().len(), 1);
    }
}
