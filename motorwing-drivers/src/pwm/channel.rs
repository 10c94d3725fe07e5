//! Per-output view over the controller
//!
//! Duty cycles are 16-bit at this API and 12-bit on the chip. Writes map
//! `value` to `(value + 1) >> 4` ticks, reads map ticks back with `<< 4`,
//! and 0xFFFF uses the full-on flag so it reads back exactly.

use embedded_hal::delay::DelayNs;
use motorwing_hal::RegisterAccess;

use super::pca9685::Pca9685;
use super::registers::FULL_ON;
use crate::error::{ArgumentError, Error};

/// Duty cycle that keeps the output permanently high
pub const DUTY_FULL: u16 = 0xFFFF;

/// One PWM output, borrowed from its [`Pca9685`]
pub struct Channel<'a, R, D> {
    pca: &'a mut Pca9685<R, D>,
    index: u8,
}

impl<'a, R, D> Channel<'a, R, D>
where
    R: RegisterAccess,
    D: DelayNs,
{
    pub(crate) fn new(pca: &'a mut Pca9685<R, D>, index: u8) -> Self {
        Self { pca, index }
    }

    /// Channel number (0-15)
    pub fn index(&self) -> u8 {
        self.index
    }

    /// PWM frequency shared by every channel
    pub fn frequency_hz(&mut self) -> Result<f32, Error<R::Error>> {
        self.pca.frequency_hz()
    }

    /// Always fails: the frequency belongs to the controller
    ///
    /// Use [`Pca9685::set_frequency_hz`] instead.
    pub fn set_frequency_hz(&mut self, _frequency_hz: f32) -> Result<(), Error<R::Error>> {
        Err(Error::UnsupportedOperation)
    }

    /// 16-bit duty cycle
    pub fn duty_cycle(&mut self) -> Result<u16, Error<R::Error>> {
        let (on, off) = self.on_off()?;
        if on == FULL_ON {
            return Ok(DUTY_FULL);
        }
        Ok(off << 4)
    }

    /// Set a 16-bit duty cycle
    ///
    /// Accepts any integer; values outside `0..=0xFFFF` are rejected before
    /// any register write.
    pub fn set_duty_cycle<V: TryInto<u16>>(&mut self, value: V) -> Result<(), Error<R::Error>> {
        let value: u16 = value
            .try_into()
            .map_err(|_| Error::InvalidArgument(ArgumentError::DutyCycle))?;

        if value == DUTY_FULL {
            self.set_on_off(FULL_ON, 0)
        } else {
            // 0xFFFE + 1 still fits; the result tops out at 0xFFF
            self.set_on_off(0, (value + 1) >> 4)
        }
    }

    /// Raw (on, off) ticks
    pub fn on_off(&mut self) -> Result<(u16, u16), Error<R::Error>> {
        self.pca.channel_registers(self.index)
    }

    /// Write raw (on, off) ticks
    ///
    /// Each tick is 0-4095, or exactly 0x1000 for the full-on/full-off flag.
    pub fn set_on_off(&mut self, on: u16, off: u16) -> Result<(), Error<R::Error>> {
        if on > FULL_ON || off > FULL_ON {
            return Err(Error::InvalidArgument(ArgumentError::DutyCycle));
        }
        self.pca.set_channel_registers(self.index, on, off)
    }

    /// Drive the output as a digital pin
    pub fn set_level(&mut self, high: bool) -> Result<(), Error<R::Error>> {
        if high {
            self.set_on_off(FULL_ON, 0)
        } else {
            self.set_on_off(0, 0)
        }
    }

    /// Whether the full-on flag is set
    pub fn is_high(&mut self) -> Result<bool, Error<R::Error>> {
        let (on, _) = self.on_off()?;
        Ok(on & FULL_ON != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pwm::registers::channel_base;
    use motorwing_hal::mock::{RecordingDelay, RegisterFile};

    #[test]
    fn test_duty_cycle_rounding_boundaries() {
        let mut file = RegisterFile::new();
        let mut pca = Pca9685::new(&mut file, RecordingDelay::new()).unwrap();
        let mut ch = pca.channel(3).unwrap();

        let cases: [(u16, u16); 6] = [
            (0, 0),
            (14, 0),
            (15, 16),
            (16, 16),
            (0x7FFF, 0x8000),
            (0xFFFE, 0xFFF0),
        ];
        for (written, read) in cases {
            ch.set_duty_cycle(written).unwrap();
            assert_eq!(ch.duty_cycle().unwrap(), read, "duty {:#x}", written);
        }
    }

    #[test]
    fn test_full_duty_uses_full_on_flag() {
        let mut file = RegisterFile::new();
        let mut pca = Pca9685::new(&mut file, RecordingDelay::new()).unwrap();
        let mut ch = pca.channel(0).unwrap();

        ch.set_duty_cycle(0xFFFF).unwrap();
        assert_eq!(ch.on_off().unwrap(), (0x1000, 0));
        assert_eq!(ch.duty_cycle().unwrap(), 0xFFFF);
        assert!(ch.is_high().unwrap());
        drop(pca);

        assert_eq!(file.register(channel_base(0) + 1), 0x10);
    }

    #[test]
    fn test_full_on_wins_over_stale_off() {
        let mut file = RegisterFile::new();
        file.set_register(channel_base(2) + 2, 0x34);
        let mut pca = Pca9685::new(&mut file, RecordingDelay::new()).unwrap();
        // Only the ON half carries the flag; OFF keeps 0x0034
        pca.set_channel_registers(2, 0x1000, 0x0034).unwrap();

        assert_eq!(pca.channel(2).unwrap().duty_cycle().unwrap(), 0xFFFF);
    }

    #[test]
    fn test_out_of_range_duty_writes_nothing() {
        let mut file = RegisterFile::new();
        let mut pca = Pca9685::new(&mut file, RecordingDelay::new()).unwrap();
        let mut ch = pca.channel(5).unwrap();

        let err = Err(Error::InvalidArgument(ArgumentError::DutyCycle));
        assert_eq!(ch.set_duty_cycle(0x1_0000u32), err);
        assert_eq!(ch.set_duty_cycle(-1i32), err);
        assert_eq!(ch.set_on_off(0x1001, 0), err);
        drop(pca);

        // Just the constructor's reset
        assert_eq!(file.writes().len(), 1);
    }

    #[test]
    fn test_frequency_is_read_only() {
        let mut file = RegisterFile::new();
        let mut pca = Pca9685::new(&mut file, RecordingDelay::new()).unwrap();
        pca.set_frequency_hz(60.0).unwrap();

        let mut ch = pca.channel(7).unwrap();
        assert_eq!(ch.index(), 7);
        assert_eq!(ch.set_frequency_hz(1000.0), Err(Error::UnsupportedOperation));
        assert_eq!(ch.frequency_hz(), Ok(25_000_000.0f32 / 4096.0 / 102.0));
    }

    #[test]
    fn test_digital_level() {
        let mut file = RegisterFile::new();
        let mut pca = Pca9685::new(&mut file, RecordingDelay::new()).unwrap();
        let mut ch = pca.channel(9).unwrap();

        ch.set_level(true).unwrap();
        assert!(ch.is_high().unwrap());
        ch.set_level(false).unwrap();
        assert!(!ch.is_high().unwrap());
        assert_eq!(ch.duty_cycle().unwrap(), 0);
    }
}
