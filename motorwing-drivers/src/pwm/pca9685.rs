//! PCA9685 controller model
//!
//! The PCA9685 has one oscillator and one prescaler, so every channel runs
//! at the same PWM frequency. Each channel has a 12-bit ON and OFF tick
//! within the 4096-tick period; bit 12 of either tick forces the output
//! fully on or fully off.
//!
//! # Frequency changes
//!
//! PRESCALE can only be written while the oscillator sleeps. The change
//! sequence is: read MODE1, set SLEEP, write PRESCALE, restore MODE1, wait
//! for the oscillator to settle, then set RESTART and auto-increment. An I/O
//! failure part way through leaves MODE1 in whatever state the last
//! successful write produced, possibly with SLEEP set and all outputs
//! stopped. Call [`Pca9685::set_frequency_hz`] again or [`Pca9685::reset`]
//! to recover.
//!
//! The final MODE1 value is `old | 0xA0` (RESTART | AI). Some driver
//! revisions also set bit 0 (ALLCALL, i.e. `0xA1`); this driver does not
//! touch ALLCALL.

use embedded_hal::delay::DelayNs;
use motorwing_core::config::{CHANNEL_COUNT, DEFAULT_REFERENCE_CLOCK_HZ};
use motorwing_hal::RegisterAccess;

use super::channel::Channel;
use super::registers::{
    channel_base, MODE1, MODE1_AI, MODE1_KEEP_MASK, MODE1_RESTART, MODE1_SLEEP,
    OSCILLATOR_SETTLE_MS, PRESCALE, PRESCALE_MIN, TICKS_PER_CYCLE,
};
use crate::error::{ArgumentError, Error};

/// PCA9685 PWM controller
///
/// Owns the register access `R` and the delay source `D` used for the
/// oscillator settle time. All access is `&mut self`; share a controller
/// between threads by wrapping it in a mutex.
pub struct Pca9685<R, D> {
    registers: R,
    delay: D,
    reference_clock_hz: u32,
}

impl<R, D> Pca9685<R, D>
where
    R: RegisterAccess,
    D: DelayNs,
{
    /// Create a controller clocked from the internal 25 MHz oscillator
    ///
    /// Resets MODE1 to 0x00.
    ///
    /// # Errors
    /// * [`Error::Io`] if the reset write fails
    pub fn new(registers: R, delay: D) -> Result<Self, Error<R::Error>> {
        Self::with_reference_clock(registers, delay, DEFAULT_REFERENCE_CLOCK_HZ)
    }

    /// Create a controller clocked from an external reference
    ///
    /// Resets MODE1 to 0x00.
    pub fn with_reference_clock(
        registers: R,
        delay: D,
        reference_clock_hz: u32,
    ) -> Result<Self, Error<R::Error>> {
        let mut pca = Self {
            registers,
            delay,
            reference_clock_hz,
        };
        pca.reset()?;
        Ok(pca)
    }

    /// Oscillator frequency feeding the prescaler
    pub fn reference_clock_hz(&self) -> u32 {
        self.reference_clock_hz
    }

    /// Write MODE1 = 0x00
    ///
    /// Wakes the oscillator and clears RESTART, auto-increment and the
    /// sub-address bits. Safe to call repeatedly.
    pub fn reset(&mut self) -> Result<(), Error<R::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("PCA9685 reset");

        self.write_u8(MODE1, 0x00)
    }

    /// Reset the chip and give back the register access and delay
    pub fn release(mut self) -> Result<(R, D), Error<R::Error>> {
        self.reset()?;
        Ok((self.registers, self.delay))
    }

    /// Current PWM frequency derived from PRESCALE
    ///
    /// # Errors
    /// * [`Error::InvalidState`] if PRESCALE reads below 3 (never configured,
    ///   or a corrupted read)
    /// * [`Error::Io`] on transport failure
    pub fn frequency_hz(&mut self) -> Result<f32, Error<R::Error>> {
        let prescale = self.read_u8(PRESCALE)?;
        if prescale < PRESCALE_MIN {
            #[cfg(feature = "defmt")]
            defmt::warn!("PRESCALE reads {}, frequency unknown", prescale);

            return Err(Error::InvalidState { prescale });
        }
        Ok(self.reference_clock_hz as f32 / TICKS_PER_CYCLE / prescale as f32)
    }

    /// Prescale value that best approximates `frequency_hz`
    ///
    /// `round(reference / 4096 / frequency)`, accepted only within 3-255.
    pub fn prescale_for(&self, frequency_hz: f32) -> Result<u8, ArgumentError> {
        if !(frequency_hz.is_finite() && frequency_hz > 0.0) {
            return Err(ArgumentError::Frequency);
        }
        let exact = self.reference_clock_hz as f32 / TICKS_PER_CYCLE / frequency_hz;
        // Positive, so adding one half then truncating rounds to nearest
        let rounded = exact + 0.5;
        if rounded < PRESCALE_MIN as f32 || rounded >= 256.0 {
            return Err(ArgumentError::Frequency);
        }
        Ok(rounded as u8)
    }

    /// Change the PWM frequency of all channels
    ///
    /// Blocks for at least 5 ms while the oscillator restarts.
    ///
    /// # Errors
    /// * [`Error::InvalidArgument`] if the frequency needs a prescale outside
    ///   3-255; no register is touched
    /// * [`Error::Io`] on transport failure, possibly mid-sequence (see the
    ///   module docs)
    pub fn set_frequency_hz(&mut self, frequency_hz: f32) -> Result<(), Error<R::Error>> {
        let prescale = self
            .prescale_for(frequency_hz)
            .map_err(Error::InvalidArgument)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("PCA9685 frequency {} Hz -> prescale {}", frequency_hz, prescale);

        let old_mode = self.read_u8(MODE1)?;
        self.write_u8(MODE1, (old_mode & MODE1_KEEP_MASK) | MODE1_SLEEP)?;
        self.write_u8(PRESCALE, prescale)?;
        self.write_u8(MODE1, old_mode)?;
        self.delay.delay_ms(OSCILLATOR_SETTLE_MS);
        self.write_u8(MODE1, old_mode | MODE1_RESTART | MODE1_AI)?;

        Ok(())
    }

    /// View of one output channel
    ///
    /// # Errors
    /// * [`Error::InvalidArgument`] if `index >= 16`
    pub fn channel(&mut self, index: u8) -> Result<Channel<'_, R, D>, Error<R::Error>> {
        check_channel(index)?;
        Ok(Channel::new(self, index))
    }

    /// Raw (on, off) ticks of a channel
    pub fn channel_registers(&mut self, index: u8) -> Result<(u16, u16), Error<R::Error>> {
        check_channel(index)?;
        let mut buf = [0u8; 4];
        self.registers.read_registers(channel_base(index), &mut buf)?;
        Ok((
            u16::from_le_bytes([buf[0], buf[1]]),
            u16::from_le_bytes([buf[2], buf[3]]),
        ))
    }

    /// Write raw (on, off) ticks of a channel in one transfer
    pub fn set_channel_registers(
        &mut self,
        index: u8,
        on: u16,
        off: u16,
    ) -> Result<(), Error<R::Error>> {
        check_channel(index)?;
        let [on_l, on_h] = on.to_le_bytes();
        let [off_l, off_h] = off.to_le_bytes();

        #[cfg(feature = "defmt")]
        defmt::trace!("LED{} on={} off={}", index, on, off);

        self.registers
            .write_registers(channel_base(index), &[on_l, on_h, off_l, off_h])?;
        Ok(())
    }

    fn read_u8(&mut self, register: u8) -> Result<u8, Error<R::Error>> {
        let mut buf = [0u8; 1];
        self.registers.read_registers(register, &mut buf)?;
        Ok(buf[0])
    }

    fn write_u8(&mut self, register: u8, value: u8) -> Result<(), Error<R::Error>> {
        self.registers.write_registers(register, &[value])?;
        Ok(())
    }
}

fn check_channel<E>(index: u8) -> Result<(), Error<E>> {
    if index as usize >= CHANNEL_COUNT {
        return Err(Error::InvalidArgument(ArgumentError::Channel));
    }
    Ok(())
}
