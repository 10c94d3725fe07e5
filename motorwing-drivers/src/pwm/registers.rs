//! PCA9685 register map
//!
//! Only the registers the driver touches. Multi-byte values are
//! little-endian (low byte at the lower address).

/// Mode register 1
pub const MODE1: u8 = 0x00;

/// Frequency prescaler (writable only while MODE1.SLEEP is set)
pub const PRESCALE: u8 = 0xFE;

/// LED0_ON_L; channel `n` starts at `LED0_ON_L + 4 * n`
pub const LED0_ON_L: u8 = 0x06;

/// Low-power mode, oscillator off
pub const MODE1_SLEEP: u8 = 0x10;

/// Register auto-increment
pub const MODE1_AI: u8 = 0x20;

/// Restart PWM channels after sleep
pub const MODE1_RESTART: u8 = 0x80;

/// Bits of MODE1 carried through the sleep write (everything but RESTART)
pub const MODE1_KEEP_MASK: u8 = 0x7F;

/// Full-on flag in the ON tick (also the full-off flag in the OFF tick)
pub const FULL_ON: u16 = 0x1000;

/// Counter steps in one PWM period
pub const TICKS_PER_CYCLE: f32 = 4096.0;

/// Smallest prescale the oscillator accepts
pub const PRESCALE_MIN: u8 = 3;

/// Oscillator stabilization time after leaving sleep, from the datasheet
pub const OSCILLATOR_SETTLE_MS: u32 = 5;

/// First register of a channel's (on, off) pair
pub const fn channel_base(index: u8) -> u8 {
    LED0_ON_L + 4 * index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_base_addresses() {
        assert_eq!(channel_base(0), 0x06);
        assert_eq!(channel_base(1), 0x0A);
        assert_eq!(channel_base(15), 0x42);
    }
}
