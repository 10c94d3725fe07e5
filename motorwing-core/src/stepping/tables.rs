//! Waveform and coil pattern tables

use crate::config::Microsteps;

/// Coil drive level used by every style except microstepping
pub const FULL_DRIVE: u8 = 255;

/// Quarter sine wave sampled at 8 microsteps, 8-bit scale
const MICROSTEP_CURVE_8: [u8; 9] = [0, 50, 98, 142, 180, 212, 236, 250, 255];

/// Quarter sine wave sampled at 16 microsteps, 8-bit scale
const MICROSTEP_CURVE_16: [u8; 17] = [
    0, 25, 50, 74, 98, 120, 141, 162, 180, 197, 212, 225, 236, 244, 250, 253, 255,
];

/// Bridge patterns per half-step bucket for full and half stepping
///
/// Even buckets energize one coil, odd buckets two.
pub(crate) const HALF_STEP_LATCH: [u8; 8] = [0x1, 0x3, 0x2, 0x6, 0x4, 0xC, 0x8, 0x9];

/// Bridge patterns per quadrant while microstepping
pub(crate) const MICROSTEP_LATCH: [u8; 4] = [0x3, 0x6, 0xC, 0x9];

/// Quarter-wave table for a resolution, `count + 1` entries from 0 to 255
pub const fn microstep_curve(microsteps: Microsteps) -> &'static [u8] {
    match microsteps {
        Microsteps::Eight => &MICROSTEP_CURVE_8,
        Microsteps::Sixteen => &MICROSTEP_CURVE_16,
    }
}
