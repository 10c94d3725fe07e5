//! Register-level device access
//!
//! [`RegisterAccess`] is the only interface the PCA9685 driver consumes:
//! read a run of bytes starting at a register address, or write a run of
//! bytes starting at a register address. Multi-byte values are laid out by
//! the caller; this layer moves bytes and nothing more.

use core::fmt;

use heapless::Vec;

use crate::i2c::I2cBus;

/// Largest payload accepted by a single [`I2cRegisters::write_registers`] call
///
/// One PWM channel is four bytes; the headroom covers the ALL_LED block and
/// small multi-channel bursts.
pub const MAX_WRITE_LEN: usize = 32;

/// Byte-oriented access to a device register set
pub trait RegisterAccess {
    /// Error type reported by the transport
    type Error;

    /// Read `buf.len()` bytes starting at `register`
    fn read_registers(&mut self, register: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write `data` starting at `register`
    fn write_registers(&mut self, register: u8, data: &[u8]) -> Result<(), Self::Error>;
}

impl<T: RegisterAccess + ?Sized> RegisterAccess for &mut T {
    type Error = T::Error;

    fn read_registers(&mut self, register: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read_registers(register, buf)
    }

    fn write_registers(&mut self, register: u8, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write_registers(register, data)
    }
}

/// Errors from [`I2cRegisters`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterError<E> {
    /// Underlying I2C bus error
    Bus(E),
    /// Payload longer than [`MAX_WRITE_LEN`]
    WriteTooLong {
        /// Requested payload length
        len: usize,
    },
}

impl<E> From<E> for RegisterError<E> {
    fn from(error: E) -> Self {
        RegisterError::Bus(error)
    }
}

impl<E: fmt::Debug> fmt::Display for RegisterError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RegisterError::Bus(e) => write!(f, "I2C error: {:?}", e),
            RegisterError::WriteTooLong { len } => {
                write!(f, "register write of {} bytes exceeds {}", len, MAX_WRITE_LEN)
            }
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for RegisterError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            RegisterError::Bus(e) => defmt::write!(f, "I2C error: {}", e),
            RegisterError::WriteTooLong { len } => {
                defmt::write!(f, "register write of {} bytes too long", len)
            }
        }
    }
}

/// [`RegisterAccess`] over an I2C device at a fixed 7-bit address
///
/// Reads use a repeated-start `write_read` of the register pointer; writes
/// send the register pointer followed by the payload in one transaction.
/// The device must have register auto-increment enabled for multi-byte
/// transfers.
pub struct I2cRegisters<B> {
    bus: B,
    address: u8,
}

impl<B: I2cBus> I2cRegisters<B> {
    /// Create register access for the device at `address`
    pub fn new(bus: B, address: u8) -> Self {
        Self { bus, address }
    }

    /// Device address on the bus
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the bus back
    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: I2cBus> RegisterAccess for I2cRegisters<B> {
    type Error = RegisterError<B::Error>;

    fn read_registers(&mut self, register: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.bus.write_read(self.address, &[register], buf)?;
        Ok(())
    }

    fn write_registers(&mut self, register: u8, data: &[u8]) -> Result<(), Self::Error> {
        let mut frame: Vec<u8, { MAX_WRITE_LEN + 1 }> = Vec::new();
        // Capacity is at least one, so the pointer byte always fits
        let _ = frame.push(register);
        frame
            .extend_from_slice(data)
            .map_err(|_| RegisterError::WriteTooLong { len: data.len() })?;

        self.bus.write(self.address, &frame)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bus that remembers the last frame it saw
    #[derive(Default)]
    struct LastFrameBus {
        address: u8,
        frame: Vec<u8, 40>,
        reply: [u8; 4],
        fail: bool,
    }

    impl I2cBus for LastFrameBus {
        type Error = ();

        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.address = address;
            self.frame.clear();
            self.frame.extend_from_slice(data).map_err(|_| ())
        }

        fn read(&mut self, _address: u8, _buf: &mut [u8]) -> Result<(), ()> {
            Err(())
        }

        fn write_read(&mut self, address: u8, write_data: &[u8], read_buf: &mut [u8]) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.write(address, write_data)?;
            read_buf.copy_from_slice(&self.reply[..read_buf.len()]);
            Ok(())
        }
    }

    #[test]
    fn test_write_prefixes_register_pointer() {
        let mut regs = I2cRegisters::new(LastFrameBus::default(), 0x40);
        regs.write_registers(0x06, &[0x00, 0x10, 0x00, 0x00]).unwrap();

        let bus = regs.release();
        assert_eq!(bus.address, 0x40);
        assert_eq!(&bus.frame[..], &[0x06, 0x00, 0x10, 0x00, 0x00]);
    }

    #[test]
    fn test_read_sends_pointer_then_fills_buffer() {
        let bus = LastFrameBus {
            reply: [0x79, 0x00, 0x00, 0x00],
            ..Default::default()
        };
        let mut regs = I2cRegisters::new(bus, 0x41);

        let mut buf = [0u8; 1];
        regs.read_registers(0xFE, &mut buf).unwrap();
        assert_eq!(buf, [0x79]);

        let bus = regs.release();
        assert_eq!(bus.address, 0x41);
        assert_eq!(&bus.frame[..], &[0xFE]);
    }

    #[test]
    fn test_oversized_write_rejected() {
        let mut regs = I2cRegisters::new(LastFrameBus::default(), 0x40);
        let payload = [0u8; MAX_WRITE_LEN + 1];

        assert_eq!(
            regs.write_registers(0x06, &payload),
            Err(RegisterError::WriteTooLong { len: MAX_WRITE_LEN + 1 })
        );
        // Nothing reached the bus
        assert!(regs.release().frame.is_empty());
    }

    #[test]
    fn test_bus_error_surfaces() {
        let bus = LastFrameBus {
            fail: true,
            ..Default::default()
        };
        let mut regs = I2cRegisters::new(bus, 0x40);

        assert_eq!(regs.write_registers(0x00, &[0x00]), Err(RegisterError::Bus(())));
        let mut buf = [0u8; 1];
        assert_eq!(regs.read_registers(0x00, &mut buf), Err(RegisterError::Bus(())));
    }
}
