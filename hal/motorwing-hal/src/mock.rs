//! In-memory PCA9685 register file for host tests
//!
//! [`RegisterFile`] stores all 256 register bytes, applies reads and writes
//! with auto-increment, logs every write and can be told to fail. The
//! [`RecordingDelay`] counts requested delay time without sleeping.

use embedded_hal::delay::DelayNs;
use heapless::Vec;

use crate::register::RegisterAccess;

/// Number of writes retained in the log
pub const LOG_CAPACITY: usize = 128;

/// Error returned by the mock when a failure is injected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MockError;

/// One logged register write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Write {
    /// First register written
    pub register: u8,
    /// Bytes written (truncated to four)
    pub data: Vec<u8, 4>,
}

/// Simulated register set
pub struct RegisterFile {
    registers: [u8; 256],
    log: Vec<Write, LOG_CAPACITY>,
    reads: usize,
    writes_before_failure: Option<usize>,
    fail_reads: bool,
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFile {
    /// All registers zero, no failures armed
    pub const fn new() -> Self {
        Self {
            registers: [0; 256],
            log: Vec::new(),
            reads: 0,
            writes_before_failure: None,
            fail_reads: false,
        }
    }

    /// Current value of one register
    pub fn register(&self, register: u8) -> u8 {
        self.registers[register as usize]
    }

    /// Preload a register without logging
    pub fn set_register(&mut self, register: u8, value: u8) {
        self.registers[register as usize] = value;
    }

    /// Every logged write, oldest first
    pub fn writes(&self) -> &[Write] {
        &self.log
    }

    /// Number of read transactions served
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Forget logged writes and the read count
    pub fn clear_log(&mut self) {
        self.log.clear();
        self.reads = 0;
    }

    /// Let `count` more writes succeed, then fail every later write
    pub fn fail_writes_after(&mut self, count: usize) {
        self.writes_before_failure = Some(count);
    }

    /// Make every read fail
    pub fn fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }
}

impl RegisterAccess for RegisterFile {
    type Error = MockError;

    fn read_registers(&mut self, register: u8, buf: &mut [u8]) -> Result<(), MockError> {
        if self.fail_reads {
            return Err(MockError);
        }
        self.reads += 1;
        for (offset, byte) in buf.iter_mut().enumerate() {
            *byte = self.registers[(register as usize + offset) & 0xFF];
        }
        Ok(())
    }

    fn write_registers(&mut self, register: u8, data: &[u8]) -> Result<(), MockError> {
        if let Some(remaining) = self.writes_before_failure.as_mut() {
            if *remaining == 0 {
                return Err(MockError);
            }
            *remaining -= 1;
        }
        for (offset, byte) in data.iter().enumerate() {
            self.registers[(register as usize + offset) & 0xFF] = *byte;
        }

        let mut logged: Vec<u8, 4> = Vec::new();
        let _ = logged.extend_from_slice(&data[..data.len().min(4)]);
        // A full log keeps its oldest entries
        let _ = self.log.push(Write {
            register,
            data: logged,
        });
        Ok(())
    }
}

/// Delay source that records requested time instead of sleeping
#[derive(Debug, Default)]
pub struct RecordingDelay {
    total_ns: u64,
    calls: usize,
}

impl RecordingDelay {
    /// Fresh recorder
    pub const fn new() -> Self {
        Self {
            total_ns: 0,
            calls: 0,
        }
    }

    /// Sum of every requested delay in nanoseconds
    pub fn total_ns(&self) -> u64 {
        self.total_ns
    }

    /// Number of delay requests
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
        self.calls += 1;
    }
}
