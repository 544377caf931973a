//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from the
//! memory map it runs against:
//!
//! - [`SystemBus`](crate::SystemBus): the permissioned decode table used by a
//!   console (RAM mirrors, peripheral register windows, program ROM)
//! - [`FlatMemory`]: 64KB of plain RAM for tests and simple hosts
//!
//! ## Design Principles
//!
//! Unlike bare 6502 hardware, accesses can fail:
//! - A read from a write-only slot or a write to a read-only slot is a
//!   `BusError::Permission`
//! - An access to an address no region backs is a `BusError::Address`
//!
//! Reads take `&mut self` because reading a peripheral register may mutate
//! peripheral state (latch resets, buffered reads).

use crate::error::BusError;

/// Memory bus trait for CPU reads and writes.
///
/// All processor accesses (instruction fetch, operand reads, stack traffic,
/// vector loads) go through this trait, in program order.
///
/// # Examples
///
/// ```
/// use nes_cpu::{FlatMemory, MemoryBus};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x1234, 0x42).unwrap();
/// assert_eq!(mem.read(0x1234).unwrap(), 0x42);
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address.
    ///
    /// Any side effect of the read fires after the value is sampled, so the
    /// caller always observes the pre-side-effect value.
    fn read(&mut self, addr: u16) -> Result<u8, BusError>;

    /// Writes a byte to the specified 16-bit address.
    ///
    /// A rejected write leaves the target unchanged.
    fn write(&mut self, addr: u16, value: u8) -> Result<(), BusError>;

    /// Checks if the level-triggered IRQ line is asserted.
    ///
    /// Called once per `step()` before the opcode fetch. Returns `false` for
    /// memories without interrupt-capable devices.
    fn irq_active(&self) -> bool {
        false
    }

    /// Takes the number of CPU cycles the bus stalled the processor for
    /// since the last call (for example an OAM DMA transfer), resetting the
    /// count to zero.
    fn take_stall_cycles(&mut self) -> u32 {
        0
    }
}

/// Simple 64KB flat memory implementation.
///
/// All 65536 addresses are writable RAM initialized to 0x00. Never fails.
///
/// # Examples
///
/// ```
/// use nes_cpu::{Cpu, FlatMemory};
///
/// let mut memory = FlatMemory::new();
/// memory.load(0xFFFC, &[0x00, 0x80]); // reset vector -> $8000
/// memory.load(0x8000, &[0xEA]);       // NOP
///
/// let mut cpu = Cpu::new(memory).unwrap();
/// cpu.reset().unwrap();
/// assert_eq!(cpu.pc(), 0x8000);
/// ```
pub struct FlatMemory {
    data: Box<[u8; 65536]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; 65536]),
        }
    }

    /// Copies `bytes` into memory starting at `addr`, wrapping at 0xFFFF.
    pub fn load(&mut self, addr: u16, bytes: &[u8]) {
        let mut target = addr;
        for &byte in bytes {
            self.data[target as usize] = byte;
            target = target.wrapping_add(1);
        }
    }

    /// Returns the byte at `addr` without going through the bus.
    pub fn peek(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&mut self, addr: u16) -> Result<u8, BusError> {
        Ok(self.data[addr as usize])
    }

    fn write(&mut self, addr: u16, value: u8) -> Result<(), BusError> {
        self.data[addr as usize] = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_memory_read_write() {
        let mut mem = FlatMemory::new();

        assert_eq!(mem.read(0x0000), Ok(0x00));
        assert_eq!(mem.read(0xFFFF), Ok(0x00));

        mem.write(0x1234, 0x42).unwrap();
        assert_eq!(mem.read(0x1234), Ok(0x42));

        assert_eq!(mem.peek(0x1233), 0x00);
        assert_eq!(mem.peek(0x1235), 0x00);
    }

    #[test]
    fn test_flat_memory_load_wraps() {
        let mut mem = FlatMemory::new();
        mem.load(0xFFFE, &[0x01, 0x02, 0x03]);

        assert_eq!(mem.peek(0xFFFE), 0x01);
        assert_eq!(mem.peek(0xFFFF), 0x02);
        assert_eq!(mem.peek(0x0000), 0x03);
    }

    #[test]
    fn test_flat_memory_has_no_irq_or_stalls() {
        let mut mem = FlatMemory::new();
        assert!(!mem.irq_active());
        assert_eq!(mem.take_stall_cycles(), 0);
    }
}
