//! Generic block of peripheral registers.
//!
//! A `RegisterBlock` latches every byte written to it and returns the latched
//! value on read. It carries the slot permissions of the peripheral it stands
//! in for, so a host without a graphics or audio implementation still gets
//! exact permission behavior on those windows.

use super::{Device, Permission};

use Permission::{ReadOnly, ReadWrite, WriteOnly};

/// Slot permissions of the graphics register block (`$2000-$2007`).
///
/// CTRL, MASK, OAMADDR, SCROLL and ADDR are write-only; STATUS is read-only;
/// OAMDATA and DATA are read-write.
pub const PPU_PERMISSIONS: [Permission; 8] = [
    WriteOnly, WriteOnly, ReadOnly, WriteOnly, ReadWrite, WriteOnly, WriteOnly, ReadWrite,
];

/// Slot permissions of the audio/IO block (`$4000-$4017`).
///
/// Channel registers are write-only. Offset 0x14 is the DMA trigger, which
/// the processor owns. Channel status and the two controller ports are
/// read-write.
pub const APU_IO_PERMISSIONS: [Permission; 24] = [
    WriteOnly, WriteOnly, WriteOnly, WriteOnly, // pulse 1
    WriteOnly, WriteOnly, WriteOnly, WriteOnly, // pulse 2
    WriteOnly, WriteOnly, WriteOnly, WriteOnly, // triangle
    WriteOnly, WriteOnly, WriteOnly, WriteOnly, // noise
    WriteOnly, WriteOnly, WriteOnly, WriteOnly, // DMC
    WriteOnly, ReadWrite, ReadWrite, ReadWrite, // OAMDMA, status, JOY1, JOY2/frame counter
];

/// Register window that latches writes and serves latched values on read.
///
/// # Examples
///
/// ```rust
/// use nes_cpu::{Device, Permission, RegisterBlock};
///
/// let mut ppu = RegisterBlock::ppu();
/// assert_eq!(ppu.size(), 8);
/// assert_eq!(ppu.permission(2), Permission::ReadOnly);
///
/// ppu.write(0, 0x80);
/// assert_eq!(ppu.latched(0), 0x80);
/// ```
#[derive(Debug, Clone)]
pub struct RegisterBlock {
    values: Vec<u8>,
    permissions: Vec<Permission>,
}

impl RegisterBlock {
    /// Creates a block with one slot per permission entry.
    pub fn new(permissions: &[Permission]) -> Self {
        Self {
            values: vec![0; permissions.len()],
            permissions: permissions.to_vec(),
        }
    }

    /// Stand-in for the 8-register graphics block.
    pub fn ppu() -> Self {
        Self::new(&PPU_PERMISSIONS)
    }

    /// Stand-in for the 24-register audio/IO block.
    pub fn apu_io() -> Self {
        Self::new(&APU_IO_PERMISSIONS)
    }

    /// Last value written to (or preset at) `offset`.
    pub fn latched(&self, offset: u16) -> u8 {
        self.values[offset as usize]
    }

    /// Presets the value a read of `offset` will return.
    pub fn preset(&mut self, offset: u16, value: u8) {
        self.values[offset as usize] = value;
    }
}

impl Device for RegisterBlock {
    fn read(&mut self, offset: u16) -> u8 {
        self.values[offset as usize]
    }

    fn write(&mut self, offset: u16, value: u8) {
        self.values[offset as usize] = value;
    }

    fn size(&self) -> u16 {
        self.values.len() as u16
    }

    fn permission(&self, offset: u16) -> Permission {
        self.permissions[offset as usize]
    }
}
