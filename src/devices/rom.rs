//! Program ROM device.
//!
//! The cartridge loader (outside this crate) hands the core a contiguous PRG
//! image. It is mapped read-only from `$8000` to the top of the address space;
//! a single 16KB bank is mirrored into both halves.

use super::{Device, Permission};
use crate::error::ConstructionError;

/// Bank unit of a program ROM image (16KB).
pub const PRG_BANK_SIZE: usize = 0x4000;

/// Size of the program window `$8000-$FFFF` (32KB).
pub const PRG_WINDOW_SIZE: usize = 0x8000;

/// Read-only program storage.
///
/// Every slot reports [`Permission::ReadOnly`], so the bus rejects writes
/// before they reach the device.
///
/// # Examples
///
/// ```rust
/// use nes_cpu::{Device, ProgramRom};
///
/// let mut image = vec![0xEA; 0x4000];
/// image[0x3FFC] = 0x00; // reset vector low byte ($FFFC after mirroring)
/// image[0x3FFD] = 0x80; // reset vector high byte
///
/// let mut rom = ProgramRom::new(image).unwrap();
/// assert_eq!(rom.size(), 0x4000);
/// assert_eq!(rom.read(0x3FFD), 0x80);
/// ```
#[derive(Debug, Clone)]
pub struct ProgramRom {
    data: Vec<u8>,
}

impl ProgramRom {
    /// Wraps a PRG image.
    ///
    /// # Errors
    ///
    /// `ConstructionError::InvalidRomSize` if the image is empty, larger than
    /// the 32KB program window, or not a multiple of the 16KB bank unit.
    pub fn new(data: Vec<u8>) -> Result<Self, ConstructionError> {
        let size = data.len();
        if size == 0 || size > PRG_WINDOW_SIZE || size % PRG_BANK_SIZE != 0 {
            return Err(ConstructionError::InvalidRomSize {
                size,
                bank: PRG_BANK_SIZE,
            });
        }
        Ok(Self { data })
    }

    /// Number of 16KB banks in the image.
    pub fn banks(&self) -> usize {
        self.data.len() / PRG_BANK_SIZE
    }
}

impl Device for ProgramRom {
    fn read(&mut self, offset: u16) -> u8 {
        self.data[offset as usize]
    }

    fn write(&mut self, _offset: u16, _value: u8) {
        // Unreachable through the bus: every slot is read-only.
    }

    fn size(&self) -> u16 {
        self.data.len() as u16
    }

    fn permission(&self, _offset: u16) -> Permission {
        Permission::ReadOnly
    }
}
