//! RAM device implementation.
//!
//! Provides readable and writable memory storage via the Device trait.

use super::Device;

/// Size of the console's internal work RAM.
pub const INTERNAL_RAM_SIZE: u16 = 0x0800;

/// Simple RAM device with readable and writable storage.
///
/// On the console this backs the 2KB of internal RAM, which the bus mirrors
/// four times across `$0000-$1FFF`.
///
/// # Examples
///
/// ```rust
/// use nes_cpu::{RamDevice, Device};
///
/// let mut ram = RamDevice::new(1024);
///
/// ram.write(0x42, 0xAA);
/// assert_eq!(ram.read(0x42), 0xAA);
/// ```
pub struct RamDevice {
    data: Vec<u8>,
}

impl RamDevice {
    /// Create a new RAM device with the specified size.
    ///
    /// All bytes are initialized to zero.
    pub fn new(size: u16) -> Self {
        Self {
            data: vec![0; size as usize],
        }
    }

    /// Create the console's 2KB internal RAM.
    pub fn internal() -> Self {
        Self::new(INTERNAL_RAM_SIZE)
    }
}

impl Device for RamDevice {
    fn read(&mut self, offset: u16) -> u8 {
        self.data[offset as usize]
    }

    fn write(&mut self, offset: u16, value: u8) {
        self.data[offset as usize] = value;
    }

    fn size(&self) -> u16 {
        self.data.len() as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_ram_size() {
        let ram = RamDevice::internal();
        assert_eq!(ram.size(), 0x0800);
    }

    #[test]
    fn test_ram_read_write() {
        let mut ram = RamDevice::new(256);

        ram.write(0, 0xAA);
        ram.write(100, 0xBB);
        ram.write(255, 0xCC);

        assert_eq!(ram.read(0), 0xAA);
        assert_eq!(ram.read(100), 0xBB);
        assert_eq!(ram.read(255), 0xCC);
        assert_eq!(ram.read(1), 0x00);
    }
}
