//! Peripheral devices for the memory-mapped bus.
//!
//! Peripheral registers are modelled as a capability interface: each device
//! exposes `read`/`write` on an offset within its own window and declares a
//! [`Permission`] per slot. Side effects (latch resets, buffered reads) stay
//! local to each device implementation; the [`SystemBus`](crate::SystemBus)
//! only routes and enforces permissions.
//!
//! # Architecture
//!
//! - **Device trait**: offset-addressed register window with per-slot permissions
//! - **DmaSink trait**: receiver of the one-page OAM DMA copy
//! - **Implementations**: internal RAM, program ROM, and a generic register block
//!
//! # Example
//!
//! ```rust
//! use nes_cpu::{Device, Permission, RamDevice};
//!
//! let mut ram = RamDevice::new(0x0800);
//! ram.write(0x10, 0x42);
//! assert_eq!(ram.read(0x10), 0x42);
//! assert_eq!(ram.permission(0x10), Permission::ReadWrite);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

pub mod ram;
pub mod register_block;
pub mod rom;

pub use ram::RamDevice;
pub use register_block::RegisterBlock;
pub use rom::{ProgramRom, PRG_BANK_SIZE};

/// Access permission of a single bus slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Writes fail with a permission error.
    ReadOnly,
    /// Reads fail with a permission error.
    WriteOnly,
    /// Both reads and writes are allowed.
    ReadWrite,
}

impl Permission {
    /// Returns true if reads are allowed.
    pub fn readable(self) -> bool {
        matches!(self, Permission::ReadOnly | Permission::ReadWrite)
    }

    /// Returns true if writes are allowed.
    pub fn writable(self) -> bool {
        matches!(self, Permission::WriteOnly | Permission::ReadWrite)
    }
}

/// Abstract interface for memory-mapped hardware devices.
///
/// The bus calls these methods with offset-based addressing (0 to size-1)
/// after mirror expansion, and only after the slot's [`Permission`] allows
/// the access.
///
/// # Design
///
/// - **Offset-based**: Device receives offset (0 to size-1), not absolute address
/// - **Mutable read**: Reading a register may have side effects (latch resets).
///   The returned value is the one sampled before the side effect fires.
/// - **Permission per slot**: Defaults to read-write everywhere
///
/// # Examples
///
/// ```rust
/// use nes_cpu::{Device, Permission};
///
/// /// A status register that clears its ready flag when read.
/// struct Status {
///     ready: bool,
/// }
///
/// impl Device for Status {
///     fn read(&mut self, _offset: u16) -> u8 {
///         let value = if self.ready { 0x80 } else { 0x00 };
///         self.ready = false;
///         value
///     }
///
///     fn write(&mut self, _offset: u16, _value: u8) {}
///
///     fn size(&self) -> u16 {
///         1
///     }
///
///     fn permission(&self, _offset: u16) -> Permission {
///         Permission::ReadOnly
///     }
/// }
/// ```
pub trait Device {
    /// Read byte from device at offset relative to its window.
    fn read(&mut self, offset: u16) -> u8;

    /// Write byte to device at offset relative to its window.
    fn write(&mut self, offset: u16, value: u8);

    /// Return size of device's address space in bytes.
    fn size(&self) -> u16;

    /// Access permission of the slot at `offset`.
    fn permission(&self, _offset: u16) -> Permission {
        Permission::ReadWrite
    }

    /// Device's contribution to the shared, level-triggered IRQ line.
    fn irq_pending(&self) -> bool {
        false
    }
}

/// Receiver of an OAM DMA transfer.
///
/// Writing page number `$XX` to the DMA trigger register copies
/// `$XX00-$XXFF` from the bus into the sink's buffer.
pub trait DmaSink {
    /// Accepts one full page read from the bus.
    fn receive_page(&mut self, page: &[u8; 256]);
}

/// Shared handle: lets a host keep access to a device after installing it on
/// the bus (for example to inspect a sprite buffer filled by DMA).
impl<D: Device> Device for Rc<RefCell<D>> {
    fn read(&mut self, offset: u16) -> u8 {
        self.borrow_mut().read(offset)
    }

    fn write(&mut self, offset: u16, value: u8) {
        self.borrow_mut().write(offset, value);
    }

    fn size(&self) -> u16 {
        self.borrow().size()
    }

    fn permission(&self, offset: u16) -> Permission {
        self.borrow().permission(offset)
    }

    fn irq_pending(&self) -> bool {
        self.borrow().irq_pending()
    }
}

impl<S: DmaSink> DmaSink for Rc<RefCell<S>> {
    fn receive_page(&mut self, page: &[u8; 256]) {
        self.borrow_mut().receive_page(page);
    }
}
