//! # Error Types
//!
//! Every failure the core can report is a programmer or data error (a malformed
//! ROM, an incomplete opcode table, a bad memory map). None of them are
//! recovered locally: they propagate to the driver, which is expected to stop
//! stepping and report the failure.
//!
//! - [`BusError`]: permission and address failures raised at the bus boundary
//! - [`ExecutionError`]: decode and addressing failures raised by `step()`,
//!   plus any bus failure that happened while executing
//! - [`ConstructionError`]: duplicate opcode registrations, bad memory maps and
//!   invalid ROM images, raised once at startup
//! - [`BitIndexError`]: out-of-range bit index on a register

use thiserror::Error;

use crate::addressing::AddressingMode;
use crate::opcodes::Mnemonic;

/// Kind of bus access that was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// A CPU (or DMA) read.
    Read,
    /// A CPU write.
    Write,
}

impl std::fmt::Display for Access {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Access::Read => write!(f, "read"),
            Access::Write => write!(f, "write"),
        }
    }
}

/// Failure raised by the memory bus.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BusError {
    /// Read from a write-only slot, or write to a read-only slot (including
    /// program storage). The target is never mutated.
    #[error("{access} not permitted at ${address:04X}")]
    Permission {
        /// Address that was accessed
        address: u16,
        /// The rejected access
        access: Access,
    },

    /// Access to an address that no installed region backs.
    #[error("no device mapped at ${address:04X}")]
    Address {
        /// Address that was accessed
        address: u16,
    },
}

/// Failure raised while executing an instruction or interrupt sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// The opcode byte has no entry in the opcode table.
    #[error("undefined opcode ${opcode:02X} at ${pc:04X}")]
    Decode {
        /// The fetched opcode byte
        opcode: u8,
        /// Address the opcode was fetched from
        pc: u16,
    },

    /// The operand bytes handed to the resolver do not match the arity of the
    /// addressing mode, or the mode cannot serve the requested operation.
    #[error("{mode:?} expects {expected} operand byte(s), got {actual}")]
    Addressing {
        /// Addressing mode being resolved
        mode: AddressingMode,
        /// Operand bytes the mode requires
        expected: usize,
        /// Operand bytes actually supplied
        actual: usize,
    },

    /// An operation received an operand shape it cannot execute against
    /// (for example a store with no effective address).
    #[error("{mnemonic} cannot execute with {mode:?} operand")]
    InvalidOperand {
        /// Operation being executed
        mnemonic: Mnemonic,
        /// Addressing mode of the operand
        mode: AddressingMode,
    },

    /// A bus access failed part-way through the instruction.
    #[error(transparent)]
    Bus(#[from] BusError),
}

/// Failure raised while building the opcode table, the bus decode table or
/// the program ROM image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// The same opcode byte was registered twice.
    #[error("opcode ${opcode:02X} registered twice")]
    DuplicateOpcode {
        /// The repeated opcode byte
        opcode: u8,
    },

    /// The same (mnemonic, addressing mode) pair was registered under two
    /// opcode bytes.
    #[error("{mnemonic} {mode:?} already encoded as ${existing:02X}")]
    DuplicateEncoding {
        /// Operation of the repeated pair
        mnemonic: Mnemonic,
        /// Addressing mode of the repeated pair
        mode: AddressingMode,
        /// Opcode byte that already holds the pair
        existing: u8,
    },

    /// Two bus regions claim the same address.
    #[error("region ${start:04X}-${end:04X} overlaps region ${existing_start:04X}-${existing_end:04X}")]
    Overlap {
        /// First address of the new region
        start: u16,
        /// Last address of the new region
        end: u16,
        /// First address of the conflicting region
        existing_start: u16,
        /// Last address of the conflicting region
        existing_end: u16,
    },

    /// An address is not covered by any bus region.
    #[error("address ${address:04X} is not covered by any region")]
    Gap {
        /// First uncovered address
        address: u16,
    },

    /// A region or device declared a zero-length window.
    #[error("empty region at ${start:04X}")]
    EmptyRange {
        /// First address of the region
        start: u16,
    },

    /// A region maps offsets beyond the end of its device.
    #[error("region at ${start:04X} maps offsets up to {last_offset} on a {device_size}-byte device")]
    Window {
        /// First address of the region
        start: u16,
        /// Highest device offset the region can produce
        last_offset: u32,
        /// Size of the device in bytes
        device_size: u16,
    },

    /// A region refers to a device that was never installed.
    #[error("unknown device #{id}")]
    UnknownDevice {
        /// Index of the missing device
        id: usize,
    },

    /// A program ROM image is empty, larger than the program window, or not a
    /// multiple of the bank unit.
    #[error("invalid ROM size {size} bytes (bank unit {bank} bytes)")]
    InvalidRomSize {
        /// Image length in bytes
        size: usize,
        /// Required bank unit in bytes
        bank: usize,
    },
}

/// A bit index beyond the width of the register it was applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("bit index {index} out of range for {width}-bit register")]
pub struct BitIndexError {
    /// Requested bit index
    pub index: u8,
    /// Register width in bits
    pub width: u8,
}
