//! # Register File
//!
//! The six architectural registers of the 6502:
//!
//! - **A, X, Y, S**: 8-bit unsigned [`Register`]s
//! - **PC**: 16-bit unsigned [`ProgramCounter`]
//! - **P**: [`StatusFlags`], seven independent flags packed as `NV-BDIZC`
//!
//! Register arithmetic is closed over the unsigned ring of the register's
//! width. `add`/`subtract`/`increment`/`decrement` wrap the stored value and
//! report whether wraparound occurred.

use crate::error::BitIndexError;

/// 8-bit unsigned register with wrapping arithmetic.
///
/// # Examples
///
/// ```
/// use nes_cpu::Register;
///
/// let mut x = Register::new(0xFF);
/// assert!(x.increment()); // wrapped past 255
/// assert_eq!(x.get(), 0x00);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Register(u8);

impl Register {
    /// Width of the register in bits.
    pub const WIDTH: u8 = 8;

    /// Creates a register holding `value`.
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Returns the stored value.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Replaces the stored value.
    pub fn set(&mut self, value: u8) {
        self.0 = value;
    }

    /// Adds one, returning true when the value wrapped from 0xFF to 0x00.
    pub fn increment(&mut self) -> bool {
        self.add(1)
    }

    /// Subtracts one, returning true when the value wrapped from 0x00 to 0xFF.
    pub fn decrement(&mut self) -> bool {
        self.subtract(1)
    }

    /// Adds `value`, returning true when the sum crossed 256.
    pub fn add(&mut self, value: u8) -> bool {
        let (result, carry) = self.0.overflowing_add(value);
        self.0 = result;
        carry
    }

    /// Subtracts `value`, returning true when the difference crossed 0.
    pub fn subtract(&mut self, value: u8) -> bool {
        let (result, borrow) = self.0.overflowing_sub(value);
        self.0 = result;
        borrow
    }

    /// Returns bit `index` (0 = least significant).
    pub fn bit(self, index: u8) -> Result<bool, BitIndexError> {
        check_index(index, Self::WIDTH)?;
        Ok(self.0 & (1 << index) != 0)
    }

    /// Sets or clears bit `index` (0 = least significant).
    pub fn set_bit(&mut self, index: u8, value: bool) -> Result<(), BitIndexError> {
        check_index(index, Self::WIDTH)?;
        if value {
            self.0 |= 1 << index;
        } else {
            self.0 &= !(1 << index);
        }
        Ok(())
    }
}

/// 16-bit program counter with wrapping arithmetic modulo 65536.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgramCounter(u16);

impl ProgramCounter {
    /// Width of the register in bits.
    pub const WIDTH: u8 = 16;

    /// Creates a program counter holding `value`.
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Returns the stored address.
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Replaces the stored address.
    pub fn set(&mut self, value: u16) {
        self.0 = value;
    }

    /// Adds one, returning true when the address wrapped from 0xFFFF.
    pub fn increment(&mut self) -> bool {
        self.add(1)
    }

    /// Subtracts one, returning true when the address wrapped from 0x0000.
    pub fn decrement(&mut self) -> bool {
        self.subtract(1)
    }

    /// Adds `value`, returning true when the sum crossed 65536.
    pub fn add(&mut self, value: u16) -> bool {
        let (result, carry) = self.0.overflowing_add(value);
        self.0 = result;
        carry
    }

    /// Subtracts `value`, returning true when the difference crossed 0.
    pub fn subtract(&mut self, value: u16) -> bool {
        let (result, borrow) = self.0.overflowing_sub(value);
        self.0 = result;
        borrow
    }

    /// Returns bit `index` (0 = least significant).
    pub fn bit(self, index: u8) -> Result<bool, BitIndexError> {
        check_index(index, Self::WIDTH)?;
        Ok(self.0 & (1 << index) != 0)
    }

    /// Sets or clears bit `index` (0 = least significant).
    pub fn set_bit(&mut self, index: u8, value: bool) -> Result<(), BitIndexError> {
        check_index(index, Self::WIDTH)?;
        if value {
            self.0 |= 1 << index;
        } else {
            self.0 &= !(1 << index);
        }
        Ok(())
    }
}

fn check_index(index: u8, width: u8) -> Result<(), BitIndexError> {
    if index < width {
        Ok(())
    } else {
        Err(BitIndexError { index, width })
    }
}

/// Bit positions of the packed status byte.
pub mod flag {
    /// Carry (bit 0)
    pub const CARRY: u8 = 0b0000_0001;
    /// Zero (bit 1)
    pub const ZERO: u8 = 0b0000_0010;
    /// Interrupt disable (bit 2)
    pub const INTERRUPT_DISABLE: u8 = 0b0000_0100;
    /// Decimal mode (bit 3)
    pub const DECIMAL: u8 = 0b0000_1000;
    /// Break command (bit 4)
    pub const BREAK: u8 = 0b0001_0000;
    /// Unused, always reads as 1 (bit 5)
    pub const UNUSED: u8 = 0b0010_0000;
    /// Overflow (bit 6)
    pub const OVERFLOW: u8 = 0b0100_0000;
    /// Negative (bit 7)
    pub const NEGATIVE: u8 = 0b1000_0000;
}

/// Processor status register (P).
///
/// Seven independent flags. Bit 5 is not stored: it always packs as 1.
/// Power-on state has BreakCommand and InterruptDisable set, all others clear.
///
/// # Examples
///
/// ```
/// use nes_cpu::StatusFlags;
///
/// let p = StatusFlags::default();
/// assert_eq!(p.to_byte(), 0b0011_0100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusFlags {
    negative: bool,
    overflow: bool,
    break_command: bool,
    decimal: bool,
    interrupt_disable: bool,
    zero: bool,
    carry: bool,
}

impl Default for StatusFlags {
    fn default() -> Self {
        Self {
            negative: false,
            overflow: false,
            break_command: true,
            decimal: false,
            interrupt_disable: true,
            zero: false,
            carry: false,
        }
    }
}

impl StatusFlags {
    /// Packs the flags into a status byte (bit 5 always set).
    pub fn to_byte(self) -> u8 {
        let mut status = flag::UNUSED;
        for (set, mask) in [
            (self.negative, flag::NEGATIVE),
            (self.overflow, flag::OVERFLOW),
            (self.break_command, flag::BREAK),
            (self.decimal, flag::DECIMAL),
            (self.interrupt_disable, flag::INTERRUPT_DISABLE),
            (self.zero, flag::ZERO),
            (self.carry, flag::CARRY),
        ] {
            if set {
                status |= mask;
            }
        }
        status
    }

    /// Unpacks a saved status byte. Only instruction semantics that restore
    /// a pulled flag byte (PLP, RTI) should use this.
    pub fn from_byte(value: u8) -> Self {
        Self {
            negative: value & flag::NEGATIVE != 0,
            overflow: value & flag::OVERFLOW != 0,
            break_command: value & flag::BREAK != 0,
            decimal: value & flag::DECIMAL != 0,
            interrupt_disable: value & flag::INTERRUPT_DISABLE != 0,
            zero: value & flag::ZERO != 0,
            carry: value & flag::CARRY != 0,
        }
    }

    /// Sets Zero and Negative from `value`.
    pub fn update_zn(&mut self, value: u8) {
        self.zero = value == 0;
        self.negative = value & 0x80 != 0;
    }

    pub fn negative(&self) -> bool {
        self.negative
    }

    pub fn set_negative(&mut self, value: bool) {
        self.negative = value;
    }

    pub fn overflow(&self) -> bool {
        self.overflow
    }

    pub fn set_overflow(&mut self, value: bool) {
        self.overflow = value;
    }

    pub fn break_command(&self) -> bool {
        self.break_command
    }

    pub fn set_break_command(&mut self, value: bool) {
        self.break_command = value;
    }

    pub fn decimal(&self) -> bool {
        self.decimal
    }

    pub fn set_decimal(&mut self, value: bool) {
        self.decimal = value;
    }

    pub fn interrupt_disable(&self) -> bool {
        self.interrupt_disable
    }

    pub fn set_interrupt_disable(&mut self, value: bool) {
        self.interrupt_disable = value;
    }

    pub fn zero(&self) -> bool {
        self.zero
    }

    pub fn set_zero(&mut self, value: bool) {
        self.zero = value;
    }

    pub fn carry(&self) -> bool {
        self.carry
    }

    pub fn set_carry(&mut self, value: bool) {
        self.carry = value;
    }
}

/// Power-on value of the stack pointer.
pub const STACK_RESET: u8 = 0xFD;

/// The complete architectural register file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    /// Accumulator
    pub a: Register,
    /// X index register
    pub x: Register,
    /// Y index register
    pub y: Register,
    /// Stack pointer (offset into page 0x0100)
    pub s: Register,
    /// Program counter
    pub pc: ProgramCounter,
    /// Processor status
    pub p: StatusFlags,
}

impl Default for Registers {
    fn default() -> Self {
        Self {
            a: Register::default(),
            x: Register::default(),
            y: Register::default(),
            s: Register::new(STACK_RESET),
            pc: ProgramCounter::default(),
            p: StatusFlags::default(),
        }
    }
}
