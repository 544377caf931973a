//! # Addressing Modes
//!
//! This module defines the addressing modes of the 6502 and the resolver that
//! turns an instruction's operand bytes into an effective address and/or a
//! value.
//!
//! Eleven modes carry operand bytes; `Implicit` and `Accumulator` carry none.
//! Each mode has a fixed operand arity, and the resolver rejects a mismatch
//! with `ExecutionError::Addressing` rather than defaulting.
//!
//! ## Wraparound rules
//!
//! - Zero-page indexed: `(operand + index) mod 256`, never leaves page 0
//! - Absolute indexed and `(zp),Y`: 16-bit sum, wraps modulo 65536
//! - Zero-page pointer pairs for `(zp,X)` and `(zp),Y`: the high byte is read
//!   from `(pointer + 1) mod 256`
//! - `(abs)`: with `indirect_page_wrap`, the high byte is read from the same
//!   page as the low byte (`$10FF` pairs with `$1000`)

use crate::error::ExecutionError;
use crate::memory::MemoryBus;
use crate::registers::Registers;

/// 6502 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implicit,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, ASL A
    Accumulator,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80
    ZeroPage,

    /// Zero page address indexed by X register, wrapping within page 0.
    ///
    /// Example: LDA $80,X
    ZeroPageX,

    /// Zero page address indexed by Y register, wrapping within page 0.
    ///
    /// Example: LDX $80,Y
    ZeroPageY,

    /// Signed 8-bit offset from the address of the next instruction.
    ///
    /// Example: BEQ label
    Relative,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234
    Absolute,

    /// 16-bit address indexed by X register.
    ///
    /// Example: LDA $1234,X
    AbsoluteX,

    /// 16-bit address indexed by Y register.
    ///
    /// Example: LDA $1234,Y
    AbsoluteY,

    /// Indirect jump through 16-bit pointer. Only used by JMP.
    ///
    /// Example: JMP ($FFFC)
    Indirect,

    /// Indexed indirect: pointer at `(operand + X) mod 256`.
    ///
    /// Example: LDA ($40,X)
    IndirectX,

    /// Indirect indexed: pointer at `operand`, then `+ Y`.
    ///
    /// Example: LDA ($40),Y
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_len(self) -> usize {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }

    /// Total instruction size in bytes (opcode + operands).
    pub const fn instruction_len(self) -> usize {
        1 + self.operand_len()
    }
}

/// Result of operand resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// Implicit and accumulator operations: nothing fetched.
    None,
    /// Effective address only (stores, jumps, branches).
    Address(u16),
    /// Value only (immediate).
    Value(u8),
    /// Effective address and the value read from it through the bus.
    Both {
        /// Effective address
        address: u16,
        /// Value read from `address`
        value: u8,
    },
}

impl Operand {
    /// The resolved value, if one was fetched.
    pub fn value(&self) -> Option<u8> {
        match *self {
            Operand::Value(value) | Operand::Both { value, .. } => Some(value),
            Operand::None | Operand::Address(_) => None,
        }
    }

    /// The effective address, if the mode produces one.
    pub fn address(&self) -> Option<u16> {
        match *self {
            Operand::Address(address) | Operand::Both { address, .. } => Some(address),
            Operand::None | Operand::Value(_) => None,
        }
    }
}

/// Operand plus whether indexing (or a branch) crossed a page boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    /// The resolved operand
    pub operand: Operand,
    /// True when the effective address lies on a different page than the
    /// unindexed base (or, for branches, than the next instruction)
    pub page_crossed: bool,
}

/// Turns operand bytes into effective addresses and values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolver {
    /// Emulate the NMOS `JMP ($xxFF)` page wrap.
    pub indirect_page_wrap: bool,
}

impl Default for Resolver {
    fn default() -> Self {
        Self {
            indirect_page_wrap: true,
        }
    }
}

impl Resolver {
    /// Computes the effective address of `mode` for `operands`.
    ///
    /// Returns `Ok(None)` for modes without an address (implicit,
    /// accumulator, immediate). Pointer reads for the indirect modes go
    /// through `bus`. For `Relative`, `regs.pc` must already point past the
    /// instruction.
    pub fn effective_address<B: MemoryBus>(
        &self,
        mode: AddressingMode,
        operands: &[u8],
        regs: &Registers,
        bus: &mut B,
    ) -> Result<Option<(u16, bool)>, ExecutionError> {
        check_arity(mode, operands)?;

        let x = regs.x.get();
        let y = regs.y.get();

        let address = match mode {
            AddressingMode::Implicit | AddressingMode::Accumulator | AddressingMode::Immediate => {
                return Ok(None)
            }
            AddressingMode::ZeroPage => (u16::from(operands[0]), false),
            AddressingMode::ZeroPageX => (u16::from(operands[0].wrapping_add(x)), false),
            AddressingMode::ZeroPageY => (u16::from(operands[0].wrapping_add(y)), false),
            AddressingMode::Relative => {
                let next = regs.pc.get();
                let target = next.wrapping_add_signed(i16::from(operands[0] as i8));
                (target, crosses_page(next, target))
            }
            AddressingMode::Absolute => (word(operands[0], operands[1]), false),
            AddressingMode::AbsoluteX => indexed(word(operands[0], operands[1]), x),
            AddressingMode::AbsoluteY => indexed(word(operands[0], operands[1]), y),
            AddressingMode::Indirect => {
                let pointer = word(operands[0], operands[1]);
                let high_addr = if self.indirect_page_wrap {
                    (pointer & 0xFF00) | (pointer.wrapping_add(1) & 0x00FF)
                } else {
                    pointer.wrapping_add(1)
                };
                let lo = bus.read(pointer)?;
                let hi = bus.read(high_addr)?;
                (word(lo, hi), false)
            }
            AddressingMode::IndirectX => {
                let pointer = operands[0].wrapping_add(x);
                (zero_page_pointer(pointer, bus)?, false)
            }
            AddressingMode::IndirectY => {
                let base = zero_page_pointer(operands[0], bus)?;
                indexed(base, y)
            }
        };

        Ok(Some(address))
    }

    /// Resolves `mode` to an [`Operand`].
    ///
    /// When `fetch_value` is false, addressed modes yield
    /// `Operand::Address` and the bus is not read at the effective address
    /// (stores must not trigger read side effects). `Relative` always yields
    /// an address (the branch target).
    pub fn resolve<B: MemoryBus>(
        &self,
        mode: AddressingMode,
        operands: &[u8],
        regs: &Registers,
        bus: &mut B,
        fetch_value: bool,
    ) -> Result<Resolved, ExecutionError> {
        if mode == AddressingMode::Immediate {
            check_arity(mode, operands)?;
            return Ok(Resolved {
                operand: Operand::Value(operands[0]),
                page_crossed: false,
            });
        }

        let operand = match self.effective_address(mode, operands, regs, bus)? {
            None => Resolved {
                operand: Operand::None,
                page_crossed: false,
            },
            Some((address, page_crossed)) if fetch_value && mode != AddressingMode::Relative => {
                let value = bus.read(address)?;
                Resolved {
                    operand: Operand::Both { address, value },
                    page_crossed,
                }
            }
            Some((address, page_crossed)) => Resolved {
                operand: Operand::Address(address),
                page_crossed,
            },
        };
        Ok(operand)
    }
}

fn check_arity(mode: AddressingMode, operands: &[u8]) -> Result<(), ExecutionError> {
    let expected = mode.operand_len();
    if operands.len() != expected {
        return Err(ExecutionError::Addressing {
            mode,
            expected,
            actual: operands.len(),
        });
    }
    Ok(())
}

fn word(lo: u8, hi: u8) -> u16 {
    u16::from_le_bytes([lo, hi])
}

fn crosses_page(a: u16, b: u16) -> bool {
    a & 0xFF00 != b & 0xFF00
}

fn indexed(base: u16, index: u8) -> (u16, bool) {
    let address = base.wrapping_add(u16::from(index));
    (address, crosses_page(base, address))
}

fn zero_page_pointer<B: MemoryBus>(pointer: u8, bus: &mut B) -> Result<u16, ExecutionError> {
    let lo = bus.read(u16::from(pointer))?;
    let hi = bus.read(u16::from(pointer.wrapping_add(1)))?;
    Ok(word(lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::FlatMemory;
    use crate::registers::ProgramCounter;

    fn regs(x: u8, y: u8, pc: u16) -> Registers {
        let mut regs = Registers::default();
        regs.x.set(x);
        regs.y.set(y);
        regs.pc = ProgramCounter::new(pc);
        regs
    }

    fn address_of(
        mode: AddressingMode,
        operands: &[u8],
        regs: &Registers,
        mem: &mut FlatMemory,
    ) -> u16 {
        Resolver::default()
            .effective_address(mode, operands, regs, mem)
            .unwrap()
            .unwrap()
            .0
    }

    #[test]
    fn test_zero_page_x_stays_in_page_zero() {
        let mut mem = FlatMemory::new();
        let r = regs(0xFF, 0, 0);
        assert_eq!(address_of(AddressingMode::ZeroPageX, &[0x80], &r, &mut mem), 0x007F);
    }

    #[test]
    fn test_zero_page_y_stays_in_page_zero() {
        let mut mem = FlatMemory::new();
        let r = regs(0, 0x20, 0);
        assert_eq!(address_of(AddressingMode::ZeroPageY, &[0xF0], &r, &mut mem), 0x0010);
    }

    #[test]
    fn test_relative_negative_offset() {
        let mut mem = FlatMemory::new();
        let r = regs(0, 0, 0x1111);
        assert_eq!(address_of(AddressingMode::Relative, &[0x80], &r, &mut mem), 0x1091);
        assert_eq!(address_of(AddressingMode::Relative, &[0x7F], &r, &mut mem), 0x1190);
    }

    #[test]
    fn test_absolute_indexed_wraps_and_reports_page_cross() {
        let mut mem = FlatMemory::new();
        let r = regs(0x01, 0x10, 0);
        let resolver = Resolver::default();

        let (addr, crossed) = resolver
            .effective_address(AddressingMode::AbsoluteX, &[0xFF, 0xFF], &r, &mut mem)
            .unwrap()
            .unwrap();
        assert_eq!(addr, 0x0000);
        assert!(crossed);

        let (addr, crossed) = resolver
            .effective_address(AddressingMode::AbsoluteY, &[0x00, 0x20], &r, &mut mem)
            .unwrap()
            .unwrap();
        assert_eq!(addr, 0x2010);
        assert!(!crossed);
    }

    #[test]
    fn test_indirect_page_wrap() {
        let mut mem = FlatMemory::new();
        mem.load(0x10FF, &[0x34]);
        mem.load(0x1000, &[0x12]);
        mem.load(0x1100, &[0x56]);
        let r = regs(0, 0, 0);

        let wrapped = Resolver { indirect_page_wrap: true };
        let (addr, _) = wrapped
            .effective_address(AddressingMode::Indirect, &[0xFF, 0x10], &r, &mut mem)
            .unwrap()
            .unwrap();
        assert_eq!(addr, 0x1234);

        let linear = Resolver { indirect_page_wrap: false };
        let (addr, _) = linear
            .effective_address(AddressingMode::Indirect, &[0xFF, 0x10], &r, &mut mem)
            .unwrap()
            .unwrap();
        assert_eq!(addr, 0x5634);
    }

    #[test]
    fn test_indexed_indirect_wraps_pointer_in_zero_page() {
        let mut mem = FlatMemory::new();
        // (operand + X) = 0xFF: low byte at $FF, high byte at $00
        mem.load(0x00FF, &[0x00]);
        mem.load(0x0000, &[0x03]);
        let r = regs(0x0F, 0, 0);
        assert_eq!(address_of(AddressingMode::IndirectX, &[0xF0], &r, &mut mem), 0x0300);
    }

    #[test]
    fn test_indirect_indexed_adds_y_with_16_bit_wrap() {
        let mut mem = FlatMemory::new();
        mem.load(0x0040, &[0xF0, 0xFF]);
        let r = regs(0, 0x20, 0);
        let (addr, crossed) = Resolver::default()
            .effective_address(AddressingMode::IndirectY, &[0x40], &r, &mut mem)
            .unwrap()
            .unwrap();
        assert_eq!(addr, 0x0010);
        assert!(crossed);
    }

    #[test]
    fn test_resolve_shapes() {
        let mut mem = FlatMemory::new();
        mem.load(0x0010, &[0x77]);
        let r = regs(0, 0, 0x8002);
        let resolver = Resolver::default();

        let imm = resolver
            .resolve(AddressingMode::Immediate, &[0x42], &r, &mut mem, true)
            .unwrap();
        assert_eq!(imm.operand, Operand::Value(0x42));

        let both = resolver
            .resolve(AddressingMode::ZeroPage, &[0x10], &r, &mut mem, true)
            .unwrap();
        assert_eq!(both.operand, Operand::Both { address: 0x0010, value: 0x77 });

        let store = resolver
            .resolve(AddressingMode::ZeroPage, &[0x10], &r, &mut mem, false)
            .unwrap();
        assert_eq!(store.operand, Operand::Address(0x0010));

        let implied = resolver
            .resolve(AddressingMode::Accumulator, &[], &r, &mut mem, true)
            .unwrap();
        assert_eq!(implied.operand, Operand::None);

        let branch = resolver
            .resolve(AddressingMode::Relative, &[0x02], &r, &mut mem, true)
            .unwrap();
        assert_eq!(branch.operand, Operand::Address(0x8004));
    }

    #[test]
    fn test_arity_mismatch_is_an_error() {
        let mut mem = FlatMemory::new();
        let r = regs(0, 0, 0);
        let resolver = Resolver::default();

        assert_eq!(
            resolver.resolve(AddressingMode::Absolute, &[0x00], &r, &mut mem, true),
            Err(ExecutionError::Addressing {
                mode: AddressingMode::Absolute,
                expected: 2,
                actual: 1
            })
        );
        assert!(resolver
            .resolve(AddressingMode::Immediate, &[], &r, &mut mem, true)
            .is_err());
        assert!(resolver
            .resolve(AddressingMode::Implicit, &[0x01], &r, &mut mem, true)
            .is_err());
    }

    #[test]
    fn test_operand_sizes() {
        assert_eq!(AddressingMode::Implicit.operand_len(), 0);
        assert_eq!(AddressingMode::Relative.operand_len(), 1);
        assert_eq!(AddressingMode::Indirect.instruction_len(), 3);
    }
}
