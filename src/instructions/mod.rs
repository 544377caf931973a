//! # 6502 Instruction Implementations
//!
//! Operation semantics, organized by category. The engine has already
//! fetched the opcode and its operand bytes and resolved the addressing mode
//! by the time [`execute`] runs, so each operation only sees a [`Decoded`]
//! instruction: its mnemonic, mode and resolved operand.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic and logic operations (ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT)
//! - **branches**: Conditional branch instructions (BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS)
//! - **shifts**: Shift and rotate operations (ASL, LSR, ROL, ROR)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, STA, STX, STY)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **control**: Control flow instructions (JMP, JSR, RTS, RTI, BRK, NOP)
//! - **stack**: Stack operations (PHA, PHP, PLA, PLP)
//! - **flags**: Status flag manipulation (CLC, SEC, CLI, SEI, CLD, SED, CLV)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)

use crate::addressing::{AddressingMode, Operand};
use crate::cpu::Cpu;
use crate::error::ExecutionError;
use crate::memory::MemoryBus;
use crate::opcodes::Mnemonic;

pub(crate) mod alu;
pub(crate) mod branches;
pub(crate) mod control;
pub(crate) mod flags;
pub(crate) mod inc_dec;
pub(crate) mod load_store;
pub(crate) mod shifts;
pub(crate) mod stack;
pub(crate) mod transfer;

/// An instruction whose operand has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Decoded {
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,
    pub operand: Operand,
    pub page_crossed: bool,
}

impl Decoded {
    /// Operand value, for operations that consume one.
    pub fn value(&self) -> Result<u8, ExecutionError> {
        self.operand.value().ok_or_else(|| self.invalid())
    }

    /// Effective address, for operations that target memory.
    pub fn address(&self) -> Result<u16, ExecutionError> {
        self.operand.address().ok_or_else(|| self.invalid())
    }

    /// Error for an operation that cannot run with this mnemonic or operand.
    pub fn invalid(&self) -> ExecutionError {
        ExecutionError::InvalidOperand {
            mnemonic: self.mnemonic,
            mode: self.mode,
        }
    }
}

/// Executes `decoded` against `cpu`.
///
/// Returns the extra cycles a taken branch costs (0 for everything else);
/// the engine decides whether to report them.
pub(crate) fn execute<B: MemoryBus>(
    cpu: &mut Cpu<B>,
    decoded: Decoded,
) -> Result<u32, ExecutionError> {
    use Mnemonic::*;

    match decoded.mnemonic {
        Adc => alu::adc(cpu, &decoded)?,
        Sbc => alu::sbc(cpu, &decoded)?,
        And => alu::and(cpu, &decoded)?,
        Ora => alu::ora(cpu, &decoded)?,
        Eor => alu::eor(cpu, &decoded)?,
        Cmp => alu::cmp(cpu, &decoded)?,
        Cpx => alu::cpx(cpu, &decoded)?,
        Cpy => alu::cpy(cpu, &decoded)?,
        Bit => alu::bit(cpu, &decoded)?,

        Bcc | Bcs | Beq | Bmi | Bne | Bpl | Bvc | Bvs => {
            return branches::branch(cpu, &decoded);
        }

        Asl | Lsr | Rol | Ror => shifts::shift(cpu, &decoded)?,

        Lda => load_store::lda(cpu, &decoded)?,
        Ldx => load_store::ldx(cpu, &decoded)?,
        Ldy => load_store::ldy(cpu, &decoded)?,
        Sta => load_store::sta(cpu, &decoded)?,
        Stx => load_store::stx(cpu, &decoded)?,
        Sty => load_store::sty(cpu, &decoded)?,

        Inc => inc_dec::inc(cpu, &decoded)?,
        Dec => inc_dec::dec(cpu, &decoded)?,
        Inx | Iny | Dex | Dey => inc_dec::step_index(cpu, decoded.mnemonic),

        Jmp => control::jmp(cpu, &decoded)?,
        Jsr => control::jsr(cpu, &decoded)?,
        Rts => control::rts(cpu)?,
        Rti => control::rti(cpu)?,
        Brk => control::brk(cpu)?,
        Nop => {}

        Pha => stack::pha(cpu)?,
        Php => stack::php(cpu)?,
        Pla => stack::pla(cpu)?,
        Plp => stack::plp(cpu)?,

        Clc | Sec | Cli | Sei | Cld | Sed | Clv => flags::apply(cpu, &decoded)?,

        Tax | Tay | Tsx | Txa | Txs | Tya => transfer::transfer(cpu, &decoded)?,
    }

    Ok(0)
}
