//! # Status Flag Instructions
//!
//! CLC, SEC, CLI, SEI, CLD, SED, CLV. Implied addressing, 2 cycles, and
//! only the named flag changes.

use super::Decoded;
use crate::cpu::Cpu;
use crate::error::ExecutionError;
use crate::memory::MemoryBus;
use crate::opcodes::Mnemonic;

pub(crate) fn apply<B: MemoryBus>(
    cpu: &mut Cpu<B>,
    decoded: &Decoded,
) -> Result<(), ExecutionError> {
    let p = &mut cpu.regs.p;
    match decoded.mnemonic {
        Mnemonic::Clc => p.set_carry(false),
        Mnemonic::Sec => p.set_carry(true),
        Mnemonic::Cli => p.set_interrupt_disable(false),
        Mnemonic::Sei => p.set_interrupt_disable(true),
        Mnemonic::Cld => p.set_decimal(false),
        Mnemonic::Sed => p.set_decimal(true),
        Mnemonic::Clv => p.set_overflow(false),
        _ => return Err(decoded.invalid()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addressing::{AddressingMode, Operand};
    use crate::memory::FlatMemory;

    #[test]
    fn test_misrouted_mnemonic_is_rejected() {
        let mut cpu = Cpu::new(FlatMemory::new()).unwrap();
        let before = cpu.status();
        let decoded = Decoded {
            mnemonic: Mnemonic::Nop,
            mode: AddressingMode::Implicit,
            operand: Operand::None,
            page_crossed: false,
        };

        assert_eq!(
            apply(&mut cpu, &decoded),
            Err(ExecutionError::InvalidOperand {
                mnemonic: Mnemonic::Nop,
                mode: AddressingMode::Implicit,
            })
        );
        assert_eq!(cpu.status(), before);
    }
}
