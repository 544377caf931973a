//! # Branch Instructions
//!
//! The eight conditional branches. All use relative addressing; the resolver
//! has already turned the signed offset into a target address measured from
//! the byte after the instruction.
//!
//! Cycle timing:
//! - 2 cycles if branch not taken
//! - 3 cycles if branch taken to same page
//! - 4 cycles if branch taken to different page
//!
//! No flags are affected.

use super::Decoded;
use crate::cpu::Cpu;
use crate::error::ExecutionError;
use crate::memory::MemoryBus;
use crate::opcodes::Mnemonic;

/// Executes a conditional branch, returning the extra cycles it costs.
pub(crate) fn branch<B: MemoryBus>(
    cpu: &mut Cpu<B>,
    decoded: &Decoded,
) -> Result<u32, ExecutionError> {
    let target = decoded.address()?;
    let p = &cpu.regs.p;

    let taken = match decoded.mnemonic {
        Mnemonic::Bcc => !p.carry(),
        Mnemonic::Bcs => p.carry(),
        Mnemonic::Bne => !p.zero(),
        Mnemonic::Beq => p.zero(),
        Mnemonic::Bpl => !p.negative(),
        Mnemonic::Bmi => p.negative(),
        Mnemonic::Bvc => !p.overflow(),
        Mnemonic::Bvs => p.overflow(),
        _ => return Err(decoded.invalid()),
    };

    if !taken {
        return Ok(0);
    }

    cpu.regs.pc.set(target);
    Ok(1 + u32::from(decoded.page_crossed))
}
