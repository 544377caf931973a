//! # Load and Store Instructions
//!
//! Loads set Z and N from the loaded value. Stores affect no flags and never
//! read their target address.

use super::Decoded;
use crate::cpu::Cpu;
use crate::error::ExecutionError;
use crate::memory::MemoryBus;

/// Executes the LDA (Load Accumulator) instruction.
pub(crate) fn lda<B: MemoryBus>(cpu: &mut Cpu<B>, decoded: &Decoded) -> Result<(), ExecutionError> {
    let value = decoded.value()?;
    cpu.regs.a.set(value);
    cpu.regs.p.update_zn(value);
    Ok(())
}

/// Executes the LDX (Load X Register) instruction.
pub(crate) fn ldx<B: MemoryBus>(cpu: &mut Cpu<B>, decoded: &Decoded) -> Result<(), ExecutionError> {
    let value = decoded.value()?;
    cpu.regs.x.set(value);
    cpu.regs.p.update_zn(value);
    Ok(())
}

/// Executes the LDY (Load Y Register) instruction.
pub(crate) fn ldy<B: MemoryBus>(cpu: &mut Cpu<B>, decoded: &Decoded) -> Result<(), ExecutionError> {
    let value = decoded.value()?;
    cpu.regs.y.set(value);
    cpu.regs.p.update_zn(value);
    Ok(())
}

/// Executes the STA (Store Accumulator) instruction.
pub(crate) fn sta<B: MemoryBus>(cpu: &mut Cpu<B>, decoded: &Decoded) -> Result<(), ExecutionError> {
    let value = cpu.regs.a.get();
    cpu.bus.write(decoded.address()?, value)?;
    Ok(())
}

/// Executes the STX (Store X Register) instruction.
pub(crate) fn stx<B: MemoryBus>(cpu: &mut Cpu<B>, decoded: &Decoded) -> Result<(), ExecutionError> {
    let value = cpu.regs.x.get();
    cpu.bus.write(decoded.address()?, value)?;
    Ok(())
}

/// Executes the STY (Store Y Register) instruction.
pub(crate) fn sty<B: MemoryBus>(cpu: &mut Cpu<B>, decoded: &Decoded) -> Result<(), ExecutionError> {
    let value = cpu.regs.y.get();
    cpu.bus.write(decoded.address()?, value)?;
    Ok(())
}
