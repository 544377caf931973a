//! # Increment and Decrement Instructions
//!
//! INC/DEC modify memory (read-modify-write through the bus); INX, INY, DEX
//! and DEY modify an index register. All wrap modulo 256 and set Z and N
//! from the result. Carry is never touched.

use super::Decoded;
use crate::cpu::Cpu;
use crate::error::ExecutionError;
use crate::memory::MemoryBus;
use crate::opcodes::Mnemonic;

/// Executes the INC (Increment Memory) instruction.
pub(crate) fn inc<B: MemoryBus>(cpu: &mut Cpu<B>, decoded: &Decoded) -> Result<(), ExecutionError> {
    modify(cpu, decoded, |value| value.wrapping_add(1))
}

/// Executes the DEC (Decrement Memory) instruction.
pub(crate) fn dec<B: MemoryBus>(cpu: &mut Cpu<B>, decoded: &Decoded) -> Result<(), ExecutionError> {
    modify(cpu, decoded, |value| value.wrapping_sub(1))
}

fn modify<B: MemoryBus>(
    cpu: &mut Cpu<B>,
    decoded: &Decoded,
    op: impl FnOnce(u8) -> u8,
) -> Result<(), ExecutionError> {
    let address = decoded.address()?;
    let result = op(decoded.value()?);
    cpu.bus.write(address, result)?;
    cpu.regs.p.update_zn(result);
    Ok(())
}

/// Executes INX, INY, DEX or DEY.
pub(crate) fn step_index<B: MemoryBus>(cpu: &mut Cpu<B>, mnemonic: Mnemonic) {
    let register = match mnemonic {
        Mnemonic::Inx | Mnemonic::Dex => &mut cpu.regs.x,
        _ => &mut cpu.regs.y,
    };
    match mnemonic {
        Mnemonic::Inx | Mnemonic::Iny => register.increment(),
        _ => register.decrement(),
    };
    let result = register.get();
    cpu.regs.p.update_zn(result);
}
