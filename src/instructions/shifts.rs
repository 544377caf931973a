//! # Shift and Rotate Instructions
//!
//! ASL, LSR, ROL and ROR operate on A in accumulator mode and on memory
//! otherwise. The bit shifted out lands in C; Z and N follow the result.

use super::Decoded;
use crate::addressing::AddressingMode;
use crate::cpu::Cpu;
use crate::error::ExecutionError;
use crate::memory::MemoryBus;
use crate::opcodes::Mnemonic;

/// Executes ASL, LSR, ROL or ROR.
pub(crate) fn shift<B: MemoryBus>(
    cpu: &mut Cpu<B>,
    decoded: &Decoded,
) -> Result<(), ExecutionError> {
    let carry_in = cpu.regs.p.carry();

    if decoded.mode == AddressingMode::Accumulator {
        let (result, carry_out) = apply(decoded, cpu.regs.a.get(), carry_in)?;
        cpu.regs.a.set(result);
        cpu.regs.p.set_carry(carry_out);
        cpu.regs.p.update_zn(result);
        return Ok(());
    }

    let address = decoded.address()?;
    let (result, carry_out) = apply(decoded, decoded.value()?, carry_in)?;
    cpu.bus.write(address, result)?;
    cpu.regs.p.set_carry(carry_out);
    cpu.regs.p.update_zn(result);
    Ok(())
}

/// Returns (result, carry out).
fn apply(decoded: &Decoded, value: u8, carry_in: bool) -> Result<(u8, bool), ExecutionError> {
    let shifted = match decoded.mnemonic {
        Mnemonic::Asl => (value << 1, value & 0x80 != 0),
        Mnemonic::Lsr => (value >> 1, value & 0x01 != 0),
        Mnemonic::Rol => ((value << 1) | u8::from(carry_in), value & 0x80 != 0),
        Mnemonic::Ror => ((value >> 1) | (u8::from(carry_in) << 7), value & 0x01 != 0),
        _ => return Err(decoded.invalid()),
    };
    Ok(shifted)
}
