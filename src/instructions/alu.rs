//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! Arithmetic and logical operations:
//! - ADC, SBC: binary add/subtract with carry
//! - AND, ORA, EOR: bitwise logic into A
//! - CMP, CPX, CPY: register/operand comparison
//! - BIT: bit test
//!
//! The decimal flag is stored but never consulted; the console's processor
//! has no BCD unit.

use super::Decoded;
use crate::cpu::Cpu;
use crate::error::ExecutionError;
use crate::memory::MemoryBus;

/// Executes the ADC (Add with Carry) instruction.
///
/// A + M + C is computed in 16 bits. C is set when the sum exceeds 255; V is
/// set when the signed sum leaves -128..=127. Z and N follow the new A.
pub(crate) fn adc<B: MemoryBus>(cpu: &mut Cpu<B>, decoded: &Decoded) -> Result<(), ExecutionError> {
    let value = decoded.value()?;
    add_with_carry(cpu, value);
    Ok(())
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// A - M - (1 - C). C is set when no borrow occurred; V is set when the
/// signed difference leaves -128..=127. Z and N follow the new A.
pub(crate) fn sbc<B: MemoryBus>(cpu: &mut Cpu<B>, decoded: &Decoded) -> Result<(), ExecutionError> {
    let value = decoded.value()?;
    let a = cpu.regs.a.get();
    let borrow = i16::from(!cpu.regs.p.carry());

    let unsigned = i16::from(a) - i16::from(value) - borrow;
    let signed = i16::from(a as i8) - i16::from(value as i8) - borrow;
    let result = unsigned as u8;

    cpu.regs.p.set_carry(unsigned >= 0);
    cpu.regs.p.set_overflow(!(-128..=127).contains(&signed));
    cpu.regs.a.set(result);
    cpu.regs.p.update_zn(result);
    Ok(())
}

fn add_with_carry<B: MemoryBus>(cpu: &mut Cpu<B>, value: u8) {
    let a = cpu.regs.a.get();
    let carry_in = u16::from(cpu.regs.p.carry());

    let unsigned = u16::from(a) + u16::from(value) + carry_in;
    let signed = i16::from(a as i8) + i16::from(value as i8) + carry_in as i16;
    let result = unsigned as u8;

    cpu.regs.p.set_carry(unsigned > 0xFF);
    cpu.regs.p.set_overflow(!(-128..=127).contains(&signed));
    cpu.regs.a.set(result);
    cpu.regs.p.update_zn(result);
}

/// Executes the AND (Logical AND) instruction.
pub(crate) fn and<B: MemoryBus>(cpu: &mut Cpu<B>, decoded: &Decoded) -> Result<(), ExecutionError> {
    let result = cpu.regs.a.get() & decoded.value()?;
    cpu.regs.a.set(result);
    cpu.regs.p.update_zn(result);
    Ok(())
}

/// Executes the ORA (Logical Inclusive OR) instruction.
pub(crate) fn ora<B: MemoryBus>(cpu: &mut Cpu<B>, decoded: &Decoded) -> Result<(), ExecutionError> {
    let result = cpu.regs.a.get() | decoded.value()?;
    cpu.regs.a.set(result);
    cpu.regs.p.update_zn(result);
    Ok(())
}

/// Executes the EOR (Exclusive OR) instruction.
pub(crate) fn eor<B: MemoryBus>(cpu: &mut Cpu<B>, decoded: &Decoded) -> Result<(), ExecutionError> {
    let result = cpu.regs.a.get() ^ decoded.value()?;
    cpu.regs.a.set(result);
    cpu.regs.p.update_zn(result);
    Ok(())
}

/// Executes the CMP (Compare Accumulator) instruction.
pub(crate) fn cmp<B: MemoryBus>(cpu: &mut Cpu<B>, decoded: &Decoded) -> Result<(), ExecutionError> {
    let register = cpu.regs.a.get();
    compare(cpu, register, decoded.value()?);
    Ok(())
}

/// Executes the CPX (Compare X Register) instruction.
pub(crate) fn cpx<B: MemoryBus>(cpu: &mut Cpu<B>, decoded: &Decoded) -> Result<(), ExecutionError> {
    let register = cpu.regs.x.get();
    compare(cpu, register, decoded.value()?);
    Ok(())
}

/// Executes the CPY (Compare Y Register) instruction.
pub(crate) fn cpy<B: MemoryBus>(cpu: &mut Cpu<B>, decoded: &Decoded) -> Result<(), ExecutionError> {
    let register = cpu.regs.y.get();
    compare(cpu, register, decoded.value()?);
    Ok(())
}

/// C = register >= value, Z = register == value, N = bit 7 of the difference.
fn compare<B: MemoryBus>(cpu: &mut Cpu<B>, register: u8, value: u8) {
    cpu.regs.p.set_carry(register >= value);
    cpu.regs.p.update_zn(register.wrapping_sub(value));
}

/// Executes the BIT (Bit Test) instruction.
///
/// Z is set from A & M; N and V copy bits 7 and 6 of M. A is unchanged.
pub(crate) fn bit<B: MemoryBus>(cpu: &mut Cpu<B>, decoded: &Decoded) -> Result<(), ExecutionError> {
    let value = decoded.value()?;
    cpu.regs.p.set_zero(cpu.regs.a.get() & value == 0);
    cpu.regs.p.set_negative(value & 0x80 != 0);
    cpu.regs.p.set_overflow(value & 0x40 != 0);
    Ok(())
}
