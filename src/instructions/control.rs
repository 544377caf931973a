//! # Control Flow Instructions
//!
//! - JMP: Jump to address
//! - JSR/RTS: Subroutine call and return
//! - BRK/RTI: Software interrupt and interrupt return
//!
//! NOP has no semantics and is handled by the dispatcher.

use super::Decoded;
use crate::cpu::Cpu;
use crate::error::ExecutionError;
use crate::interrupts::Interrupt;
use crate::memory::MemoryBus;
use crate::registers::StatusFlags;

/// Executes the JMP (Jump) instruction.
///
/// For `JMP ($xxFF)` the resolver applies the NMOS page wrap when it is
/// enabled, so this only loads PC from the resolved address.
pub(crate) fn jmp<B: MemoryBus>(cpu: &mut Cpu<B>, decoded: &Decoded) -> Result<(), ExecutionError> {
    let target = decoded.address()?;
    cpu.regs.pc.set(target);
    Ok(())
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes the address of the last byte of the JSR instruction (return
/// address minus one), high byte first, then jumps.
pub(crate) fn jsr<B: MemoryBus>(cpu: &mut Cpu<B>, decoded: &Decoded) -> Result<(), ExecutionError> {
    let target = decoded.address()?;
    let return_address = cpu.regs.pc.get().wrapping_sub(1);
    cpu.push_word(return_address)?;
    cpu.regs.pc.set(target);
    Ok(())
}

/// Executes the RTS (Return from Subroutine) instruction.
pub(crate) fn rts<B: MemoryBus>(cpu: &mut Cpu<B>) -> Result<(), ExecutionError> {
    let address = cpu.pull_word()?;
    cpu.regs.pc.set(address.wrapping_add(1));
    Ok(())
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pulls P, then PC. Unlike RTS there is no +1 adjustment.
pub(crate) fn rti<B: MemoryBus>(cpu: &mut Cpu<B>) -> Result<(), ExecutionError> {
    let status = cpu.pull()?;
    cpu.regs.p = StatusFlags::from_byte(status);
    let address = cpu.pull_word()?;
    cpu.regs.pc.set(address);
    Ok(())
}

/// Executes the BRK (Force Interrupt) instruction.
///
/// Pushes the address two bytes past the BRK opcode (the byte after it is
/// padding), sets BreakCommand, pushes P, sets InterruptDisable and loads PC
/// from `$FFFE/$FFFF`.
pub(crate) fn brk<B: MemoryBus>(cpu: &mut Cpu<B>) -> Result<(), ExecutionError> {
    // PC already points one past the opcode.
    let return_address = cpu.regs.pc.get().wrapping_add(1);
    cpu.enter_interrupt(Interrupt::Brk, return_address)?;
    Ok(())
}
