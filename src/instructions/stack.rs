//! # Stack Instructions
//!
//! PHA, PHP, PLA, PLP. The stack lives at `$0100-$01FF` and grows downward;
//! S wraps within the page.

use crate::cpu::Cpu;
use crate::error::ExecutionError;
use crate::memory::MemoryBus;
use crate::registers::{flag, StatusFlags};

/// Executes the PHA (Push Accumulator) instruction.
pub(crate) fn pha<B: MemoryBus>(cpu: &mut Cpu<B>) -> Result<(), ExecutionError> {
    let value = cpu.regs.a.get();
    cpu.push(value)?;
    Ok(())
}

/// Executes the PHP (Push Processor Status) instruction.
///
/// The pushed byte always has B and bit 5 set.
pub(crate) fn php<B: MemoryBus>(cpu: &mut Cpu<B>) -> Result<(), ExecutionError> {
    let value = cpu.regs.p.to_byte() | flag::BREAK | flag::UNUSED;
    cpu.push(value)?;
    Ok(())
}

/// Executes the PLA (Pull Accumulator) instruction.
pub(crate) fn pla<B: MemoryBus>(cpu: &mut Cpu<B>) -> Result<(), ExecutionError> {
    let value = cpu.pull()?;
    cpu.regs.a.set(value);
    cpu.regs.p.update_zn(value);
    Ok(())
}

/// Executes the PLP (Pull Processor Status) instruction.
pub(crate) fn plp<B: MemoryBus>(cpu: &mut Cpu<B>) -> Result<(), ExecutionError> {
    let value = cpu.pull()?;
    cpu.regs.p = StatusFlags::from_byte(value);
    Ok(())
}
