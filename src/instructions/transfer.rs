//! # Register Transfer Instructions
//!
//! TAX, TAY, TXA, TYA and TSX set Z and N from the copied value. TXS changes
//! no flags.

use super::Decoded;
use crate::cpu::Cpu;
use crate::error::ExecutionError;
use crate::memory::MemoryBus;
use crate::opcodes::Mnemonic;

pub(crate) fn transfer<B: MemoryBus>(
    cpu: &mut Cpu<B>,
    decoded: &Decoded,
) -> Result<(), ExecutionError> {
    let regs = &mut cpu.regs;
    let (source, target) = match decoded.mnemonic {
        Mnemonic::Tax => (regs.a, &mut regs.x),
        Mnemonic::Tay => (regs.a, &mut regs.y),
        Mnemonic::Txa => (regs.x, &mut regs.a),
        Mnemonic::Tya => (regs.y, &mut regs.a),
        Mnemonic::Tsx => (regs.s, &mut regs.x),
        Mnemonic::Txs => {
            regs.s = regs.x;
            return Ok(());
        }
        _ => return Err(decoded.invalid()),
    };

    *target = source;
    regs.p.update_zn(source.get());
    Ok(())
}
