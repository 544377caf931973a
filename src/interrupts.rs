//! # Interrupt Controller
//!
//! Reset, NMI, IRQ and BRK all redirect the program counter through a fixed
//! vector. NMI, IRQ and BRK additionally save the return address and the
//! status register on the stack:
//!
//! 1. Push PC (high byte, then low byte)
//! 2. Set BreakCommand for BRK, clear it for NMI/IRQ
//! 3. Push P (bit 5 always set)
//! 4. Set InterruptDisable
//! 5. Load PC from the vector (little-endian)
//!
//! NMI is edge-triggered: [`Cpu::raise_nmi`] latches a request that the next
//! `step()` services before fetching. IRQ is level-triggered: it is sampled
//! from [`MemoryBus::irq_active`] on every `step()` and is ignored while
//! InterruptDisable is set.

use crate::cpu::Cpu;
use crate::error::{BusError, ExecutionError};
use crate::memory::MemoryBus;

/// NMI vector address ($FFFA-$FFFB).
pub const NMI_VECTOR: u16 = 0xFFFA;

/// Reset vector address ($FFFC-$FFFD).
pub const RESET_VECTOR: u16 = 0xFFFC;

/// IRQ/BRK vector address ($FFFE-$FFFF).
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Cycles taken by a hardware interrupt sequence.
pub const INTERRUPT_CYCLES: u32 = 7;

/// Source of an interrupt sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    /// Non-maskable interrupt.
    Nmi,
    /// Maskable interrupt request.
    Irq,
    /// Software interrupt.
    Brk,
}

impl Interrupt {
    /// Vector address the sequence loads PC from.
    pub fn vector(self) -> u16 {
        match self {
            Interrupt::Nmi => NMI_VECTOR,
            Interrupt::Irq | Interrupt::Brk => IRQ_VECTOR,
        }
    }
}

/// Interrupt controller state.
///
/// `reset()` is the only way back to `Idle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InterruptState {
    /// No interrupt taken since reset.
    #[default]
    Idle,
    /// An NMI has been raised and will be serviced by the next `step()`.
    NmiPending,
    /// An interrupt sequence has run; its handler owns the processor.
    Servicing,
}

impl<B: MemoryBus> Cpu<B> {
    /// Requests a non-maskable interrupt.
    ///
    /// The request is latched: raising it again before the next `step()`
    /// still produces a single service.
    pub fn raise_nmi(&mut self) {
        self.interrupt = InterruptState::NmiPending;
    }

    /// Current interrupt controller state.
    pub fn interrupt_state(&self) -> InterruptState {
        self.interrupt
    }

    /// Services a hardware interrupt, returning the cycles it took.
    pub(crate) fn service_interrupt(&mut self, kind: Interrupt) -> Result<u32, ExecutionError> {
        let return_address = self.regs.pc.get();
        log::debug!(
            "{:?} at ${:04X}, vector ${:04X}",
            kind,
            return_address,
            kind.vector()
        );
        self.enter_interrupt(kind, return_address)?;
        self.cycles += u64::from(INTERRUPT_CYCLES);
        Ok(INTERRUPT_CYCLES)
    }

    /// Runs the push/flag/vector sequence shared by NMI, IRQ and BRK.
    pub(crate) fn enter_interrupt(
        &mut self,
        kind: Interrupt,
        return_address: u16,
    ) -> Result<(), BusError> {
        self.push_word(return_address)?;
        self.regs.p.set_break_command(kind == Interrupt::Brk);
        let status = self.regs.p.to_byte();
        self.push(status)?;
        self.regs.p.set_interrupt_disable(true);

        let target = self.read_vector(kind.vector())?;
        self.regs.pc.set(target);
        self.interrupt = InterruptState::Servicing;
        Ok(())
    }

    /// Reads a little-endian vector.
    pub(crate) fn read_vector(&mut self, vector: u16) -> Result<u16, BusError> {
        let lo = self.bus.read(vector)?;
        let hi = self.bus.read(vector.wrapping_add(1))?;
        Ok(u16::from_le_bytes([lo, hi]))
    }
}
