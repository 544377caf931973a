//! Processor options.

/// Behavior switches for [`Cpu`](crate::Cpu).
///
/// # Examples
///
/// ```
/// use nes_cpu::{Cpu, CpuConfig, FlatMemory};
///
/// let config = CpuConfig {
///     cycle_penalties: true,
///     ..CpuConfig::default()
/// };
/// let cpu = Cpu::with_config(FlatMemory::new(), config).unwrap();
/// assert!(cpu.config().cycle_penalties);
/// assert!(cpu.config().indirect_page_wrap);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuConfig {
    /// Add the variable cycle costs to what `step()` reports: +1 for an
    /// indexed read crossing a page, +1 for a taken branch (+1 more across a
    /// page) and the OAM DMA stall. When false, `step()` reports the base
    /// cycle count of the opcode only.
    pub cycle_penalties: bool,

    /// `JMP ($xxFF)` reads the high byte of its target from `$xx00`.
    pub indirect_page_wrap: bool,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            cycle_penalties: false,
            indirect_page_wrap: true,
        }
    }
}
