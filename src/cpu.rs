//! # CPU State and Execution
//!
//! This module contains the [`Cpu`] struct representing the 6502 processor
//! state and the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: A, X, Y, S, PC and the status flags (see [`Registers`])
//! - **Opcode table**: built once at construction, immutable afterwards
//! - **Interrupt state**: pending NMI request and whether a handler is running
//! - **Cycle counter**: u64 monotonically increasing cycle count
//!
//! ## Execution Model
//!
//! - `reset()`: Load PC from the reset vector, reinitialize S and P
//! - `step()`: Service a pending interrupt, or execute one instruction
//! - `run_for_cycles()`: Step until a cycle budget is exhausted
//!
//! `step()` returns the cycles it consumed so an external driver can advance
//! peripherals in lockstep (three graphics ticks per processor cycle on the
//! reference console).

use crate::addressing::Resolver;
use crate::config::CpuConfig;
use crate::error::{BusError, ConstructionError, ExecutionError};
use crate::instructions::{self, Decoded};
use crate::interrupts::{Interrupt, InterruptState, RESET_VECTOR};
use crate::memory::MemoryBus;
use crate::opcodes::{OpcodeInfo, OpcodeTable};
use crate::registers::{ProgramCounter, Registers, StatusFlags};

/// Base address of the hardware stack page.
pub const STACK_BASE: u16 = 0x0100;

/// 6502 CPU state and execution context.
///
/// Generic over the memory implementation via the [`MemoryBus`] trait.
///
/// # Examples
///
/// ```
/// use nes_cpu::{Cpu, FlatMemory};
///
/// let mut memory = FlatMemory::new();
/// memory.load(0xFFFC, &[0x00, 0x80]);
/// memory.load(0x8000, &[0xA9, 0x42]); // LDA #$42
///
/// let mut cpu = Cpu::new(memory).unwrap();
/// cpu.reset().unwrap();
///
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.sp(), 0xFD);
/// assert!(cpu.flag_i());
///
/// let cycles = cpu.step().unwrap();
/// assert_eq!(cycles, 2);
/// assert_eq!(cpu.a(), 0x42);
/// ```
pub struct Cpu<B: MemoryBus> {
    /// Architectural registers
    pub(crate) regs: Registers,

    /// Opcode decode table
    pub(crate) table: OpcodeTable,

    /// Addressing mode resolver
    pub(crate) resolver: Resolver,

    /// Behavior switches
    pub(crate) config: CpuConfig,

    /// Interrupt controller state
    pub(crate) interrupt: InterruptState,

    /// Total CPU cycles executed
    pub(crate) cycles: u64,

    /// Memory bus implementation
    pub(crate) bus: B,
}

impl<B: MemoryBus> Cpu<B> {
    /// Creates a CPU with the default [`CpuConfig`].
    ///
    /// Registers hold their power-on values; call [`reset`](Self::reset) to
    /// load PC from the reset vector before stepping.
    ///
    /// # Errors
    ///
    /// Returns a `ConstructionError` if the opcode table fails validation.
    pub fn new(bus: B) -> Result<Self, ConstructionError> {
        Self::with_config(bus, CpuConfig::default())
    }

    /// Creates a CPU with explicit options.
    pub fn with_config(bus: B, config: CpuConfig) -> Result<Self, ConstructionError> {
        Ok(Self {
            regs: Registers::default(),
            table: OpcodeTable::standard()?,
            resolver: Resolver {
                indirect_page_wrap: config.indirect_page_wrap,
            },
            config,
            interrupt: InterruptState::Idle,
            cycles: 0,
            bus,
        })
    }

    /// Resets the processor.
    ///
    /// Loads PC from `$FFFC/$FFFD`, sets S to 0xFD and P to its power-on
    /// value, and drops any pending NMI. A, X, Y and the cycle counter are
    /// left as they are, so calling `reset()` twice is the same as calling it
    /// once.
    ///
    /// # Examples
    ///
    /// ```
    /// use nes_cpu::{Cpu, FlatMemory};
    ///
    /// let mut memory = FlatMemory::new();
    /// memory.load(0xFFFC, &[0x34, 0x12]);
    ///
    /// let mut cpu = Cpu::new(memory).unwrap();
    /// cpu.reset().unwrap();
    /// assert_eq!(cpu.pc(), 0x1234);
    /// ```
    pub fn reset(&mut self) -> Result<(), BusError> {
        let target = self.read_vector(RESET_VECTOR)?;
        self.regs = Registers {
            a: self.regs.a,
            x: self.regs.x,
            y: self.regs.y,
            pc: ProgramCounter::new(target),
            ..Registers::default()
        };
        self.interrupt = InterruptState::Idle;
        log::debug!("reset: vector ${:04X} -> PC ${:04X}", RESET_VECTOR, target);
        Ok(())
    }

    /// Executes one instruction, or one interrupt sequence, and returns the
    /// number of cycles it consumed.
    ///
    /// 1. A pending NMI is serviced (7 cycles)
    /// 2. Otherwise an asserted IRQ is serviced if InterruptDisable is clear
    /// 3. Otherwise one opcode is fetched, decoded, resolved and executed
    ///
    /// # Errors
    ///
    /// - `ExecutionError::Decode` if the opcode byte is undefined
    /// - `ExecutionError::Bus` if any bus access fails
    ///
    /// Sub-steps completed before the failure (PC advanced past fetched
    /// bytes, bus writes) stay applied.
    ///
    /// # Examples
    ///
    /// ```
    /// use nes_cpu::{Cpu, ExecutionError, FlatMemory};
    ///
    /// let mut memory = FlatMemory::new();
    /// memory.load(0xFFFC, &[0x00, 0x80]);
    /// memory.load(0x8000, &[0xEA, 0x02]); // NOP, undefined
    ///
    /// let mut cpu = Cpu::new(memory).unwrap();
    /// cpu.reset().unwrap();
    ///
    /// assert_eq!(cpu.step(), Ok(2));
    /// assert_eq!(
    ///     cpu.step(),
    ///     Err(ExecutionError::Decode { opcode: 0x02, pc: 0x8001 })
    /// );
    /// ```
    pub fn step(&mut self) -> Result<u32, ExecutionError> {
        if self.interrupt == InterruptState::NmiPending {
            return self.service_interrupt(Interrupt::Nmi);
        }
        if self.bus.irq_active() && !self.regs.p.interrupt_disable() {
            return self.service_interrupt(Interrupt::Irq);
        }

        let opcode_pc = self.regs.pc.get();
        let opcode = self.fetch()?;
        let info: OpcodeInfo = *self.table.lookup(opcode).ok_or(ExecutionError::Decode {
            opcode,
            pc: opcode_pc,
        })?;

        let mut operand_bytes = [0u8; 2];
        let operand_len = info.mode.operand_len();
        for byte in operand_bytes.iter_mut().take(operand_len) {
            *byte = self.fetch()?;
        }
        let operands = &operand_bytes[..operand_len];

        log::trace!(
            "{:04X}  {:02X} {:<5} {} {:?}  A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            opcode_pc,
            opcode,
            hex_bytes(operands),
            info.mnemonic,
            info.mode,
            self.regs.a.get(),
            self.regs.x.get(),
            self.regs.y.get(),
            self.regs.p.to_byte(),
            self.regs.s.get(),
            self.cycles
        );

        let resolved = self.resolver.resolve(
            info.mode,
            operands,
            &self.regs,
            &mut self.bus,
            info.mnemonic.reads_operand(),
        )?;

        let decoded = Decoded {
            mnemonic: info.mnemonic,
            mode: info.mode,
            operand: resolved.operand,
            page_crossed: resolved.page_crossed,
        };
        let branch_cycles = instructions::execute(self, decoded)?;

        let mut cycles = u32::from(info.cycles);
        let stall = self.bus.take_stall_cycles();
        if self.config.cycle_penalties {
            if resolved.page_crossed && info.mnemonic.has_page_cross_penalty() {
                cycles += 1;
            }
            cycles += branch_cycles;
            if stall > 0 {
                // DMA waits one more cycle to align when it starts on an odd cycle.
                let odd_start = (self.cycles + u64::from(cycles)) % 2 == 1;
                cycles += stall + u32::from(odd_start);
            }
        }

        self.cycles += u64::from(cycles);
        Ok(cycles)
    }

    /// Runs the CPU for a specified number of cycles.
    ///
    /// Steps until at least `cycle_budget` cycles have elapsed and returns
    /// the cycles actually consumed, which may overshoot the budget by part
    /// of an instruction.
    ///
    /// # Examples
    ///
    /// ```
    /// use nes_cpu::{Cpu, FlatMemory};
    ///
    /// let mut memory = FlatMemory::new();
    /// memory.load(0xFFFC, &[0x00, 0x80]);
    /// memory.load(0x8000, &[0xEA; 16]); // NOPs
    ///
    /// let mut cpu = Cpu::new(memory).unwrap();
    /// cpu.reset().unwrap();
    /// assert_eq!(cpu.run_for_cycles(10).unwrap(), 10);
    /// assert_eq!(cpu.pc(), 0x8005);
    /// ```
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, ExecutionError> {
        let start_cycles = self.cycles;
        let target_cycles = start_cycles + cycle_budget;

        while self.cycles < target_cycles {
            self.step()?;
        }

        Ok(self.cycles - start_cycles)
    }

    fn fetch(&mut self) -> Result<u8, BusError> {
        let byte = self.bus.read(self.regs.pc.get())?;
        self.regs.pc.increment();
        Ok(byte)
    }

    // ========== Stack ==========

    /// Pushes a byte to `$0100 + S` and decrements S.
    pub(crate) fn push(&mut self, value: u8) -> Result<(), BusError> {
        self.bus
            .write(STACK_BASE | u16::from(self.regs.s.get()), value)?;
        self.regs.s.decrement();
        Ok(())
    }

    /// Increments S and pulls the byte at `$0100 + S`.
    pub(crate) fn pull(&mut self) -> Result<u8, BusError> {
        self.regs.s.increment();
        self.bus.read(STACK_BASE | u16::from(self.regs.s.get()))
    }

    /// Pushes a word, high byte first.
    pub(crate) fn push_word(&mut self, value: u16) -> Result<(), BusError> {
        let [lo, hi] = value.to_le_bytes();
        self.push(hi)?;
        self.push(lo)
    }

    /// Pulls a word, low byte first.
    pub(crate) fn pull_word(&mut self) -> Result<u16, BusError> {
        let lo = self.pull()?;
        let hi = self.pull()?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    // ========== Accessors ==========

    /// Read-only view of the register file.
    pub fn registers(&self) -> &Registers {
        &self.regs
    }

    /// Returns the options this CPU was built with.
    pub fn config(&self) -> &CpuConfig {
        &self.config
    }

    /// Returns the opcode table.
    pub fn opcode_table(&self) -> &OpcodeTable {
        &self.table
    }

    /// Returns a reference to the memory bus.
    pub fn memory(&self) -> &B {
        &self.bus
    }

    /// Returns a mutable reference to the memory bus.
    pub fn memory_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Consumes the CPU, returning its memory bus.
    pub fn into_memory(self) -> B {
        self.bus
    }

    /// Returns the total number of CPU cycles executed.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Returns the accumulator.
    pub fn a(&self) -> u8 {
        self.regs.a.get()
    }

    /// Returns the X index register.
    pub fn x(&self) -> u8 {
        self.regs.x.get()
    }

    /// Returns the Y index register.
    pub fn y(&self) -> u8 {
        self.regs.y.get()
    }

    /// Returns the program counter.
    pub fn pc(&self) -> u16 {
        self.regs.pc.get()
    }

    /// Returns the stack pointer.
    ///
    /// The full stack address is 0x0100 + SP. The stack grows downward from
    /// 0x01FF.
    pub fn sp(&self) -> u8 {
        self.regs.s.get()
    }

    /// Returns the status register as a packed byte (NV1BDIZC).
    pub fn status(&self) -> u8 {
        self.regs.p.to_byte()
    }

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.regs.p.negative()
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.regs.p.overflow()
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.regs.p.break_command()
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.regs.p.decimal()
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.regs.p.interrupt_disable()
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.regs.p.zero()
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.regs.p.carry()
    }

    // ========== Setters ==========

    /// Sets the accumulator.
    pub fn set_a(&mut self, value: u8) {
        self.regs.a.set(value);
    }

    /// Sets the X index register.
    pub fn set_x(&mut self, value: u8) {
        self.regs.x.set(value);
    }

    /// Sets the Y index register.
    pub fn set_y(&mut self, value: u8) {
        self.regs.y.set(value);
    }

    /// Sets the program counter.
    pub fn set_pc(&mut self, value: u16) {
        self.regs.pc.set(value);
    }

    /// Sets the stack pointer.
    pub fn set_sp(&mut self, value: u8) {
        self.regs.s.set(value);
    }

    /// Replaces the status register from a packed byte.
    pub fn set_status(&mut self, value: u8) {
        self.regs.p = StatusFlags::from_byte(value);
    }

    /// Sets the Negative flag.
    pub fn set_flag_n(&mut self, value: bool) {
        self.regs.p.set_negative(value);
    }

    /// Sets the Overflow flag.
    pub fn set_flag_v(&mut self, value: bool) {
        self.regs.p.set_overflow(value);
    }

    /// Sets the Break flag.
    pub fn set_flag_b(&mut self, value: bool) {
        self.regs.p.set_break_command(value);
    }

    /// Sets the Decimal mode flag.
    pub fn set_flag_d(&mut self, value: bool) {
        self.regs.p.set_decimal(value);
    }

    /// Sets the Interrupt Disable flag.
    pub fn set_flag_i(&mut self, value: bool) {
        self.regs.p.set_interrupt_disable(value);
    }

    /// Sets the Zero flag.
    pub fn set_flag_z(&mut self, value: bool) {
        self.regs.p.set_zero(value);
    }

    /// Sets the Carry flag.
    pub fn set_flag_c(&mut self, value: bool) {
        self.regs.p.set_carry(value);
    }
}

fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("{byte:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}
