//! # NES 6502 CPU Core
//!
//! An instruction-level emulation of the NMOS 6502 as found in the NES
//! console: register and flag semantics, the addressing modes, the full
//! documented opcode table, stack discipline and interrupt handling, all
//! mediated through a memory-mapped bus shared with peripheral hardware.
//!
//! ## Quick Start
//!
//! ```rust
//! use nes_cpu::{Cpu, FlatMemory};
//!
//! let mut memory = FlatMemory::new();
//! memory.load(0xFFFC, &[0x00, 0x80]);             // reset vector -> $8000
//! memory.load(0x8000, &[0xA9, 0x10, 0x69, 0x22]); // LDA #$10; ADC #$22
//!
//! let mut cpu = Cpu::new(memory).unwrap();
//! cpu.reset().unwrap();
//!
//! cpu.step().unwrap();
//! cpu.step().unwrap();
//! assert_eq!(cpu.a(), 0x32);
//! assert_eq!(cpu.cycles(), 4);
//! ```
//!
//! ## Console memory map
//!
//! ```rust
//! use nes_cpu::{Cpu, MemoryBus, ProgramRom, RegisterBlock, SystemBus};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let mut image = vec![0xEA; 0x4000];
//! image[0x3FFC] = 0x00; // reset vector -> $8000 (16 KiB image is mirrored)
//! image[0x3FFD] = 0x80;
//!
//! let oam = Rc::new(RefCell::new(Vec::<u8>::new()));
//! struct Oam(Rc<RefCell<Vec<u8>>>);
//! impl nes_cpu::DmaSink for Oam {
//!     fn receive_page(&mut self, page: &[u8; 256]) {
//!         *self.0.borrow_mut() = page.to_vec();
//!     }
//! }
//!
//! let bus = SystemBus::nes(
//!     ProgramRom::new(image).unwrap(),
//!     Box::new(RegisterBlock::ppu()),
//!     Box::new(RegisterBlock::apu_io()),
//!     Box::new(Oam(Rc::clone(&oam))),
//! )
//! .unwrap();
//!
//! let mut cpu = Cpu::new(bus).unwrap();
//! cpu.reset().unwrap();
//! assert_eq!(cpu.pc(), 0x8000);
//!
//! // Program storage is read-only.
//! assert!(cpu.memory_mut().write(0x8000, 0x00).is_err());
//! ```
//!
//! ## Modules
//!
//! - `registers` - 8/16-bit registers and status flags
//! - `memory` - `MemoryBus` trait and flat test memory
//! - `bus` - Permissioned decode table and the console memory map
//! - `devices` - Peripheral capability interface and stock devices
//! - `addressing` - Addressing modes and operand resolution
//! - `opcodes` - Opcode table
//! - `cpu` - Execution engine
//! - `interrupts` - Reset, NMI, IRQ and BRK sequencing
//! - `config` - Processor options
//! - `error` - Error types
//!
//! ## Logging
//!
//! The crate logs through the `log` facade: `debug` for reset, interrupts
//! and DMA, `trace` for every executed instruction. Install any logger to
//! see it.

pub mod addressing;
pub mod bus;
pub mod config;
pub mod cpu;
pub mod devices;
pub mod error;
pub mod interrupts;
pub mod memory;
pub mod opcodes;
pub mod registers;

// Internal instruction implementations (not part of public API)
mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use addressing::{AddressingMode, Operand, Resolved, Resolver};
pub use bus::{BusBuilder, DeviceId, SystemBus, OAM_DMA_ADDR, OAM_DMA_CYCLES};
pub use config::CpuConfig;
pub use cpu::{Cpu, STACK_BASE};
pub use devices::{Device, DmaSink, Permission, ProgramRom, RamDevice, RegisterBlock};
pub use error::{Access, BitIndexError, BusError, ConstructionError, ExecutionError};
pub use interrupts::{Interrupt, InterruptState, IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR};
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{Mnemonic, OpcodeInfo, OpcodeTable, OpcodeTableBuilder};
pub use registers::{ProgramCounter, Register, Registers, StatusFlags};
