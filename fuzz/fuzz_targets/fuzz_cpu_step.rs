//! Fuzz target for CPU step execution.
//!
//! Creates arbitrary CPU states and memory contents, then executes a few
//! steps. Errors (undefined opcodes) are fine; panics are bugs.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use nes_cpu::{Cpu, CpuConfig, FlatMemory};

/// Arbitrary CPU initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    status: u8,
    cycle_penalties: bool,
    indirect_page_wrap: bool,
    raise_nmi: bool,
}

/// Memory region for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Bytes at the PC location
    program: [u8; 16],
    zero_page: [u8; 256],
    stack_page: [u8; 256],
    /// Placed at $4000 for absolute addressing
    main_memory: [u8; 256],
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    memory: FuzzMemory,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();
    memory.load(0xFFFA, &[0x00, 0x90]); // NMI
    memory.load(0xFFFC, &[0x00, 0x80]); // reset
    memory.load(0xFFFE, &[0x00, 0xA0]); // IRQ/BRK
    memory.load(0x8000, &input.memory.program);
    memory.load(0x0000, &input.memory.zero_page);
    memory.load(0x0100, &input.memory.stack_page);
    memory.load(0x4000, &input.memory.main_memory);

    let config = CpuConfig {
        cycle_penalties: input.cpu_state.cycle_penalties,
        indirect_page_wrap: input.cpu_state.indirect_page_wrap,
    };
    let mut cpu = Cpu::with_config(memory, config).unwrap();
    cpu.reset().unwrap();

    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_status(input.cpu_state.status);
    if input.cpu_state.raise_nmi {
        cpu.raise_nmi();
    }

    for _ in 0..4 {
        let before = cpu.cycles();
        match cpu.step() {
            Ok(cycles) => {
                assert!(cycles >= 2 && cycles <= 7);
                assert_eq!(cpu.cycles(), before + u64::from(cycles));
            }
            Err(_) => break,
        }
        // Bit 5 of P always reads back set.
        assert_eq!(cpu.status() & 0x20, 0x20);
    }
});
