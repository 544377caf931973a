//! Tests for running whole programs through `step()` and `run_for_cycles()`.

use nes_cpu::{Cpu, ExecutionError, FlatMemory};

const BRK_HANDLER: u16 = 0xA000;

fn setup_cpu(program: &[u8]) -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.load(0xFFFC, &[0x00, 0x80]);
    memory.load(0xFFFE, &BRK_HANDLER.to_le_bytes());
    memory.load(0x8000, program);
    let mut cpu = Cpu::new(memory).unwrap();
    cpu.reset().unwrap();
    cpu
}

/// Steps until PC reaches `stop`, returning the summed cycles.
fn run_until(cpu: &mut Cpu<FlatMemory>, stop: u16) -> u64 {
    let mut total = 0;
    for _ in 0..10_000 {
        if cpu.pc() == stop {
            return total;
        }
        total += u64::from(cpu.step().unwrap());
    }
    panic!("program did not reach ${stop:04X}");
}

#[test]
fn test_counting_loop() {
    let program = [
        0xA2, 0x00, // LDX #$00
        0xE8, // loop: INX
        0x8A, // TXA
        0x9D, 0x00, 0x02, // STA $0200,X
        0xE0, 0x0A, // CPX #$0A
        0xD0, 0xF7, // BNE loop
        0x00, // BRK
    ];
    let mut cpu = setup_cpu(&program);

    let cycles = run_until(&mut cpu, BRK_HANDLER);

    assert_eq!(cpu.x(), 10);
    for n in 1..=10u16 {
        assert_eq!(cpu.memory().peek(0x0200 + n), n as u8);
    }
    // LDX + 10 * (INX + TXA + STA abs,X + CPX + BNE) + BRK
    assert_eq!(cycles, 2 + 10 * (2 + 2 + 5 + 2 + 2) + 7);
    assert_eq!(cpu.cycles(), cycles);
}

#[test]
fn test_sixteen_bit_addition() {
    let program = [
        0x18, // CLC
        0xA5, 0x10, // LDA $10
        0x65, 0x12, // ADC $12
        0x85, 0x14, // STA $14
        0xA5, 0x11, // LDA $11
        0x65, 0x13, // ADC $13
        0x85, 0x15, // STA $15
        0x00, // BRK
    ];
    let mut cpu = setup_cpu(&program);
    // $12FF + $0301
    cpu.memory_mut().load(0x0010, &[0xFF, 0x12, 0x01, 0x03]);

    run_until(&mut cpu, BRK_HANDLER);

    assert_eq!(cpu.memory().peek(0x0014), 0x00);
    assert_eq!(cpu.memory().peek(0x0015), 0x16);
}

#[test]
fn test_subroutine_fills_memory() {
    let program = [
        0xA0, 0x04, // LDY #$04
        0x20, 0x10, 0x80, // JSR fill
        0x00, // BRK
    ];
    let fill = [
        0xA9, 0xEE, // fill: LDA #$EE
        0x88, // loop: DEY
        0x99, 0x00, 0x03, // STA $0300,Y
        0xD0, 0xFA, // BNE loop
        0x60, // RTS
    ];
    let mut cpu = setup_cpu(&program);
    cpu.memory_mut().load(0x8010, &fill);

    run_until(&mut cpu, BRK_HANDLER);

    for offset in 0..4 {
        assert_eq!(cpu.memory().peek(0x0300 + offset), 0xEE);
    }
    assert_eq!(cpu.y(), 0);
    // Only the BRK frame is left on the stack
    assert_eq!(cpu.sp(), 0xFA);
}

#[test]
fn test_run_for_cycles_overshoots_by_partial_instruction() {
    // LDA #$01 (2) ; STA $0300 (4) ; NOP ...
    let mut cpu = setup_cpu(&[0xA9, 0x01, 0x8D, 0x00, 0x03, 0xEA, 0xEA]);

    assert_eq!(cpu.run_for_cycles(3).unwrap(), 6);
    assert_eq!(cpu.memory().peek(0x0300), 0x01);
    assert_eq!(cpu.pc(), 0x8005);
}

#[test]
fn test_run_for_cycles_propagates_errors() {
    let mut cpu = setup_cpu(&[0xEA, 0xEA, 0x02]);

    assert_eq!(
        cpu.run_for_cycles(100),
        Err(ExecutionError::Decode {
            opcode: 0x02,
            pc: 0x8002
        })
    );
    assert_eq!(cpu.cycles(), 4);
    assert_eq!(cpu.pc(), 0x8003);
}
