//! Tests for LDA, LDX, LDY, STA, STX and STY.

use nes_cpu::{Cpu, FlatMemory};

fn setup_cpu() -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.load(0xFFFC, &[0x00, 0x80]);
    let mut cpu = Cpu::new(memory).unwrap();
    cpu.reset().unwrap();
    cpu
}

// ========== Loads ==========

#[test]
fn test_lda_immediate_flags() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xA9, 0x00, 0xA9, 0x80]);

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x80);
    assert!(!cpu.flag_z());
    assert!(cpu.flag_n());
}

#[test]
fn test_lda_zero_page_x_wraps() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x007F, &[0x33]);
    cpu.memory_mut().load(0x8000, &[0xB5, 0x80]);
    cpu.set_x(0xFF);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x33);
}

#[test]
fn test_lda_absolute_x_crosses_page() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x1300, &[0x44]);
    cpu.memory_mut().load(0x8000, &[0xBD, 0xFF, 0x12]);
    cpu.set_x(0x01);

    // Base cycles only with the default configuration
    assert_eq!(cpu.step().unwrap(), 4);
    assert_eq!(cpu.a(), 0x44);
}

#[test]
fn test_lda_indexed_indirect_pointer_wraps_in_zero_page() {
    let mut cpu = setup_cpu();
    // Pointer bytes at $FF and $00
    cpu.memory_mut().load(0x00FF, &[0x00]);
    cpu.memory_mut().load(0x0000, &[0x05]);
    cpu.memory_mut().load(0x0500, &[0x66]);
    cpu.memory_mut().load(0x8000, &[0xA1, 0xFE]);
    cpu.set_x(0x01);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x66);
}

#[test]
fn test_ldx_zero_page_y() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x0012, &[0x81]);
    cpu.memory_mut().load(0x8000, &[0xB6, 0x10]);
    cpu.set_y(0x02);

    assert_eq!(cpu.step().unwrap(), 4);
    assert_eq!(cpu.x(), 0x81);
    assert!(cpu.flag_n());
}

#[test]
fn test_ldy_absolute_x() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x0405, &[0x01]);
    cpu.memory_mut().load(0x8000, &[0xBC, 0x00, 0x04]);
    cpu.set_x(0x05);

    cpu.step().unwrap();
    assert_eq!(cpu.y(), 0x01);
}

// ========== Stores ==========

#[test]
fn test_sta_zero_page_leaves_flags() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x85, 0x10]);
    cpu.set_a(0x00);
    cpu.set_status(0x80);

    assert_eq!(cpu.step().unwrap(), 3);

    assert_eq!(cpu.memory().peek(0x0010), 0x00);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
}

#[test]
fn test_sta_absolute_y() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x99, 0x00, 0x02]);
    cpu.set_a(0x5A);
    cpu.set_y(0x10);

    assert_eq!(cpu.step().unwrap(), 5);
    assert_eq!(cpu.memory().peek(0x0210), 0x5A);
}

#[test]
fn test_sta_indirect_indexed() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x0040, &[0xF0, 0x20]);
    cpu.memory_mut().load(0x8000, &[0x91, 0x40]);
    cpu.set_a(0xAB);
    cpu.set_y(0x20);

    assert_eq!(cpu.step().unwrap(), 6);
    assert_eq!(cpu.memory().peek(0x2110), 0xAB);
}

#[test]
fn test_stx_zero_page_y_wraps() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x96, 0xF0]);
    cpu.set_x(0x99);
    cpu.set_y(0x20);

    cpu.step().unwrap();
    assert_eq!(cpu.memory().peek(0x0010), 0x99);
}

#[test]
fn test_sty_absolute() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x8C, 0x34, 0x12]);
    cpu.set_y(0x42);

    assert_eq!(cpu.step().unwrap(), 4);
    assert_eq!(cpu.memory().peek(0x1234), 0x42);
    assert_eq!(cpu.pc(), 0x8003);
}
