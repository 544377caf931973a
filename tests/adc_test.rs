//! Tests for the ADC (Add with Carry) instruction.
//!
//! Tests cover:
//! - All 8 addressing modes
//! - Flag updates (C, Z, V, N)
//! - Signed overflow in both directions
//! - Base cycle counts

use nes_cpu::{Cpu, FlatMemory};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.load(0xFFFC, &[0x00, 0x80]);
    let mut cpu = Cpu::new(memory).unwrap();
    cpu.reset().unwrap();
    cpu
}

// ========== Basic ADC Operation Tests ==========

#[test]
fn test_adc_immediate_with_carry_in() {
    let mut cpu = setup_cpu();

    // ADC #$10
    cpu.memory_mut().load(0x8000, &[0x69, 0x10]);
    cpu.set_a(0x10);
    cpu.set_flag_c(true);

    assert_eq!(cpu.step().unwrap(), 2);

    assert_eq!(cpu.a(), 0x21);
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_v());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.pc(), 0x8002);
}

#[test]
fn test_adc_carry_out_and_zero() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().load(0x8000, &[0x69, 0x01]);
    cpu.set_a(0xFF);
    cpu.set_flag_c(false);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_v());
    assert!(!cpu.flag_n());
}

#[test]
fn test_adc_positive_overflow() {
    let mut cpu = setup_cpu();

    // 80 + 80 = 160, outside the signed range
    cpu.memory_mut().load(0x8000, &[0x69, 0x50]);
    cpu.set_a(0x50);
    cpu.set_flag_c(false);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0xA0);
    assert!(cpu.flag_v());
    assert!(cpu.flag_n());
    assert!(!cpu.flag_c());
}

#[test]
fn test_adc_negative_overflow() {
    let mut cpu = setup_cpu();

    // -48 + -112 = -160
    cpu.memory_mut().load(0x8000, &[0x69, 0x90]);
    cpu.set_a(0xD0);
    cpu.set_flag_c(false);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x60);
    assert!(cpu.flag_v());
    assert!(cpu.flag_c());
    assert!(!cpu.flag_n());
}

#[test]
fn test_adc_carry_in_pushes_into_overflow() {
    let mut cpu = setup_cpu();

    // 127 + 0 + 1 = 128
    cpu.memory_mut().load(0x8000, &[0x69, 0x00]);
    cpu.set_a(0x7F);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x80);
    assert!(cpu.flag_v());
    assert!(cpu.flag_n());
}

#[test]
fn test_adc_ignores_decimal_flag() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().load(0x8000, &[0x69, 0x09]);
    cpu.set_a(0x09);
    cpu.set_flag_d(true);
    cpu.set_flag_c(false);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x12);
}

// ========== Addressing Mode Tests ==========

#[test]
fn test_adc_zero_page() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x0010, &[0x05]);
    cpu.memory_mut().load(0x8000, &[0x65, 0x10]);
    cpu.set_a(0x01);
    cpu.set_flag_c(false);

    assert_eq!(cpu.step().unwrap(), 3);
    assert_eq!(cpu.a(), 0x06);
}

#[test]
fn test_adc_zero_page_x() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x0015, &[0x05]);
    cpu.memory_mut().load(0x8000, &[0x75, 0x10]);
    cpu.set_x(0x05);
    cpu.set_a(0x01);
    cpu.set_flag_c(false);

    assert_eq!(cpu.step().unwrap(), 4);
    assert_eq!(cpu.a(), 0x06);
}

#[test]
fn test_adc_absolute() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x1234, &[0x22]);
    cpu.memory_mut().load(0x8000, &[0x6D, 0x34, 0x12]);
    cpu.set_a(0x11);
    cpu.set_flag_c(false);

    assert_eq!(cpu.step().unwrap(), 4);
    assert_eq!(cpu.a(), 0x33);
    assert_eq!(cpu.pc(), 0x8003);
}

#[test]
fn test_adc_absolute_x_and_y() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x1244, &[0x01]);
    cpu.memory_mut().load(0x1236, &[0x02]);
    // ADC $1234,X ; ADC $1234,Y
    cpu.memory_mut()
        .load(0x8000, &[0x7D, 0x34, 0x12, 0x79, 0x34, 0x12]);
    cpu.set_x(0x10);
    cpu.set_y(0x02);
    cpu.set_a(0x00);
    cpu.set_flag_c(false);

    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x03);
}

#[test]
fn test_adc_indexed_indirect() {
    let mut cpu = setup_cpu();
    // Pointer at $24 -> $4000
    cpu.memory_mut().load(0x0024, &[0x00, 0x40]);
    cpu.memory_mut().load(0x4000, &[0x09]);
    cpu.memory_mut().load(0x8000, &[0x61, 0x20]);
    cpu.set_x(0x04);
    cpu.set_a(0x01);
    cpu.set_flag_c(false);

    assert_eq!(cpu.step().unwrap(), 6);
    assert_eq!(cpu.a(), 0x0A);
}

#[test]
fn test_adc_indirect_indexed() {
    let mut cpu = setup_cpu();
    // Pointer at $20 -> $3000, +Y
    cpu.memory_mut().load(0x0020, &[0x00, 0x30]);
    cpu.memory_mut().load(0x3005, &[0x07]);
    cpu.memory_mut().load(0x8000, &[0x71, 0x20]);
    cpu.set_y(0x05);
    cpu.set_a(0x01);
    cpu.set_flag_c(false);

    assert_eq!(cpu.step().unwrap(), 5);
    assert_eq!(cpu.a(), 0x08);
}
