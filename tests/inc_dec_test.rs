//! Tests for INC, DEC, INX, INY, DEX and DEY.

use nes_cpu::{Cpu, FlatMemory};

fn setup_cpu() -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.load(0xFFFC, &[0x00, 0x80]);
    let mut cpu = Cpu::new(memory).unwrap();
    cpu.reset().unwrap();
    cpu
}

#[test]
fn test_inc_zero_page_wraps() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x0010, &[0xFF]);
    cpu.memory_mut().load(0x8000, &[0xE6, 0x10]);
    cpu.set_flag_c(false);

    assert_eq!(cpu.step().unwrap(), 5);

    assert_eq!(cpu.memory().peek(0x0010), 0x00);
    assert!(cpu.flag_z());
    // Carry is never touched
    assert!(!cpu.flag_c());
}

#[test]
fn test_dec_absolute_wraps() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xCE, 0x00, 0x03]);

    assert_eq!(cpu.step().unwrap(), 6);

    assert_eq!(cpu.memory().peek(0x0300), 0xFF);
    assert!(cpu.flag_n());
}

#[test]
fn test_inc_absolute_x() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x0305, &[0x41]);
    cpu.memory_mut().load(0x8000, &[0xFE, 0x00, 0x03]);
    cpu.set_x(0x05);

    assert_eq!(cpu.step().unwrap(), 7);
    assert_eq!(cpu.memory().peek(0x0305), 0x42);
}

#[test]
fn test_inx_wraps() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xE8]);
    cpu.set_x(0xFF);

    cpu.step().unwrap();

    assert_eq!(cpu.x(), 0x00);
    assert!(cpu.flag_z());
}

#[test]
fn test_iny() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xC8]);
    cpu.set_y(0x7F);

    cpu.step().unwrap();

    assert_eq!(cpu.y(), 0x80);
    assert!(cpu.flag_n());
}

#[test]
fn test_dex_and_dey() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xCA, 0x88]);
    cpu.set_x(0x01);
    cpu.set_y(0x00);

    cpu.step().unwrap();
    assert_eq!(cpu.x(), 0x00);
    assert!(cpu.flag_z());

    cpu.step().unwrap();
    assert_eq!(cpu.y(), 0xFF);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
}
