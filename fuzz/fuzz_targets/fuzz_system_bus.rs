//! Fuzz target for the console bus.
//!
//! Runs arbitrary programs against the console memory map so that
//! permission checks, mirrors, unmapped holes and OAM DMA get exercised by
//! real instruction traffic. Bus errors are expected; panics are bugs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use nes_cpu::{Cpu, DmaSink, ProgramRom, RegisterBlock, SystemBus};

struct Discard;

impl DmaSink for Discard {
    fn receive_page(&mut self, _page: &[u8; 256]) {}
}

fuzz_target!(|data: &[u8]| {
    let mut image = vec![0xEA; 0x4000];
    let len = data.len().min(0x3FF0);
    image[..len].copy_from_slice(&data[..len]);
    image[0x3FFC] = 0x00;
    image[0x3FFD] = 0x80;

    let rom = ProgramRom::new(image).unwrap();
    let bus = SystemBus::nes(
        rom,
        Box::new(RegisterBlock::ppu()),
        Box::new(RegisterBlock::apu_io()),
        Box::new(Discard),
    )
    .unwrap();

    let mut cpu = Cpu::new(bus).unwrap();
    cpu.reset().unwrap();
    for _ in 0..64 {
        if cpu.step().is_err() {
            break;
        }
    }
});
