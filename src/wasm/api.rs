//! WASM API for the CPU core.
//!
//! Provides JavaScript-callable interfaces for CPU control and state
//! inspection. Core errors surface as `js_sys::Error`.

use crate::{Cpu, DmaSink, InterruptState, ProgramRom, RegisterBlock, SystemBus};
use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// Controller port registers within the audio/IO block.
const JOY1_OFFSET: u16 = 0x16;
const JOY2_OFFSET: u16 = 0x17;

/// Sprite memory filled by OAM DMA.
struct OamBuffer {
    data: [u8; 256],
}

impl DmaSink for OamBuffer {
    fn receive_page(&mut self, page: &[u8; 256]) {
        self.data = *page;
    }
}

fn js_error(err: impl Display) -> js_sys::Error {
    js_sys::Error::new(&err.to_string())
}

/// Main emulator interface for JavaScript.
#[wasm_bindgen]
pub struct Emulator {
    cpu: Cpu<SystemBus>,
    ppu: Rc<RefCell<RegisterBlock>>,
    apu_io: Rc<RefCell<RegisterBlock>>,
    oam: Rc<RefCell<OamBuffer>>,
}

#[wasm_bindgen]
impl Emulator {
    /// Builds the console bus around a PRG image (16KB or 32KB) and resets.
    #[wasm_bindgen(constructor)]
    pub fn new(prg: &[u8]) -> Result<Emulator, js_sys::Error> {
        let ppu = Rc::new(RefCell::new(RegisterBlock::ppu()));
        let apu_io = Rc::new(RefCell::new(RegisterBlock::apu_io()));
        let oam = Rc::new(RefCell::new(OamBuffer { data: [0; 256] }));

        let rom = ProgramRom::new(prg.to_vec()).map_err(js_error)?;
        let bus = SystemBus::nes(
            rom,
            Box::new(Rc::clone(&ppu)),
            Box::new(Rc::clone(&apu_io)),
            Box::new(Rc::clone(&oam)),
        )
        .map_err(js_error)?;

        let mut cpu = Cpu::new(bus).map_err(js_error)?;
        cpu.reset().map_err(js_error)?;

        Ok(Emulator {
            cpu,
            ppu,
            apu_io,
            oam,
        })
    }

    /// Executes one instruction (or interrupt) and returns its cycles.
    pub fn step(&mut self) -> Result<u32, js_sys::Error> {
        self.cpu.step().map_err(js_error)
    }

    /// Runs at least `cycles` cycles and returns the cycles consumed.
    pub fn run_for_cycles(&mut self, cycles: u32) -> Result<f64, js_sys::Error> {
        self.cpu
            .run_for_cycles(u64::from(cycles))
            .map(|consumed| consumed as f64)
            .map_err(js_error)
    }

    /// Reloads PC from the reset vector.
    pub fn reset(&mut self) -> Result<(), js_sys::Error> {
        self.cpu.reset().map_err(js_error)
    }

    /// Requests a non-maskable interrupt (vertical blank).
    pub fn raise_nmi(&mut self) {
        self.cpu.raise_nmi();
    }

    /// True while an NMI is waiting for the next step.
    #[wasm_bindgen(getter)]
    pub fn nmi_pending(&self) -> bool {
        self.cpu.interrupt_state() == InterruptState::NmiPending
    }

    /// Last value the program wrote to graphics register `offset` (0-7).
    pub fn ppu_register(&self, offset: u16) -> u8 {
        self.ppu.borrow().latched(offset & 0x07)
    }

    /// Sets the value the program reads back from graphics register `offset`.
    pub fn set_ppu_register(&mut self, offset: u16, value: u8) {
        self.ppu.borrow_mut().preset(offset & 0x07, value);
    }

    /// Sets the byte a program reads from controller port 1 or 2.
    pub fn set_controller(&mut self, port: u8, value: u8) {
        let offset = if port == 2 { JOY2_OFFSET } else { JOY1_OFFSET };
        self.apu_io.borrow_mut().preset(offset, value);
    }

    /// Sprite memory as last filled by OAM DMA.
    pub fn oam(&self) -> Vec<u8> {
        self.oam.borrow().data.to_vec()
    }

    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.cpu.a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.cpu.x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.cpu.y()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.cpu.sp()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.cpu.status()
    }

    /// Total cycles (as f64, JavaScript has no u64).
    #[wasm_bindgen(getter)]
    pub fn cycles(&self) -> f64 {
        self.cpu.cycles() as f64
    }
}
