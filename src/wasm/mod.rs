//! WebAssembly bindings for the CPU core.
//!
//! Exposes an [`Emulator`] that runs a program ROM on the console memory map,
//! with register blocks standing in for the graphics and audio/IO windows.

pub mod api;

pub use api::Emulator;
