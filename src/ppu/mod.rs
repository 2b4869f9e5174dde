//! PPU (Picture Processing Unit) emulation for the NES.
//!
//! See [PPU](https://www.nesdev.org/wiki/PPU), [PPU registers](https://www.nesdev.org/wiki/PPU_registers),
//! [PPU rendering](https://www.nesdev.org/wiki/PPU_rendering). A 341-dot × 262-scanline state
//! machine: background tile fetch pipeline with loopy v/t scrolling, sprite evaluation into
//! secondary OAM, per-dot pixel multiplexing, vblank NMI, and the eight CPU-visible registers.

pub mod ppu;
