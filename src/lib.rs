//! famicore: a cycle-timed NES (Nintendo Entertainment System) emulation core.
//!
//! Implements the NES chipset as documented on the
//! [NESdev Wiki](https://www.nesdev.org/wiki/NES_reference_guide): the Ricoh
//! 2A03 (6502 CPU + APU), the 2C02 PPU, cartridge mappers and controller I/O.
//! The CPU is the clock source; every bus access advances the PPU three dots
//! and the APU one step, keeping the three chips in hardware lockstep.
//!
//! ## Modules (NESdev references)
//!
//! - **apu** – [APU](https://www.nesdev.org/wiki/APU): pulse×2, triangle, noise,
//!   frame counter, 44.1 kHz downsampler, lock-free sample ring
//! - **bus** – [CPU memory map](https://www.nesdev.org/wiki/CPU_memory_map): RAM, PPU,
//!   APU, controllers, cartridge; 3 PPU dots per CPU cycle
//! - **cartridge** – [iNES](https://www.nesdev.org/wiki/INES) loading;
//!   [Mapper](https://www.nesdev.org/wiki/Mapper) NROM (0), MMC1 (1), UxROM (2)
//! - **controller** – [Controller reading](https://www.nesdev.org/wiki/Controller_reading):
//!   $4016 strobe, shift-out
//! - **cpu** – [6502](https://www.nesdev.org/wiki/CPU) / 2A03: full + undocumented
//!   opcodes, [NMI](https://www.nesdev.org/wiki/NMI), OAM DMA
//! - **nes** – the assembled console: `load_rom`, `step_frame`, `send_input`,
//!   `get_audio_samples`
//! - **ppu** – [PPU](https://www.nesdev.org/wiki/PPU): loopy scrolling, background
//!   and sprite pipelines, OAM, 256×240 output
//! - **ram** – 2 KiB work RAM with mirroring

pub mod apu;
pub mod bus;
pub mod cartridge;
pub mod controller;
pub mod cpu;
pub mod nes;
pub mod ppu;
pub mod ram;
