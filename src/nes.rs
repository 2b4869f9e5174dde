//! The assembled console and its host-facing API.
//!
//! [`Nes`] owns the whole machine: the CPU owns the bus, which owns the PPU,
//! APU, RAM, controllers and cartridge — one ownership tree, no back-pointers.
//! Hosts drive it frame by frame: `step_frame` runs emulation until the PPU
//! signals vertical blank and copies out the framebuffer; audio is drained
//! asynchronously from the APU's lock-free ring; input arrives as per-button
//! events on port 1.

use std::io;
use std::sync::Arc;

use crate::apu::ring::SampleRing;
use crate::bus::{Bus, NesBus};
use crate::cartridge::cartridge::Cartridge;
use crate::cpu::cpu::{Cpu, CpuState};

/// Framebuffer dimensions: the PPU always outputs 256×240.
pub const FRAME_WIDTH: usize = 256;
pub const FRAME_HEIGHT: usize = 240;

/// A complete NES: 2A03 CPU (with APU behind the bus), 2C02 PPU, cartridge.
pub struct Nes {
    cpu: Cpu<NesBus>,
}

impl Nes {
    /// Load an iNES ROM from disk and power the console on. Any failure
    /// (missing file, bad magic, truncated image, unsupported mapper) is
    /// reported through the single `io::Result` and leaves nothing allocated.
    pub fn load_rom(path: &str) -> io::Result<Self> {
        Ok(Self::from_cartridge(Cartridge::from_file(path)?))
    }

    /// Power on with an already-parsed cartridge (embedding hosts and tests).
    pub fn from_cartridge(cart: Cartridge) -> Self {
        let mut cpu = Cpu::new(NesBus::new(cart));
        cpu.reset();
        Self { cpu }
    }

    /// Run emulation until the PPU finishes the current frame, then copy the
    /// 256×240 0xAABBGGRR framebuffer into `out`. If `out` is smaller than a
    /// full frame the blit is skipped — emulation has still advanced and the
    /// next frame overwrites.
    pub fn step_frame(&mut self, out: &mut [u32]) {
        while !self.cpu.bus.ppu.frame_ready {
            self.cpu.step();
        }
        self.cpu.bus.ppu.frame_ready = false;
        if out.len() >= FRAME_WIDTH * FRAME_HEIGHT {
            out[..FRAME_WIDTH * FRAME_HEIGHT].copy_from_slice(&self.cpu.bus.ppu.framebuffer);
        }
    }

    /// Execute a single CPU instruction (headless harnesses).
    pub fn step(&mut self) {
        self.cpu.step();
    }

    /// Press or release one controller-1 button: 0 = A, 1 = B, 2 = Select,
    /// 3 = Start, 4 = Up, 5 = Down, 6 = Left, 7 = Right.
    pub fn send_input(&mut self, button: u8, pressed: bool) {
        self.cpu.bus.controller1.set_button(button, pressed);
    }

    /// Non-blocking drain of mixed 44.1 kHz mono samples. Returns how many
    /// were written into `out`.
    pub fn get_audio_samples(&mut self, out: &mut [i16]) -> usize {
        self.cpu.bus.apu.sample_ring().read_into(out)
    }

    /// Handle to the sample ring for a dedicated audio consumer thread.
    pub fn audio_ring(&self) -> Arc<SampleRing> {
        self.cpu.bus.apu.sample_ring()
    }

    /// Register/cycle snapshot (emulation thread only).
    pub fn cpu_state(&self) -> CpuState {
        self.cpu.snapshot()
    }

    /// Force the program counter (nestest-style headless entry points).
    pub fn set_pc(&mut self, pc: u16) {
        self.cpu.set_pc(pc);
    }

    /// Read a byte off the bus without side-effect-free guarantees; meant for
    /// test harnesses inspecting RAM or ROM, not for $2002-style live registers.
    pub fn peek(&mut self, addr: u16) -> u8 {
        self.cpu.bus.read(addr)
    }
}
