//! The system bus: address decoding and the master clock.
//!
//! The CPU sees a 16-bit address space ([CPU memory map](https://www.nesdev.org/wiki/CPU_memory_map)):
//!
//! - $0000–$1FFF work RAM, mirrored every 2 KiB
//! - $2000–$3FFF the eight PPU registers, mirrored every 8 bytes
//! - $4000–$4013 APU channel registers
//! - $4014 OAM DMA trigger (write-only; handled in the CPU, which owns the
//!   cycle stalls)
//! - $4015 APU status/enable
//! - $4016/$4017 controller ports ($4017 write doubles as the APU frame counter)
//! - $4018–$401F CPU test mode (unused)
//! - $4020–$5FFF expansion (open bus here)
//! - $6000–$FFFF cartridge via the mapper
//!
//! `tick` is the single cycle authority: each call is one CPU cycle and
//! advances the PPU three dots and the APU one step.

use ansi_term::Colour::Yellow;

use crate::apu::apu::Apu;
use crate::cartridge::cartridge::Cartridge;
use crate::controller::Controller;
use crate::ppu::ppu::Ppu;
use crate::ram::WorkRam;

/// Memory-port capability the CPU is generic over. `tick` and `poll_nmi`
/// default to no-ops so simple test buses only implement the data port.
pub trait Bus {
    fn read(&mut self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, data: u8);
    /// One CPU cycle of device time.
    fn tick(&mut self) {}
    /// Read-and-clear the pending NMI edge.
    fn poll_nmi(&mut self) -> bool {
        false
    }
}

/// The full NES bus wiring RAM, PPU, APU, controllers and the cartridge.
pub struct NesBus {
    pub ram: WorkRam,
    pub ppu: Ppu,
    pub apu: Apu,
    pub cart: Cartridge,
    pub controller1: Controller,
    pub controller2: Controller,
}

impl NesBus {
    pub fn new(cart: Cartridge) -> Self {
        Self {
            ram: WorkRam::new(),
            ppu: Ppu::new(),
            apu: Apu::new(),
            cart,
            controller1: Controller::new(),
            controller2: Controller::new(),
        }
    }
}

impl Bus for NesBus {
    fn read(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram.read(addr),
            0x2000..=0x3FFF => self.ppu.read_register(addr, &mut self.cart),
            0x4014 => {
                eprintln!(
                    "{} read from write-only $4014",
                    Yellow.bold().paint("WARN")
                );
                0
            }
            0x4015 => self.apu.read_status(),
            0x4016 => self.controller1.read(),
            0x4017 => self.controller2.read(),
            // Remaining APU registers, test mode and expansion read open bus.
            0x4000..=0x401F => 0,
            0x4020..=0x5FFF => 0,
            0x6000..=0xFFFF => self.cart.read(addr),
        }
    }

    fn write(&mut self, addr: u16, data: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram.write(addr, data),
            0x2000..=0x3FFF => self.ppu.write_register(addr, data, &mut self.cart),
            // $4014 never arrives here: the CPU expands it into the DMA
            // transfer (it owns the cycle stalls). OAM bytes come in as $2004.
            0x4014 => {}
            // A $4016 write strobes both controller shift registers.
            0x4016 => {
                self.controller1.write(data);
                self.controller2.write(data);
            }
            0x4000..=0x4013 | 0x4015 | 0x4017 => self.apu.write(addr, data),
            0x4018..=0x5FFF => {}
            0x6000..=0xFFFF => self.cart.write(addr, data),
        }
    }

    /// One CPU cycle: three PPU dots, one APU step.
    fn tick(&mut self) {
        self.ppu.tick(&mut self.cart);
        self.ppu.tick(&mut self.cart);
        self.ppu.tick(&mut self.cart);
        self.apu.tick();
    }

    fn poll_nmi(&mut self) -> bool {
        self.ppu.take_nmi()
    }
}
