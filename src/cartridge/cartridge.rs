//! NES cartridge loading from iNES format (.nes files).
//!
//! Implements the [iNES](https://www.nesdev.org/wiki/INES) format: 16-byte header (magic "NES\x1A",
//! PRG size in 16 KiB units, CHR size in 8 KiB units, flags 6–7 for mirroring, trainer, battery and
//! mapper number), optional 512-byte trainer, then PRG ROM, then CHR ROM. CHR may be ROM or RAM
//! depending on the board. The [Mapper](https://www.nesdev.org/wiki/Mapper) implements CPU
//! ($6000–$FFFF) and PPU ($0000–$1FFF) address decoding and bank switching.

use std::fs::File;
use std::io::{self, Read};

use crate::cartridge::mapper::mapper::Mapper;
use crate::cartridge::mapper::mapper0::Mapper0;
use crate::cartridge::mapper::mapper1::Mapper1;
use crate::cartridge::mapper::mapper2::Mapper2;
use crate::cartridge::mapper::Mirroring;

const HEADER_SIZE: usize = 16;
const TRAINER_SIZE: usize = 512;
const PRG_PAGE: usize = 16 * 1024;
const CHR_PAGE: usize = 8 * 1024;

/// Cartridge: holds the mapper that implements PRG/CHR access and nametable
/// mirroring. The CPU bus routes $6000–$FFFF here; the PPU routes $0000–$1FFF.
pub struct Cartridge {
    pub mapper: Box<dyn Mapper>,
    /// Mapper number from the header, kept for diagnostics.
    pub mapper_id: u8,
}

impl std::fmt::Debug for Cartridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cartridge")
            .field("mapper_id", &self.mapper_id)
            .finish()
    }
}

impl Cartridge {
    /// Load a cartridge from an iNES file on disk.
    pub fn from_file(path: &str) -> io::Result<Self> {
        let mut file = File::open(path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Parse an iNES image already in memory. Header bytes 4–5 give PRG/CHR
    /// page counts; the mapper number is the low nibble of byte 6 combined
    /// with the high nibble of byte 7.
    pub fn from_bytes(data: &[u8]) -> io::Result<Self> {
        if data.len() < HEADER_SIZE || &data[0..4] != b"NES\x1A" {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "not an iNES ROM (bad magic)",
            ));
        }

        let prg_size = data[4] as usize * PRG_PAGE;
        let chr_size = data[5] as usize * CHR_PAGE;
        let flags6 = data[6];
        let flags7 = data[7];

        if prg_size == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "iNES header declares no PRG ROM",
            ));
        }

        let mapper_id = (flags6 >> 4) | (flags7 & 0xF0);

        // Flags 6: bit 0 = vertical mirroring, bit 1 = battery RAM, bit 2 =
        // trainer present, bit 3 = four-screen VRAM.
        let mirroring = if flags6 & 0x08 != 0 {
            Mirroring::FourScreen
        } else if flags6 & 0x01 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };

        let prg_start = HEADER_SIZE + if flags6 & 0x04 != 0 { TRAINER_SIZE } else { 0 };
        let prg_end = prg_start + prg_size;
        let chr_end = prg_end + chr_size;

        if data.len() < chr_end {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "ROM file shorter than header declares",
            ));
        }

        let prg_rom = data[prg_start..prg_end].to_vec();
        // CHR size 0 means the board carries 8 KiB of CHR RAM instead.
        let chr_is_ram = chr_size == 0;
        let chr = if chr_is_ram {
            vec![0; CHR_PAGE]
        } else {
            data[prg_end..chr_end].to_vec()
        };

        let mapper: Box<dyn Mapper> = match mapper_id {
            0 => Box::new(Mapper0::new(prg_rom, chr, chr_is_ram, mirroring)),
            1 => Box::new(Mapper1::new(prg_rom, chr, chr_is_ram)),
            2 => Box::new(Mapper2::new(prg_rom, chr, chr_is_ram, mirroring)),
            n => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("unsupported mapper {}", n),
                ))
            }
        };

        Ok(Self { mapper, mapper_id })
    }

    /// CPU read in cartridge space ($6000–$FFFF).
    pub fn read(&self, addr: u16) -> u8 {
        self.mapper.read(addr)
    }

    /// CPU write in cartridge space (PRG RAM or mapper registers).
    pub fn write(&mut self, addr: u16, data: u8) {
        self.mapper.write(addr, data);
    }

    /// PPU read from the pattern tables.
    pub fn ppu_read(&self, addr: u16) -> u8 {
        self.mapper.ppu_read(addr)
    }

    /// PPU write to the pattern tables (CHR RAM boards).
    pub fn ppu_write(&mut self, addr: u16, data: u8) {
        self.mapper.ppu_write(addr, data);
    }

    /// Current nametable mirroring.
    pub fn mirroring(&self) -> Mirroring {
        self.mapper.mirroring()
    }
}
