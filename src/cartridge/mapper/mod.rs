//! NES mappers for PRG/CHR memory mapping and nametable mirroring.
//!
//! - **Mapper 0** ([NROM](https://www.nesdev.org/wiki/NROM)): no bank switching.
//! - **Mapper 1** ([MMC1](https://www.nesdev.org/wiki/MMC1)): shift-register bank switching.
//! - **Mapper 2** ([UxROM](https://www.nesdev.org/wiki/UxROM)): switchable 16 KiB PRG bank, CHR RAM.
//!
//! Mirroring controls how the PPU maps the four logical nametables ($2000, $2400, $2800, $2C00)
//! onto 2 KiB of internal VRAM. See [PPU nametables](https://www.nesdev.org/wiki/PPU_nametables#Nametable_mirroring).

/// Nametable mirroring arrangement, as reported by the mapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mirroring {
    /// $2000/$2400 share the first KiB, $2800/$2C00 the second.
    Horizontal,
    /// $2000/$2800 share the first KiB, $2400/$2C00 the second.
    Vertical,
    /// All four nametables use the first 1 KiB.
    SingleScreenLower,
    /// All four nametables use the second 1 KiB.
    SingleScreenUpper,
    /// Four independent nametables (cartridge-supplied VRAM; aliased into 2 KiB here).
    FourScreen,
}

pub mod mapper;

pub mod mapper0;
pub mod mapper1;
pub mod mapper2;
