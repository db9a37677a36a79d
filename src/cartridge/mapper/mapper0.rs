//! Mapper 0 (NROM): no bank switching, 16/32KB PRG.

use crate::cartridge::header::PRG_BANK_SIZE;
use crate::cartridge::mapper::mapper::Mapper;

/// NROM view of a PRG region: $8000-$FFFF, 16KB mirrored into $C000.
pub struct Mapper0<'a> {
    prg_rom: &'a [u8],
}

impl<'a> Mapper0<'a> {
    /// Regions larger than 32KB are not NROM-sized; only the last 32KB is visible,
    /// which keeps the final bank (and its vectors) at $C000-$FFFF.
    pub fn new(prg_rom: &'a [u8]) -> Self {
        let window = 2 * PRG_BANK_SIZE;
        let prg_rom = if prg_rom.len() > window {
            &prg_rom[prg_rom.len() - window..]
        } else {
            prg_rom
        };
        Self { prg_rom }
    }
}

impl Mapper for Mapper0<'_> {
    fn read(&self, addr: u16) -> u8 {
        match addr {
            // PRG ROM: $8000-$FFFF, mirror if 16KB
            0x8000..=0xFFFF if !self.prg_rom.is_empty() => {
                let addr = (addr - 0x8000) as usize % self.prg_rom.len();
                self.prg_rom[addr]
            }
            _ => 0,
        }
    }
}
