//! The 16-byte [iNES](https://www.nesdev.org/wiki/INES) header.
//!
//! Bytes 0–3 hold the "NES\x1A" signature, byte 4 the PRG ROM size in 16 KiB units, byte 5
//! the CHR ROM size in 8 KiB units. Flags 6 carry the mapper low nibble (bits 4–7) and the
//! mirroring bit (bit 0); flags 7 carry the mapper high nibble. Bytes 8–15 are left zero.
//! Flags 6 bit 2 marks a 512-byte trainer between the header and PRG; images built here never
//! have one, but images read back from disk may.

use crate::cartridge::mapper::Mirroring;
use crate::error::{Error, Result};

pub const MAGIC: [u8; 4] = *b"NES\x1A";
pub const HEADER_SIZE: usize = 16;
pub const PRG_BANK_SIZE: usize = 16 * 1024;
pub const CHR_BANK_SIZE: usize = 8 * 1024;
pub const TRAINER_SIZE: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InesHeader {
    pub prg_banks: u8,
    pub chr_banks: u8,
    pub mapper: u8,
    pub mirroring: Mirroring,
    /// 512-byte trainer present before PRG (flags 6 bit 2).
    pub trainer: bool,
}

impl InesHeader {
    /// Header for `prg_banks` 16 KiB PRG banks and `chr_banks` 8 KiB CHR banks, no trainer.
    pub fn new(prg_banks: u8, chr_banks: u8, mapper: u8, mirroring: Mirroring) -> Self {
        Self {
            prg_banks,
            chr_banks,
            mapper,
            mirroring,
            trainer: false,
        }
    }

    /// Decode a header from the start of an image. Bytes 8–15 are ignored.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(Error::TooSmall {
                expected: HEADER_SIZE,
                actual: data.len(),
            });
        }
        if data[0..4] != MAGIC {
            return Err(Error::InvalidMagic);
        }

        let mirroring = if data[6] & 1 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };

        Ok(Self {
            prg_banks: data[4],
            chr_banks: data[5],
            mapper: (data[7] & 0xF0) | (data[6] >> 4),
            mirroring,
            trainer: data[6] & 0x04 != 0,
        })
    }

    /// Encode as the 16 bytes that start an image. Bytes 8–15 are zero.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&MAGIC);
        bytes[4] = self.prg_banks;
        bytes[5] = self.chr_banks;
        bytes[6] = (self.mapper << 4) | self.mirroring.flag_bit();
        if self.trainer {
            bytes[6] |= 0x04;
        }
        bytes[7] = self.mapper & 0xF0;
        bytes
    }

    /// Bytes between the header and PRG: 512 with a trainer, 0 otherwise.
    pub fn trainer_size(&self) -> usize {
        if self.trainer { TRAINER_SIZE } else { 0 }
    }

    /// Offset of PRG from the start of the image.
    pub fn prg_offset(&self) -> usize {
        HEADER_SIZE + self.trainer_size()
    }

    /// PRG ROM size in bytes.
    pub fn prg_size(&self) -> usize {
        self.prg_banks as usize * PRG_BANK_SIZE
    }

    /// CHR ROM size in bytes.
    pub fn chr_size(&self) -> usize {
        self.chr_banks as usize * CHR_BANK_SIZE
    }

    /// Size of the full image this header describes, header and trainer included.
    pub fn image_size(&self) -> usize {
        self.prg_offset() + self.prg_size() + self.chr_size()
    }
}

impl Default for InesHeader {
    fn default() -> Self {
        Self::new(1, 1, 0, Mirroring::Horizontal)
    }
}
