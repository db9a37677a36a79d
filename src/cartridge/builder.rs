//! Assembling and writing iNES images.
//!
//! An image is the 16-byte header, then `prg_bank_count` zero-filled 16 KiB PRG banks holding
//! the program at offset 0 and the reset vector 4 bytes before the end of PRG ($FFFC under
//! NROM), then `chr_bank_count` zero-filled 8 KiB CHR banks.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::cartridge::header::{HEADER_SIZE, InesHeader, PRG_BANK_SIZE};
use crate::cartridge::mapper::Mirroring;
use crate::cartridge::mapper::mapper::Mapper;
use crate::cartridge::mapper::mapper0::Mapper0;
use crate::error::{Error, Result};

/// Distance of the reset vector from the end of PRG.
const RESET_VECTOR_FROM_END: usize = 4;

/// Everything needed to produce one image.
#[derive(Debug, Clone)]
pub struct RomConfig {
    pub prg_bank_count: u8,
    pub chr_bank_count: u8,
    pub mirroring: Mirroring,
    pub mapper: u8,
    pub program: Vec<u8>,
    pub reset_vector: u16,
    pub output_path: PathBuf,
    /// Skip the size check and let the reset vector overwrite the end of a too-long program.
    pub allow_overlap: bool,
}

impl Default for RomConfig {
    fn default() -> Self {
        Self {
            prg_bank_count: 1,
            chr_bank_count: 1,
            mirroring: Mirroring::Horizontal,
            mapper: 0,
            program: Vec::new(),
            reset_vector: 0x8000,
            output_path: PathBuf::from("test.nes"),
            allow_overlap: false,
        }
    }
}

impl RomConfig {
    /// The header this configuration produces.
    pub fn header(&self) -> InesHeader {
        InesHeader::new(
            self.prg_bank_count,
            self.chr_bank_count,
            self.mapper,
            self.mirroring,
        )
    }

    /// Bytes available to the program before the reset vector slot.
    pub fn program_capacity(&self) -> usize {
        (self.prg_bank_count as usize * PRG_BANK_SIZE).saturating_sub(RESET_VECTOR_FROM_END)
    }

    /// Lay out header, PRG and CHR in memory. Fails on zero PRG banks, or on a program that
    /// reaches the reset vector unless `allow_overlap` is set.
    pub fn build(&self) -> Result<RomImage> {
        if self.prg_bank_count == 0 {
            return Err(Error::InvalidBankCount);
        }
        let capacity = self.program_capacity();
        if self.program.len() > capacity {
            if !self.allow_overlap {
                return Err(Error::OversizedProgram {
                    len: self.program.len(),
                    capacity,
                });
            }
            warn!(
                "program is {} bytes, reset vector overwrites bytes past {capacity}",
                self.program.len()
            );
        }

        let header = self.header();
        let prg_size = header.prg_size();
        let chr_size = header.chr_size();
        debug!(
            "layout: header {HEADER_SIZE}, PRG {prg_size} ({} banks), CHR {chr_size} ({} banks)",
            self.prg_bank_count, self.chr_bank_count
        );

        let mut prg = vec![0; prg_size];
        let copied = self.program.len().min(prg_size);
        prg[..copied].copy_from_slice(&self.program[..copied]);

        let vector_offset = prg_size - RESET_VECTOR_FROM_END;
        prg[vector_offset..vector_offset + 2].copy_from_slice(&self.reset_vector.to_le_bytes());
        debug!(
            "reset vector ${:04X} at PRG offset ${vector_offset:04X}",
            self.reset_vector
        );

        let mut bytes = Vec::with_capacity(header.image_size());
        bytes.extend_from_slice(&header.to_bytes());
        bytes.extend_from_slice(&prg);
        bytes.resize(bytes.len() + chr_size, 0);

        Ok(RomImage { header, bytes })
    }

    /// Build the image and write it to `output_path`.
    pub fn write(&self) -> Result<RomImage> {
        let image = self.build()?;
        image.write_to(&self.output_path)?;
        Ok(image)
    }
}

/// A fully assembled image: header, PRG, CHR back to back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomImage {
    header: InesHeader,
    bytes: Vec<u8>,
}

impl RomImage {
    /// Wrap existing image bytes, e.g. a file read back from disk. A trainer, if flagged, is
    /// skipped when locating PRG and CHR.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let header = InesHeader::parse(&bytes)?;
        let expected = header.image_size();
        if bytes.len() < expected {
            return Err(Error::TooSmall {
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self { header, bytes })
    }

    /// Read and check an image file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
        Self::from_bytes(bytes)
    }

    /// Decoded header.
    pub fn header(&self) -> &InesHeader {
        &self.header
    }

    /// The raw 16 header bytes.
    pub fn header_bytes(&self) -> &[u8] {
        &self.bytes[..HEADER_SIZE]
    }

    /// PRG ROM, all banks.
    pub fn prg(&self) -> &[u8] {
        &self.bytes[self.header.prg_offset()..][..self.header.prg_size()]
    }

    /// CHR ROM, all banks. Empty when the header declares none.
    pub fn chr(&self) -> &[u8] {
        let start = self.header.prg_offset() + self.header.prg_size();
        &self.bytes[start..][..self.header.chr_size()]
    }

    /// Reset vector as the CPU fetches it from $FFFC under NROM.
    pub fn reset_vector(&self) -> u16 {
        Mapper0::new(self.prg()).reset_vector()
    }

    /// The whole image as written to disk.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Image size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Create or truncate `path` and write the whole image. The file is closed on return.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut file = File::create(path).map_err(|e| Error::io(path, e))?;
        file.write_all(&self.bytes)
            .and_then(|()| file.flush())
            .map_err(|e| Error::io(path, e))?;
        info!("wrote {} bytes to {}", self.bytes.len(), path.display());
        Ok(())
    }
}

/// Build a mapper 0, horizontally mirrored image and write it to `output_path`.
pub fn build_rom(
    program: &[u8],
    prg_bank_count: u8,
    chr_bank_count: u8,
    reset_vector: u16,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    RomConfig {
        prg_bank_count,
        chr_bank_count,
        program: program.to_vec(),
        reset_vector,
        output_path: output_path.as_ref().to_path_buf(),
        ..RomConfig::default()
    }
    .write()
    .map(|_| ())
}
