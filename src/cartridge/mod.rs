//! iNES cartridge images.
//!
//! - **header**: the 16-byte iNES header, encode and decode.
//! - **builder**: lays out PRG/CHR banks, places the reset vector, writes the file.
//! - **mapper**: NROM (0) CPU address decoding and nametable mirroring.

pub mod builder;
pub mod header;
pub mod mapper;
