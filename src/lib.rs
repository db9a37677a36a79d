//! Nesforge: builds minimal NES test ROMs in the
//! [iNES](https://www.nesdev.org/wiki/INES) format.
//!
//! A ROM is a 16-byte header, PRG ROM in 16 KiB banks and CHR ROM in 8 KiB banks. The caller
//! supplies raw 6502 machine code; it is placed at the start of PRG (CPU $8000 under
//! [NROM](https://www.nesdev.org/wiki/NROM)) and the reset vector is written at $FFFC.
//!
//! ## Modules
//!
//! - **cartridge** – header encoding, image layout and writing, NROM address decoding
//! - **program** – built-in fixture programs, hex and binary program input
//! - **error** – error type shared by the above

pub mod cartridge;
pub mod error;
pub mod program;

pub use cartridge::builder::{RomConfig, RomImage, build_rom};
pub use error::{Error, Result};
