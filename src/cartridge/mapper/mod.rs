//! CPU-side view of a built image.
//!
//! Mapper0 (NROM) and the nametable mirroring flag stored in the header.

/// Nametable mirroring, iNES flags 6 bit 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mirroring {
    #[default]
    Horizontal,
    Vertical,
}

impl Mirroring {
    pub(crate) fn flag_bit(self) -> u8 {
        match self {
            Mirroring::Horizontal => 0,
            Mirroring::Vertical => 1,
        }
    }
}

pub mod mapper;

pub mod mapper0;
