//! Errors raised while building, writing or inspecting iNES images.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
#[must_use]
pub enum Error {
    #[error("failed to access {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Program would run into the reset vector slot at the end of PRG.
    #[error("program is {len} bytes but only {capacity} fit before the reset vector")]
    OversizedProgram { len: usize, capacity: usize },
    #[error("PRG ROM needs at least one 16 KiB bank")]
    InvalidBankCount,
    #[error("invalid program byte: {token:?}")]
    InvalidHexByte { token: String },
    #[error("image too small (expected at least {expected} bytes, found {actual})")]
    TooSmall { expected: usize, actual: usize },
    #[error("missing iNES signature \"NES\\x1A\"")]
    InvalidMagic,
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
