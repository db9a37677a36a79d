//! Program bytes: the built-in test fixtures and caller-supplied machine code.

use std::path::Path;

use crate::error::{Error, Result};

/// Hand-assembled test programs. Both start at $8000 and loop forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fixture {
    /// Load a value into A and spin.
    #[default]
    Basic,
    /// A handful of loads, a store, arithmetic and a NOP, for exercising CPU trace logging.
    Log,
}

const BASIC: &[u8] = &[
    0xA9, 0x42, // LDA #$42
    0x4C, 0x00, 0x80, // JMP $8000
];

const LOG: &[u8] = &[
    0xA9, 0x42, // LDA #$42
    0x8D, 0x00, 0x30, // STA $3000
    0xA2, 0x10, // LDX #$10
    0xA0, 0x20, // LDY #$20
    0x18, // CLC
    0x69, 0x01, // ADC #$01
    0xEA, // NOP
    0x4C, 0x00, 0x80, // JMP $8000
];

impl Fixture {
    pub fn program(self) -> &'static [u8] {
        match self {
            Fixture::Basic => BASIC,
            Fixture::Log => LOG,
        }
    }

    pub fn default_output(self) -> &'static str {
        match self {
            Fixture::Basic => "test.nes",
            Fixture::Log => "test_log.nes",
        }
    }
}

/// Parse a list of hex bytes such as `A9 42 4C 00 80`, `0xA9,0x42` or `$A9 $42`.
pub fn parse_hex(input: &str) -> Result<Vec<u8>> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(parse_hex_byte)
        .collect()
}

fn parse_hex_byte(token: &str) -> Result<u8> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .or_else(|| token.strip_prefix('$'))
        .unwrap_or(token);
    let invalid = || Error::InvalidHexByte {
        token: token.to_string(),
    };

    if digits.is_empty() || digits.len() > 2 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    u8::from_str_radix(digits, 16).map_err(|_| invalid())
}

/// Read a pre-assembled program verbatim.
pub fn read_binary(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    std::fs::read(path).map_err(|e| Error::io(path, e))
}
