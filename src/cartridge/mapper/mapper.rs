//! Mapper trait: how the CPU address space sees PRG ROM.

/// CPU reads of cartridge space ($4020–$FFFF).
pub trait Mapper {
    /// Read the byte a CPU would fetch at `addr`. Unmapped addresses read as 0.
    fn read(&self, addr: u16) -> u8;

    /// Little-endian word at `addr`, `addr + 1`.
    fn read_word(&self, addr: u16) -> u16 {
        u16::from_le_bytes([self.read(addr), self.read(addr.wrapping_add(1))])
    }

    /// The address the CPU loads into PC on reset ($FFFC/$FFFD).
    fn reset_vector(&self) -> u16 {
        self.read_word(0xFFFC)
    }
}
