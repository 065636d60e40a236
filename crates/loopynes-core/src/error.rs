use thiserror::Error;

use crate::cartridge::header::NES_HEADER_LEN;

/// Failures surfaced while building a [`crate::Nes`] session.
#[derive(Debug, Error)]
pub enum Error {
    /// Provided buffer is shorter than the 16-byte header.
    #[error("header expected {NES_HEADER_LEN} bytes, got {actual}")]
    TooShort { actual: usize },
    /// Magic number ("NES<EOF>") is missing.
    #[error("missing NES magic bytes")]
    InvalidMagic,
    /// Header advertises no PRG ROM at all.
    #[error("cartridge declares an empty PRG ROM")]
    EmptyPrgRom,
    /// A ROM section (trainer/PRG/CHR) is shorter than advertised.
    #[error("{section} section expected {expected} bytes, got {actual}")]
    SectionTooShort {
        section: &'static str,
        expected: usize,
        actual: usize,
    },
    /// Only the fixed-bank NROM board is wired up.
    #[error("mapper {0} is not supported")]
    UnsupportedMapper(u16),
    /// Wrapper for I/O errors raised while reading ROMs from disk.
    #[error("i/o error while reading cartridge: {0}")]
    Io(#[from] std::io::Error),
}

/// Defects in a CPU dispatch table, reported by [`crate::cpu::OpcodeTable::build`].
///
/// These are never returned from a [`crate::Nes`] operation: the global table
/// is validated once and a failure there is a programming error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OpcodeTableError {
    #[error("opcode {0:#04X} is described more than once")]
    Duplicate(u8),
    #[error("opcode {0:#04X} has no descriptor")]
    Missing(u8),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
