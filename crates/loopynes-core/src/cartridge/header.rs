//! iNES header decoding.
//!
//! The first 16 bytes of every `.nes` image describe how much PRG/CHR data
//! follows, which mapper board the game expects and how the nametables are
//! wired. Only the fields this core consumes are decoded; NES 2.0 extensions
//! are read through their iNES-compatible subset.

use bitflags::bitflags;

use crate::error::{Error, Result};

mod mirroring;

pub use mirroring::Mirroring;

const NES_MAGIC: &[u8; 4] = b"NES\x1A";

/// Size of the fixed iNES header in bytes.
pub const NES_HEADER_LEN: usize = 16;
/// One PRG ROM bank as counted by header byte 4.
pub const PRG_BANK_SIZE: usize = 16 * 1024;
/// One CHR ROM bank as counted by header byte 5.
pub const CHR_BANK_SIZE: usize = 8 * 1024;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    struct Flags6: u8 {
        const VERTICAL         = 0b0000_0001;
        const BATTERY          = 0b0000_0010;
        const TRAINER          = 0b0000_0100;
        const FOUR_SCREEN      = 0b0000_1000;
        const MAPPER_LOW_MASK  = 0b1111_0000;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    struct Flags7: u8 {
        const MAPPER_HIGH_MASK = 0b1111_0000;
    }
}

/// Decoded cartridge header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
    /// Mapper ID (0 == NROM, 1 == MMC1, ...).
    pub mapper: u16,
    /// How the PPU nametables are mirrored.
    pub mirroring: Mirroring,
    /// Battery bit: the board keeps save RAM contents while powered off.
    pub battery_backed_ram: bool,
    /// Whether the optional 512 byte trainer block sits between header and PRG data.
    pub trainer_present: bool,
    /// Amount of PRG ROM in bytes.
    pub prg_rom_size: usize,
    /// Amount of CHR ROM in bytes. Zero means the board carries CHR RAM.
    pub chr_rom_size: usize,
}

impl Header {
    /// Parse an iNES header from the given byte slice.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let Some(bytes) = bytes.get(..NES_HEADER_LEN) else {
            return Err(Error::TooShort {
                actual: bytes.len(),
            });
        };

        if &bytes[0..4] != NES_MAGIC {
            return Err(Error::InvalidMagic);
        }

        let flags6 = Flags6::from_bits_retain(bytes[6]);
        let flags7 = Flags7::from_bits_retain(bytes[7]);
        let mapper = u16::from((flags6 & Flags6::MAPPER_LOW_MASK).bits() >> 4)
            | u16::from((flags7 & Flags7::MAPPER_HIGH_MASK).bits());

        Ok(Self {
            mapper,
            mirroring: resolve_mirroring(flags6),
            battery_backed_ram: flags6.contains(Flags6::BATTERY),
            trainer_present: flags6.contains(Flags6::TRAINER),
            prg_rom_size: bytes[4] as usize * PRG_BANK_SIZE,
            chr_rom_size: bytes[5] as usize * CHR_BANK_SIZE,
        })
    }

    /// Whether the board exposes writable CHR RAM instead of CHR ROM.
    pub fn uses_chr_ram(&self) -> bool {
        self.chr_rom_size == 0
    }
}

fn resolve_mirroring(flags6: Flags6) -> Mirroring {
    if flags6.contains(Flags6::FOUR_SCREEN) {
        Mirroring::FourScreen
    } else if flags6.contains(Flags6::VERTICAL) {
        Mirroring::Vertical
    } else {
        Mirroring::Horizontal
    }
}
