use std::{fs, path::Path};

use tracing::{info, warn};

use crate::{
    cartridge::header::{Header, Mirroring, NES_HEADER_LEN},
    error::{Error, Result},
};

pub const TRAINER_SIZE: usize = 512;

pub mod header;
pub mod mapper;

pub use mapper::Mapper;

/// Raw cartridge contents handed over by a ROM loader.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RomImage {
    pub prg_rom: Vec<u8>,
    /// CHR ROM bytes. Empty when the board carries CHR RAM instead.
    pub chr: Vec<u8>,
    pub mirroring: Mirroring,
    pub mapper: u16,
}

#[derive(Debug)]
pub struct Cartridge {
    header: Header,
    mapper: Box<dyn Mapper>,
}

impl Cartridge {
    /// Parses an iNES image held in memory.
    pub fn from_ines(bytes: &[u8]) -> Result<Self> {
        let header = Header::parse(bytes)?;
        if header.prg_rom_size == 0 {
            return Err(Error::EmptyPrgRom);
        }
        if header.battery_backed_ram {
            warn!("battery-backed save RAM is not persisted");
        }

        let mut cursor = NES_HEADER_LEN;
        if header.trainer_present {
            section(bytes, &mut cursor, TRAINER_SIZE, "trainer")?;
        }
        let prg_rom = section(bytes, &mut cursor, header.prg_rom_size, "PRG ROM")?;
        let chr = section(bytes, &mut cursor, header.chr_rom_size, "CHR ROM")?;

        let image = RomImage {
            prg_rom: prg_rom.to_vec(),
            chr: chr.to_vec(),
            mirroring: header.mirroring,
            mapper: header.mapper,
        };
        Self::with_header(header, image)
    }

    /// Loads an iNES image from disk.
    pub fn from_file<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let bytes = fs::read(path)?;
        Self::from_ines(&bytes)
    }

    /// Builds a cartridge from banks parsed elsewhere.
    pub fn from_parts(image: RomImage) -> Result<Self> {
        if image.prg_rom.is_empty() {
            return Err(Error::EmptyPrgRom);
        }
        let header = Header {
            mapper: image.mapper,
            mirroring: image.mirroring,
            battery_backed_ram: false,
            trainer_present: false,
            prg_rom_size: image.prg_rom.len(),
            chr_rom_size: image.chr.len(),
        };
        Self::with_header(header, image)
    }

    fn with_header(header: Header, image: RomImage) -> Result<Self> {
        let mapper = mapper::mapper_for(image)?;
        info!(
            mapper = header.mapper,
            prg = header.prg_rom_size,
            chr = header.chr_rom_size,
            mirroring = ?header.mirroring,
            "cartridge loaded"
        );
        Ok(Self { header, mapper })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn mirroring(&self) -> Mirroring {
        self.header.mirroring
    }

    pub fn cpu_read(&self, addr: u16) -> u8 {
        self.mapper.cpu_read(addr)
    }

    pub fn cpu_write(&mut self, addr: u16, data: u8) {
        self.mapper.cpu_write(addr, data);
    }

    pub fn ppu_read(&self, addr: u16) -> u8 {
        self.mapper.ppu_read(addr)
    }

    pub fn ppu_write(&mut self, addr: u16, data: u8) {
        self.mapper.ppu_write(addr, data);
    }
}

impl Clone for Cartridge {
    fn clone(&self) -> Self {
        Self {
            header: self.header,
            mapper: dyn_clone::clone_box(&*self.mapper),
        }
    }
}

fn section<'a>(
    bytes: &'a [u8],
    cursor: &mut usize,
    len: usize,
    name: &'static str,
) -> Result<&'a [u8]> {
    let too_short = || Error::SectionTooShort {
        section: name,
        expected: len,
        actual: bytes.len().saturating_sub(*cursor),
    };
    let end = cursor.checked_add(len).ok_or_else(too_short)?;
    let slice = bytes.get(*cursor..end).ok_or_else(too_short)?;
    *cursor = end;
    Ok(slice)
}
