//! Mapper 0 (NROM).
//!
//! No banking at all: the CPU sees the whole PRG ROM at `$8000-$FFFF` and the
//! PPU sees the whole CHR ROM/RAM at `$0000-$1FFF`.
//!
//! - **NROM-128 (16 KiB)**: mirrored at `$8000-$BFFF` and `$C000-$FFFF`.
//! - **NROM-256 (32 KiB)**: occupies the full window.
//! - **CHR**: 8 KiB of ROM, or 8 KiB of RAM when the image ships none.

use crate::{
    cartridge::{header::CHR_BANK_SIZE, mapper::Mapper},
    memory::cpu as cpu_mem,
};

#[derive(Debug, Clone)]
pub struct Mapper0 {
    prg_rom: Box<[u8]>,
    chr: Box<[u8]>,
    chr_is_ram: bool,
}

impl Mapper0 {
    /// An empty `chr` slice allocates 8 KiB of CHR RAM.
    pub fn new(prg_rom: Vec<u8>, chr: Vec<u8>) -> Self {
        let chr_is_ram = chr.is_empty();
        let chr = if chr_is_ram {
            vec![0; CHR_BANK_SIZE]
        } else {
            chr
        };

        Self {
            prg_rom: prg_rom.into_boxed_slice(),
            chr: chr.into_boxed_slice(),
            chr_is_ram,
        }
    }

    fn chr_index(&self, addr: u16) -> usize {
        addr as usize % self.chr.len()
    }
}

impl Mapper for Mapper0 {
    fn cpu_read(&self, addr: u16) -> u8 {
        if self.prg_rom.is_empty() || addr < cpu_mem::PRG_ROM_START {
            return 0;
        }
        // A 16 KiB image repeats in the upper half of the window.
        let idx = (addr - cpu_mem::PRG_ROM_START) as usize % self.prg_rom.len();
        self.prg_rom[idx]
    }

    fn cpu_write(&mut self, _addr: u16, _data: u8) {}

    fn ppu_read(&self, addr: u16) -> u8 {
        self.chr[self.chr_index(addr)]
    }

    fn ppu_write(&mut self, addr: u16, data: u8) {
        if self.chr_is_ram {
            let idx = self.chr_index(addr);
            self.chr[idx] = data;
        }
    }
}
