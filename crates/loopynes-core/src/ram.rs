use core::ops::{Deref, DerefMut};

/// Fixed-size byte store backing one of the console's RAM chips.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ram<const N: usize>(Box<[u8; N]>);

pub mod cpu {
    use crate::memory::cpu as cpu_mem;

    pub type Ram = super::Ram<{ cpu_mem::INTERNAL_RAM_SIZE }>;
    pub type SaveRam = super::Ram<{ cpu_mem::SAVE_RAM_SIZE }>;
}

pub mod ppu {
    use crate::memory::ppu as ppu_mem;

    pub type Vram = super::Ram<{ ppu_mem::VRAM_SIZE }>;
    pub type PaletteRam = super::Ram<{ ppu_mem::PALETTE_RAM_SIZE }>;
    pub type OamRam = super::Ram<{ ppu_mem::OAM_RAM_SIZE }>;
}

impl<const N: usize> Ram<N> {
    pub fn new() -> Self {
        Self::filled(0)
    }

    /// Power-on contents with every byte set to `value`.
    pub fn filled(value: u8) -> Self {
        Self(Box::new([value; N]))
    }

    pub fn read(&self, addr: usize) -> u8 {
        self.0[addr % N]
    }

    pub fn write(&mut self, addr: usize, value: u8) {
        self.0[addr % N] = value;
    }
}

impl<const N: usize> Default for Ram<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Deref for Ram<N> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.0.as_slice()
    }
}

impl<const N: usize> DerefMut for Ram<N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut_slice()
    }
}
