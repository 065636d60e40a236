use std::fmt::Debug;

use dyn_clone::DynClone;

use crate::{
    cartridge::RomImage,
    error::{Error, Result},
};

mod mapper0;

pub use mapper0::Mapper0;

/// Cartridge-side address translation.
///
/// CPU accesses cover `$8000-$FFFF`, PPU accesses cover the pattern tables at
/// `$0000-$1FFF`. Addresses arrive already masked to their bus width.
pub trait Mapper: DynClone + Debug {
    fn cpu_read(&self, addr: u16) -> u8;

    fn cpu_write(&mut self, addr: u16, data: u8);

    fn ppu_read(&self, addr: u16) -> u8;

    fn ppu_write(&mut self, addr: u16, data: u8);
}

dyn_clone::clone_trait_object!(Mapper);

/// Builds the mapper selected by `image.mapper`, taking ownership of its banks.
pub(crate) fn mapper_for(image: RomImage) -> Result<Box<dyn Mapper>> {
    match image.mapper {
        0 => Ok(Box::new(Mapper0::new(image.prg_rom, image.chr))),
        other => Err(Error::UnsupportedMapper(other)),
    }
}
