use crate::{
    cartridge::{Cartridge, header::Mirroring},
    memory::ppu as ppu_mem,
    ram::ppu::{PaletteRam, Vram},
};

/// PPU-visible 14-bit address space.
///
/// Pattern tables go to the cartridge, nametables to the internal VRAM through
/// the board's mirroring layout, and `$3F00-$3FFF` to palette RAM.
#[derive(Debug)]
pub struct PpuBus<'a> {
    vram: &'a mut Vram,
    palette_ram: &'a mut PaletteRam,
    cartridge: Option<&'a mut Cartridge>,
    nametable_banks: [u8; 4],
}

impl<'a> PpuBus<'a> {
    pub fn new(
        vram: &'a mut Vram,
        palette_ram: &'a mut PaletteRam,
        cartridge: Option<&'a mut Cartridge>,
    ) -> Self {
        let mirroring = cartridge
            .as_deref()
            .map_or(Mirroring::default(), Cartridge::mirroring);
        Self {
            vram,
            palette_ram,
            cartridge,
            nametable_banks: mirroring.nametable_banks(),
        }
    }

    pub fn read(&self, addr: u16) -> u8 {
        let addr = addr & ppu_mem::VRAM_MIRROR_MASK;
        match addr {
            0..=ppu_mem::PATTERN_TABLE_END => self
                .cartridge
                .as_deref()
                .map_or(0, |cart| cart.ppu_read(addr)),
            ppu_mem::NAMETABLE_BASE..=ppu_mem::NAMETABLE_END => {
                self.vram.read(self.nametable_index(addr))
            }
            _ => self.palette_ram.read(palette_index(addr)),
        }
    }

    pub fn write(&mut self, addr: u16, data: u8) {
        let addr = addr & ppu_mem::VRAM_MIRROR_MASK;
        match addr {
            0..=ppu_mem::PATTERN_TABLE_END => {
                if let Some(cart) = self.cartridge.as_deref_mut() {
                    cart.ppu_write(addr, data);
                }
            }
            ppu_mem::NAMETABLE_BASE..=ppu_mem::NAMETABLE_END => {
                let idx = self.nametable_index(addr);
                self.vram.write(idx, data);
            }
            _ => self.palette_ram.write(palette_index(addr), data),
        }
    }

    /// Physical VRAM offset for a nametable address (`$2000-$3EFF`).
    fn nametable_index(&self, addr: u16) -> usize {
        let offset = (addr - ppu_mem::NAMETABLE_BASE) & 0x0FFF;
        let bank = self.nametable_banks[(offset / ppu_mem::NAMETABLE_SIZE) as usize];
        (usize::from(bank) << 10) | (offset & (ppu_mem::NAMETABLE_SIZE - 1)) as usize
    }
}

/// Palette RAM slot for `$3F00-$3FFF`. The sprite palettes' first entries
/// (`$3F10/$14/$18/$1C`) alias their background counterparts.
pub(crate) fn palette_index(addr: u16) -> usize {
    let index = (addr & 0x1F) as usize;
    if index & 0x13 == 0x10 {
        index - 0x10
    } else {
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::RomImage;

    fn cartridge(mirroring: Mirroring) -> Cartridge {
        Cartridge::from_parts(RomImage {
            prg_rom: vec![0; 0x4000],
            chr: Vec::new(),
            mirroring,
            mapper: 0,
        })
        .expect("valid image")
    }

    /// Writes a marker into each logical nametable and reports which physical
    /// bank every logical table ended up sharing with.
    fn observed_banks(mirroring: Mirroring) -> [u8; 4] {
        let (mut vram, mut palette) = (Vram::new(), PaletteRam::new());
        let mut cart = cartridge(mirroring);
        let mut bus = PpuBus::new(&mut vram, &mut palette, Some(&mut cart));
        for table in 0..4u16 {
            bus.write(0x2000 + table * 0x400 + 5, table as u8 + 1);
        }
        let mut banks = [0; 4];
        for (table, bank) in banks.iter_mut().enumerate() {
            let marker = bus.read(0x2000 + table as u16 * 0x400 + 5);
            *bank = marker;
        }
        banks
    }

    #[test]
    fn horizontal_mirroring_pairs_top_and_bottom() {
        // Later writes win inside a shared bank.
        assert_eq!(observed_banks(Mirroring::Horizontal), [2, 2, 4, 4]);
    }

    #[test]
    fn vertical_mirroring_pairs_left_and_right() {
        assert_eq!(observed_banks(Mirroring::Vertical), [3, 4, 3, 4]);
    }

    #[test]
    fn four_screen_keeps_tables_apart() {
        assert_eq!(observed_banks(Mirroring::FourScreen), [1, 2, 3, 4]);
    }

    #[test]
    fn single_screen_collapses_everything() {
        assert_eq!(observed_banks(Mirroring::SingleScreenUpper), [4, 4, 4, 4]);
        assert_eq!(observed_banks(Mirroring::SingleScreenLower), [4, 4, 4, 4]);
    }

    #[test]
    fn single_screen_variants_use_different_physical_banks() {
        let (mut vram, mut palette) = (Vram::new(), PaletteRam::new());
        let mut cart = cartridge(Mirroring::SingleScreenLower);
        let mut bus = PpuBus::new(&mut vram, &mut palette, Some(&mut cart));
        bus.write(0x2000, 0xAA);
        assert_eq!(vram[0x400], 0xAA);

        let (mut vram, mut palette) = (Vram::new(), PaletteRam::new());
        let mut cart = cartridge(Mirroring::SingleScreenUpper);
        let mut bus = PpuBus::new(&mut vram, &mut palette, Some(&mut cart));
        bus.write(0x2C00, 0xBB);
        assert_eq!(vram[0x000], 0xBB);
    }

    #[test]
    fn nametable_mirror_above_3000() {
        let (mut vram, mut palette) = (Vram::new(), PaletteRam::new());
        let mut cart = cartridge(Mirroring::Vertical);
        let mut bus = PpuBus::new(&mut vram, &mut palette, Some(&mut cart));
        bus.write(0x2123, 0x5C);
        assert_eq!(bus.read(0x3123), 0x5C);
    }

    #[test]
    fn palette_background_slots_alias() {
        let (mut vram, mut palette) = (Vram::new(), PaletteRam::new());
        let mut bus = PpuBus::new(&mut vram, &mut palette, None);
        bus.write(0x3F10, 0x21);
        bus.write(0x3F04, 0x0F);
        bus.write(0x3F15, 0x30);
        assert_eq!(bus.read(0x3F00), 0x21);
        assert_eq!(bus.read(0x3F14), 0x0F);
        assert_eq!(bus.read(0x3F05), 0x00, "non-zero slots stay distinct");
        assert_eq!(bus.read(0x3F35), 0x30, "palette mirrors every 32 bytes");
    }

    #[test]
    fn addresses_wrap_to_14_bits() {
        let (mut vram, mut palette) = (Vram::new(), PaletteRam::new());
        let mut cart = cartridge(Mirroring::Horizontal);
        let mut bus = PpuBus::new(&mut vram, &mut palette, Some(&mut cart));
        bus.write(0x4010, 0x66);
        assert_eq!(bus.read(0x0010), 0x66, "CHR RAM reached through the mirror");
    }
}
