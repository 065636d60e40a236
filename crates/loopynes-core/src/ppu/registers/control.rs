use bitflags::bitflags;

use crate::memory::ppu as ppu_mem;

bitflags! {
    /// `$2000` PPUCTRL.
    ///
    /// ```text
    /// 7 6 5 4 3 2 1 0
    /// V P H B S I N N
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Control: u8 {
        /// Base nametable select, mirrored into bits 10-11 of `t`.
        const NAMETABLE        = 0b0000_0011;
        /// Add 32 (one row) instead of 1 after each `$2007` access.
        const INCREMENT_32     = 0b0000_0100;
        /// 8x8 sprites fetch from `$1000`.
        const SPRITE_TABLE     = 0b0000_1000;
        /// Background tiles fetch from `$1000`.
        const BACKGROUND_TABLE = 0b0001_0000;
        const SPRITE_SIZE_16   = 0b0010_0000;
        /// EXT pin direction. Set means the PPU drives EXT.
        const MASTER           = 0b0100_0000;
        const NMI_ENABLE       = 0b1000_0000;
    }
}

impl Control {
    pub fn nametable_index(self) -> u8 {
        (self & Control::NAMETABLE).bits()
    }

    /// `$2000`, `$2400`, `$2800` or `$2C00`.
    pub fn base_nametable_addr(self) -> u16 {
        ppu_mem::NAMETABLE_BASE + u16::from(self.nametable_index()) * ppu_mem::NAMETABLE_SIZE
    }

    pub fn vram_increment(self) -> u16 {
        if self.contains(Control::INCREMENT_32) { 32 } else { 1 }
    }

    pub fn sprite_pattern_table(self) -> u16 {
        table_base(self.contains(Control::SPRITE_TABLE))
    }

    pub fn background_pattern_table(self) -> u16 {
        table_base(self.contains(Control::BACKGROUND_TABLE))
    }

    /// Sprite height in pixels (8 or 16).
    pub fn sprite_height(self) -> u8 {
        if self.contains(Control::SPRITE_SIZE_16) { 16 } else { 8 }
    }

    pub fn is_master(self) -> bool {
        self.contains(Control::MASTER)
    }

    pub fn nmi_enabled(self) -> bool {
        self.contains(Control::NMI_ENABLE)
    }
}

fn table_base(upper: bool) -> u16 {
    if upper {
        ppu_mem::PATTERN_TABLE_1
    } else {
        ppu_mem::PATTERN_TABLE_0
    }
}
