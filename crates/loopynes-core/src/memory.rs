//! Shared definitions for the console memory map.
//!
//! Every address constant used by the buses, the CPU and the PPU lives here so
//! the decoders read like the hardware documentation.

/// CPU memory map details.
pub mod cpu {
    /// First address of the hardware stack page.
    pub const STACK_PAGE_START: u16 = 0x0100;

    /// NMI vector low byte address (`$FFFA`).
    pub const NMI_VECTOR: u16 = 0xFFFA;
    /// Reset vector low byte address (`$FFFC`).
    pub const RESET_VECTOR: u16 = 0xFFFC;
    /// IRQ/BRK vector low byte address (`$FFFE`).
    pub const IRQ_VECTOR: u16 = 0xFFFE;

    /// Last mirrored internal RAM address visible to the CPU (`$1FFF`).
    pub const INTERNAL_RAM_MIRROR_END: u16 = 0x1FFF;
    /// Size of the CPU internal RAM block (2 KiB mirrored through `$1FFF`).
    pub const INTERNAL_RAM_SIZE: usize = 0x0800;
    /// Mask applied to mirror CPU RAM accesses within `$0000-$1FFF`.
    pub const INTERNAL_RAM_MASK: u16 = (INTERNAL_RAM_SIZE as u16) - 1;

    /// First CPU address mapped to the PPU register mirror.
    pub const PPU_REGISTER_BASE: u16 = 0x2000;
    /// Last CPU address mirrored to the PPU register set.
    pub const PPU_REGISTER_END: u16 = 0x3FFF;

    /// First CPU-visible APU / I/O register.
    pub const APU_REGISTER_BASE: u16 = 0x4000;
    /// End of the APU and test-mode I/O window.
    pub const APU_REGISTER_END: u16 = 0x401F;

    /// Expansion ROM window, unmapped on the boards this core supports.
    pub const EXPANSION_START: u16 = 0x4020;
    pub const EXPANSION_END: u16 = 0x5FFF;

    /// Save RAM window start address (`$6000`).
    pub const SAVE_RAM_START: u16 = 0x6000;
    /// Save RAM window end address (inclusive).
    pub const SAVE_RAM_END: u16 = 0x7FFF;
    pub const SAVE_RAM_SIZE: usize = (SAVE_RAM_END - SAVE_RAM_START + 1) as usize;

    /// PRG ROM window start address (`$8000`).
    pub const PRG_ROM_START: u16 = 0x8000;
    /// Final CPU-visible address (`$FFFF`).
    pub const CPU_ADDR_END: u16 = 0xFFFF;
}

/// PPU register layout and VRAM mirror rules.
pub mod ppu {
    /// Mask for decoding register mirrors (`addr & 0x0007`).
    pub const REGISTER_SELECT_MASK: u16 = 0x0007;

    /// Address mask applied to every PPU bus access (14-bit space).
    pub const VRAM_MIRROR_MASK: u16 = 0x3FFF;

    /// End of the two pattern tables (`$0000-$1FFF`).
    pub const PATTERN_TABLE_END: u16 = 0x1FFF;
    /// Pattern table base address for table 0.
    pub const PATTERN_TABLE_0: u16 = 0x0000;
    /// Pattern table base address for table 1.
    pub const PATTERN_TABLE_1: u16 = 0x1000;
    /// Size of a single pattern table (4 KiB).
    pub const PATTERN_TABLE_SIZE: usize = 0x1000;

    /// Base address of nametable 0.
    pub const NAMETABLE_BASE: u16 = 0x2000;
    /// Last address of the nametable mirror (`$3EFF`).
    pub const NAMETABLE_END: u16 = 0x3EFF;
    /// Size of a single nametable in bytes.
    pub const NAMETABLE_SIZE: u16 = 0x0400;
    /// Offset of the attribute table inside a nametable.
    pub const ATTRIBUTE_OFFSET: u16 = 0x03C0;
    /// Backing store for nametables. The console carries 2 KiB; the second
    /// half only becomes visible with four-screen boards.
    pub const VRAM_SIZE: usize = 0x1000;

    /// Palette RAM base address (`$3F00`).
    pub const PALETTE_BASE: u16 = 0x3F00;
    /// Palette RAM byte count (32 bytes mirrored through `$3FFF`).
    pub const PALETTE_RAM_SIZE: usize = 0x20;

    /// Primary Object Attribute Memory (OAM) byte count.
    pub const OAM_RAM_SIZE: usize = 0x100;

    /// CPU-visible PPU register identifiers.
    #[repr(u16)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Register {
        /// `$2000` - PPUCTRL
        Control = 0x2000,
        /// `$2001` - PPUMASK
        Mask = 0x2001,
        /// `$2002` - PPUSTATUS
        Status = 0x2002,
        /// `$2003` - OAMADDR
        OamAddr = 0x2003,
        /// `$2004` - OAMDATA
        OamData = 0x2004,
        /// `$2005` - PPUSCROLL
        Scroll = 0x2005,
        /// `$2006` - PPUADDR
        Addr = 0x2006,
        /// `$2007` - PPUDATA
        Data = 0x2007,
    }

    impl Register {
        /// Raw address backing the register.
        pub const fn addr(self) -> u16 {
            self as u16
        }

        /// Resolves the canonical register for a CPU address in `$2000-$3FFF`.
        pub const fn from_cpu_addr(addr: u16) -> Self {
            match addr & REGISTER_SELECT_MASK {
                0 => Self::Control,
                1 => Self::Mask,
                2 => Self::Status,
                3 => Self::OamAddr,
                4 => Self::OamData,
                5 => Self::Scroll,
                6 => Self::Addr,
                _ => Self::Data,
            }
        }
    }
}
