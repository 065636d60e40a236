use bitflags::bitflags;

bitflags! {
    /// `$2002` PPUSTATUS. Bits 0-4 are not driven and read back as open bus.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Status: u8 {
        const SPRITE_OVERFLOW = 0b0010_0000;
        const SPRITE_ZERO_HIT = 0b0100_0000;
        /// Set at scanline 241 dot 1, cleared by a status read or pre-render.
        const VBLANK          = 0b1000_0000;
    }
}

impl Status {
    /// Bits the status register actually drives onto the data bus.
    pub const DRIVEN: u8 = 0b1110_0000;
}
