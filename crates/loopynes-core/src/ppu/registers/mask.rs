use bitflags::bitflags;

bitflags! {
    /// `$2001` PPUMASK. Only stored; the background generator ignores it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Mask: u8 {
        const GREYSCALE        = 0b0000_0001;
        const BACKGROUND_LEFT  = 0b0000_0010;
        const SPRITES_LEFT     = 0b0000_0100;
        const SHOW_BACKGROUND  = 0b0000_1000;
        const SHOW_SPRITES     = 0b0001_0000;
        const EMPHASIZE_RED    = 0b0010_0000;
        const EMPHASIZE_GREEN  = 0b0100_0000;
        const EMPHASIZE_BLUE   = 0b1000_0000;
    }
}

impl Mask {
    pub fn rendering_enabled(self) -> bool {
        self.intersects(Mask::SHOW_BACKGROUND | Mask::SHOW_SPRITES)
    }
}
