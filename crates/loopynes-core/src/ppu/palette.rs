//! Hardware colour lookup for the 6-bit indices the PPU produces.

/// 24-bit colour triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn from_rgb24(rgb: u32) -> Self {
        Self {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
        }
    }
}

macro_rules! palette {
    ($($rgb:literal),* $(,)?) => {
        [$(Color::from_rgb24($rgb)),*]
    };
}

/// The 2C02 master palette as commonly captured from NTSC hardware.
#[rustfmt::skip]
pub const SYSTEM_PALETTE: [Color; 64] = palette![
    0x7C7C7C, 0x0000FC, 0x0000BC, 0x4428BC, 0x940084, 0xA80020, 0xA81000, 0x881400,
    0x503000, 0x007800, 0x006800, 0x005800, 0x004058, 0x000000, 0x000000, 0x000000,
    0xBCBCBC, 0x0078F8, 0x0058F8, 0x6844FC, 0xD800CC, 0xE40058, 0xF83800, 0xE45C10,
    0xAC7C00, 0x00B800, 0x00A800, 0x00A844, 0x008888, 0x000000, 0x000000, 0x000000,
    0xF8F8F8, 0x3CBCFC, 0x6888FC, 0x9878F8, 0xF878F8, 0xF85898, 0xF87858, 0xFCA044,
    0xF8B800, 0xB8F818, 0x58D854, 0x58F898, 0x00E8D8, 0x787878, 0x000000, 0x000000,
    0xFCFCFC, 0xA4E4FC, 0xB8B8F8, 0xD8B8F8, 0xF8B8F8, 0xF8A4C0, 0xF0D0B0, 0xFCE0A8,
    0xF8D878, 0xD8F878, 0xB8F8B8, 0xB8F8D8, 0x00FCFC, 0xF8D8F8, 0x000000, 0x000000,
];

/// Colour for a 6-bit hardware index. Upper bits are ignored.
pub fn color(index: u8) -> Color {
    SYSTEM_PALETTE[usize::from(index & 0x3F)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpacks_channels() {
        assert_eq!(SYSTEM_PALETTE[0x01], Color { r: 0x00, g: 0x00, b: 0xFC });
        assert_eq!(SYSTEM_PALETTE[0x16], Color { r: 0xF8, g: 0x38, b: 0x00 });
        assert_eq!(color(0x40 | 0x30), SYSTEM_PALETTE[0x30]);
    }

    #[test]
    fn row_anchors_match_the_capture() {
        let anchors = [
            (0x00, 0x7C7C7C),
            (0x10, 0xBCBCBC),
            (0x20, 0xF8F8F8),
            (0x2D, 0x787878),
            (0x30, 0xFCFCFC),
            (0x3F, 0x000000),
        ];
        for (index, rgb) in anchors {
            assert_eq!(color(index), Color::from_rgb24(rgb), "index {index:#04X}");
        }
    }
}
