use core::fmt;

// yyy NN YYYYY XXXXX
// |   |  |     +------ coarse X (bits 0-4)
// |   |  +------------ coarse Y (bits 5-9)
// |   +--------------- nametable select (bits 10-11)
// +------------------- fine Y (bits 12-14)
const COARSE_X: u16 = 0b000_00_00000_11111;
const COARSE_Y: u16 = 0b000_00_11111_00000;
const NAMETABLE: u16 = 0b000_11_00000_00000;
const FINE_Y: u16 = 0b111_00_00000_00000;
const ALL: u16 = COARSE_X | COARSE_Y | NAMETABLE | FINE_Y;

/// Bits moved from `t` to `v` at dot 257 of rendering lines.
const HORIZONTAL: u16 = COARSE_X | 0b000_01_00000_00000;
/// Bits moved from `t` to `v` during dots 280-304 of the pre-render line.
const VERTICAL: u16 = COARSE_Y | FINE_Y | 0b000_10_00000_00000;

/// One of the 15-bit "loopy" registers (`v` or `t`).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct VramAddr(u16);

impl VramAddr {
    pub const fn new(raw: u16) -> Self {
        Self(raw & ALL)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    pub fn coarse_x(self) -> u8 {
        (self.0 & COARSE_X) as u8
    }

    pub fn coarse_y(self) -> u8 {
        ((self.0 & COARSE_Y) >> 5) as u8
    }

    pub fn nametable(self) -> u8 {
        ((self.0 & NAMETABLE) >> 10) as u8
    }

    pub fn fine_y(self) -> u8 {
        ((self.0 & FINE_Y) >> 12) as u8
    }

    pub fn set_coarse_x(&mut self, value: u8) {
        self.replace(COARSE_X, u16::from(value));
    }

    pub fn set_coarse_y(&mut self, value: u8) {
        self.replace(COARSE_Y, u16::from(value) << 5);
    }

    pub fn set_nametable(&mut self, value: u8) {
        self.replace(NAMETABLE, u16::from(value) << 10);
    }

    pub fn set_fine_y(&mut self, value: u8) {
        self.replace(FINE_Y, u16::from(value) << 12);
    }

    /// High address byte written by the first `$2006` write. Only six bits
    /// land; bit 14 is cleared.
    pub fn set_high_byte(&mut self, value: u8) {
        self.0 = (self.0 & 0x00FF) | (u16::from(value & 0x3F) << 8);
    }

    pub fn set_low_byte(&mut self, value: u8) {
        self.0 = (self.0 & 0xFF00) | u16::from(value);
    }

    /// Post-`$2007` increment. The result is kept inside the 14-bit PPU bus.
    pub fn increment(&mut self, step: u16) {
        self.0 = self.0.wrapping_add(step) & 0x3FFF;
    }

    pub fn copy_horizontal(&mut self, from: VramAddr) {
        self.replace(HORIZONTAL, from.0);
    }

    pub fn copy_vertical(&mut self, from: VramAddr) {
        self.replace(VERTICAL, from.0);
    }

    fn replace(&mut self, mask: u16, bits: u16) {
        self.0 = (self.0 & !mask) | (bits & mask);
    }
}

impl fmt::Debug for VramAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VramAddr({:#06X})", self.0)
    }
}

impl fmt::Display for VramAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:#06X} (fy={} nt={} cy={} cx={})",
            self.0,
            self.fine_y(),
            self.nametable(),
            self.coarse_y(),
            self.coarse_x(),
        )
    }
}

impl From<VramAddr> for u16 {
    fn from(addr: VramAddr) -> Self {
        addr.raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_setters_stay_in_their_lanes() {
        let mut addr = VramAddr::default();
        addr.set_coarse_x(0xFF);
        addr.set_coarse_y(0b10101);
        addr.set_nametable(0b10);
        addr.set_fine_y(0b101);
        assert_eq!(addr.raw(), 0b101_10_10101_11111);
        assert_eq!(addr.coarse_x(), 0x1F);
        assert_eq!(addr.coarse_y(), 0b10101);
        assert_eq!(addr.nametable(), 0b10);
        assert_eq!(addr.fine_y(), 0b101);
    }

    #[test]
    fn scroll_copies_move_only_their_bits() {
        let t = VramAddr::new(0x7FFF);
        let mut v = VramAddr::default();
        v.copy_horizontal(t);
        assert_eq!(v.raw(), 0b000_01_00000_11111);
        v.copy_vertical(t);
        assert_eq!(v.raw(), 0x7FFF);
    }

    #[test]
    fn increment_wraps_inside_14_bits() {
        let mut addr = VramAddr::new(0x3FFF);
        addr.increment(1);
        assert_eq!(addr.raw(), 0x0000);
        let mut addr = VramAddr::new(0x3FF0);
        addr.increment(32);
        assert_eq!(addr.raw(), 0x0010);
    }
}
