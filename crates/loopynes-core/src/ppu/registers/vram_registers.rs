use super::VramAddr;

/// The `v`/`t`/`x`/`w` scroll state shared by `$2005` and `$2006`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VramRegisters {
    /// Current VRAM address.
    pub v: VramAddr,
    /// Temporary address, staged by scroll/address writes.
    pub t: VramAddr,
    /// Fine X scroll (0..7).
    pub x: u8,
    /// Write toggle. `false` means the next write is the first of a pair.
    pub w: bool,
}

impl VramRegisters {
    pub fn write_scroll(&mut self, value: u8) {
        if self.w {
            self.t.set_fine_y(value & 0b111);
            self.t.set_coarse_y(value >> 3);
        } else {
            self.t.set_coarse_x(value >> 3);
            self.x = value & 0b111;
        }
        self.w = !self.w;
    }

    /// Second write also commits `t` into `v`.
    pub fn write_addr(&mut self, value: u8) {
        if self.w {
            self.t.set_low_byte(value);
            self.v = self.t;
        } else {
            self.t.set_high_byte(value);
        }
        self.w = !self.w;
    }

    pub fn reset_latch(&mut self) {
        self.w = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_pair_fills_coarse_and_fine_fields() {
        let mut regs = VramRegisters::default();
        regs.write_scroll(0b0111_1101);
        assert!(regs.w);
        assert_eq!(regs.t.coarse_x(), 0b01111);
        assert_eq!(regs.x, 0b101);

        regs.write_scroll(0b0101_1110);
        assert!(!regs.w);
        assert_eq!(regs.t.coarse_y(), 0b01011);
        assert_eq!(regs.t.fine_y(), 0b110);
        assert_eq!(regs.v.raw(), 0, "scroll writes never touch v");
    }

    #[test]
    fn address_pair_commits_to_v() {
        let mut regs = VramRegisters::default();
        regs.t = VramAddr::new(0x4000);
        regs.write_addr(0xFF);
        assert_eq!(regs.t.raw(), 0x3F00, "bit 14 is cleared");
        assert_eq!(regs.v.raw(), 0);
        regs.write_addr(0x12);
        assert_eq!(regs.t.raw(), 0x3F12);
        assert_eq!(regs.v, regs.t);
    }
}
