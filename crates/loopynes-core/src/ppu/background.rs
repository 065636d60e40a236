//! Whole-frame background generator.
//!
//! Renders one nametable in a single pass instead of emulating the per-dot
//! fetch pipeline. Scroll and sprites are not applied.

use crate::{
    bus::PpuBus,
    memory::ppu as ppu_mem,
    ppu::{SCREEN_HEIGHT, buffer::FrameBuffer, pattern::interleave},
};

const TILES_PER_ROW: u16 = 32;

/// Fills `frame` with nametable `nametable` (0..=3) using the pattern table at
/// `pattern_base`.
pub(crate) fn render(bus: &PpuBus<'_>, nametable: u8, pattern_base: u16, frame: &mut FrameBuffer) {
    let base = ppu_mem::NAMETABLE_BASE + u16::from(nametable & 3) * ppu_mem::NAMETABLE_SIZE;
    let universal = bus.read(ppu_mem::PALETTE_BASE) & 0x3F;

    for y in 0..SCREEN_HEIGHT {
        let coarse_y = (y >> 3) as u16;
        let fine_y = (y & 7) as u16;
        let row = frame.row_mut(y);

        for coarse_x in 0..TILES_PER_ROW {
            let tile = bus.read(base + coarse_y * TILES_PER_ROW + coarse_x);
            let tile_addr = pattern_base + u16::from(tile) * 16 + fine_y;
            let lo = bus.read(tile_addr);
            let hi = bus.read(tile_addr + 8);
            let planes = interleave(lo) | (interleave(hi) << 1);

            let attr = bus.read(
                base + ppu_mem::ATTRIBUTE_OFFSET + (coarse_y / 4) * 8 + coarse_x / 4,
            );
            let shift = ((coarse_y & 2) << 1) | (coarse_x & 2);
            let select = ((attr >> shift) & 3) << 2;

            let pixels = &mut row[coarse_x as usize * 8..][..8];
            for (col, pixel) in pixels.iter_mut().enumerate() {
                let chr = ((planes >> (14 - 2 * col)) & 3) as u8;
                *pixel = if chr == 0 {
                    universal
                } else {
                    bus.read(ppu_mem::PALETTE_BASE + u16::from(select | chr)) & 0x3F
                };
            }
        }
    }
}
