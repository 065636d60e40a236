//! CHR tile decoding.
//!
//! A tile is 16 bytes: eight rows of the low bit plane followed by eight rows
//! of the high plane. Bit 7 of each row byte is the leftmost pixel.

use crate::memory::ppu as ppu_mem;

/// Bytes per 8x8 tile.
pub const TILE_BYTES: usize = 16;
/// Tiles in one 4 KiB pattern table.
pub const TILES_PER_TABLE: usize = ppu_mem::PATTERN_TABLE_SIZE / TILE_BYTES;

/// Expands one tile into 64 colour indices (0..=3), row-major, top row first.
pub fn decode_tile(tile: &[u8; TILE_BYTES]) -> [u8; 64] {
    let mut out = [0; 64];
    for (row, pixels) in out.chunks_exact_mut(8).enumerate() {
        let (lo, hi) = (tile[row], tile[row + 8]);
        for (col, pixel) in pixels.iter_mut().enumerate() {
            let bit = 7 - col;
            *pixel = ((lo >> bit) & 1) | (((hi >> bit) & 1) << 1);
        }
    }
    out
}

/// Spreads the 8 bits of `byte` over the even bit positions of a `u16`.
///
/// Interleaving the low plane with `interleave(hi) << 1` yields eight 2-bit
/// pixel values, leftmost pixel in the top two bits.
pub(crate) fn interleave(byte: u8) -> u16 {
    let mut x = u16::from(byte);
    x = (x | (x << 4)) & 0x0F0F;
    x = (x | (x << 2)) & 0x3333;
    (x | (x << 1)) & 0x5555
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_planes_into_two_bit_pixels() {
        let mut tile = [0u8; TILE_BYTES];
        tile[0] = 0b1000_0001;
        tile[8] = 0b1100_0000;
        tile[15] = 0b0000_0001;
        let pixels = decode_tile(&tile);
        assert_eq!(&pixels[..8], &[3, 2, 0, 0, 0, 0, 0, 1]);
        assert_eq!(pixels[63], 2);
        assert!(pixels[8..56].iter().all(|&p| p == 0));
    }

    #[test]
    fn one_table_holds_256_tiles() {
        assert_eq!(TILES_PER_TABLE, 256);
        assert_eq!(TILES_PER_TABLE * TILE_BYTES, ppu_mem::PATTERN_TABLE_SIZE);
    }

    #[test]
    fn interleave_agrees_with_decode() {
        let (lo, hi) = (0b1010_0110u8, 0b0110_0011u8);
        let row = interleave(lo) | (interleave(hi) << 1);
        let mut tile = [0u8; TILE_BYTES];
        tile[0] = lo;
        tile[8] = hi;
        let decoded = decode_tile(&tile);
        for (col, expected) in decoded[..8].iter().enumerate() {
            let shift = 14 - 2 * col;
            assert_eq!(((row >> shift) & 3) as u8, *expected, "column {col}");
        }
    }
}
