use core::fmt;

use crate::ppu::{SCREEN_HEIGHT, SCREEN_WIDTH, palette};

/// Indexed-colour frame: one 6-bit hardware colour per pixel, rows top-down.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FrameBuffer {
    pixels: Box<[u8]>,
}

impl FrameBuffer {
    pub const LEN: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

    pub fn new() -> Self {
        Self {
            pixels: vec![0; Self::LEN].into_boxed_slice(),
        }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * SCREEN_WIDTH + x]
    }

    pub(crate) fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * SCREEN_WIDTH;
        &mut self.pixels[start..start + SCREEN_WIDTH]
    }

    /// Expands the frame to packed RGB24 through [`palette::SYSTEM_PALETTE`].
    pub fn to_rgb(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&index| {
                let c = palette::color(index);
                [c.r, c.g, c.b]
            })
            .collect()
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("width", &SCREEN_WIDTH)
            .field("height", &SCREEN_HEIGHT)
            .finish_non_exhaustive()
    }
}
