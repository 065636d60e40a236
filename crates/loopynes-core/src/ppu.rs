//! Picture Processing Unit (2C02) timing and register engine.
//!
//! The PPU runs 341 dots per scanline and 262 scanlines per frame. This core
//! tracks that timing exactly for the events the CPU can observe (vblank, NMI
//! and the loopy scroll copies) while background pixels are produced by a
//! whole-frame generator on demand, see [`Ppu::render_background`].

pub mod buffer;
pub mod palette;
pub mod pattern;
pub mod registers;

mod background;

use core::fmt;

use tracing::debug;

use crate::{
    bus::PpuBus,
    cartridge::Cartridge,
    memory::ppu::{self as ppu_mem, Register as PpuRegister},
    ram::ppu::{PaletteRam, Vram},
};
use buffer::FrameBuffer;
use registers::{Control, Mask, Registers, Status, VramRegisters};

pub const SCREEN_WIDTH: usize = 256;
pub const SCREEN_HEIGHT: usize = 240;

pub const DOTS_PER_SCANLINE: u16 = 341;
pub const SCANLINES_PER_FRAME: u16 = 262;

const VBLANK_SCANLINE: u16 = 241;
const PRE_RENDER_SCANLINE: u16 = 261;
const HORIZONTAL_COPY_DOT: u16 = 257;
const VERTICAL_COPY_DOTS: core::ops::RangeInclusive<u16> = 280..=304;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Ppu {
    registers: Registers,
    /// Nametable storage indexed through the cartridge mirroring table.
    vram: Vram,
    palette_ram: PaletteRam,
    /// Current dot (0..=340) within the scanline.
    dot: u16,
    /// Current scanline (0..=261). 261 is the pre-render line.
    scanline: u16,
    /// Frames that reached vblank since power-on.
    frame: u64,
    nmi_pending: bool,
    frame_buffer: FrameBuffer,
}

impl fmt::Debug for Ppu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ppu")
            .field("registers", &self.registers.vram)
            .field("control", &self.registers.control)
            .field("status", &self.registers.status)
            .field("dot", &self.dot)
            .field("scanline", &self.scanline)
            .field("frame", &self.frame)
            .field("nmi_pending", &self.nmi_pending)
            .finish_non_exhaustive()
    }
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

impl Ppu {
    pub fn new() -> Self {
        Self {
            registers: Registers::default(),
            vram: Vram::new(),
            palette_ram: PaletteRam::new(),
            dot: 0,
            scanline: 0,
            frame: 0,
            nmi_pending: false,
            frame_buffer: FrameBuffer::new(),
        }
    }

    /// Clears registers, latches and timing. VRAM and palette contents survive,
    /// as they do on the console's reset line.
    pub fn reset(&mut self) {
        self.registers = Registers {
            oam: core::mem::take(&mut self.registers.oam),
            ..Registers::default()
        };
        self.dot = 0;
        self.scanline = 0;
        self.nmi_pending = false;
    }

    /// Advances one dot. Returns `true` when this dot starts vertical blank.
    pub fn tick(&mut self) -> bool {
        let mut frame_done = false;
        match (self.scanline, self.dot) {
            (VBLANK_SCANLINE, 1) => {
                self.registers.status.insert(Status::VBLANK);
                self.frame += 1;
                if self.registers.control.nmi_enabled() {
                    self.nmi_pending = true;
                }
                debug!(frame = self.frame, nmi = self.nmi_pending, "vblank");
                frame_done = true;
            }
            (PRE_RENDER_SCANLINE, 0) => {
                self.registers
                    .status
                    .remove(Status::VBLANK | Status::SPRITE_ZERO_HIT);
            }
            (PRE_RENDER_SCANLINE, HORIZONTAL_COPY_DOT) => {
                let t = self.registers.vram.t;
                self.registers.vram.v.copy_horizontal(t);
            }
            (PRE_RENDER_SCANLINE, dot) if VERTICAL_COPY_DOTS.contains(&dot) => {
                let t = self.registers.vram.t;
                self.registers.vram.v.copy_vertical(t);
            }
            _ => {}
        }

        self.dot += 1;
        if self.dot == DOTS_PER_SCANLINE {
            self.dot = 0;
            self.scanline += 1;
            if self.scanline == SCANLINES_PER_FRAME {
                self.scanline = 0;
            }
        }
        frame_done
    }

    /// Consumes a pending NMI request raised at vblank entry.
    pub fn take_nmi(&mut self) -> bool {
        core::mem::take(&mut self.nmi_pending)
    }

    /// CPU read from the `$2000-$3FFF` register mirror.
    pub fn cpu_read(&mut self, addr: u16, cartridge: Option<&mut Cartridge>) -> u8 {
        match PpuRegister::from_cpu_addr(addr) {
            PpuRegister::Status => self.registers.read_status(),
            PpuRegister::OamData => self.registers.read_oam_data(),
            PpuRegister::Data => self.read_data(cartridge),
            _ => self.registers.open_bus,
        }
    }

    /// CPU write to the `$2000-$3FFF` register mirror.
    pub fn cpu_write(&mut self, addr: u16, value: u8, cartridge: Option<&mut Cartridge>) {
        self.registers.open_bus = value;
        match PpuRegister::from_cpu_addr(addr) {
            PpuRegister::Control => self.registers.write_control(value),
            PpuRegister::Mask => self.registers.mask = Mask::from_bits_retain(value),
            PpuRegister::Status => {}
            PpuRegister::OamAddr => self.registers.oam_addr = value,
            PpuRegister::OamData => self.registers.write_oam_data(value),
            PpuRegister::Scroll => self.registers.vram.write_scroll(value),
            PpuRegister::Addr => self.registers.vram.write_addr(value),
            PpuRegister::Data => {
                let addr = self.registers.vram.v.raw();
                self.bus(cartridge).write(addr, value);
                self.increment_vram_addr();
            }
        }
    }

    /// Last byte written to any PPU register.
    pub fn open_bus(&self) -> u8 {
        self.registers.open_bus
    }

    fn read_data(&mut self, cartridge: Option<&mut Cartridge>) -> u8 {
        let addr = self.registers.vram.v.raw() & ppu_mem::VRAM_MIRROR_MASK;
        let bus = PpuBus::new(&mut self.vram, &mut self.palette_ram, cartridge);
        let value = if addr >= ppu_mem::PALETTE_BASE {
            // Palette reads bypass the buffer, which picks up the nametable
            // byte hidden underneath instead.
            let value = bus.read(addr);
            self.registers.read_buffer = bus.read(addr - 0x1000);
            value
        } else {
            let fresh = bus.read(addr);
            core::mem::replace(&mut self.registers.read_buffer, fresh)
        };
        self.increment_vram_addr();
        value
    }

    fn increment_vram_addr(&mut self) {
        let step = self.registers.control.vram_increment();
        self.registers.vram.v.increment(step);
    }

    fn bus<'a>(&'a mut self, cartridge: Option<&'a mut Cartridge>) -> PpuBus<'a> {
        PpuBus::new(&mut self.vram, &mut self.palette_ram, cartridge)
    }

    /// Generates a full background frame for `nametable` (0..=3) with the
    /// pattern table selected in PPUCTRL.
    pub fn render_background(
        &mut self,
        nametable: u8,
        cartridge: Option<&mut Cartridge>,
    ) -> &FrameBuffer {
        let pattern_base = self.registers.control.background_pattern_table();
        let bus = PpuBus::new(&mut self.vram, &mut self.palette_ram, cartridge);
        background::render(&bus, nametable, pattern_base, &mut self.frame_buffer);
        &self.frame_buffer
    }

    /// Frame produced by the last [`Ppu::render_background`] call.
    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    /// Decodes every tile of pattern table `table` (0 or 1). The result holds
    /// 256 consecutive 64-pixel tiles as produced by [`pattern::decode_tile`].
    pub fn pattern_table(&mut self, table: u8, cartridge: Option<&mut Cartridge>) -> Vec<u8> {
        let base = if table & 1 == 0 {
            ppu_mem::PATTERN_TABLE_0
        } else {
            ppu_mem::PATTERN_TABLE_1
        };
        let bus = self.bus(cartridge);
        let mut pixels = Vec::with_capacity(pattern::TILES_PER_TABLE * 64);
        for tile in 0..pattern::TILES_PER_TABLE as u16 {
            let start = base + tile * pattern::TILE_BYTES as u16;
            let bytes: [u8; pattern::TILE_BYTES] =
                core::array::from_fn(|i| bus.read(start + i as u16));
            pixels.extend_from_slice(&pattern::decode_tile(&bytes));
        }
        pixels
    }

    pub fn control(&self) -> Control {
        self.registers.control
    }

    pub fn mask(&self) -> Mask {
        self.registers.mask
    }

    pub fn status(&self) -> Status {
        self.registers.status
    }

    pub fn vram_registers(&self) -> &VramRegisters {
        &self.registers.vram
    }

    pub fn oam_addr(&self) -> u8 {
        self.registers.oam_addr
    }

    pub fn oam(&self) -> &[u8] {
        &self.registers.oam
    }

    pub fn dot(&self) -> u16 {
        self.dot
    }

    pub fn scanline(&self) -> u16 {
        self.scanline
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[cfg(test)]
    pub(crate) fn force_vblank(&mut self) {
        self.registers.status.insert(Status::VBLANK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::{RomImage, header::Mirroring};

    fn write(ppu: &mut Ppu, reg: PpuRegister, value: u8) {
        ppu.cpu_write(reg.addr(), value, None);
    }

    fn read(ppu: &mut Ppu, reg: PpuRegister) -> u8 {
        ppu.cpu_read(reg.addr(), None)
    }

    fn run_to(ppu: &mut Ppu, scanline: u16, dot: u16) {
        while ppu.scanline != scanline || ppu.dot != dot {
            ppu.tick();
        }
    }

    #[test]
    fn control_write_sets_fields_and_nametable_bits() {
        let mut ppu = Ppu::new();
        write(&mut ppu, PpuRegister::Control, 0b1001_0111);
        let ctrl = ppu.control();
        assert!(!ctrl.is_master());
        assert!(ctrl.nmi_enabled());
        assert_eq!(ctrl.sprite_height(), 8);
        assert_eq!(ctrl.background_pattern_table(), 0x1000);
        assert_eq!(ctrl.sprite_pattern_table(), 0x0000);
        assert_eq!(ctrl.vram_increment(), 32);
        assert_eq!(ppu.vram_registers().t.raw(), 0b000_1100_0000_0000);
    }

    #[test]
    fn mask_write_is_stored() {
        let mut ppu = Ppu::new();
        write(&mut ppu, PpuRegister::Mask, 0b1001_0111);
        let mask = ppu.mask();
        assert!(mask.contains(Mask::GREYSCALE));
        assert!(mask.contains(Mask::BACKGROUND_LEFT));
        assert!(mask.contains(Mask::SPRITES_LEFT));
        assert!(!mask.contains(Mask::SHOW_BACKGROUND));
        assert!(mask.contains(Mask::SHOW_SPRITES));
        assert!(mask.rendering_enabled());
    }

    #[test]
    fn scroll_and_address_writes_walk_t() {
        let mut ppu = Ppu::new();
        let t = |ppu: &Ppu| ppu.vram_registers().t.raw();

        write(&mut ppu, PpuRegister::Control, 0b10);
        assert_eq!(t(&ppu), 0b000_1000_0000_0000);
        write(&mut ppu, PpuRegister::Scroll, 0b1011_0110);
        assert_eq!(t(&ppu), 0b000_1000_0001_0110);
        assert_eq!(ppu.vram_registers().x, 0b110);
        write(&mut ppu, PpuRegister::Scroll, 0b0110_0010);
        assert_eq!(t(&ppu), 0b010_1001_1001_0110);

        let _ = read(&mut ppu, PpuRegister::Status);
        assert!(!ppu.vram_registers().w);

        write(&mut ppu, PpuRegister::Addr, 0b0111_1011);
        assert_eq!(t(&ppu), 0b011_1011_1001_0110);
        write(&mut ppu, PpuRegister::Addr, 0b1110_0001);
        assert_eq!(t(&ppu), 0b011_1011_1110_0001);
        assert_eq!(ppu.vram_registers().v.raw(), t(&ppu));
    }

    #[test]
    fn oam_data_auto_increments() {
        let mut ppu = Ppu::new();
        write(&mut ppu, PpuRegister::OamAddr, 12);
        for value in [31, 32, 44] {
            write(&mut ppu, PpuRegister::OamData, value);
        }
        assert_eq!(ppu.oam_addr(), 15);

        for (offset, expected) in [(12, 31), (13, 32), (14, 44)] {
            write(&mut ppu, PpuRegister::OamAddr, offset);
            assert_eq!(read(&mut ppu, PpuRegister::OamData), expected);
            assert_eq!(ppu.oam_addr(), offset, "OAMDATA reads never increment");
        }
    }

    #[test]
    fn oam_address_wraps() {
        let mut ppu = Ppu::new();
        write(&mut ppu, PpuRegister::OamAddr, 0xFF);
        write(&mut ppu, PpuRegister::OamData, 0x5A);
        assert_eq!(ppu.oam_addr(), 0x00);
        assert_eq!(ppu.oam()[0xFF], 0x5A);
    }

    #[test]
    fn buffered_data_read() {
        let mut ppu = Ppu::new();
        write(&mut ppu, PpuRegister::Addr, 0x20);
        write(&mut ppu, PpuRegister::Addr, 0x00);
        write(&mut ppu, PpuRegister::Data, 0x12);
        write(&mut ppu, PpuRegister::Data, 0x34);

        write(&mut ppu, PpuRegister::Addr, 0x20);
        write(&mut ppu, PpuRegister::Addr, 0x00);
        assert_eq!(read(&mut ppu, PpuRegister::Data), 0x00, "stale buffer first");
        assert_eq!(read(&mut ppu, PpuRegister::Data), 0x12);
        assert_eq!(read(&mut ppu, PpuRegister::Data), 0x34);
    }

    #[test]
    fn palette_reads_bypass_buffer() {
        let mut ppu = Ppu::new();
        // Nametable byte hidden below $3F00.
        write(&mut ppu, PpuRegister::Addr, 0x2F);
        write(&mut ppu, PpuRegister::Addr, 0x00);
        write(&mut ppu, PpuRegister::Data, 0x77);
        write(&mut ppu, PpuRegister::Addr, 0x3F);
        write(&mut ppu, PpuRegister::Addr, 0x00);
        write(&mut ppu, PpuRegister::Data, 0x29);

        write(&mut ppu, PpuRegister::Addr, 0x3F);
        write(&mut ppu, PpuRegister::Addr, 0x00);
        assert_eq!(read(&mut ppu, PpuRegister::Data), 0x29);

        write(&mut ppu, PpuRegister::Addr, 0x20);
        write(&mut ppu, PpuRegister::Addr, 0x00);
        assert_eq!(read(&mut ppu, PpuRegister::Data), 0x77, "buffer refreshed from $2F00");
    }

    #[test]
    fn data_access_increments_by_control_step() {
        let mut ppu = Ppu::new();
        write(&mut ppu, PpuRegister::Addr, 0x20);
        write(&mut ppu, PpuRegister::Addr, 0x00);
        write(&mut ppu, PpuRegister::Data, 0);
        assert_eq!(ppu.vram_registers().v.raw(), 0x2001);

        write(&mut ppu, PpuRegister::Control, 0b100);
        let _ = read(&mut ppu, PpuRegister::Data);
        assert_eq!(ppu.vram_registers().v.raw(), 0x2021);

        write(&mut ppu, PpuRegister::Addr, 0x3F);
        write(&mut ppu, PpuRegister::Addr, 0xF0);
        write(&mut ppu, PpuRegister::Data, 0);
        assert_eq!(ppu.vram_registers().v.raw(), 0x0010, "wraps inside 14 bits");
    }

    #[test]
    fn status_read_packs_open_bus_and_clears_vblank() {
        let mut ppu = Ppu::new();
        ppu.force_vblank();
        write(&mut ppu, PpuRegister::Mask, 0b0001_1111);
        write(&mut ppu, PpuRegister::Scroll, 0xFF);
        assert!(ppu.vram_registers().w);

        assert_eq!(read(&mut ppu, PpuRegister::Status), 0b1001_1111);
        assert!(!ppu.vram_registers().w);
        assert_eq!(read(&mut ppu, PpuRegister::Status), 0b0001_1111);
    }

    #[test]
    fn write_only_registers_read_open_bus() {
        let mut ppu = Ppu::new();
        write(&mut ppu, PpuRegister::Mask, 0xC3);
        for reg in [
            PpuRegister::Control,
            PpuRegister::Mask,
            PpuRegister::OamAddr,
            PpuRegister::Scroll,
            PpuRegister::Addr,
        ] {
            assert_eq!(read(&mut ppu, reg), 0xC3, "{reg:?}");
        }
    }

    #[test]
    fn vblank_nmi_and_pre_render_timing() {
        let mut ppu = Ppu::new();
        write(&mut ppu, PpuRegister::Control, 0x80);

        run_to(&mut ppu, 241, 1);
        assert!(!ppu.status().contains(Status::VBLANK));
        assert!(ppu.tick(), "dot (241, 1) reports the frame");
        assert!(ppu.status().contains(Status::VBLANK));
        assert!(ppu.take_nmi());
        assert!(!ppu.take_nmi(), "NMI is delivered once");
        assert_eq!(ppu.frame(), 1);

        run_to(&mut ppu, 261, 1);
        assert!(!ppu.status().contains(Status::VBLANK));
        run_to(&mut ppu, 0, 0);
        assert_eq!(ppu.frame(), 1);
    }

    #[test]
    fn no_nmi_when_disabled() {
        let mut ppu = Ppu::new();
        run_to(&mut ppu, 241, 2);
        assert!(ppu.status().contains(Status::VBLANK));
        assert!(!ppu.take_nmi());
    }

    #[test]
    fn frame_is_341_by_262_dots() {
        let mut ppu = Ppu::new();
        let frames = (0..usize::from(DOTS_PER_SCANLINE) * usize::from(SCANLINES_PER_FRAME) * 2)
            .filter(|_| ppu.tick())
            .count();
        assert_eq!(frames, 2);
        assert_eq!((ppu.scanline(), ppu.dot()), (0, 0));
    }

    #[test]
    fn pre_render_copies_scroll_bits_into_v() {
        let mut ppu = Ppu::new();
        write(&mut ppu, PpuRegister::Addr, 0x00);
        write(&mut ppu, PpuRegister::Addr, 0x00);
        write(&mut ppu, PpuRegister::Control, 0b11);
        write(&mut ppu, PpuRegister::Scroll, 0xFF);
        write(&mut ppu, PpuRegister::Scroll, 0xFF);
        let t = ppu.vram_registers().t.raw();
        assert_eq!(t, 0x7FFF);

        run_to(&mut ppu, 0, 258);
        assert_eq!(ppu.vram_registers().v.raw(), 0, "copies only run on the pre-render line");
        run_to(&mut ppu, 261, 258);
        assert_eq!(ppu.vram_registers().v.raw(), 0x041F, "horizontal bits at dot 257");
        run_to(&mut ppu, 261, 305);
        assert_eq!(ppu.vram_registers().v.raw(), 0x7FFF);
    }

    #[test]
    fn background_frame_uses_tiles_attributes_and_palette() {
        let mut chr = vec![0u8; 0x2000];
        // Tile 1 at $1000: row 0 is colour 1 on the left half, colour 3 on the right.
        chr[0x1010] = 0xFF;
        chr[0x1018] = 0x0F;
        let mut cart = Cartridge::from_parts(RomImage {
            prg_rom: vec![0; 0x4000],
            chr,
            mirroring: Mirroring::Vertical,
            mapper: 0,
        })
        .expect("valid image");

        let mut ppu = Ppu::new();
        let mut poke = |ppu: &mut Ppu, addr: u16, value: u8| {
            ppu.cpu_write(PpuRegister::Addr.addr(), (addr >> 8) as u8, Some(&mut cart));
            ppu.cpu_write(PpuRegister::Addr.addr(), addr as u8, Some(&mut cart));
            ppu.cpu_write(PpuRegister::Data.addr(), value, Some(&mut cart));
        };
        poke(&mut ppu, 0x2400 + 2, 1); // tile (2, 0) of nametable 1
        poke(&mut ppu, 0x2400 + 0x3C0, 0b0000_1000); // top-right quadrant -> palette 2
        poke(&mut ppu, 0x3F00, 0x0F);
        poke(&mut ppu, 0x3F09, 0x16);
        poke(&mut ppu, 0x3F0B, 0x2A);
        ppu.cpu_write(PpuRegister::Control.addr(), 0x10, Some(&mut cart));

        let frame = ppu.render_background(1, Some(&mut cart)).clone();
        assert_eq!(frame.pixel(16, 0), 0x16, "plane bits 0b01");
        assert_eq!(frame.pixel(20, 0), 0x2A, "plane bits 0b11");
        assert_eq!(frame.pixel(16, 1), 0x0F, "colour 0 shows the backdrop");
        assert_eq!(frame.pixel(0, 0), 0x0F);

        let again = ppu.render_background(1, Some(&mut cart));
        assert_eq!(&frame, again, "unchanged state renders identically");
    }

    #[test]
    fn pattern_table_decodes_every_tile() {
        let mut chr = vec![0u8; 0x2000];
        chr[0x0010] = 0x80;
        let mut cart = Cartridge::from_parts(RomImage {
            prg_rom: vec![0; 0x4000],
            chr,
            mirroring: Mirroring::Horizontal,
            mapper: 0,
        })
        .expect("valid image");

        let mut ppu = Ppu::new();
        let pixels = ppu.pattern_table(0, Some(&mut cart));
        assert_eq!(pixels.len(), 256 * 64);
        assert_eq!(pixels[64], 1, "tile 1, top-left pixel");
        assert_eq!(pixels.iter().filter(|&&p| p != 0).count(), 1);
    }
}
