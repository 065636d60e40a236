//! CPU-visible PPU register file (`$2000-$2007`) and the internal loopy
//! `v`/`t`/`x`/`w` latches.

mod control;
mod mask;
mod status;
mod vram_addr;
mod vram_registers;

pub use control::Control;
pub use mask::Mask;
pub use status::Status;
pub use vram_addr::VramAddr;
pub use vram_registers::VramRegisters;

use crate::ram::ppu::OamRam;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Registers {
    pub control: Control,
    pub mask: Mask,
    pub status: Status,
    pub oam_addr: u8,
    pub oam: OamRam,
    pub vram: VramRegisters,
    /// Delayed `$2007` read value.
    pub read_buffer: u8,
    /// Last byte driven onto the register data bus.
    pub open_bus: u8,
}

impl Registers {
    /// `$2000` write. The nametable bits are mirrored into `t`.
    pub fn write_control(&mut self, value: u8) {
        self.control = Control::from_bits_retain(value);
        self.vram.t.set_nametable(self.control.nametable_index());
    }

    /// `$2002` read. Returns the packed byte, then clears vblank and the toggle.
    pub fn read_status(&mut self) -> u8 {
        let value = self.status.bits() | (self.open_bus & !Status::DRIVEN);
        self.status.remove(Status::VBLANK);
        self.vram.reset_latch();
        value
    }

    pub fn write_oam_data(&mut self, value: u8) {
        self.oam[usize::from(self.oam_addr)] = value;
        self.oam_addr = self.oam_addr.wrapping_add(1);
    }

    pub fn read_oam_data(&self) -> u8 {
        self.oam[usize::from(self.oam_addr)]
    }
}
