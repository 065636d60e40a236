use crate::{
    bus::Bus,
    cartridge::Cartridge,
    memory::cpu as cpu_mem,
    ppu::Ppu,
    ram::cpu::{Ram, SaveRam},
};

/// CPU-visible bus that bridges the core to RAM, the PPU register window and
/// the cartridge. It borrows the hardware from the owning [`crate::Nes`].
///
/// | Range           | Target                                   |
/// | --------------- | ---------------------------------------- |
/// | `$0000-$1FFF`   | 2 KiB internal RAM, mirrored every 2 KiB |
/// | `$2000-$3FFF`   | PPU registers, mirrored every 8 bytes    |
/// | `$4000-$401F`   | APU / I/O, inert                         |
/// | `$4020-$5FFF`   | expansion ROM, inert                     |
/// | `$6000-$7FFF`   | 8 KiB save RAM                           |
/// | `$8000-$FFFF`   | cartridge mapper                         |
#[derive(Debug)]
pub struct CpuBus<'a> {
    ram: &'a mut Ram,
    save_ram: &'a mut SaveRam,
    ppu: &'a mut Ppu,
    cartridge: Option<&'a mut Cartridge>,
}

impl<'a> CpuBus<'a> {
    /// Creates a new bus by borrowing the attached hardware.
    pub fn new(
        ram: &'a mut Ram,
        save_ram: &'a mut SaveRam,
        ppu: &'a mut Ppu,
        cartridge: Option<&'a mut Cartridge>,
    ) -> Self {
        Self {
            ram,
            save_ram,
            ppu,
            cartridge,
        }
    }

    /// Returns `true` when a cartridge is loaded.
    pub fn has_cartridge(&self) -> bool {
        self.cartridge.is_some()
    }

    fn ram_index(addr: u16) -> usize {
        (addr & cpu_mem::INTERNAL_RAM_MASK) as usize
    }

    fn save_ram_index(addr: u16) -> usize {
        (addr - cpu_mem::SAVE_RAM_START) as usize
    }
}

impl Bus for CpuBus<'_> {
    fn read(&mut self, addr: u16) -> u8 {
        match addr {
            0..=cpu_mem::INTERNAL_RAM_MIRROR_END => self.ram.read(Self::ram_index(addr)),
            cpu_mem::PPU_REGISTER_BASE..=cpu_mem::PPU_REGISTER_END => {
                self.ppu.cpu_read(addr, self.cartridge.as_deref_mut())
            }
            cpu_mem::APU_REGISTER_BASE..=cpu_mem::APU_REGISTER_END => 0,
            cpu_mem::EXPANSION_START..=cpu_mem::EXPANSION_END => 0,
            cpu_mem::SAVE_RAM_START..=cpu_mem::SAVE_RAM_END => {
                self.save_ram.read(Self::save_ram_index(addr))
            }
            cpu_mem::PRG_ROM_START..=cpu_mem::CPU_ADDR_END => self
                .cartridge
                .as_deref()
                .map_or(0, |cart| cart.cpu_read(addr)),
        }
    }

    fn write(&mut self, addr: u16, data: u8) {
        match addr {
            0..=cpu_mem::INTERNAL_RAM_MIRROR_END => self.ram.write(Self::ram_index(addr), data),
            cpu_mem::PPU_REGISTER_BASE..=cpu_mem::PPU_REGISTER_END => {
                self.ppu.cpu_write(addr, data, self.cartridge.as_deref_mut())
            }
            cpu_mem::APU_REGISTER_BASE..=cpu_mem::APU_REGISTER_END => {}
            cpu_mem::EXPANSION_START..=cpu_mem::EXPANSION_END => {}
            cpu_mem::SAVE_RAM_START..=cpu_mem::SAVE_RAM_END => {
                self.save_ram.write(Self::save_ram_index(addr), data)
            }
            cpu_mem::PRG_ROM_START..=cpu_mem::CPU_ADDR_END => {
                if let Some(cart) = self.cartridge.as_deref_mut() {
                    cart.cpu_write(addr, data);
                }
            }
        }
    }

    fn peek(&self, addr: u16) -> u8 {
        peek(self.ram, self.save_ram, self.ppu, self.cartridge.as_deref(), addr)
    }
}

/// Side-effect-free view of CPU address space over borrowed hardware. PPU
/// registers report the open-bus byte instead of being read.
pub(crate) fn peek(
    ram: &Ram,
    save_ram: &SaveRam,
    ppu: &Ppu,
    cartridge: Option<&Cartridge>,
    addr: u16,
) -> u8 {
    match addr {
        0..=cpu_mem::INTERNAL_RAM_MIRROR_END => ram.read(CpuBus::ram_index(addr)),
        cpu_mem::PPU_REGISTER_BASE..=cpu_mem::PPU_REGISTER_END => ppu.open_bus(),
        cpu_mem::APU_REGISTER_BASE..=cpu_mem::APU_REGISTER_END => 0,
        cpu_mem::EXPANSION_START..=cpu_mem::EXPANSION_END => 0,
        cpu_mem::SAVE_RAM_START..=cpu_mem::SAVE_RAM_END => {
            save_ram.read(CpuBus::save_ram_index(addr))
        }
        cpu_mem::PRG_ROM_START..=cpu_mem::CPU_ADDR_END => {
            cartridge.map_or(0, |cart| cart.cpu_read(addr))
        }
    }
}

/// Read-only [`Bus`] over shared borrows, for diagnostics such as the
/// disassembler. Reads behave like [`Bus::peek`] and writes are dropped.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PeekBus<'a> {
    pub ram: &'a Ram,
    pub save_ram: &'a SaveRam,
    pub ppu: &'a Ppu,
    pub cartridge: Option<&'a Cartridge>,
}

impl Bus for PeekBus<'_> {
    fn read(&mut self, addr: u16) -> u8 {
        self.peek(addr)
    }

    fn write(&mut self, _addr: u16, _data: u8) {}

    fn peek(&self, addr: u16) -> u8 {
        peek(self.ram, self.save_ram, self.ppu, self.cartridge, addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cartridge::{RomImage, header::Mirroring},
        memory::ppu::Register as PpuRegister,
    };

    fn cartridge() -> Cartridge {
        let mut prg = vec![0u8; 0x4000];
        prg[0x3FFC] = 0x00;
        prg[0x3FFD] = 0xC0;
        Cartridge::from_parts(RomImage {
            prg_rom: prg,
            chr: Vec::new(),
            mirroring: Mirroring::Horizontal,
            mapper: 0,
        })
        .expect("valid image")
    }

    #[test]
    fn ram_is_mirrored_four_times() {
        let (mut ram, mut save_ram, mut ppu) = (Ram::new(), SaveRam::new(), Ppu::new());
        let mut bus = CpuBus::new(&mut ram, &mut save_ram, &mut ppu, None);

        bus.write(0x0002, 0x42);
        for mirror in [0x0002, 0x0802, 0x1002, 0x1802] {
            assert_eq!(bus.read(mirror), 0x42, "mirror {mirror:#06X}");
        }
        bus.write(0x1FFF, 0x99);
        assert_eq!(bus.read(0x07FF), 0x99);
    }

    #[test]
    fn bus_writes_land_in_the_backing_chips() {
        let (mut ram, mut save_ram, mut ppu) = (Ram::new(), SaveRam::new(), Ppu::new());
        let mut bus = CpuBus::new(&mut ram, &mut save_ram, &mut ppu, None);
        bus.write(0x1803, 0x77);
        bus.write(0x6010, 0x88);

        assert_eq!(ram.read(0x0003), 0x77);
        assert_eq!(save_ram.read(0x0010), 0x88);
        save_ram.write(0x1FFF, 0x99);
        assert_eq!(peek(&ram, &save_ram, &ppu, None, 0x7FFF), 0x99);
    }

    #[test]
    fn peek_bus_drops_writes() {
        let (mut ram, save_ram, ppu) = (Ram::new(), SaveRam::new(), Ppu::new());
        ram.write(0x0010, 0x42);
        let mut view = PeekBus {
            ram: &ram,
            save_ram: &save_ram,
            ppu: &ppu,
            cartridge: None,
        };
        view.write(0x0810, 0x00);
        assert_eq!(view.read(0x1810), 0x42);
        assert_eq!(view.peek_word(0x0010), 0x0042);
    }

    #[test]
    fn apu_and_expansion_windows_are_inert() {
        let (mut ram, mut save_ram, mut ppu) = (Ram::new(), SaveRam::new(), Ppu::new());
        let mut bus = CpuBus::new(&mut ram, &mut save_ram, &mut ppu, None);

        for addr in [0x4000, 0x4015, 0x401F, 0x4020, 0x5FFF] {
            bus.write(addr, 0xFF);
            assert_eq!(bus.read(addr), 0, "addr {addr:#06X}");
        }
    }

    #[test]
    fn save_ram_round_trips() {
        let (mut ram, mut save_ram, mut ppu) = (Ram::new(), SaveRam::new(), Ppu::new());
        let mut bus = CpuBus::new(&mut ram, &mut save_ram, &mut ppu, None);

        bus.write(0x6000, 0x12);
        bus.write(0x7FFF, 0x34);
        assert_eq!(bus.read(0x6000), 0x12);
        assert_eq!(bus.read(0x7FFF), 0x34);
    }

    #[test]
    fn reset_vector_comes_from_the_cartridge() {
        let (mut ram, mut save_ram, mut ppu) = (Ram::new(), SaveRam::new(), Ppu::new());
        let mut cart = cartridge();
        let mut bus = CpuBus::new(&mut ram, &mut save_ram, &mut ppu, Some(&mut cart));

        assert!(bus.has_cartridge());
        assert_eq!(bus.read_word(cpu_mem::RESET_VECTOR), 0xC000);
    }

    #[test]
    fn ppu_registers_mirror_every_eight_bytes() {
        let (mut ram, mut save_ram, mut ppu) = (Ram::new(), SaveRam::new(), Ppu::new());
        let mut cart = cartridge();
        let mut bus = CpuBus::new(&mut ram, &mut save_ram, &mut ppu, Some(&mut cart));

        // $3FFB mirrors OAMADDR, $2C04 mirrors OAMDATA.
        bus.write(0x3FFB, 0x10);
        bus.write(0x2C04, 0xAB);
        bus.write(PpuRegister::OamAddr.addr(), 0x10);
        assert_eq!(bus.read(0x200C), 0xAB);
    }

    #[test]
    fn peek_has_no_side_effects() {
        let (mut ram, mut save_ram, mut ppu) = (Ram::new(), SaveRam::new(), Ppu::new());
        ppu.force_vblank();
        let mut bus = CpuBus::new(&mut ram, &mut save_ram, &mut ppu, None);

        let _ = bus.peek(PpuRegister::Status.addr());
        assert_ne!(bus.read(PpuRegister::Status.addr()) & 0x80, 0);
        assert_eq!(bus.read(PpuRegister::Status.addr()) & 0x80, 0);
    }
}
