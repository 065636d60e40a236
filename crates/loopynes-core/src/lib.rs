use tracing::info;

use crate::{
    bus::cpu::{CpuBus, PeekBus},
    cpu::Interrupt,
    ram::cpu::{Ram, SaveRam},
};

pub mod bus;
pub mod cartridge;
pub mod config;
pub mod cpu;
pub mod error;
pub mod interceptor;
pub mod memory;
pub mod ppu;
pub mod ram;

pub use bus::Bus;
pub use cartridge::{Cartridge, RomImage, header::Mirroring};
pub use config::NesConfig;
pub use cpu::Cpu;
pub use error::{Error, Result};
pub use interceptor::{EmuInterceptor, Interceptor, TraceLine, TraceRecorder};
pub use ppu::{Ppu, buffer::FrameBuffer};

/// PPU dots per CPU cycle on NTSC hardware.
pub const PPU_DOTS_PER_CPU_CYCLE: usize = 3;

/// Outcome of a single [`Nes::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockResult {
    /// The CPU finished an instruction on this cycle.
    pub instruction_completed: bool,
    /// The PPU entered vblank during this cycle's dots.
    pub frame_completed: bool,
}

/// Owning console context. CPU, PPU, RAM and the cartridge live side by side
/// and a [`CpuBus`] is assembled from borrows for every CPU access.
#[derive(Debug)]
pub struct Nes {
    cpu: Cpu,
    ppu: Ppu,
    ram: Ram,
    save_ram: SaveRam,
    cartridge: Option<Cartridge>,
    config: NesConfig,
    interceptor: EmuInterceptor,
}

impl Default for Nes {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Nes {
    /// Clones the emulated state. Interceptor layers are host-side observers
    /// and are not carried over.
    fn clone(&self) -> Self {
        Self {
            cpu: self.cpu,
            ppu: self.ppu.clone(),
            ram: self.ram.clone(),
            save_ram: self.save_ram.clone(),
            cartridge: self.cartridge.clone(),
            config: self.config.clone(),
            interceptor: EmuInterceptor::new(),
        }
    }
}

impl Nes {
    pub fn new() -> Self {
        Self::with_config(NesConfig::default())
    }

    pub fn with_config(config: NesConfig) -> Self {
        Self {
            cpu: Cpu::new(),
            ppu: Ppu::new(),
            ram: Ram::filled(config.ram_fill),
            save_ram: SaveRam::filled(config.ram_fill),
            cartridge: None,
            config,
            interceptor: EmuInterceptor::new(),
        }
    }

    pub fn config(&self) -> &NesConfig {
        &self.config
    }

    /// Powers on with an iNES image, starting at the configured entry point
    /// or the reset vector.
    pub fn power_on(&mut self, rom: &[u8]) -> Result<()> {
        self.power_on_at(rom, self.config.entry_point)
    }

    /// Powers on with an iNES image and an explicit program counter override.
    ///
    /// The image is parsed before anything is replaced, so a failure leaves
    /// the console exactly as it was.
    pub fn power_on_at(&mut self, rom: &[u8], entry_point: Option<u16>) -> Result<()> {
        let cartridge = Cartridge::from_ines(rom)?;
        self.power_on_cartridge(cartridge, entry_point);
        Ok(())
    }

    /// Inserts an already-built cartridge and applies a power-on reset.
    pub fn power_on_cartridge(&mut self, cartridge: Cartridge, entry_point: Option<u16>) {
        self.ram = Ram::filled(self.config.ram_fill);
        self.save_ram = SaveRam::filled(self.config.ram_fill);
        self.ppu = Ppu::new();
        self.cartridge = Some(cartridge);
        self.reset_cpu(entry_point);
        info!(pc = format_args!("{:#06X}", self.cpu.pc()), "power on");
    }

    pub fn is_powered(&self) -> bool {
        self.cartridge.is_some()
    }

    /// Warm reset: RAM survives, CPU and PPU restart.
    pub fn reset(&mut self) {
        if self.cartridge.is_none() {
            return;
        }
        self.ppu.reset();
        self.reset_cpu(self.config.entry_point);
        info!(pc = format_args!("{:#06X}", self.cpu.pc()), "reset");
    }

    fn reset_cpu(&mut self, entry_point: Option<u16>) {
        let mut bus = CpuBus::new(
            &mut self.ram,
            &mut self.save_ram,
            &mut self.ppu,
            self.cartridge.as_mut(),
        );
        self.cpu.reset(&mut bus, entry_point);
    }

    /// Advances one CPU cycle: three PPU dots, NMI delivery, then one CPU tick.
    pub fn tick(&mut self) -> ClockResult {
        let mut result = ClockResult::default();
        let Some(cartridge) = self.cartridge.as_mut() else {
            return result;
        };

        for _ in 0..PPU_DOTS_PER_CPU_CYCLE {
            result.frame_completed |= self.ppu.tick();
        }
        let nmi = self.ppu.take_nmi();

        let mut bus = CpuBus::new(
            &mut self.ram,
            &mut self.save_ram,
            &mut self.ppu,
            Some(cartridge),
        );
        if nmi {
            self.cpu.trigger_interrupt(Interrupt::Nmi, &mut bus);
        }
        let interceptor = (!self.interceptor.is_empty()).then_some(&mut self.interceptor);
        result.instruction_completed = self.cpu.tick(&mut bus, interceptor);
        result
    }

    /// Runs until the PPU enters vblank and returns the CPU cycles spent.
    /// Stops early when the CPU halts or nothing is powered on.
    pub fn run_frame(&mut self) -> u64 {
        let start = self.cpu.total_cycles();
        while self.is_powered() && !self.cpu.halted() {
            if self.tick().frame_completed {
                break;
            }
        }
        self.cpu.total_cycles() - start
    }

    /// Runs until the next instruction boundary.
    pub fn step_instruction(&mut self) {
        while self.is_powered() && !self.cpu.halted() {
            if self.tick().instruction_completed {
                break;
            }
        }
    }

    /// Renders `nametable` (0..=3) into the PPU frame buffer.
    pub fn render_background(&mut self, nametable: u8) -> &FrameBuffer {
        self.ppu
            .render_background(nametable & 0x03, self.cartridge.as_mut())
    }

    /// Decoded 2-bit pixels of pattern table `table`, see [`Ppu::pattern_table`].
    pub fn pattern_table(&mut self, table: u8) -> Vec<u8> {
        self.ppu.pattern_table(table, self.cartridge.as_mut())
    }

    pub fn total_cycles(&self) -> u64 {
        self.cpu.total_cycles()
    }

    pub fn halted(&self) -> bool {
        self.cpu.halted()
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    pub fn cartridge(&self) -> Option<&Cartridge> {
        self.cartridge.as_ref()
    }

    fn peek_bus(&self) -> PeekBus<'_> {
        PeekBus {
            ram: &self.ram,
            save_ram: &self.save_ram,
            ppu: &self.ppu,
            cartridge: self.cartridge.as_ref(),
        }
    }

    /// Reads CPU address space without side effects.
    pub fn peek(&self, addr: u16) -> u8 {
        self.peek_bus().peek(addr)
    }

    /// Disassembles the instruction at `pc`, returning the text and its length.
    pub fn disassemble(&self, pc: u16) -> (String, u8) {
        Cpu::disassemble(&self.peek_bus(), pc)
    }

    pub fn interceptor(&self) -> &EmuInterceptor {
        &self.interceptor
    }

    pub fn interceptor_mut(&mut self) -> &mut EmuInterceptor {
        &mut self.interceptor
    }
}
