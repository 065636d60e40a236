#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use loopynes_core::{Nes, TraceLine, TraceRecorder};

pub const ROM_ROOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/vendor/nes-test-roms");

/// `KIL`: halts the CPU. Fills unused PRG so runaway code stops quickly.
pub const HALT: u8 = 0x02;

const PRG_BANK: usize = 0x4000;
const CHR_BANK: usize = 0x2000;

/// Assembles an NROM iNES image in memory.
///
/// PRG is a single 16 KiB bank mirrored at `$8000` and `$C000`, so code placed
/// at `$C000` and `$8000` lands on the same bytes. The reset vector defaults
/// to `$C000`.
#[derive(Debug, Clone)]
pub struct RomBuilder {
    prg: Vec<u8>,
    chr: Option<Vec<u8>>,
    flags6: u8,
    mapper: u8,
}

impl Default for RomBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RomBuilder {
    pub fn new() -> Self {
        let mut builder = Self {
            prg: vec![HALT; PRG_BANK],
            chr: None,
            flags6: 0,
            mapper: 0,
        };
        builder.set_word(0xFFFC, 0xC000);
        builder
    }

    /// Copies `bytes` into PRG starting at CPU address `addr`.
    pub fn code(mut self, addr: u16, bytes: &[u8]) -> Self {
        for (i, &byte) in bytes.iter().enumerate() {
            let offset = self.offset(addr.wrapping_add(i as u16));
            self.prg[offset] = byte;
        }
        self
    }

    pub fn reset_vector(mut self, addr: u16) -> Self {
        self.set_word(0xFFFC, addr);
        self
    }

    pub fn nmi_vector(mut self, addr: u16) -> Self {
        self.set_word(0xFFFA, addr);
        self
    }

    pub fn irq_vector(mut self, addr: u16) -> Self {
        self.set_word(0xFFFE, addr);
        self
    }

    /// Adds one 8 KiB CHR ROM bank with `bytes` at pattern address `addr`.
    pub fn chr(mut self, addr: u16, bytes: &[u8]) -> Self {
        let chr = self.chr.get_or_insert_with(|| vec![0; CHR_BANK]);
        let start = usize::from(addr);
        chr[start..start + bytes.len()].copy_from_slice(bytes);
        self
    }

    pub fn vertical_mirroring(mut self) -> Self {
        self.flags6 |= 0b0000_0001;
        self
    }

    pub fn mapper(mut self, mapper: u8) -> Self {
        self.mapper = mapper;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let chr_banks = u8::from(self.chr.is_some());
        let flags6 = self.flags6 | (self.mapper << 4);
        let flags7 = self.mapper & 0xF0;
        let mut rom = vec![
            b'N', b'E', b'S', 0x1A, 1, chr_banks, flags6, flags7, 0, 0, 0, 0, 0, 0, 0, 0,
        ];
        rom.extend_from_slice(&self.prg);
        if let Some(chr) = &self.chr {
            rom.extend_from_slice(chr);
        }
        rom
    }

    fn offset(&self, addr: u16) -> usize {
        usize::from(addr.wrapping_sub(0x8000)) % self.prg.len()
    }

    fn set_word(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        let offset = self.offset(addr);
        self.prg[offset] = lo;
        self.prg[offset + 1] = hi;
    }
}

/// Powers on a console with `program` at `$C000`.
pub fn boot(program: &[u8]) -> Result<Nes> {
    boot_rom(&RomBuilder::new().code(0xC000, program))
}

pub fn boot_rom(rom: &RomBuilder) -> Result<Nes> {
    let mut nes = Nes::new();
    nes.power_on(&rom.build()).context("powering on test ROM")?;
    Ok(nes)
}

/// Steps until the CPU halts, failing after `max_instructions`.
pub fn run_until_halt(nes: &mut Nes, max_instructions: usize) -> Result<()> {
    for _ in 0..max_instructions {
        if nes.halted() {
            return Ok(());
        }
        nes.step_instruction();
    }
    if nes.halted() {
        return Ok(());
    }
    bail!(
        "CPU still running at {:04X} after {max_instructions} instructions",
        nes.cpu().pc()
    )
}

/// Runs to the halt while recording the state before every instruction.
pub fn trace_until_halt(nes: &mut Nes, max_instructions: usize) -> Result<Vec<TraceLine>> {
    nes.interceptor_mut().add(TraceRecorder::new());
    run_until_halt(nes, max_instructions)?;
    let lines = nes
        .interceptor_mut()
        .layer_mut::<TraceRecorder>()
        .map(TraceRecorder::take)
        .context("trace recorder layer missing")?;
    nes.interceptor_mut().remove::<TraceRecorder>();
    Ok(lines)
}
