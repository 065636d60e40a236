//! Cycle-counted 6502 core as found in the 2A03 (no decimal mode).
//!
//! Instructions execute atomically: [`Cpu::tick`] burns the cycles owed by the
//! previous instruction and only then fetches, decodes and runs the next one
//! through the global [`OpcodeTable`].

mod addressing;
mod disasm;
mod lookup;
mod mnemonic;
mod status;

use tracing::{debug, info, trace};

pub use addressing::Addressing;
pub use lookup::{INSTRUCTIONS, Instruction, OpcodeTable, opcode_table};
pub use mnemonic::Mnemonic;
pub use status::Status;

use crate::{
    bus::{Bus, STACK_ADDR},
    interceptor::{EmuInterceptor, Interceptor},
    memory::cpu as cpu_mem,
};
use lookup::OPCODES;

/// Cycles the reset sequence takes before the first opcode fetch.
pub const RESET_CYCLES: u32 = 7;
/// Cycles charged for hardware interrupt entry.
pub const INTERRUPT_CYCLES: u32 = 7;

const RESET_SP: u8 = 0xFD;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interrupt {
    Nmi,
    Reset,
    Irq,
}

impl Interrupt {
    pub const fn vector(self) -> u16 {
        match self {
            Interrupt::Nmi => cpu_mem::NMI_VECTOR,
            Interrupt::Reset => cpu_mem::RESET_VECTOR,
            Interrupt::Irq => cpu_mem::IRQ_VECTOR,
        }
    }
}

/// Operand of the instruction currently executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
struct Operand {
    addr: u16,
    /// Last value read through [`Cpu::read_operand`].
    value: u8,
    accumulator: bool,
    rmw: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cpu {
    // Registers
    a: u8,     //Accumulator
    x: u8,     //X Index Register
    y: u8,     //Y Index Register
    s: u8,     //Stack Pointer
    p: Status, //Processor Status
    pc: u16,   //Program Counter

    /// Cycles still owed by the instruction in flight.
    cycles: u32,
    total_cycles: u64,
    halted: bool,
    operand: Operand,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Creates a CPU in its reset register state. Call [`Cpu::reset`] to load
    /// the program counter.
    pub fn new() -> Self {
        std::sync::LazyLock::force(&OPCODES);
        Self {
            a: 0,
            x: 0,
            y: 0,
            s: RESET_SP,
            p: Status::RESET,
            pc: 0,
            cycles: 0,
            total_cycles: 0,
            halted: false,
            operand: Operand::default(),
        }
    }

    /// Reset sequence. `entry_point` overrides the vector at `$FFFC`.
    pub fn reset(&mut self, bus: &mut dyn Bus, entry_point: Option<u16>) {
        *self = Self::new();
        self.cycles = RESET_CYCLES;
        self.pc = match entry_point {
            Some(pc) => pc,
            None => bus.read_word(Interrupt::Reset.vector()),
        };
        info!(pc = format_args!("{:#06X}", self.pc), "cpu reset");
    }

    /// Advances one CPU cycle. Returns `true` when an instruction executed.
    ///
    /// The interceptor, when present, observes the CPU right before and right
    /// after the instruction.
    pub fn tick(&mut self, bus: &mut dyn Bus, interceptor: Option<&mut EmuInterceptor>) -> bool {
        if self.halted {
            return false;
        }
        self.total_cycles += 1;
        if self.cycles > 1 {
            self.cycles -= 1;
            return false;
        }
        self.cycles = 0;

        match interceptor {
            Some(interceptor) => {
                interceptor.debug(self, bus);
                self.step(bus);
                interceptor.after(self, bus);
            }
            None => self.step(bus),
        }
        true
    }

    /// Fetches, decodes and executes one instruction, adding its cost to the
    /// pending cycle counter.
    pub(crate) fn step(&mut self, bus: &mut dyn Bus) {
        let pc = self.pc;
        let opcode = self.fetch(bus);
        let instr = &OPCODES[opcode];
        trace!(
            pc = format_args!("{pc:04X}"),
            opcode = format_args!("{opcode:02X}"),
            mnemonic = %instr.mnemonic,
            "exec"
        );

        self.operand = Operand {
            accumulator: instr.addressing == Addressing::Accumulator,
            rmw: instr.rmw,
            ..Operand::default()
        };
        if instr.addressing.has_address() {
            self.operand.addr = self.resolve(instr, bus);
        }
        self.cycles += u32::from(instr.cycles);
        (instr.exec)(self, bus);
    }

    /// Enters an interrupt handler. IRQ is ignored while `I` is set and a
    /// halted CPU ignores everything.
    pub fn trigger_interrupt(&mut self, kind: Interrupt, bus: &mut dyn Bus) {
        if self.halted || (kind == Interrupt::Irq && self.p.contains(Status::INTERRUPT)) {
            return;
        }
        self.push_word(bus, self.pc);
        self.push(bus, self.p.to_stack_without_break());
        self.p.insert(Status::INTERRUPT);
        self.pc = bus.read_word(kind.vector());
        self.cycles += INTERRUPT_CYCLES;
        debug!(?kind, pc = format_args!("{:#06X}", self.pc), "interrupt");
    }

    pub fn a(&self) -> u8 {
        self.a
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    pub fn s(&self) -> u8 {
        self.s
    }

    /// Status byte as the CPU holds it (`U` set, `B` clear).
    pub fn p(&self) -> u8 {
        self.p.bits()
    }

    pub fn status(&self) -> Status {
        self.p
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    pub fn pending_cycles(&self) -> u32 {
        self.cycles
    }

    pub fn halted(&self) -> bool {
        self.halted
    }

    pub(crate) fn fetch(&mut self, bus: &mut dyn Bus) -> u8 {
        let byte = bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        byte
    }

    pub(crate) fn fetch_word(&mut self, bus: &mut dyn Bus) -> u16 {
        let lo = self.fetch(bus);
        let hi = self.fetch(bus);
        u16::from_le_bytes([lo, hi])
    }

    pub(crate) fn push(&mut self, bus: &mut dyn Bus, value: u8) {
        bus.write(STACK_ADDR | u16::from(self.s), value);
        self.s = self.s.wrapping_sub(1);
    }

    pub(crate) fn pop(&mut self, bus: &mut dyn Bus) -> u8 {
        self.s = self.s.wrapping_add(1);
        bus.read(STACK_ADDR | u16::from(self.s))
    }

    /// High byte first, so the word ends up little-endian in memory.
    pub(crate) fn push_word(&mut self, bus: &mut dyn Bus, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.push(bus, hi);
        self.push(bus, lo);
    }

    pub(crate) fn pop_word(&mut self, bus: &mut dyn Bus) -> u16 {
        let lo = self.pop(bus);
        let hi = self.pop(bus);
        u16::from_le_bytes([lo, hi])
    }

    /// Reads the current operand: A in accumulator mode, memory otherwise.
    pub(crate) fn read_operand(&mut self, bus: &mut dyn Bus) -> u8 {
        let value = if self.operand.accumulator {
            self.a
        } else {
            bus.read(self.operand.addr)
        };
        self.operand.value = value;
        value
    }

    /// Writes the current operand. Read-modify-write instructions first store
    /// the unmodified value again, like the hardware's dummy write.
    pub(crate) fn write_operand(&mut self, bus: &mut dyn Bus, value: u8) {
        if self.operand.accumulator {
            self.a = value;
            return;
        }
        if self.operand.rmw {
            bus.write(self.operand.addr, self.operand.value);
        }
        bus.write(self.operand.addr, value);
    }
}
