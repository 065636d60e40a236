use core::fmt;

use crate::{
    bus::Bus,
    cpu::{Cpu, lookup::Instruction},
};

/// 6502 addressing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Addressing {
    /// No operand (`CLC`, `RTS`).
    Implied,
    /// Operates on A (`ASL A`).
    Accumulator,
    /// The operand byte follows the opcode (`LDA #$42`).
    Immediate,
    /// `LDA $1234`
    Absolute,
    /// `LDA $1234,X`. May cost an extra cycle on a page cross.
    AbsoluteX,
    /// `LDA $1234,Y`. May cost an extra cycle on a page cross.
    AbsoluteY,
    /// `JMP ($1234)`, with the page-wrap bug on `$xxFF` pointers.
    Indirect,
    /// `LDA $42`
    ZeroPage,
    /// `LDA $42,X`, wrapping inside page zero.
    ZeroPageX,
    /// `LDX $42,Y`, wrapping inside page zero.
    ZeroPageY,
    /// `LDA ($42,X)`: pointer at `(zp + X) & 0xFF`.
    IndirectX,
    /// `LDA ($42),Y`: pointer at `zp`, then `+ Y`.
    IndirectY,
    /// Signed branch displacement (`BNE *-3`).
    Relative,
}

impl Addressing {
    /// Operand bytes following the opcode.
    pub const fn operand_len(self) -> u8 {
        match self {
            Addressing::Implied | Addressing::Accumulator => 0,
            Addressing::Absolute
            | Addressing::AbsoluteX
            | Addressing::AbsoluteY
            | Addressing::Indirect => 2,
            _ => 1,
        }
    }

    /// Implied and accumulator modes never touch the bus for an operand.
    pub const fn has_address(self) -> bool {
        !matches!(self, Addressing::Implied | Addressing::Accumulator)
    }
}

impl fmt::Display for Addressing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Addressing::Implied => "imp",
            Addressing::Accumulator => "acc",
            Addressing::Immediate => "imm",
            Addressing::Absolute => "abs",
            Addressing::AbsoluteX => "abx",
            Addressing::AbsoluteY => "aby",
            Addressing::Indirect => "ind",
            Addressing::ZeroPage => "zp",
            Addressing::ZeroPageX => "zpx",
            Addressing::ZeroPageY => "zpy",
            Addressing::IndirectX => "inx",
            Addressing::IndirectY => "iny",
            Addressing::Relative => "rel",
        };
        f.write_str(name)
    }
}

impl Cpu {
    /// Consumes the operand bytes of `instr` and returns its effective address.
    ///
    /// Immediate mode yields the address of the operand byte itself and
    /// Relative yields the sign-extended displacement. Indexed modes charge a
    /// page-cross cycle when the descriptor asks for it.
    pub(super) fn resolve(&mut self, instr: &Instruction, bus: &mut dyn Bus) -> u16 {
        match instr.addressing {
            Addressing::Implied | Addressing::Accumulator => 0,
            Addressing::Immediate => {
                let addr = self.pc;
                self.pc = self.pc.wrapping_add(1);
                addr
            }
            Addressing::ZeroPage => u16::from(self.fetch(bus)),
            Addressing::ZeroPageX => u16::from(self.fetch(bus).wrapping_add(self.x)),
            Addressing::ZeroPageY => u16::from(self.fetch(bus).wrapping_add(self.y)),
            Addressing::Absolute => self.fetch_word(bus),
            Addressing::AbsoluteX => {
                let base = self.fetch_word(bus);
                self.index(base, self.x, instr.page_cross)
            }
            Addressing::AbsoluteY => {
                let base = self.fetch_word(bus);
                self.index(base, self.y, instr.page_cross)
            }
            Addressing::Indirect => {
                let ptr = self.fetch_word(bus);
                let lo = bus.read(ptr);
                let hi = bus.read((ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF));
                u16::from_le_bytes([lo, hi])
            }
            Addressing::IndirectX => {
                let ptr = self.fetch(bus).wrapping_add(self.x);
                read_zero_page_word(bus, ptr)
            }
            Addressing::IndirectY => {
                let ptr = self.fetch(bus);
                let base = read_zero_page_word(bus, ptr);
                self.index(base, self.y, instr.page_cross)
            }
            Addressing::Relative => self.fetch(bus) as i8 as u16,
        }
    }

    fn index(&mut self, base: u16, offset: u8, page_sensitive: bool) -> u16 {
        let addr = base.wrapping_add(u16::from(offset));
        if page_sensitive && crosses_page(base, addr) {
            self.cycles += 1;
        }
        addr
    }
}

/// Little-endian pointer whose high byte wraps inside page zero.
fn read_zero_page_word(bus: &mut dyn Bus, ptr: u8) -> u16 {
    let lo = bus.read(u16::from(ptr));
    let hi = bus.read(u16::from(ptr.wrapping_add(1)));
    u16::from_le_bytes([lo, hi])
}

pub(crate) fn crosses_page(a: u16, b: u16) -> bool {
    a & 0xFF00 != b & 0xFF00
}
