//! The 256-entry opcode dispatch table.
//!
//! Every opcode byte, documented or not, is described exactly once in
//! [`INSTRUCTIONS`]. [`OpcodeTable::build`] turns that list into a dense table
//! and rejects duplicates and gaps.

use core::{fmt, ops::Index};
use std::sync::LazyLock;

use crate::{
    bus::Bus,
    cpu::{Cpu, addressing::Addressing as A, mnemonic::Mnemonic},
    error::OpcodeTableError,
};

pub(crate) type Handler = fn(&mut Cpu, &mut dyn Bus);

/// Static description of one opcode byte.
#[derive(Clone, Copy)]
pub struct Instruction {
    pub opcode: u8,
    pub mnemonic: Mnemonic,
    pub addressing: A,
    /// Base cycle count, before page-cross and branch penalties.
    pub cycles: u8,
    /// Indexed modes add a cycle when the effective address leaves the base page.
    pub page_cross: bool,
    /// Read-modify-write: the old value is written back before the new one.
    pub rmw: bool,
    pub(crate) exec: Handler,
}

impl Instruction {
    /// Bytes occupied in memory, opcode included.
    pub const fn byte_len(&self) -> u8 {
        1 + self.addressing.operand_len()
    }
}

impl fmt::Debug for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instruction")
            .field("opcode", &format_args!("{:#04X}", self.opcode))
            .field("mnemonic", &self.mnemonic)
            .field("addressing", &self.addressing)
            .field("cycles", &self.cycles)
            .field("page_cross", &self.page_cross)
            .field("rmw", &self.rmw)
            .finish()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X} {} {}", self.opcode, self.mnemonic, self.addressing)
    }
}

/// Dense opcode-indexed dispatch table.
#[derive(Debug, Clone)]
pub struct OpcodeTable {
    entries: Box<[Instruction]>,
}

impl OpcodeTable {
    pub fn build(list: &[Instruction]) -> Result<Self, OpcodeTableError> {
        let mut slots: [Option<Instruction>; 256] = [None; 256];
        for instr in list {
            let slot = &mut slots[usize::from(instr.opcode)];
            if slot.is_some() {
                return Err(OpcodeTableError::Duplicate(instr.opcode));
            }
            *slot = Some(*instr);
        }

        let entries = slots
            .into_iter()
            .enumerate()
            .map(|(opcode, slot)| slot.ok_or(OpcodeTableError::Missing(opcode as u8)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            entries: entries.into_boxed_slice(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.entries.iter()
    }
}

impl Index<u8> for OpcodeTable {
    type Output = Instruction;

    fn index(&self, opcode: u8) -> &Instruction {
        &self.entries[usize::from(opcode)]
    }
}

/// The validated table every [`Cpu`] dispatches through.
pub(crate) static OPCODES: LazyLock<OpcodeTable> =
    LazyLock::new(|| match OpcodeTable::build(INSTRUCTIONS) {
        Ok(table) => table,
        Err(err) => panic!("invalid opcode table: {err}"),
    });

/// Validated global dispatch table.
pub fn opcode_table() -> &'static OpcodeTable {
    &OPCODES
}

// Short aliases for addressing modes (to keep the table readable)
const IMP: A = A::Implied;
const ACC: A = A::Accumulator;
const IMM: A = A::Immediate;
const REL: A = A::Relative;
const ZP: A = A::ZeroPage;
const ZPX: A = A::ZeroPageX;
const ZPY: A = A::ZeroPageY;
const ABS: A = A::Absolute;
const ABX: A = A::AbsoluteX;
const ABY: A = A::AbsoluteY;
const IND: A = A::Indirect;
const INX: A = A::IndirectX;
const INY: A = A::IndirectY;

macro_rules! op {
    (@build $code:literal, $m:ident, $mode:ident, $cycles:literal, $px:literal, $rmw:literal) => {
        Instruction {
            opcode: $code,
            mnemonic: Mnemonic::$m,
            addressing: $mode,
            cycles: $cycles,
            page_cross: $px,
            rmw: $rmw,
            exec: Mnemonic::$m.handler(),
        }
    };
    ($code:literal, $m:ident, $mode:ident, $cycles:literal) => {
        op!(@build $code, $m, $mode, $cycles, false, false)
    };
    ($code:literal, $m:ident, $mode:ident, $cycles:literal, PX) => {
        op!(@build $code, $m, $mode, $cycles, true, false)
    };
    ($code:literal, $m:ident, $mode:ident, $cycles:literal, RMW) => {
        op!(@build $code, $m, $mode, $cycles, false, true)
    };
}

/// Every opcode with its canonical NMOS timing.
#[rustfmt::skip]
pub static INSTRUCTIONS: &[Instruction] = &[
    // 0x00
    op!(0x00, BRK, IMP, 7),      op!(0x01, ORA, INX, 6),      op!(0x02, JAM, IMP, 2),      op!(0x03, SLO, INX, 8, RMW),
    op!(0x04, NOP, ZP, 3),       op!(0x05, ORA, ZP, 3),       op!(0x06, ASL, ZP, 5, RMW),  op!(0x07, SLO, ZP, 5, RMW),
    op!(0x08, PHP, IMP, 3),      op!(0x09, ORA, IMM, 2),      op!(0x0A, ASL, ACC, 2),      op!(0x0B, ANC, IMM, 2),
    op!(0x0C, NOP, ABS, 4),      op!(0x0D, ORA, ABS, 4),      op!(0x0E, ASL, ABS, 6, RMW), op!(0x0F, SLO, ABS, 6, RMW),
    // 0x10
    op!(0x10, BPL, REL, 2),      op!(0x11, ORA, INY, 5, PX),  op!(0x12, JAM, IMP, 2),      op!(0x13, SLO, INY, 8, RMW),
    op!(0x14, NOP, ZPX, 4),      op!(0x15, ORA, ZPX, 4),      op!(0x16, ASL, ZPX, 6, RMW), op!(0x17, SLO, ZPX, 6, RMW),
    op!(0x18, CLC, IMP, 2),      op!(0x19, ORA, ABY, 4, PX),  op!(0x1A, NOP, IMP, 2),      op!(0x1B, SLO, ABY, 7, RMW),
    op!(0x1C, NOP, ABX, 4, PX),  op!(0x1D, ORA, ABX, 4, PX),  op!(0x1E, ASL, ABX, 7, RMW), op!(0x1F, SLO, ABX, 7, RMW),
    // 0x20
    op!(0x20, JSR, ABS, 6),      op!(0x21, AND, INX, 6),      op!(0x22, JAM, IMP, 2),      op!(0x23, RLA, INX, 8, RMW),
    op!(0x24, BIT, ZP, 3),       op!(0x25, AND, ZP, 3),       op!(0x26, ROL, ZP, 5, RMW),  op!(0x27, RLA, ZP, 5, RMW),
    op!(0x28, PLP, IMP, 4),      op!(0x29, AND, IMM, 2),      op!(0x2A, ROL, ACC, 2),      op!(0x2B, ANC, IMM, 2),
    op!(0x2C, BIT, ABS, 4),      op!(0x2D, AND, ABS, 4),      op!(0x2E, ROL, ABS, 6, RMW), op!(0x2F, RLA, ABS, 6, RMW),
    // 0x30
    op!(0x30, BMI, REL, 2),      op!(0x31, AND, INY, 5, PX),  op!(0x32, JAM, IMP, 2),      op!(0x33, RLA, INY, 8, RMW),
    op!(0x34, NOP, ZPX, 4),      op!(0x35, AND, ZPX, 4),      op!(0x36, ROL, ZPX, 6, RMW), op!(0x37, RLA, ZPX, 6, RMW),
    op!(0x38, SEC, IMP, 2),      op!(0x39, AND, ABY, 4, PX),  op!(0x3A, NOP, IMP, 2),      op!(0x3B, RLA, ABY, 7, RMW),
    op!(0x3C, NOP, ABX, 4, PX),  op!(0x3D, AND, ABX, 4, PX),  op!(0x3E, ROL, ABX, 7, RMW), op!(0x3F, RLA, ABX, 7, RMW),
    // 0x40
    op!(0x40, RTI, IMP, 6),      op!(0x41, EOR, INX, 6),      op!(0x42, JAM, IMP, 2),      op!(0x43, SRE, INX, 8, RMW),
    op!(0x44, NOP, ZP, 3),       op!(0x45, EOR, ZP, 3),       op!(0x46, LSR, ZP, 5, RMW),  op!(0x47, SRE, ZP, 5, RMW),
    op!(0x48, PHA, IMP, 3),      op!(0x49, EOR, IMM, 2),      op!(0x4A, LSR, ACC, 2),      op!(0x4B, ASR, IMM, 2),
    op!(0x4C, JMP, ABS, 3),      op!(0x4D, EOR, ABS, 4),      op!(0x4E, LSR, ABS, 6, RMW), op!(0x4F, SRE, ABS, 6, RMW),
    // 0x50
    op!(0x50, BVC, REL, 2),      op!(0x51, EOR, INY, 5, PX),  op!(0x52, JAM, IMP, 2),      op!(0x53, SRE, INY, 8, RMW),
    op!(0x54, NOP, ZPX, 4),      op!(0x55, EOR, ZPX, 4),      op!(0x56, LSR, ZPX, 6, RMW), op!(0x57, SRE, ZPX, 6, RMW),
    op!(0x58, CLI, IMP, 2),      op!(0x59, EOR, ABY, 4, PX),  op!(0x5A, NOP, IMP, 2),      op!(0x5B, SRE, ABY, 7, RMW),
    op!(0x5C, NOP, ABX, 4, PX),  op!(0x5D, EOR, ABX, 4, PX),  op!(0x5E, LSR, ABX, 7, RMW), op!(0x5F, SRE, ABX, 7, RMW),
    // 0x60
    op!(0x60, RTS, IMP, 6),      op!(0x61, ADC, INX, 6),      op!(0x62, JAM, IMP, 2),      op!(0x63, RRA, INX, 8, RMW),
    op!(0x64, NOP, ZP, 3),       op!(0x65, ADC, ZP, 3),       op!(0x66, ROR, ZP, 5, RMW),  op!(0x67, RRA, ZP, 5, RMW),
    op!(0x68, PLA, IMP, 4),      op!(0x69, ADC, IMM, 2),      op!(0x6A, ROR, ACC, 2),      op!(0x6B, ARR, IMM, 2),
    op!(0x6C, JMP, IND, 5),      op!(0x6D, ADC, ABS, 4),      op!(0x6E, ROR, ABS, 6, RMW), op!(0x6F, RRA, ABS, 6, RMW),
    // 0x70
    op!(0x70, BVS, REL, 2),      op!(0x71, ADC, INY, 5, PX),  op!(0x72, JAM, IMP, 2),      op!(0x73, RRA, INY, 8, RMW),
    op!(0x74, NOP, ZPX, 4),      op!(0x75, ADC, ZPX, 4),      op!(0x76, ROR, ZPX, 6, RMW), op!(0x77, RRA, ZPX, 6, RMW),
    op!(0x78, SEI, IMP, 2),      op!(0x79, ADC, ABY, 4, PX),  op!(0x7A, NOP, IMP, 2),      op!(0x7B, RRA, ABY, 7, RMW),
    op!(0x7C, NOP, ABX, 4, PX),  op!(0x7D, ADC, ABX, 4, PX),  op!(0x7E, ROR, ABX, 7, RMW), op!(0x7F, RRA, ABX, 7, RMW),
    // 0x80
    op!(0x80, NOP, IMM, 2),      op!(0x81, STA, INX, 6),      op!(0x82, NOP, IMM, 2),      op!(0x83, SAX, INX, 6),
    op!(0x84, STY, ZP, 3),       op!(0x85, STA, ZP, 3),       op!(0x86, STX, ZP, 3),       op!(0x87, SAX, ZP, 3),
    op!(0x88, DEY, IMP, 2),      op!(0x89, NOP, IMM, 2),      op!(0x8A, TXA, IMP, 2),      op!(0x8B, XAA, IMM, 2),
    op!(0x8C, STY, ABS, 4),      op!(0x8D, STA, ABS, 4),      op!(0x8E, STX, ABS, 4),      op!(0x8F, SAX, ABS, 4),
    // 0x90
    op!(0x90, BCC, REL, 2),      op!(0x91, STA, INY, 6),      op!(0x92, JAM, IMP, 2),      op!(0x93, SHA, INY, 6),
    op!(0x94, STY, ZPX, 4),      op!(0x95, STA, ZPX, 4),      op!(0x96, STX, ZPY, 4),      op!(0x97, SAX, ZPY, 4),
    op!(0x98, TYA, IMP, 2),      op!(0x99, STA, ABY, 5),      op!(0x9A, TXS, IMP, 2),      op!(0x9B, SHS, ABY, 5),
    op!(0x9C, SHY, ABX, 5),      op!(0x9D, STA, ABX, 5),      op!(0x9E, SHX, ABY, 5),      op!(0x9F, SHA, ABY, 5),
    // 0xA0
    op!(0xA0, LDY, IMM, 2),      op!(0xA1, LDA, INX, 6),      op!(0xA2, LDX, IMM, 2),      op!(0xA3, LAX, INX, 6),
    op!(0xA4, LDY, ZP, 3),       op!(0xA5, LDA, ZP, 3),       op!(0xA6, LDX, ZP, 3),       op!(0xA7, LAX, ZP, 3),
    op!(0xA8, TAY, IMP, 2),      op!(0xA9, LDA, IMM, 2),      op!(0xAA, TAX, IMP, 2),      op!(0xAB, LXA, IMM, 2),
    op!(0xAC, LDY, ABS, 4),      op!(0xAD, LDA, ABS, 4),      op!(0xAE, LDX, ABS, 4),      op!(0xAF, LAX, ABS, 4),
    // 0xB0
    op!(0xB0, BCS, REL, 2),      op!(0xB1, LDA, INY, 5, PX),  op!(0xB2, JAM, IMP, 2),      op!(0xB3, LAX, INY, 5, PX),
    op!(0xB4, LDY, ZPX, 4),      op!(0xB5, LDA, ZPX, 4),      op!(0xB6, LDX, ZPY, 4),      op!(0xB7, LAX, ZPY, 4),
    op!(0xB8, CLV, IMP, 2),      op!(0xB9, LDA, ABY, 4, PX),  op!(0xBA, TSX, IMP, 2),      op!(0xBB, LAS, ABY, 4, PX),
    op!(0xBC, LDY, ABX, 4, PX),  op!(0xBD, LDA, ABX, 4, PX),  op!(0xBE, LDX, ABY, 4, PX),  op!(0xBF, LAX, ABY, 4, PX),
    // 0xC0
    op!(0xC0, CPY, IMM, 2),      op!(0xC1, CMP, INX, 6),      op!(0xC2, NOP, IMM, 2),      op!(0xC3, DCP, INX, 8, RMW),
    op!(0xC4, CPY, ZP, 3),       op!(0xC5, CMP, ZP, 3),       op!(0xC6, DEC, ZP, 5, RMW),  op!(0xC7, DCP, ZP, 5, RMW),
    op!(0xC8, INY, IMP, 2),      op!(0xC9, CMP, IMM, 2),      op!(0xCA, DEX, IMP, 2),      op!(0xCB, SBX, IMM, 2),
    op!(0xCC, CPY, ABS, 4),      op!(0xCD, CMP, ABS, 4),      op!(0xCE, DEC, ABS, 6, RMW), op!(0xCF, DCP, ABS, 6, RMW),
    // 0xD0
    op!(0xD0, BNE, REL, 2),      op!(0xD1, CMP, INY, 5, PX),  op!(0xD2, JAM, IMP, 2),      op!(0xD3, DCP, INY, 8, RMW),
    op!(0xD4, NOP, ZPX, 4),      op!(0xD5, CMP, ZPX, 4),      op!(0xD6, DEC, ZPX, 6, RMW), op!(0xD7, DCP, ZPX, 6, RMW),
    op!(0xD8, CLD, IMP, 2),      op!(0xD9, CMP, ABY, 4, PX),  op!(0xDA, NOP, IMP, 2),      op!(0xDB, DCP, ABY, 7, RMW),
    op!(0xDC, NOP, ABX, 4, PX),  op!(0xDD, CMP, ABX, 4, PX),  op!(0xDE, DEC, ABX, 7, RMW), op!(0xDF, DCP, ABX, 7, RMW),
    // 0xE0
    op!(0xE0, CPX, IMM, 2),      op!(0xE1, SBC, INX, 6),      op!(0xE2, NOP, IMM, 2),      op!(0xE3, ISC, INX, 8, RMW),
    op!(0xE4, CPX, ZP, 3),       op!(0xE5, SBC, ZP, 3),       op!(0xE6, INC, ZP, 5, RMW),  op!(0xE7, ISC, ZP, 5, RMW),
    op!(0xE8, INX, IMP, 2),      op!(0xE9, SBC, IMM, 2),      op!(0xEA, NOP, IMP, 2),      op!(0xEB, SBC, IMM, 2),
    op!(0xEC, CPX, ABS, 4),      op!(0xED, SBC, ABS, 4),      op!(0xEE, INC, ABS, 6, RMW), op!(0xEF, ISC, ABS, 6, RMW),
    // 0xF0
    op!(0xF0, BEQ, REL, 2),      op!(0xF1, SBC, INY, 5, PX),  op!(0xF2, JAM, IMP, 2),      op!(0xF3, ISC, INY, 8, RMW),
    op!(0xF4, NOP, ZPX, 4),      op!(0xF5, SBC, ZPX, 4),      op!(0xF6, INC, ZPX, 6, RMW), op!(0xF7, ISC, ZPX, 6, RMW),
    op!(0xF8, SED, IMP, 2),      op!(0xF9, SBC, ABY, 4, PX),  op!(0xFA, NOP, IMP, 2),      op!(0xFB, ISC, ABY, 7, RMW),
    op!(0xFC, NOP, ABX, 4, PX),  op!(0xFD, SBC, ABX, 4, PX),  op!(0xFE, INC, ABX, 7, RMW), op!(0xFF, ISC, ABX, 7, RMW),
];
