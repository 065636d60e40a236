use std::fmt::Write;

use crate::{
    bus::Bus,
    cpu::{Cpu, addressing::Addressing, lookup::OPCODES, mnemonic::Mnemonic},
};

impl Cpu {
    /// Renders the instruction at `pc` in standard 6502 syntax and returns it
    /// with its length in bytes. Memory is read through [`Bus::peek`].
    ///
    /// Undocumented opcodes carry a `*` prefix, as in the nestest log.
    pub fn disassemble(bus: &dyn Bus, pc: u16) -> (String, u8) {
        let instr = &OPCODES[bus.peek(pc)];
        let lo = bus.peek(pc.wrapping_add(1));
        let word = bus.peek_word(pc.wrapping_add(1));

        let undocumented = instr.mnemonic.is_undocumented()
            || (instr.mnemonic == Mnemonic::NOP && instr.opcode != 0xEA)
            || instr.opcode == 0xEB;
        let mut text = String::with_capacity(16);
        if undocumented {
            text.push('*');
        }
        // Writing into a String cannot fail.
        let _ = write!(text, "{}", instr.mnemonic);

        let _ = match instr.addressing {
            Addressing::Implied => Ok(()),
            Addressing::Accumulator => write!(text, " A"),
            Addressing::Immediate => write!(text, " #${lo:02X}"),
            Addressing::ZeroPage => write!(text, " ${lo:02X}"),
            Addressing::ZeroPageX => write!(text, " ${lo:02X},X"),
            Addressing::ZeroPageY => write!(text, " ${lo:02X},Y"),
            Addressing::Absolute => write!(text, " ${word:04X}"),
            Addressing::AbsoluteX => write!(text, " ${word:04X},X"),
            Addressing::AbsoluteY => write!(text, " ${word:04X},Y"),
            Addressing::Indirect => write!(text, " (${word:04X})"),
            Addressing::IndirectX => write!(text, " (${lo:02X},X)"),
            Addressing::IndirectY => write!(text, " (${lo:02X}),Y"),
            Addressing::Relative => {
                let target = pc.wrapping_add(2).wrapping_add(lo as i8 as u16);
                write!(text, " ${target:04X}")
            }
        };

        (text, instr.byte_len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::mock::MockBus;

    fn disasm(bytes: &[u8]) -> (String, u8) {
        let mut bus = MockBus::default();
        bus.load(0xC0F0, bytes);
        Cpu::disassemble(&bus, 0xC0F0)
    }

    #[test]
    fn renders_every_addressing_form() {
        let cases: [(&[u8], &str, u8); 12] = [
            (&[0xEA], "NOP", 1),
            (&[0x0A], "ASL A", 1),
            (&[0xA9, 0x10], "LDA #$10", 2),
            (&[0xA5, 0x10], "LDA $10", 2),
            (&[0xB6, 0x10], "LDX $10,Y", 2),
            (&[0x9D, 0x00, 0x02], "STA $0200,X", 3),
            (&[0xB9, 0x34, 0x12], "LDA $1234,Y", 3),
            (&[0x6C, 0xFC, 0xFF], "JMP ($FFFC)", 3),
            (&[0xA1, 0x10], "LDA ($10,X)", 2),
            (&[0xB1, 0x10], "LDA ($10),Y", 2),
            (&[0xD0, 0x01], "BNE $C0F3", 2),
            (&[0x4C, 0xF5, 0xC5], "JMP $C5F5", 3),
        ];
        for (bytes, text, len) in cases {
            assert_eq!(disasm(bytes), (text.to_string(), len));
        }
    }

    #[test]
    fn backwards_branch_target() {
        assert_eq!(disasm(&[0xF0, 0xFE]).0, "BEQ $C0F0");
    }

    #[test]
    fn undocumented_opcodes_are_starred() {
        assert_eq!(disasm(&[0x04, 0x10]).0, "*NOP $10");
        assert_eq!(disasm(&[0xEB, 0x01]).0, "*SBC #$01");
        assert_eq!(disasm(&[0xA7, 0x10]).0, "*LAX $10");
        assert_eq!(disasm(&[0x02]).0, "*JAM");
    }
}
