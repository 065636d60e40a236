use tracing::trace;

use crate::{
    bus::Bus,
    cpu::{Cpu, Interrupt, mnemonic::Mnemonic, status::Status},
};

impl Mnemonic {
    /// NV-BDIZC
    /// ---1-1--
    ///
    /// BRK - Break Command
    /// Operation: PC + 2↓, P ∨ B↓, [FFFE] → PCL, [FFFF] → PCH
    ///
    /// The break command runs the interrupt sequence under program control.
    /// The return address skips the padding byte after the opcode, and the
    /// pushed status has B set so the handler can tell BRK from an IRQ.
    ///
    /// Addressing Mode | Assembly Language Form | Opcode | No. Bytes | No. Cycles
    /// --------------- | ------------------------ | ------ | --------- | ----------
    /// Implied         | BRK                      | $00    | 1         | 7
    pub(crate) fn brk(cpu: &mut Cpu, bus: &mut dyn Bus) {
        cpu.pc = cpu.pc.wrapping_add(1);
        cpu.push_word(bus, cpu.pc);
        cpu.push(bus, cpu.p.to_stack_with_break());
        cpu.p.insert(Status::INTERRUPT);
        cpu.pc = bus.read_word(Interrupt::Irq.vector());
        trace!(pc = format_args!("{:#06X}", cpu.pc), "brk");
    }

    /// NV-BDIZC
    /// --------
    ///
    /// JMP - JMP Indirect / Absolute
    /// Operation: [PC + 1] → PCL, [PC + 2] → PCH
    ///
    /// The indirect form never carries into the pointer's high byte: a
    /// pointer at `$xxFF` takes its high byte from `$xx00`.
    ///
    /// Addressing Mode | Assembly Language Form | Opcode | No. Bytes | No. Cycles
    /// --------------- | ------------------------ | ------ | --------- | ----------
    /// Absolute        | JMP $nnnn                | $4C    | 3         | 3
    /// Absolute Indirect | JMP ($nnnn)            | $6C    | 3         | 5
    pub(crate) fn jmp(cpu: &mut Cpu, _: &mut dyn Bus) {
        cpu.pc = cpu.operand.addr;
    }

    /// NV-BDIZC
    /// --------
    ///
    /// JSR - Jump To Subroutine
    /// Operation: PC + 2↓, [PC + 1] → PCL, [PC + 2] → PCH
    ///
    /// The pushed address is the last byte of the JSR itself; RTS adds one.
    ///
    /// Addressing Mode | Assembly Language Form | Opcode | No. Bytes | No. Cycles
    /// --------------- | ------------------------ | ------ | --------- | ----------
    /// Absolute        | JSR $nnnn                | $20    | 3         | 6
    pub(crate) fn jsr(cpu: &mut Cpu, bus: &mut dyn Bus) {
        cpu.push_word(bus, cpu.pc.wrapping_sub(1));
        cpu.pc = cpu.operand.addr;
    }

    /// NV-BDIZC
    /// ✓✓--✓✓✓✓
    ///
    /// RTI - Return From Interrupt
    /// Operation: P↑ PC↑
    ///
    /// Addressing Mode | Assembly Language Form | Opcode | No. Bytes | No. Cycles
    /// --------------- | ------------------------ | ------ | --------- | ----------
    /// Implied         | RTI                      | $40    | 1         | 6
    pub(crate) fn rti(cpu: &mut Cpu, bus: &mut dyn Bus) {
        cpu.p = Status::from_stack(cpu.pop(bus));
        cpu.pc = cpu.pop_word(bus);
    }

    /// NV-BDIZC
    /// --------
    ///
    /// RTS - Return From Subroutine
    /// Operation: PC↑, PC + 1 → PC
    ///
    /// Addressing Mode | Assembly Language Form | Opcode | No. Bytes | No. Cycles
    /// --------------- | ------------------------ | ------ | --------- | ----------
    /// Implied         | RTS                      | $60    | 1         | 6
    pub(crate) fn rts(cpu: &mut Cpu, bus: &mut dyn Bus) {
        cpu.pc = cpu.pop_word(bus).wrapping_add(1);
    }
}

#[cfg(test)]
mod ctrl_tests {
    use crate::{
        bus::{Bus, STACK_ADDR},
        cpu::{
            mnemonic::{
                Mnemonic,
                tests::{InstrTest, setup},
            },
            status::Status,
        },
        memory::cpu::IRQ_VECTOR,
    };

    #[test]
    fn test_brk() {
        let (mut cpu, mut bus) = setup(0x8000, 0x00, 0x00, 0x00, 0xFD, |mem| {
            mem.load(0x8000, &[0x00, 0xEA]);
            mem.load(IRQ_VECTOR, &[0x00, 0x90]);
        });
        cpu.p = Status::CARRY | Status::UNUSED;
        cpu.step(&mut bus);

        assert_eq!(cpu.pc, 0x9000);
        assert_eq!(cpu.s, 0xFA);
        assert_eq!(bus.read(0x01FD), 0x80);
        assert_eq!(bus.read(0x01FC), 0x02, "return address skips the padding byte");
        assert_eq!(bus.read(0x01FB), 0b0011_0001, "B and U pushed");
        assert!(cpu.p.contains(Status::INTERRUPT));
        assert!(!cpu.p.contains(Status::BREAK));
        assert_eq!(cpu.cycles, 7);
    }

    #[test]
    fn test_brk_rti_round_trip() {
        let (mut cpu, mut bus) = setup(0x8000, 0x00, 0x00, 0x00, 0xFD, |mem| {
            mem.load(0x8000, &[0x00, 0xEA]);
            mem.load(IRQ_VECTOR, &[0x00, 0x90]);
            mem.load(0x9000, &[0x40]);
        });
        cpu.p = Status::NEGATIVE | Status::UNUSED;
        cpu.step(&mut bus);
        cpu.step(&mut bus);

        assert_eq!(cpu.pc, 0x8002);
        assert_eq!(cpu.s, 0xFD);
        assert_eq!(cpu.p, Status::NEGATIVE | Status::UNUSED);
    }

    #[test]
    fn test_jmp() {
        InstrTest::new(Mnemonic::JMP).run(0x4C, |_, verify, cpu, _| {
            assert_eq!(cpu.pc, verify.addr);
            assert_eq!(cpu.s, verify.cpu.s);
        });
    }

    #[test]
    fn test_jmp_indirect_page_wrap() {
        let (mut cpu, mut bus) = setup(0x8000, 0x00, 0x00, 0x00, 0xFD, |mem| {
            mem.load(0x8000, &[0x6C, 0xFF, 0x02]);
            mem.mem[0x02FF] = 0x34;
            mem.mem[0x0200] = 0x12;
            mem.mem[0x0300] = 0x56;
        });
        cpu.step(&mut bus);

        assert_eq!(cpu.pc, 0x1234);
        assert_eq!(cpu.cycles, 5);
    }

    #[test]
    fn test_jsr() {
        InstrTest::new(Mnemonic::JSR).run(0x20, |_, verify, cpu, bus| {
            assert_eq!(cpu.pc, verify.addr);
            let s = verify.cpu.s;
            let hi = bus.read(STACK_ADDR | u16::from(s));
            let lo = bus.read(STACK_ADDR | u16::from(s.wrapping_sub(1)));
            assert_eq!(u16::from_le_bytes([lo, hi]), verify.cpu.pc + 2);
            assert_eq!(cpu.s, s.wrapping_sub(2));
        });
    }

    #[test]
    fn test_jsr_rts_round_trip() {
        let (mut cpu, mut bus) = setup(0x8000, 0x00, 0x00, 0x00, 0xFD, |mem| {
            mem.load(0x8000, &[0x20, 0x00, 0x90]);
            mem.load(0x9000, &[0x60]);
        });
        cpu.step(&mut bus);
        assert_eq!((cpu.pc, cpu.cycles), (0x9000, 6));
        cpu.step(&mut bus);

        assert_eq!(cpu.pc, 0x8003);
        assert_eq!(cpu.s, 0xFD);
        assert_eq!(cpu.cycles, 12);
    }

    #[test]
    fn test_rti() {
        InstrTest::new(Mnemonic::RTI).run(0x40, |_, verify, cpu, bus| {
            let s = verify.cpu.s;
            let p = bus.read(STACK_ADDR | u16::from(s.wrapping_add(1)));
            let lo = bus.read(STACK_ADDR | u16::from(s.wrapping_add(2)));
            let hi = bus.read(STACK_ADDR | u16::from(s.wrapping_add(3)));
            assert_eq!(cpu.p, Status::from_stack(p));
            assert_eq!(cpu.pc, u16::from_le_bytes([lo, hi]));
            assert_eq!(cpu.s, s.wrapping_add(3));
        });
    }

    #[test]
    fn test_rts() {
        InstrTest::new(Mnemonic::RTS).run(0x60, |_, verify, cpu, bus| {
            let s = verify.cpu.s;
            let lo = bus.read(STACK_ADDR | u16::from(s.wrapping_add(1)));
            let hi = bus.read(STACK_ADDR | u16::from(s.wrapping_add(2)));
            assert_eq!(cpu.pc, u16::from_le_bytes([lo, hi]).wrapping_add(1));
            assert_eq!(cpu.p, verify.cpu.p);
        });
    }
}
