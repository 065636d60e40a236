use crate::{
    bus::Bus,
    cpu::{Cpu, mnemonic::Mnemonic},
};

impl Mnemonic {
    // ================================================================
    //  LAS: Load A, X, and Stack Pointer from (SP & M)
    // ================================================================
    /// 🕹️ Purpose:
    ///     Loads A, X, and Stack Pointer with the bitwise AND of
    ///     memory and the current stack pointer.
    ///
    /// ⚙️ Operation:
    ///     A, X, S ← S & M
    ///
    /// 🧩 Flags Affected:
    ///     N, Z
    pub(crate) fn las(cpu: &mut Cpu, bus: &mut dyn Bus) {
        let value = cpu.read_operand(bus) & cpu.s;
        cpu.a = value;
        cpu.x = value;
        cpu.s = value;
        cpu.p.set_zn(value);
    }

    // ================================================================
    //  LAX: Load A and X
    // ================================================================
    /// ⚙️ Operation:
    ///     A, X ← M
    ///
    /// 🧩 Flags Affected:
    ///     N, Z
    pub(crate) fn lax(cpu: &mut Cpu, bus: &mut dyn Bus) {
        Self::lda(cpu, bus);
        Self::tax(cpu, bus);
    }

    // ================================================================
    //  LDA: Load Accumulator
    // ================================================================
    /// 🕹️ Purpose:
    ///     Loads a value from memory into the accumulator (A).
    ///
    /// ⚙️ Operation:
    ///     A ← M
    ///
    /// 🧩 Flags Affected:
    ///     N, Z
    pub(crate) fn lda(cpu: &mut Cpu, bus: &mut dyn Bus) {
        cpu.a = cpu.read_operand(bus);
        cpu.p.set_zn(cpu.a);
    }

    // ================================================================
    //  LDX: Load X Register
    // ================================================================
    /// ⚙️ Operation:
    ///     X ← M
    ///
    /// 🧩 Flags Affected:
    ///     N, Z
    pub(crate) fn ldx(cpu: &mut Cpu, bus: &mut dyn Bus) {
        cpu.x = cpu.read_operand(bus);
        cpu.p.set_zn(cpu.x);
    }

    // ================================================================
    //  LDY: Load Y Register
    // ================================================================
    /// ⚙️ Operation:
    ///     Y ← M
    ///
    /// 🧩 Flags Affected:
    ///     N, Z
    pub(crate) fn ldy(cpu: &mut Cpu, bus: &mut dyn Bus) {
        cpu.y = cpu.read_operand(bus);
        cpu.p.set_zn(cpu.y);
    }

    // ================================================================
    //  LXA: Load A and X through the unstable "magic" constant
    // ================================================================
    /// 🕹️ Purpose:
    ///     Immediate-mode cousin of LAX (opcode `$AB`). Real chips OR A with
    ///     a chip-dependent constant first; here the constant is the byte at
    ///     zero page `$EE`.
    ///
    /// ⚙️ Operation:
    ///     A ← (A | [$EE]) & M, X ← A
    ///
    /// 🧩 Flags Affected:
    ///     N, Z
    pub(crate) fn lxa(cpu: &mut Cpu, bus: &mut dyn Bus) {
        cpu.a |= bus.read(0x00EE);
        cpu.a &= cpu.read_operand(bus);
        cpu.x = cpu.a;
        cpu.p.set_zn(cpu.a);
    }

    // ================================================================
    //  SAX: Store A & X (A AND X) into Memory
    // ================================================================
    /// ⚙️ Operation:
    ///     M ← A & X
    ///
    /// 🧩 Flags Affected:
    ///     None
    pub(crate) fn sax(cpu: &mut Cpu, bus: &mut dyn Bus) {
        bus.write(cpu.operand.addr, cpu.a & cpu.x);
    }

    // ================================================================
    //  SHA: Store A & X & H
    // ================================================================
    /// 🕹️ Purpose:
    ///     Stores A AND X AND the high byte of the effective address.
    ///
    /// ⚙️ Operation:
    ///     M ← A & X & H
    ///
    /// 🧩 Flags Affected:
    ///     None
    pub(crate) fn sha(cpu: &mut Cpu, bus: &mut dyn Bus) {
        let value = cpu.a & cpu.x & high_byte(cpu.operand.addr);
        bus.write(cpu.operand.addr, value);
    }

    // ================================================================
    //  SHX: Store X & H
    // ================================================================
    /// ⚙️ Operation:
    ///     M ← X & H
    pub(crate) fn shx(cpu: &mut Cpu, bus: &mut dyn Bus) {
        let value = cpu.x & high_byte(cpu.operand.addr);
        bus.write(cpu.operand.addr, value);
    }

    // ================================================================
    //  SHY: Store Y & H
    // ================================================================
    /// ⚙️ Operation:
    ///     M ← Y & H
    pub(crate) fn shy(cpu: &mut Cpu, bus: &mut dyn Bus) {
        let value = cpu.y & high_byte(cpu.operand.addr);
        bus.write(cpu.operand.addr, value);
    }

    // ================================================================
    //  STA: Store Accumulator
    // ================================================================
    /// ⚙️ Operation:
    ///     M ← A
    ///
    /// 🧩 Flags Affected:
    ///     None
    pub(crate) fn sta(cpu: &mut Cpu, bus: &mut dyn Bus) {
        bus.write(cpu.operand.addr, cpu.a);
    }

    // ================================================================
    //  STX: Store X Register
    // ================================================================
    pub(crate) fn stx(cpu: &mut Cpu, bus: &mut dyn Bus) {
        bus.write(cpu.operand.addr, cpu.x);
    }

    // ================================================================
    //  STY: Store Y Register
    // ================================================================
    pub(crate) fn sty(cpu: &mut Cpu, bus: &mut dyn Bus) {
        bus.write(cpu.operand.addr, cpu.y);
    }
}

pub(super) fn high_byte(addr: u16) -> u8 {
    (addr >> 8) as u8
}
