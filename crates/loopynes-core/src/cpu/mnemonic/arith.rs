//! Arithmetic, comparison and the combined read-modify-write opcodes.
//!
//! The 2A03 has no decimal mode: the D flag can be set and pushed but ADC and
//! SBC always work in binary.

use crate::{
    bus::Bus,
    cpu::{Cpu, mnemonic::Mnemonic, status::Status},
};

impl Cpu {
    /// Binary add with carry into A. SBC reuses it with the operand inverted.
    fn add_with_carry(&mut self, m: u8) {
        let a = self.a;
        let sum = u16::from(a) + u16::from(m) + u16::from(self.p.carry());
        let result = sum as u8;
        self.p.set(Status::CARRY, sum > 0xFF);
        self.p
            .set(Status::OVERFLOW, !(a ^ m) & (a ^ result) & 0x80 != 0);
        self.a = result;
        self.p.set_zn(result);
    }

    fn compare(&mut self, register: u8, m: u8) {
        self.p.set(Status::CARRY, register >= m);
        self.p.set_zn(register.wrapping_sub(m));
    }
}

impl Mnemonic {
    // ================================================================
    //  ADC: Add with Carry
    // ================================================================
    /// 🕹️ Purpose:
    ///     Adds memory and the carry flag to the accumulator.
    ///
    /// ⚙️ Operation:
    ///     A ← A + M + C
    ///
    /// 🧩 Flags Affected:
    ///     N, V, Z, C
    pub(crate) fn adc(cpu: &mut Cpu, bus: &mut dyn Bus) {
        let m = cpu.read_operand(bus);
        cpu.add_with_carry(m);
    }

    // ================================================================
    //  ANC: AND then copy N into C
    // ================================================================
    /// ⚙️ Operation:
    ///     A ← A & M, C ← N
    pub(crate) fn anc(cpu: &mut Cpu, bus: &mut dyn Bus) {
        cpu.a &= cpu.read_operand(bus);
        cpu.p.set_zn(cpu.a);
        cpu.p.set(Status::CARRY, cpu.p.contains(Status::NEGATIVE));
    }

    // ================================================================
    //  ARR: AND then Rotate Right
    // ================================================================
    /// 🕹️ Purpose:
    ///     ANDs the accumulator with memory and rotates the result right
    ///     through carry.
    ///
    /// ⚙️ Operation:
    ///     A ← A & M, C → [7..0] → C
    ///
    /// 🧩 Flags Affected:
    ///     N, Z, C
    pub(crate) fn arr(cpu: &mut Cpu, bus: &mut dyn Bus) {
        let value = cpu.a & cpu.read_operand(bus);
        cpu.a = (value >> 1) | (cpu.p.carry() << 7);
        cpu.p.set(Status::CARRY, value & 0x01 != 0);
        cpu.p.set_zn(cpu.a);
    }

    // ================================================================
    //  ASR: AND then Logical Shift Right (a.k.a. ALR)
    // ================================================================
    /// ⚙️ Operation:
    ///     A ← (A & M) >> 1
    ///
    /// 🧩 Flags Affected:
    ///     N, Z, C
    pub(crate) fn asr(cpu: &mut Cpu, bus: &mut dyn Bus) {
        let value = cpu.a & cpu.read_operand(bus);
        cpu.p.set(Status::CARRY, value & 0x01 != 0);
        cpu.a = value >> 1;
        cpu.p.set_zn(cpu.a);
    }

    // ================================================================
    //  CMP: Compare Accumulator
    // ================================================================
    /// ⚙️ Operation:
    ///     A - M, C ← A ≥ M
    ///
    /// 🧩 Flags Affected:
    ///     N, Z, C
    pub(crate) fn cmp(cpu: &mut Cpu, bus: &mut dyn Bus) {
        let m = cpu.read_operand(bus);
        cpu.compare(cpu.a, m);
    }

    // ================================================================
    //  CPX: Compare X Register
    // ================================================================
    pub(crate) fn cpx(cpu: &mut Cpu, bus: &mut dyn Bus) {
        let m = cpu.read_operand(bus);
        cpu.compare(cpu.x, m);
    }

    // ================================================================
    //  CPY: Compare Y Register
    // ================================================================
    pub(crate) fn cpy(cpu: &mut Cpu, bus: &mut dyn Bus) {
        let m = cpu.read_operand(bus);
        cpu.compare(cpu.y, m);
    }

    // ================================================================
    //  DCP: Decrement Memory then Compare
    // ================================================================
    /// ⚙️ Operation:
    ///     M ← M - 1, A - M
    ///
    /// 🧩 Flags Affected:
    ///     N, Z, C
    pub(crate) fn dcp(cpu: &mut Cpu, bus: &mut dyn Bus) {
        let m = cpu.decrement_operand(bus);
        cpu.compare(cpu.a, m);
    }

    // ================================================================
    //  ISC: Increment Memory then Subtract (a.k.a. ISB)
    // ================================================================
    /// ⚙️ Operation:
    ///     M ← M + 1, A ← A - M - !C
    ///
    /// 🧩 Flags Affected:
    ///     N, V, Z, C
    pub(crate) fn isc(cpu: &mut Cpu, bus: &mut dyn Bus) {
        let m = cpu.increment_operand(bus);
        cpu.add_with_carry(!m);
    }

    // ================================================================
    //  RLA: Rotate Left then AND
    // ================================================================
    /// ⚙️ Operation:
    ///     M ← ROL M, A ← A & M
    pub(crate) fn rla(cpu: &mut Cpu, bus: &mut dyn Bus) {
        let m = cpu.rotate_left(bus);
        cpu.a &= m;
        cpu.p.set_zn(cpu.a);
    }

    // ================================================================
    //  RRA: Rotate Right then Add with Carry
    // ================================================================
    /// ⚙️ Operation:
    ///     M ← ROR M, A ← A + M + C
    ///
    /// The carry consumed by the add is the one shifted out of M.
    pub(crate) fn rra(cpu: &mut Cpu, bus: &mut dyn Bus) {
        let m = cpu.rotate_right(bus);
        cpu.add_with_carry(m);
    }

    // ================================================================
    //  SBC: Subtract with Borrow
    // ================================================================
    /// 🕹️ Purpose:
    ///     Subtracts memory and the inverted carry from the accumulator.
    ///     Opcode `$EB` is an undocumented alias of `$E9`.
    ///
    /// ⚙️ Operation:
    ///     A ← A - M - !C
    ///
    /// 🧩 Flags Affected:
    ///     N, V, Z, C
    pub(crate) fn sbc(cpu: &mut Cpu, bus: &mut dyn Bus) {
        let m = cpu.read_operand(bus);
        cpu.add_with_carry(!m);
    }

    // ================================================================
    //  SBX: (A & X) minus immediate into X (a.k.a. AXS)
    // ================================================================
    /// ⚙️ Operation:
    ///     X ← (A & X) - M, C ← N
    pub(crate) fn sbx(cpu: &mut Cpu, bus: &mut dyn Bus) {
        let m = cpu.read_operand(bus);
        cpu.x = (cpu.a & cpu.x).wrapping_sub(m);
        cpu.p.set_zn(cpu.x);
        cpu.p.set(Status::CARRY, cpu.p.contains(Status::NEGATIVE));
    }

    // ================================================================
    //  SLO: Shift Left then OR
    // ================================================================
    /// ⚙️ Operation:
    ///     M ← ASL M, A ← A | M
    pub(crate) fn slo(cpu: &mut Cpu, bus: &mut dyn Bus) {
        let m = cpu.shift_left(bus);
        cpu.a |= m;
        cpu.p.set_zn(cpu.a);
    }

    // ================================================================
    //  SRE: Shift Right then EOR
    // ================================================================
    /// ⚙️ Operation:
    ///     M ← LSR M, A ← A ^ M
    pub(crate) fn sre(cpu: &mut Cpu, bus: &mut dyn Bus) {
        let m = cpu.shift_right(bus);
        cpu.a ^= m;
        cpu.p.set_zn(cpu.a);
    }

    // ================================================================
    //  XAA: X AND immediate into A (a.k.a. ANE)
    // ================================================================
    /// ⚙️ Operation:
    ///     A ← X & M
    pub(crate) fn xaa(cpu: &mut Cpu, bus: &mut dyn Bus) {
        cpu.a = cpu.x & cpu.read_operand(bus);
        cpu.p.set_zn(cpu.a);
    }
}
