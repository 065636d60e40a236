use crate::{
    bus::Bus,
    cpu::{Cpu, mnemonic::Mnemonic, status::Status},
};

impl Mnemonic {
    /// NV-BDIZC
    /// ✓-----✓-
    ///
    /// AND - "AND" Memory with Accumulator
    /// Operation: A ∧ M → A
    pub(crate) fn and(cpu: &mut Cpu, bus: &mut dyn Bus) {
        cpu.a &= cpu.read_operand(bus);
        cpu.p.set_zn(cpu.a);
    }

    /// NV-BDIZC
    /// ✓✓----✓-
    ///
    /// BIT - Test Bits in Memory with Accumulator
    /// Operation: A ∧ M, M7 → N, M6 → V
    ///
    /// Z reflects the AND result; N and V are copied straight from the
    /// operand. A is unchanged.
    pub(crate) fn bit(cpu: &mut Cpu, bus: &mut dyn Bus) {
        let m = cpu.read_operand(bus);
        cpu.p.set(Status::ZERO, cpu.a & m == 0);
        cpu.p.set(Status::OVERFLOW, m & 0x40 != 0);
        cpu.p.set(Status::NEGATIVE, m & 0x80 != 0);
    }

    /// NV-BDIZC
    /// ✓-----✓-
    ///
    /// EOR - "Exclusive OR" Memory with Accumulator
    /// Operation: A ⊻ M → A
    pub(crate) fn eor(cpu: &mut Cpu, bus: &mut dyn Bus) {
        cpu.a ^= cpu.read_operand(bus);
        cpu.p.set_zn(cpu.a);
    }

    /// NV-BDIZC
    /// ✓-----✓-
    ///
    /// ORA - "OR" Memory with Accumulator
    /// Operation: A ∨ M → A
    pub(crate) fn ora(cpu: &mut Cpu, bus: &mut dyn Bus) {
        cpu.a |= cpu.read_operand(bus);
        cpu.p.set_zn(cpu.a);
    }
}
