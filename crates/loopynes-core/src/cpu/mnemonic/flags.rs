use crate::{
    bus::Bus,
    cpu::{Cpu, mnemonic::Mnemonic, status::Status},
};

impl Mnemonic {
    /// CLC - Clear Carry Flag
    pub(crate) fn clc(cpu: &mut Cpu, _: &mut dyn Bus) {
        cpu.p.remove(Status::CARRY);
    }

    /// CLD - Clear Decimal Mode
    pub(crate) fn cld(cpu: &mut Cpu, _: &mut dyn Bus) {
        cpu.p.remove(Status::DECIMAL);
    }

    /// CLI - Clear Interrupt Disable
    pub(crate) fn cli(cpu: &mut Cpu, _: &mut dyn Bus) {
        cpu.p.remove(Status::INTERRUPT);
    }

    /// CLV - Clear Overflow Flag
    pub(crate) fn clv(cpu: &mut Cpu, _: &mut dyn Bus) {
        cpu.p.remove(Status::OVERFLOW);
    }

    /// SEC - Set Carry Flag
    pub(crate) fn sec(cpu: &mut Cpu, _: &mut dyn Bus) {
        cpu.p.insert(Status::CARRY);
    }

    /// SED - Set Decimal Mode
    ///
    /// The flag is stored and pushed, but the 2A03 never does BCD arithmetic.
    pub(crate) fn sed(cpu: &mut Cpu, _: &mut dyn Bus) {
        cpu.p.insert(Status::DECIMAL);
    }

    /// SEI - Set Interrupt Disable
    pub(crate) fn sei(cpu: &mut Cpu, _: &mut dyn Bus) {
        cpu.p.insert(Status::INTERRUPT);
    }
}
