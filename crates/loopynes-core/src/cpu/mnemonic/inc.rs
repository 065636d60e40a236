use crate::{
    bus::Bus,
    cpu::{Cpu, mnemonic::Mnemonic},
};

impl Cpu {
    /// Shared body of DEC and DCP. Returns the value written back.
    pub(super) fn decrement_operand(&mut self, bus: &mut dyn Bus) -> u8 {
        let result = self.read_operand(bus).wrapping_sub(1);
        self.p.set_zn(result);
        self.write_operand(bus, result);
        result
    }

    /// Shared body of INC and ISC.
    pub(super) fn increment_operand(&mut self, bus: &mut dyn Bus) -> u8 {
        let result = self.read_operand(bus).wrapping_add(1);
        self.p.set_zn(result);
        self.write_operand(bus, result);
        result
    }
}

impl Mnemonic {
    /// NV-BDIZC
    /// ✓-----✓-
    ///
    /// DEC - Decrement Memory By One
    /// Operation: M - 1 → M
    pub(crate) fn dec(cpu: &mut Cpu, bus: &mut dyn Bus) {
        cpu.decrement_operand(bus);
    }

    /// DEX - Decrement Index Register X By One
    pub(crate) fn dex(cpu: &mut Cpu, _: &mut dyn Bus) {
        cpu.x = cpu.x.wrapping_sub(1);
        cpu.p.set_zn(cpu.x);
    }

    /// DEY - Decrement Index Register Y By One
    pub(crate) fn dey(cpu: &mut Cpu, _: &mut dyn Bus) {
        cpu.y = cpu.y.wrapping_sub(1);
        cpu.p.set_zn(cpu.y);
    }

    /// NV-BDIZC
    /// ✓-----✓-
    ///
    /// INC - Increment Memory By One
    /// Operation: M + 1 → M
    pub(crate) fn inc(cpu: &mut Cpu, bus: &mut dyn Bus) {
        cpu.increment_operand(bus);
    }

    /// INX - Increment Index Register X By One
    pub(crate) fn inx(cpu: &mut Cpu, _: &mut dyn Bus) {
        cpu.x = cpu.x.wrapping_add(1);
        cpu.p.set_zn(cpu.x);
    }

    /// INY - Increment Index Register Y By One
    pub(crate) fn iny(cpu: &mut Cpu, _: &mut dyn Bus) {
        cpu.y = cpu.y.wrapping_add(1);
        cpu.p.set_zn(cpu.y);
    }
}
