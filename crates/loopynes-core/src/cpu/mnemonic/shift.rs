use crate::{
    bus::Bus,
    cpu::{Cpu, mnemonic::Mnemonic, status::Status},
};

impl Cpu {
    /// Shared body of ASL and SLO. Returns the value written back.
    pub(super) fn shift_left(&mut self, bus: &mut dyn Bus) -> u8 {
        let value = self.read_operand(bus);
        let result = value << 1;
        self.p.set(Status::CARRY, value & 0x80 != 0);
        self.p.set_zn(result);
        self.write_operand(bus, result);
        result
    }

    /// Shared body of LSR and SRE.
    pub(super) fn shift_right(&mut self, bus: &mut dyn Bus) -> u8 {
        let value = self.read_operand(bus);
        let result = value >> 1;
        self.p.set(Status::CARRY, value & 0x01 != 0);
        self.p.set_zn(result);
        self.write_operand(bus, result);
        result
    }

    /// Shared body of ROL and RLA.
    pub(super) fn rotate_left(&mut self, bus: &mut dyn Bus) -> u8 {
        let value = self.read_operand(bus);
        let result = (value << 1) | self.p.carry();
        self.p.set(Status::CARRY, value & 0x80 != 0);
        self.p.set_zn(result);
        self.write_operand(bus, result);
        result
    }

    /// Shared body of ROR and RRA.
    pub(super) fn rotate_right(&mut self, bus: &mut dyn Bus) -> u8 {
        let value = self.read_operand(bus);
        let result = (value >> 1) | (self.p.carry() << 7);
        self.p.set(Status::CARRY, value & 0x01 != 0);
        self.p.set_zn(result);
        self.write_operand(bus, result);
        result
    }
}

impl Mnemonic {
    // ================================================================
    //  ASL: Arithmetic Shift Left
    // ================================================================
    /// 🕹️ Purpose:
    ///     Shifts A or memory one bit left. Bit 0 becomes 0.
    ///
    /// ⚙️ Operation:
    ///     C ← [7..0] ← 0
    ///
    /// 🧩 Flags Affected:
    ///     N, Z, C
    pub(crate) fn asl(cpu: &mut Cpu, bus: &mut dyn Bus) {
        cpu.shift_left(bus);
    }

    // ================================================================
    //  LSR: Logical Shift Right
    // ================================================================
    /// ⚙️ Operation:
    ///     0 → [7..0] → C
    ///
    /// 🧩 Flags Affected:
    ///     N (always cleared), Z, C
    pub(crate) fn lsr(cpu: &mut Cpu, bus: &mut dyn Bus) {
        cpu.shift_right(bus);
    }

    // ================================================================
    //  ROL: Rotate Left through Carry
    // ================================================================
    /// ⚙️ Operation:
    ///     C ← [7..0] ← C
    ///
    /// 🧩 Flags Affected:
    ///     N, Z, C
    pub(crate) fn rol(cpu: &mut Cpu, bus: &mut dyn Bus) {
        cpu.rotate_left(bus);
    }

    // ================================================================
    //  ROR: Rotate Right through Carry
    // ================================================================
    /// ⚙️ Operation:
    ///     C → [7..0] → C
    ///
    /// 🧩 Flags Affected:
    ///     N, Z, C
    pub(crate) fn ror(cpu: &mut Cpu, bus: &mut dyn Bus) {
        cpu.rotate_right(bus);
    }
}
