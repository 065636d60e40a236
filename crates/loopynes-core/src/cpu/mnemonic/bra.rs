use crate::{
    bus::Bus,
    cpu::{Cpu, addressing::crosses_page, mnemonic::Mnemonic, status::Status},
};

impl Cpu {
    /// Takes the branch when `condition` holds: one extra cycle, two when the
    /// target sits on another page than the following instruction.
    fn branch_if(&mut self, condition: bool) {
        if !condition {
            return;
        }
        let target = self.pc.wrapping_add(self.operand.addr);
        self.cycles += if crosses_page(self.pc, target) { 2 } else { 1 };
        self.pc = target;
    }
}

impl Mnemonic {
    // ================================================================
    //  BCC - Branch if Carry Clear
    // ================================================================
    /// 🕹️ Purpose:
    ///     Branches to a relative address if the Carry flag (C) is clear.
    ///
    /// ⚙️ Operation:
    ///     If C == 0 → PC ← PC + offset
    ///
    /// 🧩 Flags Affected:
    ///     None
    pub(crate) fn bcc(cpu: &mut Cpu, _: &mut dyn Bus) {
        cpu.branch_if(!cpu.p.contains(Status::CARRY));
    }

    // ================================================================
    //  BCS - Branch if Carry Set
    // ================================================================
    pub(crate) fn bcs(cpu: &mut Cpu, _: &mut dyn Bus) {
        cpu.branch_if(cpu.p.contains(Status::CARRY));
    }

    // ================================================================
    //  BEQ - Branch if Equal (Z set)
    // ================================================================
    pub(crate) fn beq(cpu: &mut Cpu, _: &mut dyn Bus) {
        cpu.branch_if(cpu.p.contains(Status::ZERO));
    }

    // ================================================================
    //  BMI - Branch if Minus (N set)
    // ================================================================
    pub(crate) fn bmi(cpu: &mut Cpu, _: &mut dyn Bus) {
        cpu.branch_if(cpu.p.contains(Status::NEGATIVE));
    }

    // ================================================================
    //  BNE - Branch if Not Equal (Z clear)
    // ================================================================
    pub(crate) fn bne(cpu: &mut Cpu, _: &mut dyn Bus) {
        cpu.branch_if(!cpu.p.contains(Status::ZERO));
    }

    // ================================================================
    //  BPL - Branch if Plus (N clear)
    // ================================================================
    pub(crate) fn bpl(cpu: &mut Cpu, _: &mut dyn Bus) {
        cpu.branch_if(!cpu.p.contains(Status::NEGATIVE));
    }

    // ================================================================
    //  BVC - Branch if Overflow Clear
    // ================================================================
    pub(crate) fn bvc(cpu: &mut Cpu, _: &mut dyn Bus) {
        cpu.branch_if(!cpu.p.contains(Status::OVERFLOW));
    }

    // ================================================================
    //  BVS - Branch if Overflow Set
    // ================================================================
    pub(crate) fn bvs(cpu: &mut Cpu, _: &mut dyn Bus) {
        cpu.branch_if(cpu.p.contains(Status::OVERFLOW));
    }
}
