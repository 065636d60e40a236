use crate::{
    bus::Bus,
    cpu::{Cpu, mnemonic::Mnemonic},
};

use super::load::high_byte;

impl Mnemonic {
    /// NV-BDIZC
    /// --------
    ///
    /// SHS - Transfer Accumulator "AND" Index Register X to Stack Pointer then Store Stack Pointer "AND" Hi-Byte In Memory
    /// Operation: A ∧ X → S, S ∧ H → M
    ///
    /// The undocumented SHS instruction ANDs the accumulator with index
    /// register X and stores the result in the stack pointer. The new stack
    /// pointer is then ANDed with the high byte of the effective address and
    /// written to memory. No flags are affected.
    ///
    /// Addressing Mode     | Assembly Language Form | Opcode | No. Bytes | No. Cycles
    /// ------------------- | ------------------------ | ------ | --------- | ----------
    /// Y-Indexed Absolute  | SHS $nnnn,Y              | $9B*   | 3         | 5
    ///
    /// *Undocumented.
    pub(crate) fn shs(cpu: &mut Cpu, bus: &mut dyn Bus) {
        cpu.s = cpu.a & cpu.x;
        let value = cpu.s & high_byte(cpu.operand.addr);
        bus.write(cpu.operand.addr, value);
    }

    /// NV-BDIZC
    /// ✓-----✓-
    ///
    /// TAX - Transfer Accumulator To Index X
    /// Operation: A → X
    ///
    /// Addressing Mode | Assembly Language Form | Opcode | No. Bytes | No. Cycles
    /// --------------- | ------------------------ | ------ | --------- | ----------
    /// Implied         | TAX                      | $AA    | 1         | 2
    pub(crate) fn tax(cpu: &mut Cpu, _: &mut dyn Bus) {
        cpu.x = cpu.a;
        cpu.p.set_zn(cpu.x);
    }

    /// NV-BDIZC
    /// ✓-----✓-
    ///
    /// TAY - Transfer Accumulator To Index Y
    /// Operation: A → Y
    ///
    /// Addressing Mode | Assembly Language Form | Opcode | No. Bytes | No. Cycles
    /// --------------- | ------------------------ | ------ | --------- | ----------
    /// Implied         | TAY                      | $A8    | 1         | 2
    pub(crate) fn tay(cpu: &mut Cpu, _: &mut dyn Bus) {
        cpu.y = cpu.a;
        cpu.p.set_zn(cpu.y);
    }

    /// NV-BDIZC
    /// ✓-----✓-
    ///
    /// TSX - Transfer Stack Pointer To Index X
    /// Operation: S → X
    ///
    /// Addressing Mode | Assembly Language Form | Opcode | No. Bytes | No. Cycles
    /// --------------- | ------------------------ | ------ | --------- | ----------
    /// Implied         | TSX                      | $BA    | 1         | 2
    pub(crate) fn tsx(cpu: &mut Cpu, _: &mut dyn Bus) {
        cpu.x = cpu.s;
        cpu.p.set_zn(cpu.x);
    }

    /// NV-BDIZC
    /// ✓-----✓-
    ///
    /// TXA - Transfer Index X To Accumulator
    /// Operation: X → A
    ///
    /// Addressing Mode | Assembly Language Form | Opcode | No. Bytes | No. Cycles
    /// --------------- | ------------------------ | ------ | --------- | ----------
    /// Implied         | TXA                      | $8A    | 1         | 2
    pub(crate) fn txa(cpu: &mut Cpu, _: &mut dyn Bus) {
        cpu.a = cpu.x;
        cpu.p.set_zn(cpu.a);
    }

    /// NV-BDIZC
    /// --------
    ///
    /// TXS - Transfer Index X To Stack Pointer
    /// Operation: X → S
    ///
    /// Unlike the other transfers, TXS leaves the flags alone.
    ///
    /// Addressing Mode | Assembly Language Form | Opcode | No. Bytes | No. Cycles
    /// --------------- | ------------------------ | ------ | --------- | ----------
    /// Implied         | TXS                      | $9A    | 1         | 2
    pub(crate) fn txs(cpu: &mut Cpu, _: &mut dyn Bus) {
        cpu.s = cpu.x;
    }

    /// NV-BDIZC
    /// ✓-----✓-
    ///
    /// TYA - Transfer Index Y To Accumulator
    /// Operation: Y → A
    ///
    /// Addressing Mode | Assembly Language Form | Opcode | No. Bytes | No. Cycles
    /// --------------- | ------------------------ | ------ | --------- | ----------
    /// Implied         | TYA                      | $98    | 1         | 2
    pub(crate) fn tya(cpu: &mut Cpu, _: &mut dyn Bus) {
        cpu.a = cpu.y;
        cpu.p.set_zn(cpu.a);
    }
}
