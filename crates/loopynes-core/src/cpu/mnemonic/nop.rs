use crate::{
    bus::Bus,
    cpu::{Cpu, mnemonic::Mnemonic},
};

impl Mnemonic {
    /// NOP - No Operation
    ///
    /// Covers `$EA` and the undocumented multi-byte variants. The operand
    /// bytes are consumed by addressing and the indexed forms still pay the
    /// page-cross cycle, but the operand itself is never read.
    pub(crate) fn nop(_: &mut Cpu, _: &mut dyn Bus) {}
}
