use tracing::info;

use crate::{
    bus::Bus,
    cpu::{Cpu, mnemonic::Mnemonic},
};

impl Mnemonic {
    /// N V - B D I Z C
    /// - - - - - - - -
    ///
    /// JAM - Halt the CPU
    /// Operation: Stop execution
    ///
    /// This undocumented instruction stops execution. The processor fetches
    /// nothing further and ignores IRQ and NMI until the next reset.
    ///
    /// Addressing Mode | Assembly Language Form | Opcode | No. Bytes | No. Cycles
    /// --------------- | ---------------------- | ------ | --------- | ----------
    /// Implied         | JAM                    | $02*   | 1         | X
    /// Implied         | JAM                    | $12*   | 1         | X
    /// Implied         | JAM                    | $22*   | 1         | X
    /// Implied         | JAM                    | $32*   | 1         | X
    /// Implied         | JAM                    | $42*   | 1         | X
    /// Implied         | JAM                    | $52*   | 1         | X
    /// Implied         | JAM                    | $62*   | 1         | X
    /// Implied         | JAM                    | $72*   | 1         | X
    /// Implied         | JAM                    | $92*   | 1         | X
    /// Implied         | JAM                    | $B2*   | 1         | X
    /// Implied         | JAM                    | $D2*   | 1         | X
    /// Implied         | JAM                    | $F2*   | 1         | X
    /// *Undocumented.
    pub(crate) fn jam(cpu: &mut Cpu, _: &mut dyn Bus) {
        cpu.halted = true;
        info!(
            pc = format_args!("{:#06X}", cpu.pc.wrapping_sub(1)),
            "cpu halted by JAM"
        );
    }
}
