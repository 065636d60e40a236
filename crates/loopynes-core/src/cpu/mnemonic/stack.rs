//! Stack push and pull instructions.
//!
//! The stack lives in page one (`$0100-$01FF`) and grows downward. A push
//! writes at `$0100 | S` and then decrements S; a pull increments S first and
//! reads from the new slot. S wraps inside the page in both directions.
//!
//! | Instruction | Opcode | Cycles |
//! |-------------|--------|--------|
//! | PHA         | `$48`  | 3      |
//! | PHP         | `$08`  | 3      |
//! | PLA         | `$68`  | 4      |
//! | PLP         | `$28`  | 4      |

use crate::{
    bus::Bus,
    cpu::{Cpu, mnemonic::Mnemonic, status::Status},
};

impl Mnemonic {
    /// NV-BDIZC
    /// --------
    ///
    /// PHA - Push Accumulator On Stack
    /// Operation: A↓
    pub(crate) fn pha(cpu: &mut Cpu, bus: &mut dyn Bus) {
        cpu.push(bus, cpu.a);
    }

    /// NV-BDIZC
    /// --------
    ///
    /// PHP - Push Processor Status On Stack
    /// Operation: P↓
    ///
    /// The pushed copy always has the break (B) and unused (U) bits set.
    pub(crate) fn php(cpu: &mut Cpu, bus: &mut dyn Bus) {
        cpu.push(bus, cpu.p.to_stack_with_break());
    }

    /// NV-BDIZC
    /// ✓-----✓-
    ///
    /// PLA - Pull Accumulator From Stack
    /// Operation: A↑
    pub(crate) fn pla(cpu: &mut Cpu, bus: &mut dyn Bus) {
        cpu.a = cpu.pop(bus);
        cpu.p.set_zn(cpu.a);
    }

    /// NV-BDIZC
    /// ✓✓--✓✓✓✓
    ///
    /// PLP - Pull Processor Status From Stack
    /// Operation: P↑
    ///
    /// B is discarded and U forced on, they do not exist as real flip-flops.
    pub(crate) fn plp(cpu: &mut Cpu, bus: &mut dyn Bus) {
        cpu.p = Status::from_stack(cpu.pop(bus));
    }
}
