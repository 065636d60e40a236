use bitflags::bitflags;

bitflags! {
    /// Processor status register (P).
    ///
    /// ```text
    /// 7 6 5 4 3 2 1 0
    /// N V U B D I Z C
    /// ```
    ///
    /// `B` and `U` have no storage on the chip. They only exist in the copy of
    /// P that PHP/BRK/interrupts push to the stack.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Status: u8 {
        /// Carry out of bit 7, or "no borrow" after a subtraction or compare.
        const CARRY     = 0b0000_0001;
        const ZERO      = 0b0000_0010;
        /// Masks IRQ. NMI and BRK ignore it.
        const INTERRUPT = 0b0000_0100;
        /// Stored and restored but the 2A03 has no decimal mode.
        const DECIMAL   = 0b0000_1000;
        const BREAK     = 0b0001_0000;
        /// Always reads back as 1.
        const UNUSED    = 0b0010_0000;
        /// Signed overflow.
        const OVERFLOW  = 0b0100_0000;
        const NEGATIVE  = 0b1000_0000;
    }
}

impl Status {
    /// Power-on and reset value: `I` and `U` set.
    pub const RESET: Status = Status::INTERRUPT.union(Status::UNUSED);

    /// Decodes a byte pulled from the stack by PLP/RTI.
    pub fn from_stack(byte: u8) -> Self {
        (Status::from_bits_retain(byte) - Status::BREAK) | Status::UNUSED
    }

    /// Byte pushed by PHP and BRK.
    pub fn to_stack_with_break(self) -> u8 {
        (self | Status::BREAK | Status::UNUSED).bits()
    }

    /// Byte pushed by hardware interrupts (NMI/IRQ).
    pub fn to_stack_without_break(self) -> u8 {
        ((self | Status::UNUSED) - Status::BREAK).bits()
    }

    pub fn set_zn(&mut self, value: u8) {
        self.set(Status::ZERO, value == 0);
        self.set(Status::NEGATIVE, value & 0x80 != 0);
    }

    pub fn carry(self) -> u8 {
        u8::from(self.contains(Status::CARRY))
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::RESET
    }
}
