use std::fmt::Debug;

use crate::memory;

pub mod cpu;
#[cfg(test)]
pub(crate) mod mock;
pub mod ppu;

pub use cpu::CpuBus;
pub use ppu::PpuBus;

/// Expose the CPU stack page start address for stack helpers.
pub(crate) const STACK_ADDR: u16 = memory::cpu::STACK_PAGE_START;

/// Byte-addressed view of a 16-bit address space.
///
/// Every address is valid: implementations mask or mirror instead of failing.
pub trait Bus: Debug {
    fn read(&mut self, addr: u16) -> u8;

    fn write(&mut self, addr: u16, data: u8);

    /// Side-effect-free read used by diagnostics. Register windows that would
    /// change state on a real read report their open-bus value instead.
    fn peek(&self, addr: u16) -> u8;

    /// Little-endian word read from `addr` and `addr + 1`.
    fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr);
        let hi = self.read(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    /// Little-endian word write to `addr` and `addr + 1`.
    fn write_word(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write(addr, lo);
        self.write(addr.wrapping_add(1), hi);
    }

    fn peek_word(&self, addr: u16) -> u16 {
        u16::from_le_bytes([self.peek(addr), self.peek(addr.wrapping_add(1))])
    }
}

// Allow mutable references to Bus implementors (including trait objects) to be used
// wherever a Bus is expected.
impl<T: Bus + ?Sized> Bus for &mut T {
    fn read(&mut self, addr: u16) -> u8 {
        (**self).read(addr)
    }

    fn write(&mut self, addr: u16, data: u8) {
        (**self).write(addr, data)
    }

    fn peek(&self, addr: u16) -> u8 {
        (**self).peek(addr)
    }
}
