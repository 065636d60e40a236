use crate::bus::Bus;

/// Flat 64 KiB memory used by CPU unit tests.
#[derive(Debug)]
pub(crate) struct MockBus {
    pub(crate) mem: Box<[u8; 0x10000]>,
}

impl Default for MockBus {
    fn default() -> Self {
        Self {
            mem: Box::new([0; 0x10000]),
        }
    }
}

impl MockBus {
    /// Copies `bytes` into memory starting at `addr`.
    pub(crate) fn load(&mut self, addr: u16, bytes: &[u8]) {
        for (offset, &byte) in bytes.iter().enumerate() {
            self.mem[addr.wrapping_add(offset as u16) as usize] = byte;
        }
    }
}

impl Bus for MockBus {
    fn read(&mut self, addr: u16) -> u8 {
        self.mem[addr as usize]
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.mem[addr as usize] = data;
    }

    fn peek(&self, addr: u16) -> u8 {
        self.mem[addr as usize]
    }
}
