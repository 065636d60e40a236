/// Power-on options for a [`crate::Nes`] session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NesConfig {
    /// Program counter used instead of the reset vector on power-on and reset.
    /// `Some(0xC000)` starts nestest in its automated mode.
    pub entry_point: Option<u16>,
    /// Initial byte for internal RAM and save RAM.
    pub ram_fill: u8,
}

impl NesConfig {
    pub fn with_entry_point(mut self, entry_point: u16) -> Self {
        self.entry_point = Some(entry_point);
        self
    }

    pub fn with_ram_fill(mut self, value: u8) -> Self {
        self.ram_fill = value;
        self
    }
}
