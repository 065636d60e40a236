/// Layout mirroring type for the PPU nametables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mirroring {
    /// `$2000`/`$2400` share one physical table, `$2800`/`$2C00` the other.
    #[default]
    Horizontal,
    /// `$2000`/`$2800` share one physical table, `$2400`/`$2C00` the other.
    Vertical,
    /// Cartridge supplies its own four nametables.
    FourScreen,
    /// Every logical nametable maps to physical table 0.
    SingleScreenUpper,
    /// Every logical nametable maps to physical table 1.
    SingleScreenLower,
}

impl Mirroring {
    /// Physical 1 KiB bank for each of the four logical nametables.
    pub const fn nametable_banks(self) -> [u8; 4] {
        match self {
            Mirroring::Horizontal => [0, 0, 1, 1],
            Mirroring::Vertical => [0, 1, 0, 1],
            Mirroring::FourScreen => [0, 1, 2, 3],
            Mirroring::SingleScreenUpper => [0, 0, 0, 0],
            Mirroring::SingleScreenLower => [1, 1, 1, 1],
        }
    }
}
