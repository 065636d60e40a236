use core::fmt;

use crate::{bus::Bus, cpu::Cpu, interceptor::Interceptor};

/// Register snapshot taken before an instruction executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceLine {
    pub pc: u16,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub p: u8,
    pub sp: u8,
    pub cycles: u64,
}

impl TraceLine {
    pub fn capture(cpu: &Cpu) -> Self {
        Self {
            pc: cpu.pc(),
            a: cpu.a(),
            x: cpu.x(),
            y: cpu.y(),
            p: cpu.p(),
            sp: cpu.s(),
            cycles: cpu.total_cycles(),
        }
    }

    /// Reads one line of the nestest reference log.
    ///
    /// ```text
    /// C000  4C F5 C5  JMP $C5F5                       A:00 X:00 Y:00 P:24 SP:FD PPU:  0, 21 CYC:7
    /// ```
    pub fn parse_nestest(line: &str) -> Option<Self> {
        let hex8 = |col: usize| {
            line.get(col..col + 2)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
        };
        let pc = line.get(0..4).and_then(|s| u16::from_str_radix(s, 16).ok())?;
        let cycles = line.get(90..)?.trim().parse().ok()?;
        Some(Self {
            pc,
            a: hex8(50)?,
            x: hex8(55)?,
            y: hex8(60)?,
            p: hex8(65)?,
            sp: hex8(71)?,
            cycles,
        })
    }

    /// First field that differs from `expected`, as `(name, expected, actual)`.
    pub fn diff(&self, expected: &TraceLine) -> Option<(&'static str, u64, u64)> {
        let fields = [
            ("PC", u64::from(expected.pc), u64::from(self.pc)),
            ("A", u64::from(expected.a), u64::from(self.a)),
            ("X", u64::from(expected.x), u64::from(self.x)),
            ("Y", u64::from(expected.y), u64::from(self.y)),
            ("P", u64::from(expected.p), u64::from(self.p)),
            ("SP", u64::from(expected.sp), u64::from(self.sp)),
            ("CYC", expected.cycles, self.cycles),
        ];
        fields.into_iter().find(|(_, want, got)| want != got)
    }
}

impl fmt::Display for TraceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04X}  A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            self.pc, self.a, self.x, self.y, self.p, self.sp, self.cycles
        )
    }
}

/// Interceptor layer that records a [`TraceLine`] before every instruction.
#[derive(Debug, Default)]
pub struct TraceRecorder {
    lines: Vec<TraceLine>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[TraceLine] {
        &self.lines
    }

    /// Hands over the recorded lines, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<TraceLine> {
        std::mem::take(&mut self.lines)
    }
}

impl Interceptor for TraceRecorder {
    fn debug(&mut self, cpu: &Cpu, _bus: &dyn Bus) {
        self.lines.push(TraceLine::capture(cpu));
    }
}
