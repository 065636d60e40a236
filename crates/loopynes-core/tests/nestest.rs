mod common;

use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use common::ROM_ROOT;
use ctor::ctor;
use loopynes_core::{Nes, NesConfig, TraceLine, TraceRecorder};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[ctor]
fn init_tracing() {
    let subscriber = FmtSubscriber::builder()
        .with_file(true)
        .with_line_number(true)
        .with_max_level(Level::INFO)
        .pretty()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
}

/// Runs nestest in automated mode from `$C000` and compares the register
/// state before every instruction with the reference log.
#[test]
#[ignore = "needs vendor/nes-test-roms/other/nestest.{nes,log}, which are not redistributed"]
fn nestest_matches_reference_log() -> Result<()> {
    let dir = Path::new(ROM_ROOT).join("other");
    let rom_path = dir.join("nestest.nes");
    let log_path = dir.join("nestest.log");
    if !rom_path.exists() || !log_path.exists() {
        bail!(
            "nestest files missing: place nestest.nes and nestest.log under {}",
            dir.display()
        );
    }

    let rom = fs::read(&rom_path).with_context(|| format!("reading {}", rom_path.display()))?;
    let log =
        fs::read_to_string(&log_path).with_context(|| format!("reading {}", log_path.display()))?;

    let mut nes = Nes::with_config(NesConfig::default().with_entry_point(0xC000));
    nes.power_on(&rom)?;
    nes.interceptor_mut().add(TraceRecorder::new());

    let mut checked = 0usize;
    for (idx, line) in log.lines().enumerate() {
        let expected = TraceLine::parse_nestest(line)
            .with_context(|| format!("unparsable log line {}: {line}", idx + 1))?;
        if nes.halted() {
            bail!("CPU halted before log line {}", idx + 1);
        }
        nes.step_instruction();
        let recorded = nes
            .interceptor_mut()
            .layer_mut::<TraceRecorder>()
            .map(TraceRecorder::take)
            .unwrap_or_default();
        let Some(actual) = recorded.first() else {
            bail!("no instruction recorded for log line {}", idx + 1);
        };
        if let Some((field, want, got)) = actual.diff(&expected) {
            bail!(
                "line {}: {field} expected {want:X}, got {got:X}\n  expected {expected}\n  actual   {actual}",
                idx + 1
            );
        }
        checked += 1;
    }

    assert!(checked > 8000, "log unexpectedly short: {checked} lines");
    // Official and unofficial opcode sections both report success.
    assert_eq!(nes.peek(0x0002), 0x00);
    assert_eq!(nes.peek(0x0003), 0x00);
    Ok(())
}
