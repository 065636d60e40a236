use std::{
    fs,
    num::ParseIntError,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use loopynes_core::{
    Nes, NesConfig, TraceLine, TraceRecorder,
    ppu::{SCREEN_HEIGHT, SCREEN_WIDTH},
};
use tracing::{Level, info, trace, warn};
use tracing_subscriber::FmtSubscriber;

/// Headless NES CPU/PPU core runner
#[derive(Parser, Debug)]
#[command(name = "loopynes", author, version, about, long_about = None)]
struct Args {
    /// Path to the iNES ROM file
    rom: PathBuf,

    /// Program counter to start from instead of the reset vector (hex, e.g. C000)
    #[arg(long, value_parser = parse_hex_u16)]
    start_pc: Option<u16>,

    /// Compare execution against a nestest-style reference log
    #[arg(long)]
    nestest_log: Option<PathBuf>,

    /// Stop the log comparison after this many instructions
    #[arg(long)]
    max_instructions: Option<usize>,

    /// Frames to run when not comparing a log
    #[arg(long, default_value_t = 1)]
    frames: u32,

    /// Write the rendered background as a binary PPM
    #[arg(long)]
    dump_ppm: Option<PathBuf>,

    /// Nametable rendered for --dump-ppm
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=3))]
    nametable: u8,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

fn parse_hex_u16(value: &str) -> Result<u16, ParseIntError> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .or_else(|| value.strip_prefix('$'))
        .unwrap_or(value);
    u16::from_str_radix(digits, 16)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let rom = fs::read(&args.rom).with_context(|| format!("reading {}", args.rom.display()))?;

    match &args.nestest_log {
        Some(log_path) => run_trace(&args, &rom, log_path),
        None => run_frames(&args, &rom),
    }
}

fn run_trace(args: &Args, rom: &[u8], log_path: &Path) -> Result<()> {
    let log = fs::read_to_string(log_path)
        .with_context(|| format!("reading {}", log_path.display()))?;
    let expected: Vec<(usize, TraceLine)> = log
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| TraceLine::parse_nestest(line).map(|t| (idx + 1, t)))
        .collect();
    let Some((_, first)) = expected.first() else {
        bail!("{} holds no parsable trace lines", log_path.display());
    };

    // nestest runs unattended from $C000, so default to wherever the log starts.
    let entry_point = args.start_pc.unwrap_or(first.pc);
    let mut nes = Nes::with_config(NesConfig::default().with_entry_point(entry_point));
    nes.power_on(rom)
        .with_context(|| format!("powering on with {}", args.rom.display()))?;
    nes.interceptor_mut().add(TraceRecorder::new());

    let limit = args.max_instructions.unwrap_or(usize::MAX);
    let mut compared = 0usize;
    for (line_no, want) in expected.iter().take(limit) {
        if nes.halted() {
            bail!(
                "CPU halted at {:04X} before log line {line_no}",
                nes.cpu().pc()
            );
        }
        nes.step_instruction();
        let recorded = nes
            .interceptor_mut()
            .layer_mut::<TraceRecorder>()
            .map(TraceRecorder::take)
            .unwrap_or_default();
        let Some(got) = recorded.first() else {
            bail!("no instruction executed for log line {line_no}");
        };
        let (instruction, _) = nes.disassemble(got.pc);
        trace!(line = line_no, "{got}  {instruction}");
        if let Some((field, want_value, got_value)) = got.diff(want) {
            println!("instruction: {instruction}");
            println!("expected:    {want}");
            println!("actual:      {got}");
            bail!(
                "mismatch at log line {line_no}: {field} expected {want_value:X}, got {got_value:X}"
            );
        }
        compared += 1;
    }

    info!(instructions = compared, "trace matched");
    println!("Trace matched {compared} instruction(s)");
    Ok(())
}

fn run_frames(args: &Args, rom: &[u8]) -> Result<()> {
    let mut nes = Nes::with_config(NesConfig {
        entry_point: args.start_pc,
        ..NesConfig::default()
    });
    nes.power_on(rom)
        .with_context(|| format!("powering on with {}", args.rom.display()))?;

    for frame in 0..args.frames {
        let cycles = nes.run_frame();
        if nes.halted() {
            warn!(frame, pc = format_args!("{:04X}", nes.cpu().pc()), "CPU halted");
            break;
        }
        info!(frame, cycles, "frame done");
    }
    println!(
        "Ran {} CPU cycles, PC={:04X}, frame {}",
        nes.total_cycles(),
        nes.cpu().pc(),
        nes.ppu().frame()
    );

    if let Some(path) = &args.dump_ppm {
        let rgb = nes.render_background(args.nametable).to_rgb();
        let mut ppm = format!("P6 {SCREEN_WIDTH} {SCREEN_HEIGHT} 255\n").into_bytes();
        ppm.extend_from_slice(&rgb);
        fs::write(path, ppm).with_context(|| format!("writing {}", path.display()))?;
        println!("Wrote nametable {} to {}", args.nametable, path.display());
    }
    Ok(())
}
