use anyhow::Context;
use clap::{Parser, Subcommand};
use mimosa_rs::constants::{MIMOSA_I_LIMIT_400MA, RAW_BUFFER_LEN};
use mimosa_rs::util::format_hex_compact;
use mimosa_rs::{device, init_logger, log_info};
use mimosa_rs::{DecoderConfig, FrameDecoder, HitMap, TelemetryRecord};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mimosa-cli")]
#[command(about = "CLI tool for MIMOSA readout decoding and board commands")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a raw capture file into a hit map and telemetry record
    Decode {
        /// Capture file of raw readout transfers
        file: PathBuf,
        #[arg(short, long, default_value = "10")]
        frames_per_commit: u32,
        /// MimosaI advisory limit in raw counts (53/68/84 = 300/400/500 mA)
        #[arg(long, default_value_t = MIMOSA_I_LIMIT_400MA)]
        overcurrent_limit: u16,
    },
    /// Encode a status read command
    ReadStatus { addr: u16 },
    /// Encode a register read command
    ReadRegister { addr: u16 },
    /// Encode a register write command
    WriteRegister { addr: u16, val: u16 },
    /// Encode a pulse command for the given line mask
    SendPulse { mask: u16 },
    /// Encode a memory read command
    ReadMemory { addr: u32, n: u32 },
    /// Encode a data FIFO read command
    ReadDatafifo { n: u32 },
    /// Encode a memory write burst from a hex word file
    WriteMemoryFile { addr: u32, file: PathBuf },
}

fn main() -> anyhow::Result<()> {
    init_logger();

    let cli = Cli::parse();

    match cli.command {
        Commands::Decode {
            file,
            frames_per_commit,
            overcurrent_limit,
        } => {
            let data = std::fs::read(&file)
                .with_context(|| format!("reading capture file {}", file.display()))?;

            let mut decoder = FrameDecoder::new(DecoderConfig { overcurrent_limit });
            let mut hits = HitMap::mimosa(frames_per_commit);
            let mut telemetry = TelemetryRecord::new();

            for (idx, buffer) in data.chunks(RAW_BUFFER_LEN).enumerate() {
                let stats = decoder.decode(buffer, &mut hits, &mut telemetry);
                log_info(&format!(
                    "buffer {idx}: {} frames, {} hits, {} commits",
                    stats.frames_completed, stats.hits_recorded, stats.commits
                ));
            }

            println!("telemetry: {}", serde_json::to_string_pretty(&telemetry)?);
            println!("stats: {}", serde_json::to_string_pretty(&decoder.stats())?);
            println!(
                "stable map: {} occupied cells, {} total counts ({} frames pending commit)",
                hits.stable().occupied(),
                hits.stable().total(),
                hits.frames_seen()
            );
        }
        Commands::ReadStatus { addr } => {
            println!("{}", format_hex_compact(&device::read_status(addr)));
        }
        Commands::ReadRegister { addr } => {
            println!("{}", format_hex_compact(&device::read_register(addr)));
        }
        Commands::WriteRegister { addr, val } => {
            println!("{}", format_hex_compact(&device::write_register(addr, val)));
        }
        Commands::SendPulse { mask } => {
            println!("{}", format_hex_compact(&device::send_pulse(mask)));
        }
        Commands::ReadMemory { addr, n } => {
            println!("{}", format_hex_compact(&device::read_memory(addr, n)));
        }
        Commands::ReadDatafifo { n } => {
            println!("{}", format_hex_compact(&device::read_datafifo(n)));
        }
        Commands::WriteMemoryFile { addr, file } => {
            let buf = device::write_memory_file(addr, &file)
                .with_context(|| format!("encoding word file {}", file.display()))?;
            println!("{}", format_hex_compact(&buf));
        }
    }

    Ok(())
}
