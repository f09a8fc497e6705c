use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use swcf_codecs::codec_by_name;
use swcf_core::{
    ChunkingConfig, Codec, Compressor, Decompressor, DEFAULT_CHUNK_SIZE, DEFAULT_HISTORY_SLOTS,
};

// ── CLI definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "swcf",
    about = "Sliding-Window Compression Format — sequential length-prefixed block streams with cross-block history",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file into an SWCF frame stream
    Compress {
        /// Source file to compress
        input: PathBuf,
        /// Destination frame-stream file
        output: PathBuf,
        /// Codec to use: fast (lz4) | high (zstd) | passthrough
        #[arg(short, long, default_value = "fast")]
        codec: String,
        /// Zstd compression level (1–22, only used with --codec high)
        #[arg(long, default_value_t = 19)]
        zstd_level: i32,
        /// Maximum raw bytes per chunk (default: 524288 = 512 KiB)
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: u32,
        /// Chunk slots of history kept live behind the write cursor
        #[arg(long, default_value_t = DEFAULT_HISTORY_SLOTS)]
        history_slots: u32,
    },
    /// Decompress an SWCF frame stream back to raw bytes
    ///
    /// The stream is headerless: codec and chunk size must match the values
    /// the file was compressed with.
    Decompress {
        /// Source frame-stream file
        input: PathBuf,
        /// Destination file for the raw bytes
        output: PathBuf,
        /// Codec the stream was produced with
        #[arg(short, long, default_value = "fast")]
        codec: String,
        /// Zstd compression level the stream was produced with
        #[arg(long, default_value_t = 19)]
        zstd_level: i32,
        /// Chunk size the stream was produced with
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: u32,
        /// History slot count the stream was produced with
        #[arg(long, default_value_t = DEFAULT_HISTORY_SLOTS)]
        history_slots: u32,
    },
    /// Walk a frame stream without decoding and print its statistics
    Inspect {
        /// Frame-stream file to inspect
        file: PathBuf,
        /// Print every frame's payload size
        #[arg(long)]
        frames: bool,
    },
}

// ── Helpers ────────────────────────────────────────────────────────────────

fn human_bytes(n: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut value = n as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", n)
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}

// ── Subcommand implementations ─────────────────────────────────────────────

fn run_compress(
    input: PathBuf,
    output: PathBuf,
    codec_name: &str,
    zstd_level: i32,
    chunk_size: u32,
    history_slots: u32,
) -> anyhow::Result<()> {
    let codec = codec_by_name(codec_name, zstd_level)?;
    let codec_display = codec.name();
    let config = ChunkingConfig::new(chunk_size, history_slots)
        .context("building chunking configuration")?;

    let session = Compressor::create(&input, &output, codec, config)
        .with_context(|| format!("starting compression of {:?}", input))?;

    let t0 = Instant::now();
    let summary = session.run().with_context(|| format!("compressing {:?}", input))?;
    let elapsed = t0.elapsed();

    let on_disk = std::fs::metadata(&output)?.len();
    let ratio = if on_disk == 0 {
        1.0
    } else {
        summary.raw_bytes as f64 / on_disk as f64
    };

    eprintln!("  codec       : {}", codec_display);
    eprintln!("  chunk size  : {}", human_bytes(chunk_size as u64));
    eprintln!("  chunks      : {}", summary.chunks);
    eprintln!("  raw size    : {}", human_bytes(summary.raw_bytes));
    eprintln!("  compressed  : {}", human_bytes(on_disk));
    eprintln!("  ratio       : {:.2}x", ratio);
    eprintln!(
        "  throughput  : {}/s",
        human_bytes((summary.raw_bytes as f64 / elapsed.as_secs_f64()) as u64)
    );
    eprintln!("  elapsed     : {:.3}s", elapsed.as_secs_f64());
    Ok(())
}

fn run_decompress(
    input: PathBuf,
    output: PathBuf,
    codec_name: &str,
    zstd_level: i32,
    chunk_size: u32,
    history_slots: u32,
) -> anyhow::Result<()> {
    let codec = codec_by_name(codec_name, zstd_level)?;
    let config = ChunkingConfig::new(chunk_size, history_slots)
        .context("building chunking configuration")?;

    let session = Decompressor::create(&input, &output, codec, config)
        .with_context(|| format!("starting decompression of {:?}", input))?;

    let t0 = Instant::now();
    let summary = session
        .run()
        .with_context(|| format!("decompressing {:?}", input))?;
    let elapsed = t0.elapsed();

    eprintln!("  frames      : {}", summary.frames);
    eprintln!("  raw size    : {}", human_bytes(summary.raw_bytes));
    eprintln!(
        "  throughput  : {}/s",
        human_bytes((summary.raw_bytes as f64 / elapsed.as_secs_f64()) as u64)
    );
    eprintln!("  elapsed     : {:.3}s", elapsed.as_secs_f64());
    Ok(())
}

fn run_inspect(file: PathBuf, show_frames: bool) -> anyhow::Result<()> {
    let handle = File::open(&file).with_context(|| format!("opening {:?}", file))?;
    let file_size = handle.metadata()?.len();
    let mut src = BufReader::new(handle);

    let mut sizes: Vec<u32> = Vec::new();
    loop {
        let mut prefix = [0u8; 4];
        match src.read_exact(&mut prefix) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                anyhow::bail!(
                    "truncated stream: ended after {} frames with no end-of-data marker",
                    sizes.len()
                );
            }
            Err(e) => return Err(e.into()),
        }
        let len = u32::from_le_bytes(prefix);
        if len == 0 {
            break;
        }
        let skipped = io::copy(&mut (&mut src).take(len as u64), &mut io::sink())?;
        if skipped != len as u64 {
            anyhow::bail!(
                "truncated stream: frame {} declares {} bytes but only {} are present",
                sizes.len(),
                len,
                skipped
            );
        }
        sizes.push(len);
    }
    let trailing = io::copy(&mut src, &mut io::sink())?;

    let payload_total: u64 = sizes.iter().map(|&s| s as u64).sum();
    let overhead = 4 * (sizes.len() as u64 + 1);

    println!("=== SWCF stream: {:?} ===", file);
    println!();
    println!("  file size   : {}", human_bytes(file_size));
    println!("  frames      : {}", sizes.len());
    println!("  payload     : {}", human_bytes(payload_total));
    println!("  framing     : {} ({} frames + end marker)", human_bytes(overhead), sizes.len());
    if let (Some(min), Some(max)) = (sizes.iter().min(), sizes.iter().max()) {
        println!("  frame min   : {}", human_bytes(*min as u64));
        println!("  frame max   : {}", human_bytes(*max as u64));
        println!(
            "  frame avg   : {}",
            human_bytes(payload_total / sizes.len() as u64)
        );
    }
    if trailing > 0 {
        println!(
            "  WARNING     : {} trailing bytes after the end marker",
            trailing
        );
    }

    if show_frames {
        println!();
        println!("  {:>8}  {:>12}", "frame", "payload");
        println!("  {}", "-".repeat(22));
        for (i, len) in sizes.iter().enumerate() {
            println!("  {:>8}  {:>12}", i, human_bytes(*len as u64));
        }
    }

    Ok(())
}

// ── Entry point ────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Compress {
            input,
            output,
            codec,
            zstd_level,
            chunk_size,
            history_slots,
        } => run_compress(input, output, &codec, zstd_level, chunk_size, history_slots),
        Commands::Decompress {
            input,
            output,
            codec,
            zstd_level,
            chunk_size,
            history_slots,
        } => run_decompress(input, output, &codec, zstd_level, chunk_size, history_slots),
        Commands::Inspect { file, frames } => run_inspect(file, frames),
    }
}
