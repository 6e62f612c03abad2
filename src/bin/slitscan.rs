use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;

use slitscan::{CacheRequest, RemapOpts, RemapSession, RemapThreading, SysinfoProbe};

#[derive(Parser, Debug)]
#[command(
    name = "slitscan",
    version,
    about = "Time-space remap (slit-scan transpose) of an image frame sequence"
)]
struct Cli {
    /// Input frame directory.
    #[arg(short = 'i', long = "input-dir")]
    input_dir: PathBuf,

    /// Output frame directory (created if missing).
    #[arg(short = 'o', long = "output-dir")]
    output_dir: PathBuf,

    /// Input file name glob pattern.
    #[arg(short = 'p', long = "pattern")]
    pattern: Option<String>,

    /// Starting output column index (0-based).
    #[arg(short = 's', long = "start-index", default_value_t = 0)]
    start_index: u32,

    /// Hog mode: keep decoded frames in memory. Repeat to skip the
    /// free-memory check.
    #[arg(short = 'M', long = "memory-hog", action = clap::ArgAction::Count)]
    memory_hog: u8,

    /// Build output frames in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Show per-column progress.
    #[arg(short = 'v', long, default_value_t = false)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    std::fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("create output dir '{}'", cli.output_dir.display()))?;

    let opts = RemapOpts {
        input_dir: cli.input_dir,
        output_dir: cli.output_dir.clone(),
        pattern: cli.pattern,
        start_index: cli.start_index,
        cache: match cli.memory_hog {
            0 => CacheRequest::Off,
            1 => CacheRequest::On,
            _ => CacheRequest::Force,
        },
        threading: RemapThreading {
            parallel: cli.parallel,
            threads: cli.threads,
        },
    };

    let session = RemapSession::prepare(opts, &SysinfoProbe)?;
    let stats = session.run()?;

    eprintln!(
        "wrote {} frames to {}",
        stats.frames_written,
        cli.output_dir.display()
    );
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}
