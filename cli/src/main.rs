//! tcopy - Concurrent tree copy
//!
//! A small command-line front end for treecopy.

use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt};
use treecopy::{CopyBuilder, CopyStats, DEFAULT_PARALLEL};

/// tcopy - Copy a file or a directory tree concurrently
///
/// An existing destination is always overwritten. Files that fail to copy are
/// reported together once the rest of the tree has been copied.
///
/// Usage:
///   tcopy SOURCE DEST
#[derive(Parser, Debug)]
#[command(name = "tcopy", version, about, long_about = None)]
struct Args {
    /// Source file or directory
    source: PathBuf,

    /// Destination path
    dest: PathBuf,

    /// Number of parallel copy workers
    #[arg(short = 'j', long, default_value_t = DEFAULT_PARALLEL)]
    jobs: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only print errors
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("copying files: {0}")]
    Copy(#[from] treecopy::Error),
}

type CliResult<T> = std::result::Result<T, CliError>;

fn main() {
    let args = Args::parse();
    init_logging(&args);
    tracing::debug!("Parsed CLI arguments: {:?}", args);

    match run(&args) {
        Ok(stats) => {
            if !args.quiet {
                print_summary(&stats);
            }
        }
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    }
}

fn run(args: &Args) -> CliResult<CopyStats> {
    let stats = CopyBuilder::new(&args.source, &args.dest)
        .parallel(args.jobs)
        .clobber()
        .run()?;
    Ok(stats)
}

/// Log to stderr; `RUST_LOG` takes precedence over the flags.
fn init_logging(args: &Args) {
    let log_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn print_summary(stats: &CopyStats) {
    if stats.files_copied == 0 {
        println!("Nothing to copy");
        return;
    }
    println!(
        "Copied {} files ({}) in {:.2?}",
        stats.files_copied,
        format_bytes(stats.bytes_copied),
        stats.duration
    );
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
