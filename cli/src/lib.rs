//! ccfont CLI

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};
use tracing::Level;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::EnvFilter;

use ccfont_core::config::{
    CopyConfig, DefaultPaths, ReportFormat, SystemPaths, ADOBE_DIR_ENV, DEFAULT_CACHE_DIR_NAME,
    OUTPUT_DIR_ENV,
};
use ccfont_core::copy::copy_fonts;

/// CLI entrypoint for ccfont.
#[derive(Debug, Parser)]
#[command(
    name = "ccfont",
    about = "Extracts Adobe Creative Cloud fonts to be used in other programs."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Copy files from the Creative Cloud directory
    Copy(CopyArgs),
}

#[derive(Debug, Args)]
struct CopyArgs {
    /// Perform a dry run and don't copy files. Useful for troubleshooting.
    #[arg(short = 'd', long = "dry", action = ArgAction::SetTrue)]
    dry: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long = "verbose", action = ArgAction::SetTrue)]
    verbose: bool,

    /// Path to the Adobe "CoreSync" directory [default: <app data>/Adobe/CoreSync]
    #[arg(long = "adobe-dir", value_name = "PATH", value_hint = ValueHint::DirPath)]
    adobe_dir: Option<PathBuf>,

    /// Output directory, created if missing [default: <documents>/Adobe/Fonts]
    #[arg(long = "output-dir", value_name = "PATH", value_hint = ValueHint::DirPath)]
    output_dir: Option<PathBuf>,

    /// Name of the cache folder searched for below the Adobe directory
    #[arg(long = "cache-name", value_name = "NAME", default_value = DEFAULT_CACHE_DIR_NAME)]
    cache_name: String,

    /// Follow symlinks while looking for the cache and its fonts
    #[arg(long = "follow-symlinks", action = ArgAction::SetTrue)]
    follow_symlinks: bool,

    /// Stop at the first font that cannot be read or copied
    #[arg(long = "fail-fast", action = ArgAction::SetTrue)]
    fail_fast: bool,

    /// Emit a single JSON array instead of mapping lines
    #[arg(long = "json", action = ArgAction::SetTrue, conflicts_with = "ndjson")]
    json: bool,

    /// Emit newline-delimited JSON instead of mapping lines
    #[arg(long = "ndjson", action = ArgAction::SetTrue)]
    ndjson: bool,
}

/// Parse CLI args and execute the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Copy(args) => run_copy(args, &SystemPaths),
    }
}

fn run_copy(args: CopyArgs, defaults: &impl DefaultPaths) -> Result<()> {
    let config = build_config(&args, defaults)?;
    init_tracing(config.verbose, config.format);

    let summary = copy_fonts(&config, io::stdout()).context("copy aborted")?;

    if !summary.is_success() {
        return Err(anyhow!(
            "{} of {} fonts could not be copied",
            summary.failures.len(),
            summary.processed()
        ));
    }

    Ok(())
}

fn build_config(args: &CopyArgs, defaults: &impl DefaultPaths) -> Result<CopyConfig> {
    let adobe_dir = match &args.adobe_dir {
        Some(dir) => dir.clone(),
        None => defaults.adobe_dir().ok_or_else(|| {
            anyhow!("cannot determine the Adobe directory; pass --adobe-dir or set {ADOBE_DIR_ENV}")
        })?,
    };
    let output_dir = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => defaults.output_dir().ok_or_else(|| {
            anyhow!(
                "cannot determine the output directory; pass --output-dir or set {OUTPUT_DIR_ENV}"
            )
        })?,
    };

    let format = if args.ndjson {
        ReportFormat::Ndjson
    } else if args.json {
        ReportFormat::Json
    } else {
        ReportFormat::Plain
    };

    Ok(CopyConfig::new(adobe_dir, output_dir)
        .dry_run(args.dry)
        .verbose(args.verbose)
        .cache_dir_name(args.cache_name.clone())
        .follow_symlinks(args.follow_symlinks)
        .fail_fast(args.fail_fast)
        .format(format))
}

/// Where log events go: next to the mapping lines for plain output, stderr otherwise.
fn log_writer(format: ReportFormat) -> (BoxMakeWriter, bool) {
    match format {
        ReportFormat::Plain => (
            BoxMakeWriter::new(io::stderr.with_max_level(Level::WARN).or_else(io::stdout)),
            io::stdout().is_terminal(),
        ),
        ReportFormat::Json | ReportFormat::Ndjson => {
            (BoxMakeWriter::new(io::stderr), io::stderr().is_terminal())
        }
    }
}

fn init_tracing(verbose: bool, format: ReportFormat) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let (writer, ansi) = log_writer(format);

    // Keep any subscriber the host process already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .without_time()
        .with_target(false)
        .with_level(false)
        .try_init();
}
