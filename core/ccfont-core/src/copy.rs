//! Copy pipeline: locate, prepare, enumerate, resolve, copy (ccfont-core)

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{CopyConfig, TARGET_EXTENSION};
use crate::discovery::{locate_cache_dir, CacheDiscovery, FontDiscovery, FontSourceRef};
use crate::error::{CopyError, Result};
use crate::names::resolve_family_name;
use crate::output::{emit_record, finish_report};

/// Characters that cannot appear in a file name on at least one common platform.
static UNSAFE_FILE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*\x00-\x1F]"#).expect("static regex"));

/// DOS device names Windows refuses as a file stem, with or without extension.
static RESERVED_STEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(con|prn|aux|nul|com[0-9]|lpt[0-9])(\.|$)").expect("static regex")
});

/// Step event: `info` when the run is verbose, `debug` otherwise.
macro_rules! step {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            tracing::info!($($arg)+)
        } else {
            tracing::debug!($($arg)+)
        }
    };
}

/// One font that made it through name resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyRecord {
    pub source: PathBuf,
    /// Obfuscated name of the file in the cache.
    pub file_name: String,
    pub family_name: String,
    /// File name written in the output directory.
    pub output_name: String,
    pub destination: PathBuf,
    /// False on dry runs.
    pub copied: bool,
}

/// A font that could not be extracted.
#[derive(Debug)]
pub struct FileFailure {
    pub source: PathBuf,
    pub error: CopyError,
}

#[derive(Debug)]
pub struct CopySummary {
    pub cache_dir: PathBuf,
    pub records: Vec<CopyRecord>,
    pub failures: Vec<FileFailure>,
}

impl CopySummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn processed(&self) -> usize {
        self.records.len() + self.failures.len()
    }
}

/// What [`prepare_output_dir`] found or did.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputDirState {
    Existing,
    Created,
    /// Missing, left alone because of a dry run.
    WouldCreate,
}

/// Make sure `path` exists, creating parents as needed unless `dry_run` is set.
pub fn prepare_output_dir(path: &Path, dry_run: bool) -> Result<OutputDirState> {
    if path.is_dir() {
        return Ok(OutputDirState::Existing);
    }

    if dry_run {
        return Ok(OutputDirState::WouldCreate);
    }

    fs::create_dir_all(path).map_err(|source| CopyError::OutputDirectoryCreateFailed {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "created output directory");
    Ok(OutputDirState::Created)
}

/// File name for a family: unsafe characters become `_`, then `.otf` is appended.
///
/// The extension is appended rather than substituted so dotted family names
/// such as `Foo 1.5` keep their full text. Trailing dots and spaces are
/// dropped, and stems Windows reserves for devices (`CON`, `NUL`, `COM1`, ...)
/// get a leading `_`.
pub fn output_file_name(family_name: &str) -> String {
    let safe = UNSAFE_FILE_CHARS.replace_all(family_name, "_");
    let mut stem = safe.trim_end_matches(['.', ' ']).to_string();
    if stem.is_empty() || RESERVED_STEM.is_match(&stem) {
        stem.insert(0, '_');
    }
    format!("{stem}.{TARGET_EXTENSION}")
}

/// Run the whole extraction and report each font on `out`.
///
/// Fatal problems (missing cache folder, unwritable output directory, broken
/// report sink) return `Err`. Per-file problems are logged and collected in
/// [`CopySummary::failures`], or returned straight away when
/// `fail_fast` is set on the config.
pub fn copy_fonts(config: &CopyConfig, mut out: impl Write) -> Result<CopySummary> {
    let cache_dir = locate_cache_dir(
        &config.adobe_dir,
        &config.cache_dir_name,
        config.follow_symlinks,
    )?;
    let verbose = config.verbose;
    step!(verbose, "Found cache folder at {}.", cache_dir.display());

    let output = config.output_dir.display();
    match prepare_output_dir(&config.output_dir, config.dry_run)? {
        OutputDirState::Existing => step!(verbose, "Found output directory at {output}"),
        OutputDirState::Created => step!(verbose, "Created output directory at {output}"),
        OutputDirState::WouldCreate => {
            step!(verbose, "Would create output directory at {output} (dry run)")
        }
    }

    let fonts = CacheDiscovery::new(&cache_dir)
        .follow_symlinks(config.follow_symlinks)
        .discover()?;
    step!(verbose, "Found {} fonts.", fonts.len());

    let mut records = Vec::with_capacity(fonts.len());
    let mut failures = Vec::new();

    for font in &fonts {
        match copy_font(font, config) {
            Ok(record) => {
                emit_record(config.format, &record, &mut out)?;
                records.push(record);
            }
            Err(error) if error.is_per_file() && !config.fail_fast => {
                warn!("skipping {}: {error}", font.path.display());
                failures.push(FileFailure {
                    source: font.path.clone(),
                    error,
                });
            }
            Err(error) => return Err(error),
        }
    }

    finish_report(config.format, &records, &mut out)?;

    let summary = CopySummary {
        cache_dir,
        records,
        failures,
    };
    step!(
        verbose,
        "Processed {} fonts ({} failed).",
        summary.processed(),
        summary.failures.len()
    );
    Ok(summary)
}

fn copy_font(font: &FontSourceRef, config: &CopyConfig) -> Result<CopyRecord> {
    let verbose = config.verbose;
    step!(verbose, "Processing file {}.", font.path.display());

    let family_name = resolve_family_name(&font.path)?;
    step!(verbose, "Found font {family_name}.");

    let output_name = output_file_name(&family_name);
    let destination = config.output_dir.join(&output_name);

    if !config.dry_run {
        fs::copy(&font.path, &destination).map_err(|source| CopyError::FileCopy {
            from: font.path.clone(),
            to: destination.clone(),
            source,
        })?;
        step!(verbose, "Copied font {family_name} to {}.", destination.display());
    }

    Ok(CopyRecord {
        source: font.path.clone(),
        file_name: font.file_name(),
        family_name,
        output_name,
        destination,
        copied: !config.dry_run,
    })
}
