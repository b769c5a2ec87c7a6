//! Error kinds for the copy pipeline (ccfont-core)

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while extracting fonts from the cache.
///
/// Process-level kinds stop the run. Per-file kinds (see
/// [`CopyError::is_per_file`]) only fail the font they belong to unless the
/// run was configured to fail fast.
#[derive(Debug, Error)]
pub enum CopyError {
    #[error("no `{name}` cache directory found under {}", root.display())]
    CacheDirectoryNotFound { root: PathBuf, name: String },

    #[error("failed walking {}: {source}", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to create output directory {}: {source}", path.display())]
    OutputDirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read font {}: {source}", path.display())]
    FontRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not a usable font: {reason}", path.display())]
    FontParse { path: PathBuf, reason: String },

    #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
    FileCopy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed writing report: {0}")]
    Report(#[from] io::Error),
}

impl CopyError {
    /// True for failures scoped to a single font file.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            CopyError::FontRead { .. } | CopyError::FontParse { .. } | CopyError::FileCopy { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CopyError>;
