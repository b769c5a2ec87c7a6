//! Run configuration and default path resolution (ccfont-core)

use std::env;
use std::path::PathBuf;

/// Name of the folder Creative Cloud keeps activated fonts in.
pub const DEFAULT_CACHE_DIR_NAME: &str = "r";

/// Extension every extracted font is written with.
pub const TARGET_EXTENSION: &str = "otf";

/// Environment override for the default Adobe directory.
pub const ADOBE_DIR_ENV: &str = "CCFONT_ADOBE_DIR";

/// Environment override for the default output directory.
pub const OUTPUT_DIR_ENV: &str = "CCFONT_OUTPUT_DIR";

/// How processed fonts are reported on the output sink.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ReportFormat {
    /// `<file>\t->\t<family>.otf`, one line per font.
    #[default]
    Plain,
    /// One JSON object per font, streamed.
    Ndjson,
    /// A single pretty JSON array written once the run is over.
    Json,
}

#[derive(Debug, Clone)]
pub struct CopyConfig {
    pub dry_run: bool,
    pub verbose: bool,
    pub adobe_dir: PathBuf,
    pub output_dir: PathBuf,
    pub cache_dir_name: String,
    pub follow_symlinks: bool,
    pub fail_fast: bool,
    pub format: ReportFormat,
}

impl CopyConfig {
    pub fn new(adobe_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            dry_run: false,
            verbose: false,
            adobe_dir: adobe_dir.into(),
            output_dir: output_dir.into(),
            cache_dir_name: DEFAULT_CACHE_DIR_NAME.to_string(),
            follow_symlinks: false,
            fail_fast: false,
            format: ReportFormat::Plain,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn cache_dir_name(mut self, name: impl Into<String>) -> Self {
        self.cache_dir_name = name.into();
        self
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }
}

/// Source of the directories used when the user does not pass any.
pub trait DefaultPaths {
    /// Root searched for the cache folder (Adobe's `CoreSync` directory).
    fn adobe_dir(&self) -> Option<PathBuf>;
    /// Where renamed fonts land.
    fn output_dir(&self) -> Option<PathBuf>;
}

/// Platform folders, overridable through `CCFONT_ADOBE_DIR` / `CCFONT_OUTPUT_DIR`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemPaths;

impl DefaultPaths for SystemPaths {
    fn adobe_dir(&self) -> Option<PathBuf> {
        env_override(ADOBE_DIR_ENV)
            .or_else(|| dirs::data_dir().map(|dir| dir.join("Adobe").join("CoreSync")))
    }

    fn output_dir(&self) -> Option<PathBuf> {
        env_override(OUTPUT_DIR_ENV)
            .or_else(|| dirs::document_dir().map(|dir| dir.join("Adobe").join("Fonts")))
    }
}

/// Fixed directories, for callers that already know where things live.
#[derive(Debug, Default, Clone)]
pub struct FixedPaths {
    pub adobe_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl DefaultPaths for FixedPaths {
    fn adobe_dir(&self) -> Option<PathBuf> {
        self.adobe_dir.clone()
    }

    fn output_dir(&self) -> Option<PathBuf> {
        self.output_dir.clone()
    }
}

fn env_override(var: &str) -> Option<PathBuf> {
    env::var_os(var)
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_match_plain_copy() {
        let config = CopyConfig::new("/adobe", "/out");
        assert!(!config.dry_run);
        assert!(!config.verbose);
        assert!(!config.fail_fast);
        assert_eq!(config.cache_dir_name, "r");
        assert_eq!(config.format, ReportFormat::Plain);
    }

    #[test]
    fn system_paths_end_in_vendor_subfolders() {
        // Only meaningful when no override is set in the test environment.
        if env::var_os(ADOBE_DIR_ENV).is_none() {
            if let Some(dir) = SystemPaths.adobe_dir() {
                assert!(dir.ends_with("Adobe/CoreSync"));
            }
        }
        if env::var_os(OUTPUT_DIR_ENV).is_none() {
            if let Some(dir) = SystemPaths.output_dir() {
                assert!(dir.ends_with("Adobe/Fonts"));
            }
        }
    }

    #[test]
    fn fixed_paths_return_what_they_hold() {
        let paths = FixedPaths {
            adobe_dir: Some(PathBuf::from("/a")),
            output_dir: None,
        };
        assert_eq!(paths.adobe_dir(), Some(PathBuf::from("/a")));
        assert_eq!(paths.output_dir(), None);
    }
}
