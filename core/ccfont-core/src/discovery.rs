//! Cache directory discovery and font enumeration (ccfont-core)

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{CopyError, Result};

/// Path to a file sitting in the font cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSourceRef {
    pub path: PathBuf,
}

impl FontSourceRef {
    /// Obfuscated cache name of the file, as shown in the mapping line.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Trait for enumerating candidate font files.
pub trait FontDiscovery {
    fn discover(&self) -> Result<Vec<FontSourceRef>>;
}

/// Find the first directory named `name` below `root`.
///
/// The walk is depth-first and visits siblings in file-name order, so the
/// same tree always yields the same directory. `root` itself never matches.
pub fn locate_cache_dir(root: &Path, name: &str, follow_symlinks: bool) -> Result<PathBuf> {
    let not_found = || CopyError::CacheDirectoryNotFound {
        root: root.to_path_buf(),
        name: name.to_string(),
    };

    if !root.is_dir() {
        return Err(not_found());
    }

    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(follow_symlinks)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|source| CopyError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_dir() && entry.file_name() == name {
            debug!(path = %entry.path().display(), "matched cache directory");
            return Ok(entry.into_path());
        }
    }

    Err(not_found())
}

/// Lists the regular files directly inside a cache directory.
#[derive(Debug, Clone)]
pub struct CacheDiscovery {
    dir: PathBuf,
    follow_symlinks: bool,
}

impl CacheDiscovery {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            follow_symlinks: false,
        }
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }
}

impl FontDiscovery for CacheDiscovery {
    fn discover(&self) -> Result<Vec<FontSourceRef>> {
        let walker = WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.follow_symlinks)
            .sort_by_file_name();

        let mut found = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|source| CopyError::Walk {
                root: self.dir.clone(),
                source,
            })?;
            if entry.file_type().is_file() {
                found.push(FontSourceRef {
                    path: entry.into_path(),
                });
            }
        }

        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn locates_nested_cache_dir() {
        let tmp = tempdir().expect("tempdir");
        let cache = tmp.path().join("plugins/livetype/r");
        fs::create_dir_all(&cache).expect("mkdir");

        let found = locate_cache_dir(tmp.path(), "r", false).expect("locate");
        assert_eq!(found, cache);
    }

    #[test]
    fn picks_first_match_in_name_order() {
        let tmp = tempdir().expect("tempdir");
        fs::create_dir_all(tmp.path().join("b/r")).expect("mkdir b");
        fs::create_dir_all(tmp.path().join("a/deep/r")).expect("mkdir a");

        let found = locate_cache_dir(tmp.path(), "r", false).expect("locate");
        assert_eq!(found, tmp.path().join("a/deep/r"));
    }

    #[test]
    fn ignores_files_named_like_the_cache() {
        let tmp = tempdir().expect("tempdir");
        fs::write(tmp.path().join("r"), b"not a dir").expect("touch");

        let err = locate_cache_dir(tmp.path(), "r", false).unwrap_err();
        assert!(matches!(err, CopyError::CacheDirectoryNotFound { .. }));
    }

    #[test]
    fn enumerates_only_top_level_files_sorted() {
        let tmp = tempdir().expect("tempdir");
        fs::write(tmp.path().join("B2"), b"b").expect("touch");
        fs::write(tmp.path().join("A1"), b"a").expect("touch");
        fs::create_dir_all(tmp.path().join("sub")).expect("mkdir");
        fs::write(tmp.path().join("sub/C3"), b"c").expect("touch");

        let fonts = CacheDiscovery::new(tmp.path()).discover().expect("discover");
        let names: Vec<String> = fonts.iter().map(FontSourceRef::file_name).collect();
        assert_eq!(names, vec!["A1".to_string(), "B2".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_files_need_follow_symlinks() {
        use std::os::unix::fs::symlink;

        let tmp = tempdir().expect("tempdir");
        let real = tmp.path().join("real.otf");
        fs::write(&real, b"font").expect("touch");
        let cache = tmp.path().join("r");
        fs::create_dir_all(&cache).expect("mkdir");
        symlink(&real, cache.join("LINKED")).expect("symlink");

        let plain = CacheDiscovery::new(&cache).discover().expect("discover");
        assert!(plain.is_empty());

        let followed = CacheDiscovery::new(&cache)
            .follow_symlinks(true)
            .discover()
            .expect("discover");
        assert_eq!(followed.len(), 1);
    }
}
