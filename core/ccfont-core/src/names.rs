//! Family-name resolution from the `name` table (ccfont-core)

use std::fs;
use std::path::{Path, PathBuf};

use read_fonts::FontRef;
use skrifa::string::StringId;
use skrifa::MetadataProvider;

use crate::error::{CopyError, Result};

/// Name IDs consulted, most preferred first.
const FAMILY_NAME_IDS: [StringId; 3] = [
    StringId::FAMILY_NAME,
    StringId::TYPOGRAPHIC_FAMILY_NAME,
    StringId::FULL_NAME,
];

/// Font bytes held for the duration of a single lookup.
///
/// Dropping the value releases the buffer, so a run never holds more than
/// one font in memory.
#[derive(Debug)]
pub struct LoadedFont {
    path: PathBuf,
    data: Vec<u8>,
}

impl LoadedFont {
    pub fn open(path: &Path) -> Result<Self> {
        let data = fs::read(path).map_err(|source| CopyError::FontRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }

    pub fn from_bytes(path: impl Into<PathBuf>, data: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            data,
        }
    }

    /// First declared family name of the file (first face for collections).
    pub fn family_name(&self) -> Result<String> {
        // Index 0 covers both plain sfnt files and TTC/OTC collections.
        let font = FontRef::from_index(&self.data, 0).map_err(|err| CopyError::FontParse {
            path: self.path.clone(),
            reason: err.to_string(),
        })?;

        FAMILY_NAME_IDS
            .iter()
            .find_map(|id| {
                let name = font.localized_strings(*id).english_or_first()?.to_string();
                let name = name.trim();
                (!name.is_empty()).then(|| name.to_string())
            })
            .ok_or_else(|| CopyError::FontParse {
                path: self.path.clone(),
                reason: "no family name in name table".to_string(),
            })
    }
}

/// Read `path` and return its family name, releasing the bytes before returning.
pub fn resolve_family_name(path: &Path) -> Result<String> {
    let font = LoadedFont::open(path)?;
    font.family_name()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{build_font, build_font_with_names};

    #[test]
    fn reads_family_name() {
        let font = LoadedFont::from_bytes("/cache/ABCDEF01", build_font("Helvetica Neue Bold"));
        assert_eq!(font.family_name().expect("family"), "Helvetica Neue Bold");
    }

    #[test]
    fn falls_back_to_typographic_family() {
        let data = build_font_with_names(&[(16, "Minion Pro"), (4, "Minion Pro Regular")]);
        let font = LoadedFont::from_bytes("/cache/X", data);
        assert_eq!(font.family_name().expect("family"), "Minion Pro");
    }

    #[test]
    fn trims_and_skips_blank_names() {
        let data = build_font_with_names(&[(1, "   "), (4, "  Myriad Pro  ")]);
        let font = LoadedFont::from_bytes("/cache/Y", data);
        assert_eq!(font.family_name().expect("family"), "Myriad Pro");
    }

    #[test]
    fn missing_names_are_a_parse_error() {
        let data = build_font_with_names(&[(6, "PostScriptOnly")]);
        let font = LoadedFont::from_bytes("/cache/Z", data);
        let err = font.family_name().unwrap_err();
        assert!(matches!(err, CopyError::FontParse { .. }), "{err}");
    }

    #[test]
    fn text_is_a_parse_error() {
        let font = LoadedFont::from_bytes("/cache/notes.txt", b"just some notes\n".to_vec());
        let err = font.family_name().unwrap_err();
        assert!(matches!(err, CopyError::FontParse { .. }), "{err}");
    }

    #[test]
    fn unreadable_path_is_a_read_error() {
        let err = resolve_family_name(Path::new("/nonexistent/ccfont/font")).unwrap_err();
        assert!(matches!(err, CopyError::FontRead { .. }), "{err}");
    }
}
