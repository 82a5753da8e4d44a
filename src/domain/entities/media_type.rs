//! Media type entity
//!
//! The set of formats the scanner knows how to verify, and the file
//! extensions that select each of them.

use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Media formats that can be checked for integrity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MediaType {
    /// JPEG image
    Jpeg,
    /// TIFF image
    Tiff,
    /// PNG image
    Png,
    /// HEIC/HEIF image
    Heic,
}

impl MediaType {
    /// Every supported media type
    pub const ALL: [MediaType; 4] = [
        MediaType::Jpeg,
        MediaType::Tiff,
        MediaType::Png,
        MediaType::Heic,
    ];

    /// Returns the lowercase extensions (without dot) mapped to this type
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            MediaType::Jpeg => &["jpg", "jpeg"],
            MediaType::Tiff => &["tif", "tiff"],
            MediaType::Png => &["png"],
            MediaType::Heic => &["heic", "heif"],
        }
    }

    /// Returns the detected-type string used in logs and reports
    pub fn name(&self) -> &'static str {
        match self {
            MediaType::Jpeg => "JPEG",
            MediaType::Tiff => "TIFF",
            MediaType::Png => "PNG",
            MediaType::Heic => "HEIC",
        }
    }

    /// Looks up a type by extension. Case-insensitive, leading dot optional.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = normalize_extension(ext);
        Self::ALL
            .into_iter()
            .find(|t| t.extensions().contains(&ext.as_str()))
    }

    /// Looks up a type from a path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lowercases an extension and strips a single leading dot
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_ascii_lowercase()
}
