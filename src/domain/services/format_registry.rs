//! Format registry service
//!
//! Maps file extensions to the media type whose parser should check them,
//! optionally restricted to a user-supplied subset of extensions.

use crate::core::ScanError;
use crate::domain::entities::{MediaType, normalize_extension};
use std::collections::BTreeMap;
use std::path::Path;

/// Registry of enabled extensions
///
/// # Example
///
/// ```
/// use imgdiag::domain::services::FormatRegistry;
/// use imgdiag::domain::entities::MediaType;
/// use std::path::Path;
///
/// let registry = FormatRegistry::all();
/// assert_eq!(registry.classify(Path::new("IMG_0001.JPG")), Some(MediaType::Jpeg));
/// assert_eq!(registry.classify(Path::new("notes.txt")), None);
/// ```
#[derive(Debug, Clone)]
pub struct FormatRegistry {
    extensions: BTreeMap<String, MediaType>,
}

impl FormatRegistry {
    /// Creates a registry with every supported extension enabled
    pub fn all() -> Self {
        let extensions = MediaType::ALL
            .iter()
            .flat_map(|t| t.extensions().iter().map(move |e| (e.to_string(), *t)))
            .collect();
        Self { extensions }
    }

    /// Creates a registry restricted to the given extensions
    ///
    /// Filtering is per extension: enabling `jpg` does not enable `jpeg`.
    pub fn with_extensions<S: AsRef<str>>(filter: &[S]) -> Result<Self, ScanError> {
        let mut extensions = BTreeMap::new();

        for raw in filter {
            let ext = normalize_extension(raw.as_ref());
            if ext.is_empty() {
                continue;
            }
            let media_type = MediaType::from_extension(&ext)
                .ok_or_else(|| ScanError::UnknownExtension(raw.as_ref().to_string()))?;
            extensions.insert(ext, media_type);
        }

        if extensions.is_empty() {
            return Err(ScanError::EmptyFilter);
        }

        Ok(Self { extensions })
    }

    /// Returns the media type for a path, if its extension is enabled
    pub fn classify(&self, path: &Path) -> Option<MediaType> {
        let ext = path.extension()?.to_str()?;
        self.extensions.get(&normalize_extension(ext)).copied()
    }

    /// Returns the enabled extensions in sorted order
    pub fn enabled_extensions(&self) -> Vec<&str> {
        self.extensions.keys().map(String::as_str).collect()
    }

    /// Returns true if at least one extension of the given type is enabled
    pub fn is_enabled(&self, media_type: MediaType) -> bool {
        self.extensions.values().any(|t| *t == media_type)
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::all()
    }
}
