//! File relocator trait
//!
//! Defines the interface for moving files out of the scan tree without
//! ever overwriting an existing file.

use crate::core::RelocateError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Upper bound on numbered candidates tried for one file
pub const MAX_COLLISION_ATTEMPTS: u32 = 10_000;

/// How to derive an alternative name when the destination is taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionStyle {
    /// `photo.jpg`, `photo.jpg.1`, `photo.jpg.2`, ...
    AppendCounter,
    /// `photo.jpg`, `photo-1.jpg`, `photo-2.jpg`, ...
    NumberStem,
}

impl CollisionStyle {
    /// Returns the file name for the given attempt (0 keeps the name unchanged)
    pub fn candidate(&self, file_name: &Path, attempt: u32) -> OsString {
        if attempt == 0 {
            return file_name.as_os_str().to_os_string();
        }

        match self {
            CollisionStyle::AppendCounter => {
                let mut name = file_name.as_os_str().to_os_string();
                name.push(format!(".{}", attempt));
                name
            }
            CollisionStyle::NumberStem => {
                let stem = file_name.file_stem().unwrap_or(file_name.as_os_str());
                let mut name = stem.to_os_string();
                name.push(format!("-{}", attempt));
                if let Some(ext) = file_name.extension() {
                    name.push(".");
                    name.push(ext);
                }
                name
            }
        }
    }
}

/// Trait for moving files to a destination directory
///
/// # Example
///
/// ```ignore
/// let relocator = LocalRelocator::new();
/// let moved_to = relocator.relocate(&bad_file, &quarantine, CollisionStyle::AppendCounter)?;
/// println!("Moved to: {}", moved_to.display());
/// ```
pub trait FileRelocator {
    /// Moves `source` into `dest_dir`, keeping its file name when free
    ///
    /// Returns the final path of the file.
    fn relocate(
        &self,
        source: &Path,
        dest_dir: &Path,
        style: CollisionStyle,
    ) -> Result<PathBuf, RelocateError>;

    /// Picks the path `relocate` would use without touching the filesystem
    ///
    /// The returned path is reserved, so later plans never return it again.
    fn plan(
        &self,
        source: &Path,
        dest_dir: &Path,
        style: CollisionStyle,
    ) -> Result<PathBuf, RelocateError>;
}
