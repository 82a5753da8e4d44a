//! Local relocator implementation
//!
//! Moves files on the local filesystem, picking a free name when the
//! destination is taken.

use crate::core::RelocateError;
use crate::domain::repositories::{CollisionStyle, FileRelocator, MAX_COLLISION_ATTEMPTS};
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Local filesystem relocator
///
/// Uses `rename`, falling back to copy + remove when source and destination
/// are on different filesystems. Missing destination directories are
/// created. Planned destinations are remembered so two plans never get the
/// same one.
pub struct LocalRelocator {
    reserved: Mutex<HashSet<PathBuf>>,
}

impl LocalRelocator {
    pub fn new() -> Self {
        Self {
            reserved: Mutex::new(HashSet::new()),
        }
    }

    fn is_reserved(&self, path: &Path) -> bool {
        self.reserved
            .lock()
            .map(|set| set.contains(path))
            .unwrap_or(false)
    }

    fn reserve(&self, path: &Path) {
        if let Ok(mut set) = self.reserved.lock() {
            set.insert(path.to_path_buf());
        }
    }

    /// Returns true if anything, including a dangling symlink, sits at `path`
    fn occupied(&self, path: &Path) -> Result<bool, RelocateError> {
        if self.is_reserved(path) {
            return Ok(true);
        }
        match fs::symlink_metadata(path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(RelocateError::Stat {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Finds the first free destination for `file_name` inside `dest_dir`
    pub fn free_destination(
        &self,
        dest_dir: &Path,
        file_name: &Path,
        style: CollisionStyle,
    ) -> Result<PathBuf, RelocateError> {
        for attempt in 0..MAX_COLLISION_ATTEMPTS {
            let candidate = dest_dir.join(style.candidate(file_name, attempt));
            if !self.occupied(&candidate)? {
                return Ok(candidate);
            }
        }

        Err(RelocateError::Exhausted {
            path: dest_dir.join(file_name),
            attempts: MAX_COLLISION_ATTEMPTS,
        })
    }

    fn move_file(from: &Path, to: &Path) -> Result<(), RelocateError> {
        let wrap = |source| RelocateError::Move {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        };

        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::CrossesDevices => {
                debug!(from = %from.display(), to = %to.display(), "crossing filesystems, copying");
                fs::copy(from, to).map_err(wrap)?;
                fs::remove_file(from).map_err(wrap)
            }
            Err(e) => Err(wrap(e)),
        }
    }
}

impl Default for LocalRelocator {
    fn default() -> Self {
        Self::new()
    }
}

fn file_name_of(source: &Path) -> Result<&Path, RelocateError> {
    source
        .file_name()
        .map(Path::new)
        .ok_or_else(|| RelocateError::NoFileName(source.to_path_buf()))
}

impl FileRelocator for LocalRelocator {
    fn relocate(
        &self,
        source: &Path,
        dest_dir: &Path,
        style: CollisionStyle,
    ) -> Result<PathBuf, RelocateError> {
        let file_name = file_name_of(source)?;

        fs::create_dir_all(dest_dir).map_err(|source| RelocateError::CreateDir {
            path: dest_dir.to_path_buf(),
            source,
        })?;

        let destination = self.free_destination(dest_dir, file_name, style)?;
        Self::move_file(source, &destination)?;
        Ok(destination)
    }

    fn plan(
        &self,
        source: &Path,
        dest_dir: &Path,
        style: CollisionStyle,
    ) -> Result<PathBuf, RelocateError> {
        let destination = self.free_destination(dest_dir, file_name_of(source)?, style)?;
        self.reserve(&destination);
        Ok(destination)
    }
}
