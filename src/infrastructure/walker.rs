//! Directory tree walker
//!
//! Depth-first traversal of the scan root built on walkdir.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Recycle bin folder created by Windows on every volume
const RECYCLE_BIN: &str = "$RECYCLE.BIN";

/// Returns true for names treated as hidden
pub fn is_hidden_name(name: &OsStr) -> bool {
    name.to_str()
        .map(|s| s.starts_with('.') || s == RECYCLE_BIN)
        .unwrap_or(false)
}

/// Walks a directory tree, yielding regular files in file-name order
///
/// Symlinks are not followed. The root is never filtered, whatever its
/// name.
#[derive(Debug, Clone)]
pub struct TreeWalker {
    root: PathBuf,
    include_hidden: bool,
    skip_dirs: Vec<PathBuf>,
}

impl TreeWalker {
    /// Creates a walker for the given root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            include_hidden: false,
            skip_dirs: Vec::new(),
        }
    }

    /// Also descends into hidden directories and yields hidden files
    pub fn include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Prunes the given directory (and everything below it) from the walk
    pub fn skip_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.skip_dirs.push(dir.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn keep(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return true;
        }
        if !self.include_hidden && is_hidden_name(entry.file_name()) {
            return false;
        }
        if entry.file_type().is_dir() && self.skip_dirs.iter().any(|d| d == entry.path()) {
            return false;
        }
        true
    }

    /// Iterates over regular files; traversal errors are passed through
    pub fn files(&self) -> impl Iterator<Item = Result<DirEntry, walkdir::Error>> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| self.keep(entry))
            .filter(|item| match item {
                Ok(entry) => entry.file_type().is_file(),
                Err(_) => true,
            })
    }
}
