//! Scan options DTO

use crate::core::ScanError;
use crate::domain::services::{FormatRegistry, LayoutScheme};
use std::path::PathBuf;

/// Files smaller than this cannot hold any supported format
pub const MIN_VALID_SIZE: u64 = 3;

/// Options for one diagnose run
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Directory to scan
    pub scan_path: PathBuf,
    /// Where invalid files are moved (none = leave in place)
    pub quarantine_dir: Option<PathBuf>,
    /// Root of the date/device hierarchy for valid files (none = leave in place)
    pub organize_dir: Option<PathBuf>,
    /// Shape of the hierarchy under `organize_dir`
    pub layout: LayoutScheme,
    /// Extensions to check (empty = all supported)
    pub extensions: Vec<String>,
    /// Whether hidden files and directories are processed
    pub include_hidden: bool,
    /// Log planned moves without touching any file
    pub dry_run: bool,
    /// Files below this size are invalid without being parsed
    pub min_file_size: u64,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            scan_path: PathBuf::from("."),
            quarantine_dir: None,
            organize_dir: None,
            layout: LayoutScheme::default(),
            extensions: Vec::new(),
            include_hidden: false,
            dry_run: false,
            min_file_size: MIN_VALID_SIZE,
        }
    }
}

impl ScanOptions {
    /// Creates new scan options for the given directory
    pub fn new(scan_path: impl Into<PathBuf>) -> Self {
        Self {
            scan_path: scan_path.into(),
            ..Default::default()
        }
    }

    /// Moves invalid files to `dir`
    pub fn with_quarantine(mut self, dir: impl Into<PathBuf>) -> Self {
        self.quarantine_dir = Some(dir.into());
        self
    }

    /// Moves valid files into a hierarchy under `dir`
    pub fn with_organize(mut self, dir: impl Into<PathBuf>, layout: LayoutScheme) -> Self {
        self.organize_dir = Some(dir.into());
        self.layout = layout;
        self
    }

    /// Restricts the run to the given extensions
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Processes hidden files and directories
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Plans moves without performing them
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Builds the extension registry for these options
    pub fn registry(&self) -> Result<FormatRegistry, ScanError> {
        if self.extensions.is_empty() {
            Ok(FormatRegistry::all())
        } else {
            FormatRegistry::with_extensions(&self.extensions)
        }
    }
}
