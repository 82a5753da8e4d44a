//! Scan report DTO

use crate::domain::entities::{DateSource, InvalidReason, MediaType};
use humansize::{DECIMAL, format_size};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// Per-type tallies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TypeCounts {
    pub valid: usize,
    pub invalid: usize,
}

/// An invalid file and where it ended up
#[derive(Debug, Clone, Serialize)]
pub struct InvalidEntry {
    pub path: PathBuf,
    pub media_type: MediaType,
    pub reason: InvalidReason,
    pub moved_to: Option<PathBuf>,
}

/// A valid file moved into the organize root
#[derive(Debug, Clone, Serialize)]
pub struct OrganizedEntry {
    pub from: PathBuf,
    pub to: PathBuf,
    pub date_source: Option<DateSource>,
}

/// A non-fatal error that caused a file to be skipped
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEntry {
    pub path: Option<PathBuf>,
    pub message: String,
}

/// Result of a diagnose run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    /// Scanned directory
    pub scan_path: PathBuf,
    /// Whether moves were only planned
    pub dry_run: bool,
    /// Files selected by extension
    pub files_examined: usize,
    /// Files skipped because their extension is not enabled
    pub non_media_skipped: usize,
    pub valid: usize,
    pub too_small: usize,
    pub corrupt: usize,
    pub quarantined: usize,
    pub organized: usize,
    pub bytes_quarantined: u64,
    pub bytes_organized: u64,
    pub by_type: BTreeMap<MediaType, TypeCounts>,
    pub invalid_files: Vec<InvalidEntry>,
    pub organized_files: Vec<OrganizedEntry>,
    pub errors: Vec<ErrorEntry>,
    /// Wall time of the run in milliseconds
    pub duration_ms: u64,
}

impl ScanReport {
    /// Creates an empty report for the given directory
    pub fn new(scan_path: PathBuf, dry_run: bool) -> Self {
        Self {
            scan_path,
            dry_run,
            ..Default::default()
        }
    }

    /// Number of invalid files, whatever the reason
    pub fn invalid(&self) -> usize {
        self.too_small + self.corrupt
    }

    pub fn record_valid(&mut self, media_type: MediaType) {
        self.valid += 1;
        self.by_type.entry(media_type).or_default().valid += 1;
    }

    pub fn record_invalid(&mut self, entry: InvalidEntry, size: u64) {
        match entry.reason {
            InvalidReason::TooSmall { .. } => self.too_small += 1,
            InvalidReason::Corrupt { .. } => self.corrupt += 1,
        }
        if entry.moved_to.is_some() {
            self.quarantined += 1;
            self.bytes_quarantined += size;
        }
        self.by_type.entry(entry.media_type).or_default().invalid += 1;
        self.invalid_files.push(entry);
    }

    pub fn record_organized(&mut self, entry: OrganizedEntry, size: u64) {
        self.organized += 1;
        self.bytes_organized += size;
        self.organized_files.push(entry);
    }

    pub fn record_error(&mut self, path: Option<PathBuf>, message: String) {
        self.errors.push(ErrorEntry { path, message });
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
    }

    /// Returns a one-line summary
    pub fn summary(&self) -> String {
        let verb = if self.dry_run { "would move" } else { "moved" };
        format!(
            "{} files examined: {} valid, {} invalid ({} too small, {} corrupt); \
             {} {} to quarantine ({}), {} {} to library ({}); {} errors",
            self.files_examined,
            self.valid,
            self.invalid(),
            self.too_small,
            self.corrupt,
            verb,
            self.quarantined,
            format_size(self.bytes_quarantined, DECIMAL),
            verb,
            self.organized,
            format_size(self.bytes_organized, DECIMAL),
            self.errors.len()
        )
    }
}
