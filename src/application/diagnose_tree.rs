//! Diagnose tree use case
//!
//! Walks a directory, checks every media file with its format's parser,
//! quarantines the invalid ones and optionally files the valid ones into
//! a date/device hierarchy.

use crate::application::dto::{InvalidEntry, OrganizedEntry, ScanOptions, ScanReport};
use crate::core::{InspectError, ScanError};
use crate::domain::entities::{InvalidReason, MediaFile, Verdict};
use crate::domain::repositories::{CollisionStyle, FileRelocator};
use crate::domain::services::{FormatRegistry, LibraryLayout, MediaInspector};
use crate::infrastructure::walker::TreeWalker;
use anyhow::Result;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Progress callback, invoked after each file the walk yields
pub type ProgressCallback = Box<dyn Fn(&Path, &ScanReport) + Send + Sync>;

/// Settings resolved once per run, plus the files it has already placed
struct RunContext<'a> {
    registry: &'a FormatRegistry,
    quarantine: Option<&'a Path>,
    organize: Option<&'a Path>,
    layout: LibraryLayout,
    min_file_size: u64,
    dry_run: bool,
    relocated: HashSet<PathBuf>,
}

/// Diagnose tree use case
pub struct DiagnoseTreeUseCase<I: MediaInspector, R: FileRelocator> {
    inspector: I,
    relocator: R,
}

impl<I: MediaInspector, R: FileRelocator> DiagnoseTreeUseCase<I, R> {
    /// Creates a new diagnose tree use case
    pub fn new(inspector: I, relocator: R) -> Self {
        Self {
            inspector,
            relocator,
        }
    }

    /// Checks a single file
    ///
    /// Undersized files and parser rejections come back as
    /// [`Verdict::Invalid`]. Only operational failures (the file cannot be
    /// opened, no parser for its type) are returned as errors.
    pub fn check(&self, file: &MediaFile, min_file_size: u64) -> Result<Verdict, InspectError> {
        if file.size() < min_file_size {
            return Ok(Verdict::Invalid(InvalidReason::TooSmall { size: file.size() }));
        }

        match self.inspector.inspect(file) {
            Ok(metadata) => Ok(Verdict::Valid(metadata)),
            Err(e) if e.is_corruption() => Ok(Verdict::Invalid(InvalidReason::Corrupt {
                message: e.to_string(),
            })),
            Err(e) => Err(e),
        }
    }

    /// Executes the run
    pub fn execute(
        &self,
        options: &ScanOptions,
        progress_callback: Option<ProgressCallback>,
    ) -> Result<ScanReport> {
        let start_time = Instant::now();

        let registry = options.registry()?;
        let scan_root = resolve_dir("scan path", &options.scan_path)?;
        let quarantine = options
            .quarantine_dir
            .as_deref()
            .map(|p| resolve_dir("move path", p))
            .transpose()?;
        let organize = options
            .organize_dir
            .as_deref()
            .map(|p| resolve_dir("organize path", p))
            .transpose()?;

        if quarantine.as_deref() == Some(scan_root.as_path()) {
            return Err(ScanError::SameAsScanPath {
                name: "move path",
                path: scan_root,
            }
            .into());
        }
        if let Some(dir) = &quarantine {
            info!(path = %dir.display(), "Will move bad files");
        }
        if let Some(dir) = &organize {
            info!(path = %dir.display(), layout = ?options.layout, "Will organize valid files");
        }

        let mut ctx = RunContext {
            registry: &registry,
            quarantine: quarantine.as_deref(),
            organize: organize.as_deref(),
            layout: LibraryLayout::new(options.layout),
            min_file_size: options.min_file_size,
            dry_run: options.dry_run,
            relocated: HashSet::new(),
        };

        let mut walker = TreeWalker::new(&scan_root).include_hidden(options.include_hidden);
        for dir in quarantine.iter().chain(organize.iter()) {
            // The organize root may be the scan root itself, which is never pruned.
            if *dir != scan_root {
                walker = walker.skip_dir(dir);
            }
        }

        let mut report = ScanReport::new(scan_root.clone(), options.dry_run);

        info!(
            path = %scan_root.display(),
            extensions = %registry.enabled_extensions().join(","),
            "Scanning..."
        );

        for item in walker.files() {
            match item {
                Ok(entry) => {
                    self.process_entry(&entry, &mut ctx, &mut report);
                    if let Some(ref callback) = progress_callback {
                        callback(entry.path(), &report);
                    }
                }
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf);
                    warn!(
                        path = %path.as_deref().unwrap_or(scan_root.as_path()).display(),
                        error = %e,
                        "walk error, skipping"
                    );
                    report.record_error(path, e.to_string());
                }
            }
        }

        report.set_duration(start_time.elapsed());
        Ok(report)
    }

    fn process_entry(
        &self,
        entry: &walkdir::DirEntry,
        ctx: &mut RunContext<'_>,
        report: &mut ScanReport,
    ) {
        let path = entry.path();
        if ctx.relocated.contains(path) {
            debug!(path = %path.display(), "already placed in this run");
            return;
        }

        let Some(media_type) = ctx.registry.classify(path) else {
            debug!(path = %path.display(), "not a media file");
            report.non_media_skipped += 1;
            return;
        };
        report.files_examined += 1;

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to stat, skipping");
                report.record_error(Some(path.to_path_buf()), e.to_string());
                return;
            }
        };
        let file =
            MediaFile::new(path, metadata.len(), media_type).with_modified(metadata.modified().ok());

        match self.check(&file, ctx.min_file_size) {
            Ok(Verdict::Invalid(reason)) => self.handle_invalid(&file, reason, ctx, report),
            Ok(Verdict::Valid(media_metadata)) => {
                debug!(path = %path.display(), media_type = %media_type, "ok");
                report.record_valid(media_type);

                if let Some(root) = ctx.organize {
                    let (dest_dir, capture) =
                        ctx.layout.destination_dir(root, &media_metadata, &file);
                    if path.parent() == Some(dest_dir.as_path()) {
                        debug!(path = %path.display(), "already in place");
                    } else if let Some(to) =
                        self.relocate(path, &dest_dir, CollisionStyle::NumberStem, ctx, report)
                    {
                        report.record_organized(
                            OrganizedEntry {
                                from: path.to_path_buf(),
                                to,
                                date_source: capture.map(|c| c.source),
                            },
                            file.size(),
                        );
                    }
                }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to inspect, skipping");
                report.record_error(Some(path.to_path_buf()), e.to_string());
            }
        }
    }

    fn handle_invalid(
        &self,
        file: &MediaFile,
        reason: InvalidReason,
        ctx: &mut RunContext<'_>,
        report: &mut ScanReport,
    ) {
        let path = file.path();
        match &reason {
            InvalidReason::TooSmall { size } => {
                error!(path = %path.display(), size, "file too small");
            }
            InvalidReason::Corrupt { message } => {
                error!(
                    path = %path.display(),
                    media_type = %file.media_type(),
                    error = %message,
                    "failed to parse"
                );
            }
        }

        let moved_to = match ctx.quarantine {
            Some(dir) => self.relocate(path, dir, CollisionStyle::AppendCounter, ctx, report),
            None => None,
        };

        report.record_invalid(
            InvalidEntry {
                path: path.to_path_buf(),
                media_type: file.media_type(),
                reason,
                moved_to,
            },
            file.size(),
        );
    }

    /// Moves (or in a dry run, plans) a file, recording failures in the report
    fn relocate(
        &self,
        path: &Path,
        dest_dir: &Path,
        style: CollisionStyle,
        ctx: &mut RunContext<'_>,
        report: &mut ScanReport,
    ) -> Option<PathBuf> {
        let result = if ctx.dry_run {
            self.relocator.plan(path, dest_dir, style)
        } else {
            self.relocator.relocate(path, dest_dir, style)
        };

        match result {
            Ok(to) => {
                if ctx.dry_run {
                    info!(from = %path.display(), to = %to.display(), "would move");
                } else {
                    info!(from = %path.display(), to = %to.display(), "moved");
                }
                ctx.relocated.insert(to.clone());
                Some(to)
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "failed to move");
                report.record_error(Some(path.to_path_buf()), e.to_string());
                None
            }
        }
    }
}

/// Checks that `path` is an existing directory and returns it canonicalized
fn resolve_dir(name: &'static str, path: &Path) -> Result<PathBuf, ScanError> {
    let unavailable = |source| ScanError::PathUnavailable {
        name,
        path: path.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(path).map_err(unavailable)?;
    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory {
            name,
            path: path.to_path_buf(),
        });
    }
    fs::canonicalize(path).map_err(unavailable)
}
