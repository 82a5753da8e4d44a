//! Media file entity
//!
//! A candidate file found during the walk, and the metadata read from it.

use super::MediaType;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A file selected for inspection by its extension
#[derive(Debug, Clone)]
pub struct MediaFile {
    path: PathBuf,
    size: u64,
    media_type: MediaType,
    modified: Option<SystemTime>,
}

impl MediaFile {
    /// Creates a new media file
    pub fn new(path: impl Into<PathBuf>, size: u64, media_type: MediaType) -> Self {
        Self {
            path: path.into(),
            size,
            media_type,
            modified: None,
        }
    }

    /// Sets the filesystem modification time
    pub fn with_modified(mut self, modified: Option<SystemTime>) -> Self {
        self.modified = modified;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }
}

/// Metadata embedded in a media file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaMetadata {
    /// Capture date-time as recorded by the device (no timezone)
    pub captured_at: Option<NaiveDateTime>,
    /// Camera manufacturer
    pub make: Option<String>,
    /// Camera model
    pub model: Option<String>,
}

impl MediaMetadata {
    /// Returns true when nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.captured_at.is_none() && self.make.is_none() && self.model.is_none()
    }

    /// Human-readable device name built from make and model
    ///
    /// Many vendors repeat the make inside the model string
    /// ("Canon" / "Canon EOS 5D"), in which case only the model is used.
    pub fn device_label(&self) -> Option<String> {
        let make = self.make.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let model = self.model.as_deref().map(str::trim).filter(|s| !s.is_empty());

        match (make, model) {
            (Some(make), Some(model)) => {
                if model.to_lowercase().starts_with(&make.to_lowercase()) {
                    Some(model.to_string())
                } else {
                    Some(format!("{} {}", make, model))
                }
            }
            (Some(make), None) => Some(make.to_string()),
            (None, Some(model)) => Some(model.to_string()),
            (None, None) => None,
        }
    }
}

/// Where a capture date came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSource {
    Exif,
    FileSystem,
}
