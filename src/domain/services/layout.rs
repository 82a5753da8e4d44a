//! Library layout service
//!
//! Decides where a valid file belongs inside the organize root, based on
//! its capture date and the device that produced it.

use crate::domain::entities::{DateSource, MediaFile, MediaMetadata};
use chrono::{DateTime, Datelike, Local, NaiveDate};
use std::path::{Path, PathBuf};

/// Directory used when no date can be determined
pub const UNDATED_DIR: &str = "Undated";

/// Directory used when the file carries no make or model
pub const UNKNOWN_DEVICE_DIR: &str = "Unknown Device";

/// Shape of the folder hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutScheme {
    /// `YYYY/MM/<device>`
    #[default]
    DateDevice,
    /// `YYYY/MM`
    Date,
    /// `<device>/YYYY/MM`
    DeviceDate,
}

/// A calendar date together with where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureDate {
    pub date: NaiveDate,
    pub source: DateSource,
}

/// Maps metadata to a relative directory
#[derive(Debug, Clone, Copy, Default)]
pub struct LibraryLayout {
    scheme: LayoutScheme,
}

impl LibraryLayout {
    pub fn new(scheme: LayoutScheme) -> Self {
        Self { scheme }
    }

    /// Picks the EXIF capture date, falling back to the modification time
    pub fn resolve_date(metadata: &MediaMetadata, file: &MediaFile) -> Option<CaptureDate> {
        if let Some(captured) = metadata.captured_at {
            return Some(CaptureDate {
                date: captured.date(),
                source: DateSource::Exif,
            });
        }

        file.modified().map(|modified| CaptureDate {
            date: DateTime::<Local>::from(modified).date_naive(),
            source: DateSource::FileSystem,
        })
    }

    /// Builds the directory relative to the organize root
    pub fn relative_dir(&self, date: Option<NaiveDate>, device: Option<&str>) -> PathBuf {
        let mut date_part = PathBuf::new();
        match date {
            Some(date) => {
                date_part.push(format!("{:04}", date.year()));
                date_part.push(format!("{:02}", date.month()));
            }
            None => date_part.push(UNDATED_DIR),
        }

        let device_part = device
            .map(sanitize_component)
            .unwrap_or_else(|| UNKNOWN_DEVICE_DIR.to_string());

        match self.scheme {
            LayoutScheme::DateDevice => date_part.join(device_part),
            LayoutScheme::Date => date_part,
            LayoutScheme::DeviceDate => PathBuf::from(device_part).join(date_part),
        }
    }

    /// Returns the absolute destination directory and the date used
    pub fn destination_dir(
        &self,
        root: &Path,
        metadata: &MediaMetadata,
        file: &MediaFile,
    ) -> (PathBuf, Option<CaptureDate>) {
        let capture = Self::resolve_date(metadata, file);
        let device = metadata.device_label();
        let relative = self.relative_dir(capture.map(|c| c.date), device.as_deref());
        (root.join(relative), capture)
    }
}

/// Turns an arbitrary string into a single safe path component
///
/// Separators, reserved characters and control characters become `_`,
/// runs of whitespace collapse to one space, and leading/trailing dots and
/// spaces are dropped so the result is never hidden, `.` or `..`.
pub fn sanitize_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;

    for c in raw.chars() {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        if c.is_control() || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') {
            out.push('_');
        } else {
            out.push(c);
        }
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == ' ');
    if trimmed.is_empty() {
        "_".to_string()
    } else {
        trimmed.to_string()
    }
}
