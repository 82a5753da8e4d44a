use crate::domain::entities::MediaType;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a run before any file is examined
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("{name} error: {source}")]
    PathUnavailable {
        name: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{name} is not a directory: {}", path.display())]
    NotADirectory { name: &'static str, path: PathBuf },

    #[error("{name} must differ from the scan path: {}", path.display())]
    SameAsScanPath { name: &'static str, path: PathBuf },

    #[error("Unknown extension in filter: {0}")]
    UnknownExtension(String),

    #[error("Extension filter is empty")]
    EmptyFilter,
}

/// Errors that can occur while inspecting a single media file
#[derive(Error, Debug)]
pub enum InspectError {
    /// The file could not be opened at all. Not a sign of corruption.
    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{media_type} decode error: {message}")]
    Decode {
        media_type: MediaType,
        message: String,
    },

    #[error("Invalid {media_type} container: {message}")]
    Container {
        media_type: MediaType,
        message: String,
    },

    #[error("Unsupported media type: {0}")]
    UnsupportedType(MediaType),
}

impl InspectError {
    /// Whether this error says something about the file's content
    pub fn is_corruption(&self) -> bool {
        matches!(self, InspectError::Decode { .. } | InspectError::Container { .. })
    }
}

/// Errors that can occur when moving a file out of the scan tree
#[derive(Error, Debug)]
pub enum RelocateError {
    #[error("Path has no file name: {}", .0.display())]
    NoFileName(PathBuf),

    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to check {}: {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to move {} to {}: {source}", from.display(), to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No free name for {} after {attempts} attempts", path.display())]
    Exhausted { path: PathBuf, attempts: u32 },
}

/// Errors that can occur when writing the run report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
