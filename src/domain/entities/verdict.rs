//! Verdict entity
//!
//! Outcome of checking one media file.

use super::MediaMetadata;
use serde::Serialize;
use std::fmt;

/// Why a file was judged invalid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InvalidReason {
    /// Smaller than the minimum size any real image can have
    TooSmall { size: u64 },
    /// The delegate parser rejected the content
    Corrupt { message: String },
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::TooSmall { size } => write!(f, "file too small ({} bytes)", size),
            InvalidReason::Corrupt { message } => write!(f, "failed to parse: {}", message),
        }
    }
}

/// Result of checking a media file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Valid(MediaMetadata),
    Invalid(InvalidReason),
}
