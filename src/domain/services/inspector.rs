//! Media inspector trait
//!
//! Defines the interface for verifying a media file's structure and
//! reading its embedded metadata.

use crate::core::InspectError;
use crate::domain::entities::{MediaFile, MediaMetadata, MediaType};

/// Trait for checking media files with a format-specific parser
///
/// Implementations delegate the actual parsing to an external decoder.
/// An `Ok` result means the decoder accepted the file; the returned
/// metadata may be empty.
///
/// # Example
///
/// ```ignore
/// let inspector = MediaInspectors::new();
/// let metadata = inspector.inspect(&file)?;
/// println!("Captured at: {:?}", metadata.captured_at);
/// ```
pub trait MediaInspector: Send + Sync {
    /// Returns the media types this inspector supports
    fn supported_types(&self) -> &[MediaType];

    /// Checks if this inspector supports the given media type
    fn supports(&self, media_type: MediaType) -> bool {
        self.supported_types().contains(&media_type)
    }

    /// Parses the file and returns its metadata
    ///
    /// Returns [`InspectError::Open`] when the file cannot be opened, and a
    /// corruption error (see [`InspectError::is_corruption`]) when the
    /// parser rejects the content.
    fn inspect(&self, file: &MediaFile) -> Result<MediaMetadata, InspectError>;
}
