//! Media inspectors
//!
//! Format-specific checks backed by external decoders, and a dispatcher
//! that routes each file to the right one.

pub mod exif_reader;
mod heif;
mod raster;

pub use heif::HeifInspector;
pub use raster::RasterInspector;

use crate::core::InspectError;
use crate::domain::entities::{MediaFile, MediaMetadata, MediaType};
use crate::domain::services::MediaInspector;

/// Dispatches to the first registered inspector supporting a file's type
pub struct MediaInspectors {
    inspectors: Vec<Box<dyn MediaInspector>>,
    supported_types: Vec<MediaType>,
}

impl MediaInspectors {
    /// Creates a dispatcher with every built-in inspector
    pub fn new() -> Self {
        Self::empty()
            .with(Box::new(RasterInspector::new()))
            .with(Box::new(HeifInspector::new()))
    }

    /// Creates a dispatcher with no inspectors
    pub fn empty() -> Self {
        Self {
            inspectors: Vec::new(),
            supported_types: Vec::new(),
        }
    }

    /// Registers an inspector
    pub fn with(mut self, inspector: Box<dyn MediaInspector>) -> Self {
        for t in inspector.supported_types() {
            if !self.supported_types.contains(t) {
                self.supported_types.push(*t);
            }
        }
        self.inspectors.push(inspector);
        self
    }
}

impl Default for MediaInspectors {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaInspector for MediaInspectors {
    fn supported_types(&self) -> &[MediaType] {
        &self.supported_types
    }

    fn inspect(&self, file: &MediaFile) -> Result<MediaMetadata, InspectError> {
        self.inspectors
            .iter()
            .find(|i| i.supports(file.media_type()))
            .ok_or(InspectError::UnsupportedType(file.media_type()))?
            .inspect(file)
    }
}
