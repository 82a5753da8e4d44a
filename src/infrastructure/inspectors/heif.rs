//! HEIF/HEIC inspector
//!
//! The `image` crate cannot decode HEIC, so the container is checked by
//! letting kamadak-exif walk its ISO-BMFF boxes down to the EXIF item.

use super::exif_reader;
use crate::core::InspectError;
use crate::domain::entities::{MediaFile, MediaMetadata, MediaType};
use crate::domain::services::MediaInspector;
use std::fs::File;
use std::io::BufReader;
use tracing::debug;

/// Inspector for HEIC/HEIF files
pub struct HeifInspector {
    supported_types: Vec<MediaType>,
}

impl HeifInspector {
    pub fn new() -> Self {
        Self {
            supported_types: vec![MediaType::Heic],
        }
    }
}

impl Default for HeifInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaInspector for HeifInspector {
    fn supported_types(&self) -> &[MediaType] {
        &self.supported_types
    }

    fn inspect(&self, file: &MediaFile) -> Result<MediaMetadata, InspectError> {
        if !self.supports(file.media_type()) {
            return Err(InspectError::UnsupportedType(file.media_type()));
        }

        let path = file.path();
        let handle = File::open(path).map_err(|source| InspectError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        match exif_reader::read_exif_from(&mut BufReader::new(handle)) {
            Ok(exif) => Ok(exif_reader::metadata_from_exif(&exif)),
            // Well-formed container, just no EXIF item.
            Err(exif::Error::NotFound(what)) => {
                debug!(path = %path.display(), what, "HEIF container has no EXIF");
                Ok(MediaMetadata::default())
            }
            Err(e) => Err(InspectError::Container {
                media_type: MediaType::Heic,
                message: e.to_string(),
            }),
        }
    }
}
