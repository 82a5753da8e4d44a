//! Raster image inspector
//!
//! Verifies JPEG, PNG and TIFF files by fully decoding them with the
//! `image` crate.

use super::exif_reader;
use crate::core::InspectError;
use crate::domain::entities::{MediaFile, MediaMetadata, MediaType};
use crate::domain::services::MediaInspector;
use image::{GenericImageView, ImageError, ImageFormat, ImageReader};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{trace, warn};

/// Inspector for formats the `image` crate can decode
pub struct RasterInspector {
    supported_types: Vec<MediaType>,
}

impl RasterInspector {
    pub fn new() -> Self {
        Self {
            supported_types: vec![MediaType::Jpeg, MediaType::Png, MediaType::Tiff],
        }
    }

    fn image_format(media_type: MediaType) -> Option<ImageFormat> {
        match media_type {
            MediaType::Jpeg => Some(ImageFormat::Jpeg),
            MediaType::Png => Some(ImageFormat::Png),
            MediaType::Tiff => Some(ImageFormat::Tiff),
            MediaType::Heic => None,
        }
    }

    fn open(path: &Path) -> Result<BufReader<File>, InspectError> {
        File::open(path)
            .map(BufReader::new)
            .map_err(|source| InspectError::Open {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Header-only check used when a full decode would exceed the limits
    fn check_dimensions(
        path: &Path,
        media_type: MediaType,
        format: ImageFormat,
    ) -> Result<(u32, u32), InspectError> {
        ImageReader::with_format(Self::open(path)?, format)
            .into_dimensions()
            .map_err(|e| InspectError::Decode {
                media_type,
                message: e.to_string(),
            })
    }
}

impl Default for RasterInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaInspector for RasterInspector {
    fn supported_types(&self) -> &[MediaType] {
        &self.supported_types
    }

    fn inspect(&self, file: &MediaFile) -> Result<MediaMetadata, InspectError> {
        let media_type = file.media_type();
        let format =
            Self::image_format(media_type).ok_or(InspectError::UnsupportedType(media_type))?;
        let path = file.path();

        match ImageReader::with_format(Self::open(path)?, format).decode() {
            Ok(image) => {
                let (width, height) = image.dimensions();
                trace!(path = %path.display(), width, height, "decoded");
            }
            Err(ImageError::Limits(e)) => {
                let (width, height) = Self::check_dimensions(path, media_type, format)?;
                warn!(
                    path = %path.display(),
                    width,
                    height,
                    error = %e,
                    "image exceeds decoder limits, only the header was verified"
                );
            }
            Err(ImageError::Unsupported(e)) => {
                warn!(
                    path = %path.display(),
                    media_type = %media_type,
                    error = %e,
                    "decoder does not support this variant, structure not verified"
                );
            }
            Err(e) => {
                return Err(InspectError::Decode {
                    media_type,
                    message: e.to_string(),
                });
            }
        }

        Ok(exif_reader::read_metadata(path))
    }
}
