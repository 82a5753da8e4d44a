//! EXIF metadata extraction
//!
//! Thin wrapper over kamadak-exif that pulls out the handful of tags the
//! organizer needs. Missing tags are never an error.

use crate::domain::entities::MediaMetadata;
use chrono::{NaiveDate, NaiveDateTime};
use exif::{Exif, In, Reader, Tag, Value};
use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::Path;
use tracing::debug;

/// Date tags in order of preference
const DATE_TAGS: [Tag; 3] = [Tag::DateTimeOriginal, Tag::DateTimeDigitized, Tag::DateTime];

const DATETIME_FORMATS: [&str; 3] = ["%Y:%m:%d %H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y:%m:%d %H:%M"];

/// Parses EXIF from any container kamadak-exif understands
pub fn read_exif_from<R: BufRead + Seek>(reader: &mut R) -> Result<Exif, exif::Error> {
    Reader::new().read_from_container(reader)
}

/// Reads metadata from a file, returning empty metadata on any failure
pub fn read_metadata(path: &Path) -> MediaMetadata {
    let result = File::open(path)
        .map_err(exif::Error::from)
        .and_then(|file| read_exif_from(&mut BufReader::new(file)));

    match result {
        Ok(exif) => {
            let metadata = metadata_from_exif(&exif);
            if metadata.is_empty() {
                debug!(path = %path.display(), "EXIF has no date, make or model");
            }
            metadata
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no usable EXIF");
            MediaMetadata::default()
        }
    }
}

/// Extracts capture date, make and model from parsed EXIF
pub fn metadata_from_exif(exif: &Exif) -> MediaMetadata {
    let captured_at = DATE_TAGS
        .iter()
        .filter_map(|tag| ascii_field(exif, *tag))
        .find_map(|value| parse_exif_datetime(&value));

    MediaMetadata {
        captured_at,
        make: ascii_field(exif, Tag::Make),
        model: ascii_field(exif, Tag::Model),
    }
}

fn ascii_field(exif: &Exif, tag: Tag) -> Option<String> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    let Value::Ascii(parts) = &field.value else {
        return None;
    };

    let joined = parts
        .iter()
        .map(|p| String::from_utf8_lossy(p).into_owned())
        .collect::<Vec<_>>()
        .join(" ");
    let trimmed = joined.trim_matches(|c: char| c == '\0' || c.is_whitespace());

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parses an EXIF date-time string (`YYYY:MM:DD HH:MM:SS`)
///
/// Zeroed placeholders such as `0000:00:00 00:00:00` yield `None`.
pub fn parse_exif_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed);
        }
    }

    NaiveDate::parse_from_str(value, "%Y:%m:%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
