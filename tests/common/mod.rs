//! Shared fixtures for integration tests
#![allow(dead_code)]

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::fs::{self, File};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// 2020-09-13T12:26:40Z, far enough from a month boundary for any timezone
pub const FIXED_MTIME_SECS: u64 = 1_600_000_000;

pub fn fixed_mtime() -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(FIXED_MTIME_SECS)
}

/// Encodes a small gradient in the given format
pub fn encode_image(format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_fn(16, 16, |x, y| Rgb([(x * 16) as u8, (y * 16) as u8, 128]));
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, format)
        .unwrap();
    buf.into_inner()
}

pub fn jpeg_bytes() -> Vec<u8> {
    encode_image(ImageFormat::Jpeg)
}

pub fn png_bytes() -> Vec<u8> {
    encode_image(ImageFormat::Png)
}

pub fn tiff_bytes() -> Vec<u8> {
    encode_image(ImageFormat::Tiff)
}

/// Bytes that no decoder accepts
pub fn garbage_bytes() -> Vec<u8> {
    b"this is definitely not an image, just some text padding it out".to_vec()
}

/// A real PNG cut off after its header chunk
pub fn broken_png_bytes() -> Vec<u8> {
    let mut data = png_bytes();
    data.truncate(40);
    data
}

fn push_ifd_entry(out: &mut Vec<u8>, tag: u16, kind: u16, count: u32, value: u32) {
    out.extend_from_slice(&tag.to_le_bytes());
    out.extend_from_slice(&kind.to_le_bytes());
    out.extend_from_slice(&count.to_le_bytes());
    out.extend_from_slice(&value.to_le_bytes());
}

fn ascii(value: &str) -> Vec<u8> {
    let mut bytes = value.as_bytes().to_vec();
    bytes.push(0);
    assert!(bytes.len() > 4, "inline ASCII values are not supported");
    bytes
}

/// Builds a little-endian TIFF structure holding Make, Model and
/// DateTimeOriginal, as stored inside a JPEG APP1 segment
pub fn exif_tiff(make: &str, model: &str, datetime: &str) -> Vec<u8> {
    const ASCII: u16 = 2;
    const LONG: u16 = 4;

    let make = ascii(make);
    let model = ascii(model);
    let datetime = ascii(datetime);

    let ifd0_offset = 8u32;
    let ifd0_len = 2 + 3 * 12 + 4;
    let exif_ifd_offset = ifd0_offset + ifd0_len;
    let exif_ifd_len = 2 + 12 + 4;
    let make_offset = exif_ifd_offset + exif_ifd_len;
    let model_offset = make_offset + make.len() as u32;
    let datetime_offset = model_offset + model.len() as u32;

    let mut out = b"II\x2A\x00".to_vec();
    out.extend_from_slice(&ifd0_offset.to_le_bytes());

    out.extend_from_slice(&3u16.to_le_bytes());
    push_ifd_entry(&mut out, 0x010F, ASCII, make.len() as u32, make_offset);
    push_ifd_entry(&mut out, 0x0110, ASCII, model.len() as u32, model_offset);
    push_ifd_entry(&mut out, 0x8769, LONG, 1, exif_ifd_offset);
    out.extend_from_slice(&0u32.to_le_bytes());

    out.extend_from_slice(&1u16.to_le_bytes());
    push_ifd_entry(&mut out, 0x9003, ASCII, datetime.len() as u32, datetime_offset);
    out.extend_from_slice(&0u32.to_le_bytes());

    out.extend_from_slice(&make);
    out.extend_from_slice(&model);
    out.extend_from_slice(&datetime);
    out
}

/// A decodable JPEG carrying an EXIF APP1 segment right after SOI
pub fn jpeg_with_exif(make: &str, model: &str, datetime: &str) -> Vec<u8> {
    let jpeg = jpeg_bytes();
    let tiff = exif_tiff(make, model, datetime);

    let mut app1 = vec![0xFF, 0xE1];
    app1.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
    app1.extend_from_slice(b"Exif\0\0");
    app1.extend_from_slice(&tiff);

    let mut out = jpeg[..2].to_vec();
    out.extend_from_slice(&app1);
    out.extend_from_slice(&jpeg[2..]);
    out
}

/// Writes `data` to `root/relative`, creating parent directories
pub fn write_file(root: &Path, relative: &str, data: &[u8]) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, data).unwrap();
    path
}

pub fn set_mtime(path: &Path, time: SystemTime) {
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(time)
        .unwrap();
}

/// Lists file names directly inside `dir`, sorted
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
