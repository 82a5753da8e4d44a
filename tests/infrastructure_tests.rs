//! Infrastructure layer unit tests
//!
//! Tests for the tree walker, the inspectors, the relocator and the
//! report writer.

mod common;

use common::*;
use imgdiag::application::dto::{InvalidEntry, ScanReport};
use imgdiag::core::{InspectError, RelocateError};
use imgdiag::domain::entities::{InvalidReason, MediaFile, MediaType};
use imgdiag::domain::repositories::{CollisionStyle, FileRelocator};
use imgdiag::domain::services::MediaInspector;
use imgdiag::infrastructure::inspectors::{
    HeifInspector, MediaInspectors, RasterInspector, exif_reader,
};
use imgdiag::infrastructure::persistence::{LocalRelocator, ReportWriter};
use imgdiag::infrastructure::walker::TreeWalker;
use rstest::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn media_file(path: &Path, media_type: MediaType) -> MediaFile {
    let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    MediaFile::new(path, size, media_type)
}

// ============================================================================
// TreeWalker Tests
// ============================================================================

#[fixture]
fn tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write_file(root, "a.jpg", b"a");
    write_file(root, "b/c.png", b"c");
    write_file(root, ".dot.jpg", b"d");
    write_file(root, ".cache/e.jpg", b"e");
    write_file(root, "$RECYCLE.BIN/f.jpg", b"f");
    write_file(root, "skip/g.jpg", b"g");
    dir
}

fn walked(walker: &TreeWalker) -> Vec<PathBuf> {
    walker
        .files()
        .map(|r| r.unwrap().path().strip_prefix(walker.root()).unwrap().to_path_buf())
        .collect()
}

#[rstest]
fn test_walker_skips_hidden(tree: TempDir) {
    let walker = TreeWalker::new(tree.path());
    assert_eq!(
        walked(&walker),
        vec![
            PathBuf::from("a.jpg"),
            PathBuf::from("b/c.png"),
            PathBuf::from("skip/g.jpg"),
        ]
    );
}

#[rstest]
fn test_walker_includes_hidden(tree: TempDir) {
    let walker = TreeWalker::new(tree.path()).include_hidden(true);
    let files = walked(&walker);
    assert_eq!(files.len(), 6);
    assert!(files.contains(&PathBuf::from(".cache/e.jpg")));
    assert!(files.contains(&PathBuf::from("$RECYCLE.BIN/f.jpg")));
}

#[rstest]
fn test_walker_prunes_skip_dirs(tree: TempDir) {
    let walker = TreeWalker::new(tree.path()).skip_dir(tree.path().join("skip"));
    let files = walked(&walker);
    assert!(!files.contains(&PathBuf::from("skip/g.jpg")));
    assert_eq!(files.len(), 2);
}

#[test]
fn test_walker_never_filters_root() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join(".hidden-root");
    write_file(&root, "inside.jpg", b"x");

    let walker = TreeWalker::new(&root);
    assert_eq!(walked(&walker), vec![PathBuf::from("inside.jpg")]);
}

// ============================================================================
// Inspector Tests
// ============================================================================

#[rstest]
#[case("ok.jpg", MediaType::Jpeg, jpeg_bytes())]
#[case("ok.png", MediaType::Png, png_bytes())]
#[case("ok.tif", MediaType::Tiff, tiff_bytes())]
fn test_raster_accepts_valid(
    #[case] name: &str,
    #[case] media_type: MediaType,
    #[case] data: Vec<u8>,
) {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), name, &data);

    let metadata = RasterInspector::new()
        .inspect(&media_file(&path, media_type))
        .unwrap();
    assert!(metadata.is_empty());
}

#[rstest]
#[case("bad.jpg", MediaType::Jpeg, garbage_bytes())]
#[case("bad.png", MediaType::Png, broken_png_bytes())]
fn test_raster_rejects_corrupt(
    #[case] name: &str,
    #[case] media_type: MediaType,
    #[case] data: Vec<u8>,
) {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), name, &data);

    let err = RasterInspector::new()
        .inspect(&media_file(&path, media_type))
        .unwrap_err();
    assert!(err.is_corruption());
    assert!(matches!(err, InspectError::Decode { media_type: t, .. } if t == media_type));
}

#[test]
fn test_raster_open_failure_is_not_corruption() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.jpg");

    let err = RasterInspector::new()
        .inspect(&MediaFile::new(&path, 100, MediaType::Jpeg))
        .unwrap_err();
    assert!(matches!(err, InspectError::Open { .. }));
    assert!(!err.is_corruption());
}

#[test]
fn test_raster_reads_exif() {
    let dir = TempDir::new().unwrap();
    let data = jpeg_with_exif("Canon", "Canon EOS 5D", "2021:07:04 12:30:00");
    let path = write_file(dir.path(), "exif.jpg", &data);

    let metadata = RasterInspector::new()
        .inspect(&media_file(&path, MediaType::Jpeg))
        .unwrap();
    assert_eq!(metadata.make.as_deref(), Some("Canon"));
    assert_eq!(metadata.model.as_deref(), Some("Canon EOS 5D"));
    assert_eq!(
        metadata.captured_at.map(|d| d.to_string()).as_deref(),
        Some("2021-07-04 12:30:00")
    );
}

#[test]
fn test_exif_reader_tolerates_missing_exif() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "plain.png", &png_bytes());
    assert!(exif_reader::read_metadata(&path).is_empty());
    assert!(exif_reader::read_metadata(&dir.path().join("nope.png")).is_empty());
}

#[test]
fn test_heif_rejects_garbage() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "bad.heic", &garbage_bytes());

    let err = HeifInspector::new()
        .inspect(&media_file(&path, MediaType::Heic))
        .unwrap_err();
    assert!(matches!(err, InspectError::Container { .. }));
    assert!(err.is_corruption());
}

#[test]
fn test_heif_refuses_other_types() {
    let err = HeifInspector::new()
        .inspect(&MediaFile::new("x.png", 10, MediaType::Png))
        .unwrap_err();
    assert!(matches!(err, InspectError::UnsupportedType(MediaType::Png)));
}

#[test]
fn test_dispatcher_routes_by_type() {
    let inspectors = MediaInspectors::new();
    for media_type in MediaType::ALL {
        assert!(inspectors.supports(media_type));
    }

    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "bad.heic", &garbage_bytes());
    let err = inspectors
        .inspect(&media_file(&path, MediaType::Heic))
        .unwrap_err();
    assert!(matches!(err, InspectError::Container { .. }));

    let empty = MediaInspectors::empty();
    let err = empty
        .inspect(&media_file(&path, MediaType::Heic))
        .unwrap_err();
    assert!(matches!(err, InspectError::UnsupportedType(MediaType::Heic)));
}

// ============================================================================
// LocalRelocator Tests
// ============================================================================

#[fixture]
fn dirs() -> (TempDir, PathBuf, PathBuf) {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("src");
    let dest = dir.path().join("dest");
    fs::create_dir_all(&src).unwrap();
    (dir, src, dest)
}

#[rstest]
fn test_relocate_appends_counter(dirs: (TempDir, PathBuf, PathBuf)) {
    let (_dir, src, dest) = dirs;
    let relocator = LocalRelocator::new();

    let first = write_file(&src, "a/bad.jpg", b"one");
    let second = write_file(&src, "b/bad.jpg", b"two");
    let third = write_file(&src, "c/bad.jpg", b"three");

    let to1 = relocator.relocate(&first, &dest, CollisionStyle::AppendCounter).unwrap();
    let to2 = relocator.relocate(&second, &dest, CollisionStyle::AppendCounter).unwrap();
    let to3 = relocator.relocate(&third, &dest, CollisionStyle::AppendCounter).unwrap();

    assert_eq!(to1, dest.join("bad.jpg"));
    assert_eq!(to2, dest.join("bad.jpg.1"));
    assert_eq!(to3, dest.join("bad.jpg.2"));
    assert_eq!(fs::read(&to2).unwrap(), b"two");
    assert!(!first.exists() && !second.exists() && !third.exists());
}

#[rstest]
fn test_relocate_numbers_stem(dirs: (TempDir, PathBuf, PathBuf)) {
    let (_dir, src, dest) = dirs;
    write_file(&dest, "photo.jpg", b"existing");
    let source = write_file(&src, "photo.jpg", b"new");

    let to = LocalRelocator::new()
        .relocate(&source, &dest, CollisionStyle::NumberStem)
        .unwrap();
    assert_eq!(to, dest.join("photo-1.jpg"));
    assert_eq!(fs::read(dest.join("photo.jpg")).unwrap(), b"existing");
}

#[rstest]
fn test_relocate_reports_blocked_destination(dirs: (TempDir, PathBuf, PathBuf)) {
    let (_dir, src, dest) = dirs;
    write_file(&dest, "2021", b"a file where a directory should be");
    let source = write_file(&src, "photo.jpg", b"x");

    let err = LocalRelocator::new()
        .relocate(&source, &dest.join("2021/07"), CollisionStyle::NumberStem)
        .unwrap_err();
    assert!(matches!(err, RelocateError::CreateDir { .. }));
    assert!(source.exists());
}

#[rstest]
fn test_plan_reserves_without_moving(dirs: (TempDir, PathBuf, PathBuf)) {
    let (_dir, src, dest) = dirs;
    let relocator = LocalRelocator::new();

    let first = write_file(&src, "a/bad.jpg", b"one");
    let second = write_file(&src, "b/bad.jpg", b"two");

    let to1 = relocator.plan(&first, &dest, CollisionStyle::AppendCounter).unwrap();
    let to2 = relocator.plan(&second, &dest, CollisionStyle::AppendCounter).unwrap();

    assert_eq!(to1, dest.join("bad.jpg"));
    assert_eq!(to2, dest.join("bad.jpg.1"));
    assert!(first.exists() && second.exists());
    assert!(!dest.exists());
}

#[cfg(unix)]
#[rstest]
fn test_dangling_symlink_counts_as_taken(dirs: (TempDir, PathBuf, PathBuf)) {
    let (_dir, src, dest) = dirs;
    fs::create_dir_all(&dest).unwrap();
    std::os::unix::fs::symlink(dest.join("nowhere"), dest.join("bad.jpg")).unwrap();
    let source = write_file(&src, "bad.jpg", b"x");

    let to = LocalRelocator::new()
        .relocate(&source, &dest, CollisionStyle::AppendCounter)
        .unwrap();
    assert_eq!(to, dest.join("bad.jpg.1"));
}

// ============================================================================
// ReportWriter Tests
// ============================================================================

#[test]
fn test_report_writer_outputs_json() {
    let dir = TempDir::new().unwrap();
    let mut report = ScanReport::new(dir.path().to_path_buf(), false);
    report.files_examined = 2;
    report.record_valid(MediaType::Png);
    report.record_invalid(
        InvalidEntry {
            path: dir.path().join("bad.jpg"),
            media_type: MediaType::Jpeg,
            reason: InvalidReason::TooSmall { size: 2 },
            moved_to: None,
        },
        2,
    );

    let out = dir.path().join("reports/run.json");
    ReportWriter::write(&report, &out).unwrap();

    let json: serde_json::Value = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
    assert_eq!(json["files_examined"], 2);
    assert_eq!(json["valid"], 1);
    assert_eq!(json["too_small"], 1);
    assert_eq!(json["by_type"]["JPEG"]["invalid"], 1);
    assert_eq!(json["by_type"]["PNG"]["valid"], 1);
    assert_eq!(json["invalid_files"][0]["reason"]["kind"], "too_small");
    assert_eq!(json["invalid_files"][0]["media_type"], "JPEG");
}
