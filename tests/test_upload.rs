mod common;

use anpr_reader::upload::{accept_upload, read_upload, read_upload_async, sniff_mime};
use common::*;

#[test]
fn test_picker_reads_png() -> anyhow::Result<()> {
    let file = create_test_image();

    let image = read_upload(Some(file.path()), UploadSource::Picker).expect("png accepted");

    assert_eq!(image.mime(), "image/png");
    assert!(image.is_image());
    assert_eq!(image.bytes(), std::fs::read(file.path())?.as_slice());
    assert_eq!(
        Some(image.name()),
        file.path().file_name().and_then(|n| n.to_str())
    );

    Ok(())
}

#[test]
fn test_drop_accepts_image() {
    let file = create_test_image();
    let image = read_upload(Some(file.path()), UploadSource::Drop);
    assert!(image.is_some_and(|i| i.mime() == "image/png"));
}

#[test]
fn test_drop_ignores_non_image() {
    let file = create_text_file(".txt");
    assert!(read_upload(Some(file.path()), UploadSource::Drop).is_none());
}

#[test]
fn test_picker_keeps_unknown_type() {
    let file = create_text_file(".txt");
    let image = read_upload(Some(file.path()), UploadSource::Picker).expect("picker does not filter");
    assert_eq!(image.mime(), "application/octet-stream");
    assert!(!image.is_image());
}

#[test]
fn test_no_selection_is_a_no_op() {
    assert!(read_upload(None, UploadSource::Picker).is_none());
}

#[test]
fn test_unreadable_file_is_ignored() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let missing = dir.path().join("gone.png");
    assert!(read_upload(Some(&missing), UploadSource::Picker).is_none());
    Ok(())
}

#[test]
fn test_content_wins_over_extension() {
    let png = create_test_image();
    let bytes = std::fs::read(png.path()).expect("read test image");

    let renamed = std::path::Path::new("photo.jpg");
    assert_eq!(sniff_mime(renamed, &bytes), Some("image/png"));
    assert_eq!(sniff_mime(renamed, b"garbage"), Some("image/jpeg"));

    let image = accept_upload(renamed, bytes, UploadSource::Drop).expect("png content accepted");
    assert_eq!(image.name(), "photo.jpg");
    assert_eq!(image.mime(), "image/png");
}

#[test]
fn test_data_uri() {
    let image = UploadedImage::new("a.png", "image/png", vec![1u8, 2, 3]);
    assert_eq!(image.data_uri(), "data:image/png;base64,AQID");
}

#[tokio::test]
async fn test_async_read_matches_sync() {
    let file = create_test_image();

    let sync = read_upload(Some(file.path()), UploadSource::Drop);
    let async_read = read_upload_async(Some(file.path().to_path_buf()), UploadSource::Drop).await;

    assert!(sync.is_some());
    assert_eq!(sync, async_read);
}
