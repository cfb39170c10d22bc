//! Thumbnail output and fallback behavior.
//!
//! These tests run without ffmpeg or any system font installed: the
//! placeholder path must carry them regardless.

use moabit::{THUMBNAIL_FILE_NAME, ThumbnailConfig, generate_thumbnail};
use std::path::Path;
use tempfile::tempdir;

#[tokio::test]
async fn placeholder_for_non_video_is_a_valid_image() {
    let src = tempdir().unwrap();
    let path = src.path().join("track.flac");
    std::fs::write(&path, b"fLaC\x00\x00\x00\x22").unwrap();

    let out = tempdir().unwrap();
    let config = ThumbnailConfig::default();

    let thumb = generate_thumbnail(&path, "audio/flac", None, &config, out.path())
        .await
        .unwrap();

    assert_eq!(thumb.file_name().unwrap(), THUMBNAIL_FILE_NAME);
    let img = image::open(&thumb).unwrap();
    assert_eq!((img.width(), img.height()), (400, 400));
}

#[tokio::test]
async fn broken_video_falls_back_to_placeholder() {
    let src = tempdir().unwrap();
    let path = src.path().join("holiday.mp4");
    std::fs::write(&path, b"definitely not an mp4 container").unwrap();

    let out = tempdir().unwrap();
    let config = ThumbnailConfig::default();

    // whether ffmpeg is installed or not, this input cannot produce a frame
    let thumb = generate_thumbnail(&path, "video/mp4", Some("holiday.mp4"), &config, out.path())
        .await
        .unwrap();

    let img = image::open(&thumb).unwrap();
    assert_eq!((img.width(), img.height()), (400, 400));
}

#[tokio::test]
async fn configured_size_is_respected() {
    let src = tempdir().unwrap();
    let path = src.path().join("design.afphoto");
    std::fs::write(&path, b"\x89binary").unwrap();

    let out = tempdir().unwrap();
    let config = ThumbnailConfig {
        size: 192,
        ..Default::default()
    };

    let thumb = generate_thumbnail(&path, "application/x-affinity-photo", None, &config, out.path())
        .await
        .unwrap();

    let img = image::open(&thumb).unwrap();
    assert_eq!((img.width(), img.height()), (192, 192));
}

#[tokio::test]
async fn same_extension_gets_the_same_tile() {
    let src = tempdir().unwrap();
    let path = src.path().join("a.mkv");
    std::fs::write(&path, b"x").unwrap();

    let config = ThumbnailConfig::default();

    let out_a = tempdir().unwrap();
    let out_b = tempdir().unwrap();
    let thumb_a = generate_thumbnail(&path, "application/x-sketch", Some("a.mkv"), &config, out_a.path())
        .await
        .unwrap();
    let thumb_b = generate_thumbnail(&path, "application/x-sketch", Some("b.mkv"), &config, out_b.path())
        .await
        .unwrap();

    let bytes_a = std::fs::read(&thumb_a).unwrap();
    let bytes_b = std::fs::read(&thumb_b).unwrap();
    assert_eq!(bytes_a, bytes_b);
}

#[tokio::test]
async fn unwritable_output_directory_is_an_error() {
    let src = tempdir().unwrap();
    let path = src.path().join("track.ogg");
    std::fs::write(&path, b"OggS").unwrap();

    let config = ThumbnailConfig::default();
    let result = generate_thumbnail(
        &path,
        "audio/ogg",
        None,
        &config,
        Path::new("/nonexistent/moabit-out"),
    )
    .await;

    assert!(result.is_err());
}
