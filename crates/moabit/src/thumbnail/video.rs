//! Video frame extraction via the external ffmpeg tooling.
//!
//! ffmpeg and ffprobe are optional system dependencies: their absence maps to
//! `MissingDependency`, which the thumbnail dispatcher turns into a
//! placeholder fallback. The frame is decoded to PNG over stdout, so no
//! intermediate file is written besides the final WebP.

use crate::config::ThumbnailConfig;
use crate::error::{MoabitError, Result};
use crate::thumbnail::THUMBNAIL_FILE_NAME;
use image::DynamicImage;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::{Duration, timeout};
use tracing::debug;

const FFMPEG_TIMEOUT_SECONDS: u64 = 60;

static FFMPEG_VALIDATED: OnceCell<()> = OnceCell::new();

/// Validate that ffmpeg and ffprobe are available in PATH.
///
/// The check runs once per process.
pub async fn validate_ffmpeg() -> Result<()> {
    if FFMPEG_VALIDATED.get().is_some() {
        return Ok(());
    }

    for tool in ["ffmpeg", "ffprobe"] {
        let output = Command::new(tool).arg("-version").output().await.map_err(|e| {
            MoabitError::MissingDependency(format!(
                "{tool} is required for video thumbnails but was not found in PATH: {e}"
            ))
        })?;

        if !output.status.success() {
            return Err(MoabitError::MissingDependency(format!(
                "{tool} is required for video thumbnails but `{tool} -version` failed"
            )));
        }
    }

    let _ = FFMPEG_VALIDATED.set(());

    Ok(())
}

async fn probe_duration(path: &Path) -> Result<f64> {
    let output = Command::new("ffprobe")
        .arg("-v")
        .arg("error")
        .arg("-show_entries")
        .arg("format=duration")
        .arg("-of")
        .arg("default=noprint_wrappers=1:nokey=1")
        .arg(path)
        .output()
        .await
        .map_err(|e| std::io::Error::other(format!("Failed to execute ffprobe: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(MoabitError::parsing(format!(
            "ffprobe could not read {}: {}",
            path.display(),
            stderr.trim()
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .trim()
        .parse::<f64>()
        .map_err(|e| MoabitError::parsing(format!("Could not parse ffprobe duration {:?}: {}", stdout.trim(), e)))
}

async fn decode_frame(path: &Path, seek_secs: f64) -> Result<DynamicImage> {
    let child = Command::new("ffmpeg")
        .arg("-hide_banner")
        .arg("-loglevel")
        .arg("error")
        .arg("-ss")
        .arg(format!("{seek_secs:.3}"))
        .arg("-i")
        .arg(path)
        .arg("-frames:v")
        .arg("1")
        .arg("-f")
        .arg("image2pipe")
        .arg("-c:v")
        .arg("png")
        .arg("-")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| std::io::Error::other(format!("Failed to execute ffmpeg: {e}")))?;

    let output = match timeout(Duration::from_secs(FFMPEG_TIMEOUT_SECONDS), child.wait_with_output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => return Err(std::io::Error::other(format!("Failed to wait for ffmpeg: {e}")).into()),
        Err(_) => {
            return Err(MoabitError::parsing(format!(
                "ffmpeg frame extraction timed out after {FFMPEG_TIMEOUT_SECONDS} seconds"
            )));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(MoabitError::parsing(format!(
            "ffmpeg could not decode {}: {}",
            path.display(),
            stderr.trim()
        )));
    }

    if output.stdout.is_empty() {
        // audio-only containers and streams past EOF yield success with no frame
        return Err(MoabitError::parsing(format!(
            "ffmpeg produced no frame for {}",
            path.display()
        )));
    }

    image::load_from_memory(&output.stdout)
        .map_err(|e| MoabitError::image_processing_with_source("Failed to decode extracted frame", e))
}

/// Extract one representative frame from a video file and write it as a WebP
/// thumbnail into `out_dir`.
///
/// Seeks to the configured offset, capped at half the clip duration so short
/// clips still yield a frame.
pub async fn extract_video_frame(path: &Path, config: &ThumbnailConfig, out_dir: &Path) -> Result<PathBuf> {
    validate_ffmpeg().await?;

    let duration = probe_duration(path).await?;
    let seek_secs = config.frame_offset_secs.min(duration / 2.0).max(0.0);
    debug!(seek_secs, duration, "extracting video frame from {}", path.display());

    let frame = decode_frame(path, seek_secs).await?;
    let thumbnail = frame.thumbnail(config.size, config.size);

    let out_path = out_dir.join(THUMBNAIL_FILE_NAME);
    thumbnail.save_with_format(&out_path, image::ImageFormat::WebP)?;

    Ok(out_path)
}
