//! Thumbnail generation.
//!
//! Videos get a representative frame when the external ffmpeg tooling is
//! available; everything else, and any video whose frame extraction fails for
//! any reason, gets a synthesized placeholder tile showing the file's
//! extension. Failure of the video path is never surfaced to the caller.

pub mod placeholder;
pub mod video;

use crate::config::ThumbnailConfig;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::warn;

/// File name of the generated thumbnail inside the output directory.
pub const THUMBNAIL_FILE_NAME: &str = "thumbnail.webp";

pub use placeholder::render_placeholder;
pub use video::extract_video_frame;

/// Generate a thumbnail for a media file.
///
/// `file_name` is the original upload name when it differs from the storage
/// path; it is only used to pick the placeholder label. Returns the path of
/// the written WebP image.
pub async fn generate_thumbnail(
    path: &Path,
    mime_type: &str,
    file_name: Option<&str>,
    config: &ThumbnailConfig,
    out_dir: &Path,
) -> Result<PathBuf> {
    if mime_type.starts_with("video/") {
        match video::extract_video_frame(path, config, out_dir).await {
            Ok(thumbnail) => return Ok(thumbnail),
            Err(e) => {
                warn!(
                    "video frame extraction failed for {}, falling back to placeholder: {}",
                    path.display(),
                    e
                );
            }
        }
    }

    let label = placeholder_label(path, mime_type, file_name);
    placeholder::render_placeholder(&label, config, out_dir)
}

// Extension of the original file name (or the storage path), with the MIME
// subtype as last resort for extensionless uploads.
fn placeholder_label(path: &Path, mime_type: &str, file_name: Option<&str>) -> String {
    file_name
        .map(Path::new)
        .unwrap_or(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| mime_type.rsplit('/').next().unwrap_or("file").to_string())
}
