//! Main parsing entry points.
//!
//! The async functions dispatch through the parser registry; the `_sync`
//! wrappers run them on a shared global runtime for hosts without an async
//! context of their own.

use crate::config::ParserConfig;
use crate::error::{MoabitError, Result};
use crate::mime;
use crate::plugins::DocumentParser;
use crate::types::ParsedDocument;
use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

// One runtime for all sync wrappers; building a runtime per call is two
// orders of magnitude slower. Failure to build one means the process is
// already resource-starved, so failing fast is the right move.
static GLOBAL_RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create global Tokio runtime - system may be out of resources")
});

fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(MoabitError::validation(format!(
            "File does not exist: {}",
            path.display()
        )));
    }
    Ok(())
}

fn get_parser(mime_type: &str) -> Result<Arc<dyn DocumentParser>> {
    let registry = crate::plugins::registry::get_document_parser_registry();
    let registry_read = registry
        .read()
        .map_err(|e| MoabitError::Other(format!("Document parser registry lock poisoned: {e}")))?;
    registry_read.get(mime_type)
}

fn resolve_mime(path: &Path, mime_type: Option<&str>) -> Result<String> {
    match mime_type {
        Some(mime) => Ok(mime.to_string()),
        None => mime::detect_mime_type(path),
    }
}

/// Parse a media file: detect (or accept) its MIME type, select a parser,
/// and produce the display text sample.
pub async fn parse_file(
    path: impl AsRef<Path>,
    mime_type: Option<&str>,
    config: &ParserConfig,
) -> Result<ParsedDocument> {
    crate::parsers::ensure_initialized()?;

    let path = path.as_ref();
    validate_file_exists(path)?;

    let mime = resolve_mime(path, mime_type)?;
    let parser = get_parser(&mime)?;
    debug!("parsing {} as {} with '{}'", path.display(), mime, parser.name());

    parser.parse_file(path, &mime, config).await
}

/// Generate a thumbnail for a media file into `out_dir` and return its path.
pub async fn thumbnail_file(
    path: impl AsRef<Path>,
    mime_type: Option<&str>,
    config: &ParserConfig,
    out_dir: impl AsRef<Path>,
) -> Result<PathBuf> {
    crate::parsers::ensure_initialized()?;

    let path = path.as_ref();
    validate_file_exists(path)?;

    let mime = resolve_mime(path, mime_type)?;
    let parser = get_parser(&mime)?;
    debug!("thumbnailing {} as {} with '{}'", path.display(), mime, parser.name());

    parser.thumbnail(path, &mime, config, out_dir.as_ref()).await
}

/// Synchronous wrapper around [`parse_file`].
pub fn parse_file_sync(
    path: impl AsRef<Path>,
    mime_type: Option<&str>,
    config: &ParserConfig,
) -> Result<ParsedDocument> {
    GLOBAL_RUNTIME.block_on(parse_file(path, mime_type, config))
}

/// Synchronous wrapper around [`thumbnail_file`].
pub fn thumbnail_file_sync(
    path: impl AsRef<Path>,
    mime_type: Option<&str>,
    config: &ParserConfig,
    out_dir: impl AsRef<Path>,
) -> Result<PathBuf> {
    GLOBAL_RUNTIME.block_on(thumbnail_file(path, mime_type, config, out_dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_parse_file_missing_is_validation_error() {
        let config = ParserConfig::default();
        let result = parse_file("/nonexistent/moabit-core-test.mkv", None, &config).await;
        assert!(matches!(result, Err(MoabitError::Validation { .. })));
    }

    #[test]
    fn test_resolve_mime_prefers_explicit() {
        let mime = resolve_mime(Path::new("clip.mkv"), Some("video/mp4")).unwrap();
        assert_eq!(mime, "video/mp4");
    }

    #[test]
    fn test_resolve_mime_detects_from_path() {
        let mime = resolve_mime(Path::new("clip.mkv"), None).unwrap();
        assert_eq!(mime, "video/x-matroska");
    }
}
