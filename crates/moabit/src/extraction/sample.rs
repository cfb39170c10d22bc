//! Bounded plain-text sampling.
//!
//! Media files are opaque to a text index, but many "media" uploads are
//! actually text with an unusual extension (subtitle files, project files,
//! sidecar metadata). The sampler reads at most the first [`SAMPLE_LIMIT_BYTES`]
//! of a file, decodes them permissively, and keeps the result only when it
//! looks like displayable text.

use crate::error::Result;
use crate::mime::OCTET_STREAM_MIME_TYPE;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Upper bound on how much of a file is ever read for text sampling.
pub const SAMPLE_LIMIT_BYTES: usize = 5000;

/// A sample must contain at least this many word-like tokens to count as
/// meaningful text when the MIME type is not `text/*`.
const MIN_MEANINGFUL_WORDS: usize = 5;

static WORD_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9_]+").expect("word token pattern compiles"));

/// Outcome of sampling a file.
#[derive(Debug, Clone)]
pub struct TextSample {
    pub text: String,
    /// Bytes actually read from the file head.
    pub sampled_bytes: usize,
    /// Whether the file was larger than the sample window.
    pub truncated: bool,
}

// The allowed set mirrors what the archive UI can render: ASCII alphanumerics,
// standard punctuation, and whitespace. Everything else (including the
// replacement characters a lossy decode produces) is dropped.
fn is_displayable(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c.is_ascii_whitespace()
        || "!@#$%^&*()_+-=[]{}\\|;:'\",<.>/?`~".contains(c)
}

fn sanitize(raw: &str) -> String {
    raw.chars().filter(|c| *c != '\0' && is_displayable(*c)).collect()
}

fn word_count(text: &str) -> usize {
    WORD_TOKEN.find_iter(text).count()
}

/// Sample displayable text from the head of a file's bytes.
///
/// Audio, video, and the octet-stream bucket never yield text. `text/*` types
/// yield the sanitized head as-is; anything else must pass the
/// meaningful-text gate or the sample is discarded.
pub fn sample_bytes(head: &[u8], mime_type: &str) -> String {
    if mime_type.starts_with("audio/")
        || mime_type.starts_with("video/")
        || mime_type == OCTET_STREAM_MIME_TYPE
    {
        return String::new();
    }

    let decoded = String::from_utf8_lossy(head);
    let sanitized = sanitize(&decoded);

    if mime_type.starts_with("text/") {
        return sanitized;
    }

    if word_count(&sanitized) >= MIN_MEANINGFUL_WORDS {
        sanitized
    } else {
        String::new()
    }
}

/// Sample displayable text from the first [`SAMPLE_LIMIT_BYTES`] of a file.
///
/// Never reads past the sample window regardless of file size.
pub async fn sample_file(path: impl AsRef<Path>, mime_type: &str) -> Result<TextSample> {
    let path = path.as_ref();

    let file = tokio::fs::File::open(path).await?;
    let total_len = file.metadata().await.map(|m| m.len()).unwrap_or(0);

    let mut head = Vec::with_capacity(SAMPLE_LIMIT_BYTES);
    file.take(SAMPLE_LIMIT_BYTES as u64).read_to_end(&mut head).await?;

    let sampled_bytes = head.len();
    Ok(TextSample {
        text: sample_bytes(&head, mime_type),
        sampled_bytes,
        truncated: total_len > SAMPLE_LIMIT_BYTES as u64,
    })
}
