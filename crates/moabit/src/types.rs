use serde::{Deserialize, Serialize};

/// Result of parsing a media document.
///
/// `text` is a best-effort display sample, never an exhaustive extraction;
/// an empty string is a valid result for opaque formats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub text: String,
    pub mime_type: String,
    pub metadata: MediaMetadata,
}

/// Metadata about how the sample was produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaMetadata {
    /// Bytes read from the file head for text sampling.
    pub sampled_bytes: usize,
    /// Whether the file was larger than the sample window.
    pub sample_truncated: bool,
}
