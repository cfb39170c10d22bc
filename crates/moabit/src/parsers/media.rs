//! The media parser.
//!
//! Catches the file types a document archive's native parsers reject: audio,
//! video, and other non-native formats. Text is a bounded best-effort sample;
//! the thumbnail is a video frame when possible and a placeholder tile
//! otherwise. Registered in the fallback priority band so it only ever
//! handles what nothing else claims.

use crate::config::ParserConfig;
use crate::error::Result;
use crate::extraction::sample::{TextSample, sample_file};
use crate::mime::{MimeTable, OCTET_STREAM_MIME_TYPE};
use crate::plugins::{DocumentParser, Plugin};
use crate::thumbnail::generate_thumbnail;
use crate::types::{MediaMetadata, ParsedDocument};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Priority band for parsers that only catch what nothing else wants.
pub const FALLBACK_PRIORITY: i32 = 10;

/// Media document parser plugin.
pub struct MediaParser {
    claimed: Vec<String>,
}

impl MediaParser {
    /// Parser claiming the built-in override table plus the audio/video
    /// wildcards and the octet-stream bucket.
    pub fn new() -> Self {
        Self::with_table(&MimeTable::builtin())
    }

    /// Parser claiming a specific (possibly supplemented) override table.
    pub fn with_table(table: &MimeTable) -> Self {
        let mut claimed: Vec<String> = table.claimed_types().iter().map(|(mime, _)| mime.clone()).collect();
        for bucket in ["audio/*", "video/*", OCTET_STREAM_MIME_TYPE] {
            if !claimed.iter().any(|c| c == bucket) {
                claimed.push(bucket.to_string());
            }
        }
        Self { claimed }
    }
}

impl Default for MediaParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for MediaParser {
    fn name(&self) -> &str {
        "media-parser"
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    fn initialize(&self) -> Result<()> {
        Ok(())
    }

    fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    fn description(&self) -> &str {
        "Samples display text and generates thumbnails for audio, video, and other non-native formats"
    }
}

#[async_trait]
impl DocumentParser for MediaParser {
    async fn parse_file(&self, path: &Path, mime_type: &str, _config: &ParserConfig) -> Result<ParsedDocument> {
        // a file we cannot read still gets stored by the host; degrade to an
        // empty sample instead of failing the whole consume
        let sample = match sample_file(path, mime_type).await {
            Ok(sample) => sample,
            Err(e) => {
                warn!("text sampling failed for {}: {}", path.display(), e);
                TextSample {
                    text: String::new(),
                    sampled_bytes: 0,
                    truncated: false,
                }
            }
        };

        Ok(ParsedDocument {
            text: sample.text,
            mime_type: mime_type.to_string(),
            metadata: MediaMetadata {
                sampled_bytes: sample.sampled_bytes,
                sample_truncated: sample.truncated,
            },
        })
    }

    async fn thumbnail(
        &self,
        path: &Path,
        mime_type: &str,
        config: &ParserConfig,
        out_dir: &Path,
    ) -> Result<PathBuf> {
        let file_name = path.file_name().and_then(|n| n.to_str());
        generate_thumbnail(path, mime_type, file_name, &config.thumbnail, out_dir).await
    }

    fn supported_mime_types(&self) -> &[String] {
        &self.claimed
    }

    fn priority(&self) -> i32 {
        FALLBACK_PRIORITY
    }
}
