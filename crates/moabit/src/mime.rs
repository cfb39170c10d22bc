//! MIME type overrides for media attachments.
//!
//! Document archives store and serve files keyed by MIME type, not by file
//! extension, so a file whose type the generic detector cannot name (or names
//! ambiguously) round-trips with the wrong extension. The override table maps
//! each affected extension to a MIME type that is unique to it. Where one real
//! MIME type covers several extensions (`.yaml` vs `.yml`), the second
//! extension gets a synthetic type of its own; browsers treat the unknown type
//! as an opaque download, which is exactly the behavior wanted for these
//! formats.

use crate::error::Result;
use std::path::Path;
use tracing::{debug, warn};

pub const OCTET_STREAM_MIME_TYPE: &str = "application/octet-stream";

/// Built-in override table: MIME type to canonical extension.
///
/// One extension per MIME type. Synthetic `application/x-*` entries exist so
/// that formats the generic detector lumps into `application/octet-stream`
/// keep their extension across a store/serve round trip.
pub const BUILTIN_OVERRIDES: &[(&str, &str)] = &[
    ("video/mp4", ".mp4"),
    ("video/quicktime", ".mov"),
    ("video/x-matroska", ".mkv"),
    ("video/x-msvideo", ".avi"),
    ("video/webm", ".webm"),
    ("video/mpeg", ".mpg"),
    ("video/x-m4v", ".m4v"),
    ("audio/mpeg", ".mp3"),
    ("audio/flac", ".flac"),
    ("audio/ogg", ".ogg"),
    ("audio/x-wav", ".wav"),
    ("audio/aac", ".aac"),
    ("audio/x-m4a", ".m4a"),
    ("application/yaml", ".yaml"),
    ("application/x-yml", ".yml"),
    ("application/x-affinity-designer", ".afdesign"),
    ("application/x-affinity-photo", ".afphoto"),
    ("application/x-affinity-publisher", ".afpub"),
];

/// Merged view of the built-in override table and an optional supplemental
/// mapping file.
///
/// Built-in entries always win: a supplemental line whose MIME type is
/// already present is ignored.
#[derive(Debug, Clone)]
pub struct MimeTable {
    // (mime, extension) pairs, built-ins first
    entries: Vec<(String, String)>,
}

impl MimeTable {
    /// Table containing only the built-in overrides.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_OVERRIDES
                .iter()
                .map(|(m, e)| (m.to_string(), e.to_string()))
                .collect(),
        }
    }

    /// Load the override table, merging a supplemental `mime: .ext` file
    /// under the built-ins.
    ///
    /// The file format is line-oriented: `mime/type: .extension`, with `#`
    /// comments. Malformed lines are skipped; a missing file is logged and
    /// ignored.
    pub fn load(supplemental: Option<&Path>) -> Self {
        let mut table = Self::builtin();

        let Some(path) = supplemental else {
            return table;
        };

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("could not read supplemental MIME file {}: {}", path.display(), e);
                return table;
            }
        };

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((mime, extension)) = line.split_once(':') else {
                continue;
            };
            let mime = mime.trim();
            let extension = extension.trim();
            if mime.is_empty() || extension.is_empty() {
                continue;
            }

            let extension = if extension.starts_with('.') {
                extension.to_string()
            } else {
                format!(".{extension}")
            };

            if table.extension_for(mime).is_some() {
                debug!("supplemental entry for {} shadowed by built-in, skipping", mime);
                continue;
            }
            table.entries.push((mime.to_string(), extension));
        }

        table
    }

    /// The override MIME type for an extension, if listed.
    ///
    /// Matching is case-insensitive and tolerates a missing leading dot.
    pub fn override_for(&self, extension: &str) -> Option<&str> {
        let normalized = normalize_extension(extension);
        self.entries
            .iter()
            .find(|(_, ext)| *ext == normalized)
            .map(|(mime, _)| mime.as_str())
    }

    /// The canonical extension registered for a MIME type, if listed.
    pub fn extension_for(&self, mime: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(m, _)| m == mime)
            .map(|(_, ext)| ext.as_str())
    }

    /// Correct a detected MIME type from the file name's extension.
    ///
    /// Returns `Some(override)` when the extension is listed and the override
    /// differs from what was detected, `None` when the detected type should be
    /// kept unchanged. Unlisted extensions are always left unchanged.
    pub fn correct(&self, file_name: &str, detected_mime: &str) -> Option<String> {
        let extension = Path::new(file_name).extension().and_then(|e| e.to_str())?;
        let matched = self.override_for(extension)?;
        if matched == detected_mime {
            return None;
        }
        Some(matched.to_string())
    }

    /// All (MIME type, extension) pairs this table claims, for the host's
    /// consumer declaration.
    pub fn claimed_types(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MimeTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn normalize_extension(raw: &str) -> String {
    let trimmed = raw.trim().to_lowercase();
    if trimmed.starts_with('.') {
        trimmed
    } else {
        format!(".{trimmed}")
    }
}

/// Detect a MIME type from a file path.
///
/// Checks the override table first, then falls back to `mime_guess`, then to
/// `application/octet-stream` — media parsing must never fail for want of a
/// type, the octet-stream bucket is part of what this parser claims.
pub fn detect_mime_type(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let table = MimeTable::builtin();

    if let Some(ext) = path.extension().and_then(|e| e.to_str())
        && let Some(mime) = table.override_for(ext)
    {
        return Ok(mime.to_string());
    }

    if let Some(guess) = mime_guess::from_path(path).first() {
        return Ok(guess.to_string());
    }

    Ok(OCTET_STREAM_MIME_TYPE.to_string())
}
