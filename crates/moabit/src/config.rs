//! Configuration loading.
//!
//! Configuration can be created programmatically, loaded from a TOML file, or
//! discovered by walking up from the current directory looking for
//! `moabit.toml`.

use crate::error::{MoabitError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Parser configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Thumbnail rendering options.
    #[serde(default)]
    pub thumbnail: ThumbnailConfig,

    /// Optional supplemental `mime: .ext` mapping file merged under the
    /// built-in override table.
    #[serde(default)]
    pub mime_file: Option<PathBuf>,
}

/// Thumbnail rendering options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThumbnailConfig {
    /// Edge length of the square thumbnail canvas, in pixels.
    #[serde(default = "default_size")]
    pub size: u32,

    /// TrueType font used for the placeholder label. When unset, a list of
    /// well-known system font locations is probed.
    #[serde(default)]
    pub font: Option<PathBuf>,

    /// Preferred video frame timestamp in seconds. The actual seek position
    /// is capped at half the clip duration.
    #[serde(default = "default_frame_offset")]
    pub frame_offset_secs: f64,
}

fn default_size() -> u32 {
    400
}

fn default_frame_offset() -> f64 {
    30.0
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            font: None,
            frame_offset_secs: default_frame_offset(),
        }
    }
}

impl ParserConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            MoabitError::validation(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        toml::from_str(&content)
            .map_err(|e| MoabitError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e)))
    }

    /// Discover `moabit.toml` in the current directory or any parent.
    ///
    /// Returns `None` when no config file is found.
    pub fn discover() -> Result<Option<Self>> {
        let mut current = std::env::current_dir().map_err(MoabitError::Io)?;

        loop {
            let candidate = current.join("moabit.toml");
            if candidate.exists() {
                return Ok(Some(Self::from_toml_file(candidate)?));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }
}
