//! Moabit - media attachment parsing for document archives.
//!
//! Document-management systems index text documents well and reject almost
//! everything else. Moabit is the parser for that "everything else": audio,
//! video, and other non-native formats. For any such file it produces the
//! two artifacts an archive needs to store and display it:
//!
//! - a **display text sample** - at most the first 5 KB of the file,
//!   permissively decoded and kept only when it looks like text;
//! - a **thumbnail** - a representative video frame when ffmpeg is
//!   available, otherwise a placeholder tile showing the file's extension.
//!
//! It also carries the **MIME override table** that maps the affected file
//! extensions to types that survive a store/serve round trip.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use moabit::{ParserConfig, parse_file_sync, thumbnail_file_sync};
//!
//! # fn main() -> moabit::Result<()> {
//! let config = ParserConfig::default();
//! let doc = parse_file_sync("recording.mkv", None, &config)?;
//! println!("sampled {} bytes", doc.metadata.sampled_bytes);
//!
//! let thumb = thumbnail_file_sync("recording.mkv", None, &config, "/tmp")?;
//! println!("thumbnail at {}", thumb.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - `mime` - override table, supplemental mapping file, detection
//! - `extraction` - bounded text sampling
//! - `thumbnail` - video frame extraction and placeholder rendering
//! - `plugins` - trait seam and registry for custom parsers
//! - `parsers` - the built-in [`MediaParser`]

#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod error;
pub mod extraction;
pub mod mime;
pub mod parsers;
pub mod plugins;
pub mod thumbnail;
pub mod types;

pub use error::{MoabitError, Result};
pub use types::{MediaMetadata, ParsedDocument};

pub use config::{ParserConfig, ThumbnailConfig};

pub use core::{parse_file, parse_file_sync, thumbnail_file, thumbnail_file_sync};

pub use mime::{BUILTIN_OVERRIDES, MimeTable, OCTET_STREAM_MIME_TYPE, detect_mime_type};

pub use extraction::sample::{SAMPLE_LIMIT_BYTES, TextSample, sample_bytes, sample_file};

pub use thumbnail::{THUMBNAIL_FILE_NAME, generate_thumbnail};

pub use parsers::{MediaParser, ensure_initialized, register_default_parsers};

pub use plugins::{
    DocumentParser, Plugin, clear_parsers, list_parsers, register_parser, unregister_parser,
};
