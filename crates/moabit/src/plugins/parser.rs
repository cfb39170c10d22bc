//! Document parser plugin trait.

use crate::config::ParserConfig;
use crate::error::{MoabitError, Result};
use crate::plugins::Plugin;
use crate::types::ParsedDocument;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Trait for document parser plugins.
///
/// A parser claims a set of MIME types (exact types or `type/*` wildcards)
/// and produces the two artifacts a document archive needs: a display text
/// sample and a thumbnail image.
///
/// When several parsers claim the same MIME type the registry picks the one
/// with the highest priority. The default is 50; fallback parsers that only
/// catch what nothing else wants should sit well below that.
#[async_trait]
pub trait DocumentParser: Plugin {
    /// Produce the display text for a file.
    ///
    /// An empty `text` is a valid result — opaque formats have nothing to
    /// show. Errors should be reserved for conditions the host must see
    /// (missing file, unreadable path).
    async fn parse_file(&self, path: &Path, mime_type: &str, config: &ParserConfig) -> Result<ParsedDocument>;

    /// Produce a thumbnail image for a file inside `out_dir` and return its
    /// path.
    async fn thumbnail(&self, path: &Path, mime_type: &str, config: &ParserConfig, out_dir: &Path)
    -> Result<PathBuf>;

    /// MIME types this parser claims. Exact types (`video/mp4`) and prefix
    /// wildcards (`video/*`) are both accepted.
    fn supported_mime_types(&self) -> &[String];

    /// Selection priority; higher wins when claims overlap.
    fn priority(&self) -> i32 {
        50
    }

    /// Finer-grained gate than MIME matching, for parsers that need to
    /// inspect the file itself.
    fn can_handle(&self, _path: &Path, _mime_type: &str) -> bool {
        true
    }
}

/// Register a document parser with the global registry.
pub fn register_parser(parser: Arc<dyn DocumentParser>) -> Result<()> {
    let registry = crate::plugins::registry::get_document_parser_registry();
    let mut registry = registry
        .write()
        .map_err(|e| MoabitError::Other(format!("Document parser registry lock poisoned: {e}")))?;

    registry.register(parser)
}

/// Unregister a document parser by name. Unknown names are not an error.
pub fn unregister_parser(name: &str) -> Result<()> {
    let registry = crate::plugins::registry::get_document_parser_registry();
    let mut registry = registry
        .write()
        .map_err(|e| MoabitError::Other(format!("Document parser registry lock poisoned: {e}")))?;

    registry.remove(name)
}

/// Names of all registered parsers.
pub fn list_parsers() -> Result<Vec<String>> {
    let registry = crate::plugins::registry::get_document_parser_registry();
    let registry = registry
        .read()
        .map_err(|e| MoabitError::Other(format!("Document parser registry lock poisoned: {e}")))?;

    Ok(registry.list())
}

/// Shut down and remove all registered parsers.
pub fn clear_parsers() -> Result<()> {
    let registry = crate::plugins::registry::get_document_parser_registry();
    let mut registry = registry
        .write()
        .map_err(|e| MoabitError::Other(format!("Document parser registry lock poisoned: {e}")))?;

    registry.shutdown_all()
}
