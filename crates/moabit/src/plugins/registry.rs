//! Parser registration and lookup.

use crate::error::{MoabitError, Result};
use crate::plugins::DocumentParser;
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

// Names must be non-empty kebab-case identifiers without whitespace.
fn validate_plugin_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(MoabitError::validation("Plugin name cannot be empty"));
    }

    if name.contains(char::is_whitespace) {
        return Err(MoabitError::validation(format!(
            "Plugin name '{name}' cannot contain whitespace"
        )));
    }

    Ok(())
}

/// Registry for document parser plugins, keyed by MIME type with
/// priority-ordered selection.
pub struct DocumentParserRegistry {
    parsers: HashMap<String, BTreeMap<i32, Arc<dyn DocumentParser>>>,
    name_index: HashMap<String, Vec<(String, i32)>>,
}

impl DocumentParserRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            parsers: HashMap::new(),
            name_index: HashMap::new(),
        }
    }

    /// Register a parser for every MIME type it claims.
    ///
    /// The parser's `initialize()` runs before it becomes visible;
    /// registration fails when it fails.
    pub fn register(&mut self, parser: Arc<dyn DocumentParser>) -> Result<()> {
        let name = parser.name().to_string();
        let priority = parser.priority();

        validate_plugin_name(&name)?;

        parser.initialize()?;

        let mut index_entries = Vec::new();

        for mime_type in parser.supported_mime_types() {
            self.parsers
                .entry(mime_type.clone())
                .or_default()
                .insert(priority, Arc::clone(&parser));
            index_entries.push((mime_type.clone(), priority));
        }

        self.name_index.insert(name, index_entries);

        Ok(())
    }

    /// Get the highest-priority parser for a MIME type.
    ///
    /// Exact claims win over wildcard (`type/*`) claims; among wildcard
    /// matches the highest priority wins.
    pub fn get(&self, mime_type: &str) -> Result<Arc<dyn DocumentParser>> {
        if let Some(priority_map) = self.parsers.get(mime_type)
            && let Some((_priority, parser)) = priority_map.iter().next_back()
        {
            return Ok(Arc::clone(parser));
        }

        let mut best_match: Option<(i32, Arc<dyn DocumentParser>)> = None;

        for (claimed, priority_map) in &self.parsers {
            if !claimed.ends_with("/*") {
                continue;
            }
            let prefix = &claimed[..claimed.len() - 1];
            if mime_type.starts_with(prefix)
                && let Some((_priority, parser)) = priority_map.iter().next_back()
            {
                let priority = parser.priority();
                match &best_match {
                    None => best_match = Some((priority, Arc::clone(parser))),
                    Some((current, _)) if priority > *current => {
                        best_match = Some((priority, Arc::clone(parser)));
                    }
                    Some(_) => {}
                }
            }
        }

        if let Some((_priority, parser)) = best_match {
            return Ok(parser);
        }

        Err(MoabitError::UnsupportedFormat(mime_type.to_string()))
    }

    /// Names of all registered parsers.
    pub fn list(&self) -> Vec<String> {
        self.name_index.keys().cloned().collect()
    }

    /// Remove a parser by name, calling its `shutdown()`.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        let index_entries = match self.name_index.remove(name) {
            Some(entries) => entries,
            None => return Ok(()),
        };

        let mut parser_to_shutdown: Option<Arc<dyn DocumentParser>> = None;

        for (mime_type, priority) in index_entries {
            if let Some(priority_map) = self.parsers.get_mut(&mime_type) {
                if let Some(parser) = priority_map.remove(&priority)
                    && parser_to_shutdown.is_none()
                {
                    parser_to_shutdown = Some(parser);
                }

                if priority_map.is_empty() {
                    self.parsers.remove(&mime_type);
                }
            }
        }

        if let Some(parser) = parser_to_shutdown {
            parser.shutdown()?;
        }

        Ok(())
    }

    /// Shut down all parsers and clear the registry.
    pub fn shutdown_all(&mut self) -> Result<()> {
        let names = self.list();
        for name in names {
            self.remove(&name)?;
        }
        Ok(())
    }
}

impl Default for DocumentParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Global document parser registry singleton.
pub static DOCUMENT_PARSER_REGISTRY: Lazy<Arc<RwLock<DocumentParserRegistry>>> =
    Lazy::new(|| Arc::new(RwLock::new(DocumentParserRegistry::new())));

/// Get the global document parser registry.
pub fn get_document_parser_registry() -> Arc<RwLock<DocumentParserRegistry>> {
    DOCUMENT_PARSER_REGISTRY.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;
    use crate::plugins::Plugin;
    use crate::types::{MediaMetadata, ParsedDocument};
    use async_trait::async_trait;
    use std::path::{Path, PathBuf};

    struct MockParser {
        name: &'static str,
        mime_types: Vec<String>,
        priority: i32,
    }

    impl MockParser {
        fn new(name: &'static str, mime_types: &[&str], priority: i32) -> Self {
            Self {
                name,
                mime_types: mime_types.iter().map(|s| s.to_string()).collect(),
                priority,
            }
        }
    }

    impl Plugin for MockParser {
        fn name(&self) -> &str {
            self.name
        }

        fn version(&self) -> String {
            "1.0.0".to_string()
        }

        fn initialize(&self) -> Result<()> {
            Ok(())
        }

        fn shutdown(&self) -> Result<()> {
            Ok(())
        }
    }

    #[async_trait]
    impl DocumentParser for MockParser {
        async fn parse_file(&self, _path: &Path, mime_type: &str, _config: &ParserConfig) -> Result<ParsedDocument> {
            Ok(ParsedDocument {
                text: String::new(),
                mime_type: mime_type.to_string(),
                metadata: MediaMetadata::default(),
            })
        }

        async fn thumbnail(
            &self,
            _path: &Path,
            _mime_type: &str,
            _config: &ParserConfig,
            out_dir: &Path,
        ) -> Result<PathBuf> {
            Ok(out_dir.join("thumbnail.webp"))
        }

        fn supported_mime_types(&self) -> &[String] {
            &self.mime_types
        }

        fn priority(&self) -> i32 {
            self.priority
        }
    }

    #[test]
    fn test_register_and_get_exact() {
        let mut registry = DocumentParserRegistry::new();
        registry
            .register(Arc::new(MockParser::new("mock-exact", &["video/mp4"], 50)))
            .unwrap();

        let parser = registry.get("video/mp4").unwrap();
        assert_eq!(parser.name(), "mock-exact");
    }

    #[test]
    fn test_get_wildcard_match() {
        let mut registry = DocumentParserRegistry::new();
        registry
            .register(Arc::new(MockParser::new("mock-wild", &["video/*"], 10)))
            .unwrap();

        let parser = registry.get("video/x-matroska").unwrap();
        assert_eq!(parser.name(), "mock-wild");
    }

    #[test]
    fn test_exact_beats_wildcard() {
        let mut registry = DocumentParserRegistry::new();
        registry
            .register(Arc::new(MockParser::new("mock-wild", &["video/*"], 90)))
            .unwrap();
        registry
            .register(Arc::new(MockParser::new("mock-exact", &["video/mp4"], 10)))
            .unwrap();

        let parser = registry.get("video/mp4").unwrap();
        assert_eq!(parser.name(), "mock-exact");
    }

    #[test]
    fn test_priority_selection() {
        let mut registry = DocumentParserRegistry::new();
        registry
            .register(Arc::new(MockParser::new("mock-low", &["audio/flac"], 10)))
            .unwrap();
        registry
            .register(Arc::new(MockParser::new("mock-high", &["audio/flac"], 90)))
            .unwrap();

        let parser = registry.get("audio/flac").unwrap();
        assert_eq!(parser.name(), "mock-high");
    }

    #[test]
    fn test_unclaimed_mime_is_unsupported() {
        let registry = DocumentParserRegistry::new();
        let result = registry.get("application/pdf");
        assert!(matches!(result, Err(MoabitError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_remove_parser() {
        let mut registry = DocumentParserRegistry::new();
        registry
            .register(Arc::new(MockParser::new("mock-remove", &["audio/ogg"], 50)))
            .unwrap();

        registry.remove("mock-remove").unwrap();
        assert!(registry.get("audio/ogg").is_err());
        assert!(registry.list().is_empty());

        // removing again is fine
        registry.remove("mock-remove").unwrap();
    }

    #[test]
    fn test_invalid_names_rejected() {
        let mut registry = DocumentParserRegistry::new();

        let spaced = Arc::new(MockParser::new("bad name", &["audio/ogg"], 50));
        assert!(matches!(
            registry.register(spaced),
            Err(MoabitError::Validation { .. })
        ));

        let empty = Arc::new(MockParser::new("", &["audio/ogg"], 50));
        assert!(matches!(registry.register(empty), Err(MoabitError::Validation { .. })));
    }

    #[test]
    fn test_shutdown_all() {
        let mut registry = DocumentParserRegistry::new();
        registry
            .register(Arc::new(MockParser::new("mock-a", &["audio/ogg"], 50)))
            .unwrap();
        registry
            .register(Arc::new(MockParser::new("mock-b", &["video/*"], 50)))
            .unwrap();

        registry.shutdown_all().unwrap();
        assert!(registry.list().is_empty());
    }
}
