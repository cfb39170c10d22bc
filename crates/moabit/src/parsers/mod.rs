//! Built-in parsers.

use crate::error::Result;
use crate::plugins::registry::get_document_parser_registry;
use once_cell::sync::Lazy;
use std::sync::Arc;

pub mod media;

pub use media::MediaParser;

static PARSERS_INITIALIZED: Lazy<Result<()>> = Lazy::new(register_default_parsers);

/// Ensure the built-in parsers are registered.
///
/// Called automatically by the entry points; safe to call repeatedly. When
/// the registry was cleared (tests, host re-initialization), the built-ins
/// are registered again.
pub fn ensure_initialized() -> Result<()> {
    PARSERS_INITIALIZED
        .as_ref()
        .map(|_| ())
        .map_err(|e| crate::MoabitError::Plugin {
            message: format!("Failed to register default parsers: {e}"),
            plugin_name: "built-in-parsers".to_string(),
        })?;

    let registry = get_document_parser_registry();
    let registry_guard = registry
        .read()
        .map_err(|e| crate::MoabitError::Other(format!("Document parser registry lock poisoned: {e}")))?;

    if registry_guard.list().is_empty() {
        drop(registry_guard);
        register_default_parsers()?;
    }

    Ok(())
}

/// Register the built-in parsers with the global registry.
pub fn register_default_parsers() -> Result<()> {
    let registry = get_document_parser_registry();
    let mut registry = registry
        .write()
        .map_err(|e| crate::MoabitError::Other(format!("Document parser registry lock poisoned: {e}")))?;

    registry.register(Arc::new(MediaParser::new()))?;

    Ok(())
}
