//! Base plugin trait.

use crate::error::Result;

/// Base trait all plugins implement.
///
/// Plugins must be `Send + Sync`; they are stored in `Arc<dyn ...>` and may
/// be used from any thread. Lifecycle methods take `&self` — plugins that
/// need mutable state use interior mutability.
pub trait Plugin: Send + Sync {
    /// Unique plugin name, kebab-case.
    fn name(&self) -> &str;

    /// Semantic version of the plugin.
    fn version(&self) -> String;

    /// Called once when the plugin is registered. Registration fails when
    /// this returns an error.
    fn initialize(&self) -> Result<()>;

    /// Called when the plugin is unregistered or the process shuts down.
    fn shutdown(&self) -> Result<()>;

    /// Optional description for logging.
    fn description(&self) -> &str {
        ""
    }
}
