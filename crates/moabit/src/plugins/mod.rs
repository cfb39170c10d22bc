//! Plugin system.
//!
//! The parser seam is trait-based so a host can override or extend the
//! built-in media parser: implement [`Plugin`] + [`DocumentParser`], wrap the
//! parser in an `Arc`, and register it. The registry selects parsers by MIME
//! type and priority; `type/*` wildcard claims are supported.

pub mod parser;
pub mod registry;
pub mod traits;

pub use parser::{DocumentParser, clear_parsers, list_parsers, register_parser, unregister_parser};
pub use registry::{DocumentParserRegistry, get_document_parser_registry};
pub use traits::Plugin;
