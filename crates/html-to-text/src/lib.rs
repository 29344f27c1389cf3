//! Render HTML documents as readable plain text.
//!
//! Structure survives as plain-text markers: headings are underlined with `*` or `-`,
//! list items get `* ` bullets, blockquotes are prefixed with `>` and wrapped, links
//! are followed by `( href )` and tables can be drawn as ASCII grids.
//!
//! ```
//! use html_to_text::{ConversionOptions, convert};
//!
//! let text = convert(r#"<p>Read <a href="https://example.com">this</a></p>"#, &ConversionOptions::default())?;
//! assert_eq!(text, "Read this ( https://example.com )");
//! # Ok::<(), html_to_text::ConversionError>(())
//! ```

#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

pub mod dom;
pub mod error;
pub mod handlers;
pub mod options;
pub mod parser;
pub mod table_writer;

mod converter;

use std::fmt;
use std::io::Read;
use std::sync::Arc;

use tracing::debug;

pub use converter::MAX_LINE_LEN;
pub use dom::{Element, Node, Tag};
pub use error::{ConversionError, HandlerError, Result};
pub use handlers::{Handler, HandlerRegistry, identity_handler};
pub use options::{Alignment, Borders, ConversionOptions, PrettyTablesOptions};
pub use table_writer::{AsciiTableWriter, TableData, TableRenderer};

/// HTML to text converter.
///
/// Holds the handler registry and table renderer. Both are read-only while converting,
/// so one converter can serve many conversions, including concurrent ones. Each
/// conversion gets its own private state.
#[derive(Clone)]
pub struct Converter {
    handlers: HandlerRegistry,
    renderer: Arc<dyn TableRenderer>,
}

impl Converter {
    /// Converter with identity handlers and the ASCII table renderer.
    pub fn new() -> Self {
        Self {
            handlers: HandlerRegistry::new(),
            renderer: Arc::new(AsciiTableWriter),
        }
    }

    /// Install a user handler for `tag`.
    #[must_use]
    pub fn with_handler<F>(mut self, tag: Tag, handler: F) -> Self
    where
        F: Fn(&str) -> std::result::Result<String, HandlerError> + Send + Sync + 'static,
    {
        self.handlers.register(tag, handler);
        self
    }

    /// Install several user handlers.
    #[must_use]
    pub fn with_handlers<I>(mut self, handlers: I) -> Self
    where
        I: IntoIterator<Item = (Tag, Handler)>,
    {
        self.handlers.register_all(handlers);
        self
    }

    /// Install a user handler for `tag` in place.
    pub fn set_handler<F>(&mut self, tag: Tag, handler: F) -> &mut Self
    where
        F: Fn(&str) -> std::result::Result<String, HandlerError> + Send + Sync + 'static,
    {
        self.handlers.register(tag, handler);
        self
    }

    /// Install several user handlers in place.
    pub fn set_handlers<I>(&mut self, handlers: I) -> &mut Self
    where
        I: IntoIterator<Item = (Tag, Handler)>,
    {
        self.handlers.register_all(handlers);
        self
    }

    /// The handler registry.
    pub const fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    /// Replace the table renderer used when pretty tables are enabled.
    #[must_use]
    pub fn with_table_renderer<R>(mut self, renderer: R) -> Self
    where
        R: TableRenderer + 'static,
    {
        self.renderer = Arc::new(renderer);
        self
    }

    /// Convert an HTML string.
    pub fn convert_str(&self, html: &str, options: &ConversionOptions) -> Result<String> {
        self.convert_bytes(html.as_bytes(), options)
    }

    /// Convert raw HTML bytes; a leading byte-order mark is ignored.
    pub fn convert_bytes(&self, bytes: &[u8], options: &ConversionOptions) -> Result<String> {
        let document = parser::parse_bytes(bytes)?;
        self.convert_node(&document, options)
    }

    /// Read HTML from `reader` and convert it.
    pub fn convert_reader<R: Read>(&self, reader: R, options: &ConversionOptions) -> Result<String> {
        let document = parser::parse_reader(reader)?;
        self.convert_node(&document, options)
    }

    /// Convert an already parsed tree.
    pub fn convert_node(&self, node: &Node, options: &ConversionOptions) -> Result<String> {
        debug!(
            pretty_tables = options.pretty_tables,
            omit_links = options.omit_links,
            text_only = options.text_only,
            "converting document"
        );
        let text = converter::render_tree(node, options, &self.handlers, self.renderer.as_ref())?;
        debug!(bytes = text.len(), "conversion finished");
        Ok(text)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("handlers", &self.handlers)
            .finish_non_exhaustive()
    }
}

/// Convert an HTML string with default handlers.
///
/// This is the main entry point for HTML to text conversion.
pub fn convert(html: &str, options: &ConversionOptions) -> Result<String> {
    Converter::new().convert_str(html, options)
}

/// Convert a parsed tree with default handlers.
pub fn convert_node(node: &Node, options: &ConversionOptions) -> Result<String> {
    Converter::new().convert_node(node, options)
}
