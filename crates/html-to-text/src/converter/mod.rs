//! HTML tree to plain text conversion.
//!
//! The walker visits the tree once, depth first, writing into an emission buffer.
//! Headings and bold spans are rendered into isolated buffers first so they can be
//! measured and decorated. Table cells are converted on their own and collected until
//! their table is complete.

mod context;
mod emit;
mod normalize;
mod table;
mod walker;

pub use emit::MAX_LINE_LEN;

use crate::dom::Node;
use crate::error::Result;
use crate::handlers::HandlerRegistry;
use crate::options::ConversionOptions;
use crate::table_writer::TableRenderer;

use walker::Walker;

/// Render `node` and post-process the result into the final text.
pub(crate) fn render_tree(
    node: &Node,
    options: &ConversionOptions,
    handlers: &HandlerRegistry,
    renderer: &dyn TableRenderer,
) -> Result<String> {
    let mut walker = Walker::new(options, handlers, renderer);
    walker.traverse(node)?;
    Ok(normalize::finish(&walker.into_raw_output()))
}
