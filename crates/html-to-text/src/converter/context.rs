//! Per-conversion mutable state.

use super::emit::TextBuffer;
use super::table::TableCollector;

/// State threaded through one walk of the tree.
///
/// A context lives for exactly one top-level conversion (or one isolated sub-render)
/// and is never shared.
#[derive(Debug, Default)]
pub(crate) struct TraversalContext {
    /// Output buffer, including quote depth and prefix.
    pub(crate) buf: TextBuffer,
    /// Cells of the innermost `<table>` being collected.
    pub(crate) table: TableCollector,
    /// Whether the previous element handled was a `<div>` that just closed.
    pub(crate) just_closed_div: bool,
    /// Inside `<pre>`: no whitespace collapsing, no wrapping.
    pub(crate) in_pre: bool,
}

impl TraversalContext {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Context for rendering a subtree into a standalone string.
    ///
    /// With `suppress_leading_space` the first emitted run gets no separating space.
    pub(crate) fn isolated(suppress_leading_space: bool) -> Self {
        let buf = if suppress_leading_space {
            TextBuffer::without_leading_space()
        } else {
            TextBuffer::new()
        };
        Self { buf, ..Self::default() }
    }
}
