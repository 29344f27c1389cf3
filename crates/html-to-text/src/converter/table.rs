//! Table collection for pretty table rendering.
//!
//! While a `<table>` subtree is walked, cells are gathered into a [`TableCollector`].
//! Once the subtree is done the collected cells go to the configured
//! [`TableRenderer`](crate::table_writer::TableRenderer).

use std::borrow::Cow;
use std::mem;

use tracing::debug;

use super::walker::Walker;
use crate::dom::{Element, Tag};
use crate::error::{ConversionError, Result};
use crate::options::PrettyTablesOptions;
use crate::table_writer::TableData;

/// Cells gathered from the `<table>` currently being walked.
#[derive(Debug, Default)]
pub(crate) struct TableCollector {
    header: Vec<String>,
    footer: Vec<String>,
    body: Vec<Vec<String>>,
    current_row: usize,
    in_footer: bool,
}

impl TableCollector {
    /// Open a new body row for a `<tr>` and point the cursor at it.
    pub(crate) fn start_row(&mut self) {
        self.current_row = self.body.len();
        self.body.push(Vec::new());
    }

    /// Advance the row cursor once a `<tr>` subtree is complete.
    pub(crate) const fn finish_row(&mut self) {
        self.current_row += 1;
    }

    /// Record a `<th>` cell.
    pub(crate) fn push_header(&mut self, cell: String) {
        self.header.push(cell);
    }

    /// Record a `<td>` cell in the footer or the current body row.
    ///
    /// A cell seen before any `<tr>` opens an implicit row.
    pub(crate) fn push_cell(&mut self, cell: String) {
        if self.in_footer {
            self.footer.push(cell);
            return;
        }
        while self.body.len() <= self.current_row {
            self.body.push(Vec::new());
        }
        self.body[self.current_row].push(cell);
    }

    /// Set the footer flag, returning its previous value.
    pub(crate) const fn set_in_footer(&mut self, in_footer: bool) -> bool {
        let previous = self.in_footer;
        self.in_footer = in_footer;
        previous
    }

    pub(crate) const fn row_count(&self) -> usize {
        self.body.len()
    }

    pub(crate) fn into_table_data(self) -> TableData {
        TableData {
            header: self.header,
            footer: self.footer,
            rows: self.body,
        }
    }
}

impl Walker<'_> {
    /// Handle a table element while pretty tables are enabled.
    pub(super) fn pretty_table_element(&mut self, element: &Element) -> Result<()> {
        if !self.options.pretty_tables {
            return Err(ConversionError::InvalidState(
                "pretty table rendering invoked while pretty tables are disabled".to_string(),
            ));
        }

        match element.tag {
            Some(Tag::Table) => self.pretty_table(element)?,
            Some(Tag::Tfoot) => {
                let previous = self.ctx.table.set_in_footer(true);
                let result = self.traverse_children(&element.children);
                self.ctx.table.set_in_footer(previous);
                result?;
            }
            Some(Tag::Tr) => {
                self.ctx.table.start_row();
                self.traverse_children(&element.children)?;
                self.ctx.table.finish_row();
            }
            Some(Tag::Th) => {
                let cell = self.render_each_child(element)?;
                self.ctx.table.push_header(cell);
            }
            Some(Tag::Td) => {
                let cell = self.render_each_child(element)?;
                self.ctx.table.push_cell(cell);
            }
            _ => {}
        }
        Ok(())
    }

    fn pretty_table(&mut self, element: &Element) -> Result<()> {
        self.emit("\n\n");

        let outer = mem::take(&mut self.ctx.table);
        let walked = self.traverse_children(&element.children);
        let collected = mem::replace(&mut self.ctx.table, outer);
        walked?;

        let table_options = self
            .options
            .pretty_tables_options
            .as_ref()
            .map_or_else(|| Cow::Owned(PrettyTablesOptions::default()), Cow::Borrowed);

        let rows = collected.row_count();
        let rendered = self.renderer.render(&collected.into_table_data(), &table_options);
        debug!(rows, bytes = rendered.len(), "rendered table");

        self.emit(&rendered);
        self.emit("\n\n");
        Ok(())
    }

    /// Convert each direct child of a cell on its own and join the results with newlines.
    fn render_each_child(&self, element: &Element) -> Result<String> {
        let parts = element
            .children
            .iter()
            .map(|child| self.render_detached(child))
            .collect::<Result<Vec<_>>>()?;
        Ok(parts.join("\n"))
    }
}
