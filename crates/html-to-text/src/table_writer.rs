//! ASCII table rendering.
//!
//! The converter collects header, footer and body cells into a [`TableData`] and hands
//! it to a [`TableRenderer`]. [`AsciiTableWriter`] is the default renderer; callers may
//! plug in their own through [`Converter::with_table_renderer`](crate::Converter::with_table_renderer).

use std::borrow::Cow;

use textwrap::{WordSeparator, WrapAlgorithm};
use unicode_width::UnicodeWidthStr;

use crate::options::{Alignment, PrettyTablesOptions};

/// Cells collected from one `<table>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableData {
    /// Header cells, from `<th>` elements.
    pub header: Vec<String>,
    /// Footer cells, from `<td>` elements inside `<tfoot>`.
    pub footer: Vec<String>,
    /// Body rows, one per `<tr>`.
    pub rows: Vec<Vec<String>>,
}

/// Renders collected table cells as text.
pub trait TableRenderer: Send + Sync {
    /// Render `table` using the styling in `options`.
    fn render(&self, table: &TableData, options: &PrettyTablesOptions) -> String;
}

/// Bordered ASCII table renderer.
///
/// ```text
/// +---+---+
/// | A | B |
/// +---+---+
/// | 1 | 2 |
/// +---+---+
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiTableWriter;

/// A row split into the physical lines of each cell.
type CellLines = Vec<Vec<String>>;

impl TableRenderer for AsciiTableWriter {
    fn render(&self, table: &TableData, options: &PrettyTablesOptions) -> String {
        let rows: Vec<&Vec<String>> = table.rows.iter().filter(|row| !row.is_empty()).collect();
        let columns = rows
            .iter()
            .map(|row| row.len())
            .chain([table.header.len(), table.footer.len()])
            .max()
            .unwrap_or(0);
        if columns == 0 {
            return String::new();
        }

        let header: Option<CellLines> = (!table.header.is_empty()).then(|| {
            table
                .header
                .iter()
                .map(|cell| {
                    if options.auto_format_header {
                        cell_lines(&format_header(cell), options)
                    } else {
                        cell_lines(cell, options)
                    }
                })
                .collect()
        });
        let footer: Option<CellLines> = (!table.footer.is_empty())
            .then(|| table.footer.iter().map(|cell| cell_lines(cell, options)).collect());

        let mut previous: Option<&Vec<String>> = None;
        let body: Vec<CellLines> = rows
            .iter()
            .map(|row| {
                let lines = row
                    .iter()
                    .enumerate()
                    .map(|(col, cell)| {
                        let repeated = options.auto_merge_cells
                            && !cell.is_empty()
                            && previous.and_then(|prev| prev.get(col)) == Some(cell);
                        if repeated {
                            vec![String::new()]
                        } else {
                            cell_lines(cell, options)
                        }
                    })
                    .collect();
                previous = Some(*row);
                lines
            })
            .collect();

        let mut widths = vec![0usize; columns];
        for row in header.iter().chain(footer.iter()).chain(body.iter()) {
            for (col, lines) in row.iter().enumerate() {
                for line in lines {
                    widths[col] = widths[col].max(UnicodeWidthStr::width(line.as_str()));
                }
            }
        }

        let layout = Layout { options, widths: &widths };
        let mut out = String::new();

        if options.borders.top {
            layout.push_rule(&mut out);
        }
        if let Some(header) = &header {
            layout.push_row(&mut out, header, |_| fixed_alignment(options.header_alignment));
            if options.header_line {
                layout.push_rule(&mut out);
            }
        }
        for (index, row) in body.iter().enumerate() {
            if index > 0 && options.row_line {
                layout.push_rule(&mut out);
            }
            layout.push_row(&mut out, row, |col| {
                options.column_alignment.get(col).copied().unwrap_or(options.alignment)
            });
        }
        if let Some(footer) = &footer {
            layout.push_rule(&mut out);
            layout.push_row(&mut out, footer, |_| fixed_alignment(options.footer_alignment));
        }
        if options.borders.bottom {
            layout.push_rule(&mut out);
        }

        out
    }
}

struct Layout<'a> {
    options: &'a PrettyTablesOptions,
    widths: &'a [usize],
}

impl Layout<'_> {
    fn push_rule(&self, out: &mut String) {
        let center = self.options.center_separator.as_str();
        if self.options.borders.left {
            out.push_str(center);
        }
        for (col, width) in self.widths.iter().enumerate() {
            if col > 0 {
                out.push_str(center);
            }
            out.push_str(&self.options.row_separator.repeat(width + 2));
        }
        if self.options.borders.right {
            out.push_str(center);
        }
        out.push_str(&self.options.new_line);
    }

    fn push_row(&self, out: &mut String, row: &[Vec<String>], alignment_for: impl Fn(usize) -> Alignment) {
        let height = row.iter().map(Vec::len).max().unwrap_or(1).max(1);
        let separator = self.options.column_separator.as_str();

        for line in 0..height {
            if self.options.borders.left {
                out.push_str(separator);
            }
            for (col, width) in self.widths.iter().enumerate() {
                if col > 0 {
                    out.push_str(separator);
                }
                let text = row
                    .get(col)
                    .and_then(|lines| lines.get(line))
                    .map_or("", String::as_str);
                out.push(' ');
                out.push_str(&pad(text, *width, alignment_for(col)));
                out.push(' ');
            }
            if self.options.borders.right {
                out.push_str(separator);
            }
            out.push_str(&self.options.new_line);
        }
    }
}

/// Header and footer cells center by default.
const fn fixed_alignment(alignment: Alignment) -> Alignment {
    match alignment {
        Alignment::Default => Alignment::Center,
        other => other,
    }
}

fn format_header(cell: &str) -> String {
    cell.replace(['_', '.'], " ").to_uppercase()
}

fn is_numeric(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && trimmed.parse::<f64>().is_ok()
}

fn pad(text: &str, width: usize, alignment: Alignment) -> String {
    let gap = width.saturating_sub(UnicodeWidthStr::width(text));
    let alignment = match alignment {
        Alignment::Default if is_numeric(text) => Alignment::Right,
        Alignment::Default => Alignment::Left,
        other => other,
    };
    match alignment {
        Alignment::Right => format!("{}{text}", " ".repeat(gap)),
        Alignment::Center => {
            let left = gap / 2;
            format!("{}{text}{}", " ".repeat(left), " ".repeat(gap - left))
        }
        Alignment::Left | Alignment::Default => format!("{text}{}", " ".repeat(gap)),
    }
}

/// Split a cell into display lines, wrapping it when it is wider than `col_width`.
fn cell_lines(cell: &str, options: &PrettyTablesOptions) -> Vec<String> {
    let fits = cell.lines().all(|line| UnicodeWidthStr::width(line) <= options.col_width);
    if !options.auto_wrap_text || fits {
        return cell.split('\n').map(str::to_string).collect();
    }

    if options.reflow_during_auto_wrap {
        let joined = cell.split_whitespace().collect::<Vec<_>>().join(" ");
        wrap_words(&joined, options.col_width)
    } else {
        cell.split('\n')
            .flat_map(|line| wrap_words(line, options.col_width))
            .collect()
    }
}

/// Greedy word wrap by display width, breaking only at spaces.
///
/// Words wider than `width` keep a line of their own.
fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let options = textwrap::Options::new(width)
        .break_words(false)
        .word_separator(WordSeparator::AsciiSpace)
        .wrap_algorithm(WrapAlgorithm::FirstFit);
    textwrap::wrap(text, options).into_iter().map(Cow::into_owned).collect()
}
