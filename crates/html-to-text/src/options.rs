//! Configuration options for HTML to text conversion.

/// Text alignment used by the ASCII table renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Alignment {
    /// Right-align numeric cells, left-align everything else.
    #[default]
    Default,
    /// Center the cell content.
    Center,
    /// Right-align the cell content.
    Right,
    /// Left-align the cell content.
    Left,
}

/// Which outer borders the ASCII table renderer draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Borders {
    /// Left border.
    pub left: bool,
    /// Right border.
    pub right: bool,
    /// Top border.
    pub top: bool,
    /// Bottom border.
    pub bottom: bool,
}

impl Borders {
    /// Borders on every side.
    pub const ALL: Self = Self {
        left: true,
        right: true,
        top: true,
        bottom: true,
    };

    /// No outer borders.
    pub const NONE: Self = Self {
        left: false,
        right: false,
        top: false,
        bottom: false,
    };
}

impl Default for Borders {
    fn default() -> Self {
        Self::ALL
    }
}

/// Styling forwarded verbatim to the table renderer when pretty tables are enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PrettyTablesOptions {
    /// Uppercase header cells and turn `_`/`.` into spaces.
    pub auto_format_header: bool,
    /// Wrap cell text wider than `col_width`.
    pub auto_wrap_text: bool,
    /// Join existing line breaks in a cell before wrapping it.
    pub reflow_during_auto_wrap: bool,
    /// Maximum cell width used when wrapping.
    pub col_width: usize,
    /// Separator between columns.
    pub column_separator: String,
    /// Fill character(s) for horizontal lines.
    pub row_separator: String,
    /// Junction drawn where horizontal and vertical lines meet.
    pub center_separator: String,
    /// Alignment of header cells.
    pub header_alignment: Alignment,
    /// Alignment of footer cells.
    pub footer_alignment: Alignment,
    /// Alignment of body cells.
    pub alignment: Alignment,
    /// Per-column alignment of body cells, overriding `alignment`.
    pub column_alignment: Vec<Alignment>,
    /// Line terminator written after each rendered line.
    pub new_line: String,
    /// Draw a line below the header.
    pub header_line: bool,
    /// Draw a line between body rows.
    pub row_line: bool,
    /// Blank out repeated consecutive values in a column.
    pub auto_merge_cells: bool,
    /// Outer borders.
    pub borders: Borders,
}

/// Default wrapping width of a table cell.
pub const DEFAULT_COL_WIDTH: usize = 30;

impl Default for PrettyTablesOptions {
    fn default() -> Self {
        Self {
            auto_format_header: true,
            auto_wrap_text: true,
            reflow_during_auto_wrap: true,
            col_width: DEFAULT_COL_WIDTH,
            column_separator: "|".to_string(),
            row_separator: "-".to_string(),
            center_separator: "+".to_string(),
            header_alignment: Alignment::Default,
            footer_alignment: Alignment::Default,
            alignment: Alignment::Default,
            column_alignment: Vec::new(),
            new_line: "\n".to_string(),
            header_line: true,
            row_line: false,
            auto_merge_cells: false,
            borders: Borders::ALL,
        }
    }
}

/// Main conversion options.
///
/// These toggles are the only configuration surface of the converter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConversionOptions {
    /// Render `<table>` elements as ASCII tables instead of flat paragraphs.
    pub pretty_tables: bool,
    /// Table styling; `None` uses [`PrettyTablesOptions::default`].
    pub pretty_tables_options: Option<PrettyTablesOptions>,
    /// Drop the `( href )` annotation after links.
    pub omit_links: bool,
    /// Strip decorative markers and produce prose only.
    pub text_only: bool,
}

impl ConversionOptions {
    /// Options with pretty table rendering switched on.
    pub fn with_pretty_tables(mut self, table_options: Option<PrettyTablesOptions>) -> Self {
        self.pretty_tables = true;
        self.pretty_tables_options = table_options;
        self
    }

    /// Options with link annotations omitted.
    pub const fn with_omit_links(mut self, omit_links: bool) -> Self {
        self.omit_links = omit_links;
        self
    }

    /// Options with text-only rendering toggled.
    pub const fn with_text_only(mut self, text_only: bool) -> Self {
        self.text_only = text_only;
        self
    }
}
