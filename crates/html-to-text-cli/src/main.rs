//! html-to-text CLI - render HTML documents as plain text.
//!
//! Reads HTML from a file or stdin and writes the text rendering to stdout or a file.
//! Options come from flags, optionally layered on top of a JSON config file.

mod error;

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::Shell;
use encoding_rs::Encoding;
use html_to_text::{Alignment, Borders, ConversionOptions, Converter, PrettyTablesOptions};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use error::CliError;

/// Convert HTML to readable plain text.
#[derive(Parser, Debug)]
#[command(name = "html-to-text", version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Input HTML file; `-` or nothing reads stdin.
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Write output to FILE instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// JSON file with conversion options; flags override its values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Render tables as ASCII grids.
    #[arg(long)]
    pretty_tables: bool,

    /// Drop the `( href )` annotation after links.
    #[arg(long)]
    omit_links: bool,

    /// Produce prose only: no heading frames, bullets, quote prefixes or links.
    #[arg(long)]
    text_only: bool,

    /// Wrap table cells wider than N columns (implies --pretty-tables).
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    table_col_width: Option<u16>,

    /// Draw a line between table body rows (implies --pretty-tables).
    #[arg(long)]
    table_row_line: bool,

    /// Omit the line below the table header (implies --pretty-tables).
    #[arg(long)]
    no_table_header_line: bool,

    /// Omit the outer table borders (implies --pretty-tables).
    #[arg(long)]
    no_table_borders: bool,

    /// Blank out repeated values in a table column (implies --pretty-tables).
    #[arg(long)]
    table_merge_cells: bool,

    /// Alignment of table body cells (implies --pretty-tables).
    #[arg(long, value_enum, value_name = "ALIGN")]
    table_alignment: Option<TableAlignment>,

    /// Input character encoding label.
    #[arg(long, default_value = "utf-8", value_name = "LABEL")]
    encoding: String,

    /// Log conversion details to stderr.
    #[arg(long)]
    debug: bool,

    /// Print a shell completion script and exit.
    #[arg(long, value_enum, value_name = "SHELL")]
    generate_completion: Option<Shell>,

    /// Print a man page and exit.
    #[arg(long)]
    generate_man: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TableAlignment {
    Default,
    Left,
    Center,
    Right,
}

impl From<TableAlignment> for Alignment {
    fn from(value: TableAlignment) -> Self {
        match value {
            TableAlignment::Default => Self::Default,
            TableAlignment::Left => Self::Left,
            TableAlignment::Center => Self::Center,
            TableAlignment::Right => Self::Right,
        }
    }
}

impl Cli {
    const fn styles_tables(&self) -> bool {
        self.table_col_width.is_some()
            || self.table_row_line
            || self.no_table_header_line
            || self.no_table_borders
            || self.table_merge_cells
            || self.table_alignment.is_some()
    }

    /// Conversion options from the config file, with flags applied on top.
    fn conversion_options(&self) -> Result<ConversionOptions, CliError> {
        let mut options = match &self.config {
            Some(path) => load_config(path)?,
            None => ConversionOptions::default(),
        };

        options.pretty_tables |= self.pretty_tables;
        options.omit_links |= self.omit_links;
        options.text_only |= self.text_only;

        if self.styles_tables() {
            options.pretty_tables = true;
            let table = options.pretty_tables_options.get_or_insert_with(PrettyTablesOptions::default);
            if let Some(width) = self.table_col_width {
                table.col_width = usize::from(width);
            }
            if self.table_row_line {
                table.row_line = true;
            }
            if self.no_table_header_line {
                table.header_line = false;
            }
            if self.no_table_borders {
                table.borders = Borders::NONE;
            }
            if self.table_merge_cells {
                table.auto_merge_cells = true;
            }
            if let Some(alignment) = self.table_alignment {
                table.alignment = alignment.into();
            }
        }

        Ok(options)
    }
}

fn main() {
    let cli = Cli::parse();

    // --debug enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run(&cli) {
        eprintln!("{err}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    if let Some(shell) = cli.generate_completion {
        let mut command = Cli::command();
        let name = command.get_name().to_string();
        clap_complete::generate(shell, &mut command, name, &mut io::stdout());
        return Ok(());
    }
    if cli.generate_man {
        clap_mangen::Man::new(Cli::command()).render(&mut io::stdout())?;
        return Ok(());
    }

    let encoding = Encoding::for_label(cli.encoding.as_bytes())
        .ok_or_else(|| CliError::UnknownEncoding(cli.encoding.clone()))?;
    let options = cli.conversion_options()?;

    let bytes = read_input(cli.input.as_deref())?;
    let (html, used, had_errors) = encoding.decode(&bytes);
    if had_errors {
        warn!(encoding = used.name(), "input contained malformed sequences");
    }
    debug!(encoding = used.name(), bytes = bytes.len(), "read input");

    let text = Converter::new().convert_str(&html, &options)?;
    write_output(cli.output.as_deref(), &text)
}

fn load_config(path: &Path) -> Result<ConversionOptions, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CliError::InvalidConfig {
        path: path.to_path_buf(),
        source,
    })
}

fn read_input(input: Option<&Path>) -> Result<Vec<u8>, CliError> {
    match input {
        Some(path) if path != Path::new("-") => fs::read(path).map_err(|source| CliError::ReadInput {
            path: path.to_path_buf(),
            source,
        }),
        _ => {
            let mut bytes = Vec::new();
            io::stdin().read_to_end(&mut bytes).map_err(CliError::ReadStdin)?;
            Ok(bytes)
        }
    }
}

/// Write `text` followed by a single newline; empty output stays empty.
fn write_output(output: Option<&Path>, text: &str) -> Result<(), CliError> {
    let mut rendered = text.to_string();
    if !rendered.is_empty() {
        rendered.push('\n');
    }

    match output {
        Some(path) => fs::write(path, rendered)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("html-to-text").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_map_to_options() {
        let options = parse(&["--omit-links", "--text-only"]).conversion_options().unwrap();
        assert!(options.omit_links);
        assert!(options.text_only);
        assert!(!options.pretty_tables);
        assert!(options.pretty_tables_options.is_none());
    }

    #[test]
    fn table_flags_imply_pretty_tables() {
        let options = parse(&["--table-row-line", "--table-alignment", "center", "--table-col-width", "12"])
            .conversion_options()
            .unwrap();
        assert!(options.pretty_tables);
        let table = options.pretty_tables_options.unwrap();
        assert!(table.row_line);
        assert_eq!(table.alignment, Alignment::Center);
        assert_eq!(table.col_width, 12);
        assert!(table.header_line);
    }

    #[test]
    fn alignment_names_map_to_library_alignment() {
        let cases = [
            ("default", Alignment::Default),
            ("left", Alignment::Left),
            ("center", Alignment::Center),
            ("right", Alignment::Right),
        ];
        for (name, expected) in cases {
            let options = parse(&["--table-alignment", name]).conversion_options().unwrap();
            assert_eq!(options.pretty_tables_options.unwrap().alignment, expected, "{name}");
        }
        assert!(Cli::try_parse_from(["html-to-text", "--table-alignment", "sideways"]).is_err());
    }

    #[test]
    fn zero_column_width_is_rejected() {
        assert!(Cli::try_parse_from(["html-to-text", "--table-col-width", "0"]).is_err());
    }
}
