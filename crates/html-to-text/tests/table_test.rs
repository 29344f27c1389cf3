//! Table rendering, both pretty and flat.

use html_to_text::{
    Alignment, Borders, ConversionOptions, Converter, Node, PrettyTablesOptions, TableData, TableRenderer, convert,
    convert_node,
};
use pretty_assertions::assert_eq;

const SIMPLE: &str = "<table>\
    <tr><th>A</th><th>B</th></tr>\
    <tr><td>1</td><td>2</td></tr>\
    <tr><td>3</td><td>4</td></tr>\
    </table>";

fn pretty(html: &str) -> String {
    convert(html, &ConversionOptions::default().with_pretty_tables(None)).unwrap()
}

#[test]
fn test_flat_tables_pass_cells_through() {
    let out = convert(SIMPLE, &ConversionOptions::default()).unwrap();
    for cell in ["A", "B", "1", "2", "3", "4"] {
        assert!(out.contains(cell), "missing {cell} in {out:?}");
    }
    assert!(!out.contains('|'));
    assert!(!out.contains('+'));
}

#[test]
fn test_flat_table_is_its_own_paragraph() {
    let out = convert(
        "<p>before</p><table><tr><td>a</td><td>b</td></tr></table><p>after</p>",
        &ConversionOptions::default(),
    )
    .unwrap();
    assert_eq!(out, "before\n\na b\n\nafter");
}

#[test]
fn test_pretty_table_rendering() {
    assert_eq!(
        pretty(SIMPLE),
        "+---+---+\n\
         | A | B |\n\
         +---+---+\n\
         | 1 | 2 |\n\
         | 3 | 4 |\n\
         +---+---+"
    );
}

#[test]
fn test_pretty_table_surrounded_by_single_blank_lines() {
    let out = pretty(&format!("<p>before</p>{SIMPLE}<p>after</p>"));
    assert!(out.starts_with("before\n\n+---+---+\n"), "{out:?}");
    assert!(out.ends_with("+---+---+\n\nafter"), "{out:?}");
}

#[test]
fn test_footer_cells_render_after_body() {
    let html = "<table>\
        <thead><tr><th>H</th></tr></thead>\
        <tbody><tr><td>b</td></tr></tbody>\
        <tfoot><tr><td>f</td></tr></tfoot>\
        </table>";
    assert_eq!(pretty(html), "+---+\n| H |\n+---+\n| b |\n+---+\n| f |\n+---+");
}

#[test]
fn test_cell_children_rendered_on_separate_lines() {
    let html = "<table><tr><td><b>x</b> y</td><td>z</td></tr></table>";
    assert_eq!(pretty(html), "+-----+---+\n| *x* | z |\n| y   |   |\n+-----+---+");
}

#[test]
fn test_cell_links_keep_annotations() {
    let html = r#"<table><tr><td><a href="/a">go</a></td></tr></table>"#;
    assert_eq!(pretty(html), "+-----------+\n| go ( /a ) |\n+-----------+");
}

#[test]
fn test_nested_table_renders_inside_cell() {
    let html = "<table><tr><td><table><tr><td>in</td></tr></table></td></tr></table>";
    assert_eq!(
        pretty(html),
        "+--------+\n\
         | +----+ |\n\
         | | in | |\n\
         | +----+ |\n\
         +--------+"
    );
}

#[test]
fn test_rows_after_loose_cell_stay_in_place() {
    let no_attrs: [(&str, &str); 0] = [];
    let cell = |text: &str| Node::element("td", no_attrs, vec![Node::text(text)]);
    let row = |text: &str| Node::element("tr", no_attrs, vec![cell(text)]);
    let tree = Node::Document(vec![Node::element(
        "table",
        no_attrs,
        vec![cell("loose"), row("r1"), row("r2")],
    )]);

    let out = convert_node(&tree, &ConversionOptions::default().with_pretty_tables(None)).unwrap();
    assert_eq!(
        out,
        "+-------+\n\
         | loose |\n\
         | r1    |\n\
         | r2    |\n\
         +-------+"
    );
}

#[test]
fn test_table_style_options_are_forwarded() {
    let table_options = PrettyTablesOptions {
        borders: Borders::NONE,
        header_line: false,
        column_separator: "!".to_string(),
        alignment: Alignment::Left,
        ..PrettyTablesOptions::default()
    };
    let options = ConversionOptions::default().with_pretty_tables(Some(table_options));
    let out = convert("<table><tr><td>a</td><td>b</td></tr></table>", &options).unwrap();
    assert_eq!(out, "a ! b");
}

#[test]
fn test_markup_outside_cells_flows_into_text() {
    let out = pretty("<table><caption>ignored caption</caption><tr><td>x</td></tr></table>");
    assert!(out.contains("ignored caption"));
    assert!(out.contains("| x |"));
}

struct CountingRenderer;

impl TableRenderer for CountingRenderer {
    fn render(&self, table: &TableData, _options: &PrettyTablesOptions) -> String {
        format!(
            "header={} footer={} rows={}",
            table.header.len(),
            table.footer.len(),
            table.rows.len()
        )
    }
}

#[test]
fn test_custom_renderer_receives_one_row_per_tr() {
    let converter = Converter::new().with_table_renderer(CountingRenderer);
    let options = ConversionOptions::default().with_pretty_tables(None);
    let out = converter.convert_str(SIMPLE, &options).unwrap();
    assert_eq!(out, "header=2 footer=0 rows=3");
}

#[test]
fn test_consecutive_tables_start_fresh() {
    let converter = Converter::new().with_table_renderer(CountingRenderer);
    let options = ConversionOptions::default().with_pretty_tables(None);
    let out = converter
        .convert_str(&format!("{SIMPLE}<p>between</p>{SIMPLE}"), &options)
        .unwrap();
    assert_eq!(out, "header=2 footer=0 rows=3\n\nbetween\n\nheader=2 footer=0 rows=3");
}
