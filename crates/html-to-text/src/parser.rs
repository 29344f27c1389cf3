//! Raw input handling: byte-order-mark removal and HTML5 parsing.
//!
//! Parsing is delegated to `html5ever`, whose `RcDom` is then copied into the owned
//! [`Node`] tree the converter walks.

use std::io::Read;

use html5ever::ParseOpts;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::dom::{Element, Node};
use crate::error::{ConversionError, Result};

/// Byte-order marks recognized at the start of raw input, longest first.
const BOMS: [&[u8]; 5] = [
    &[0x00, 0x00, 0xFE, 0xFF],
    &[0xFF, 0xFE, 0x00, 0x00],
    &[0xEF, 0xBB, 0xBF],
    &[0xFE, 0xFF],
    &[0xFF, 0xFE],
];

/// Return `input` without a leading byte-order mark.
pub fn strip_bom(input: &[u8]) -> &[u8] {
    BOMS.iter()
        .find_map(|bom| input.strip_prefix(*bom))
        .unwrap_or(input)
}

/// Parse an HTML document from a reader.
///
/// The reader is consumed completely; a leading byte-order mark is removed first.
pub fn parse_reader<R: Read>(mut reader: R) -> Result<Node> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    parse_bytes(&bytes)
}

/// Parse an HTML document from raw bytes.
///
/// Reading the in-memory input cannot fail, so an error out of the tree builder is
/// reported as [`ConversionError::Parse`]. Failures reading a stream surface as
/// [`ConversionError::Io`] from [`parse_reader`] instead.
pub fn parse_bytes(bytes: &[u8]) -> Result<Node> {
    let mut input = strip_bom(bytes);
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let dom = html5ever::parse_document(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut input)
        .map_err(|err| ConversionError::Parse(err.to_string()))?;

    root_node(&dom.document)
}

/// Parse an HTML document from a string.
pub fn parse_str(html: &str) -> Result<Node> {
    parse_bytes(html.as_bytes())
}

/// Convert the parser's document handle, which must be a document node.
fn root_node(handle: &Handle) -> Result<Node> {
    match convert_handle(handle) {
        Some(document @ Node::Document(_)) => Ok(document),
        _ => Err(ConversionError::Parse("parser did not produce a document root".to_string())),
    }
}

fn convert_children(handle: &Handle) -> Vec<Node> {
    handle.children.borrow().iter().filter_map(convert_handle).collect()
}

fn convert_handle(handle: &Handle) -> Option<Node> {
    match &handle.data {
        NodeData::Document => Some(Node::Document(convert_children(handle))),
        NodeData::Element { name, attrs, .. } => {
            let attrs = attrs
                .borrow()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect::<Vec<_>>();
            Some(Node::Element(Element::new(&name.local, attrs, convert_children(handle))))
        }
        NodeData::Text { contents } => Some(Node::Text(contents.borrow().to_string())),
        NodeData::Doctype { .. } | NodeData::Comment { .. } | NodeData::ProcessingInstruction { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Tag;

    fn find<'a>(node: &'a Node, tag: Tag) -> Option<&'a Node> {
        if node.tag() == Some(tag) {
            return Some(node);
        }
        node.children().iter().find_map(|child| find(child, tag))
    }

    #[test]
    fn strips_utf8_bom() {
        assert_eq!(strip_bom(b"\xEF\xBB\xBF<p>x</p>"), b"<p>x</p>");
    }

    #[test]
    fn strips_utf16_and_utf32_boms() {
        assert_eq!(strip_bom(b"\xFF\xFEab"), b"ab");
        assert_eq!(strip_bom(b"\xFE\xFFab"), b"ab");
        assert_eq!(strip_bom(b"\x00\x00\xFE\xFFab"), b"ab");
        assert_eq!(strip_bom(b"\xFF\xFE\x00\x00ab"), b"ab");
    }

    #[test]
    fn leaves_plain_input_alone() {
        assert_eq!(strip_bom(b"<p>x</p>"), b"<p>x</p>");
        assert_eq!(strip_bom(b""), b"");
    }

    #[test]
    fn builds_implicit_document_structure() {
        let doc = parse_str("<p>Hello <b>world</b></p>").unwrap();
        assert!(matches!(doc, Node::Document(_)));
        assert!(find(&doc, Tag::Head).is_some());

        let p = find(&doc, Tag::P).unwrap().as_element().unwrap();
        assert_eq!(p.children.len(), 2);
        assert_eq!(p.children[0], Node::text("Hello "));
    }

    #[test]
    fn keeps_attributes_in_order() {
        let doc = parse_str(r#"<a href="x" title="y">t</a>"#).unwrap();
        let a = find(&doc, Tag::A).unwrap().as_element().unwrap();
        assert_eq!(
            a.attrs,
            vec![("href".to_string(), "x".to_string()), ("title".to_string(), "y".to_string())]
        );
    }

    #[test]
    fn non_document_root_is_a_parse_error() {
        let dom = RcDom::default();
        let stray = markup5ever_rcdom::Node::new(NodeData::Text {
            contents: std::cell::RefCell::new("loose".into()),
        });
        assert!(root_node(&dom.document).is_ok());

        let err = root_node(&stray).unwrap_err();
        assert!(matches!(err, ConversionError::Parse(_)));
        assert_eq!(err.to_string(), "HTML parsing error: parser did not produce a document root");
    }

    #[test]
    fn reader_failures_are_io_errors() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk gone"))
            }
        }
        let err = parse_reader(Broken).unwrap_err();
        assert!(matches!(err, ConversionError::Io(_)));
    }

    #[test]
    fn drops_comments() {
        let doc = parse_str("<p><!-- hidden -->shown</p>").unwrap();
        let p = find(&doc, Tag::P).unwrap();
        assert_eq!(p.children(), &[Node::text("shown")]);
    }
}
