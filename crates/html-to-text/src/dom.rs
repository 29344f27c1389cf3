//! Owned document tree consumed by the converter.
//!
//! The tree is produced by [`crate::parser`] but can also be built by hand, which lets
//! callers parse once and render the same document with several option sets.

use std::fmt;

/// Element tags the converter formats specially.
///
/// Every other element is walked transparently and carries no `Tag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Tag {
    /// `<a>`
    A,
    /// `<b>`
    B,
    /// `<blockquote>`
    Blockquote,
    /// `<br>`
    Br,
    /// `<div>`
    Div,
    /// `<h1>`
    H1,
    /// `<h2>`
    H2,
    /// `<h3>`
    H3,
    /// `<head>`
    Head,
    /// `<img>`
    Img,
    /// `<li>`
    Li,
    /// `<p>`
    P,
    /// `<pre>`
    Pre,
    /// `<script>`
    Script,
    /// `<strong>`
    Strong,
    /// `<style>`
    Style,
    /// `<table>`
    Table,
    /// `<td>`
    Td,
    /// `<tfoot>`
    Tfoot,
    /// `<th>`
    Th,
    /// `<tr>`
    Tr,
    /// `<ul>`
    Ul,
}

impl Tag {
    /// All recognized tags, in declaration order.
    pub const ALL: [Self; 22] = [
        Self::A,
        Self::B,
        Self::Blockquote,
        Self::Br,
        Self::Div,
        Self::H1,
        Self::H2,
        Self::H3,
        Self::Head,
        Self::Img,
        Self::Li,
        Self::P,
        Self::Pre,
        Self::Script,
        Self::Strong,
        Self::Style,
        Self::Table,
        Self::Td,
        Self::Tfoot,
        Self::Th,
        Self::Tr,
        Self::Ul,
    ];

    /// Look up a tag by element name (ASCII case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(name))
    }

    /// Lowercase element name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
            Self::Blockquote => "blockquote",
            Self::Br => "br",
            Self::Div => "div",
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::Head => "head",
            Self::Img => "img",
            Self::Li => "li",
            Self::P => "p",
            Self::Pre => "pre",
            Self::Script => "script",
            Self::Strong => "strong",
            Self::Style => "style",
            Self::Table => "table",
            Self::Td => "td",
            Self::Tfoot => "tfoot",
            Self::Th => "th",
            Self::Tr => "tr",
            Self::Ul => "ul",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Document root.
    Document(Vec<Node>),
    /// Element with a name, attributes and children.
    Element(Element),
    /// Character data, entities already decoded.
    Text(String),
}

impl Node {
    /// Create a text node.
    pub fn text(data: impl Into<String>) -> Self {
        Self::Text(data.into())
    }

    /// Create an element node from a name, attribute pairs and children.
    pub fn element<I, K, V>(name: &str, attrs: I, children: Vec<Self>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Element(Element::new(name, attrs, children))
    }

    /// Children of a document or element; text nodes have none.
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Document(children) => children,
            Self::Element(element) => &element.children,
            Self::Text(_) => &[],
        }
    }

    /// The element, if this node is one.
    pub const fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Recognized tag of an element node.
    pub fn tag(&self) -> Option<Tag> {
        self.as_element().and_then(|element| element.tag)
    }
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercase element name.
    pub name: String,
    /// Recognized tag, `None` for elements walked transparently.
    pub tag: Option<Tag>,
    /// Attributes in document order.
    pub attrs: Vec<(String, String)>,
    /// Child nodes in document order.
    pub children: Vec<Node>,
}

impl Element {
    /// Build an element, resolving its [`Tag`] from the name.
    pub fn new<I, K, V>(name: &str, attrs: I, children: Vec<Node>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let name = name.to_ascii_lowercase();
        Self {
            tag: Tag::from_name(&name),
            name,
            attrs: attrs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            children,
        }
    }

    /// Value of the first attribute called `name`.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The only child of this element, if it has exactly one.
    pub fn single_child(&self) -> Option<&Node> {
        match self.children.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_lookup_is_case_insensitive() {
        assert_eq!(Tag::from_name("BLOCKQUOTE"), Some(Tag::Blockquote));
        assert_eq!(Tag::from_name("tfoot"), Some(Tag::Tfoot));
        assert_eq!(Tag::from_name("span"), None);
    }

    #[test]
    fn every_tag_round_trips_through_its_name() {
        for tag in Tag::ALL {
            assert_eq!(Tag::from_name(tag.as_str()), Some(tag));
        }
    }

    #[test]
    fn attr_returns_first_match() {
        let element = Element::new("A", [("href", "one"), ("href", "two")], vec![]);
        assert_eq!(element.name, "a");
        assert_eq!(element.tag, Some(Tag::A));
        assert_eq!(element.attr("href"), Some("one"));
        assert_eq!(element.attr("alt"), None);
    }
}
