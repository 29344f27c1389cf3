//! Recursive tree walker and per-element formatting rules.
//!
//! Every recognized [`Tag`] maps to one rule function through [`Walker::rule_for`];
//! elements without a rule are walked transparently.

use std::mem;

use tracing::{trace, warn};

use super::context::TraversalContext;
use super::normalize::{collapse_whitespace, finish, tidy_fragment};
use crate::dom::{Element, Node, Tag};
use crate::error::{ConversionError, Result};
use crate::handlers::HandlerRegistry;
use crate::options::ConversionOptions;
use crate::table_writer::TableRenderer;

/// Formatting rule applied to an element.
type ElementRule<'a> = fn(&mut Walker<'a>, &Element) -> Result<()>;

/// Walks a document tree and renders it into a [`TraversalContext`].
pub(crate) struct Walker<'a> {
    pub(super) options: &'a ConversionOptions,
    pub(super) handlers: &'a HandlerRegistry,
    pub(super) renderer: &'a dyn TableRenderer,
    pub(super) ctx: TraversalContext,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(
        options: &'a ConversionOptions,
        handlers: &'a HandlerRegistry,
        renderer: &'a dyn TableRenderer,
    ) -> Self {
        Self::with_context(options, handlers, renderer, TraversalContext::new())
    }

    const fn with_context(
        options: &'a ConversionOptions,
        handlers: &'a HandlerRegistry,
        renderer: &'a dyn TableRenderer,
        ctx: TraversalContext,
    ) -> Self {
        Self {
            options,
            handlers,
            renderer,
            ctx,
        }
    }

    /// Raw buffer contents, before post-processing.
    pub(crate) fn into_raw_output(self) -> String {
        self.ctx.buf.into_string()
    }

    pub(crate) fn traverse(&mut self, node: &Node) -> Result<()> {
        match node {
            Node::Document(children) => self.traverse_children(children),
            Node::Element(element) => self.handle_element(element),
            Node::Text(data) => {
                if self.ctx.in_pre {
                    self.emit(data);
                } else {
                    self.emit(&collapse_whitespace(data));
                }
                Ok(())
            }
        }
    }

    pub(super) fn traverse_children(&mut self, children: &[Node]) -> Result<()> {
        for child in children {
            self.traverse(child)?;
        }
        Ok(())
    }

    pub(super) fn emit(&mut self, text: &str) {
        let wrap = !self.ctx.in_pre;
        self.ctx.buf.emit(text, wrap);
    }

    fn handle_element(&mut self, element: &Element) -> Result<()> {
        self.ctx.just_closed_div = false;
        let rule = Self::rule_for(element.tag);
        rule(self, element)
    }

    /// Formatting rule for a tag; untagged elements pass through.
    fn rule_for(tag: Option<Tag>) -> ElementRule<'a> {
        let Some(tag) = tag else {
            return Self::transparent;
        };
        match tag {
            Tag::Br => Self::line_break,
            Tag::H1 | Tag::H2 | Tag::H3 => Self::heading,
            Tag::Blockquote => Self::blockquote,
            Tag::Div => Self::div,
            Tag::Li => Self::list_item,
            Tag::B | Tag::Strong => Self::strong,
            Tag::A => Self::anchor,
            Tag::P | Tag::Ul => Self::paragraph,
            Tag::Table | Tag::Tfoot | Tag::Th | Tag::Tr | Tag::Td => Self::table_part,
            Tag::Pre => Self::preformatted,
            Tag::Style | Tag::Head | Tag::Script => Self::ignore,
            Tag::Img => Self::transparent,
        }
    }

    /// Render `children` into a string with a fresh context but the same options.
    fn render_isolated(&self, children: &[Node], suppress_leading_space: bool) -> Result<String> {
        let mut sub = Self::with_context(
            self.options,
            self.handlers,
            self.renderer,
            TraversalContext::isolated(suppress_leading_space),
        );
        sub.traverse_children(children)?;
        Ok(sub.into_raw_output())
    }

    /// Fully convert `node` on its own, post-processing included.
    pub(super) fn render_detached(&self, node: &Node) -> Result<String> {
        let mut sub = Self::new(self.options, self.handlers, self.renderer);
        sub.traverse(node)?;
        Ok(finish(&sub.into_raw_output()))
    }

    fn transparent(&mut self, element: &Element) -> Result<()> {
        self.traverse_children(&element.children)
    }

    fn ignore(&mut self, element: &Element) -> Result<()> {
        trace!(tag = %element.name, "skipping subtree");
        Ok(())
    }

    fn line_break(&mut self, _element: &Element) -> Result<()> {
        self.emit("\n");
        Ok(())
    }

    fn heading(&mut self, element: &Element) -> Result<()> {
        let text = tidy_fragment(&self.render_isolated(&element.children, false)?);

        if self.options.text_only {
            self.emit(&format!("{text}.\n\n"));
            return Ok(());
        }

        let width = text.lines().map(|line| line.chars().count()).max().unwrap_or(0);
        let divider = if element.tag == Some(Tag::H1) {
            "*".repeat(width)
        } else {
            "-".repeat(width)
        };

        if element.tag == Some(Tag::H3) {
            self.emit(&format!("\n\n{text}\n{divider}\n\n"));
        } else {
            self.emit(&format!("\n\n{divider}\n{text}\n{divider}\n\n"));
        }
        Ok(())
    }

    fn blockquote(&mut self, element: &Element) -> Result<()> {
        let text_only = self.options.text_only;
        let depth = self.ctx.buf.enter_quote(text_only);
        self.emit("\n");
        if depth == 1 {
            self.emit("\n");
        }

        let result = self.traverse_children(&element.children);
        self.ctx.buf.leave_quote(text_only);
        result?;

        self.emit("\n\n");
        Ok(())
    }

    fn div(&mut self, element: &Element) -> Result<()> {
        if self.ctx.buf.line_length() > 0 {
            self.emit("\n");
        }
        self.traverse_children(&element.children)?;
        if !self.ctx.just_closed_div {
            self.emit("\n");
        }
        self.ctx.just_closed_div = true;
        Ok(())
    }

    fn list_item(&mut self, element: &Element) -> Result<()> {
        if !self.options.text_only {
            self.emit("* ");
        }
        self.traverse_children(&element.children)?;
        self.emit("\n");
        Ok(())
    }

    fn strong(&mut self, element: &Element) -> Result<()> {
        let text = self.render_isolated(&element.children, true)?;
        if self.options.text_only {
            self.emit(&format!("{text}."));
        } else {
            self.emit(&format!("*{text}*"));
        }
        Ok(())
    }

    fn anchor(&mut self, element: &Element) -> Result<()> {
        let link_text = match element.single_child() {
            Some(Node::Text(text)) => Some(text.as_str()),
            _ => None,
        };

        match element.single_child() {
            Some(Node::Element(image)) if image.tag == Some(Tag::Img) => {
                if let Some(alt) = image.attr("alt").filter(|alt| !alt.is_empty()) {
                    self.emit(alt);
                }
            }
            _ => self.traverse_children(&element.children)?,
        }

        let href = element.attr("href").map(normalize_href).unwrap_or_default();
        if href.is_empty() || link_text == Some(href) || self.options.omit_links || self.options.text_only {
            return Ok(());
        }

        let annotation = match self.handlers.user_handler(Tag::A) {
            Some(handler) => handler(href).map_err(|source| {
                warn!(href, error = %source, "link handler failed");
                ConversionError::Handler { tag: Tag::A, source }
            })?,
            None => format!("( {href} )"),
        };
        self.emit(&annotation);
        Ok(())
    }

    fn paragraph(&mut self, element: &Element) -> Result<()> {
        self.emit("\n\n");
        self.traverse_children(&element.children)?;
        self.emit("\n\n");
        Ok(())
    }

    fn table_part(&mut self, element: &Element) -> Result<()> {
        if self.options.pretty_tables {
            return self.pretty_table_element(element);
        }
        if element.tag == Some(Tag::Table) {
            return self.paragraph(element);
        }
        self.traverse_children(&element.children)
    }

    fn preformatted(&mut self, element: &Element) -> Result<()> {
        let was_pre = mem::replace(&mut self.ctx.in_pre, true);
        let result = self.traverse_children(&element.children);
        self.ctx.in_pre = was_pre;
        result
    }
}

/// Trim an href and strip a leading `mailto:` scheme.
fn normalize_href(href: &str) -> &str {
    let href = href.trim();
    href.strip_prefix("mailto:").unwrap_or(href)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table_writer::AsciiTableWriter;

    const NO_ATTRS: [(&str, &str); 0] = [];

    fn render(node: &Node, options: &ConversionOptions) -> Result<String> {
        let handlers = HandlerRegistry::new();
        let mut walker = Walker::new(options, &handlers, &AsciiTableWriter);
        walker.traverse(node)?;
        Ok(finish(&walker.into_raw_output()))
    }

    #[test]
    fn normalize_href_strips_mailto() {
        assert_eq!(normalize_href("  mailto:a@b.com "), "a@b.com");
        assert_eq!(normalize_href("http://x.test"), "http://x.test");
    }

    #[test]
    fn every_tag_has_a_rule() {
        for tag in Tag::ALL {
            let element = Element::new(tag.as_str(), NO_ATTRS, vec![Node::text("x")]);
            let node = Node::Element(element);
            assert!(render(&node, &ConversionOptions::default()).is_ok(), "{tag}");
        }
    }

    #[test]
    fn ignored_subtrees_emit_nothing() {
        for name in ["style", "head", "script"] {
            let node = Node::element(name, NO_ATTRS, vec![Node::text("hidden")]);
            assert_eq!(render(&node, &ConversionOptions::default()).unwrap(), "");
        }
    }

    #[test]
    fn unknown_elements_are_transparent() {
        let node = Node::element(
            "section",
            NO_ATTRS,
            vec![Node::element("span", NO_ATTRS, vec![Node::text("inner")])],
        );
        assert_eq!(render(&node, &ConversionOptions::default()).unwrap(), "inner");
    }

    fn heading_with_bold(level: &str) -> Node {
        Node::element(
            level,
            NO_ATTRS,
            vec![
                Node::text("Say "),
                Node::element("b", NO_ATTRS, vec![Node::text("hi")]),
            ],
        )
    }

    #[test]
    fn heading_sub_render_keeps_caller_options() {
        let plain = render(&heading_with_bold("h3"), &ConversionOptions::default()).unwrap();
        assert_eq!(plain, "Say *hi*\n--------");

        let text_only = ConversionOptions::default().with_text_only(true);
        let rendered = render(&heading_with_bold("h1"), &text_only).unwrap();
        assert_eq!(rendered, "Say hi..");
    }

    #[test]
    fn preformatted_flag_is_restored() {
        let options = ConversionOptions::default();
        let handlers = HandlerRegistry::new();
        let mut walker = Walker::new(&options, &handlers, &AsciiTableWriter);
        let pre = Node::element("pre", NO_ATTRS, vec![Node::text("  keep  ")]);
        walker.traverse(&pre).unwrap();
        assert!(!walker.ctx.in_pre);
        assert!(walker.ctx.buf.as_str().contains("  keep  "));
    }

    #[test]
    fn quote_depth_is_restored_after_blockquote() {
        let options = ConversionOptions::default();
        let handlers = HandlerRegistry::new();
        let mut walker = Walker::new(&options, &handlers, &AsciiTableWriter);
        let quote = Node::element(
            "blockquote",
            NO_ATTRS,
            vec![Node::element("blockquote", NO_ATTRS, vec![Node::text("deep")])],
        );
        walker.traverse(&quote).unwrap();
        assert_eq!(walker.ctx.buf.quote_depth(), 0);
    }

    #[test]
    fn pretty_table_path_requires_option() {
        let options = ConversionOptions::default();
        let handlers = HandlerRegistry::new();
        let mut walker = Walker::new(&options, &handlers, &AsciiTableWriter);
        let table = Element::new("table", NO_ATTRS, vec![]);
        let err = walker.pretty_table_element(&table).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidState(_)));
    }
}
