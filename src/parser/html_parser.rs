//! Top-level block scanner built on quick-xml.
//!
//! The scanner reads HTML as a tolerant XML event stream and only tracks
//! nesting depth, so every top-level element maps to one byte range of the
//! original input. Nothing is re-serialized, which keeps block markup
//! byte-identical to the source.

use std::sync::OnceLock;

use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;
use regex::Regex;

use crate::error::{Error, Result};
use crate::model::{Document, Node, NodeKind};

use super::options::{ErrorMode, ParseOptions};

/// Elements that never have a closing tag in HTML.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose text is not rendered as prose.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "template"];

/// Block markup parser.
#[derive(Debug, Clone, Default)]
pub struct HtmlParser {
    options: ParseOptions,
}

impl HtmlParser {
    /// Create a parser with the given options.
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Parse markup into a document.
    ///
    /// In strict mode scanner errors and unclosed elements are returned.
    /// In lenient mode input with either problem becomes a single raw block
    /// whose words are counted from the tag-stripped text.
    pub fn parse(&self, markup: &str) -> Result<Document> {
        match self.scan(markup) {
            Ok(nodes) => Ok(Document::from_parts(markup.to_string(), nodes)),
            Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                log::warn!("Markup scan failed, keeping input as one block: {}", e);
                Ok(raw_document(markup))
            }
            Err(e) => Err(e),
        }
    }

    /// Parse markup, never failing.
    pub fn parse_lossy(&self, markup: &str) -> Document {
        self.parse(markup).unwrap_or_else(|e| {
            log::warn!("Markup scan failed, keeping input as one block: {}", e);
            raw_document(markup)
        })
    }

    fn scan(&self, markup: &str) -> Result<Vec<Node>> {
        let mut reader = Reader::from_str(markup);
        {
            let config = reader.config_mut();
            config.check_end_names = false;
            config.allow_unmatched_ends = true;
            config.check_comments = false;
        }

        let mut nodes: Vec<Node> = Vec::new();
        let mut open: Option<OpenBlock> = None;

        loop {
            let start = reader.buffer_position() as usize;
            let event = reader.read_event().map_err(|e| Error::Parse {
                position: start,
                message: e.to_string(),
            })?;
            let end = reader.buffer_position() as usize;

            match event {
                Event::Eof => break,
                Event::Start(e) => {
                    let tag = tag_name(&e);
                    let void = is_void(&tag);
                    match open.as_mut() {
                        Some(block) => block.enter(&tag, void),
                        None if void => nodes.push(void_node(&tag, start..end)),
                        None => open = Some(OpenBlock::new(&tag, start, &self.options)),
                    }
                }
                Event::Empty(e) => {
                    let tag = tag_name(&e);
                    match open.as_mut() {
                        Some(block) => block.enter(&tag, true),
                        None => nodes.push(void_node(&tag, start..end)),
                    }
                }
                Event::End(e) => {
                    let tag = String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase();
                    if is_void(&tag) {
                        continue;
                    }
                    if let Some(block) = open.as_mut() {
                        if block.leave() {
                            if let Some(block) = open.take() {
                                nodes.push(block.finish(end));
                            }
                        }
                    }
                }
                Event::Text(t) => {
                    let text = decode_text(&t);
                    match open.as_mut() {
                        Some(block) => block.push_text(&text),
                        None if text.trim().is_empty() => {}
                        None => nodes.push(Node::new(NodeKind::Text, start..end, text, 0)),
                    }
                }
                Event::CData(c) => {
                    if let Some(block) = open.as_mut() {
                        block.push_text(&String::from_utf8_lossy(&c));
                    }
                }
                // Comments, doctype, processing instructions: trivia
                _ => {}
            }
        }

        // A dangling element has swallowed every block after it
        if let Some(block) = open.take() {
            return Err(Error::Parse {
                position: block.start,
                message: format!("unclosed <{}> element", block.kind.tag()),
            });
        }

        assign_spans(&mut nodes, markup.len());
        log::debug!(
            "Scanned {} top-level blocks from {} bytes",
            nodes.len(),
            markup.len()
        );
        Ok(nodes)
    }
}

/// A top-level element whose closing tag has not been seen yet.
struct OpenBlock {
    kind: NodeKind,
    start: usize,
    depth: usize,
    text: String,
    raw_depth: usize,
    keep_raw: bool,
    image_count: usize,
}

impl OpenBlock {
    fn new(tag: &str, start: usize, options: &ParseOptions) -> Self {
        Self {
            kind: NodeKind::from_tag(tag),
            start,
            depth: 1,
            text: String::new(),
            raw_depth: usize::from(RAW_TEXT_ELEMENTS.contains(&tag)),
            keep_raw: options.count_raw_text,
            image_count: 0,
        }
    }

    fn enter(&mut self, tag: &str, void: bool) {
        if tag == "img" {
            self.image_count += 1;
        }
        if !void {
            self.depth += 1;
            if self.raw_depth > 0 || RAW_TEXT_ELEMENTS.contains(&tag) {
                self.raw_depth += 1;
            }
        }
    }

    /// Returns true when the block's own closing tag was reached.
    fn leave(&mut self) -> bool {
        self.depth -= 1;
        self.raw_depth = self.raw_depth.saturating_sub(1);
        self.depth == 0
    }

    fn push_text(&mut self, text: &str) {
        if self.raw_depth == 0 || self.keep_raw {
            self.text.push_str(text);
        }
    }

    fn finish(self, end: usize) -> Node {
        Node::new(self.kind, self.start..end, self.text, self.image_count)
    }
}

fn void_node(tag: &str, element: std::ops::Range<usize>) -> Node {
    Node::new(
        NodeKind::from_tag(tag),
        element,
        String::new(),
        usize::from(tag == "img"),
    )
}

fn tag_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase()
}

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

fn decode_text(text: &BytesText) -> String {
    match text.unescape_with(html_entity) {
        Ok(s) => s.into_owned(),
        Err(_) => String::from_utf8_lossy(text).into_owned(),
    }
}

/// Named entities commonly produced by markdown renderers.
fn html_entity(name: &str) -> Option<&'static str> {
    let value = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => "\u{a0}",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "hellip" => "\u{2026}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "copy" => "\u{a9}",
        "reg" => "\u{ae}",
        "trade" => "\u{2122}",
        _ => return None,
    };
    Some(value)
}

/// Make node spans partition the source.
///
/// Trivia between two elements belongs to the earlier node; leading
/// trivia belongs to the first node.
fn assign_spans(nodes: &mut [Node], len: usize) {
    let ends: Vec<usize> = nodes
        .iter()
        .skip(1)
        .map(|n| n.element.start)
        .chain(std::iter::once(len))
        .collect();

    for (i, (node, end)) in nodes.iter_mut().zip(ends).enumerate() {
        let start = if i == 0 { 0 } else { node.element.start };
        node.span = start..end;
    }
}

/// Single-block document for markup the scanner rejected.
fn raw_document(markup: &str) -> Document {
    static TAG: OnceLock<Regex> = OnceLock::new();

    if markup.trim().is_empty() {
        return Document::from_parts(markup.to_string(), Vec::new());
    }

    // A bare `<` in prose is text, not the start of a tag
    let tag = TAG.get_or_init(|| Regex::new(r"(?s)<!--.*?-->|</?[A-Za-z!?][^>]*>").unwrap());
    let text = tag.replace_all(markup, "").into_owned();
    let node = Node::new(NodeKind::Raw, 0..markup.len(), text, 0);
    Document::from_parts(markup.to_string(), vec![node])
}
