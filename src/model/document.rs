//! Document-level types.

use super::Node;
use crate::error::Result;
use crate::parser::{HtmlParser, ParseOptions};
use serde::{Deserialize, Serialize};

/// A parsed block-markup document.
///
/// The document owns its source text and an index-addressed list of
/// top-level nodes. Node spans partition the source: concatenating
/// [`Document::markup`] for every node in order yields the source exactly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Original markup
    source: String,

    /// Top-level block nodes in document order
    nodes: Vec<Node>,
}

impl Document {
    /// Assemble a document from a source and its already-scanned nodes.
    pub(crate) fn from_parts(source: String, nodes: Vec<Node>) -> Self {
        Self { source, nodes }
    }

    /// Parse markup, degrading to a single block on malformed input.
    pub fn parse(markup: &str) -> Self {
        HtmlParser::new(ParseOptions::new().lenient()).parse_lossy(markup)
    }

    /// Parse markup and report scanner errors instead of degrading.
    pub fn try_parse(markup: &str) -> Result<Self> {
        HtmlParser::new(ParseOptions::default()).parse(markup)
    }

    /// The original markup.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// All top-level nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Get a node by index.
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Number of top-level nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the document has no block nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Markup of a node including its trivia.
    pub fn markup(&self, node: &Node) -> &str {
        &self.source[node.span.clone()]
    }

    /// Markup of a node's element alone.
    pub fn element_markup(&self, node: &Node) -> &str {
        &self.source[node.element.clone()]
    }

    /// Trivia (whitespace, comments) following a node's element.
    pub fn trailing_markup(&self, node: &Node) -> &str {
        &self.source[node.element.end..node.span.end]
    }

    /// Leading trivia before the first node's element.
    pub fn leading_markup(&self) -> &str {
        match self.nodes.first() {
            Some(first) => &self.source[first.span.start..first.element.start],
            None => &self.source,
        }
    }

    /// Sum of word counts across all nodes.
    pub fn word_count(&self) -> usize {
        self.nodes.iter().map(|n| n.word_count).sum()
    }

    /// Rendered text of the whole document, one node per line.
    pub fn plain_text(&self) -> String {
        self.nodes
            .iter()
            .map(|n| n.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_empty() {
        let doc = Document::parse("");
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 0);
        assert_eq!(doc.word_count(), 0);
    }

    #[test]
    fn test_spans_partition_source() {
        let src = "\n<h2>Active codes</h2>\n<p>Redeem these soon.</p>\n\n<hr>\n";
        let doc = Document::parse(src);
        assert_eq!(doc.len(), 3);

        let rebuilt: String = doc.nodes().iter().map(|n| doc.markup(n)).collect();
        assert_eq!(rebuilt, src);

        assert_eq!(doc.leading_markup(), "\n");
        assert_eq!(doc.element_markup(&doc.nodes()[1]), "<p>Redeem these soon.</p>");
        assert_eq!(doc.trailing_markup(&doc.nodes()[1]), "\n\n");
    }

    #[test]
    fn test_plain_text_and_word_count() {
        let doc = Document::parse("<h1>Title</h1><p>one two</p><p>three</p>");
        assert_eq!(doc.word_count(), 4);
        assert_eq!(doc.plain_text(), "Title\none two\nthree");
    }
}
