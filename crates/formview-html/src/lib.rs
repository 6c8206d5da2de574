//! formview HTML Parser
//!
//! HTML5 parser built on html5ever, plus innerHTML serialization and
//! assignment for the formview DOM.

mod parser;
mod serializer;

pub use formview_dom::{Document, DomTree, NodeId};
pub use parser::HtmlParser;
pub use serializer::{escape_text, inner_html, outer_html};

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read HTML input: {0}")]
    Io(#[from] std::io::Error),

    #[error("node {node} cannot hold HTML content")]
    InvalidTarget { node: NodeId },
}

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Result<Document, ParseError> {
    HtmlParser::new().parse(html)
}

/// Parse an HTML string with a base URL
pub fn parse_with_url(html: &str, url: &str) -> Result<Document, ParseError> {
    HtmlParser::new().parse_with_url(html, url)
}

/// Replace all children of `node` with the parsed `html` (innerHTML setter)
pub fn set_inner_html(tree: &mut DomTree, node: NodeId, html: &str) -> Result<(), ParseError> {
    if tree.element(node).is_none() {
        return Err(ParseError::InvalidTarget { node });
    }
    tree.remove_children(node);
    HtmlParser::new().parse_fragment(html, tree, node)?;
    Ok(())
}
