//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it to the formview arena DOM.

use formview_dom::{Document, DomTree, NodeId};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use crate::ParseError;

/// Elements whose whitespace-only text is content
const PRESERVE_WHITESPACE: &[&str] = &["textarea", "pre", "option"];

/// HTML5 parser
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Result<Document, ParseError> {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a base URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> Result<Document, ParseError> {
        tracing::debug!("Parsing HTML document: {}", url);

        let dom = read_dom(html)?;

        let mut document = Document::empty(url);
        let root = document.tree().root();
        self.convert_node(&dom.document, document.tree_mut(), root);
        document.finalize();

        tracing::debug!("Parsed {} nodes", document.tree().len());
        Ok(document)
    }

    /// Parse `html` in body context and append the result to `parent`
    ///
    /// Returns the top-level nodes that were appended.
    pub fn parse_fragment(
        &self,
        html: &str,
        tree: &mut DomTree,
        parent: NodeId,
    ) -> Result<Vec<NodeId>, ParseError> {
        if tree.element(parent).is_none() {
            return Err(ParseError::InvalidTarget { node: parent });
        }

        let dom = read_dom(&format!("<!DOCTYPE html><body>{html}"))?;
        let Some(body) = find_body(&dom.document) else {
            return Ok(Vec::new());
        };

        let before = tree.children(parent).count();
        for child in body.children.borrow().iter() {
            self.convert_node(child, tree, parent);
        }
        Ok(tree
            .children(parent)
            .skip(before)
            .map(|(id, _)| id)
            .collect())
    }

    /// Convert an RcDom node to our DOM format
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) {
        match &handle.data {
            RcNodeData::Document => {
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, parent);
                }
            }
            RcNodeData::Doctype { name, .. } => {
                let id = tree.create_doctype(name);
                tree.append_child(parent, id);
            }
            RcNodeData::Text { contents } => {
                let text = contents.borrow().to_string();
                let preserve = tree
                    .tag_name(parent)
                    .is_some_and(|tag| PRESERVE_WHITESPACE.contains(&tag));
                if preserve || !text.trim().is_empty() {
                    let id = tree.create_text(&text);
                    tree.append_child(parent, id);
                }
            }
            RcNodeData::Comment { contents } => {
                let id = tree.create_comment(contents);
                tree.append_child(parent, id);
            }
            RcNodeData::Element { name, attrs, .. } => {
                let id = tree.create_element(&name.local);
                for attr in attrs.borrow().iter() {
                    tree.set_attribute(id, &attr.name.local, &attr.value);
                }
                tree.append_child(parent, id);

                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, id);
                }
            }
            RcNodeData::ProcessingInstruction { .. } => {
                // Not produced for HTML input
            }
        }
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

fn read_dom(html: &str) -> Result<RcDom, ParseError> {
    Ok(parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())?)
}

fn element_child(handle: &Handle, tag: &str) -> Option<Handle> {
    handle
        .children
        .borrow()
        .iter()
        .find(|child| matches!(&child.data, RcNodeData::Element { name, .. } if &*name.local == tag))
        .cloned()
}

fn find_body(document: &Handle) -> Option<Handle> {
    let html = element_child(document, "html")?;
    element_child(&html, "body")
}
