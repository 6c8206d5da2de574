//! Document - High-level document API

use std::rc::Rc;

use crate::events::ListenerRegistry;
use crate::{
    DomEvent, DomEventType, DomTree, ElementQuery, EventDispatcher, NodeId, SelectorError,
};

/// HTML Document
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
    listeners: ListenerRegistry,
}

impl Document {
    /// Create a new document with html/head/body
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        tree.append_child(tree.root(), html);
        tree.append_child(html, head);
        tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
            listeners: ListenerRegistry::default(),
        }
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
            listeners: ListenerRegistry::default(),
        }
    }

    /// Locate html/head/body after the tree was built externally
    pub fn finalize(&mut self) {
        let tree = &self.tree;
        let find_child = |parent: NodeId, tag: &str| {
            tree.children(parent)
                .map(|(id, _)| id)
                .find(|&id| tree.is_element_named(id, tag))
                .unwrap_or(NodeId::NONE)
        };

        let html = find_child(tree.root(), "html");
        let (head, body) = if html.is_valid() {
            (find_child(html, "head"), find_child(html, "body"))
        } else {
            (NodeId::NONE, NodeId::NONE)
        };

        self.html_element = html;
        self.head_element = head;
        self.body_element = body;
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get document title
    pub fn title(&self) -> String {
        if !self.head_element.is_valid() {
            return String::new();
        }
        self.tree
            .children(self.head_element)
            .map(|(id, _)| id)
            .find(|&id| self.tree.is_element_named(id, "title"))
            .map(|id| self.tree.text_content(id).trim().to_string())
            .unwrap_or_default()
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Get element by ID (first in document order)
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .find(|&node| self.tree.get_attribute(node, "id") == Some(id))
    }

    /// All `<form>` elements in document order
    pub fn forms(&self) -> Vec<NodeId> {
        self.tree.get_elements_by_tag_name(self.tree.root(), "form")
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Register a listener on a node
    pub fn add_event_listener<F>(&mut self, node: NodeId, event_type: DomEventType, listener: F)
    where
        F: Fn(&mut Document, &mut DomEvent) + 'static,
    {
        tracing::trace!("Listener added: {} on {}", event_type.name(), node);
        self.listeners.add(node, event_type, Rc::new(listener));
    }

    /// Number of listeners registered on a node for an event type
    pub fn listener_count(&self, node: NodeId, event_type: DomEventType) -> usize {
        self.listeners.count(node, event_type)
    }

    /// Drop every listener on a node for an event type
    pub fn remove_event_listeners(&mut self, node: NodeId, event_type: DomEventType) {
        self.listeners.clear(node, event_type);
    }

    /// Simulate a user click; disabled controls swallow the click
    pub fn click(&mut self, node: NodeId) -> bool {
        if self.is_disabled_control(node) {
            tracing::debug!("Ignoring click on disabled control {}", node);
            return false;
        }
        self.dispatch_event(DomEvent::click(node))
    }

    /// Fire DOMContentLoaded at the document node
    pub fn content_loaded(&mut self) -> bool {
        self.dispatch_event(DomEvent::content_loaded(self.tree.root()))
    }

    fn is_disabled_control(&self, node: NodeId) -> bool {
        const CONTROLS: &[&str] = &["button", "input", "select", "textarea"];
        self.tree
            .tag_name(node)
            .is_some_and(|tag| CONTROLS.contains(&tag))
            && self.tree.has_attribute(node, "disabled")
    }
}

impl EventDispatcher for Document {
    fn dispatch_event(&mut self, mut event: DomEvent) -> bool {
        let path: Vec<NodeId> = std::iter::once(event.target)
            .chain(self.tree.ancestors(event.target))
            .collect();

        for node in path {
            event.current_target = Some(node);
            for listener in self.listeners.get(node, event.event_type) {
                listener(self, &mut event);
            }
            if !event.bubbles || event.is_propagation_stopped() {
                break;
            }
        }

        event.current_target = None;
        !event.is_default_prevented()
    }
}

impl ElementQuery for Document {
    fn query_selector(&self, root: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        self.tree.query_selector(root, selector)
    }

    fn query_selector_all(&self, root: NodeId, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        self.tree.query_selector_all(root, selector)
    }

    fn get_elements_by_tag_name(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        self.tree.get_elements_by_tag_name(root, tag)
    }

    fn closest(&self, element: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        self.tree.closest(element, selector)
    }

    fn matches(&self, element: NodeId, selector: &str) -> Result<bool, SelectorError> {
        self.tree.matches(element, selector)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn test_new_document_structure() {
        let doc = Document::new("about:blank");
        assert!(doc.body().is_valid());
        assert_eq!(doc.tree().tag_name(doc.head()), Some("head"));
        assert_eq!(doc.title(), "");
    }

    #[test]
    fn test_click_bubbles_to_ancestors() {
        let mut doc = Document::default();
        let form = doc.tree.create_element("form");
        let button = doc.tree.create_element("button");
        doc.tree.append_child(doc.body(), form);
        doc.tree.append_child(form, button);

        let hits = Rc::new(Cell::new(0));
        let seen = Rc::clone(&hits);
        doc.add_event_listener(form, DomEventType::Click, move |_, event| {
            assert_eq!(event.current_target, Some(form));
            seen.set(seen.get() + 1);
        });

        assert!(doc.click(button));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_disabled_button_swallows_click() {
        let mut doc = Document::default();
        let button = doc.tree.create_element("button");
        doc.tree.append_child(doc.body(), button);
        doc.tree.set_attribute(button, "disabled", "");

        let hits = Rc::new(Cell::new(0));
        let seen = Rc::clone(&hits);
        doc.add_event_listener(button, DomEventType::Click, move |_, _| seen.set(seen.get() + 1));

        assert!(!doc.click(button));
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_listener_can_mutate_document() {
        let mut doc = Document::default();
        let button = doc.tree.create_element("button");
        doc.tree.append_child(doc.body(), button);
        doc.add_event_listener(button, DomEventType::Click, |doc, event| {
            doc.tree_mut().set_attribute(event.target, "data-clicked", "yes");
            event.prevent_default();
        });

        assert!(!doc.click(button));
        assert_eq!(doc.tree().get_attribute(button, "data-clicked"), Some("yes"));
    }
}
