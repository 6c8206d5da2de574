//! Comprehensive tests for formview-dom
//!
//! Tree structure, queries, events and form-control state.

use std::cell::RefCell;
use std::rc::Rc;

use formview_dom::forms::SelectedFile;
use formview_dom::{Document, DomEventType, DomTree, ElementQuery, NodeId, SelectorError};

fn build_form(doc: &mut Document) -> (NodeId, Vec<NodeId>) {
    let tree = doc.tree_mut();
    let form = tree.create_element("form");
    let fieldset = tree.create_element("fieldset");
    let user = tree.create_element("input");
    let bio = tree.create_element("textarea");
    let submit = tree.create_element("button");
    let output = tree.create_element("div");

    tree.set_attribute(user, "name", "user");
    tree.set_attribute(bio, "name", "bio");
    tree.set_attribute(submit, "id", "submit");
    tree.set_attribute(output, "id", "output");

    tree.append_child(form, fieldset);
    tree.append_child(fieldset, user);
    tree.append_child(fieldset, bio);
    tree.append_child(form, submit);
    tree.append_child(form, output);

    let body = doc.body();
    doc.tree_mut().append_child(body, form);
    (form, vec![user, bio, submit, output])
}

// ============================================================================
// TREE STRUCTURE
// ============================================================================

#[test]
fn test_dom_tree_siblings() {
    let mut tree = DomTree::new();

    let div = tree.create_element("div");
    let child1 = tree.create_element("p");
    let child2 = tree.create_element("p");
    let child3 = tree.create_element("p");

    tree.append_child(tree.root(), div);
    tree.append_child(div, child1);
    tree.append_child(div, child2);
    tree.append_child(div, child3);

    let node1 = tree.get(child1).unwrap();
    assert_eq!(node1.next_sibling, child2);
    assert!(!node1.prev_sibling.is_valid());

    let node3 = tree.get(child3).unwrap();
    assert_eq!(node3.prev_sibling, child2);
    assert!(!node3.next_sibling.is_valid());
}

#[test]
fn test_dom_tree_removal() {
    let mut tree = DomTree::new();

    let div = tree.create_element("div");
    let p1 = tree.create_element("p");
    let p2 = tree.create_element("p");
    let p3 = tree.create_element("p");

    tree.append_child(tree.root(), div);
    tree.append_child(div, p1);
    tree.append_child(div, p2);
    tree.append_child(div, p3);

    tree.remove(p2);

    assert_eq!(tree.get(p1).unwrap().next_sibling, p3);
    assert_eq!(tree.get(p3).unwrap().prev_sibling, p1);
    assert!(!tree.get(p2).unwrap().parent.is_valid());
}

#[test]
fn test_remove_children_empties_node() {
    let mut tree = DomTree::new();
    let output = tree.create_element("div");
    tree.append_child(tree.root(), output);
    for _ in 0..3 {
        let b = tree.create_element("b");
        tree.append_child(output, b);
    }

    tree.remove_children(output);
    assert_eq!(tree.children(output).count(), 0);
    assert!(!tree.get(output).unwrap().last_child.is_valid());
}

#[test]
fn test_text_content_concatenates() {
    let mut tree = DomTree::new();
    let p = tree.create_element("p");
    let b = tree.create_element("b");
    let t1 = tree.create_text("user");
    let t2 = tree.create_text(": alice");
    tree.append_child(tree.root(), p);
    tree.append_child(p, b);
    tree.append_child(b, t1);
    tree.append_child(p, t2);

    assert_eq!(tree.text_content(p), "user: alice");
}

// ============================================================================
// QUERIES
// ============================================================================

#[test]
fn test_query_selector_all_document_order() {
    let mut doc = Document::default();
    let (form, ids) = build_form(&mut doc);

    let found = doc.query_selector_all(form, "textarea, input").unwrap();
    assert_eq!(found, vec![ids[0], ids[1]]);
}

#[test]
fn test_query_excludes_root_itself() {
    let mut doc = Document::default();
    let (form, _) = build_form(&mut doc);
    assert!(doc.query_selector_all(form, "form").unwrap().is_empty());
}

#[test]
fn test_invalid_selector_is_an_error() {
    let doc = Document::default();
    let err = doc.query_selector_all(doc.body(), "input >").unwrap_err();
    assert!(matches!(err, SelectorError::UnexpectedChar { ch: '>', .. }));
}

#[test]
fn test_get_element_by_id_and_forms() {
    let mut doc = Document::default();
    let (form, ids) = build_form(&mut doc);

    assert_eq!(doc.get_element_by_id("output"), Some(ids[3]));
    assert_eq!(doc.get_element_by_id("missing"), None);
    assert_eq!(doc.forms(), vec![form]);
}

// ============================================================================
// EVENTS
// ============================================================================

#[test]
fn test_listeners_run_in_registration_order() {
    let mut doc = Document::default();
    let (_, ids) = build_form(&mut doc);
    let log = Rc::new(RefCell::new(Vec::new()));

    for tag in ["first", "second"] {
        let log = Rc::clone(&log);
        doc.add_event_listener(ids[2], DomEventType::Click, move |_, _| {
            log.borrow_mut().push(tag);
        });
    }

    doc.click(ids[2]);
    assert_eq!(*log.borrow(), vec!["first", "second"]);
    assert_eq!(doc.listener_count(ids[2], DomEventType::Click), 2);
}

#[test]
fn test_stop_propagation_keeps_event_on_target() {
    let mut doc = Document::default();
    let (form, ids) = build_form(&mut doc);
    let hits = Rc::new(RefCell::new(0));

    doc.add_event_listener(ids[2], DomEventType::Click, |_, event| event.stop_propagation());
    let seen = Rc::clone(&hits);
    doc.add_event_listener(form, DomEventType::Click, move |_, _| *seen.borrow_mut() += 1);

    doc.click(ids[2]);
    assert_eq!(*hits.borrow(), 0);
}

#[test]
fn test_content_loaded_reaches_document() {
    let mut doc = Document::default();
    let fired = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&fired);
    let root = doc.tree().root();
    doc.add_event_listener(root, DomEventType::DOMContentLoaded, move |_, _| {
        *flag.borrow_mut() = true;
    });

    doc.content_loaded();
    assert!(*fired.borrow());
}

// ============================================================================
// FORM CONTROL STATE
// ============================================================================

#[test]
fn test_textarea_value_from_text() {
    let mut doc = Document::default();
    let (_, ids) = build_form(&mut doc);
    let text = doc.tree_mut().create_text("hello there");
    doc.tree_mut().append_child(ids[1], text);

    assert_eq!(doc.tree().control(ids[1]).unwrap().value(), "hello there");
}

#[test]
fn test_multiple_file_selection() {
    let mut tree = DomTree::new();
    let input = tree.create_element("input");
    tree.append_child(tree.root(), input);
    tree.set_attribute(input, "type", "file");
    tree.set_attribute(input, "multiple", "");
    tree.set_files(
        input,
        vec![SelectedFile::new("x.png"), SelectedFile::new("y.png")],
    );

    let control = tree.control(input).unwrap();
    assert!(control.is_multiple());
    let names: Vec<&str> = control.files().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["x.png", "y.png"]);
}

#[test]
fn test_control_on_text_node_is_none() {
    let mut tree = DomTree::new();
    let text = tree.create_text("plain");
    assert!(tree.control(text).is_none());
    assert!(!tree.set_value(text, "x"));
}
