//! Edge case tests for formview-html
//!
//! Malformed markup, form-heavy pages and innerHTML round trips.

use formview_dom::ElementQuery;
use formview_html::{HtmlParser, inner_html, outer_html, parse, set_inner_html};

// ============================================================================
// EMPTY AND MINIMAL INPUT
// ============================================================================

#[test]
fn test_parse_empty_string() {
    let doc = parse("").unwrap();
    assert!(doc.body().is_valid(), "html5ever always synthesizes a body");
}

#[test]
fn test_parse_only_doctype() {
    let doc = parse("<!DOCTYPE html>").unwrap();
    assert!(doc.tree().len() >= 1);
    assert!(doc.forms().is_empty());
}

// ============================================================================
// MALFORMED HTML
// ============================================================================

#[test]
fn test_parse_unclosed_form() {
    let doc = parse("<form><input name='a'><select><option>x").unwrap();
    let forms = doc.forms();
    assert_eq!(forms.len(), 1);
    let fields = doc.query_selector_all(forms[0], "input, select").unwrap();
    assert_eq!(fields.len(), 2);
}

#[test]
fn test_parse_nested_forms_are_flattened() {
    // The parser ignores a <form> start tag inside an open form
    let doc = parse("<form id='a'><form id='b'><input></form></form>").unwrap();
    assert_eq!(doc.forms().len(), 1);
}

#[test]
fn test_attribute_case_is_normalized() {
    let doc = parse("<INPUT NAME='User' TYPE='Email' Required>").unwrap();
    let input = doc.query_selector(doc.body(), "input").unwrap().unwrap();

    assert_eq!(doc.tree().get_attribute(input, "name"), Some("User"));
    assert!(doc.tree().has_attribute(input, "required"));
    assert_eq!(doc.tree().control(input).unwrap().control_type(), "email");
}

// ============================================================================
// FORM CONTENT
// ============================================================================

#[test]
fn test_parse_select_state() {
    let html = r#"
        <form>
          <select name="letters" multiple>
            <option value="A" selected>A</option>
            <option value="B" selected>B</option>
            <option value="C">C</option>
          </select>
        </form>
    "#;
    let doc = parse(html).unwrap();
    let select = doc.query_selector(doc.body(), "select").unwrap().unwrap();
    let control = doc.tree().control(select).unwrap();

    assert_eq!(control.control_type(), "select-multiple");
    assert_eq!(control.selected_values(), vec!["A", "B"]);
}

#[test]
fn test_parse_textarea_content() {
    let doc = parse("<form><textarea name='bio'>Rust fan</textarea></form>").unwrap();
    let textarea = doc.query_selector(doc.body(), "textarea").unwrap().unwrap();
    assert_eq!(doc.tree().control(textarea).unwrap().value(), "Rust fan");
}

#[test]
fn test_parse_textarea_keeps_whitespace() {
    let doc = parse("<form>\n  <textarea name='t'>   </textarea>\n</form>").unwrap();
    let form = doc.forms()[0];
    let textarea = doc.query_selector(form, "textarea").unwrap().unwrap();

    assert_eq!(doc.tree().control(textarea).unwrap().value(), "   ");
    // Whitespace between elements is still dropped
    assert_eq!(doc.tree().children(form).count(), 1);
}

#[test]
fn test_parse_with_url_keeps_url() {
    let doc = HtmlParser::new()
        .parse_with_url("<title> Signup </title>", "file:///tmp/signup.html")
        .unwrap();
    assert_eq!(doc.url(), "file:///tmp/signup.html");
    assert_eq!(doc.title(), "Signup");
}

// ============================================================================
// INNER HTML
// ============================================================================

#[test]
fn test_set_inner_html_replaces_content() {
    let mut doc = parse("<div id='output'><p>stale</p></div>").unwrap();
    let output = doc.get_element_by_id("output").unwrap();

    set_inner_html(doc.tree_mut(), output, "<b>user</b>: alice<br />").unwrap();
    assert_eq!(inner_html(doc.tree(), output), "<b>user</b>: alice<br />");

    set_inner_html(doc.tree_mut(), output, "<b>bio</b>: Unknown<br />").unwrap();
    assert_eq!(inner_html(doc.tree(), output), "<b>bio</b>: Unknown<br />");
}

#[test]
fn test_set_inner_html_with_empty_string_clears() {
    let mut doc = parse("<div id='output'>old</div>").unwrap();
    let output = doc.get_element_by_id("output").unwrap();

    set_inner_html(doc.tree_mut(), output, "").unwrap();
    assert_eq!(inner_html(doc.tree(), output), "");
}

#[test]
fn test_outer_html_escapes_text() {
    let mut doc = parse("<p id='p'></p>").unwrap();
    let p = doc.get_element_by_id("p").unwrap();
    let text = doc.tree_mut().create_text("a < b & c");
    doc.tree_mut().append_child(p, text);

    assert_eq!(outer_html(doc.tree(), p), "<p id=\"p\">a &lt; b &amp; c</p>");
}
