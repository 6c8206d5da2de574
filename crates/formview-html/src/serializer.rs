//! HTML Serialization (innerHTML/outerHTML)

use formview_dom::{DomTree, NodeData, NodeId};

/// Void elements (no end tag)
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Raw text elements (no escaping for content)
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Serialize innerHTML of a node (children only)
pub fn inner_html(tree: &DomTree, node: NodeId) -> String {
    let mut output = String::new();
    for (child, _) in tree.children(node) {
        serialize_node(tree, child, &mut output);
    }
    output
}

/// Serialize outerHTML of a node (including the node itself)
pub fn outer_html(tree: &DomTree, node: NodeId) -> String {
    let mut output = String::new();
    serialize_node(tree, node, &mut output);
    output
}

fn serialize_node(tree: &DomTree, node_id: NodeId, output: &mut String) {
    let Some(node) = tree.get(node_id) else {
        return;
    };

    match &node.data {
        NodeData::Document => {
            for (child, _) in tree.children(node_id) {
                serialize_node(tree, child, output);
            }
        }
        NodeData::Element(elem) => {
            let tag = tree.resolve(elem.local_name);

            output.push('<');
            output.push_str(tag);
            for attr in &elem.attrs {
                output.push(' ');
                output.push_str(tree.resolve(attr.name));
                if !attr.value.is_empty() {
                    output.push_str("=\"");
                    escape_attribute(&attr.value, output);
                    output.push('"');
                }
            }

            if VOID_ELEMENTS.contains(&tag) {
                output.push_str(" />");
                return;
            }
            output.push('>');

            for (child_id, child) in tree.children(node_id) {
                match (&child.data, RAW_TEXT_ELEMENTS.contains(&tag)) {
                    (NodeData::Text(text), true) => output.push_str(text),
                    _ => serialize_node(tree, child_id, output),
                }
            }

            output.push_str("</");
            output.push_str(tag);
            output.push('>');
        }
        NodeData::Text(text) => escape_text(text, output),
        NodeData::Comment(text) => {
            output.push_str("<!--");
            output.push_str(text);
            output.push_str("-->");
        }
        NodeData::Doctype { name } => {
            output.push_str("<!DOCTYPE ");
            output.push_str(name);
            output.push('>');
        }
    }
}

/// Escape text content for HTML
pub fn escape_text(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
}

/// Escape attribute value
fn escape_attribute(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        let mut output = String::new();
        escape_text("Hello <world> & \"friends\"", &mut output);
        assert_eq!(output, "Hello &lt;world&gt; &amp; \"friends\"");
    }

    #[test]
    fn test_escape_attribute() {
        let mut output = String::new();
        escape_attribute("Hello <world> & \"friends\"", &mut output);
        assert_eq!(output, "Hello &lt;world&gt; &amp; &quot;friends&quot;");
    }

    #[test]
    fn test_void_and_attributes() {
        let mut tree = DomTree::new();
        let span = tree.create_element("span");
        let br = tree.create_element("br");
        tree.append_child(tree.root(), span);
        tree.append_child(span, br);
        tree.set_attribute(span, "class", "form-error");
        tree.set_attribute(span, "hidden", "");

        assert_eq!(outer_html(&tree, span), "<span class=\"form-error\" hidden><br /></span>");
        assert_eq!(inner_html(&tree, span), "<br />");
    }
}
