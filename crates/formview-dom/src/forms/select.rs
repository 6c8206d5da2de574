//! Select and Option helpers
//!
//! Option selectedness follows the `selected` attribute until a script or
//! user changes it.

use crate::{DomTree, NodeId};

/// `<option>` descendants of a select, in document order
pub(super) fn options(tree: &DomTree, select: NodeId) -> Vec<NodeId> {
    tree.descendants(select)
        .filter(|&id| tree.is_element_named(id, "option"))
        .collect()
}

/// An option's value: its `value` attribute, else its collapsed text
pub(super) fn option_value(tree: &DomTree, option: NodeId) -> String {
    match tree.get_attribute(option, "value") {
        Some(value) => value.to_string(),
        None => tree
            .text_content(option)
            .split_ascii_whitespace()
            .collect::<Vec<_>>()
            .join(" "),
    }
}

fn is_selected(tree: &DomTree, option: NodeId) -> bool {
    tree.element(option)
        .and_then(|e| e.state.selected)
        .unwrap_or_else(|| tree.has_attribute(option, "selected"))
}

/// Selected options
///
/// A single select with nothing explicitly selected displays its first
/// enabled option, so that option counts as selected.
pub(super) fn selected_options(tree: &DomTree, select: NodeId, multiple: bool) -> Vec<NodeId> {
    let all = options(tree, select);
    let selected: Vec<NodeId> = all.iter().copied().filter(|&o| is_selected(tree, o)).collect();

    if multiple {
        return selected;
    }
    if let Some(&last) = selected.last() {
        return vec![last];
    }
    all.into_iter()
        .find(|&o| !tree.has_attribute(o, "disabled"))
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select_with(tree: &mut DomTree, multiple: bool, options: &[(&str, bool)]) -> NodeId {
        let select = tree.create_element("select");
        tree.append_child(tree.root(), select);
        if multiple {
            tree.set_attribute(select, "multiple", "");
        }
        for &(value, selected) in options {
            let opt = tree.create_element("option");
            tree.set_attribute(opt, "value", value);
            if selected {
                tree.set_attribute(opt, "selected", "");
            }
            tree.append_child(select, opt);
        }
        select
    }

    #[test]
    fn test_single_select_defaults_to_first_option() {
        let mut tree = DomTree::new();
        let select = select_with(&mut tree, false, &[("us", false), ("uk", false)]);
        assert_eq!(tree.control(select).unwrap().value(), "us");
    }

    #[test]
    fn test_multiple_select_reports_all_selected() {
        let mut tree = DomTree::new();
        let select = select_with(&mut tree, true, &[("A", true), ("B", true), ("C", false)]);
        assert_eq!(tree.control(select).unwrap().selected_values(), vec!["A", "B"]);
    }

    #[test]
    fn test_multiple_select_can_be_empty() {
        let mut tree = DomTree::new();
        let select = select_with(&mut tree, true, &[("A", false)]);
        assert!(tree.control(select).unwrap().selected_values().is_empty());
        assert_eq!(tree.control(select).unwrap().value(), "");
    }

    #[test]
    fn test_select_values_overrides_attributes() {
        let mut tree = DomTree::new();
        let select = select_with(&mut tree, false, &[("a", true), ("b", false)]);
        assert!(tree.set_value(select, "b"));
        assert_eq!(tree.control(select).unwrap().value(), "b");
    }

    #[test]
    fn test_option_text_used_without_value_attribute() {
        let mut tree = DomTree::new();
        let select = tree.create_element("select");
        let opt = tree.create_element("option");
        let text = tree.create_text("  United   Kingdom ");
        tree.append_child(tree.root(), select);
        tree.append_child(select, opt);
        tree.append_child(opt, text);
        assert_eq!(tree.control(select).unwrap().value(), "United Kingdom");
    }
}
