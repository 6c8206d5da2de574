//! Form Controls Module
//!
//! Typed views over form-control elements (input, select, textarea,
//! button) and their live state.

mod input;
mod select;
mod validation;

pub use input::InputType;
pub use validation::ValidityState;

use crate::{DomTree, NodeId};

/// A file picked in a file control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

impl SelectedFile {
    /// File with only a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: 0,
            mime_type: String::new(),
        }
    }
}

/// Live control state that shadows content attributes
///
/// `None` means "not dirty": reads fall back to the matching attribute.
#[derive(Debug, Clone, Default)]
pub struct ControlState {
    /// Dirty value
    pub value: Option<String>,
    /// Dirty checkedness (checkbox/radio)
    pub checked: Option<bool>,
    /// Dirty selectedness (option)
    pub selected: Option<bool>,
    /// Selected files (file inputs)
    pub files: Vec<SelectedFile>,
}

/// Read-only view of one form control
#[derive(Debug, Clone, Copy)]
pub struct ControlRef<'a> {
    tree: &'a DomTree,
    id: NodeId,
}

impl<'a> ControlRef<'a> {
    /// Node this view reads
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Lowercase tag name
    pub fn tag(&self) -> &'a str {
        self.tree.tag_name(self.id).unwrap_or("")
    }

    fn attr(&self, name: &str) -> Option<&'a str> {
        self.tree.get_attribute(self.id, name)
    }

    fn state(&self) -> Option<&'a ControlState> {
        self.tree.element(self.id).map(|e| &e.state)
    }

    fn is_form_control(&self) -> bool {
        matches!(self.tag(), "input" | "select" | "textarea" | "button")
    }

    /// Non-empty `name` attribute
    pub fn name(&self) -> Option<&'a str> {
        self.attr("name").filter(|n| !n.is_empty())
    }

    /// Parsed input type (inputs only)
    pub fn input_type(&self) -> Option<InputType> {
        (self.tag() == "input").then(|| InputType::parse(self.attr("type").unwrap_or("")))
    }

    /// The `type` IDL value: `"text"`, `"select-multiple"`, `"textarea"`, ...
    ///
    /// Empty for elements that are not form controls.
    pub fn control_type(&self) -> &'static str {
        match self.tag() {
            "input" => self.input_type().unwrap_or_default().as_str(),
            "select" if self.is_multiple() => "select-multiple",
            "select" => "select-one",
            "textarea" => "textarea",
            "button" => match self.attr("type").map(str::to_ascii_lowercase).as_deref() {
                Some("reset") => "reset",
                Some("button") => "button",
                _ => "submit",
            },
            _ => "",
        }
    }

    /// `required` (only meaningful on input/select/textarea)
    pub fn is_required(&self) -> bool {
        matches!(self.tag(), "input" | "select" | "textarea") && self.attr("required").is_some()
    }

    /// `multiple` (only meaningful on input/select)
    pub fn is_multiple(&self) -> bool {
        matches!(self.tag(), "input" | "select") && self.attr("multiple").is_some()
    }

    /// `disabled`
    pub fn is_disabled(&self) -> bool {
        self.is_form_control() && self.attr("disabled").is_some()
    }

    /// Checkedness of checkbox/radio inputs
    pub fn is_checked(&self) -> bool {
        if self.tag() != "input" {
            return false;
        }
        self.state()
            .and_then(|s| s.checked)
            .unwrap_or_else(|| self.attr("checked").is_some())
    }

    /// Selected files
    pub fn files(&self) -> &'a [SelectedFile] {
        self.state().map(|s| s.files.as_slice()).unwrap_or(&[])
    }

    /// Current value as a script would read `element.value`
    pub fn value(&self) -> String {
        if let Some(value) = self.state().and_then(|s| s.value.clone()) {
            return value;
        }
        match self.tag() {
            "input" => match self.input_type().unwrap_or_default() {
                InputType::Checkbox | InputType::Radio => {
                    self.attr("value").unwrap_or("on").to_string()
                }
                InputType::File => self
                    .files()
                    .first()
                    .map(|f| format!("C:\\fakepath\\{}", f.name))
                    .unwrap_or_default(),
                _ => self.attr("value").unwrap_or("").to_string(),
            },
            "select" => self
                .selected_options()
                .first()
                .map(|&opt| select::option_value(self.tree, opt))
                .unwrap_or_default(),
            "textarea" => self.tree.text_content(self.id),
            _ => self.attr("value").unwrap_or("").to_string(),
        }
    }

    /// Selected `<option>` descendants of a select, in document order
    pub fn selected_options(&self) -> Vec<NodeId> {
        if self.tag() != "select" {
            return Vec::new();
        }
        select::selected_options(self.tree, self.id, self.is_multiple())
    }

    /// Values of the selected options
    pub fn selected_values(&self) -> Vec<String> {
        self.selected_options()
            .into_iter()
            .map(|opt| select::option_value(self.tree, opt))
            .collect()
    }

    /// Nearest ancestor `<form>`
    pub fn form_owner(&self) -> Option<NodeId> {
        self.tree
            .ancestors(self.id)
            .find(|&a| self.tree.is_element_named(a, "form"))
    }

    /// Other radios sharing this radio's name and form owner (self included)
    pub fn radio_group(&self) -> Vec<NodeId> {
        let Some(name) = self.name() else {
            return vec![self.id];
        };
        let scope = self.form_owner().unwrap_or(self.tree.root());
        let owner = self.form_owner();
        self.tree
            .descendants(scope)
            .filter_map(|id| self.tree.control(id))
            .filter(|c| c.input_type() == Some(InputType::Radio))
            .filter(|c| c.name() == Some(name) && c.form_owner() == owner)
            .map(|c| c.id)
            .collect()
    }

    /// Constraint validation state
    pub fn validity(&self) -> ValidityState {
        ValidityState::of(self)
    }
}

impl DomTree {
    /// View an element as a form control
    pub fn control(&self, id: NodeId) -> Option<ControlRef<'_>> {
        self.element(id)?;
        Some(ControlRef { tree: self, id })
    }

    /// Set the live value (user typing or script assignment)
    ///
    /// For selects this picks the option with a matching value.
    pub fn set_value(&mut self, id: NodeId, value: &str) -> bool {
        if self.is_element_named(id, "select") {
            return self.select_values(id, &[value]);
        }
        match self.element_mut(id) {
            Some(elem) => {
                elem.state.value = Some(value.to_string());
                true
            }
            None => false,
        }
    }

    /// Set checkedness; checking a radio unchecks the rest of its group
    pub fn set_checked(&mut self, id: NodeId, checked: bool) -> bool {
        let Some(control) = self.control(id) else {
            return false;
        };
        let group = if checked && control.input_type() == Some(InputType::Radio) {
            control.radio_group()
        } else {
            Vec::new()
        };

        for other in group.into_iter().filter(|&other| other != id) {
            if let Some(elem) = self.element_mut(other) {
                elem.state.checked = Some(false);
            }
        }
        match self.element_mut(id) {
            Some(elem) => {
                elem.state.checked = Some(checked);
                true
            }
            None => false,
        }
    }

    /// Replace the selected files of a file control
    pub fn set_files(&mut self, id: NodeId, files: Vec<SelectedFile>) -> bool {
        match self.element_mut(id) {
            Some(elem) => {
                elem.state.files = files;
                true
            }
            None => false,
        }
    }

    /// Set one option's selectedness
    pub fn set_selected(&mut self, option: NodeId, selected: bool) -> bool {
        if !self.is_element_named(option, "option") {
            return false;
        }
        match self.element_mut(option) {
            Some(elem) => {
                elem.state.selected = Some(selected);
                true
            }
            None => false,
        }
    }

    /// Select exactly the options whose value is in `values`
    ///
    /// Single selects keep only the first match.
    pub fn select_values(&mut self, select: NodeId, values: &[&str]) -> bool {
        let Some(control) = self.control(select) else {
            return false;
        };
        if control.tag() != "select" {
            return false;
        }
        let multiple = control.is_multiple();
        let options = select::options(self, select);

        let mut picked = false;
        let updates: Vec<(NodeId, bool)> = options
            .into_iter()
            .map(|opt| {
                let value = select::option_value(self, opt);
                let hit = values.contains(&value.as_str()) && (multiple || !picked);
                picked |= hit;
                (opt, hit)
            })
            .collect();

        for (opt, selected) in updates {
            self.set_selected(opt, selected);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> (DomTree, NodeId) {
        let mut tree = DomTree::new();
        let form = tree.create_element("form");
        tree.append_child(tree.root(), form);
        (tree, form)
    }

    fn add(tree: &mut DomTree, form: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let id = tree.create_element(tag);
        for (k, v) in attrs {
            tree.set_attribute(id, k, v);
        }
        tree.append_child(form, id);
        id
    }

    #[test]
    fn test_control_types() {
        let (mut tree, form) = form();
        let ids = vec![
            add(&mut tree, form, "input", &[]),
            add(&mut tree, form, "input", &[("type", "CHECKBOX")]),
            add(&mut tree, form, "select", &[("multiple", "")]),
            add(&mut tree, form, "button", &[]),
            add(&mut tree, form, "div", &[]),
        ];
        let types: Vec<&str> = ids
            .iter()
            .map(|&id| tree.control(id).unwrap().control_type())
            .collect();
        assert_eq!(types, vec!["text", "checkbox", "select-multiple", "submit", ""]);
    }

    #[test]
    fn test_checkbox_value_defaults_to_on() {
        let (mut tree, form) = form();
        let checkbox = add(&mut tree, form, "input", &[("type", "checkbox")]);
        assert_eq!(tree.control(checkbox).unwrap().value(), "on");
    }

    #[test]
    fn test_dirty_value_shadows_attribute() {
        let (mut tree, form) = form();
        let input = add(&mut tree, form, "input", &[("value", "seed")]);
        tree.set_value(input, "typed");
        assert_eq!(tree.control(input).unwrap().value(), "typed");
        assert_eq!(tree.get_attribute(input, "value"), Some("seed"));
    }

    #[test]
    fn test_radio_group_is_exclusive() {
        let (mut tree, form) = form();
        let ids = vec![
            add(&mut tree, form, "input", &[("type", "radio"), ("name", "size"), ("checked", "")]),
            add(&mut tree, form, "input", &[("type", "radio"), ("name", "size")]),
            add(&mut tree, form, "input", &[("type", "radio"), ("name", "color"), ("checked", "")]),
        ];
        tree.set_checked(ids[1], true);

        let checked: Vec<bool> = ids
            .iter()
            .map(|&id| tree.control(id).unwrap().is_checked())
            .collect();
        assert_eq!(checked, vec![false, true, true]);
    }

    #[test]
    fn test_file_value_uses_fakepath() {
        let (mut tree, form) = form();
        let file = add(&mut tree, form, "input", &[("type", "file")]);
        assert_eq!(tree.control(file).unwrap().value(), "");
        tree.set_files(file, vec![SelectedFile::new("cv.pdf")]);
        assert_eq!(tree.control(file).unwrap().value(), "C:\\fakepath\\cv.pdf");
    }
}
