//! Control snapshots
//!
//! A [`Control`] is an owned read of one matched input at submission time.
//! Everything downstream (validation, extraction, rendering) works on
//! snapshots, so it can be exercised without a live document.

use formview_dom::{DomTree, NodeId};

/// What extraction does with a control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlKind {
    /// Contributes its raw value
    Text,
    /// Contributes only while checked
    Radio { checked: bool },
    /// Contributes `"true"`/`"false"`
    Checkbox { checked: bool },
    /// Multi-valued select; contributes the joined selected values
    MultiSelect { selected: Vec<String> },
    /// Multi-valued file input; contributes the joined file names
    File { files: Vec<String> },
    /// Button-like or trigger; never contributes
    Excluded,
}

/// Owned view of one matched input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub node: NodeId,
    pub name: Option<String>,
    /// What a script reading `.value` would see
    pub value: String,
    pub required: bool,
    /// Constraint-validation verdict for `required`
    pub value_missing: bool,
    pub kind: ControlKind,
}

impl Control {
    /// Create a detached snapshot (mostly for building inputs by hand)
    pub fn new(kind: ControlKind) -> Self {
        Self {
            node: NodeId::NONE,
            name: None,
            value: String::new(),
            required: false,
            value_missing: false,
            kind,
        }
    }

    /// Set the name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Set the raw value
    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    /// Mark as required; `value_missing` follows the given verdict
    pub fn required(mut self, value_missing: bool) -> Self {
        self.required = true;
        self.value_missing = value_missing;
        self
    }

    /// Read a matched element; `None` for nodes that are not elements
    pub fn read(tree: &DomTree, node: NodeId, exclusions: &Exclusions) -> Option<Self> {
        let control = tree.control(node)?;
        let control_type = control.control_type();

        let kind = if exclusions.excludes(control.tag(), control_type, node) {
            ControlKind::Excluded
        } else {
            match control_type {
                "radio" => ControlKind::Radio {
                    checked: control.is_checked(),
                },
                "checkbox" => ControlKind::Checkbox {
                    checked: control.is_checked(),
                },
                "file" if control.is_multiple() => ControlKind::File {
                    files: control.files().iter().map(|f| f.name.clone()).collect(),
                },
                "select-multiple" => ControlKind::MultiSelect {
                    selected: control.selected_values(),
                },
                _ => ControlKind::Text,
            }
        };

        let required = control.is_required();
        Some(Self {
            node,
            name: control.name().map(str::to_string),
            value: control.value(),
            required,
            value_missing: required && control.validity().value_missing,
            kind,
        })
    }
}

/// Which controls never contribute to the summary
#[derive(Debug, Clone, Default)]
pub struct Exclusions {
    classifiers: Vec<String>,
    nodes: Vec<NodeId>,
}

impl Exclusions {
    /// Exclude by tag name or `type` value (ASCII case-insensitive)
    pub fn new<S: AsRef<str>>(classifiers: &[S]) -> Self {
        Self {
            classifiers: classifiers
                .iter()
                .map(|c| c.as_ref().to_ascii_lowercase())
                .collect(),
            nodes: Vec::new(),
        }
    }

    /// Also exclude one specific node
    pub fn with_node(mut self, node: NodeId) -> Self {
        if node.is_valid() {
            self.nodes.push(node);
        }
        self
    }

    /// Check a control's tag, type and identity against the set
    pub fn excludes(&self, tag: &str, control_type: &str, node: NodeId) -> bool {
        self.nodes.contains(&node)
            || self
                .classifiers
                .iter()
                .any(|c| c.eq_ignore_ascii_case(tag) || c.eq_ignore_ascii_case(control_type))
    }
}
