//! Field extraction
//!
//! Turns control snapshots into the records that reach the summary, then
//! names them into [`FieldEntries`].

use formview_dom::NodeId;

use crate::config::ReaderConfig;
use crate::control::{Control, ControlKind};
use crate::entries::FieldEntries;

/// One record accepted for the summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInput {
    /// Source control
    pub node: NodeId,
    pub name: Option<String>,
    pub value: String,
    /// Joined values of a multi-valued control; takes precedence over `value`
    pub data: Option<String>,
    /// Checkedness a checkbox gets normalized to
    pub checkbox: Option<bool>,
}

impl FieldInput {
    fn plain(control: &Control) -> Self {
        Self {
            node: control.node,
            name: control.name.clone(),
            value: control.value.clone(),
            data: None,
            checkbox: None,
        }
    }

    /// Synthetic record standing in for a multi-valued control
    ///
    /// Carries no raw value; empty data falls through to the placeholder.
    fn multiple(control: &Control, values: &[String]) -> Self {
        Self {
            node: control.node,
            name: control.name.clone(),
            value: String::new(),
            data: Some(values.join(",")),
            checkbox: None,
        }
    }
}

/// Select the records that contribute to the summary, in traversal order
pub fn field_inputs(controls: &[Control]) -> Vec<FieldInput> {
    controls
        .iter()
        .filter_map(|control| match &control.kind {
            ControlKind::Excluded => None,
            ControlKind::Radio { checked: false } => None,
            ControlKind::Radio { checked: true } | ControlKind::Text => {
                Some(FieldInput::plain(control))
            }
            ControlKind::Checkbox { checked } => Some(FieldInput {
                value: checked.to_string(),
                checkbox: Some(*checked),
                ..FieldInput::plain(control)
            }),
            ControlKind::MultiSelect { selected } => Some(FieldInput::multiple(control, selected)),
            ControlKind::File { files } => Some(FieldInput::multiple(control, files)),
        })
        .collect()
}

/// Name the records and collect them; later names overwrite earlier values
pub fn field_entries(inputs: &[FieldInput], config: &ReaderConfig) -> FieldEntries {
    let mut entries = FieldEntries::new();
    let mut unnamed = 0usize;

    for input in inputs {
        let name = match &input.name {
            Some(name) => name.clone(),
            None => {
                let name = format!("{}{}", config.unnamed_prefix, unnamed);
                unnamed += 1;
                name
            }
        };

        let value = [input.data.as_deref(), Some(input.value.as_str())]
            .into_iter()
            .flatten()
            .find(|v| !v.is_empty())
            .unwrap_or(config.empty_placeholder.as_str());

        if let Some(previous) = entries.insert(name.as_str(), value) {
            tracing::trace!("Field {:?} overwrote {:?}", name, previous);
        }
    }

    entries
}
