//! Required-field check

use formview_dom::NodeId;

use crate::config::RequiredPolicy;
use crate::control::Control;

/// Required controls that fail the check, in traversal order
///
/// Every matched control is inspected, excluded ones included.
pub fn missing_required(controls: &[Control], policy: RequiredPolicy) -> Vec<NodeId> {
    controls
        .iter()
        .filter(|control| control.required && is_missing(control, policy))
        .map(|control| control.node)
        .collect()
}

fn is_missing(control: &Control, policy: RequiredPolicy) -> bool {
    match policy {
        RequiredPolicy::RawValue => control.value.is_empty(),
        RequiredPolicy::ControlAware => control.value_missing,
    }
}
