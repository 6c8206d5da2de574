//! Form Validation
//!
//! The `valueMissing` part of the Constraint Validation API.

use super::{ControlRef, InputType};

/// Validity state for form controls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidityState {
    /// The element is required but has no usable value
    pub value_missing: bool,
}

impl ValidityState {
    /// Check if the element is valid
    pub fn is_valid(&self) -> bool {
        !self.value_missing
    }

    /// Compute validity for a control
    ///
    /// Checkboxes need checkedness, radios need a checked group member,
    /// selects need a selected option with a non-empty value, file inputs
    /// need a file. Disabled controls and buttons are never missing.
    pub fn of(control: &ControlRef<'_>) -> Self {
        if !control.is_required() || control.is_disabled() {
            return Self::default();
        }

        let value_missing = match control.tag() {
            "select" => control.selected_values().iter().all(String::is_empty),
            "textarea" => control.value().is_empty(),
            _ => match control.input_type().unwrap_or_default() {
                InputType::Checkbox => !control.is_checked(),
                InputType::Radio => !control
                    .radio_group()
                    .into_iter()
                    .filter_map(|id| control.tree.control(id))
                    .any(|c| c.is_checked()),
                InputType::File => control.files().is_empty(),
                t if t.is_button() || t == InputType::Hidden => false,
                _ => control.value().is_empty(),
            },
        };

        Self { value_missing }
    }
}
