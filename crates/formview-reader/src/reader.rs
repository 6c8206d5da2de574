//! Form Reader
//!
//! Validates, extracts and renders one form into its output container.

use std::rc::Rc;

use formview_dom::{Document, DomEventType, DomTree, ElementQuery, NodeId};

use crate::ReaderError;
use crate::config::ReaderConfig;
use crate::control::{Control, Exclusions};
use crate::entries::FieldEntries;
use crate::{extract, render, validate};

/// Result of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// All required fields were filled
    Rendered {
        html: String,
        entries: FieldEntries,
        /// Checkboxes whose value is rewritten to `"true"`/`"false"`
        checkboxes: Vec<(NodeId, bool)>,
    },
    /// At least one required field was empty; nothing was extracted
    MissingRequired { html: String, missing: Vec<NodeId> },
}

impl Outcome {
    /// HTML that replaces the output container's content
    pub fn html(&self) -> &str {
        match self {
            Self::Rendered { html, .. } | Self::MissingRequired { html, .. } => html,
        }
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }
}

/// Compute the output for a set of control snapshots
///
/// No document access: the caller applies checkbox normalization and
/// writes the HTML.
pub fn compute_output(controls: &[Control], config: &ReaderConfig) -> Outcome {
    let missing = validate::missing_required(controls, config.required_policy);
    if !missing.is_empty() {
        return Outcome::MissingRequired {
            html: config.required_message.clone(),
            missing,
        };
    }

    let inputs = extract::field_inputs(controls);
    let checkboxes = inputs
        .iter()
        .filter_map(|input| input.checkbox.map(|checked| (input.node, checked)))
        .collect();
    let entries = extract::field_entries(&inputs, config);
    let html = render::format_entries(&entries, config.escape_values);

    Outcome::Rendered {
        html,
        entries,
        checkboxes,
    }
}

/// Reader bound to one form
#[derive(Debug)]
pub struct FormReader {
    form: NodeId,
    inputs: Vec<NodeId>,
    trigger: Option<NodeId>,
    output: Option<NodeId>,
    exclusions: Exclusions,
    config: ReaderConfig,
}

impl FormReader {
    /// Create a reader; the input list is resolved once, here
    pub fn new(
        doc: &Document,
        form: NodeId,
        input_selector: &str,
        trigger: Option<NodeId>,
        output: Option<NodeId>,
        config: ReaderConfig,
    ) -> Result<Self, ReaderError> {
        let tree = doc.tree();
        check_element(tree, form)?;
        for node in trigger.iter().chain(output.iter()) {
            check_element(tree, *node)?;
        }

        let inputs = doc.query_selector_all(form, input_selector)?;
        let mut exclusions = Exclusions::new(config.excluded.as_slice());
        if let Some(trigger) = trigger {
            exclusions = exclusions.with_node(trigger);
        }

        tracing::debug!(
            "Form reader for {}: {} inputs, trigger {:?}, output {:?}",
            form,
            inputs.len(),
            trigger,
            output
        );

        Ok(Self {
            form,
            inputs,
            trigger,
            output,
            exclusions,
            config,
        })
    }

    pub fn form(&self) -> NodeId {
        self.form
    }

    /// Inputs captured at construction, in document order
    pub fn inputs(&self) -> &[NodeId] {
        &self.inputs
    }

    pub fn trigger(&self) -> Option<NodeId> {
        self.trigger
    }

    pub fn output(&self) -> Option<NodeId> {
        self.output
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// A click handler is installed only with both a trigger and an output
    pub fn is_bound(&self) -> bool {
        self.trigger.is_some() && self.output.is_some()
    }

    /// Read the live state of every captured input
    pub fn snapshot(&self, tree: &DomTree) -> Vec<Control> {
        self.inputs
            .iter()
            .filter_map(|&node| Control::read(tree, node, &self.exclusions))
            .collect()
    }

    /// Compute the outcome without touching the document
    pub fn compute(&self, tree: &DomTree) -> Outcome {
        compute_output(&self.snapshot(tree), &self.config)
    }

    /// Run the submit flow and replace the output container's content
    pub fn submit(&self, doc: &mut Document) -> Result<Outcome, ReaderError> {
        let output = self.output.ok_or(ReaderError::NoOutput)?;
        let root = doc.tree().root();
        if !doc.tree().contains(root, output) {
            return Err(ReaderError::OutputDetached(output));
        }

        let outcome = self.compute(doc.tree());
        match &outcome {
            Outcome::Rendered {
                entries,
                checkboxes,
                ..
            } => {
                for &(node, checked) in checkboxes {
                    doc.tree_mut()
                        .set_value(node, if checked { "true" } else { "false" });
                }
                tracing::debug!("Form {} rendered {} fields", self.form, entries.len());
            }
            Outcome::MissingRequired { missing, .. } => {
                tracing::debug!(
                    "Form {} has {} empty required fields",
                    self.form,
                    missing.len()
                );
            }
        }

        formview_html::set_inner_html(doc.tree_mut(), output, outcome.html())?;
        Ok(outcome)
    }

    /// Install the click handler on the trigger
    ///
    /// Returns false, and leaves the document untouched, for an inert reader.
    pub fn bind(self: &Rc<Self>, doc: &mut Document) -> bool {
        let Some(trigger) = self.trigger.filter(|_| self.is_bound()) else {
            tracing::debug!("Form {} is inert: missing trigger or output", self.form);
            return false;
        };

        let reader = Rc::clone(self);
        doc.add_event_listener(trigger, DomEventType::Click, move |doc, _event| {
            if let Err(err) = reader.submit(doc) {
                tracing::warn!("Form {} submit failed: {}", reader.form, err);
            }
        });
        true
    }
}

fn check_element(tree: &DomTree, node: NodeId) -> Result<(), ReaderError> {
    if tree.get(node).is_none() {
        return Err(ReaderError::NodeNotFound(node));
    }
    if tree.element(node).is_none() {
        return Err(ReaderError::NotAnElement(node));
    }
    Ok(())
}
