//! formview Form Reader
//!
//! Reads a form's controls when its trigger is clicked, checks required
//! fields, and renders the collected name/value pairs as HTML into an
//! output container.
//!
//! The pure part is [`compute_output`]: control snapshots in, [`Outcome`]
//! out. [`FormReader`] binds it to a live [`Document`], and [`Bootstrap`]
//! wires one reader per form on page load.

mod bootstrap;
mod config;
mod control;
mod entries;
mod extract;
mod reader;
mod render;
mod validate;

pub use bootstrap::{Bootstrap, attach_all};
pub use config::{BootstrapConfig, Config, ConfigError, ReaderConfig, RequiredPolicy};
pub use control::{Control, ControlKind, Exclusions};
pub use entries::{FieldEntries, FieldEntry};
pub use extract::{FieldInput, field_entries, field_inputs};
pub use formview_dom::{Document, NodeId};
pub use reader::{FormReader, Outcome, compute_output};
pub use render::format_entries;
pub use validate::missing_required;

use formview_dom::SelectorError;
use formview_html::ParseError;

/// Form reader error
#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    #[error("invalid selector: {0}")]
    InvalidSelector(#[from] SelectorError),

    #[error("node {0} is not in the document")]
    NodeNotFound(NodeId),

    #[error("node {0} is not an element")]
    NotAnElement(NodeId),

    #[error("reader has no output container")]
    NoOutput,

    #[error("output container {0} is detached from the document")]
    OutputDetached(NodeId),

    #[error("failed to write output: {0}")]
    Html(#[from] ParseError),
}
