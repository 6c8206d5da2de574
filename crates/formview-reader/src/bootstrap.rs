//! Page bootstrap
//!
//! Wraps every form on the page in a [`FormReader`] once the document has
//! loaded.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use formview_dom::{Document, DomEventType, ElementQuery, NodeId};

use crate::ReaderError;
use crate::config::Config;
use crate::reader::FormReader;

/// Attach a reader to every form matched by the bootstrap selector
///
/// Trigger and output are looked up by id inside the form first, then
/// across the document.
pub fn attach_all(doc: &mut Document, config: &Config) -> Result<Vec<Rc<FormReader>>, ReaderError> {
    let root = doc.tree().root();
    let forms = doc.query_selector_all(root, &config.bootstrap.form_selector)?;

    let mut readers = Vec::with_capacity(forms.len());
    for form in forms {
        let trigger = find_by_id(doc, form, &config.bootstrap.trigger_id);
        let output = find_by_id(doc, form, &config.bootstrap.output_id);

        let reader = Rc::new(FormReader::new(
            doc,
            form,
            &config.bootstrap.input_selector,
            trigger,
            output,
            config.reader.clone(),
        )?);
        reader.bind(doc);
        readers.push(reader);
    }

    tracing::info!(
        "Attached {} form readers ({} bound)",
        readers.len(),
        readers.iter().filter(|r| r.is_bound()).count()
    );
    Ok(readers)
}

fn find_by_id(doc: &Document, form: NodeId, id: &str) -> Option<NodeId> {
    let tree = doc.tree();
    tree.descendants(form)
        .find(|&node| tree.get_attribute(node, "id") == Some(id))
        .or_else(|| doc.get_element_by_id(id))
}

/// Readers installed on a page
#[derive(Debug, Clone, Default)]
pub struct Bootstrap {
    readers: Rc<RefCell<Vec<Rc<FormReader>>>>,
    loaded: Rc<Cell<bool>>,
}

impl Bootstrap {
    /// Register the DOMContentLoaded hook; readers are created when it fires
    pub fn install(doc: &mut Document, config: Config) -> Self {
        let bootstrap = Self::default();
        let readers = Rc::clone(&bootstrap.readers);
        let loaded = Rc::clone(&bootstrap.loaded);
        let root = doc.tree().root();

        doc.add_event_listener(root, DomEventType::DOMContentLoaded, move |doc, _event| {
            if loaded.replace(true) {
                return;
            }
            match attach_all(doc, &config) {
                Ok(attached) => readers.borrow_mut().extend(attached),
                Err(err) => tracing::warn!("Form bootstrap failed: {}", err),
            }
        });
        bootstrap
    }

    /// Readers attached so far
    pub fn readers(&self) -> Vec<Rc<FormReader>> {
        self.readers.borrow().clone()
    }

    /// Whether DOMContentLoaded has fired
    pub fn is_loaded(&self) -> bool {
        self.loaded.get()
    }
}
