//! DOM Events
//!
//! Event objects, listener registry and dispatch.

use std::collections::HashMap;
use std::rc::Rc;

use crate::{Document, NodeId};

/// DOM event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomEventType {
    Click,
    Input,
    Change,
    DOMContentLoaded,
}

impl DomEventType {
    /// Event name as used by `addEventListener`
    pub fn name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Input => "input",
            Self::Change => "change",
            Self::DOMContentLoaded => "DOMContentLoaded",
        }
    }
}

/// DOM event
#[derive(Debug, Clone)]
pub struct DomEvent {
    pub event_type: DomEventType,
    pub target: NodeId,
    pub current_target: Option<NodeId>,
    pub bubbles: bool,
    pub cancelable: bool,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl DomEvent {
    fn new(event_type: DomEventType, target: NodeId, bubbles: bool, cancelable: bool) -> Self {
        Self {
            event_type,
            target,
            current_target: None,
            bubbles,
            cancelable,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Create a click event
    pub fn click(target: NodeId) -> Self {
        Self::new(DomEventType::Click, target, true, true)
    }

    /// Create an input event
    pub fn input(target: NodeId) -> Self {
        Self::new(DomEventType::Input, target, true, false)
    }

    /// Create a change event
    pub fn change(target: NodeId) -> Self {
        Self::new(DomEventType::Change, target, true, false)
    }

    /// Create DOMContentLoaded event
    pub fn content_loaded(target: NodeId) -> Self {
        Self::new(DomEventType::DOMContentLoaded, target, true, false)
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Stop propagation
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Check if propagation was stopped
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Event listener callback
///
/// Listeners get the whole document mutably; dispatch is synchronous and
/// single-threaded, so a listener never runs concurrently with another.
pub type Listener = Rc<dyn Fn(&mut Document, &mut DomEvent)>;

/// Listener registry keyed by (node, event type)
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    listeners: HashMap<(NodeId, DomEventType), Vec<Listener>>,
}

impl ListenerRegistry {
    pub(crate) fn add(&mut self, node: NodeId, event_type: DomEventType, listener: Listener) {
        self.listeners
            .entry((node, event_type))
            .or_default()
            .push(listener);
    }

    /// Snapshot of listeners so callbacks can mutate the document
    pub(crate) fn get(&self, node: NodeId, event_type: DomEventType) -> Vec<Listener> {
        self.listeners
            .get(&(node, event_type))
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn count(&self, node: NodeId, event_type: DomEventType) -> usize {
        self.listeners
            .get(&(node, event_type))
            .map_or(0, Vec::len)
    }

    pub(crate) fn clear(&mut self, node: NodeId, event_type: DomEventType) {
        self.listeners.remove(&(node, event_type));
    }
}

/// Event dispatcher trait
pub trait EventDispatcher {
    /// Dispatch an event; returns false if the default action was prevented
    fn dispatch_event(&mut self, event: DomEvent) -> bool;
}
