//! Event listeners and bubble-phase dispatch.
//!
//! [`dispatch_event`] computes the bubble path from the target up to its
//! topmost ancestor and runs each node's listeners for the event name. The
//! document borrow is released before any listener runs, so listeners may
//! freely mutate the tree or write reactive values.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use super::node::NodeId;
use super::tree::Dom;

/// A registered event handler. Identity (pointer equality) is what
/// `remove_event_listener` matches on.
pub type Listener = Rc<dyn Fn(&Event)>;

/// An event travelling through the tree.
pub struct Event {
    name: String,
    target: NodeId,
    current_target: Cell<NodeId>,
    propagation_stopped: Cell<bool>,
    default_prevented: Cell<bool>,
}

impl Event {
    pub fn new(name: impl Into<String>, target: NodeId) -> Self {
        Self {
            name: name.into(),
            target,
            current_target: Cell::new(target),
            propagation_stopped: Cell::new(false),
            default_prevented: Cell::new(false),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The node the event was dispatched on.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// The node whose listeners are currently running.
    pub fn current_target(&self) -> NodeId {
        self.current_target.get()
    }

    /// Stop the event from reaching further ancestors. Remaining listeners on
    /// the current node still run.
    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("target", &self.target)
            .field("current_target", &self.current_target.get())
            .finish()
    }
}

/// Compute the bubble path from `start` up to the topmost ancestor (inclusive).
///
/// Returns `[start, parent, grandparent, ...]`, or an empty vec if `start`
/// does not exist.
pub fn bubble_path(dom: &Dom, start: NodeId) -> Vec<NodeId> {
    if !dom.contains(start) {
        return Vec::new();
    }
    let mut path = vec![start];
    path.extend(dom.ancestors(start));
    path
}

/// Dispatch an event named `name` at `target` and return it once every
/// listener on the bubble path has run.
pub fn dispatch_event(doc: &RefCell<Dom>, target: NodeId, name: &str) -> Event {
    let event = Event::new(name, target);
    let path = bubble_path(&doc.borrow(), target);
    tracing::trace!(event = name, hops = path.len(), "dispatching event");
    for node in path {
        let listeners = match doc.borrow().get(node) {
            Some(data) => data.listeners(name),
            None => continue,
        };
        event.current_target.set(node);
        for listener in listeners {
            listener(&event);
        }
        if event.propagation_stopped() {
            break;
        }
    }
    event
}
