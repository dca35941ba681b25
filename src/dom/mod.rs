//! Arena tree-node model: elements, text, attributes, styles, listeners.

pub mod document;
pub mod event;
pub mod node;
pub mod query;
pub mod serialize;
pub mod style;
pub mod tree;

pub use document::Document;
pub use event::{dispatch_event, Event, Listener};
pub use node::{NodeData, NodeId, NodeKind};
pub use style::Priority;
pub use tree::Dom;
