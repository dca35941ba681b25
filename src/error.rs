//! Error taxonomy for tree operations and builder calls.

use crate::dom::NodeId;

/// Errors from tree-node operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("node {0:?} does not exist")]
    MissingNode(NodeId),
    #[error("node {0:?} is a text node and cannot hold children, attributes or listeners")]
    NotAnElement(NodeId),
    #[error("cannot insert {child:?} under {parent:?}: it is the parent or one of its ancestors")]
    HierarchyRequest { parent: NodeId, child: NodeId },
    #[error("node {child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },
}

/// Errors that terminate a builder call.
///
/// Partial construction up to the failing argument stays in the document but
/// is not returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// Content or options were supplied before a selector or node established
    /// the node under construction.
    #[error("{kind} argument supplied before any node was established")]
    NoNode { kind: &'static str },
    /// An argument of an unsupported shape, under [`UnrecognizedPolicy::Reject`].
    ///
    /// [`UnrecognizedPolicy::Reject`]: crate::config::UnrecognizedPolicy::Reject
    #[error("unrecognized argument of type `{0}`")]
    Unrecognized(&'static str),
    #[error("option `{key}` expects {expected}")]
    InvalidOption { key: String, expected: &'static str },
    #[error(transparent)]
    Dom(#[from] DomError),
}
