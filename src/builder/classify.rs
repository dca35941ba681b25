//! Argument classification: decides, per argument, what it means for the
//! node under construction.
//!
//! Arguments are consumed strictly left to right. Lists expand in place,
//! fully, before the next positional argument. The first text argument seen
//! while no node exists is a selector; every later one is a text child.

use std::cell::RefCell;
use std::rc::Rc;

use super::arg::Arg;
use super::registry::Registry;
use super::selector::Selector;
use crate::config::{BuilderConfig, UnrecognizedPolicy};
use crate::dom::{Document, NodeId};
use crate::error::BuildError;

/// How one argument was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handling {
    /// Empty argument; no effect.
    Skipped,
    /// Parsed as a selector (the node may still be unset if it was empty).
    Selector,
    /// Appended as a text child.
    Text,
    /// Primitive converted to text and appended.
    Scalar,
    /// List of this many elements, expanded in place. Its elements' handlings
    /// follow immediately.
    List(usize),
    /// Existing node adopted as the node under construction.
    Adopted,
    /// Existing node appended as a child.
    Child,
    /// Options bag applied.
    Options,
    /// Reactive content appended and subscribed.
    Reactive,
    /// Unrecognized shape dropped.
    Ignored,
}

/// State of one builder invocation.
pub(crate) struct Assembly<'a, D: Document + 'static> {
    pub(super) doc: &'a Rc<RefCell<D>>,
    config: &'a BuilderConfig,
    pub(super) registry: &'a Registry,
    node: Option<NodeId>,
    trail: Vec<Handling>,
}

impl<'a, D: Document + 'static> Assembly<'a, D> {
    pub(crate) fn new(
        doc: &'a Rc<RefCell<D>>,
        config: &'a BuilderConfig,
        registry: &'a Registry,
    ) -> Self {
        Self {
            doc,
            config,
            registry,
            node: None,
            trail: Vec::new(),
        }
    }

    /// The node under construction, once established.
    #[cfg(test)]
    pub(crate) fn node(&self) -> Option<NodeId> {
        self.node
    }

    /// Finish and return the node plus every handling in consumption order.
    pub(crate) fn finish(self) -> (Option<NodeId>, Vec<Handling>) {
        (self.node, self.trail)
    }

    /// Consume one argument.
    pub(crate) fn classify(&mut self, arg: Arg) -> Result<Handling, BuildError> {
        if let Arg::List(items) = arg {
            let handling = Handling::List(items.len());
            self.trail.push(handling);
            for item in items {
                self.classify(item)?;
            }
            return Ok(handling);
        }
        let kind = arg.kind();
        let handling = self.classify_single(arg)?;
        tracing::trace!(kind, ?handling, "classified argument");
        self.trail.push(handling);
        Ok(handling)
    }

    fn classify_single(&mut self, arg: Arg) -> Result<Handling, BuildError> {
        match arg {
            Arg::Empty => Ok(Handling::Skipped),
            Arg::Text(text) => match self.node {
                None => {
                    let selector = Selector::parse(&text);
                    self.node = selector.create(&mut *self.doc.borrow_mut(), &self.config.default_tag)?;
                    Ok(Handling::Selector)
                }
                Some(node) => {
                    self.append_text(node, &text)?;
                    Ok(Handling::Text)
                }
            },
            Arg::Scalar(scalar) => {
                let node = self.require("scalar")?;
                self.append_text(node, &scalar.to_text())?;
                Ok(Handling::Scalar)
            }
            Arg::Node(child) => match self.node {
                None => {
                    self.node = Some(child);
                    Ok(Handling::Adopted)
                }
                Some(node) => {
                    self.doc.borrow_mut().append_child(node, child)?;
                    Ok(Handling::Child)
                }
            },
            Arg::Options(options) => {
                let node = self.require("options")?;
                self.bind_options(node, options)?;
                Ok(Handling::Options)
            }
            Arg::Reactive(reactive) => {
                let node = self.require("reactive")?;
                self.bind_content(node, reactive)?;
                Ok(Handling::Reactive)
            }
            Arg::Unrecognized(type_name) => match self.config.unrecognized {
                UnrecognizedPolicy::Ignore => {
                    tracing::debug!(type_name, "ignoring unrecognized argument");
                    Ok(Handling::Ignored)
                }
                UnrecognizedPolicy::Reject => Err(BuildError::Unrecognized(type_name)),
            },
            Arg::List(_) => unreachable!("lists are expanded by classify"),
        }
    }

    fn require(&self, kind: &'static str) -> Result<NodeId, BuildError> {
        self.node.ok_or(BuildError::NoNode { kind })
    }

    fn append_text(&self, node: NodeId, text: &str) -> Result<(), BuildError> {
        let mut doc = self.doc.borrow_mut();
        let child = doc.create_text_node(text);
        doc.append_child(node, child)?;
        Ok(())
    }
}
