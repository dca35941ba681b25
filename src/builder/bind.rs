//! Applying options bags and reactive bindings to the node under construction.
//!
//! Every listener and subscription created here is recorded in the assembly's
//! [`Registry`](super::registry::Registry) so a scoped builder can release it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::classify::Assembly;
use super::options::{OptionValue, Options, StyleProp, StyleValue};
use crate::dom::style::{split_important, Priority};
use crate::dom::{Document, NodeId};
use crate::error::{BuildError, DomError};
use crate::reactive::{Reactive, Unsubscribe};
use crate::value::Value;

/// Event name for an `on<event>` key, or `None` if the key lacks that shape.
pub(crate) fn event_name(key: &str) -> Option<&str> {
    key.strip_prefix("on").filter(|rest| !rest.is_empty())
}

impl<D: Document + 'static> Assembly<'_, D> {
    /// Apply each key of an options bag to `node`.
    pub(super) fn bind_options(&mut self, node: NodeId, options: Options) -> Result<(), BuildError> {
        for (key, value) in options.into_entries() {
            match value {
                OptionValue::Handler(listener) => {
                    let Some(event) = event_name(&key) else {
                        return Err(BuildError::InvalidOption {
                            key,
                            expected: "an `on<event>` name for a handler",
                        });
                    };
                    let event = event.to_owned();
                    self.doc
                        .borrow_mut()
                        .add_event_listener(node, &event, Rc::clone(&listener))?;
                    let doc = Rc::clone(self.doc);
                    self.registry.register(Unsubscribe::new(move || {
                        update(&doc, "event listener removal", |doc| {
                            doc.remove_event_listener(node, &event, &listener)
                        });
                    }));
                }
                OptionValue::Reactive(reactive) => self.bind_property(node, key, reactive)?,
                OptionValue::Style(style) if key == "style" => self.apply_style(node, style)?,
                OptionValue::Style(_) => {
                    return Err(BuildError::InvalidOption {
                        key,
                        expected: "a plain value; style maps belong under `style`",
                    })
                }
                OptionValue::Attrs(attrs) if key == "attrs" => {
                    let mut doc = self.doc.borrow_mut();
                    for (name, value) in attrs {
                        doc.set_attribute(node, &name, &value.to_text())?;
                    }
                }
                OptionValue::Attrs(_) => {
                    return Err(BuildError::InvalidOption {
                        key,
                        expected: "a plain value; attribute maps belong under `attrs`",
                    })
                }
                OptionValue::Value(_) if key == "attrs" => {
                    return Err(BuildError::InvalidOption {
                        key,
                        expected: "a mapping of attribute names to values",
                    })
                }
                OptionValue::Value(value) if key.starts_with("data-") => {
                    self.doc
                        .borrow_mut()
                        .set_attribute(node, &key, &value.to_text())?;
                }
                OptionValue::Value(value) => {
                    assign(&mut *self.doc.borrow_mut(), node, &key, value)?;
                }
            }
        }
        Ok(())
    }

    /// Assign the reactive's current value to `key` and reassign on change.
    fn bind_property(
        &mut self,
        node: NodeId,
        key: String,
        reactive: Rc<dyn Reactive>,
    ) -> Result<(), BuildError> {
        assign(&mut *self.doc.borrow_mut(), node, &key, reactive.current())?;
        let doc = Rc::clone(self.doc);
        let unsubscribe = reactive.watch(Box::new(move |value: Value| {
            update(&doc, "reactive property", |doc| assign(doc, node, &key, value));
        }));
        self.registry.register(unsubscribe);
        Ok(())
    }

    fn apply_style(&mut self, node: NodeId, style: StyleValue) -> Result<(), BuildError> {
        let map = match style {
            StyleValue::Text(text) => {
                self.doc.borrow_mut().set_style_text(node, &text)?;
                return Ok(());
            }
            StyleValue::Map(map) => map,
        };
        for (property, prop) in map.into_entries() {
            match prop {
                StyleProp::Literal(text) => {
                    let (value, priority) = split_important(&text);
                    self.doc
                        .borrow_mut()
                        .set_style_property(node, &property, value, priority)?;
                }
                StyleProp::Reactive(reactive) => {
                    let initial = reactive.current().to_text();
                    self.doc
                        .borrow_mut()
                        .set_style_property(node, &property, &initial, Priority::Normal)?;
                    let doc = Rc::clone(self.doc);
                    let unsubscribe = reactive.watch(Box::new(move |value: Value| {
                        update(&doc, "reactive style", |doc| {
                            doc.set_style_property(node, &property, &value.to_text(), Priority::Normal)
                        });
                    }));
                    self.registry.register(unsubscribe);
                }
            }
        }
        Ok(())
    }

    /// Append the reactive's current value as a child of `parent` and keep it
    /// in sync: node values replace the child, anything else rewrites its text.
    pub(super) fn bind_content(
        &mut self,
        parent: NodeId,
        reactive: Rc<dyn Reactive>,
    ) -> Result<(), BuildError> {
        let initial = reactive.current();
        let child = {
            let mut doc = self.doc.borrow_mut();
            let child = match initial.as_node() {
                Some(node) => node,
                None => doc.create_text_node(&initial.to_text()),
            };
            doc.append_child(parent, child)?;
            child
        };
        let slot = Rc::new(Cell::new(child));
        let doc = Rc::clone(self.doc);
        let unsubscribe = reactive.watch(Box::new(move |value: Value| {
            update(&doc, "reactive content", |doc| swap_content(doc, &slot, &value));
        }));
        self.registry.register(unsubscribe);
        Ok(())
    }
}

/// Property assignment, with `style` meaning the whole style text.
fn assign<D: Document + ?Sized>(
    doc: &mut D,
    node: NodeId,
    key: &str,
    value: Value,
) -> Result<(), DomError> {
    if key == "style" {
        doc.set_style_text(node, &value.to_text())
    } else {
        doc.set_property(node, key, value)
    }
}

fn swap_content<D: Document + ?Sized>(
    doc: &mut D,
    slot: &Cell<NodeId>,
    value: &Value,
) -> Result<(), DomError> {
    let current = slot.get();
    match value.as_node() {
        Some(new) if new == current => Ok(()),
        Some(new) => {
            if let Some(parent) = doc.parent(current) {
                doc.replace_child(parent, new, current)?;
            }
            slot.set(new);
            Ok(())
        }
        None => doc.set_text_content(current, &value.to_text()),
    }
}

/// Run a deferred document update from a subscriber or teardown. Failures
/// cannot reach the caller that wrote the value, so they are logged.
fn update<D: Document + ?Sized>(
    doc: &RefCell<D>,
    what: &'static str,
    f: impl FnOnce(&mut D) -> Result<(), DomError>,
) {
    let Ok(mut doc) = doc.try_borrow_mut() else {
        tracing::warn!(what, "document is borrowed; update dropped");
        return;
    };
    if let Err(err) = f(&mut *doc) {
        tracing::warn!(what, %err, "deferred update failed");
    }
}
