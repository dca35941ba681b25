//! The tree-node capability surface the builder is written against.
//!
//! Builders never touch [`Dom`] directly; they go through [`Document`], so any
//! backend that can create nodes, attach children and set attributes, styles,
//! properties and listeners can be driven by the same construction code.

use super::event::Listener;
use super::node::{NodeData, NodeId};
use super::style::Priority;
use super::tree::Dom;
use crate::error::DomError;
use crate::value::Value;

/// Node factory and mutation capabilities consumed by the builder.
pub trait Document {
    fn create_element(&mut self, tag: &str) -> NodeId;
    fn create_text_node(&mut self, text: &str) -> NodeId;
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError>;
    /// Put `new` where `old` currently sits under `parent`.
    fn replace_child(&mut self, parent: NodeId, new: NodeId, old: NodeId) -> Result<(), DomError>;
    fn parent(&self, node: NodeId) -> Option<NodeId>;
    fn set_text_content(&mut self, node: NodeId, text: &str) -> Result<(), DomError>;

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), DomError>;
    fn get_attribute(&self, node: NodeId, name: &str) -> Option<String>;
    fn remove_attribute(&mut self, node: NodeId, name: &str) -> Result<(), DomError>;
    fn add_class(&mut self, node: NodeId, class: &str) -> Result<(), DomError>;
    fn remove_class(&mut self, node: NodeId, class: &str) -> Result<(), DomError>;

    fn set_style_property(
        &mut self,
        node: NodeId,
        name: &str,
        value: &str,
        priority: Priority,
    ) -> Result<(), DomError>;
    fn set_style_text(&mut self, node: NodeId, text: &str) -> Result<(), DomError>;

    /// Assign a property by name, reflecting to attributes where the tree
    /// model defines a reflection.
    fn set_property(&mut self, node: NodeId, key: &str, value: Value) -> Result<(), DomError>;
    fn get_property(&self, node: NodeId, key: &str) -> Option<Value>;

    fn add_event_listener(
        &mut self,
        node: NodeId,
        event: &str,
        listener: Listener,
    ) -> Result<(), DomError>;
    fn remove_event_listener(
        &mut self,
        node: NodeId,
        event: &str,
        listener: &Listener,
    ) -> Result<(), DomError>;
}

/// Properties that read and write the same-named attribute as text.
const REFLECTED: &[&str] = &[
    "id",
    "name",
    "type",
    "href",
    "src",
    "title",
    "alt",
    "placeholder",
    "rel",
    "target",
    "lang",
    "dir",
    "action",
    "method",
    "role",
];

/// Boolean properties and the attribute whose presence they control.
const BOOLEAN_REFLECTED: &[(&str, &str)] = &[
    ("hidden", "hidden"),
    ("disabled", "disabled"),
    ("required", "required"),
    ("readOnly", "readonly"),
    ("multiple", "multiple"),
    ("autofocus", "autofocus"),
    ("selected", "selected"),
];

/// How a property name maps onto node state.
enum Reflection {
    Attribute(&'static str),
    Presence(&'static str),
    Text,
    Style,
    None,
}

fn reflection(key: &str) -> Reflection {
    match key {
        "className" => Reflection::Attribute("class"),
        "htmlFor" => Reflection::Attribute("for"),
        "textContent" | "innerText" => Reflection::Text,
        "style" => Reflection::Style,
        _ => {
            if let Some(name) = REFLECTED.iter().find(|n| **n == key) {
                Reflection::Attribute(*name)
            } else if let Some((_, attr)) = BOOLEAN_REFLECTED.iter().find(|(p, _)| *p == key) {
                Reflection::Presence(*attr)
            } else {
                Reflection::None
            }
        }
    }
}

impl Document for Dom {
    fn create_element(&mut self, tag: &str) -> NodeId {
        self.create(NodeData::element(tag))
    }

    fn create_text_node(&mut self, text: &str) -> NodeId {
        self.create(NodeData::text(text))
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.append(parent, child)
    }

    fn replace_child(&mut self, parent: NodeId, new: NodeId, old: NodeId) -> Result<(), DomError> {
        self.replace(parent, new, old)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        Dom::parent(self, node)
    }

    fn set_text_content(&mut self, node: NodeId, text: &str) -> Result<(), DomError> {
        self.set_text(node, text)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.element_mut(node)?.set_attribute(name, value);
        Ok(())
    }

    fn get_attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.get(node)?.attribute(name).map(str::to_owned)
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) -> Result<(), DomError> {
        self.element_mut(node)?.remove_attribute(name);
        Ok(())
    }

    fn add_class(&mut self, node: NodeId, class: &str) -> Result<(), DomError> {
        self.element_mut(node)?.add_class(class);
        Ok(())
    }

    fn remove_class(&mut self, node: NodeId, class: &str) -> Result<(), DomError> {
        self.element_mut(node)?.remove_class(class);
        Ok(())
    }

    fn set_style_property(
        &mut self,
        node: NodeId,
        name: &str,
        value: &str,
        priority: Priority,
    ) -> Result<(), DomError> {
        self.element_mut(node)?.set_style_property(name, value, priority);
        Ok(())
    }

    fn set_style_text(&mut self, node: NodeId, text: &str) -> Result<(), DomError> {
        self.element_mut(node)?.set_style_text(text);
        Ok(())
    }

    fn set_property(&mut self, node: NodeId, key: &str, value: Value) -> Result<(), DomError> {
        match reflection(key) {
            Reflection::Text => self.set_text(node, &value.to_text()),
            Reflection::Style => self.set_style_text(node, &value.to_text()),
            Reflection::Attribute(attr) => {
                let data = self.element_mut(node)?;
                if value.is_null() {
                    data.remove_attribute(attr);
                } else {
                    data.set_attribute(attr, value.to_text());
                }
                Ok(())
            }
            Reflection::Presence(attr) => {
                let data = self.element_mut(node)?;
                if value.is_truthy() {
                    data.set_attribute(attr, "");
                } else {
                    data.remove_attribute(attr);
                }
                Ok(())
            }
            Reflection::None => {
                self.element_mut(node)?.set_unreflected_property(key, value);
                Ok(())
            }
        }
    }

    fn get_property(&self, node: NodeId, key: &str) -> Option<Value> {
        let data = self.element(node).ok()?;
        match reflection(key) {
            Reflection::Text => Some(Value::Text(self.text_content(node))),
            Reflection::Style => Some(Value::Text(data.style_text())),
            Reflection::Attribute(attr) => data.attribute(attr).map(Value::from),
            Reflection::Presence(attr) => Some(Value::Bool(data.attribute(attr).is_some())),
            Reflection::None => data.property(key).cloned(),
        }
    }

    fn add_event_listener(
        &mut self,
        node: NodeId,
        event: &str,
        listener: Listener,
    ) -> Result<(), DomError> {
        self.element_mut(node)?.add_listener(event, listener);
        Ok(())
    }

    fn remove_event_listener(
        &mut self,
        node: NodeId,
        event: &str,
        listener: &Listener,
    ) -> Result<(), DomError> {
        self.element_mut(node)?.remove_listener(event, listener);
        Ok(())
    }
}
