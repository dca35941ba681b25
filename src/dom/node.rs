//! Node types: NodeId, NodeKind, NodeData.

use std::collections::HashMap;
use std::rc::Rc;

use slotmap::new_key_type;

use super::event::Listener;
use super::style::{self, Priority, StyleDeclaration};
use crate::value::Value;

new_key_type! {
    /// Unique identifier for a tree node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// What a node is: an element with a tag name, or a run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element { tag: String },
    Text(String),
}

/// Data associated with a single tree node.
#[derive(Clone)]
pub struct NodeData {
    pub kind: NodeKind,
    /// Attributes in insertion order. `class` and `style` are mirrored from
    /// `classes` and `style` whenever either changes.
    attributes: Vec<(String, String)>,
    /// Class list, in the order classes were added.
    pub(crate) classes: Vec<String>,
    style: Vec<StyleDeclaration>,
    /// Properties that do not reflect to an attribute.
    properties: HashMap<String, Value>,
    listeners: Vec<(String, Listener)>,
}

impl std::fmt::Debug for NodeData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeData")
            .field("kind", &self.kind)
            .field("attributes", &self.attributes)
            .field("properties", &self.properties)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl NodeData {
    fn with_kind(kind: NodeKind) -> Self {
        Self {
            kind,
            attributes: Vec::new(),
            classes: Vec::new(),
            style: Vec::new(),
            properties: HashMap::new(),
            listeners: Vec::new(),
        }
    }

    /// Create an element node with the given tag name.
    pub fn element(tag: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Element { tag: tag.into() })
    }

    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Text(text.into()))
    }

    /// Set the id attribute (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.set_attribute("id", id.into());
        self
    }

    /// Add a single class (builder).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.add_class(&class.into());
        self
    }

    /// Tag name for elements, `None` for text nodes.
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { tag } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element { .. })
    }

    /// The id attribute, if set.
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    // -- attributes ----------------------------------------------------------

    /// Attributes in insertion order.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute. `class` and `style` also replace the class list and
    /// the style declarations.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match name {
            "class" => {
                self.classes.clear();
                for class in value.split_whitespace() {
                    if !self.has_class(class) {
                        self.classes.push(class.to_owned());
                    }
                }
            }
            "style" => self.style = style::parse_declarations(&value),
            _ => {}
        }
        self.put_attribute(name, value);
    }

    pub fn remove_attribute(&mut self, name: &str) {
        match name {
            "class" => self.classes.clear(),
            "style" => self.style.clear(),
            _ => {}
        }
        self.attributes.retain(|(n, _)| n != name);
    }

    /// Write an attribute entry without touching the mirrored state.
    fn put_attribute(&mut self, name: &str, value: String) {
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.attributes.push((name.to_owned(), value)),
        }
    }

    // -- classes -------------------------------------------------------------

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class. No-op if already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_owned());
            self.sync_classes();
        }
    }

    /// Remove a class. No-op if not present.
    pub fn remove_class(&mut self, class: &str) {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        if self.classes.len() != before {
            self.sync_classes();
        }
    }

    fn sync_classes(&mut self) {
        let joined = self.classes.join(" ");
        self.put_attribute("class", joined);
    }

    // -- style ---------------------------------------------------------------

    pub fn style_declarations(&self) -> &[StyleDeclaration] {
        &self.style
    }

    /// Value of one style property, if set.
    pub fn style_property(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|d| d.property == property)
            .map(|d| d.value.as_str())
    }

    pub fn style_priority(&self, property: &str) -> Option<Priority> {
        self.style
            .iter()
            .find(|d| d.property == property)
            .map(|d| d.priority)
    }

    /// Set one style property. An empty value removes the property.
    pub fn set_style_property(&mut self, property: &str, value: &str, priority: Priority) {
        if value.is_empty() {
            self.style.retain(|d| d.property != property);
        } else {
            match self.style.iter_mut().find(|d| d.property == property) {
                Some(decl) => {
                    decl.value = value.to_owned();
                    decl.priority = priority;
                }
                None => self
                    .style
                    .push(StyleDeclaration::new(property, value, priority)),
            }
        }
        self.sync_style();
    }

    /// Replace all style declarations with those parsed from `text`.
    pub fn set_style_text(&mut self, text: &str) {
        self.style = style::parse_declarations(text);
        self.sync_style();
    }

    pub fn style_text(&self) -> String {
        style::serialize(&self.style)
    }

    fn sync_style(&mut self) {
        if self.style.is_empty() && self.attribute("style").is_none() {
            return;
        }
        let text = self.style_text();
        self.put_attribute("style", text);
    }

    // -- properties ----------------------------------------------------------

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn set_unreflected_property(&mut self, key: &str, value: Value) {
        self.properties.insert(key.to_owned(), value);
    }

    // -- listeners -----------------------------------------------------------

    /// Register a listener. Registering the same listener twice for one event
    /// name is a no-op.
    pub fn add_listener(&mut self, event: &str, listener: Listener) {
        let present = self
            .listeners
            .iter()
            .any(|(name, l)| name == event && same_listener(l, &listener));
        if !present {
            self.listeners.push((event.to_owned(), listener));
        }
    }

    pub fn remove_listener(&mut self, event: &str, listener: &Listener) {
        self.listeners
            .retain(|(name, l)| !(name == event && same_listener(l, listener)));
    }

    /// Listeners registered for `event`, in registration order.
    pub fn listeners(&self, event: &str) -> Vec<Listener> {
        self.listeners
            .iter()
            .filter(|(name, _)| name == event)
            .map(|(_, l)| Rc::clone(l))
            .collect()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

fn same_listener(a: &Listener, b: &Listener) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::event::Event;

    #[test]
    fn element_defaults() {
        let data = NodeData::element("div");
        assert_eq!(data.tag(), Some("div"));
        assert!(data.is_element());
        assert!(data.id().is_none());
        assert!(data.classes().is_empty());
        assert!(data.attributes().is_empty());
    }

    #[test]
    fn text_node_has_no_tag() {
        let data = NodeData::text("hello");
        assert_eq!(data.tag(), None);
        assert_eq!(data.kind, NodeKind::Text("hello".into()));
    }

    #[test]
    fn builder_with_id_and_class() {
        let data = NodeData::element("p").with_id("intro").with_class("a").with_class("a");
        assert_eq!(data.id(), Some("intro"));
        assert_eq!(data.classes(), ["a"]);
        assert_eq!(data.attribute("class"), Some("a"));
    }

    #[test]
    fn class_attribute_mirrors_list() {
        let mut data = NodeData::element("p");
        data.add_class("one");
        data.add_class("two");
        assert_eq!(data.attribute("class"), Some("one two"));
        data.remove_class("one");
        assert_eq!(data.attribute("class"), Some("two"));
        data.remove_class("two");
        assert_eq!(data.attribute("class"), Some(""));
    }

    #[test]
    fn setting_class_attribute_replaces_list() {
        let mut data = NodeData::element("p").with_class("old");
        data.set_attribute("class", "x  y x");
        assert_eq!(data.classes(), ["x", "y"]);
    }

    #[test]
    fn attributes_keep_insertion_order() {
        let mut data = NodeData::element("input");
        data.set_attribute("name", "yes");
        data.set_attribute("type", "checkbox");
        data.set_attribute("name", "no");
        assert_eq!(
            data.attributes(),
            [
                ("name".to_owned(), "no".to_owned()),
                ("type".to_owned(), "checkbox".to_owned())
            ]
        );
    }

    #[test]
    fn style_property_replace_and_remove() {
        let mut data = NodeData::element("div");
        data.set_style_property("color", "red", Priority::Normal);
        data.set_style_property("margin", "0", Priority::Important);
        data.set_style_property("color", "blue", Priority::Normal);
        assert_eq!(data.attribute("style"), Some("color: blue; margin: 0 !important;"));
        data.set_style_property("color", "", Priority::Normal);
        assert_eq!(data.style_property("color"), None);
        assert_eq!(data.style_priority("margin"), Some(Priority::Important));
    }

    #[test]
    fn style_attribute_parses() {
        let mut data = NodeData::element("div");
        data.set_attribute("style", "color: red");
        assert_eq!(data.style_property("color"), Some("red"));
    }

    #[test]
    fn listeners_dedupe_by_identity() {
        let mut data = NodeData::element("button");
        let l: Listener = Rc::new(|_: &Event| {});
        data.add_listener("click", Rc::clone(&l));
        data.add_listener("click", Rc::clone(&l));
        assert_eq!(data.listener_count(), 1);
        data.remove_listener("click", &l);
        assert_eq!(data.listener_count(), 0);
    }

    #[test]
    fn node_id_is_copy() {
        fn assert_copy<T: Copy>() {}
        assert_copy::<NodeId>();
    }
}
