//! The options bag: attributes, properties, styles and handlers for a node.

use std::fmt;
use std::rc::Rc;

use crate::dom::{Event, Listener, NodeId};
use crate::reactive::{Observable, Reactive};
use crate::value::Value;

/// One style property value: literal text (may end in `!important`) or a
/// reactive binding.
#[derive(Clone)]
pub enum StyleProp {
    Literal(String),
    Reactive(Rc<dyn Reactive>),
}

impl fmt::Debug for StyleProp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleProp::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            StyleProp::Reactive(_) => f.write_str("Reactive(<accessor>)"),
        }
    }
}

impl From<&str> for StyleProp {
    fn from(s: &str) -> Self {
        StyleProp::Literal(s.to_owned())
    }
}

impl From<String> for StyleProp {
    fn from(s: String) -> Self {
        StyleProp::Literal(s)
    }
}

impl From<i32> for StyleProp {
    fn from(n: i32) -> Self {
        StyleProp::Literal(n.to_string())
    }
}

impl From<f64> for StyleProp {
    fn from(f: f64) -> Self {
        StyleProp::Literal(Value::Float(f).to_text())
    }
}

impl<T> From<Observable<T>> for StyleProp
where
    T: Clone + Into<Value> + 'static,
{
    fn from(o: Observable<T>) -> Self {
        StyleProp::Reactive(Rc::new(o))
    }
}

impl From<Rc<dyn Reactive>> for StyleProp {
    fn from(r: Rc<dyn Reactive>) -> Self {
        StyleProp::Reactive(r)
    }
}

/// An ordered map of style property names to values.
#[derive(Debug, Clone, Default)]
pub struct Style {
    entries: Vec<(String, StyleProp)>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one property (builder). Setting a name twice keeps the later value.
    pub fn set(mut self, property: impl Into<String>, value: impl Into<StyleProp>) -> Self {
        upsert(&mut self.entries, property.into(), value.into());
        self
    }

    pub fn entries(&self) -> &[(String, StyleProp)] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<(String, StyleProp)> {
        self.entries
    }
}

/// The value of the reserved `style` key.
#[derive(Debug, Clone)]
pub enum StyleValue {
    /// Assigned verbatim as style text.
    Text(String),
    Map(Style),
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::Text(s.to_owned())
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        StyleValue::Text(s)
    }
}

impl From<Style> for StyleValue {
    fn from(s: Style) -> Self {
        StyleValue::Map(s)
    }
}

/// The value stored under one options key.
#[derive(Clone)]
pub enum OptionValue {
    Value(Value),
    Handler(Listener),
    Reactive(Rc<dyn Reactive>),
    Style(StyleValue),
    /// Literal attribute name/value pairs.
    Attrs(Vec<(String, Value)>),
}

impl OptionValue {
    /// Wrap a closure as an event handler.
    pub fn handler(f: impl Fn(&Event) + 'static) -> Self {
        OptionValue::Handler(Rc::new(f))
    }
}

impl fmt::Debug for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Value(v) => f.debug_tuple("Value").field(v).finish(),
            OptionValue::Handler(_) => f.write_str("Handler(<fn>)"),
            OptionValue::Reactive(_) => f.write_str("Reactive(<accessor>)"),
            OptionValue::Style(s) => f.debug_tuple("Style").field(s).finish(),
            OptionValue::Attrs(a) => f.debug_tuple("Attrs").field(a).finish(),
        }
    }
}

macro_rules! value_option {
    ($($t:ty),*) => {
        $(
            impl From<$t> for OptionValue {
                fn from(v: $t) -> Self {
                    OptionValue::Value(Value::from(v))
                }
            }
        )*
    };
}

value_option!(&str, String, &String, bool, i32, i64, u32, usize, f64, NodeId, Value);

impl<T> From<Observable<T>> for OptionValue
where
    T: Clone + Into<Value> + 'static,
{
    fn from(o: Observable<T>) -> Self {
        OptionValue::Reactive(Rc::new(o))
    }
}

impl From<Rc<dyn Reactive>> for OptionValue {
    fn from(r: Rc<dyn Reactive>) -> Self {
        OptionValue::Reactive(r)
    }
}

impl From<Style> for OptionValue {
    fn from(s: Style) -> Self {
        OptionValue::Style(StyleValue::Map(s))
    }
}

impl From<StyleValue> for OptionValue {
    fn from(s: StyleValue) -> Self {
        OptionValue::Style(s)
    }
}

/// An ordered key/value bag applied to the node under construction.
///
/// Reserved keys: `style`, `attrs`, `on<event>` (handlers) and `data-*`
/// (literal attributes). Every other key is a property assignment.
#[derive(Debug, Clone, Default)]
pub struct Options {
    entries: Vec<(String, OptionValue)>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` (builder). A repeated key replaces the earlier value in place.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        upsert(&mut self.entries, key.into(), value.into());
        self
    }

    /// Bind a handler under a raw key such as `"onclick"` (builder).
    pub fn handler(self, key: impl Into<String>, f: impl Fn(&Event) + 'static) -> Self {
        self.set(key, OptionValue::handler(f))
    }

    /// Bind a handler for `event` under the key `on<event>` (builder).
    pub fn on(self, event: &str, f: impl Fn(&Event) + 'static) -> Self {
        self.handler(format!("on{event}"), f)
    }

    /// Set the `style` key from text or a [`Style`] map (builder).
    pub fn style(self, style: impl Into<StyleValue>) -> Self {
        self.set("style", style.into())
    }

    /// Set the `attrs` key: literal attributes bypassing property assignment
    /// (builder).
    pub fn attrs<K, V>(self, attrs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let attrs = attrs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.set("attrs", OptionValue::Attrs(attrs))
    }

    /// Set `data-<name>` (builder).
    pub fn data(self, name: &str, value: impl Into<Value>) -> Self {
        self.set(format!("data-{name}"), OptionValue::Value(value.into()))
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<(String, OptionValue)> {
        self.entries
    }
}

fn upsert<V>(entries: &mut Vec<(String, V)>, key: String, value: V) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some(entry) => entry.1 = value,
        None => entries.push((key, value)),
    }
}
