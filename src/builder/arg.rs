//! The tagged union every builder argument is converted into.
//!
//! Heterogeneous call arguments are classified once, at the boundary, by
//! `From` conversions. Each variant maps to exactly one handling rule.

use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, FixedOffset, Utc};
use regex::Regex;

use super::options::Options;
use crate::dom::NodeId;
use crate::reactive::{Observable, Reactive};
use crate::value::{self, Value};

/// A primitive that becomes a text child via its canonical text form.
#[derive(Debug, Clone)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Date(DateTime<FixedOffset>),
    Pattern(Regex),
}

impl Scalar {
    /// Canonical text form.
    pub fn to_text(&self) -> String {
        match self {
            Scalar::Bool(b) => b.to_string(),
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(f) => value::float_text(*f),
            Scalar::Date(d) => d.format("%a %b %d %Y %H:%M:%S GMT%z").to_string(),
            Scalar::Pattern(re) => format!("/{}/", re.as_str()),
        }
    }
}

/// One positional builder argument.
pub enum Arg {
    /// Absence. Skipped.
    Empty,
    /// Selector while no node exists, text child afterwards.
    Text(String),
    Scalar(Scalar),
    /// Expanded in place.
    List(Vec<Arg>),
    /// Adopted as the node, or appended as a child.
    Node(NodeId),
    Options(Options),
    /// Dynamic content bound to a reactive value.
    Reactive(Rc<dyn Reactive>),
    /// A shape the builder does not handle; carries the source type name.
    Unrecognized(&'static str),
}

impl Arg {
    /// Wrap a value of a type the builder has no rule for.
    pub fn unrecognized<T: ?Sized>() -> Self {
        Arg::Unrecognized(std::any::type_name::<T>())
    }

    /// Short name of the variant, used in errors and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Arg::Empty => "empty",
            Arg::Text(_) => "text",
            Arg::Scalar(_) => "scalar",
            Arg::List(_) => "list",
            Arg::Node(_) => "node",
            Arg::Options(_) => "options",
            Arg::Reactive(_) => "reactive",
            Arg::Unrecognized(_) => "unrecognized",
        }
    }

    /// Build a list argument from anything iterable.
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Arg>,
    {
        Arg::List(items.into_iter().map(Into::into).collect())
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Empty => f.write_str("Empty"),
            Arg::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Arg::Scalar(s) => f.debug_tuple("Scalar").field(s).finish(),
            Arg::List(items) => f.debug_tuple("List").field(items).finish(),
            Arg::Node(id) => f.debug_tuple("Node").field(id).finish(),
            Arg::Options(o) => f.debug_tuple("Options").field(o).finish(),
            Arg::Reactive(_) => f.write_str("Reactive(<accessor>)"),
            Arg::Unrecognized(t) => f.debug_tuple("Unrecognized").field(t).finish(),
        }
    }
}

impl From<()> for Arg {
    fn from(_: ()) -> Self {
        Arg::Empty
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Text(s.to_owned())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Text(s)
    }
}

impl From<&String> for Arg {
    fn from(s: &String) -> Self {
        Arg::Text(s.clone())
    }
}

impl From<char> for Arg {
    fn from(c: char) -> Self {
        Arg::Text(c.to_string())
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Arg::Scalar(Scalar::Bool(b))
    }
}

macro_rules! int_arg {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Arg {
                fn from(n: $t) -> Self {
                    Arg::Scalar(Scalar::Int(i64::from(n)))
                }
            }
        )*
    };
}

int_arg!(i8, i16, i32, i64, u8, u16, u32);

impl From<usize> for Arg {
    fn from(n: usize) -> Self {
        match Value::from(n) {
            Value::Int(n) => Arg::Scalar(Scalar::Int(n)),
            _ => Arg::Scalar(Scalar::Float(n as f64)),
        }
    }
}

impl From<f32> for Arg {
    fn from(f: f32) -> Self {
        Arg::Scalar(Scalar::Float(f64::from(f)))
    }
}

impl From<f64> for Arg {
    fn from(f: f64) -> Self {
        Arg::Scalar(Scalar::Float(f))
    }
}

impl From<DateTime<FixedOffset>> for Arg {
    fn from(d: DateTime<FixedOffset>) -> Self {
        Arg::Scalar(Scalar::Date(d))
    }
}

impl From<DateTime<Utc>> for Arg {
    fn from(d: DateTime<Utc>) -> Self {
        Arg::Scalar(Scalar::Date(d.into()))
    }
}

impl From<Regex> for Arg {
    fn from(re: Regex) -> Self {
        Arg::Scalar(Scalar::Pattern(re))
    }
}

impl From<&Regex> for Arg {
    fn from(re: &Regex) -> Self {
        Arg::Scalar(Scalar::Pattern(re.clone()))
    }
}

impl From<NodeId> for Arg {
    fn from(id: NodeId) -> Self {
        Arg::Node(id)
    }
}

impl From<Options> for Arg {
    fn from(o: Options) -> Self {
        Arg::Options(o)
    }
}

impl From<Value> for Arg {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => Arg::Empty,
            Value::Bool(b) => Arg::Scalar(Scalar::Bool(b)),
            Value::Int(n) => Arg::Scalar(Scalar::Int(n)),
            Value::Float(f) => Arg::Scalar(Scalar::Float(f)),
            Value::Text(s) => Arg::Text(s),
            Value::Node(id) => Arg::Node(id),
        }
    }
}

impl<T> From<Observable<T>> for Arg
where
    T: Clone + Into<Value> + 'static,
{
    fn from(o: Observable<T>) -> Self {
        Arg::Reactive(Rc::new(o))
    }
}

impl From<Rc<dyn Reactive>> for Arg {
    fn from(r: Rc<dyn Reactive>) -> Self {
        Arg::Reactive(r)
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(v: Option<T>) -> Self {
        v.map_or(Arg::Empty, Into::into)
    }
}

impl<T: Into<Arg>> From<Vec<T>> for Arg {
    fn from(items: Vec<T>) -> Self {
        Arg::list(items)
    }
}

impl<T: Into<Arg>, const N: usize> From<[T; N]> for Arg {
    fn from(items: [T; N]) -> Self {
        Arg::list(items)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn scalar_text() {
        assert_eq!(Scalar::Bool(false).to_text(), "false");
        assert_eq!(Scalar::Int(4).to_text(), "4");
        assert_eq!(Scalar::Float(2.5).to_text(), "2.5");
        assert_eq!(
            Scalar::Pattern(Regex::new("hello").unwrap()).to_text(),
            "/hello/"
        );
    }

    #[test]
    fn date_text() {
        let d = Utc.with_ymd_and_hms(2001, 1, 15, 0, 0, 0).unwrap();
        let Arg::Scalar(s) = Arg::from(d) else {
            panic!("expected scalar");
        };
        assert_eq!(s.to_text(), "Mon Jan 15 2001 00:00:00 GMT+0000");
    }

    #[test]
    fn conversions_pick_variants() {
        assert_eq!(Arg::from("div").kind(), "text");
        assert_eq!(Arg::from(3_u8).kind(), "scalar");
        assert_eq!(Arg::from(None::<&str>).kind(), "empty");
        assert_eq!(Arg::from(()).kind(), "empty");
        assert_eq!(Arg::from(vec!["a", "b"]).kind(), "list");
        assert_eq!(Arg::from(Observable::new(1)).kind(), "reactive");
        assert_eq!(Arg::from(Options::new()).kind(), "options");
        assert_eq!(Arg::from(Value::Null).kind(), "empty");
    }

    #[test]
    fn unrecognized_names_the_type() {
        let arg = Arg::unrecognized::<std::time::Duration>();
        assert!(matches!(arg, Arg::Unrecognized(name) if name.ends_with("Duration")));
    }

    #[test]
    fn nested_lists() {
        let arg = Arg::from(vec![Arg::from("a"), Arg::from(vec!["b", "c"])]);
        let Arg::List(items) = arg else {
            panic!("expected list");
        };
        assert_eq!(items.len(), 2);
        assert!(matches!(&items[1], Arg::List(inner) if inner.len() == 2));
    }
}
